use brandkit_error::BKResult;
use config::{Config, Environment, File};
use serde::{self, Deserialize};
use std::{ops::Deref, sync::Arc};
use sysinfo::System;

use crate::constants::{
    DATA_DIR, ENV_CORS_ORIGIN_PREFIX, ENV_PREFIX, ENV_UPLOAD_LOGOS_DIR, ENV_UPLOAD_MEDIA_DIR,
};

#[derive(Debug, Clone)]
pub struct Settings(Arc<Inner>);

impl Deref for Settings {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Settings {
    /// Layers, lowest priority first: config file, `BK__*` variables, then the
    /// plain `UPLOAD_*_DIR` and `CORS_ORIGIN*` variables.
    pub fn new(config_path: String) -> BKResult<Self> {
        Self::from_sources(config_path, std::env::vars())
    }

    fn from_sources<I>(config_path: String, vars: I) -> BKResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();
        let lookup = |key: &str| {
            vars.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .filter(|v| !v.trim().is_empty())
        };

        let env_source = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("web.cors.whitelist.origins")
            .with_list_parse_key("web.cors.whitelist.methods")
            .with_list_parse_key("web.cors.whitelist.headers")
            .with_list_parse_key("upload.allowed_mimes")
            .source(Some(vars.iter().cloned().collect()));

        let mut builder = Config::builder()
            .add_source(File::with_name(config_path.as_str()).required(false))
            .add_source(env_source)
            .set_override_option("upload.logos_dir", lookup(ENV_UPLOAD_LOGOS_DIR))?
            .set_override_option("upload.media_dir", lookup(ENV_UPLOAD_MEDIA_DIR))?;

        let origins = cors_origins_from_env(vars.iter().cloned());
        if !origins.is_empty() {
            builder = builder
                .set_override("web.cors.mode", "whitelist")?
                .set_override("web.cors.whitelist.origins", origins)?;
        }

        let inner: Inner = builder.build()?.try_deserialize()?;
        Ok(Self(Arc::new(inner)))
    }
}

/// Collects origins from every `CORS_ORIGIN*` variable.
///
/// Values may be comma separated. Variables are visited in name order and
/// duplicates are dropped.
pub fn cors_origins_from_env<I>(vars: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut matched: Vec<(String, String)> = vars
        .into_iter()
        .filter(|(k, _)| k.starts_with(ENV_CORS_ORIGIN_PREFIX))
        .collect();
    matched.sort_by(|a, b| a.0.cmp(&b.0));

    let mut origins: Vec<String> = Vec::new();
    for (_, value) in matched {
        for origin in value.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            if !origins.iter().any(|o| o == origin) {
                origins.push(origin.to_string());
            }
        }
    }
    origins
}

#[derive(Debug, Clone, Deserialize)]
pub struct Inner {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub web: Web,
    #[serde(default)]
    pub db: Db,
    #[serde(default)]
    pub upload: Upload,
    #[serde(default)]
    pub log: Log,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    /// Runtime root directory; relative paths (`./data`, `./uploads`, `logs`)
    /// resolve against it. Override with `BK__GENERAL__RUNTIME_DIR`.
    #[serde(default = "General::runtime_dir_default")]
    pub runtime_dir: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            runtime_dir: General::runtime_dir_default(),
        }
    }
}

impl General {
    fn runtime_dir_default() -> String {
        ".".into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Web {
    #[serde(default = "Web::router_prefix_default")]
    pub router_prefix: String,
    #[serde(default = "Web::host_default")]
    pub host: String,
    #[serde(default = "Web::port_default")]
    pub port: u16,
    #[serde(default = "Web::workers_default")]
    pub workers: i32,
    /// Maximum accepted JSON body, in bytes.
    #[serde(default = "Web::json_limit_default")]
    pub json_limit: usize,
    #[serde(default)]
    pub cors: Cors,
}

impl Default for Web {
    fn default() -> Self {
        Web {
            router_prefix: Web::router_prefix_default(),
            host: Web::host_default(),
            port: Web::port_default(),
            workers: Web::workers_default(),
            json_limit: Web::json_limit_default(),
            cors: Default::default(),
        }
    }
}

impl Web {
    fn router_prefix_default() -> String {
        "/api".into()
    }

    fn port_default() -> u16 {
        5000
    }

    fn host_default() -> String {
        "0.0.0.0".into()
    }

    fn workers_default() -> i32 {
        0 // one per CPU
    }

    fn json_limit_default() -> usize {
        // data URIs can land in logo/banner
        16 * 1024 * 1024
    }

    /// Get actual number of workers based on configuration
    pub fn get_worker_count(&self) -> usize {
        match self.workers {
            0 => System::new_all().cpus().len().max(1),
            n if n > 0 => n as usize,
            n => std::cmp::max(
                1,
                (System::new_all().cpus().len() as i32 / n.abs()) as usize,
            ),
        }
    }
}

#[derive(Default, Debug, Clone, Deserialize)]
pub struct Cors {
    #[serde(default)]
    pub mode: CorsMode,
    #[serde(default)]
    pub whitelist: Whitelist,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorsMode {
    #[default]
    AllowAll,
    Whitelist,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Whitelist {
    #[serde(default)]
    pub origins: Vec<String>,
    #[serde(default = "Whitelist::methods_default")]
    pub methods: Vec<String>,
    #[serde(default = "Whitelist::headers_default")]
    pub headers: Vec<String>,
    #[serde(default = "Whitelist::credentials_default")]
    pub credentials: bool,
}

impl Default for Whitelist {
    fn default() -> Self {
        Whitelist {
            origins: Vec::new(),
            methods: Whitelist::methods_default(),
            headers: Whitelist::headers_default(),
            credentials: Whitelist::credentials_default(),
        }
    }
}

impl Whitelist {
    fn methods_default() -> Vec<String> {
        vec![
            "GET".into(),
            "POST".into(),
            "PUT".into(),
            "DELETE".into(),
            "OPTIONS".into(),
        ]
    }

    fn headers_default() -> Vec<String> {
        vec!["Content-Type".into(), "Authorization".into()]
    }

    fn credentials_default() -> bool {
        true
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Db {
    #[serde(default)]
    pub sqlite: Sqlite,
}

/// Connection settings a database backend must provide.
pub trait BKDbConfig: Send + Sync {
    /// Returns the database file path.
    fn db_path(&self) -> String;

    /// Generates a URL for the database connection.
    fn to_url(&self) -> String;

    /// Returns the directory containing the database file.
    fn db_dir(&self) -> String;
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sqlite {
    #[serde(default = "Sqlite::path_default")]
    pub path: String,
    #[serde(default = "Sqlite::timeout_default")]
    pub timeout: u64,
    #[serde(default = "Sqlite::idle_timeout_default")]
    pub idle_timeout: u64,
    #[serde(default = "Sqlite::max_lifetime_default")]
    pub max_lifetime: u64,
    #[serde(default = "Sqlite::max_connections_default")]
    pub max_connections: u32,
    #[serde(default = "Sqlite::auto_create_default")]
    pub auto_create: bool,
}

impl Default for Sqlite {
    fn default() -> Self {
        Sqlite {
            path: Sqlite::path_default(),
            timeout: Sqlite::timeout_default(),
            idle_timeout: Sqlite::idle_timeout_default(),
            max_lifetime: Sqlite::max_lifetime_default(),
            max_connections: Sqlite::max_connections_default(),
            auto_create: Sqlite::auto_create_default(),
        }
    }
}

impl BKDbConfig for Sqlite {
    fn db_path(&self) -> String {
        self.path.clone()
    }

    fn to_url(&self) -> String {
        if self.auto_create {
            // mode=rwc creates the file when missing
            format!("sqlite:{}/{}?mode=rwc", DATA_DIR, self.path)
        } else {
            format!("sqlite:{}/{}", DATA_DIR, self.path)
        }
    }

    fn db_dir(&self) -> String {
        DATA_DIR.into()
    }
}

impl Sqlite {
    fn path_default() -> String {
        "brandkit.db".into()
    }

    fn timeout_default() -> u64 {
        5000
    }

    fn idle_timeout_default() -> u64 {
        5000
    }

    fn max_lifetime_default() -> u64 {
        5000
    }

    fn max_connections_default() -> u32 {
        16
    }

    fn auto_create_default() -> bool {
        true
    }
}

/// Upload storage. Each media kind has its own directory.
#[derive(Debug, Clone, Deserialize)]
pub struct Upload {
    /// Overridden by `UPLOAD_LOGOS_DIR`.
    #[serde(default = "Upload::logos_dir_default")]
    pub logos_dir: String,
    /// Overridden by `UPLOAD_MEDIA_DIR`.
    #[serde(default = "Upload::media_dir_default")]
    pub media_dir: String,
    /// URL prefix uploads are served under.
    #[serde(default = "Upload::public_prefix_default")]
    pub public_prefix: String,
    #[serde(default = "Upload::max_bytes_default")]
    pub max_bytes: usize,
    #[serde(default = "Upload::allowed_mimes_default")]
    pub allowed_mimes: Vec<String>,
}

impl Default for Upload {
    fn default() -> Self {
        Upload {
            logos_dir: Upload::logos_dir_default(),
            media_dir: Upload::media_dir_default(),
            public_prefix: Upload::public_prefix_default(),
            max_bytes: Upload::max_bytes_default(),
            allowed_mimes: Upload::allowed_mimes_default(),
        }
    }
}

impl Upload {
    fn logos_dir_default() -> String {
        "./uploads/logos".into()
    }

    fn media_dir_default() -> String {
        "./uploads/media".into()
    }

    fn public_prefix_default() -> String {
        "/uploads".into()
    }

    fn max_bytes_default() -> usize {
        10 * 1024 * 1024
    }

    fn allowed_mimes_default() -> Vec<String> {
        vec![
            "image/png".into(),
            "image/jpeg".into(),
            "image/gif".into(),
            "image/webp".into(),
            "image/svg+xml".into(),
            "image/x-icon".into(),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    #[serde(default = "Log::level_default")]
    pub level: String,
    #[serde(default = "Log::dir_default")]
    pub dir: String,
    #[serde(default = "Log::file_name_default")]
    pub file_name: String,
}

impl Default for Log {
    fn default() -> Self {
        Log {
            level: Log::level_default(),
            dir: Log::dir_default(),
            file_name: Log::file_name_default(),
        }
    }
}

impl Log {
    fn level_default() -> String {
        "info".into()
    }

    fn dir_default() -> String {
        "logs".into()
    }

    fn file_name_default() -> String {
        "brandkit.log".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn cors_origins_are_sorted_and_deduplicated() {
        let origins = cors_origins_from_env(vars(&[
            ("CORS_ORIGIN_2", "https://b.example"),
            ("PATH", "/usr/bin"),
            ("CORS_ORIGIN", "https://a.example, https://b.example"),
        ]));
        assert_eq!(origins, vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn defaults_without_file_or_env() {
        let settings = Settings::from_sources("does-not-exist.toml".into(), Vec::new()).unwrap();
        assert_eq!(settings.web.router_prefix, "/api");
        assert_eq!(settings.web.cors.mode, CorsMode::AllowAll);
        assert_eq!(settings.upload.logos_dir, "./uploads/logos");
        assert_eq!(settings.log.level, "info");
    }

    #[test]
    fn plain_env_vars_override_upload_and_cors() {
        let settings = Settings::from_sources(
            "does-not-exist.toml".into(),
            vars(&[
                ("UPLOAD_LOGOS_DIR", "/srv/logos"),
                ("CORS_ORIGIN_ADMIN", "https://admin.example"),
                ("BK__WEB__PORT", "8088"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.upload.logos_dir, "/srv/logos");
        assert_eq!(settings.upload.media_dir, "./uploads/media");
        assert_eq!(settings.web.port, 8088);
        assert_eq!(settings.web.cors.mode, CorsMode::Whitelist);
        assert_eq!(settings.web.cors.whitelist.origins, vec!["https://admin.example"]);
    }
}
