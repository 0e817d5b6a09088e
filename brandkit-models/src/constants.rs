// Constants shared across the brandkit crates

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "brandkit.toml";

/// Prefix for `BK__SECTION__KEY` style environment overrides.
pub const ENV_PREFIX: &str = "BK";

/// Plain environment variables honoured on top of the prefixed ones.
pub const ENV_UPLOAD_LOGOS_DIR: &str = "UPLOAD_LOGOS_DIR";
pub const ENV_UPLOAD_MEDIA_DIR: &str = "UPLOAD_MEDIA_DIR";
/// Every variable starting with this prefix contributes allowed CORS origins.
pub const ENV_CORS_ORIGIN_PREFIX: &str = "CORS_ORIGIN";

pub const DATA_DIR: &str = "./data";

/// Fixed key of the single header draft slot.
pub const HEADER_STAGING_ID: &str = "staging-header";

/// Primary key of the toggle-menu configuration row.
pub const MENU_CONFIG_SINGLETON_ID: i32 = 1;

// Header layout used until something has been published.
pub const DEFAULT_HEADER_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_HEADER_HEIGHT: &str = "64px";
pub const DEFAULT_HEADER_POSITION: &str = "sticky";
pub const DEFAULT_HEADER_BORDER_COLOR: &str = "#e5e7eb";
pub const DEFAULT_HEADER_BORDER_HEIGHT: &str = "1px";
pub const DEFAULT_HEADER_BORDER_SHADOW: &str = "none";
pub const DEFAULT_HEADER_LOGO_WIDTH: &str = "120px";
pub const DEFAULT_HEADER_LOGO_HEIGHT: &str = "40px";
pub const DEFAULT_HEADER_LOGO_ORIENTATION: &str = "left";
