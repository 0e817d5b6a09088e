use brandkit_error::{BKError, BKResult};
use brandkit_models::settings::Log;
use std::{
    str::FromStr,
    sync::{Arc, RwLock},
};
use tracing::{subscriber::set_global_default, Level};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::DynFilterFn,
    fmt::{self},
    layer::SubscriberExt,
    Layer, Registry,
};

pub struct Logger {
    level: Arc<RwLock<Level>>,
    _file_guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn new(level: Option<Level>) -> Self {
        Logger {
            level: Arc::new(RwLock::new(level.unwrap_or(Level::INFO))),
            _file_guard: None,
        }
    }

    /// Parses `log.level` from settings; unknown values fall back to `INFO`.
    pub fn from_settings(log: &Log) -> Self {
        Self::new(Level::from_str(log.level.trim()).ok())
    }

    #[inline]
    /// Sets the new logging level. Takes effect for both layers immediately.
    pub fn set_level(&self, new_level: Level) {
        if let Ok(mut level) = self.level.write() {
            *level = new_level;
        }
    }

    #[inline]
    /// Retrieves the current log level.
    pub fn get_level(&self) -> Level {
        self.level
            .read()
            .map(|level| *level)
            .unwrap_or(Level::INFO)
    }

    #[inline]
    /// Installs the global subscriber: stdout plus a daily rolling file under
    /// `log.dir`.
    pub fn initialize(&mut self, log: &Log) -> BKResult<()> {
        let file_appender = rolling::daily(&log.dir, &log.file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        self._file_guard = Some(guard);

        let console_filter = {
            let level = Arc::clone(&self.level);
            DynFilterFn::new(move |metadata, _| {
                level
                    .read()
                    .map(|level| metadata.level() <= &*level)
                    .unwrap_or(true)
            })
        };

        let file_filter = {
            let level = Arc::clone(&self.level);
            DynFilterFn::new(move |metadata, _| {
                level
                    .read()
                    .map(|level| metadata.level() <= &*level)
                    .unwrap_or(true)
            })
        };

        let console_layer = {
            #[cfg(debug_assertions)]
            let layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stdout)
                .with_file(true)
                .with_line_number(true);

            #[cfg(not(debug_assertions))]
            let layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_file(false)
                .with_line_number(false);

            layer.with_filter(console_filter)
        };

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_filter(file_filter);

        let subscriber = Registry::default().with(console_layer).with(file_layer);

        set_global_default(subscriber).map_err(|_| BKError::from("Failed to set logger"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing_and_switching() {
        let log = Log {
            level: "warn".into(),
            ..Default::default()
        };
        let logger = Logger::from_settings(&log);
        assert_eq!(logger.get_level(), Level::WARN);

        logger.set_level(Level::DEBUG);
        assert_eq!(logger.get_level(), Level::DEBUG);

        let fallback = Logger::from_settings(&Log {
            level: "chatty".into(),
            ..Default::default()
        });
        assert_eq!(fallback.get_level(), Level::INFO);
    }
}
