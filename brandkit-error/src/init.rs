use thiserror::Error;

/// Errors raised while wiring the application context at startup.
#[derive(Error, Debug)]
pub enum InitContextError {
    /// A subsystem was requested before it was initialized
    #[error("component not initialized: {0}")]
    NotInitialized(String),
    /// A subsystem failed to start
    #[error("primitive error: {0}")]
    Primitive(String),
}
