pub mod common;
pub mod media;
