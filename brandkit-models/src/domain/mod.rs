pub mod common;
pub mod company;
pub mod header;
pub mod media;
pub mod menu_config;
pub mod prelude;
