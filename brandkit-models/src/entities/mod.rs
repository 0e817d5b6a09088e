pub mod prelude;

pub mod company;
pub mod company_staging;
pub mod header;
pub mod header_staging;
pub mod menu_config;
