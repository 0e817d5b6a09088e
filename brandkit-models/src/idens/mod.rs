pub mod company;
pub mod company_staging;
pub mod header;
pub mod header_staging;
pub mod menu_config;

const INIT_COMPANY_ORDER: i32 = 0;
const INIT_COMPANY_STAGING_ORDER: i32 = INIT_COMPANY_ORDER + 1;
const INIT_HEADER_ORDER: i32 = INIT_COMPANY_STAGING_ORDER + 1;
const INIT_HEADER_STAGING_ORDER: i32 = INIT_HEADER_ORDER + 1;

const INIT_SYSTEM_ORDER: i32 = 100;
const INIT_MENU_CONFIG_ORDER: i32 = INIT_SYSTEM_ORDER + 1;
