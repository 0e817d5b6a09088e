pub use super::company::{
    ActiveModel as CompanyActiveModel, Column as CompanyColumn, Entity as Company,
    Model as CompanyModel,
};
pub use super::company_staging::{
    ActiveModel as CompanyStagingActiveModel, Column as CompanyStagingColumn,
    Entity as CompanyStaging, Model as CompanyStagingModel,
};
pub use super::header::{
    ActiveModel as HeaderActiveModel, Column as HeaderColumn, Entity as Header,
    Model as HeaderModel,
};
pub use super::header_staging::{
    ActiveModel as HeaderStagingActiveModel, Column as HeaderStagingColumn,
    Entity as HeaderStaging, Model as HeaderStagingModel,
};
pub use super::menu_config::{
    ActiveModel as MenuConfigActiveModel, Column as MenuConfigColumn, Entity as MenuConfig,
    Model as MenuConfigModel,
};
