pub use crate::domain::{
    common::{resolve_fresher, Freshest, Timestamped},
    company::{CompanyLogo, CompanyProfile, PromoteCompany},
    header::{HeaderHistoryParams, HeaderLayout, PromoteHeader},
    media::{DeleteImageParams, DeleteResult, ImageInfo, ImageList, ImageListParams, UploadedFile},
    menu_config::{MenuConfigPayload, NewMenuConfigWithId},
};
