//! Toggle-menu button configuration.

use crate::{
    constants::MENU_CONFIG_SINGLETON_ID,
    entities::menu_config::{ActiveModel, Entity as MenuConfigEntity},
    initializer::SeedableTrait,
};
use sea_orm::{DeriveIntoActiveModel, IntoActiveModel, JsonValue};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Request and response body: any JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuConfigPayload(pub JsonValue);

impl Validate for MenuConfigPayload {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.0.is_object() {
            return Ok(());
        }
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("object");
        err.message = Some("config must be a JSON object".into());
        errors.add("config", err);
        Err(errors)
    }
}

/// Seed row written at migration time.
#[derive(Clone, Debug, PartialEq, DeriveIntoActiveModel)]
pub struct NewMenuConfigWithId {
    pub id: i32,
    pub config: JsonValue,
}

impl Default for NewMenuConfigWithId {
    fn default() -> Self {
        Self {
            id: MENU_CONFIG_SINGLETON_ID,
            config: JsonValue::Object(Default::default()),
        }
    }
}

impl SeedableTrait for NewMenuConfigWithId {
    type ActiveModel = ActiveModel;
    type Entity = MenuConfigEntity;

    #[inline]
    fn get_active_model(&self) -> Self::ActiveModel {
        self.clone().into_active_model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_objects_are_valid() {
        assert!(MenuConfigPayload(json!({ "showSearch": true })).validate().is_ok());
        assert!(MenuConfigPayload(json!([1, 2])).validate().is_err());
        assert!(MenuConfigPayload(json!("x")).validate().is_err());
    }
}
