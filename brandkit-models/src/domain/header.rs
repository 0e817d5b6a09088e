//! Header layout payloads.

use crate::{
    constants::{
        DEFAULT_HEADER_BACKGROUND_COLOR, DEFAULT_HEADER_BORDER_COLOR,
        DEFAULT_HEADER_BORDER_HEIGHT, DEFAULT_HEADER_BORDER_SHADOW, DEFAULT_HEADER_HEIGHT,
        DEFAULT_HEADER_LOGO_HEIGHT, DEFAULT_HEADER_LOGO_ORIENTATION, DEFAULT_HEADER_LOGO_WIDTH,
        DEFAULT_HEADER_POSITION, HEADER_STAGING_ID,
    },
    domain::common::Timestamped,
    entities::prelude::{HeaderModel, HeaderStagingModel},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_aux::prelude::*;
use validator::Validate;

/// CSS-like header settings. Omitted fields fall back to the built-in layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HeaderLayout {
    #[serde(default = "default_background_color")]
    #[validate(length(max = 64))]
    pub background_color: String,
    #[serde(default = "default_header_height")]
    #[validate(length(max = 64))]
    pub header_height: String,
    #[serde(default = "default_header_position")]
    #[validate(length(max = 64))]
    pub header_position: String,
    #[serde(default = "default_border_color")]
    #[validate(length(max = 64))]
    pub border_color: String,
    #[serde(default = "default_border_height")]
    #[validate(length(max = 64))]
    pub border_height: String,
    #[serde(default = "default_border_shadow")]
    #[validate(length(max = 255))]
    pub border_shadow: String,
    #[serde(default = "default_logo_width")]
    #[validate(length(max = 64))]
    pub logo_width: String,
    #[serde(default = "default_logo_height")]
    #[validate(length(max = 64))]
    pub logo_height: String,
    #[serde(default = "default_logo_orientation")]
    #[validate(length(max = 64))]
    pub logo_orientation: String,
}

fn default_background_color() -> String {
    DEFAULT_HEADER_BACKGROUND_COLOR.into()
}

fn default_header_height() -> String {
    DEFAULT_HEADER_HEIGHT.into()
}

fn default_header_position() -> String {
    DEFAULT_HEADER_POSITION.into()
}

fn default_border_color() -> String {
    DEFAULT_HEADER_BORDER_COLOR.into()
}

fn default_border_height() -> String {
    DEFAULT_HEADER_BORDER_HEIGHT.into()
}

fn default_border_shadow() -> String {
    DEFAULT_HEADER_BORDER_SHADOW.into()
}

fn default_logo_width() -> String {
    DEFAULT_HEADER_LOGO_WIDTH.into()
}

fn default_logo_height() -> String {
    DEFAULT_HEADER_LOGO_HEIGHT.into()
}

fn default_logo_orientation() -> String {
    DEFAULT_HEADER_LOGO_ORIENTATION.into()
}

impl Default for HeaderLayout {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            header_height: default_header_height(),
            header_position: default_header_position(),
            border_color: default_border_color(),
            border_height: default_border_height(),
            border_shadow: default_border_shadow(),
            logo_width: default_logo_width(),
            logo_height: default_logo_height(),
            logo_orientation: default_logo_orientation(),
        }
    }
}

impl From<&HeaderStagingModel> for HeaderLayout {
    fn from(m: &HeaderStagingModel) -> Self {
        Self {
            background_color: m.background_color.clone(),
            header_height: m.header_height.clone(),
            header_position: m.header_position.clone(),
            border_color: m.border_color.clone(),
            border_height: m.border_height.clone(),
            border_shadow: m.border_shadow.clone(),
            logo_width: m.logo_width.clone(),
            logo_height: m.logo_height.clone(),
            logo_orientation: m.logo_orientation.clone(),
        }
    }
}

impl From<&HeaderModel> for HeaderLayout {
    fn from(m: &HeaderModel) -> Self {
        Self {
            background_color: m.background_color.clone(),
            header_height: m.header_height.clone(),
            header_position: m.header_position.clone(),
            border_color: m.border_color.clone(),
            border_height: m.border_height.clone(),
            border_shadow: m.border_shadow.clone(),
            logo_width: m.logo_width.clone(),
            logo_height: m.logo_height.clone(),
            logo_orientation: m.logo_orientation.clone(),
        }
    }
}

fn default_staging_id() -> String {
    HEADER_STAGING_ID.into()
}

/// Promotion request for the header draft slot.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PromoteHeader {
    #[serde(default = "default_staging_id")]
    #[validate(length(min = 1, max = 64))]
    pub staging_id: String,
    #[validate(length(min = 1, max = 128, message = "reviewedBy length must be 1..=128"))]
    pub reviewed_by: String,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub version: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HeaderHistoryParams {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    #[validate(range(min = 1, max = 100, message = "limit must be 1..=100"))]
    pub limit: Option<u64>,
}

impl Timestamped for HeaderModel {
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Timestamped for HeaderStagingModel {
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}
