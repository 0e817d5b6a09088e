//! `SeaORM` Entity for published header layouts.
//!
//! Rows are append-only: every promotion inserts a new one and the newest wins.

use crate::enums::common::ReviewStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "header")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub background_color: String,
    pub header_height: String,
    pub header_position: String,
    pub border_color: String,
    pub border_height: String,
    pub border_shadow: String,
    pub logo_width: String,
    pub logo_height: String,
    pub logo_orientation: String,
    pub status: ReviewStatus,
    pub created_at: Option<DateTimeUtc>,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
