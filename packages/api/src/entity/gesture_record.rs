//! Manual SeaORM entity for persisted gesture predictions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum stored label length, in characters.
pub const LABEL_MAX_CHARS: usize = 50;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gesture_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub predicted_class: i64,

    #[sea_orm(column_type = "Double")]
    pub confidence: f64,

    #[sea_orm(column_type = "String(StringLen::N(50))")]
    pub gesture_label: String,

    #[sea_orm(column_type = "Text")]
    pub landmark_data: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Class index as reported by the classifier. Rows are only ever written
    /// from a `u32`, so the clamp never changes a stored value.
    pub fn class_index(&self) -> u32 {
        self.predicted_class.clamp(0, i64::from(u32::MAX)) as u32
    }
}

/// Cuts `label` to at most [`LABEL_MAX_CHARS`] characters.
pub fn truncate_label(label: &str) -> String {
    match label.char_indices().nth(LABEL_MAX_CHARS) {
        Some((end, _)) => label[..end].to_string(),
        None => label.to_string(),
    }
}
