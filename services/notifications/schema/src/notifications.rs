use sea_orm::entity::prelude::*;

/// A portal notification row.
///
/// Targeting is either role-wide (`recipient_role`), personal
/// (`recipient_id`, a positive staff/user integer id), or — for portal
/// clients only — via a `user_id` key inside the `data` payload.
/// `recipient_role = 'client'` rows never carry a `recipient_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub icon: Option<String>,
    pub priority: String,
    pub status: String,
    pub notification_type: Option<String>,
    pub source_table: Option<String>,
    pub source_table_display_name: Option<String>,
    pub source_record_id: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub data: Option<Json>,
    pub action_url: Option<String>,
    pub recipient_role: Option<String>,
    pub recipient_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
