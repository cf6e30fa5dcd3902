use sea_orm::entity::prelude::*;

/// A property tour booking moving through the two-stage approval
/// pipeline. `sales_approved_at` is never set without `cs_approved_at`;
/// a `rejected` row always carries `rejection_reason`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub property_id: Uuid,
    pub property_title: Option<String>,
    pub user_id: Option<i64>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub appointment_date: chrono::NaiveDate,
    pub appointment_time: chrono::NaiveTime,
    pub message: Option<String>,
    pub status: String,
    pub cs_approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub sales_approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
