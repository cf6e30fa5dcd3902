use sea_orm::entity::prelude::*;

/// One-time email verification code gating anonymous inquiry submission.
/// Expires 5 minutes after issue; reissuing replaces the live challenge
/// for the same address.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "otp_challenges")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub code: String,
    pub purpose: String,
    pub verified_at: Option<chrono::DateTime<chrono::Utc>>,
    pub consumed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
