use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OtpChallenges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OtpChallenges::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OtpChallenges::Email).text().not_null())
                    .col(ColumnDef::new(OtpChallenges::Code).text().not_null())
                    .col(ColumnDef::new(OtpChallenges::Purpose).text().not_null())
                    .col(ColumnDef::new(OtpChallenges::VerifiedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(OtpChallenges::ConsumedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(OtpChallenges::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OtpChallenges::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(OtpChallenges::Table)
                    .col(OtpChallenges::Email)
                    .col((OtpChallenges::CreatedAt, IndexOrder::Desc))
                    .name("idx_otp_challenges_email_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OtpChallenges::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OtpChallenges {
    Table,
    Id,
    Email,
    Code,
    Purpose,
    VerifiedAt,
    ConsumedAt,
    ExpiresAt,
    CreatedAt,
}
