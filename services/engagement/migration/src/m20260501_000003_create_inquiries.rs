use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inquiries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inquiries::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(Inquiries::PropertyTitle).text())
                    .col(ColumnDef::new(Inquiries::UserId).big_integer())
                    .col(ColumnDef::new(Inquiries::FirstName).text().not_null())
                    .col(ColumnDef::new(Inquiries::LastName).text().not_null())
                    .col(ColumnDef::new(Inquiries::Email).text().not_null())
                    .col(ColumnDef::new(Inquiries::Phone).text())
                    .col(ColumnDef::new(Inquiries::Message).text().not_null())
                    .col(
                        ColumnDef::new(Inquiries::IsAuthenticated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Inquiries::Status)
                            .text()
                            .not_null()
                            .default("new"),
                    )
                    .col(
                        ColumnDef::new(Inquiries::CreatedAt)
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
                    .table(Inquiries::Table)
                    .col((Inquiries::CreatedAt, IndexOrder::Desc))
                    .name("idx_inquiries_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inquiries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Inquiries {
    Table,
    Id,
    PropertyId,
    PropertyTitle,
    UserId,
    FirstName,
    LastName,
    Email,
    Phone,
    Message,
    IsAuthenticated,
    Status,
    CreatedAt,
}
