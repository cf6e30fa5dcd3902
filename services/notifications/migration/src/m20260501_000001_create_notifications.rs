use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notifications::Title).text().not_null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(ColumnDef::new(Notifications::Icon).text())
                    .col(
                        ColumnDef::new(Notifications::Priority)
                            .text()
                            .not_null()
                            .default("normal"),
                    )
                    .col(
                        ColumnDef::new(Notifications::Status)
                            .text()
                            .not_null()
                            .default("unread"),
                    )
                    .col(ColumnDef::new(Notifications::NotificationType).text())
                    .col(ColumnDef::new(Notifications::SourceTable).text())
                    .col(ColumnDef::new(Notifications::SourceTableDisplayName).text())
                    .col(ColumnDef::new(Notifications::SourceRecordId).text())
                    .col(ColumnDef::new(Notifications::Data).json_binary())
                    .col(ColumnDef::new(Notifications::ActionUrl).text())
                    .col(ColumnDef::new(Notifications::RecipientRole).text())
                    .col(ColumnDef::new(Notifications::RecipientId).big_integer())
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Notifications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Notifications::ReadAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Notifications::Table)
                    .col(Notifications::RecipientRole)
                    .col((Notifications::CreatedAt, IndexOrder::Desc))
                    .name("idx_notifications_recipient_role_created_at")
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Notifications::Table)
                    .col(Notifications::RecipientId)
                    .col((Notifications::CreatedAt, IndexOrder::Desc))
                    .name("idx_notifications_recipient_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Notifications {
    Table,
    Id,
    Title,
    Message,
    Icon,
    Priority,
    Status,
    NotificationType,
    SourceTable,
    SourceTableDisplayName,
    SourceRecordId,
    Data,
    ActionUrl,
    RecipientRole,
    RecipientId,
    CreatedAt,
    UpdatedAt,
    ReadAt,
}
