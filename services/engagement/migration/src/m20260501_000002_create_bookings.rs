use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::PropertyTitle).text())
                    .col(ColumnDef::new(Bookings::UserId).big_integer())
                    .col(ColumnDef::new(Bookings::ClientName).text())
                    .col(ColumnDef::new(Bookings::ClientEmail).text())
                    .col(ColumnDef::new(Bookings::ClientPhone).text())
                    .col(ColumnDef::new(Bookings::AppointmentDate).date().not_null())
                    .col(ColumnDef::new(Bookings::AppointmentTime).time().not_null())
                    .col(ColumnDef::new(Bookings::Message).text())
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Bookings::CsApprovedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Bookings::SalesApprovedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Bookings::RejectionReason).text())
                    .col(
                        ColumnDef::new(Bookings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bookings::UpdatedAt)
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
                    .table(Bookings::Table)
                    .col(Bookings::Status)
                    .col((Bookings::CreatedAt, IndexOrder::Desc))
                    .name("idx_bookings_status_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    PropertyId,
    PropertyTitle,
    UserId,
    ClientName,
    ClientEmail,
    ClientPhone,
    AppointmentDate,
    AppointmentTime,
    Message,
    Status,
    CsApprovedAt,
    SalesApprovedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}
