use sea_orm_migration::prelude::*;

mod m20260501_000001_create_otp_challenges;
mod m20260501_000002_create_bookings;
mod m20260501_000003_create_inquiries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260501_000001_create_otp_challenges::Migration),
            Box::new(m20260501_000002_create_bookings::Migration),
            Box::new(m20260501_000003_create_inquiries::Migration),
        ]
    }
}

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
