use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20240601_000001_create_products_table;
mod m20240601_000002_create_campaigns_table;
mod m20240601_000003_create_sales_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_products_table::Migration),
            Box::new(m20240601_000002_create_campaigns_table::Migration),
            Box::new(m20240601_000003_create_sales_table::Migration),
        ]
    }
}

/// Common table and column identifiers
#[derive(Iden)]
pub enum Products {
    Table,
    Id,
    ImageUrl,
    Name,
    Status,
    Price,
    Stock,
    AvailableAt,
}

#[derive(Iden)]
pub enum Campaigns {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
    Budget,
    Description,
}

#[derive(Iden)]
pub enum Sales {
    Table,
    Id,
    ProductId,
    CampaignId,
    Quantity,
    SalePrice,
    SaleDate,
}
