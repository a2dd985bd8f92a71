use crate::database::entities::{SaleRecord, sales};
use crate::database::{DatabaseError, DatabaseResult};
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// Rows per INSERT statement when storing sales in bulk
const INSERT_CHUNK_SIZE: usize = 500;

/// Sales query parameters
#[derive(Debug, Default)]
pub struct SalesQuery {
    pub product_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Sales DAO for database operations
pub struct SalesDao {
    db: DatabaseConnection,
}

fn to_active_model(record: &SaleRecord) -> sales::ActiveModel {
    sales::ActiveModel {
        id: Set(record.id),
        product_id: Set(record.product_id),
        campaign_id: Set(record.campaign_id),
        quantity: Set(record.quantity),
        unit_price: Set(record.unit_price),
        sale_date: Set(record.sale_date),
    }
}

impl SalesDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Store a single sale
    pub async fn store_record(&self, record: &SaleRecord) -> DatabaseResult<()> {
        sales::Entity::insert(to_active_model(record))
            .exec(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;
        Ok(())
    }

    /// Store many sales, returning how many were written
    pub async fn store_records(&self, records: &[SaleRecord]) -> DatabaseResult<usize> {
        for chunk in records.chunks(INSERT_CHUNK_SIZE) {
            sales::Entity::insert_many(chunk.iter().map(to_active_model))
                .exec(&self.db)
                .await
                .map_err(|e| DatabaseError::Database(e.to_string()))?;
        }
        Ok(records.len())
    }

    /// Get sales with filtering, oldest first
    pub async fn get_records(&self, query: &SalesQuery) -> DatabaseResult<Vec<SaleRecord>> {
        let mut select = sales::Entity::find();

        if let Some(product_id) = query.product_id {
            select = select.filter(sales::Column::ProductId.eq(product_id));
        }
        if let Some(campaign_id) = query.campaign_id {
            select = select.filter(sales::Column::CampaignId.eq(campaign_id));
        }
        if let Some(start_date) = query.start_date {
            select = select.filter(sales::Column::SaleDate.gte(start_date));
        }
        if let Some(end_date) = query.end_date {
            select = select.filter(sales::Column::SaleDate.lte(end_date));
        }

        select = select
            .order_by_asc(sales::Column::SaleDate)
            .order_by_asc(sales::Column::Id);

        if let Some(limit) = query.limit {
            select = select.limit(Some(limit));
        }
        if let Some(offset) = query.offset {
            select = select.offset(Some(offset));
        }

        select
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }

    /// Full sale history
    pub async fn get_all(&self) -> DatabaseResult<Vec<SaleRecord>> {
        self.get_records(&SalesQuery::default()).await
    }

    pub async fn count(&self) -> DatabaseResult<u64> {
        sales::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))
    }
}
