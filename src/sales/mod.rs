//! Sales aggregation engine
//!
//! Turns raw sale rows plus product/campaign name lookups into monthly
//! summaries and the ranked views shown on the dashboard. Everything in here
//! is synchronous and works on data that is already loaded into memory.

pub mod aggregator;
pub mod config;
pub mod types;

pub use aggregator::SalesAggregator;
pub use config::{CampaignScope, DashboardConfig};
pub use types::{
    BestSeller, CampaignPerformance, CampaignSummary, DashboardView, MonthKey, MonthlySummary,
    NameLookup, ORGANIC_CAMPAIGN_KEY, ORGANIC_CAMPAIGN_NAME, ProductSummary, RevenueSeries,
    SaleWithDetails, UNKNOWN_CAMPAIGN_NAME, UNKNOWN_PRODUCT_NAME, round_money,
};

use thiserror::Error;
use uuid::Uuid;

/// Errors raised while aggregating sales
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Malformed sale {sale_id}: {reason}")]
    MalformedInput { sale_id: Uuid, reason: String },
}

pub type AggregationResult<T> = Result<T, AggregationError>;
