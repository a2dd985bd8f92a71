pub mod docs;
pub mod health;
pub mod products;
pub mod report;
pub mod sales;

pub use docs::create_docs_routes;
pub use health::create_health_routes;
pub use products::create_product_routes;
pub use report::create_report_routes;
pub use sales::create_sales_routes;

use serde::Serialize;
use utoipa::ToSchema;

/// Error body returned by every handler
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error category, e.g. "Data unavailable"
    pub error: String,
    pub message: String,
}
