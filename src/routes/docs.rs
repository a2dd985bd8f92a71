use crate::server::Server;
use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales Dashboard API",
        version = "1.0.0",
        description = "Sales aggregation, dashboard and report endpoints"
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::sales::list_sales,
        crate::routes::sales::sales_summary,
        crate::routes::sales::dashboard,
        crate::routes::products::list_products,
        crate::routes::products::delete_product,
        crate::routes::report::generate_report,
    ),
    components(
        schemas(
            crate::routes::ApiErrorResponse,
            crate::routes::health::HealthCheckQuery,
            crate::health::HealthResponse,
            crate::health::HealthStatus,
            crate::health::HealthCheckResult,
            crate::health::HealthSummary,
            crate::routes::sales::SalesResponse,
            crate::routes::sales::SalesSummaryResponse,
            crate::routes::sales::DashboardQuery,
            crate::routes::sales::SalesListQuery,
            crate::sales::SaleWithDetails,
            crate::sales::MonthlySummary,
            crate::sales::ProductSummary,
            crate::sales::CampaignSummary,
            crate::sales::DashboardView,
            crate::sales::BestSeller,
            crate::sales::CampaignPerformance,
            crate::sales::RevenueSeries,
            crate::routes::products::ProductListQuery,
            crate::database::ProductPage,
            crate::database::entities::ProductRecord,
            crate::database::entities::ProductStatus,
            crate::routes::report::ReportResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Sales", description = "Sales listing, monthly summaries and dashboard"),
        (name = "Products", description = "Product catalogue"),
        (name = "Report", description = "Generated sales reports"),
    )
)]
pub struct ApiDoc;

/// Create documentation routes
pub fn create_docs_routes() -> Router<Server> {
    Router::new().route("/docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
