use crate::{
    database::{SalesQuery, entities::SaleRecord},
    error::AppError,
    routes::ApiErrorResponse,
    sales::{DashboardView, MonthlySummary, NameLookup, SaleWithDetails},
    server::Server,
};
use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

/// Create sales and dashboard routes
pub fn create_sales_routes() -> Router<Server> {
    Router::new()
        .route("/sales", get(list_sales))
        .route("/sales/summary", get(sales_summary))
        .route("/dashboard", get(dashboard))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesResponse {
    pub sales: Vec<SaleWithDetails>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SalesSummaryResponse {
    pub sales: Vec<MonthlySummary>,
}

/// Filters for the sales listing
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct SalesListQuery {
    pub product_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl From<SalesListQuery> for SalesQuery {
    fn from(params: SalesListQuery) -> Self {
        SalesQuery {
            product_id: params.product_id,
            campaign_id: params.campaign_id,
            start_date: params.start_date,
            end_date: params.end_date,
            limit: params.limit.map(|limit| limit.min(MAX_SALES_PAGE)),
            offset: params.offset,
        }
    }
}

/// Upper bound on `limit` for the sales listing
const MAX_SALES_PAGE: u64 = 10_000;

/// Query parameters for the dashboard
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct DashboardQuery {
    /// Evaluate the trailing window as of this instant instead of now
    pub as_of: Option<DateTime<Utc>>,
}

/// Everything the aggregator needs, loaded in one go
pub(crate) struct SalesInputs {
    pub sales: Vec<SaleRecord>,
    pub products: NameLookup,
    pub campaigns: NameLookup,
}

pub(crate) async fn load_inputs(
    server: &Server,
    query: &SalesQuery,
) -> Result<SalesInputs, AppError> {
    let products_dao = server.database.products();
    let campaigns_dao = server.database.campaigns();
    let sales_dao = server.database.sales();

    let (products, campaigns, sales) = tokio::try_join!(
        products_dao.find_all(),
        campaigns_dao.find_all(),
        sales_dao.get_records(query),
    )?;

    debug!(
        "Loaded {} sales, {} products, {} campaigns",
        sales.len(),
        products.len(),
        campaigns.len()
    );

    Ok(SalesInputs {
        sales,
        products: NameLookup::from_products(&products),
        campaigns: NameLookup::from_campaigns(&campaigns),
    })
}

/// List sales, oldest first, joined with their product and campaign names
#[utoipa::path(
    get,
    path = "/api/sales",
    summary = "List Sales",
    tags = ["Sales"],
    params(SalesListQuery),
    responses(
        (status = 200, description = "Sales with product and campaign names", body = SalesResponse),
        (status = 503, description = "Database unavailable", body = ApiErrorResponse)
    )
)]
pub async fn list_sales(
    State(server): State<Server>,
    Query(params): Query<SalesListQuery>,
) -> Result<Json<SalesResponse>, AppError> {
    let inputs = load_inputs(&server, &params.into()).await?;
    let sales =
        server
            .aggregator
            .sales_with_details(&inputs.sales, &inputs.products, &inputs.campaigns);

    Ok(Json(SalesResponse { sales }))
}

/// Monthly summaries across all sales, oldest month first
#[utoipa::path(
    get,
    path = "/api/sales/summary",
    summary = "Monthly Sales Summary",
    tags = ["Sales"],
    responses(
        (status = 200, description = "Monthly summaries", body = SalesSummaryResponse),
        (status = 422, description = "A sale row is malformed", body = ApiErrorResponse),
        (status = 503, description = "Database unavailable", body = ApiErrorResponse)
    )
)]
pub async fn sales_summary(
    State(server): State<Server>,
) -> Result<Json<SalesSummaryResponse>, AppError> {
    let inputs = load_inputs(&server, &SalesQuery::default()).await?;
    let sales = server
        .aggregator
        .aggregate(&inputs.sales, &inputs.products, &inputs.campaigns)?;

    Ok(Json(SalesSummaryResponse { sales }))
}

/// Dashboard view for the trailing window
#[utoipa::path(
    get,
    path = "/api/dashboard",
    summary = "Dashboard",
    tags = ["Sales"],
    params(DashboardQuery),
    responses(
        (status = 200, description = "Window totals, rankings and revenue series", body = DashboardView),
        (status = 422, description = "A sale row is malformed", body = ApiErrorResponse),
        (status = 503, description = "Database unavailable", body = ApiErrorResponse)
    )
)]
pub async fn dashboard(
    State(server): State<Server>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let inputs = load_inputs(&server, &SalesQuery::default()).await?;
    let now = params.as_of.unwrap_or_else(Utc::now);
    let view = server.aggregator.dashboard(
        &inputs.sales,
        &inputs.products,
        &inputs.campaigns,
        now,
    )?;

    Ok(Json(view))
}
