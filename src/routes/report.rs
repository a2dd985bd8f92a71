use crate::{
    database::SalesQuery, error::AppError, routes::ApiErrorResponse, routes::sales::load_inputs,
    server::Server,
};
use axum::{Router, extract::State, response::Json, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Create report generation routes
pub fn create_report_routes() -> Router<Server> {
    Router::new().route("/report", get(generate_report))
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    /// Markdown report
    pub response: String,
}

/// Generate a markdown sales report from the monthly summaries
#[utoipa::path(
    get,
    path = "/api/report",
    summary = "Generate Sales Report",
    tags = ["Report"],
    responses(
        (status = 200, description = "Generated report", body = ReportResponse),
        (status = 422, description = "A sale row is malformed", body = ApiErrorResponse),
        (status = 502, description = "Text generation API failed", body = ApiErrorResponse),
        (status = 503, description = "Report generation not configured or database unavailable", body = ApiErrorResponse)
    )
)]
pub async fn generate_report(
    State(server): State<Server>,
) -> Result<Json<ReportResponse>, AppError> {
    if !server.report_service.is_enabled() {
        return Err(AppError::ReportUnavailable);
    }

    let inputs = load_inputs(&server, &SalesQuery::default()).await?;
    let summaries = server
        .aggregator
        .aggregate(&inputs.sales, &inputs.products, &inputs.campaigns)?;

    let response = server
        .report_service
        .generate_report(&summaries)
        .await?
        .ok_or(AppError::ReportUnavailable)?;

    Ok(Json(ReportResponse { response }))
}
