use crate::{error::AppError, health::HealthResponse, server::Server};
use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct HealthCheckQuery {
    /// `all`, or the name of a single component such as `database`
    #[serde(default)]
    pub check: Option<String>,
}

/// Create health check routes
///
/// Without a `check` parameter only liveness is reported; the registered
/// component checks run on request.
pub fn create_health_routes() -> Router<Server> {
    Router::new().route("/", get(health_check))
}

#[utoipa::path(
    get,
    path = "/health",
    summary = "Health Check",
    tags = ["Health"],
    params(HealthCheckQuery),
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<Server>,
    Query(params): Query<HealthCheckQuery>,
) -> Result<Json<HealthResponse>, AppError> {
    let filter = params.check.as_deref();
    Ok(Json(server.health_service.check_health(filter).await))
}
