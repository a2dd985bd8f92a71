use crate::{
    database::ProductPage, error::AppError, routes::ApiErrorResponse, server::Server,
};
use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
};
use serde::Deserialize;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

/// Products returned per page of the catalogue listing
pub const PRODUCTS_PER_PAGE: u64 = 5;

/// Create product catalogue routes
pub fn create_product_routes() -> Router<Server> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", delete(delete_product))
}

/// Query parameters for the product listing
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ProductListQuery {
    /// Exact product name; when set, every match is returned on one page
    pub search: Option<String>,
    #[serde(default)]
    pub offset: u64,
}

/// List products a page at a time
#[utoipa::path(
    get,
    path = "/api/products",
    summary = "List Products",
    tags = ["Products"],
    params(ProductListQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 503, description = "Database unavailable", body = ApiErrorResponse)
    )
)]
pub async fn list_products(
    State(server): State<Server>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<ProductPage>, AppError> {
    let page = server
        .database
        .products()
        .find_page(params.search.as_deref(), params.offset, PRODUCTS_PER_PAGE)
        .await?;

    Ok(Json(page))
}

/// Delete a product; its sales keep their rows and become unattributed
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    summary = "Delete Product",
    tags = ["Products"],
    params(
        ("id" = i32, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "No product with this id", body = ApiErrorResponse),
        (status = 503, description = "Database unavailable", body = ApiErrorResponse)
    )
)]
pub async fn delete_product(
    State(server): State<Server>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    server.database.products().delete(id).await?;
    info!("Deleted product {}", id);
    Ok(StatusCode::NO_CONTENT)
}
