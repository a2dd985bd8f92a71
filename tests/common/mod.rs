#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sales_dashboard::{
    Server,
    database::entities::{CampaignRecord, ProductRecord, ProductStatus, SaleRecord},
    test_utils::TestServerBuilder,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

/// Test harness wrapping a server on an in-memory database
pub struct TestHarness {
    pub server: Server,
    pub app: Router,
}

impl TestHarness {
    pub async fn new() -> Self {
        Self::from_builder(TestServerBuilder::new()).await
    }

    pub async fn from_builder(builder: TestServerBuilder) -> Self {
        let server = builder.build().await;
        let app = server.create_app();
        Self { server, app }
    }

    /// Send a request and decode the JSON body (`Value::Null` when empty)
    pub async fn request(&self, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri).await
    }

    pub async fn add_product(&self, name: &str, price: Decimal) -> i32 {
        self.server
            .database
            .products()
            .store(&ProductRecord {
                id: 0,
                image_url: String::new(),
                name: name.to_string(),
                status: ProductStatus::Active,
                price,
                stock: 100,
                available_at: Utc::now(),
            })
            .await
            .unwrap()
            .id
    }

    pub async fn add_campaign(&self, name: &str) -> i32 {
        self.server
            .database
            .campaigns()
            .store(&CampaignRecord {
                id: 0,
                name: name.to_string(),
                start_date: Utc::now(),
                end_date: None,
                budget: Decimal::new(5000, 0),
                description: None,
            })
            .await
            .unwrap()
            .id
    }

    pub async fn add_sale(
        &self,
        product_id: Option<i32>,
        campaign_id: Option<i32>,
        quantity: i32,
        unit_price: Decimal,
        sale_date: DateTime<Utc>,
    ) {
        self.server
            .database
            .sales()
            .store_record(&SaleRecord {
                id: Uuid::new_v4(),
                product_id,
                campaign_id,
                quantity,
                unit_price,
                sale_date,
            })
            .await
            .unwrap();
    }
}

pub fn at(value: &str) -> DateTime<Utc> {
    value.parse().unwrap()
}

/// Parse a decimal serialized as a JSON string
pub fn money(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}
