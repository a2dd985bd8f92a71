mod common;

use axum::http::{Method, StatusCode};
use common::{TestHarness, at, money};
use rust_decimal::Decimal;
use sales_dashboard::{
    report::MockTextGenerator,
    sales::{ORGANIC_CAMPAIGN_NAME, UNKNOWN_CAMPAIGN_NAME, UNKNOWN_PRODUCT_NAME},
    test_utils::TestServerBuilder,
};
use std::sync::Arc;

struct Fixture {
    harness: TestHarness,
    smartphone: i32,
    earbuds: i32,
    summer: i32,
}

/// Two products, one campaign and four sales spread over March, June and July 2024.
///
/// Dates sit mid-month so the month buckets do not depend on the local zone.
async fn fixture(harness: TestHarness) -> Fixture {
    let smartphone = harness.add_product("Smartphone X Pro", Decimal::new(10, 0)).await;
    let earbuds = harness.add_product("Wireless Earbuds Ultra", Decimal::new(5, 0)).await;
    let summer = harness.add_campaign("Summer Sale").await;

    harness
        .add_sale(Some(smartphone), Some(summer), 1, Decimal::new(10, 0), at("2024-06-15T12:00:00Z"))
        .await;
    harness
        .add_sale(Some(smartphone), None, 2, Decimal::new(10, 0), at("2024-06-20T12:00:00Z"))
        .await;
    harness
        .add_sale(Some(earbuds), None, 3, Decimal::new(5, 0), at("2024-07-05T12:00:00Z"))
        .await;
    harness
        .add_sale(Some(earbuds), None, 1, Decimal::new(1, 0), at("2024-03-15T12:00:00Z"))
        .await;

    Fixture {
        harness,
        smartphone,
        earbuds,
        summer,
    }
}

#[tokio::test]
async fn test_monthly_summary_endpoint() {
    let f = fixture(TestHarness::new().await).await;

    let (status, body) = f.harness.get("/api/sales/summary").await;
    assert_eq!(status, StatusCode::OK);

    let months = body["sales"].as_array().unwrap();
    let keys: Vec<(i64, i64)> = months
        .iter()
        .map(|m| (m["year"].as_i64().unwrap(), m["month"].as_i64().unwrap()))
        .collect();
    assert_eq!(keys, vec![(2024, 3), (2024, 6), (2024, 7)]);

    let june = &months[1];
    assert_eq!(money(&june["totalRevenue"]), Decimal::new(30, 0));
    assert_eq!(june["totalUnits"], 3);

    let phone = &june["productSummaries"][f.smartphone.to_string()];
    assert_eq!(phone["productName"], "Smartphone X Pro");
    assert_eq!(money(&phone["averagePrice"]), Decimal::new(10, 0));

    let campaign = &june["campaignSummaries"][f.summer.to_string()];
    assert_eq!(campaign["campaignName"], "Summer Sale");
    assert_eq!(money(&campaign["totalRevenue"]), Decimal::new(10, 0));
    assert_eq!(campaign["totalUnits"], 1);

    let organic = &june["campaignSummaries"]["0"];
    assert_eq!(organic["campaignName"], ORGANIC_CAMPAIGN_NAME);
    assert_eq!(money(&organic["totalRevenue"]), Decimal::new(20, 0));
    assert_eq!(organic["totalUnits"], 2);

    let july = &months[2];
    assert_eq!(money(&july["totalRevenue"]), Decimal::new(15, 0));
    assert_eq!(july["totalUnits"], 3);
}

#[tokio::test]
async fn test_dashboard_endpoint() {
    let f = fixture(TestHarness::new().await).await;

    let (status, body) = f
        .harness
        .get("/api/dashboard?as_of=2024-07-10T12:00:00Z")
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(money(&body["totalRevenue"]), Decimal::new(45, 0));
    assert_eq!(body["totalUnits"], 6);

    let best_sellers = body["bestSellers"].as_array().unwrap();
    assert_eq!(best_sellers.len(), 2);
    assert_eq!(best_sellers[0]["productId"], f.smartphone);
    assert_eq!(money(&best_sellers[0]["totalRevenue"]), Decimal::new(30, 0));
    assert_eq!(best_sellers[1]["productId"], f.earbuds);
    assert_eq!(best_sellers[1]["totalUnits"], 3);

    let campaigns = body["campaignPerformance"].as_array().unwrap();
    assert_eq!(campaigns.len(), 1);
    assert_eq!(campaigns[0]["campaignName"], "Summer Sale");

    let labels: Vec<&str> = body["revenueSeries"]["labels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|label| label.as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["2024-06", "2024-07"]);
    let revenue: Vec<Decimal> = body["revenueSeries"]["revenue"]
        .as_array()
        .unwrap()
        .iter()
        .map(money)
        .collect();
    assert_eq!(revenue, vec![Decimal::new(30, 0), Decimal::new(15, 0)]);
}

#[tokio::test]
async fn test_sales_listing_resolves_names() {
    let f = fixture(TestHarness::new().await).await;
    f.harness
        .add_sale(None, Some(99), 1, Decimal::new(2, 0), at("2024-07-06T12:00:00Z"))
        .await;

    let (status, body) = f.harness.get("/api/sales").await;
    assert_eq!(status, StatusCode::OK);

    let sales = body["sales"].as_array().unwrap();
    assert_eq!(sales.len(), 5);

    let orphan = sales
        .iter()
        .find(|sale| sale["campaignId"] == 99)
        .unwrap();
    assert_eq!(orphan["productName"], UNKNOWN_PRODUCT_NAME);
    assert_eq!(orphan["campaignName"], UNKNOWN_CAMPAIGN_NAME);

    let organic = sales
        .iter()
        .filter(|sale| sale["campaignId"].is_null())
        .count();
    assert_eq!(organic, 3);
}

#[tokio::test]
async fn test_deleted_product_falls_back_to_unknown_name() {
    let f = fixture(TestHarness::new().await).await;

    let (status, _) = f
        .harness
        .request(Method::DELETE, &format!("/api/products/{}", f.earbuds))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = f.harness.get("/api/sales/summary").await;
    assert_eq!(status, StatusCode::OK);

    let july = &body["sales"][2];
    assert_eq!(
        july["productSummaries"][f.earbuds.to_string()]["productName"],
        UNKNOWN_PRODUCT_NAME
    );
    assert_eq!(money(&july["totalRevenue"]), Decimal::new(15, 0));
}

#[tokio::test]
async fn test_unattributed_sales_reconcile() {
    let f = fixture(TestHarness::new().await).await;
    f.harness
        .add_sale(None, None, 4, Decimal::new(3, 0), at("2024-07-06T12:00:00Z"))
        .await;

    let (_, body) = f.harness.get("/api/sales/summary").await;
    let july = &body["sales"][2];

    assert_eq!(money(&july["totalRevenue"]), Decimal::new(27, 0));
    assert_eq!(money(&july["unattributedRevenue"]), Decimal::new(12, 0));
    assert_eq!(july["unattributedUnits"], 4);

    let product_revenue: Decimal = july["productSummaries"]
        .as_object()
        .unwrap()
        .values()
        .map(|p| money(&p["totalRevenue"]))
        .sum();
    assert_eq!(
        product_revenue + money(&july["unattributedRevenue"]),
        money(&july["totalRevenue"])
    );
}

#[tokio::test]
async fn test_malformed_sale_is_unprocessable() {
    let f = fixture(TestHarness::new().await).await;
    f.harness
        .add_sale(Some(f.smartphone), None, 0, Decimal::new(10, 0), at("2024-07-06T12:00:00Z"))
        .await;

    let (status, body) = f.harness.get("/api/sales/summary").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Malformed input");
    assert!(body["message"].as_str().unwrap().contains("quantity"));
}

#[tokio::test]
async fn test_report_endpoint() {
    let generator = Arc::new(MockTextGenerator::with_response("## Sales report"));
    let harness =
        TestHarness::from_builder(TestServerBuilder::new().with_text_generator(generator.clone()))
            .await;
    let f = fixture(harness).await;

    let (status, body) = f.harness.get("/api/report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "## Sales report");

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Smartphone X Pro"));
    assert!(prompts[0].contains("Summer Sale"));
}

#[tokio::test]
async fn test_report_endpoint_without_api_key() {
    let f = fixture(TestHarness::new().await).await;

    let (status, body) = f.harness.get("/api/report").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Report generation unavailable");
}

#[tokio::test]
async fn test_health_reports_components() {
    let harness = TestHarness::new().await;

    let (status, body) = harness.get("/health?check=all").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "sales-dashboard");
    assert_eq!(body["checks"]["database"]["status"], "healthy");
    assert_eq!(body["checks"]["report"]["status"], "degraded");
}

#[tokio::test]
async fn test_openapi_document() {
    let harness = TestHarness::new().await;

    let (status, body) = harness.get("/api/docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Sales Dashboard API");
    assert!(body["paths"]["/api/sales/summary"].is_object());
}
