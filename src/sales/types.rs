use crate::database::entities::{CampaignRecord, ProductRecord};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Name used when a sale has no product or the product id does not resolve
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";
/// Name used when a campaign id is set but does not resolve
pub const UNKNOWN_CAMPAIGN_NAME: &str = "Unknown Campaign";
/// Name of the bucket holding sales without campaign attribution
pub const ORGANIC_CAMPAIGN_NAME: &str = "Non-campaign sales";
/// Key of the organic bucket in `MonthlySummary::campaign_summaries`
pub const ORGANIC_CAMPAIGN_KEY: i32 = 0;

/// Round a money amount for display
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Id to name lookup for products or campaigns
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    names: HashMap<i32, String>,
}

impl NameLookup {
    pub fn from_products(products: &[ProductRecord]) -> Self {
        products.iter().map(|p| (p.id, p.name.clone())).collect()
    }

    pub fn from_campaigns(campaigns: &[CampaignRecord]) -> Self {
        campaigns.iter().map(|c| (c.id, c.name.clone())).collect()
    }

    pub fn get(&self, id: i32) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(i32, S)> for NameLookup {
    fn from_iter<I: IntoIterator<Item = (i32, S)>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(id, name)| (id, name.into()))
                .collect(),
        }
    }
}

/// Calendar bucket of a sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-based month
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Per-product rollup inside a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub product_name: String,
    pub total_revenue: Decimal,
    pub total_units: i64,
    pub average_price: Decimal,
}

/// Per-campaign rollup inside a month, organic sales included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub campaign_name: String,
    pub total_revenue: Decimal,
    pub total_units: i64,
}

/// Sales of one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_revenue: Decimal,
    pub total_units: i64,
    /// Revenue of sales that reference no product
    pub unattributed_revenue: Decimal,
    /// Units of sales that reference no product
    pub unattributed_units: i64,
    pub product_summaries: BTreeMap<i32, ProductSummary>,
    pub campaign_summaries: BTreeMap<i32, CampaignSummary>,
}

impl MonthlySummary {
    pub(crate) fn empty(key: MonthKey) -> Self {
        Self {
            year: key.year,
            month: key.month,
            total_revenue: Decimal::ZERO,
            total_units: 0,
            unattributed_revenue: Decimal::ZERO,
            unattributed_units: 0,
            product_summaries: BTreeMap::new(),
            campaign_summaries: BTreeMap::new(),
        }
    }

    pub fn key(&self) -> MonthKey {
        MonthKey::new(self.year, self.month)
    }

    /// Copy with every money amount rounded for display
    pub fn rounded(&self) -> Self {
        Self {
            year: self.year,
            month: self.month,
            total_revenue: round_money(self.total_revenue),
            total_units: self.total_units,
            unattributed_revenue: round_money(self.unattributed_revenue),
            unattributed_units: self.unattributed_units,
            product_summaries: self
                .product_summaries
                .iter()
                .map(|(id, p)| {
                    let summary = ProductSummary {
                        product_name: p.product_name.clone(),
                        total_revenue: round_money(p.total_revenue),
                        total_units: p.total_units,
                        average_price: round_money(p.average_price),
                    };
                    (*id, summary)
                })
                .collect(),
            campaign_summaries: self
                .campaign_summaries
                .iter()
                .map(|(id, c)| {
                    let summary = CampaignSummary {
                        campaign_name: c.campaign_name.clone(),
                        total_revenue: round_money(c.total_revenue),
                        total_units: c.total_units,
                    };
                    (*id, summary)
                })
                .collect(),
        }
    }
}

/// Entry of the best sellers ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BestSeller {
    pub product_id: i32,
    pub product_name: String,
    pub total_units: i64,
    pub total_revenue: Decimal,
}

/// Entry of the campaign performance ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPerformance {
    pub campaign_id: i32,
    pub campaign_name: String,
    pub total_units: i64,
    pub total_revenue: Decimal,
}

/// A sale joined with its resolved product and campaign names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithDetails {
    pub id: Uuid,
    pub product_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub sale_date: DateTime<Utc>,
    pub product_name: String,
    /// `None` for organic sales
    pub campaign_name: Option<String>,
}

/// Monthly revenue bars for the dashboard chart
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct RevenueSeries {
    /// `YYYY-MM` labels
    pub labels: Vec<String>,
    pub revenue: Vec<Decimal>,
}

/// Everything the dashboard page renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub total_revenue: Decimal,
    pub total_units: i64,
    pub best_sellers: Vec<BestSeller>,
    pub campaign_performance: Vec<CampaignPerformance>,
    pub revenue_series: RevenueSeries,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_round_money() {
        let value = Decimal::from_str("10.005").unwrap();
        assert_eq!(round_money(value), Decimal::from_str("10.01").unwrap());

        let value = Decimal::from_str("3.333333").unwrap();
        assert_eq!(round_money(value), Decimal::from_str("3.33").unwrap());
    }

    #[test]
    fn test_name_lookup() {
        let lookup: NameLookup = [(1, "Widget"), (2, "Gadget")].into_iter().collect();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get(1), Some("Widget"));
        assert_eq!(lookup.get(3), None);
        assert!(NameLookup::default().is_empty());
    }

    #[test]
    fn test_month_key_ordering_and_label() {
        let dec = MonthKey::new(2023, 12);
        let jan = MonthKey::new(2024, 1);
        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2024-01");
    }

    #[test]
    fn test_monthly_summary_serializes_string_keys() {
        let mut summary = MonthlySummary::empty(MonthKey::new(2024, 6));
        summary.campaign_summaries.insert(
            ORGANIC_CAMPAIGN_KEY,
            CampaignSummary {
                campaign_name: ORGANIC_CAMPAIGN_NAME.to_string(),
                total_revenue: Decimal::from(20),
                total_units: 2,
            },
        );

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["year"], 2024);
        assert_eq!(json["month"], 6);
        assert_eq!(
            json["campaignSummaries"]["0"]["campaignName"],
            "Non-campaign sales"
        );
        assert_eq!(json["campaignSummaries"]["0"]["totalUnits"], 2);
    }
}
