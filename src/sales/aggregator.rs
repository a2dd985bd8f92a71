use super::{
    AggregationError, AggregationResult,
    config::{CampaignScope, DashboardConfig},
    types::*,
};
use crate::database::entities::SaleRecord;
use chrono::{DateTime, Datelike, Duration, Local, TimeZone, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

/// Validated revenue and unit contribution of a single sale
#[derive(Debug, Clone, Copy)]
struct LineItem {
    sale_id: Uuid,
    revenue: Decimal,
    units: i64,
}

impl LineItem {
    fn from_sale(sale: &SaleRecord) -> AggregationResult<Self> {
        if sale.quantity <= 0 {
            return Err(malformed(
                sale.id,
                format!("quantity must be positive, got {}", sale.quantity),
            ));
        }
        if sale.unit_price < Decimal::ZERO {
            return Err(malformed(
                sale.id,
                format!("unit price must not be negative, got {}", sale.unit_price),
            ));
        }

        let units = i64::from(sale.quantity);
        let revenue = sale
            .unit_price
            .checked_mul(Decimal::from(units))
            .ok_or_else(|| malformed(sale.id, "revenue overflows"))?;

        Ok(Self {
            sale_id: sale.id,
            revenue,
            units,
        })
    }

    fn add_to(&self, revenue: &mut Decimal, units: &mut i64) -> AggregationResult<()> {
        *revenue = revenue
            .checked_add(self.revenue)
            .ok_or_else(|| malformed(self.sale_id, "running revenue total overflows"))?;
        *units = units
            .checked_add(self.units)
            .ok_or_else(|| malformed(self.sale_id, "running unit total overflows"))?;
        Ok(())
    }
}

fn malformed(sale_id: Uuid, reason: impl Into<String>) -> AggregationError {
    AggregationError::MalformedInput {
        sale_id,
        reason: reason.into(),
    }
}

/// Campaign reference of a sale; ids that are not positive count as organic
fn campaign_ref(sale: &SaleRecord) -> Option<i32> {
    sale.campaign_id.filter(|id| *id > ORGANIC_CAMPAIGN_KEY)
}

fn resolve_product_name(products: &NameLookup, product_id: i32) -> String {
    match products.get(product_id) {
        Some(name) => name.to_string(),
        None => {
            debug!("Product {} not found, using sentinel name", product_id);
            UNKNOWN_PRODUCT_NAME.to_string()
        }
    }
}

fn resolve_campaign_name(campaigns: &NameLookup, campaign_key: i32) -> String {
    if campaign_key == ORGANIC_CAMPAIGN_KEY {
        return ORGANIC_CAMPAIGN_NAME.to_string();
    }
    match campaigns.get(campaign_key) {
        Some(name) => name.to_string(),
        None => {
            debug!("Campaign {} not found, using sentinel name", campaign_key);
            UNKNOWN_CAMPAIGN_NAME.to_string()
        }
    }
}

fn average_price(total_revenue: Decimal, total_units: i64) -> Decimal {
    if total_units > 0 {
        total_revenue
            .checked_div(Decimal::from(total_units))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    }
}

/// Aggregates sale rows into monthly summaries and ranked views.
///
/// Month buckets are derived from the sale date in `Tz` (the process's
/// local zone by default). The aggregator keeps no state between calls.
#[derive(Debug, Clone)]
pub struct SalesAggregator<Tz: TimeZone = Local> {
    config: DashboardConfig,
    timezone: Tz,
}

impl SalesAggregator<Local> {
    pub fn new(config: DashboardConfig) -> Self {
        Self::with_timezone(config, Local)
    }
}

impl<Tz: TimeZone> SalesAggregator<Tz> {
    pub fn with_timezone(config: DashboardConfig, timezone: Tz) -> Self {
        Self { config, timezone }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Calendar bucket of a timestamp in the aggregator's time zone
    pub fn month_key(&self, at: &DateTime<Utc>) -> MonthKey {
        let local = at.with_timezone(&self.timezone);
        MonthKey::new(local.year(), local.month())
    }

    /// Start of the trailing window ending at `now`
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.config.window_days))
    }

    fn in_window(&self, sale: &SaleRecord, now: DateTime<Utc>) -> bool {
        sale.sale_date >= self.window_start(now) && sale.sale_date <= now
    }

    /// Group sales into monthly summaries, oldest month first
    pub fn aggregate(
        &self,
        sales: &[SaleRecord],
        products: &NameLookup,
        campaigns: &NameLookup,
    ) -> AggregationResult<Vec<MonthlySummary>> {
        let mut buckets: BTreeMap<MonthKey, MonthlySummary> = BTreeMap::new();

        for sale in sales {
            let item = LineItem::from_sale(sale)?;
            let key = self.month_key(&sale.sale_date);
            let bucket = buckets
                .entry(key)
                .or_insert_with(|| MonthlySummary::empty(key));

            item.add_to(&mut bucket.total_revenue, &mut bucket.total_units)?;

            match sale.product_id {
                Some(product_id) => {
                    let summary = bucket
                        .product_summaries
                        .entry(product_id)
                        .or_insert_with(|| ProductSummary {
                            product_name: resolve_product_name(products, product_id),
                            total_revenue: Decimal::ZERO,
                            total_units: 0,
                            average_price: Decimal::ZERO,
                        });
                    item.add_to(&mut summary.total_revenue, &mut summary.total_units)?;
                }
                None => item.add_to(
                    &mut bucket.unattributed_revenue,
                    &mut bucket.unattributed_units,
                )?,
            }

            let campaign_key = campaign_ref(sale).unwrap_or(ORGANIC_CAMPAIGN_KEY);
            let summary = bucket
                .campaign_summaries
                .entry(campaign_key)
                .or_insert_with(|| CampaignSummary {
                    campaign_name: resolve_campaign_name(campaigns, campaign_key),
                    total_revenue: Decimal::ZERO,
                    total_units: 0,
                });
            item.add_to(&mut summary.total_revenue, &mut summary.total_units)?;
        }

        let mut summaries: Vec<MonthlySummary> = buckets.into_values().collect();
        for summary in &mut summaries {
            for product in summary.product_summaries.values_mut() {
                product.average_price = average_price(product.total_revenue, product.total_units);
            }
        }

        debug!(
            "Aggregated {} sales into {} monthly summaries",
            sales.len(),
            summaries.len()
        );

        Ok(summaries)
    }

    /// Top products by revenue within the trailing window.
    ///
    /// Ties keep ascending product id order. Sales without a product are not
    /// ranked.
    pub fn best_sellers(
        &self,
        sales: &[SaleRecord],
        products: &NameLookup,
        now: DateTime<Utc>,
    ) -> AggregationResult<Vec<BestSeller>> {
        let mut grouped: BTreeMap<i32, (Decimal, i64)> = BTreeMap::new();

        for sale in sales.iter().filter(|s| self.in_window(s, now)) {
            let item = LineItem::from_sale(sale)?;
            let Some(product_id) = sale.product_id else {
                continue;
            };
            let (revenue, units) = grouped.entry(product_id).or_default();
            item.add_to(revenue, units)?;
        }

        let mut ranked: Vec<BestSeller> = grouped
            .into_iter()
            .map(|(product_id, (total_revenue, total_units))| BestSeller {
                product_id,
                product_name: resolve_product_name(products, product_id),
                total_units,
                total_revenue,
            })
            .collect();

        ranked.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        ranked.truncate(self.config.best_sellers_limit);
        Ok(ranked)
    }

    /// Campaigns ranked by attributed revenue.
    ///
    /// Organic sales are left out. Scope follows `DashboardConfig::campaign_scope`;
    /// ties keep ascending campaign id order.
    pub fn campaign_performance(
        &self,
        sales: &[SaleRecord],
        campaigns: &NameLookup,
        now: DateTime<Utc>,
    ) -> AggregationResult<Vec<CampaignPerformance>> {
        let mut grouped: BTreeMap<i32, (Decimal, i64)> = BTreeMap::new();

        for sale in sales {
            if self.config.campaign_scope == CampaignScope::Window && !self.in_window(sale, now) {
                continue;
            }
            let Some(campaign_id) = campaign_ref(sale) else {
                continue;
            };
            let item = LineItem::from_sale(sale)?;
            let (revenue, units) = grouped.entry(campaign_id).or_default();
            item.add_to(revenue, units)?;
        }

        let mut ranked: Vec<CampaignPerformance> = grouped
            .into_iter()
            .map(|(campaign_id, (total_revenue, total_units))| CampaignPerformance {
                campaign_id,
                campaign_name: resolve_campaign_name(campaigns, campaign_id),
                total_units,
                total_revenue,
            })
            .collect();

        ranked.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        Ok(ranked)
    }

    /// Window totals, rankings and the monthly revenue chart, rounded for display
    pub fn dashboard(
        &self,
        sales: &[SaleRecord],
        products: &NameLookup,
        campaigns: &NameLookup,
        now: DateTime<Utc>,
    ) -> AggregationResult<DashboardView> {
        let summaries = self.aggregate(sales, products, campaigns)?;
        let window_start = self.window_start(now);

        let mut total_revenue = Decimal::ZERO;
        let mut total_units = 0i64;
        for sale in sales.iter().filter(|s| self.in_window(s, now)) {
            LineItem::from_sale(sale)?.add_to(&mut total_revenue, &mut total_units)?;
        }

        let months = self.month_key(&window_start)..=self.month_key(&now);
        let mut revenue_series = RevenueSeries::default();
        for summary in summaries.iter().filter(|s| months.contains(&s.key())) {
            revenue_series.labels.push(summary.key().to_string());
            revenue_series
                .revenue
                .push(round_money(summary.total_revenue));
        }

        let best_sellers = self
            .best_sellers(sales, products, now)?
            .into_iter()
            .map(|mut seller| {
                seller.total_revenue = round_money(seller.total_revenue);
                seller
            })
            .collect();

        let campaign_performance = self
            .campaign_performance(sales, campaigns, now)?
            .into_iter()
            .map(|mut campaign| {
                campaign.total_revenue = round_money(campaign.total_revenue);
                campaign
            })
            .collect();

        Ok(DashboardView {
            window_start,
            window_end: now,
            total_revenue: round_money(total_revenue),
            total_units,
            best_sellers,
            campaign_performance,
            revenue_series,
        })
    }

    /// Join each sale with its product and campaign names
    pub fn sales_with_details(
        &self,
        sales: &[SaleRecord],
        products: &NameLookup,
        campaigns: &NameLookup,
    ) -> Vec<SaleWithDetails> {
        sales
            .iter()
            .map(|sale| SaleWithDetails {
                id: sale.id,
                product_id: sale.product_id,
                campaign_id: sale.campaign_id,
                quantity: sale.quantity,
                unit_price: sale.unit_price,
                sale_date: sale.sale_date,
                product_name: match sale.product_id {
                    Some(product_id) => resolve_product_name(products, product_id),
                    None => UNKNOWN_PRODUCT_NAME.to_string(),
                },
                campaign_name: campaign_ref(sale).map(|id| resolve_campaign_name(campaigns, id)),
            })
            .collect()
    }
}
