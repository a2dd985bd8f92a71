use crate::Config;
use crate::database::entities::{CampaignRecord, ProductRecord, ProductStatus, SaleRecord};
use crate::database::{DatabaseManager, DatabaseManagerImpl, DatabaseResult};
use chrono::{DateTime, Duration, TimeZone, Utc};
use clap::Args;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    #[arg(long, help = "Number of random sales to insert", default_value = "1000")]
    pub sales: usize,
    #[arg(
        long,
        help = "Spread sale dates over this many past days",
        default_value = "180"
    )]
    pub days_back: u32,
    #[arg(
        long,
        help = "Probability that a sale is attributed to a campaign",
        default_value = "0.8"
    )]
    pub campaign_ratio: f64,
    #[arg(long, help = "Random seed for reproducible data")]
    pub seed: Option<u64>,
}

impl Default for SeedArgs {
    fn default() -> Self {
        Self {
            sales: 1000,
            days_back: 180,
            campaign_ratio: 0.8,
            seed: None,
        }
    }
}

/// Rows written by a seeding run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub products: usize,
    pub campaigns: usize,
    pub sales: usize,
}

// (name, image, list price in cents, stock)
const DEMO_PRODUCTS: [(&str, &str, i64, i32); 10] = [
    ("Smartphone X Pro", "/images/smartphone.webp", 99900, 150),
    ("Wireless Earbuds Ultra", "/images/earbuds.webp", 19900, 300),
    ("Smart Home Hub", "/images/home.webp", 14900, 200),
    ("4K Ultra HD Smart TV", "/images/tv.webp", 79900, 50),
    ("Gaming Laptop Pro", "/images/laptop.webp", 129900, 75),
    ("VR Headset Plus", "/images/headset.webp", 34900, 120),
    ("Smartwatch Elite", "/images/watch.webp", 24900, 250),
    ("Bluetooth Speaker Max", "/images/speaker.webp", 9900, 400),
    ("Portable Charger Super", "/images/charger.webp", 5900, 500),
    ("Smart Thermostat Pro", "/images/thermostat.webp", 19900, 175),
];

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn demo_campaigns() -> Vec<CampaignRecord> {
    vec![
        CampaignRecord {
            id: 0,
            name: "Summer Sale".to_string(),
            start_date: date(2024, 6, 1),
            end_date: Some(date(2024, 8, 31)),
            budget: Decimal::new(10000, 0),
            description: Some("Annual summer promotional campaign".to_string()),
        },
        CampaignRecord {
            id: 0,
            name: "Back to School".to_string(),
            start_date: date(2024, 8, 15),
            end_date: Some(date(2024, 9, 15)),
            budget: Decimal::new(5000, 0),
            description: Some("Targeting students and parents for school supplies".to_string()),
        },
        CampaignRecord {
            id: 0,
            name: "Holiday Special".to_string(),
            start_date: date(2023, 11, 15),
            end_date: Some(date(2023, 12, 31)),
            budget: Decimal::new(15000, 0),
            description: Some("End-of-year holiday promotion".to_string()),
        },
    ]
}

/// Insert demo products and campaigns into empty tables, then random sales
pub async fn seed_database(
    database: &dyn DatabaseManager,
    args: &SeedArgs,
    now: DateTime<Utc>,
) -> DatabaseResult<SeedSummary> {
    let mut summary = SeedSummary::default();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let products_dao = database.products();
    if products_dao.count().await? == 0 {
        for (name, image_url, cents, stock) in DEMO_PRODUCTS {
            products_dao
                .store(&ProductRecord {
                    id: 0,
                    image_url: image_url.to_string(),
                    name: name.to_string(),
                    status: ProductStatus::Active,
                    price: Decimal::new(cents, 2),
                    stock,
                    available_at: now,
                })
                .await?;
            summary.products += 1;
        }
    }

    let campaigns_dao = database.campaigns();
    if campaigns_dao.count().await? == 0 {
        for campaign in demo_campaigns() {
            campaigns_dao.store(&campaign).await?;
            summary.campaigns += 1;
        }
    }

    let products = products_dao.find_all().await?;
    let campaigns = campaigns_dao.find_all().await?;
    if products.is_empty() {
        return Ok(summary);
    }

    let campaign_ratio = args.campaign_ratio.clamp(0.0, 1.0);
    let records: Vec<SaleRecord> = (0..args.sales)
        .map(|_| {
            let product = &products[rng.random_range(0..products.len())];
            let days_ago = if args.days_back == 0 {
                0
            } else {
                rng.random_range(0..args.days_back)
            };
            let campaign_id = if !campaigns.is_empty() && rng.random_bool(campaign_ratio) {
                Some(campaigns[rng.random_range(0..campaigns.len())].id)
            } else {
                None
            };

            SaleRecord {
                id: Uuid::new_v4(),
                product_id: Some(product.id),
                campaign_id,
                quantity: rng.random_range(1..=5),
                unit_price: product.price,
                sale_date: now - Duration::days(i64::from(days_ago)),
            }
        })
        .collect();

    summary.sales = database.sales().store_records(&records).await?;
    Ok(summary)
}

pub async fn handle_seed_command(
    args: SeedArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let db_manager = DatabaseManagerImpl::new_from_config(config).await?;
    db_manager.migrate().await?;

    let summary = seed_database(&db_manager, &args, Utc::now()).await?;
    info!(
        "Seeded {} products, {} campaigns and {} sales",
        summary.products, summary.campaigns, summary.sales
    );

    Ok(())
}
