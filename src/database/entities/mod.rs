pub mod campaigns;
pub mod products;
pub mod sales;

pub use campaigns::Entity as Campaigns;
pub use products::{Entity as Products, ProductStatus};
pub use sales::Entity as Sales;

// Type aliases
pub type ProductRecord = products::Model;
pub type CampaignRecord = campaigns::Model;
pub type SaleRecord = sales::Model;
