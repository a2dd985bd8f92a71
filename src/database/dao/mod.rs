pub mod campaigns;
pub mod products;
pub mod sales;

pub use campaigns::CampaignsDao;
pub use products::{ProductPage, ProductsDao};
pub use sales::{SalesDao, SalesQuery};
