// Console data layer - everything between the API bindings and the screen
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod ledger;
pub mod listing;
pub mod location;
pub mod orders;
pub mod stats;

pub use catalog::{aggregate_products, AggregationOptions, CatalogProduct, CatalogReport, CatalogSource};
pub use config::Config;
pub use dashboard::{DashboardSnapshot, PayoutOverview};
pub use error::Error;
pub use ledger::{sign_for_category, Sign};
pub use listing::{ListQuery, Page, PageRequest, SortDirection};
pub use location::{matches_location_filter, LocationContext, LocationOption};
pub use orders::{current_status, latest_status, OrderStatus};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
