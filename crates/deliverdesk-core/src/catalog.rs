// Cross-store product listing
//
// The backend only serves menus per store, so the "all products" view is
// stitched together here: walk the stores one at a time, pull categories
// then products, and keep going when a store misbehaves.
use async_trait::async_trait;
use deliverdesk_api::{MenuCategory, Product, ProductsApi, Store};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::{Error, Result};

pub const DEFAULT_STORE_LIMIT: usize = 20;
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Where stores, categories and products come from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn stores(&self) -> Result<Vec<Store>>;
    async fn categories(&self, store_id: &str) -> Result<Vec<MenuCategory>>;
    async fn products(&self, store_id: &str) -> Result<Vec<Product>>;
}

#[async_trait]
impl CatalogSource for ProductsApi {
    async fn stores(&self) -> Result<Vec<Store>> {
        ProductsApi::stores(self)
            .await
            .map_err(|e| Error::ApiError(e.to_string()))
    }

    async fn categories(&self, store_id: &str) -> Result<Vec<MenuCategory>> {
        self.menu_categories(store_id)
            .await
            .map_err(|e| Error::ApiError(e.to_string()))
    }

    async fn products(&self, store_id: &str) -> Result<Vec<Product>> {
        self.menu_items(store_id)
            .await
            .map_err(|e| Error::ApiError(e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    /// Only the first `store_limit` stores are walked; `None` walks all
    pub store_limit: Option<usize>,
}

impl AggregationOptions {
    /// Build from the config value, where 0 means no limit
    pub fn from_limit(limit: usize) -> Self {
        Self {
            store_limit: (limit > 0).then_some(limit),
        }
    }
}

impl Default for AggregationOptions {
    fn default() -> Self {
        Self {
            store_limit: Some(DEFAULT_STORE_LIMIT),
        }
    }
}

/// Store fields copied onto each product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<&Store> for StoreSummary {
    fn from(store: &Store) -> Self {
        Self {
            id: store.id.clone(),
            name: store.name.clone(),
            category: store.category.clone(),
            phone: store.phone.clone(),
            address: store.address.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogProduct {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: String,
    pub store: StoreSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchStage {
    Categories,
    Products,
}

impl std::fmt::Display for FetchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStage::Categories => write!(f, "categories"),
            FetchStage::Products => write!(f, "products"),
        }
    }
}

/// A store that didn't fully make it into the listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreFailure {
    pub store_id: String,
    pub store_name: String,
    pub stage: FetchStage,
    pub reason: String,
}

/// Products plus everything needed to tell a partial listing from a full one
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogReport {
    pub products: Vec<CatalogProduct>,
    pub failures: Vec<StoreFailure>,
    /// Stores the backend returned
    pub stores_total: usize,
    /// Stores actually walked after the limit
    pub stores_scanned: usize,
}

impl CatalogReport {
    pub fn stores_skipped(&self) -> usize {
        self.stores_total - self.stores_scanned
    }

    /// No failures and no stores cut by the limit
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.stores_skipped() == 0
    }

    /// Stores whose products are missing entirely
    pub fn missing_stores(&self) -> impl Iterator<Item = &StoreFailure> {
        self.failures
            .iter()
            .filter(|f| f.stage == FetchStage::Products)
    }
}

/// Build the flattened product list across stores
///
/// Only a failure to list the stores themselves is returned as `Err`.
/// Category failures leave that store's products under "Unknown"; product
/// failures drop the store. Both are recorded in the report.
pub async fn aggregate_products<S>(source: &S, options: AggregationOptions) -> Result<CatalogReport>
where
    S: CatalogSource + ?Sized,
{
    let stores = source.stores().await?;
    let stores_total = stores.len();
    let scan = options.store_limit.unwrap_or(stores_total).min(stores_total);

    if scan < stores_total {
        info!(
            "Product listing limited to the first {} of {} stores",
            scan, stores_total
        );
    }

    let mut report = CatalogReport {
        stores_total,
        stores_scanned: scan,
        ..Default::default()
    };

    for store in stores.iter().take(scan) {
        let categories = match source.categories(&store.id).await {
            Ok(categories) => categories
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect::<HashMap<_, _>>(),
            Err(e) => {
                warn!("Failed to fetch categories for store {}: {}", store.id, e);
                report.failures.push(StoreFailure {
                    store_id: store.id.clone(),
                    store_name: store.name.clone(),
                    stage: FetchStage::Categories,
                    reason: e.to_string(),
                });
                HashMap::new()
            }
        };

        let products = match source.products(&store.id).await {
            Ok(products) => products,
            Err(e) => {
                warn!("Failed to fetch products for store {}: {}", store.id, e);
                report.failures.push(StoreFailure {
                    store_id: store.id.clone(),
                    store_name: store.name.clone(),
                    stage: FetchStage::Products,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        debug!("Store {} contributed {} products", store.id, products.len());

        let summary = StoreSummary::from(store);
        report.products.extend(products.into_iter().map(|product| {
            let category_name = resolve_category(&categories, product.menu_category_id.as_deref());
            CatalogProduct {
                product,
                category_name,
                store: summary.clone(),
            }
        }));
    }

    Ok(report)
}

fn resolve_category(categories: &HashMap<String, String>, id: Option<&str>) -> String {
    id.and_then(|id| categories.get(id))
        .cloned()
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
}
