// Store and per-store menu endpoints
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::NO_QUERY;

pub struct ProductsApi {
    client: ApiClient,
}

impl ProductsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn stores(&self) -> Result<Vec<Store>> {
        self.client.get("/api/v1/stores", NO_QUERY).await
    }

    pub async fn menu_items(&self, store_id: &str) -> Result<Vec<Product>> {
        let url = format!("/api/v1/menu-items/{}", urlencoding::encode(store_id));
        self.client.get(&url, NO_QUERY).await
    }

    pub async fn menu_categories(&self, store_id: &str) -> Result<Vec<MenuCategory>> {
        let url = format!("/api/v1/menu-categories/{}", urlencoding::encode(store_id));
        self.client.get(&url, NO_QUERY).await
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    #[serde(alias = "phoneNumber")]
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuCategory {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub store_id: Option<String>,
    pub menu_category_id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_available")]
    pub is_available: bool,
    pub image_url: Option<String>,
}

fn default_available() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_availability_defaults_true() {
        let json = r#"{"id":"p1","name":"Jollof Rice","price":2500,"menuCategoryId":"c1"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert!(product.is_available);
        assert_eq!(product.menu_category_id.as_deref(), Some("c1"));
        assert!(product.store_id.is_none());
    }

    #[test]
    fn test_store_phone_alias() {
        let json = r#"{"_id":"s1","name":"HealthPlus Ikeja","category":"PHARMACY","phoneNumber":"0800"}"#;
        let store: Store = serde_json::from_str(json).unwrap();
        assert_eq!(store.id, "s1");
        assert_eq!(store.phone.as_deref(), Some("0800"));
    }
}
