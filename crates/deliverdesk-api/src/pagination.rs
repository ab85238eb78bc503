use serde::{Deserialize, Serialize};

/// One page of a server-paginated listing
///
/// Different backend resources name their list field differently, hence
/// the pile of aliases on `items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    #[serde(
        default = "Vec::new",
        alias = "docs",
        alias = "results",
        alias = "rows",
        alias = "vendors",
        alias = "riders",
        alias = "orders",
        alias = "users",
        alias = "transactions",
        alias = "payouts",
        alias = "doctors",
        alias = "appointments"
    )]
    pub items: Vec<T>,
    #[serde(default, alias = "totalItems", alias = "totalDocs", alias = "count")]
    pub total: u64,
    #[serde(default, alias = "currentPage")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

impl<T> Paginated<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 0,
            limit: 0,
            total_pages: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        id: String,
    }

    #[test]
    fn test_resource_named_list_field() {
        let json = r#"{"vendors":[{"id":"v1"},{"id":"v2"}],"totalItems":42,"currentPage":2,"limit":2,"totalPages":21}"#;
        let page: Paginated<Row> = serde_json::from_str(json).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].id, "v2");
        assert_eq!(page.total, 42);
        assert_eq!(page.page, 2);
        assert!(page.has_next_page());
    }

    #[test]
    fn test_missing_fields_default() {
        let page: Paginated<Row> = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
        assert!(!page.has_next_page());
    }
}
