// Client-side filter -> sort -> paginate, shared by every listing
use serde::Serialize;
use std::cmp::Ordering;

type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;
type Comparator<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + 'a>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// `(page, limit)` for server-paginated endpoints
    ///
    /// Same clamping as [`paginate`]: zero becomes 1. Values past `u32::MAX`
    /// saturate instead of wrapping.
    pub fn query_params(&self) -> (u32, u32) {
        let clamp = |value: usize| u32::try_from(value.max(1)).unwrap_or(u32::MAX);
        (clamp(self.page), clamp(self.per_page))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// 1-based index of the first row on this page, 0 when empty
    pub fn first_row(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }
}

/// A chain of predicates plus an optional ordering and a page request
///
/// ```
/// use deliverdesk_core::listing::{ListQuery, PageRequest, SortDirection};
///
/// let page = ListQuery::new()
///     .filter(|n: &i32| n % 2 == 0)
///     .sort_by(|a, b| a.cmp(b), SortDirection::Descending)
///     .page(PageRequest::new(1, 2))
///     .apply(vec![1, 2, 3, 4, 5, 6]);
///
/// assert_eq!(page.items, vec![6, 4]);
/// assert_eq!(page.total_items, 3);
/// ```
pub struct ListQuery<'a, T> {
    predicates: Vec<Predicate<'a, T>>,
    comparator: Option<(Comparator<'a, T>, SortDirection)>,
    page: Option<PageRequest>,
}

impl<'a, T> ListQuery<'a, T> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
            comparator: None,
            page: None,
        }
    }

    /// Add a predicate; an item must pass all of them
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'a,
    {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Add a predicate only when `enabled`; handy for optional UI filters
    pub fn filter_if<F>(self, enabled: bool, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'a,
    {
        if enabled {
            self.filter(predicate)
        } else {
            self
        }
    }

    pub fn sort_by<F>(mut self, comparator: F, direction: SortDirection) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'a,
    {
        self.comparator = Some((Box::new(comparator), direction));
        self
    }

    /// Sort on a key; `partial_cmp` failures (NaN) compare equal
    pub fn sort_by_key<K, F>(self, key: F, direction: SortDirection) -> Self
    where
        K: PartialOrd,
        F: Fn(&T) -> K + 'a,
    {
        self.sort_by(
            move |a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal),
            direction,
        )
    }

    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    pub fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|p| p(item))
    }

    /// Filter, stable-sort, then slice
    pub fn apply(&self, items: Vec<T>) -> Page<T> {
        let mut filtered: Vec<T> = items.into_iter().filter(|item| self.matches(item)).collect();

        if let Some((comparator, direction)) = &self.comparator {
            match direction {
                SortDirection::Ascending => filtered.sort_by(|a, b| comparator(a, b)),
                SortDirection::Descending => filtered.sort_by(|a, b| comparator(b, a)),
            }
        }

        match self.page {
            Some(request) => paginate(filtered, request),
            None => {
                let total = filtered.len();
                Page {
                    items: filtered,
                    page: 1,
                    per_page: total,
                    total_items: total,
                    total_pages: if total == 0 { 0 } else { 1 },
                }
            }
        }
    }
}

impl<'a, T> Default for ListQuery<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Slice already-filtered items into one page
///
/// Page 0 is treated as page 1, a zero page size as one row per page, and a
/// page past the end comes back empty with the real totals.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let per_page = request.per_page.max(1);
    let page = request.page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let items = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

/// Case-insensitive substring test; a blank needle matches everything
pub fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    haystack
        .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        .unwrap_or(false)
}

/// Equality test that lets "all" (or blank) through
pub fn equals_unless_all(value: Option<&str>, wanted: &str) -> bool {
    let wanted = wanted.trim();
    if wanted.is_empty() || wanted.eq_ignore_ascii_case("all") {
        return true;
    }
    value.map(|v| v.eq_ignore_ascii_case(wanted)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_clamp_like_local_paging() {
        assert_eq!(PageRequest::new(3, 25).query_params(), (3, 25));
        assert_eq!(PageRequest::new(0, 0).query_params(), (1, 1));
        assert_eq!(PageRequest::new(usize::MAX, 20).query_params(), (u32::MAX, 20));
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        city: Option<&'static str>,
        amount: f64,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Bukka Hut", city: Some("Lagos"), amount: 1200.0 },
            Row { name: "Kilimanjaro", city: Some("Port Harcourt"), amount: 800.0 },
            Row { name: "Chicken Republic", city: Some("lagos"), amount: 4300.0 },
            Row { name: "Sweet Sensation", city: None, amount: 950.0 },
            Row { name: "Mr Biggs", city: Some("Abuja"), amount: 1200.0 },
        ]
    }

    #[test]
    fn test_predicates_are_anded() {
        let page = ListQuery::new()
            .filter(|r: &Row| equals_unless_all(r.city, "LAGOS"))
            .filter(|r: &Row| r.amount > 2000.0)
            .apply(rows());

        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].name, "Chicken Republic");
    }

    #[test]
    fn test_filter_if_skips_disabled_filters() {
        let search = "";
        let page = ListQuery::new()
            .filter_if(!search.is_empty(), move |r: &Row| contains_ignore_case(Some(r.name), search))
            .apply(rows());
        assert_eq!(page.total_items, 5);
    }

    #[test]
    fn test_sort_is_stable() {
        let page = ListQuery::new()
            .sort_by_key(|r: &Row| r.amount, SortDirection::Descending)
            .apply(rows());

        let names: Vec<_> = page.items.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["Chicken Republic", "Bukka Hut", "Mr Biggs", "Sweet Sensation", "Kilimanjaro"]
        );
    }

    #[test]
    fn test_pagination_bounds() {
        let page = paginate((1..=45).collect::<Vec<_>>(), PageRequest::new(3, 20));
        assert_eq!(page.items, (41..=45).collect::<Vec<_>>());
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.first_row(), 41);

        let past_end = paginate((1..=45).collect::<Vec<_>>(), PageRequest::new(9, 20));
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_items, 45);
        assert_eq!(past_end.first_row(), 0);

        let zeroes = paginate(vec!['a', 'b'], PageRequest::new(0, 0));
        assert_eq!(zeroes.page, 1);
        assert_eq!(zeroes.items, vec!['a']);
        assert_eq!(zeroes.total_pages, 2);
    }

    #[test]
    fn test_unpaged_query_returns_everything() {
        let page = ListQuery::<Row>::new().apply(Vec::new());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
    }

    #[test]
    fn test_helpers() {
        assert!(contains_ignore_case(Some("Chicken Republic"), "REPUB"));
        assert!(contains_ignore_case(None, " "));
        assert!(!contains_ignore_case(None, "x"));
        assert!(equals_unless_all(None, "all"));
        assert!(!equals_unless_all(None, "FOOD"));
        assert_eq!("desc".parse::<SortDirection>(), Ok(SortDirection::Descending));
    }
}
