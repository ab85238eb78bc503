// Shared city filter - one handle, many listings
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Selection value meaning "don't filter"
pub const ALL_LOCATIONS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOption {
    pub value: String,
    pub label: String,
}

impl LocationOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

/// Cities the console ships with
pub fn default_locations() -> Vec<LocationOption> {
    vec![
        LocationOption::new(ALL_LOCATIONS, "All Locations"),
        LocationOption::new("lagos", "Lagos"),
        LocationOption::new("abuja", "Abuja"),
        LocationOption::new("port harcourt", "Port Harcourt"),
        LocationOption::new("ibadan", "Ibadan"),
        LocationOption::new("kano", "Kano"),
        LocationOption::new("enugu", "Enugu"),
        LocationOption::new("benin", "Benin City"),
    ]
}

/// Does `address` pass the selected city filter?
///
/// Blank or "all" selections pass everything. Otherwise it's a plain
/// case-insensitive substring test, so a city whose name is contained in
/// another city's name will over-match.
pub fn matches_location_filter(address: Option<&str>, selected: &str) -> bool {
    let selected = selected.trim();
    if selected.is_empty() || selected.eq_ignore_ascii_case(ALL_LOCATIONS) {
        return true;
    }

    match address {
        Some(address) => address.to_lowercase().contains(&selected.to_lowercase()),
        None => false,
    }
}

/// Session-scoped holder for the selected location
///
/// Clones share the same selection. Views that want to react to changes
/// call [`LocationContext::subscribe`].
#[derive(Debug, Clone)]
pub struct LocationContext {
    selected: Arc<watch::Sender<String>>,
    options: Arc<Vec<LocationOption>>,
}

impl LocationContext {
    pub fn new(options: Vec<LocationOption>) -> Self {
        let (sender, _) = watch::channel(ALL_LOCATIONS.to_string());
        Self {
            selected: Arc::new(sender),
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &[LocationOption] {
        &self.options
    }

    pub fn selected(&self) -> String {
        self.selected.borrow().clone()
    }

    /// Change the selection; every subscriber sees the new value
    pub fn set_selected(&self, value: &str) {
        let value = value.trim().to_lowercase();
        let value = if value.is_empty() {
            ALL_LOCATIONS.to_string()
        } else {
            value
        };
        self.selected.send_replace(value);
    }

    pub fn reset(&self) {
        self.set_selected(ALL_LOCATIONS);
    }

    /// Label for the current selection, falling back to the raw value
    pub fn selected_label(&self) -> String {
        let selected = self.selected();
        self.options
            .iter()
            .find(|opt| opt.value.eq_ignore_ascii_case(&selected))
            .map(|opt| opt.label.clone())
            .unwrap_or(selected)
    }

    pub fn matches(&self, address: Option<&str>) -> bool {
        matches_location_filter(address, &self.selected.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.selected.subscribe()
    }
}

impl Default for LocationContext {
    fn default() -> Self {
        Self::new(default_locations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_always_matches() {
        assert!(matches_location_filter(Some("12 Allen Avenue, Ikeja"), "all"));
        assert!(matches_location_filter(None, "all"));
        assert!(matches_location_filter(None, "ALL"));
        assert!(matches_location_filter(None, ""));
    }

    #[test]
    fn test_missing_address_never_matches_a_city() {
        assert!(!matches_location_filter(None, "lagos"));
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        assert!(matches_location_filter(Some("123 Lagos Street"), "lagos"));
        assert!(matches_location_filter(Some("123 lagos street"), "LAGOS"));
        assert!(matches_location_filter(Some("Plot 4, Trans-Amadi, Port Harcourt"), "port harcourt"));
        assert!(!matches_location_filter(Some("Wuse 2, Abuja"), "lagos"));
    }

    #[test]
    fn test_substring_over_match_is_expected() {
        // "Benin" is a substring of "Benin City" and of "Republic of Benin"
        assert!(matches_location_filter(Some("Cotonou, Republic of Benin"), "benin"));
    }

    #[test]
    fn test_context_shared_between_clones() {
        let ctx = LocationContext::default();
        let other_view = ctx.clone();

        assert_eq!(ctx.selected(), "all");
        assert!(other_view.matches(None));

        ctx.set_selected("  Abuja ");
        assert_eq!(other_view.selected(), "abuja");
        assert_eq!(other_view.selected_label(), "Abuja");
        assert!(other_view.matches(Some("Garki, ABUJA")));
        assert!(!other_view.matches(Some("Yaba, Lagos")));

        ctx.reset();
        assert!(other_view.matches(Some("Yaba, Lagos")));
    }

    #[test]
    fn test_unknown_selection_label_falls_back() {
        let ctx = LocationContext::default();
        ctx.set_selected("Jos");
        assert_eq!(ctx.selected_label(), "jos");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let ctx = LocationContext::default();
        let mut rx = ctx.subscribe();

        ctx.set_selected("kano");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), "kano");
    }
}
