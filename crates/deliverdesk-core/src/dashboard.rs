// Loaders that fan out independent requests for one screen
use chrono::{DateTime, Utc};
use deliverdesk_api::admin::{RiderListParams, VendorListParams};
use deliverdesk_api::wallet::PayoutListParams;
use deliverdesk_api::{AdminApi, DashboardStats, Paginated, Payout, Rider, Vendor, WalletApi};
use tracing::{debug, warn};

use crate::stats::PayoutStats;
use crate::{Error, Result};

/// Dashboard sections, each loaded on its own
///
/// A failing section doesn't take the others down with it.
#[derive(Debug)]
pub struct DashboardSnapshot {
    pub stats: Result<DashboardStats>,
    pub vendors: Result<Paginated<Vendor>>,
    pub riders: Result<Paginated<Rider>>,
}

impl DashboardSnapshot {
    /// Fire all three requests at once; completion order doesn't matter
    pub async fn load(admin: &AdminApi, recent: u32) -> Self {
        let vendor_params = VendorListParams {
            page: Some(1),
            limit: Some(recent),
            ..Default::default()
        };
        let rider_params = RiderListParams {
            page: Some(1),
            limit: Some(recent),
            ..Default::default()
        };

        let (stats, vendors, riders) = futures::join!(
            admin.dashboard_stats(),
            admin.vendor_list(&vendor_params),
            admin.get_all_riders(&rider_params),
        );

        let snapshot = Self {
            stats: stats.map_err(Error::from),
            vendors: vendors.map_err(Error::from),
            riders: riders.map_err(Error::from),
        };

        for (section, err) in snapshot.failed_sections() {
            warn!("Dashboard section '{}' failed: {}", section, err);
        }

        snapshot
    }

    pub fn failed_sections(&self) -> Vec<(&'static str, &Error)> {
        let mut failed = Vec::new();
        if let Err(e) = &self.stats {
            failed.push(("stats", e));
        }
        if let Err(e) = &self.vendors {
            failed.push(("vendors", e));
        }
        if let Err(e) = &self.riders {
            failed.push(("riders", e));
        }
        failed
    }
}

/// Payout table plus the pending/completed totals
///
/// The table comes from the paginated endpoint and the totals from the
/// unpaginated one. Both requests go out together and `fetched_at` marks
/// when; if payouts change in between the two can disagree, and the totals
/// are the ones to trust for money figures.
#[derive(Debug)]
pub struct PayoutOverview {
    pub page: Paginated<Payout>,
    pub stats: PayoutStats,
    pub fetched_at: DateTime<Utc>,
}

impl PayoutOverview {
    pub async fn load(wallet: &WalletApi, params: &PayoutListParams) -> Result<Self> {
        let fetched_at = Utc::now();
        let (page, all) = futures::try_join!(wallet.payouts(params), wallet.all_payouts())?;

        debug!("Loaded {} payouts for totals, {} on page", all.len(), page.items.len());

        Ok(Self {
            page,
            stats: PayoutStats::from_payouts(&all),
            fetched_at,
        })
    }
}
