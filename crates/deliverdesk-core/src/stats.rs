// Derived numbers for dashboard cards and listing headers
use deliverdesk_api::{Consultation, ConsultationStatus, ConsultationType, Order, Payout, PayoutStatus, Transaction, Vendor};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::ledger::{transaction_sign, Sign};
use crate::location::LocationContext;
use crate::orders::{current_status, OrderStatus};

/// `part` as a percentage of `whole`, 0 when there's nothing to divide by
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VendorStats {
    pub total: usize,
    pub verified: usize,
    pub unverified: usize,
    pub verified_percent: f64,
    pub wallet_total: f64,
}

impl VendorStats {
    pub fn from_vendors(vendors: &[Vendor]) -> Self {
        Self::tally(vendors.iter())
    }

    /// Only vendors whose address matches the selected location
    pub fn in_location(vendors: &[Vendor], location: &LocationContext) -> Self {
        Self::tally(vendors.iter().filter(|v| location.matches(v.address.as_deref())))
    }

    fn tally<'a>(vendors: impl Iterator<Item = &'a Vendor>) -> Self {
        let mut stats = Self::default();
        for vendor in vendors {
            stats.total += 1;
            if vendor.is_verified {
                stats.verified += 1;
            }
            stats.wallet_total += vendor.wallet_balance;
        }
        stats.unverified = stats.total - stats.verified;
        stats.verified_percent = percentage(stats.verified, stats.total);
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderStatusCounts {
    pub total: usize,
    pub by_status: BTreeMap<OrderStatus, usize>,
    /// Sum of amounts for delivered orders
    pub delivered_value: f64,
}

impl OrderStatusCounts {
    pub fn from_orders(orders: &[Order]) -> Self {
        let mut counts = Self {
            total: orders.len(),
            ..Default::default()
        };

        for order in orders {
            let status = current_status(order);
            if status == OrderStatus::Delivered {
                counts.delivered_value += order.amount;
            }
            *counts.by_status.entry(status).or_insert(0) += 1;
        }

        counts
    }

    pub fn count(&self, status: &OrderStatus) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }

    /// Orders that haven't reached a terminal state
    pub fn active(&self) -> usize {
        self.by_status
            .iter()
            .filter(|(status, _)| !status.is_terminal())
            .map(|(_, n)| n)
            .sum()
    }

    pub fn percent(&self, status: &OrderStatus) -> f64 {
        percentage(self.count(status), self.total)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayoutStats {
    pub pending_count: usize,
    pub pending_total: f64,
    pub completed_count: usize,
    pub completed_total: f64,
    pub failed_count: usize,
}

impl PayoutStats {
    /// Processing payouts are counted with pending ones; money hasn't landed yet
    pub fn from_payouts(payouts: &[Payout]) -> Self {
        let mut stats = Self::default();

        for payout in payouts {
            match payout.status {
                PayoutStatus::Pending | PayoutStatus::Processing => {
                    stats.pending_count += 1;
                    stats.pending_total += payout.amount;
                }
                PayoutStatus::Completed => {
                    stats.completed_count += 1;
                    stats.completed_total += payout.amount;
                }
                PayoutStatus::Failed | PayoutStatus::Rejected => stats.failed_count += 1,
                PayoutStatus::Other => {}
            }
        }

        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionTotals {
    pub credits: f64,
    pub debits: f64,
    pub credit_count: usize,
    pub debit_count: usize,
}

impl TransactionTotals {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut totals = Self::default();

        for tx in transactions {
            match transaction_sign(tx) {
                Sign::Credit => {
                    totals.credits += tx.amount.abs();
                    totals.credit_count += 1;
                }
                Sign::Debit => {
                    totals.debits += tx.amount.abs();
                    totals.debit_count += 1;
                }
            }
        }

        totals
    }

    pub fn net(&self) -> f64 {
        self.credits - self.debits
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsultationStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    /// Fees from completed consultations only
    pub completed_fees: f64,
}

impl ConsultationStats {
    pub fn from_consultations(consultations: &[Consultation]) -> Self {
        let mut stats = Self {
            total: consultations.len(),
            ..Default::default()
        };

        for c in consultations {
            *stats.by_status.entry(c.status.to_string()).or_insert(0) += 1;
            *stats.by_type.entry(c.consultation_type.to_string()).or_insert(0) += 1;
            if c.status == ConsultationStatus::Completed {
                stats.completed_fees += c.fee;
            }
        }

        stats
    }

    pub fn status_count(&self, status: ConsultationStatus) -> usize {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }

    pub fn type_count(&self, kind: ConsultationType) -> usize {
        self.by_type.get(kind.as_str()).copied().unwrap_or(0)
    }

    pub fn open(&self) -> usize {
        ConsultationStatus::all()
            .into_iter()
            .filter(ConsultationStatus::is_open)
            .map(|s| self.status_count(s))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json<T: serde::de::DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_percentage_handles_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
        assert!((percentage(1, 3) - 33.333).abs() < 0.001);
    }

    #[test]
    fn test_vendor_stats() {
        let vendors: Vec<Vendor> = from_json(
            r#"[
                {"id":"1","isVerified":true,"walletBalance":1000},
                {"id":"2","isVerified":false,"walletBalance":250.5},
                {"id":"3","isVerified":true},
                {"id":"4"}
            ]"#,
        );
        let stats = VendorStats::from_vendors(&vendors);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.verified, 2);
        assert_eq!(stats.unverified, 2);
        assert_eq!(stats.verified_percent, 50.0);
        assert_eq!(stats.wallet_total, 1250.5);
    }

    #[test]
    fn test_vendor_stats_follow_selected_location() {
        let vendors: Vec<Vendor> = from_json(
            r#"[
                {"id":"1","isVerified":true,"address":"12 Allen Ave, Ikeja, Lagos","walletBalance":100},
                {"id":"2","isVerified":false,"address":"Wuse II, Abuja","walletBalance":40},
                {"id":"3","isVerified":true,"address":"Lekki Phase 1, LAGOS"},
                {"id":"4","isVerified":true}
            ]"#,
        );
        let location = LocationContext::default();

        let everywhere = VendorStats::in_location(&vendors, &location);
        assert_eq!(everywhere, VendorStats::from_vendors(&vendors));

        location.set_selected("lagos");
        let lagos = VendorStats::in_location(&vendors, &location);
        assert_eq!(lagos.total, 2);
        assert_eq!(lagos.verified, 2);
        assert_eq!(lagos.verified_percent, 100.0);
        assert_eq!(lagos.wallet_total, 100.0);

        location.set_selected("abuja");
        let abuja = VendorStats::in_location(&vendors, &location);
        assert_eq!(abuja.total, 1);
        assert_eq!(abuja.verified, 0);
        assert_eq!(abuja.unverified, 1);
    }

    #[test]
    fn test_order_counts_use_latest_status() {
        let orders: Vec<Order> = from_json(
            r#"[
                {"id":"1","amount":3000,"orderTracking":[
                    {"status":"DELIVERED","createdAt":"2024-01-01T12:00:00Z"},
                    {"status":"PENDING","createdAt":"2024-01-01T10:00:00Z"}
                ]},
                {"id":"2","amount":1000,"orderTracking":[]},
                {"id":"3","amount":500,"orderTracking":[
                    {"orderStatus":"CANCELLED","createdAt":"2024-01-02T09:00:00Z"}
                ]},
                {"id":"4","amount":2000,"orderTracking":[
                    {"status":"IN_TRANSIT","createdAt":"2024-01-02T09:00:00Z"}
                ]}
            ]"#,
        );
        let counts = OrderStatusCounts::from_orders(&orders);

        assert_eq!(counts.total, 4);
        assert_eq!(counts.count(&OrderStatus::Delivered), 1);
        assert_eq!(counts.count(&OrderStatus::Pending), 1);
        assert_eq!(counts.count(&OrderStatus::Cancelled), 1);
        assert_eq!(counts.active(), 2);
        assert_eq!(counts.delivered_value, 3000.0);
        assert_eq!(counts.percent(&OrderStatus::InTransit), 25.0);
    }

    #[test]
    fn test_payout_stats() {
        let payouts: Vec<Payout> = from_json(
            r#"[
                {"id":"1","amount":5000,"status":"PENDING"},
                {"id":"2","amount":1500,"status":"PROCESSING"},
                {"id":"3","amount":20000,"status":"COMPLETED"},
                {"id":"4","amount":700,"status":"FAILED"},
                {"id":"5","amount":999,"status":"SOMETHING_ELSE"}
            ]"#,
        );
        let stats = PayoutStats::from_payouts(&payouts);

        assert_eq!(stats.pending_count, 2);
        assert_eq!(stats.pending_total, 6500.0);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.completed_total, 20000.0);
        assert_eq!(stats.failed_count, 1);
    }

    #[test]
    fn test_transaction_totals() {
        let txs: Vec<Transaction> = from_json(
            r#"[
                {"id":"1","category":"WALLET_FUNDING","amount":10000},
                {"id":"2","category":"ORDER_PAYMENT","amount":3500},
                {"id":"3","category":"REFUND","amount":500},
                {"id":"4","category":"BRAND_NEW_THING","amount":100}
            ]"#,
        );
        let totals = TransactionTotals::from_transactions(&txs);

        assert_eq!(totals.credits, 10500.0);
        assert_eq!(totals.debits, 3600.0);
        assert_eq!(totals.credit_count, 2);
        assert_eq!(totals.debit_count, 2);
        assert_eq!(totals.net(), 6900.0);
    }

    #[test]
    fn test_consultation_stats() {
        let consultations: Vec<Consultation> = from_json(
            r#"[
                {"id":"1","status":"COMPLETED","type":"VIDEO","fee":5000},
                {"id":"2","status":"COMPLETED","type":"CHAT","fee":2000},
                {"id":"3","status":"BOOKED","type":"VIDEO","fee":5000},
                {"id":"4","status":"CANCELLED","type":"AUDIO","fee":3000}
            ]"#,
        );
        let stats = ConsultationStats::from_consultations(&consultations);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.status_count(ConsultationStatus::Completed), 2);
        assert_eq!(stats.type_count(ConsultationType::Video), 2);
        assert_eq!(stats.completed_fees, 7000.0);
        assert_eq!(stats.open(), 1);
    }
}
