// Order status derivation - the one resolver every listing uses
use deliverdesk_api::{Order, OrderTracking};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ORDER_STATUS: &str = "PENDING";

/// Order lifecycle states the console knows how to display
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    ReadyForPickup,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
    Rejected,
    /// Anything the backend sends that we don't have a name for
    Other(String),
}

impl OrderStatus {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "PENDING" => OrderStatus::Pending,
            "ACCEPTED" | "CONFIRMED" => OrderStatus::Accepted,
            "PREPARING" | "PROCESSING" => OrderStatus::Preparing,
            "READY_FOR_PICKUP" | "READY" => OrderStatus::ReadyForPickup,
            "PICKED_UP" => OrderStatus::PickedUp,
            "IN_TRANSIT" | "ON_THE_WAY" => OrderStatus::InTransit,
            "DELIVERED" | "COMPLETED" => OrderStatus::Delivered,
            "CANCELLED" | "CANCELED" => OrderStatus::Cancelled,
            "REJECTED" => OrderStatus::Rejected,
            _ => OrderStatus::Other(normalized),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::ReadyForPickup => "Ready for pickup",
            OrderStatus::PickedUp => "Picked up",
            OrderStatus::InTransit => "In transit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Other(raw) => raw,
        }
    }

    /// Nothing more will happen to the order
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }

    /// Still needs a rider
    pub fn awaits_rider(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Accepted | OrderStatus::Preparing | OrderStatus::ReadyForPickup
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw status string of the most recent tracking entry
///
/// Entry order in the slice doesn't matter; the greatest `created_at` wins and
/// the earliest such entry in the slice wins a tie. Entries without a
/// timestamp sort before every timestamped one. Falls back from `status` to
/// `orderStatus` to `PENDING`.
pub fn latest_status(tracking: &[OrderTracking]) -> &str {
    let mut latest: Option<&OrderTracking> = None;

    for entry in tracking {
        match latest {
            Some(current) if entry.created_at <= current.created_at => {}
            _ => latest = Some(entry),
        }
    }

    latest
        .and_then(|entry| {
            let non_blank = |s: &&str| !s.trim().is_empty();
            entry
                .status
                .as_deref()
                .filter(non_blank)
                .or_else(|| entry.order_status.as_deref().filter(non_blank))
        })
        .unwrap_or(DEFAULT_ORDER_STATUS)
}

/// Current status of an order, derived from its tracking history
pub fn current_status(order: &Order) -> OrderStatus {
    OrderStatus::parse(latest_status(&order.order_tracking))
}
