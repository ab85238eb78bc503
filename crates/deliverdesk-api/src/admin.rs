// Admin endpoints - vendors, riders, orders, users, dashboard numbers
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::pagination::Paginated;
use crate::NO_QUERY;

const ADMIN_BASE: &str = "/api/v1/admin";

pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Aggregate KPI numbers for the dashboard header
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.client
            .get(&format!("{}/dashboard-stats", ADMIN_BASE), NO_QUERY)
            .await
    }

    pub async fn vendor_list(&self, params: &VendorListParams) -> Result<Paginated<Vendor>> {
        self.client
            .get(&format!("{}/vendor-list", ADMIN_BASE), params)
            .await
    }

    /// Approve or reject a vendor's verification request
    pub async fn verify_vendor(&self, request: &VendorVerification) -> Result<Option<Vendor>> {
        self.client
            .post(&format!("{}/vendor-verification", ADMIN_BASE), request)
            .await
    }

    pub async fn update_user_role(&self, request: &UpdateUserRole) -> Result<Option<User>> {
        self.client
            .patch(&format!("{}/update-user-role", ADMIN_BASE), request)
            .await
    }

    pub async fn get_all_riders(&self, params: &RiderListParams) -> Result<Paginated<Rider>> {
        self.client
            .get(&format!("{}/get-all-riders", ADMIN_BASE), params)
            .await
    }

    pub async fn create_rider(&self, rider: &NewRider) -> Result<Rider> {
        self.client
            .post(&format!("{}/create-rider", ADMIN_BASE), rider)
            .await
    }

    pub async fn assign_rider_to_order(&self, assignment: &RiderAssignment) -> Result<Option<Order>> {
        self.client
            .post(&format!("{}/assign-rider-to-order", ADMIN_BASE), assignment)
            .await
    }

    pub async fn get_all_orders(&self, params: &OrderListParams) -> Result<Paginated<Order>> {
        self.client
            .get(&format!("{}/get-all-orders", ADMIN_BASE), params)
            .await
    }

    pub async fn get_all_users(&self, params: &UserListParams) -> Result<Paginated<User>> {
        self.client
            .get(&format!("{}/get-all-users", ADMIN_BASE), params)
            .await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_vendors: u64,
    #[serde(default)]
    pub total_riders: u64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub pending_verifications: u64,
    #[serde(default)]
    pub active_riders: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(alias = "_id")]
    pub id: String,
    pub business_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "phone")]
    pub phone_number: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    pub category: Option<String>,
    #[serde(default)]
    pub wallet_balance: f64,
    pub created_at: Option<DateTime<Utc>>,
}

impl Vendor {
    /// Business name if set, otherwise the contact's full name
    pub fn display_name(&self) -> String {
        if let Some(name) = self.business_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        join_names(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationAction {
    Approve,
    Reject,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorVerification {
    pub vendor_id: String,
    pub action: VerificationAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Customer,
    Vendor,
    Rider,
    Doctor,
    Admin,
    SuperAdmin,
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "customer" => Ok(UserRole::Customer),
            "vendor" => Ok(UserRole::Vendor),
            "rider" => Ok(UserRole::Rider),
            "doctor" => Ok(UserRole::Doctor),
            "admin" => Ok(UserRole::Admin),
            "super_admin" => Ok(UserRole::SuperAdmin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRole {
    pub user_id: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rider {
    #[serde(alias = "_id")]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "phone")]
    pub phone_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub is_available: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Rider {
    pub fn full_name(&self) -> String {
        join_names(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRider {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiderAssignment {
    pub order_id: String,
    pub rider_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    pub customer_id: Option<String>,
    pub vendor_id: Option<String>,
    pub rider_id: Option<String>,
    pub store_id: Option<String>,
    #[serde(default)]
    pub order_tracking: Vec<OrderTracking>,
    #[serde(default, alias = "totalAmount")]
    pub amount: f64,
    pub pickup_address: Option<String>,
    pub delivery_address: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// One entry in an order's status history
///
/// Older records carry the status under `orderStatus` instead of `status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTracking {
    pub status: Option<String>,
    pub order_status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

fn join_names(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
