// Wallet endpoints - transactions, payouts, manual adjustments, bank lookups
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;
use crate::pagination::Paginated;
use crate::NO_QUERY;

const WALLET_BASE: &str = "/api/v1/wallet";

pub struct WalletApi {
    client: ApiClient,
}

impl WalletApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn transactions(
        &self,
        params: &TransactionListParams,
    ) -> Result<Paginated<Transaction>> {
        self.client
            .get(&format!("{}/transactions", WALLET_BASE), params)
            .await
    }

    /// Paginated payout table
    pub async fn payouts(&self, params: &PayoutListParams) -> Result<Paginated<Payout>> {
        self.client
            .get(&format!("{}/payouts", WALLET_BASE), params)
            .await
    }

    /// Every payout, unpaginated - feeds the pending/completed totals
    pub async fn all_payouts(&self) -> Result<Vec<Payout>> {
        self.client
            .get(&format!("{}/payouts/all", WALLET_BASE), NO_QUERY)
            .await
    }

    pub async fn update_payout_status(&self, update: &PayoutStatusUpdate) -> Result<Option<Payout>> {
        self.client
            .post(&format!("{}/update-payout-status", WALLET_BASE), update)
            .await
    }

    /// Credit a user's wallet by hand
    pub async fn manual_fund(&self, adjustment: &ManualAdjustment) -> Result<Option<WalletAdjustment>> {
        self.client
            .post(&format!("{}/manual-fund", WALLET_BASE), adjustment)
            .await
    }

    /// Debit a user's wallet by hand
    pub async fn manual_debit(&self, adjustment: &ManualAdjustment) -> Result<Option<WalletAdjustment>> {
        self.client
            .post(&format!("{}/manual-debit", WALLET_BASE), adjustment)
            .await
    }

    pub async fn banks(&self) -> Result<Vec<Bank>> {
        self.client
            .get(&format!("{}/banks", WALLET_BASE), NO_QUERY)
            .await
    }

    /// Look up the account holder's name for a bank account number
    pub async fn resolve_account(&self, bank_code: &str, account_number: &str) -> Result<AccountLookup> {
        self.client
            .get(
                &format!("{}/resolve-account", WALLET_BASE),
                &[("bankCode", bank_code), ("accountNumber", account_number)],
            )
            .await
    }

    pub async fn wallet_balance(&self, user_id: &str) -> Result<WalletBalance> {
        self.client
            .get(
                &format!("{}/balance/{}", WALLET_BASE, urlencoding::encode(user_id)),
                NO_QUERY,
            )
            .await
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(alias = "_id")]
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(alias = "user")]
    pub user_id: Option<String>,
    pub order_id: Option<String>,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutStatus {
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "processing")]
    Processing,
    #[serde(alias = "completed", alias = "SUCCESS", alias = "success")]
    Completed,
    #[serde(alias = "failed")]
    Failed,
    #[serde(alias = "rejected")]
    Rejected,
    #[serde(other)]
    Other,
}

impl PayoutStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "Pending",
            PayoutStatus::Processing => "Processing",
            PayoutStatus::Completed => "Completed",
            PayoutStatus::Failed => "Failed",
            PayoutStatus::Rejected => "Rejected",
            PayoutStatus::Other => "Other",
        }
    }
}

impl std::str::FromStr for PayoutStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(PayoutStatus::Pending),
            "processing" => Ok(PayoutStatus::Processing),
            "completed" | "success" => Ok(PayoutStatus::Completed),
            "failed" => Ok(PayoutStatus::Failed),
            "rejected" => Ok(PayoutStatus::Rejected),
            other => Err(format!("unknown payout status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "vendor")]
    pub vendor_id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    pub status: PayoutStatus,
    pub bank_details: Option<BankDetails>,
    pub reference: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub bank_name: Option<String>,
    pub bank_code: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PayoutStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutStatusUpdate {
    pub payout_id: String,
    pub status: PayoutStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualAdjustment {
    pub user_id: String,
    pub amount: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAdjustment {
    #[serde(default)]
    pub balance: f64,
    pub transaction: Option<Transaction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLookup {
    pub account_name: String,
    pub account_number: String,
    pub bank_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub user_id: Option<String>,
    #[serde(default)]
    pub balance: f64,
    pub currency: Option<String>,
}
