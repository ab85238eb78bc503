use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

/// Push-token service lives outside the main API host
pub const PUSH_TOKEN_ENDPOINT: &str = "https://push.deliverdesk.app/api/v1/device-tokens";

pub struct NotificationsApi {
    client: ApiClient,
    push_token_url: String,
}

impl NotificationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self::with_push_token_url(client, PUSH_TOKEN_ENDPOINT)
    }

    pub fn with_push_token_url(client: ApiClient, push_token_url: &str) -> Self {
        Self {
            client,
            push_token_url: push_token_url.to_string(),
        }
    }

    /// Dispatch an in-app (and push) notification to an audience
    pub async fn send_in_app(&self, notification: &InAppNotification) -> Result<Option<NotificationReceipt>> {
        self.client
            .post("/api/v1/notifications/send-in-app", notification)
            .await
    }

    pub async fn register_device_token(&self, registration: &DeviceToken) -> Result<()> {
        self.client.post(&self.push_token_url, registration).await
    }

    pub async fn remove_device_token(&self, registration: &DeviceToken) -> Result<()> {
        self.client.delete(&self.push_token_url, registration).await
    }
}

/// Who receives a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationAudience {
    All,
    Customers,
    Vendors,
    Riders,
    Doctors,
    /// Only the ids listed in `user_ids`
    Users,
}

impl std::str::FromStr for NotificationAudience {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(NotificationAudience::All),
            "customers" => Ok(NotificationAudience::Customers),
            "vendors" => Ok(NotificationAudience::Vendors),
            "riders" => Ok(NotificationAudience::Riders),
            "doctors" => Ok(NotificationAudience::Doctors),
            "users" => Ok(NotificationAudience::Users),
            other => Err(format!("unknown audience: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InAppNotification {
    pub title: String,
    pub body: String,
    pub audience: NotificationAudience,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub user_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl InAppNotification {
    pub fn broadcast(title: &str, body: &str, audience: NotificationAudience) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            audience,
            user_ids: Vec::new(),
            data: None,
        }
    }

    pub fn to_users(title: &str, body: &str, user_ids: Vec<String>) -> Self {
        Self {
            user_ids,
            ..Self::broadcast(title, body, NotificationAudience::Users)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationReceipt {
    #[serde(default)]
    pub recipients: u64,
    pub notification_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceToken {
    pub user_id: String,
    pub token: String,
    pub platform: String,
}
