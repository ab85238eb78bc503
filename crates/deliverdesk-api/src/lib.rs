// Typed bindings for the DeliverDesk backend
pub mod admin;
pub mod client;
pub mod envelope;
pub mod error;
pub mod health;
pub mod notifications;
pub mod pagination;
pub mod products;
pub mod retry;
pub mod session;
pub mod wallet;

// Re-export common types
pub use admin::{AdminApi, DashboardStats, Order, OrderTracking, Rider, Vendor};
pub use client::{ApiClient, ApiClientBuilder, DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
pub use envelope::{decode_envelope, Envelope};
pub use error::{ApiError, Result};
pub use health::{Consultation, ConsultationStatus, ConsultationType, HealthApi, HealthProfessional};
pub use notifications::{InAppNotification, NotificationAudience, NotificationsApi, PUSH_TOKEN_ENDPOINT};
pub use pagination::Paginated;
pub use products::{MenuCategory, Product, ProductsApi, Store};
pub use retry::RetryConfig;
pub use session::{SessionStore, AUTH_TOKEN_KEY};
pub use wallet::{Payout, PayoutStatus, Transaction, WalletApi};

/// Empty query string for endpoints that take no parameters
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];
