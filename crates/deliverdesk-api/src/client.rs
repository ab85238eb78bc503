use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

use crate::envelope::decode_envelope;
use crate::error::{ApiError, Result};
use crate::retry::{with_retry, RetryConfig};
use crate::session::SessionStore;

pub const DEFAULT_API_BASE: &str = "https://api.deliverdesk.app";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shared request sender for every endpoint module
///
/// Cheap to clone; clones share the connection pool and the session store,
/// so a token written after login is picked up by every module.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<RwLock<SessionStore>>,
    retry_config: RetryConfig,
}

impl ApiClient {
    pub fn new(session: SessionStore) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE, session)
    }

    pub fn with_base_url(base_url: &str, session: SessionStore) -> Result<Self> {
        Self::builder(base_url).session(session).build()
    }

    pub fn builder(base_url: &str) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session: SessionStore::new(),
            retry_config: RetryConfig::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle to the session store backing the bearer token
    pub fn session(&self) -> Arc<RwLock<SessionStore>> {
        Arc::clone(&self.session)
    }

    fn bearer_token(&self) -> Option<String> {
        // A poisoned lock just means we go out unauthenticated
        self.session
            .read()
            .ok()
            .and_then(|store| store.token().map(str::to_string))
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.http.request(method, url);
        match self.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET with query parameters; retried when the client has a retry budget
    pub async fn get<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);

        with_retry(&self.retry_config, ApiError::is_retryable, || async {
            let request = self.request(Method::GET, &url).query(query);
            self.execute(&Method::GET, path, request).await
        })
        .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    pub async fn delete<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::DELETE, path, body).await
    }

    // Mutations go out exactly once
    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(method.clone(), &self.url(path)).json(body);
        self.execute(&method, path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        debug!("{} {}", method, path);

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            // Logged only; logout/refresh is the caller's business
            warn!("{} {} returned 401 Unauthorized", method, path);
        }

        let body = response.text().await?;
        decode_envelope(status, &body)
    }
}

/// Builder for [`ApiClient`]
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    session: SessionStore,
    retry_config: RetryConfig,
}

impl ApiClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn session(mut self, session: SessionStore) -> Self {
        self.session = session;
        self
    }

    pub fn retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("DeliverDesk/0.1.0"),
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()?;

        Ok(ApiClient {
            http,
            base_url: self.base_url,
            session: Arc::new(RwLock::new(self.session)),
            retry_config: self.retry_config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::with_base_url("https://staging.deliverdesk.app/", SessionStore::new())
            .unwrap();
        assert_eq!(client.base_url(), "https://staging.deliverdesk.app");
        assert_eq!(
            client.url("/api/v1/admin/dashboard-stats"),
            "https://staging.deliverdesk.app/api/v1/admin/dashboard-stats"
        );
    }

    #[test]
    fn test_absolute_urls_bypass_base() {
        let client = ApiClient::new(SessionStore::new()).unwrap();
        assert_eq!(
            client.url("https://push.example.com/tokens"),
            "https://push.example.com/tokens"
        );
    }

    #[test]
    fn test_token_read_from_shared_session() {
        let client = ApiClient::new(SessionStore::new()).unwrap();
        assert!(client.bearer_token().is_none());

        client.session().write().unwrap().set_token("fresh-token");
        assert_eq!(client.bearer_token().as_deref(), Some("fresh-token"));

        // Clones see the same session
        let clone = client.clone();
        assert_eq!(clone.bearer_token().as_deref(), Some("fresh-token"));
    }
}
