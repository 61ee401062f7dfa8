//! Client for the remote portal API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The portal's flows are served locally by the mock services; this client
//! targets the REST backend those services stand in for. It attaches the
//! applicant's stored token as a bearer credential.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::store::{ClientStore, keys};

const FALLBACK_ERROR: &str = "API request failed";
const NETWORK_ERROR: &str = "Network error";

// =============================================================================
// ENDPOINTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiEndpoints {
    pub register: String,
    pub login: String,
    pub applications: String,
    pub submit_application: String,
    pub admin_login: String,
    pub admin_applications: String,
    pub admin_stats: String,
    pub approve_application: String,
    pub reject_application: String,
}

impl ApiEndpoints {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            register: format!("{base}/auth/register"),
            login: format!("{base}/auth/login"),
            applications: format!("{base}/applications"),
            submit_application: format!("{base}/applications/submit"),
            admin_login: format!("{base}/admin/login"),
            admin_applications: format!("{base}/admin/applications"),
            admin_stats: format!("{base}/admin/stats"),
            approve_application: format!("{base}/admin/applications/approve"),
            reject_application: format!("{base}/admin/applications/reject"),
        }
    }
}

// =============================================================================
// ERROR TYPE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
}

/// Message for a failed response body: its `error` field, or a fallback.
#[must_use]
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => json
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_ERROR)
            .to_owned(),
        Err(_) => NETWORK_ERROR.to_owned(),
    }
}

/// Message for a failed response whose body may not have been readable.
fn failure_message(body: Result<String, reqwest::Error>) -> String {
    match body {
        Ok(text) => error_message(&text),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read error response body");
            NETWORK_ERROR.to_owned()
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoints: ApiEndpoints,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { http: reqwest::Client::new(), endpoints: ApiEndpoints::new(base_url) }
    }

    #[must_use]
    pub fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    /// Build a JSON request, adding the stored token as a bearer credential.
    pub fn build(
        &self,
        store: &ClientStore,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<reqwest::Request, ApiClientError> {
        let mut req = self
            .http
            .request(method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(token) = store.get_raw(keys::TOKEN) {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        Ok(req.build()?)
    }

    /// Send a request and decode the JSON response.
    pub async fn request(
        &self,
        store: &ClientStore,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiClientError> {
        let req = self.build(store, method, url, body)?;
        let resp = self.http.execute(req).await?;

        let status = resp.status();
        if !status.is_success() {
            let message = failure_message(resp.text().await);
            tracing::warn!(%status, url, "remote api request failed");
            return Err(ApiClientError::Api { status: status.as_u16(), message });
        }

        Ok(resp.json::<Value>().await?)
    }
}

#[cfg(test)]
#[path = "api_client_test.rs"]
mod tests;
