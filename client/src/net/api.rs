//! API client facade: bearer auth, one-shot token refresh, error normalization.
//!
//! DESIGN
//! ======
//! Every backend call funnels through [`ApiClient::request`]. A 401 on an
//! authenticated call triggers at most one refresh followed by at most one
//! retry; the retry's outcome is final. A failed refresh, or a 401 with no
//! refresh token to try, clears the session and surfaces
//! [`ApiError::SessionExpired`].
//!
//! ERROR HANDLING
//! ==============
//! `Display` on every `ApiError` variant is the user-visible message. Server
//! errors carry the body's `error` field, then `message`, then
//! [`DEFAULT_ERROR_MESSAGE`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde_json::Value;

use super::transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, TransportError};
use super::types::RefreshResponse;
use crate::config::ClientConfig;
use crate::state::session::SessionContext;
use crate::state::storage::StoreError;

pub const DEFAULT_ERROR_MESSAGE: &str = "request failed";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired, please log in again";
pub const REFRESH_ENDPOINT: &str = "/auth/refresh";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response.
    #[error("{0}")]
    Network(String),

    /// A success body was not JSON, or not the expected shape.
    #[error("{0}")]
    Parse(String),

    /// Non-2xx response; `message` is extracted from the body.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Authentication could not be recovered; the session was cleared.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// The session store rejected a write.
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    /// Build a client backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Call `endpoint` (relative to `/api/v1`) and return the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] on transport failure,
    /// [`ApiError::Server`] on a non-2xx status, [`ApiError::SessionExpired`]
    /// when a 401 cannot be recovered, and [`ApiError::Parse`] when a success
    /// body is not JSON.
    pub async fn request(
        &self,
        session: &mut SessionContext,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
        requires_auth: bool,
    ) -> Result<Value, ApiError> {
        let bearer = if requires_auth { session.access_token().map(str::to_owned) } else { None };
        let response = self.send(endpoint, method, body, bearer.as_deref()).await?;

        if response.status == 401 && requires_auth {
            return self.recover_unauthorized(session, endpoint, method, body).await;
        }
        into_result(&response)
    }

    async fn recover_unauthorized(
        &self,
        session: &mut SessionContext,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        if session.refresh_token().is_some() && self.refresh_session(session).await {
            let bearer = session.access_token().map(str::to_owned);
            let retry = self.send(endpoint, method, body, bearer.as_deref()).await?;
            return into_result(&retry);
        }

        tracing::warn!(endpoint, "authentication expired; clearing session");
        if let Err(e) = session.clear() {
            tracing::warn!(error = %e, "stored session could not be removed");
        }
        Err(ApiError::SessionExpired)
    }

    /// Exchange the held refresh token for a new token pair.
    ///
    /// Returns `true` only when both tokens were replaced in memory and in the
    /// store. Never recurses and never clears the session itself.
    pub async fn refresh_session(&self, session: &mut SessionContext) -> bool {
        let Some(refresh_token) = session.refresh_token().map(str::to_owned) else {
            return false;
        };
        let body = serde_json::json!({ "refresh_token": refresh_token });

        let response = match self.send(REFRESH_ENDPOINT, Method::Post, Some(&body), None).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed");
                return false;
            }
        };
        if !response.is_success() {
            tracing::warn!(status = response.status, "token refresh rejected");
            return false;
        }
        let tokens = match serde_json::from_str::<RefreshResponse>(&response.body) {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!(error = %e, "token refresh returned an unreadable body");
                return false;
            }
        };
        match session.replace_tokens(tokens.token, tokens.refresh_token) {
            Ok(()) => {
                tracing::info!("access token refreshed");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "refreshed tokens could not be persisted");
                false
            }
        }
    }

    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
        bearer: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        if let Some(token) = bearer {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        let body = match (method, body) {
            (Method::Get, _) | (_, None) => None,
            (_, Some(value)) => Some(value.to_string()),
        };
        let request = HttpRequest { method, url: self.config.api_url(endpoint), headers, body };

        tracing::debug!(method = method.as_str(), endpoint, "api request");
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::debug!(method = method.as_str(), endpoint, status = response.status, "api response");
        Ok(response)
    }
}

fn into_result(response: &HttpResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Server {
            status: response.status,
            message: server_error_message(&response.body),
        });
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Parse(format!("invalid JSON response: {e}")))
}

/// User-facing message for an error body: `error`, then `message`, then the default.
#[must_use]
pub fn server_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return DEFAULT_ERROR_MESSAGE.to_owned();
    };
    ["error", "message"]
        .into_iter()
        .find_map(|key| value.get(key).and_then(Value::as_str).filter(|text| !text.is_empty()))
        .map_or_else(|| DEFAULT_ERROR_MESSAGE.to_owned(), ToOwned::to_owned)
}
