//! HTTP implementation of the backend collaborators.
//!
//! Thin JSON-over-HTTP wrapper around `reqwest`. Status checking and body
//! parsing are pure functions so they can be tested without a server.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::api::{AiAction, ApiError, CreditsApi, DesignApi, DesignBundle, RenderApi, RenderRequest};
use crate::merge::ApplyPolicy;
use crate::session::BaseImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Build a client rooted at `base_url` (e.g. `https://host/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the TLS backend can't initialize.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        check_status(status, text)
    }

    async fn get_json<R: DeserializeOwned + Send>(&self, path: &str) -> Result<R, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        let text = self.send(self.http.get(&url)).await?;
        parse_body(&text)
    }

    async fn post_json<B: Serialize + Sync, R: DeserializeOwned + Send>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        let text = self.send(self.http.post(&url).json(body)).await?;
        parse_body(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDesignRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    base_image: Option<&'a BaseImage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateDesignResponse {
    design_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyPresetRequest<'a> {
    preset_id: &'a str,
    #[serde(flatten)]
    policy: ApplyPolicy,
}

#[derive(Deserialize)]
struct RenderResponse {
    url: String,
}

#[derive(Serialize)]
struct AuthorizeRequest {
    action: AiAction,
}

#[derive(Deserialize)]
struct AuthorizeResponse {
    allowed: bool,
}

/// Acknowledgement body; contents are ignored.
#[derive(Deserialize)]
struct Ack {}

// =============================================================================
// PARSING
// =============================================================================

/// Map a non-2xx status to [`ApiError::Status`], passing the body through otherwise.
fn check_status(status: u16, body: String) -> Result<String, ApiError> {
    if (200..300).contains(&status) { Ok(body) } else { Err(ApiError::Status { status, body }) }
}

/// Parse a JSON body. An empty body parses as `{}`.
fn parse_body<R: DeserializeOwned>(text: &str) -> Result<R, ApiError> {
    let text = if text.trim().is_empty() { "{}" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

// =============================================================================
// COLLABORATORS
// =============================================================================

#[async_trait::async_trait]
impl DesignApi for HttpClient {
    async fn create_design(&self, base_image: Option<&BaseImage>) -> Result<String, ApiError> {
        let created: CreateDesignResponse = self.post_json("designs", &CreateDesignRequest { base_image }).await?;
        Ok(created.design_id)
    }

    async fn fetch_preset(&self, preset_id: &str) -> Result<DesignBundle, ApiError> {
        let mut bundle: DesignBundle = self.get_json(&format!("presets/{preset_id}")).await?;
        bundle.overlay.normalize();
        Ok(bundle)
    }

    async fn apply_preset(&self, design_id: &str, preset_id: &str, policy: ApplyPolicy) -> Result<(), ApiError> {
        let body = ApplyPresetRequest { preset_id, policy };
        let Ack {} = self.post_json(&format!("designs/{design_id}/apply"), &body).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl RenderApi for HttpClient {
    async fn render(&self, request: &RenderRequest) -> Result<String, ApiError> {
        let rendered: RenderResponse = self.post_json("render", request).await?;
        Ok(rendered.url)
    }
}

#[async_trait::async_trait]
impl CreditsApi for HttpClient {
    async fn authorize(&self, action: AiAction) -> Result<bool, ApiError> {
        let answer: AuthorizeResponse = self.post_json("credits/authorize", &AuthorizeRequest { action }).await?;
        Ok(answer.allowed)
    }
}
