//! Collaborator traits and the types exchanged with the backend.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::{Deserialize, Serialize};

use super::ErrorCode;
use crate::geom::{OutputFormat, Size};
use crate::merge::ApplyPolicy;
use crate::model::Overlay;
use crate::session::BaseImage;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or its body not read.
    #[error("API request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("API response error: status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON.
    #[error("API response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_API_REQUEST",
            Self::Status { .. } => "E_API_RESPONSE",
            Self::Parse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

impl ApiError {
    /// The server's own message when there is one, else the display text.
    #[must_use]
    pub fn raw_message(&self) -> String {
        match self {
            Self::Status { body, .. } if !body.is_empty() => body.clone(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Paid AI operations gated by credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiAction {
    Bake,
    Restyle,
    Cutout,
}

/// A stored preset: its overlay and, optionally, its own base image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignBundle {
    #[serde(default)]
    pub overlay: Overlay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_image: Option<BaseImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

/// Pan/zoom of the base photo inside the output frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for BaseTransform {
    fn default() -> Self {
        Self { scale: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

/// Server-side composite request. All geometry is in design pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub overlay: Overlay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_image: Option<BaseImage>,
    pub base_transform: BaseTransform,
    pub output: Size,
}

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Design persistence and presets.
#[async_trait::async_trait]
pub trait DesignApi: Send + Sync {
    /// Create a backing design, optionally seeded with a base image.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is malformed.
    async fn create_design(&self, base_image: Option<&BaseImage>) -> Result<String, ApiError>;

    /// Load a preset by id.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is malformed.
    async fn fetch_preset(&self, preset_id: &str) -> Result<DesignBundle, ApiError>;

    /// Record that `preset_id` was applied to `design_id` under `policy`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the backend refuses or the request fails.
    async fn apply_preset(&self, design_id: &str, preset_id: &str, policy: ApplyPolicy) -> Result<(), ApiError>;
}

/// Server-side compositor.
#[async_trait::async_trait]
pub trait RenderApi: Send + Sync {
    /// Render and return the URL of the produced image.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the render fails.
    async fn render(&self, request: &RenderRequest) -> Result<String, ApiError>;
}

/// Credit checks for paid operations.
#[async_trait::async_trait]
pub trait CreditsApi: Send + Sync {
    /// Whether the user may run `action` now.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the check itself fails.
    async fn authorize(&self, action: AiAction) -> Result<bool, ApiError>;
}
