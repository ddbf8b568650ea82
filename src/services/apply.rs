//! Applying a preset onto the current design.
//!
//! Fetches the preset, decides the policy (explicit or suggested), creates a
//! backing design when the image is being replaced and none exists yet,
//! records the apply remotely, then merges locally. The session is only
//! touched after every remote call has succeeded, apart from adopting a
//! freshly created design id.

#[cfg(test)]
#[path = "apply_test.rs"]
mod apply_test;

use tracing::{info, warn};

use super::ErrorCode;
use super::api::{AiAction, ApiError, DesignApi};
use super::busy::BusyGate;
use crate::merge::{ApplyPolicy, ImageMode, MergeOutcome};
use crate::session::DesignSession;
use crate::zorder::ZPolicy;

// =============================================================================
// ERROR
// =============================================================================

/// Failures of apply and bake flows, classified for the UI.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    /// Another apply or bake is still running.
    #[error("another action is already in progress")]
    Busy,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already applied: {0}")]
    AlreadyApplied(String),

    #[error("not enough credits for {0:?}")]
    CreditsRefused(AiAction),

    /// Anything not recognized above, carried unchanged.
    #[error(transparent)]
    Api(ApiError),
}

impl ErrorCode for ApplyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Busy => "E_BUSY",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::AlreadyApplied(_) => "E_ALREADY_APPLIED",
            Self::CreditsRefused(_) => "E_CREDITS_REFUSED",
            Self::Api(e) => e.error_code(),
        }
    }
}

impl From<ApiError> for ApplyError {
    /// Recognize the server signatures that get a dedicated dialog.
    ///
    /// Only server responses are classified; transport, parse and client
    /// errors always pass through.
    fn from(err: ApiError) -> Self {
        let ApiError::Status { status, body } = &err else {
            return Self::Api(err);
        };
        let lower = body.to_lowercase();
        if *status == 404 || lower.contains("not found") {
            Self::NotFound(err.raw_message())
        } else if lower.contains("already applied") {
            Self::AlreadyApplied(err.raw_message())
        } else {
            Self::Api(err)
        }
    }
}

impl ApplyError {
    /// Targeted dialog text, or `None` when the raw message should be shown.
    #[must_use]
    pub fn dialog(&self) -> Option<&'static str> {
        match self {
            Self::Busy => Some("Please wait for the current action to finish."),
            Self::NotFound(_) => Some("This template is no longer available."),
            Self::AlreadyApplied(_) => Some("This template has already been applied to your design."),
            Self::CreditsRefused(_) => Some("You don't have enough credits for this action."),
            Self::Api(_) => None,
        }
    }

    /// What the user sees: the dialog text, or the raw server message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match (self.dialog(), self) {
            (Some(text), _) => text.to_string(),
            (None, Self::Api(e)) => e.raw_message(),
            (None, other) => other.to_string(),
        }
    }
}

// =============================================================================
// FLOW
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    pub policy: ApplyPolicy,
    /// A backing design was created during this apply.
    pub created_design: bool,
    pub outcome: MergeOutcome,
}

/// Apply preset `preset_id` onto `session`.
///
/// With `policy` unset, the session's suggested policy is used.
///
/// # Errors
///
/// [`ApplyError::Busy`] if another action holds `gate`; otherwise the
/// classified backend error.
pub async fn apply_template(
    api: &dyn DesignApi,
    gate: &BusyGate,
    session: &mut DesignSession,
    preset_id: &str,
    policy: Option<ApplyPolicy>,
    z_policy: &ZPolicy,
) -> Result<ApplyReport, ApplyError> {
    let result = run(api, gate, session, preset_id, policy, z_policy).await;
    match &result {
        Ok(report) => info!(
            preset_id,
            overlay_mode = ?report.policy.overlay_mode,
            image_mode = ?report.policy.image_mode,
            items = report.outcome.overlay.len(),
            remapped = report.outcome.remapped.len(),
            "template applied"
        ),
        Err(e) => warn!(preset_id, code = e.error_code(), error = %e, "template apply failed"),
    }
    result
}

async fn run(
    api: &dyn DesignApi,
    gate: &BusyGate,
    session: &mut DesignSession,
    preset_id: &str,
    policy: Option<ApplyPolicy>,
    z_policy: &ZPolicy,
) -> Result<ApplyReport, ApplyError> {
    let _guard = gate.try_acquire().ok_or(ApplyError::Busy)?;

    let bundle = api.fetch_preset(preset_id).await?;
    let policy = policy.unwrap_or_else(|| session.suggested_policy());

    let mut created_design = false;
    if policy.image_mode == ImageMode::Replace && session.design_id.is_none() {
        let image = bundle.base_image.as_ref().or(session.base_image.as_ref());
        session.design_id = Some(api.create_design(image).await?);
        created_design = true;
    }
    if let Some(design_id) = session.design_id.as_deref() {
        api.apply_preset(design_id, preset_id, policy).await?;
    }

    let outcome = session.apply_template(&bundle.overlay, bundle.base_image.as_ref(), policy, z_policy);
    Ok(ApplyReport { policy, created_design, outcome })
}
