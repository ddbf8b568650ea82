//! Configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use tracing::warn;

use crate::consts::{DEFAULT_MAX_PICS, DEFAULT_MAX_RECTS, DEFAULT_MAX_TEXTS, MERGE_Z_OFFSET, Z_BASE, Z_STEP};
use crate::factory::TierLimits;
use crate::services::ErrorCode;
use crate::services::http::HttpTimeouts;
use crate::zorder::ZPolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OVERLAY_Z_STEP must be positive, got {0}")]
    NonPositiveZStep(i64),
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("OVERLAY_Z_MERGE_OFFSET {offset} must exceed {spread}, the top z of {layers} renumbered layers")]
    MergeOffsetTooLow { offset: i64, spread: i64, layers: usize },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveZStep(_) => "E_CONFIG_Z_STEP",
            Self::InvalidBaseUrl(_) => "E_CONFIG_BASE_URL",
            Self::MergeOffsetTooLow { .. } => "E_CONFIG_MERGE_OFFSET",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioConfig {
    pub api_base_url: String,
    pub timeouts: HttpTimeouts,
    pub limits: TierLimits,
    pub z_policy: ZPolicy,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            limits: TierLimits::default(),
            z_policy: ZPolicy::default(),
        }
    }
}

impl StudioConfig {
    /// Build config from the process environment.
    ///
    /// Optional, with defaults:
    /// - `OVERLAY_API_BASE_URL`: `http://127.0.0.1:3000/api`
    /// - `OVERLAY_REQUEST_TIMEOUT_SECS`: 60
    /// - `OVERLAY_CONNECT_TIMEOUT_SECS`: 10
    /// - `OVERLAY_MAX_TEXTS` / `OVERLAY_MAX_PICS` / `OVERLAY_MAX_RECTS`: 4 / 2 / 3
    /// - `OVERLAY_Z_BASE` / `OVERLAY_Z_STEP` / `OVERLAY_Z_MERGE_OFFSET`: 10 / 10 / 100
    ///
    /// # Errors
    ///
    /// See [`StudioConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from any key lookup.
    ///
    /// Unparseable numbers fall back to their defaults with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-positive z step, a merge offset that
    /// doesn't clear the renumbered spread of a full overlay, or a base URL
    /// that isn't `http(s)://`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("OVERLAY_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(api_base_url));
        }

        let timeouts = HttpTimeouts {
            request_secs: parse_or(&lookup, "OVERLAY_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(&lookup, "OVERLAY_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let limits = TierLimits {
            max_texts: parse_or(&lookup, "OVERLAY_MAX_TEXTS", DEFAULT_MAX_TEXTS),
            max_pics: parse_or(&lookup, "OVERLAY_MAX_PICS", DEFAULT_MAX_PICS),
            max_rects: parse_or(&lookup, "OVERLAY_MAX_RECTS", DEFAULT_MAX_RECTS),
        };
        let z_policy = ZPolicy {
            base: parse_or(&lookup, "OVERLAY_Z_BASE", Z_BASE),
            step: parse_or(&lookup, "OVERLAY_Z_STEP", Z_STEP),
            merge_offset: parse_or(&lookup, "OVERLAY_Z_MERGE_OFFSET", MERGE_Z_OFFSET),
        };
        if z_policy.step <= 0 {
            return Err(ConfigError::NonPositiveZStep(z_policy.step));
        }
        check_merge_offset(&z_policy, &limits)?;

        Ok(Self { api_base_url, timeouts, limits, z_policy })
    }
}

/// Template layers lifted by the merge offset must land above every z a full
/// overlay can be renumbered to.
///
/// # Errors
///
/// Returns [`ConfigError::MergeOffsetTooLow`] otherwise.
pub fn check_merge_offset(z_policy: &ZPolicy, limits: &TierLimits) -> Result<(), ConfigError> {
    let layers = limits.total();
    if z_policy.merge_clears(layers) {
        return Ok(());
    }
    Err(ConfigError::MergeOffsetTooLow {
        offset: z_policy.merge_offset,
        spread: z_policy.renumber_spread(layers),
        layers,
    })
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, "unparseable config value; using default");
            default
        }
    }
}
