//! A design being edited: the overlay plus its backing image and format.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::geom::{OutputFormat, Size};
use crate::merge::{ApplyPolicy, ImageMode, MergeOutcome, merge_overlays};
use crate::model::Overlay;
use crate::zorder::ZPolicy;

/// The background photo under the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseImage {
    pub url: String,
    pub width: f64,
    pub height: f64,
}

impl BaseImage {
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Everything the services need to persist, apply onto or render a design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSession {
    /// Server-side design id; `None` until one has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_image: Option<BaseImage>,
    #[serde(default)]
    pub overlay: Overlay,
    #[serde(default)]
    pub format: OutputFormat,
}

impl DesignSession {
    #[must_use]
    pub fn new(overlay: Overlay, format: OutputFormat) -> Self {
        Self { design_id: None, base_image: None, overlay, format }
    }

    #[must_use]
    pub fn has_image(&self) -> bool {
        self.base_image.is_some()
    }

    /// Policy to offer when a template is picked for this session.
    #[must_use]
    pub fn suggested_policy(&self) -> ApplyPolicy {
        ApplyPolicy::suggest(&self.overlay, self.has_image())
    }

    /// Merge `template` in and, under [`ImageMode::Replace`], take its image.
    ///
    /// A template without an image leaves the current one in place.
    pub fn apply_template(
        &mut self,
        template: &Overlay,
        template_image: Option<&BaseImage>,
        policy: ApplyPolicy,
        z_policy: &ZPolicy,
    ) -> MergeOutcome {
        let outcome = merge_overlays(&self.overlay, template, policy.overlay_mode, z_policy);
        self.overlay = outcome.overlay.clone();
        if policy.image_mode == ImageMode::Replace
            && let Some(image) = template_image
        {
            self.base_image = Some(image.clone());
        }
        outcome
    }
}
