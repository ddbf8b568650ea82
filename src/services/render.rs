//! Server-side rendering: baking layers into the base image, and export.
//!
//! Bake composites the visible BAKED layers onto the base photo and makes the
//! result the new base image; those layers then leave the overlay. Export
//! renders the whole visible overlay at the format's canonical size.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use tracing::{info, warn};

use super::ErrorCode;
use super::api::{AiAction, BaseTransform, CreditsApi, RenderApi, RenderRequest};
use super::apply::ApplyError;
use super::busy::BusyGate;
use crate::model::{BakeLayer, ItemBase, LayerKey, Overlay, OverlayItem};
use crate::session::{BaseImage, DesignSession};

#[derive(Debug, Clone, PartialEq)]
pub struct BakeReport {
    /// Layers merged into the new base image and removed from the overlay.
    pub baked: Vec<LayerKey>,
    /// The new base image URL, `None` if there was nothing to bake.
    pub url: Option<String>,
}

fn retain<B: Clone>(items: &[OverlayItem<B>], keep: &impl Fn(&ItemBase) -> bool) -> Vec<OverlayItem<B>> {
    items.iter().filter(|i| keep(&i.base)).cloned().collect()
}

/// A copy of `overlay` holding only the items `keep` accepts.
fn filtered(overlay: &Overlay, keep: impl Fn(&ItemBase) -> bool) -> Overlay {
    Overlay {
        texts: retain(&overlay.texts, &keep),
        pics: retain(&overlay.pics, &keep),
        rects: retain(&overlay.rects, &keep),
    }
}

fn is_bakeable(base: &ItemBase) -> bool {
    base.is_visible() && base.bake_layer == BakeLayer::Baked
}

/// Render request for `overlay` on top of the session's base image.
#[must_use]
pub fn render_request(session: &DesignSession, overlay: Overlay) -> RenderRequest {
    RenderRequest {
        overlay,
        base_image: session.base_image.clone(),
        base_transform: BaseTransform::default(),
        output: session.format.design_size(),
    }
}

/// Bake the visible BAKED layers of `session` into its base image.
///
/// Credits are checked before the busy gate is taken. Hidden BAKED layers
/// are left in the overlay untouched.
///
/// # Errors
///
/// [`ApplyError::CreditsRefused`] when the user may not bake,
/// [`ApplyError::Busy`] while another action runs, otherwise the classified
/// backend error. The session is unchanged on error.
pub async fn bake(
    credits: &dyn CreditsApi,
    renderer: &dyn RenderApi,
    gate: &BusyGate,
    session: &mut DesignSession,
) -> Result<BakeReport, ApplyError> {
    let layers = filtered(&session.overlay, is_bakeable);
    if layers.is_empty() {
        return Ok(BakeReport { baked: Vec::new(), url: None });
    }

    let result = run_bake(credits, renderer, gate, session, layers).await;
    match &result {
        Ok(report) => info!(baked = report.baked.len(), "bake complete"),
        Err(e) => warn!(code = e.error_code(), error = %e, "bake failed"),
    }
    result
}

async fn run_bake(
    credits: &dyn CreditsApi,
    renderer: &dyn RenderApi,
    gate: &BusyGate,
    session: &mut DesignSession,
    layers: Overlay,
) -> Result<BakeReport, ApplyError> {
    if !credits.authorize(AiAction::Bake).await? {
        return Err(ApplyError::CreditsRefused(AiAction::Bake));
    }
    let _guard = gate.try_acquire().ok_or(ApplyError::Busy)?;

    let baked: Vec<LayerKey> = layers
        .texts
        .iter()
        .map(OverlayItem::key)
        .chain(layers.pics.iter().map(OverlayItem::key))
        .chain(layers.rects.iter().map(OverlayItem::key))
        .collect();

    let url = renderer.render(&render_request(session, layers)).await?;

    let output = session.format.design_size();
    session.base_image = Some(BaseImage { url: url.clone(), width: output.width, height: output.height });
    session.overlay = filtered(&session.overlay, |base| !is_bakeable(base));
    Ok(BakeReport { baked, url: Some(url) })
}

/// Render every visible layer of `session` and return the image URL.
///
/// # Errors
///
/// The classified backend error.
pub async fn export(renderer: &dyn RenderApi, session: &DesignSession) -> Result<String, ApplyError> {
    let overlay = filtered(&session.overlay, ItemBase::is_visible);
    let items = overlay.len();
    match renderer.render(&render_request(session, overlay)).await {
        Ok(url) => {
            info!(items, format = ?session.format, %url, "export rendered");
            Ok(url)
        }
        Err(e) => {
            let e = ApplyError::from(e);
            warn!(code = e.error_code(), error = %e, "export failed");
            Err(e)
        }
    }
}
