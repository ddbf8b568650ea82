use std::sync::Mutex;

use super::*;
use crate::factory::{new_rect, new_text};
use crate::geom::OutputFormat;
use crate::model::ItemKind;
use crate::services::api::ApiError;

// =========================================================================
// Mocks
// =========================================================================

struct MockCredits {
    allowed: bool,
    asked: Mutex<Vec<AiAction>>,
}

impl MockCredits {
    fn new(allowed: bool) -> Self {
        Self { allowed, asked: Mutex::new(Vec::new()) }
    }
}

#[async_trait::async_trait]
impl CreditsApi for MockCredits {
    async fn authorize(&self, action: AiAction) -> Result<bool, ApiError> {
        self.asked.lock().unwrap().push(action);
        Ok(self.allowed)
    }
}

#[derive(Default)]
struct MockRenderer {
    fail: bool,
    requests: Mutex<Vec<RenderRequest>>,
}

#[async_trait::async_trait]
impl RenderApi for MockRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<String, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(ApiError::Status { status: 502, body: "renderer unavailable".into() });
        }
        Ok(format!("https://cdn.test/render-{}.png", self.requests.lock().unwrap().len()))
    }
}

fn session() -> DesignSession {
    let mut baked = new_text("baked".into(), 30);
    baked.base.bake_layer = BakeLayer::Baked;
    let mut hidden_baked = new_rect("hidden".into(), 20);
    hidden_baked.base.bake_layer = BakeLayer::Baked;
    hidden_baked.base.visible = Some(false);
    let front = new_text("front".into(), 10);

    DesignSession {
        design_id: Some("d-1".into()),
        base_image: Some(BaseImage { url: "photo.jpg".into(), width: 3000.0, height: 2000.0 }),
        overlay: Overlay { texts: vec![baked, front], pics: Vec::new(), rects: vec![hidden_baked] },
        format: OutputFormat::Portrait,
    }
}

// =========================================================================
// bake
// =========================================================================

#[tokio::test]
async fn bake_renders_visible_baked_layers_only() {
    let credits = MockCredits::new(true);
    let renderer = MockRenderer::default();
    let mut session = session();

    let report = bake(&credits, &renderer, &BusyGate::new(), &mut session).await.unwrap();

    assert_eq!(report.baked, vec![LayerKey::new(ItemKind::Text, "baked")]);
    assert_eq!(report.url.as_deref(), Some("https://cdn.test/render-1.png"));

    let requests = renderer.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].overlay.len(), 1);
    assert_eq!(requests[0].base_image.as_ref().map(|i| i.url.as_str()), Some("photo.jpg"));
    assert!((requests[0].output.height - 1350.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn bake_replaces_base_image_and_drops_baked_layers() {
    let renderer = MockRenderer::default();
    let mut session = session();
    bake(&MockCredits::new(true), &renderer, &BusyGate::new(), &mut session).await.unwrap();

    let image = session.base_image.expect("base image");
    assert_eq!(image.url, "https://cdn.test/render-1.png");
    assert!((image.width - 1080.0).abs() < f64::EPSILON);
    assert!(!session.overlay.contains(&LayerKey::new(ItemKind::Text, "baked")));
    assert!(session.overlay.contains(&LayerKey::new(ItemKind::Text, "front")));
    assert!(session.overlay.contains(&LayerKey::new(ItemKind::Rect, "hidden")));
}

#[tokio::test]
async fn bake_with_nothing_to_bake_skips_everything() {
    let credits = MockCredits::new(true);
    let renderer = MockRenderer::default();
    let mut session = DesignSession::default();

    let report = bake(&credits, &renderer, &BusyGate::new(), &mut session).await.unwrap();
    assert_eq!(report, BakeReport { baked: Vec::new(), url: None });
    assert!(credits.asked.lock().unwrap().is_empty());
    assert!(renderer.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn bake_refused_without_credits() {
    let renderer = MockRenderer::default();
    let mut session = session();
    let before = session.clone();

    let err = bake(&MockCredits::new(false), &renderer, &BusyGate::new(), &mut session).await.unwrap_err();
    assert!(matches!(err, ApplyError::CreditsRefused(AiAction::Bake)));
    assert!(renderer.requests.lock().unwrap().is_empty());
    assert_eq!(session, before);
}

#[tokio::test]
async fn bake_checks_credits_before_busy_gate() {
    let credits = MockCredits::new(true);
    let gate = BusyGate::new();
    let _held = gate.try_acquire().expect("acquire");
    let mut session = session();

    let err = bake(&credits, &MockRenderer::default(), &gate, &mut session).await.unwrap_err();
    assert!(matches!(err, ApplyError::Busy));
    assert_eq!(*credits.asked.lock().unwrap(), vec![AiAction::Bake]);
}

#[tokio::test]
async fn bake_failure_keeps_session_and_releases_gate() {
    let renderer = MockRenderer { fail: true, ..MockRenderer::default() };
    let gate = BusyGate::new();
    let mut session = session();
    let before = session.clone();

    let err = bake(&MockCredits::new(true), &renderer, &gate, &mut session).await.unwrap_err();
    assert_eq!(err.user_message(), "renderer unavailable");
    assert_eq!(session, before);
    assert!(!gate.is_busy());
}

// =========================================================================
// export
// =========================================================================

#[tokio::test]
async fn export_renders_all_visible_layers() {
    let renderer = MockRenderer::default();
    let url = export(&renderer, &session()).await.unwrap();
    assert_eq!(url, "https://cdn.test/render-1.png");

    let requests = renderer.requests.lock().unwrap();
    let ids: Vec<&str> = requests[0].overlay.texts.iter().map(|t| t.base.id.as_str()).collect();
    assert_eq!(ids, vec!["baked", "front"]);
    assert!(requests[0].overlay.rects.is_empty());
}
