//! Interactive session tests against a palette source that blocks on demand

use async_trait::async_trait;
use palette::{PaletteSet, PaletteSource};
use scene::{Preset, RegenerateOutcome, RenderStyle, SceneController, SceneGenerator};
use sketch::{build_controller, Command, RenderSettings, Session, SketchConfig};
use std::sync::Arc;
use tokio::sync::Notify;

/// Palette source that waits for `release` before answering
#[derive(Default)]
struct GatedSource {
    started: Notify,
    release: Notify,
}

#[async_trait]
impl PaletteSource for GatedSource {
    async fn fetch_palettes(&self) -> PaletteSet {
        self.started.notify_one();
        self.release.notified().await;
        PaletteSet::fallback()
    }
}

fn gated_session() -> (Arc<GatedSource>, Session<Arc<GatedSource>>) {
    let source = Arc::new(GatedSource::default());
    let generator = SceneGenerator::from_preset(Preset::Dense);
    let controller = SceneController::seeded(Arc::clone(&source), generator, 5);
    let session = Session::new(
        Arc::new(controller),
        RenderStyle::default(),
        &RenderSettings::default(),
    );
    (source, session)
}

#[tokio::test]
async fn test_placeholder_while_loading() {
    let (source, mut session) = gated_session();

    let pending = session.regenerate();
    source.started.notified().await;

    assert!(session.controller().is_loading());
    let frame = session.frame();
    assert!(frame.is_placeholder());
    assert_eq!(frame.to_string(), "placeholder");

    assert_eq!(
        session.execute(Command::Regenerate),
        "regeneration already in progress"
    );

    source.release.notify_one();
    let outcome = pending.await.unwrap();
    assert_eq!(outcome, RegenerateOutcome::Completed { generation: 1 });

    let frame = session.frame();
    assert!(!frame.is_placeholder());
    assert_eq!(
        frame.primitives(),
        session.controller().current_scene().shape_count() + 500
    );
}

#[tokio::test]
async fn test_cycle_waits_for_pending_fetch() {
    let (source, mut session) = gated_session();

    let pending = session.regenerate();
    source.started.notified().await;
    assert_eq!(
        session.execute(Command::Reshuffle),
        "regeneration already in progress"
    );
    assert_eq!(session.controller().current_scene().generation, 0);

    source.release.notify_one();
    pending.await.unwrap();

    assert_eq!(
        session.execute(Command::Reshuffle),
        "generation=2 palette=1/1"
    );
    assert!(!session.controller().is_loading());
    assert_eq!(
        session.controller().current_scene().palettes,
        PaletteSet::fallback()
    );
}

#[tokio::test]
async fn test_status_reports_generation() {
    let (source, session) = gated_session();
    assert!(session.status().starts_with("generation=0 towers=0"));

    let pending = session.regenerate();
    source.started.notified().await;
    source.release.notify_one();
    pending.await.unwrap();

    let scene = session.controller().current_scene();
    assert_eq!(
        session.status(),
        format!(
            "generation=1 towers={} shapes={} floor=500 loading=false",
            scene.towers.len(),
            scene.shape_count()
        )
    );
}

#[tokio::test]
async fn test_offline_config_builds_reproducible_controller() {
    let config = SketchConfig::from_toml(
        r#"
        seed = 21

        [generator]
        preset = "sparse"

        [palette]
        offline = true
        "#,
    )
    .unwrap();

    let first = build_controller(&config).unwrap();
    let second = build_controller(&config).unwrap();
    first.regenerate().await;
    second.regenerate().await;

    let a = first.current_scene();
    let b = second.current_scene();
    assert_eq!(a.towers, b.towers);
    assert_eq!(a.towers.len(), 10);
    assert_eq!(a.palettes, PaletteSet::fallback());
    assert!(a.floor.is_empty());
}
