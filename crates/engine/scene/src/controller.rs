//! Regeneration lifecycle
//!
//! [`SceneController`] owns the live [`Scene`] and rebuilds it on request:
//! fetch palettes, then generate floor and towers, then publish the finished
//! scene in one step. Readers only ever see the previous scene or the complete
//! new one.
//!
//! [`SceneController::reshuffle`] skips the fetch: it rebuilds from the live
//! scene's palettes and moves per-tower coloring on to the next palette.
//!
//! Only one regeneration runs at a time. A trigger that arrives while one is in
//! flight is ignored and reported as [`RegenerateOutcome::AlreadyInProgress`].

use crate::generator::SceneGenerator;
use crate::scene::Scene;
use palette::{PaletteSet, PaletteSource};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Result of a [`SceneController::regenerate`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenerateOutcome {
    /// A new scene with this generation number is live
    Completed { generation: u64 },
    /// Another regeneration was already running; nothing changed
    AlreadyInProgress,
}

/// Owns the live scene and the regeneration lifecycle
pub struct SceneController<P, R = StdRng> {
    source: P,
    generator: SceneGenerator,
    rng: Mutex<R>,
    loading: AtomicBool,
    generation: AtomicU64,
    scene: watch::Sender<Arc<Scene>>,
}

impl<P: PaletteSource> SceneController<P, StdRng> {
    /// Controller with an OS-seeded RNG
    pub fn from_entropy(source: P, generator: SceneGenerator) -> Self {
        Self::new(source, generator, StdRng::from_os_rng())
    }

    /// Controller whose scenes are reproducible for a given seed
    pub fn seeded(source: P, generator: SceneGenerator, seed: u64) -> Self {
        Self::new(source, generator, StdRng::seed_from_u64(seed))
    }
}

impl<P: PaletteSource, R: RngCore + Send> SceneController<P, R> {
    /// Start with [`Scene::empty`] until the first regeneration completes
    pub fn new(source: P, generator: SceneGenerator, rng: R) -> Self {
        let (scene, _) = watch::channel(Arc::new(Scene::empty()));
        Self {
            source,
            generator,
            rng: Mutex::new(rng),
            loading: AtomicBool::new(false),
            generation: AtomicU64::new(0),
            scene,
        }
    }

    /// The live scene snapshot
    pub fn current_scene(&self) -> Arc<Scene> {
        self.scene.borrow().clone()
    }

    /// Receiver notified each time a new scene is published
    pub fn subscribe(&self) -> watch::Receiver<Arc<Scene>> {
        self.scene.subscribe()
    }

    /// True while a regeneration is in flight; renderers draw a placeholder
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Re-fetch palettes and rebuild the scene from scratch
    pub async fn regenerate(&self) -> RegenerateOutcome {
        let Some(_loading) = LoadingGuard::acquire(&self.loading) else {
            warn!("regeneration already in progress, ignoring trigger");
            return RegenerateOutcome::AlreadyInProgress;
        };

        let palettes = self.source.fetch_palettes().await;
        debug!(palettes = palettes.len(), "palettes resolved, generating scene");

        let scene = self.build(palettes, 0);
        self.publish(scene)
    }

    /// Rebuild from the live scene's palettes, starting one palette further on
    ///
    /// Nothing is fetched, so the new scene is live when this returns.
    pub fn reshuffle(&self) -> RegenerateOutcome {
        let Some(_loading) = LoadingGuard::acquire(&self.loading) else {
            warn!("regeneration already in progress, ignoring reshuffle");
            return RegenerateOutcome::AlreadyInProgress;
        };

        let current = self.current_scene();
        let offset = (current.palette_offset + 1) % current.palettes.len();
        debug!(palette_offset = offset, "reshuffling with current palettes");

        let scene = self.build(current.palettes.clone(), offset);
        self.publish(scene)
    }

    fn build(&self, palettes: PaletteSet, palette_offset: usize) -> Scene {
        let mut rng = self.rng.lock();
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.generator
            .generate(generation, palettes, palette_offset, &mut *rng)
    }

    fn publish(&self, scene: Scene) -> RegenerateOutcome {
        let generation = scene.generation;
        info!(
            generation,
            towers = scene.towers.len(),
            shapes = scene.shape_count(),
            floor_blocks = scene.floor.len(),
            palette_offset = scene.palette_offset,
            "scene regenerated"
        );

        self.scene.send_replace(Arc::new(scene));
        RegenerateOutcome::Completed { generation }
    }
}

/// Holds the loading flag for the duration of one regeneration
///
/// Dropping the guard clears the flag, so a cancelled regeneration does not
/// leave the controller stuck in the loading state.
struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_guard_is_exclusive() {
        let flag = AtomicBool::new(false);

        let first = LoadingGuard::acquire(&flag);
        assert!(first.is_some());
        assert!(flag.load(Ordering::Acquire));
        assert!(LoadingGuard::acquire(&flag).is_none());

        drop(first);
        assert!(!flag.load(Ordering::Acquire));
        assert!(LoadingGuard::acquire(&flag).is_some());
    }
}
