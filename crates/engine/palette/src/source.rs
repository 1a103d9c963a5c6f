//! Palette sources consumed by the scene controller

use crate::client::PaletteClient;
use crate::color::PaletteSet;
use crate::transport::PaletteTransport;
use async_trait::async_trait;
use std::sync::Arc;

/// Produces a fresh [`PaletteSet`] on every call and never fails
#[async_trait]
pub trait PaletteSource: Send + Sync {
    async fn fetch_palettes(&self) -> PaletteSet;
}

#[async_trait]
impl<T: PaletteTransport> PaletteSource for PaletteClient<T> {
    async fn fetch_palettes(&self) -> PaletteSet {
        PaletteClient::fetch_palettes(self).await
    }
}

#[async_trait]
impl<S: PaletteSource + ?Sized> PaletteSource for Arc<S> {
    async fn fetch_palettes(&self) -> PaletteSet {
        (**self).fetch_palettes().await
    }
}

/// Source that always yields the same set, for offline runs
#[derive(Debug, Clone, Default)]
pub struct StaticPalettes {
    palettes: PaletteSet,
}

impl StaticPalettes {
    pub fn new(palettes: PaletteSet) -> Self {
        Self { palettes }
    }

    /// Static source over [`PaletteSet::fallback`]
    pub fn fallback() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaletteSource for StaticPalettes {
    async fn fetch_palettes(&self) -> PaletteSet {
        self.palettes.clone()
    }
}
