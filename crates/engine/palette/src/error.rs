//! Palette error types.

use thiserror::Error;

/// Errors raised while acquiring or decoding palettes.
///
/// These never reach the scene: [`crate::PaletteClient::fetch_palettes`]
/// collapses every variant into the fallback set.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// Request could not be sent, timed out, or the relay was unreachable.
    #[error("palette request failed: {0}")]
    Network(String),

    /// Service answered with a non-success status.
    #[error("palette service responded with status {0}")]
    Status(u16),

    /// Body was not JSON or lacked the expected fields.
    #[error("malformed palette response: {0}")]
    Malformed(String),

    /// A color was not exactly six hex digits.
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),

    /// Endpoint or relay URL could not be built.
    #[error("invalid url: {0}")]
    Url(String),

    #[error("palette must contain at least one color")]
    EmptyPalette,

    #[error("palette set must contain at least one palette")]
    EmptySet,
}

impl PaletteError {
    /// Transport-level failure (request rejected, timeout, relay down).
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status(_) | Self::Url(_))
    }

    /// Response arrived but could not be turned into palettes.
    pub fn is_malformed(&self) -> bool {
        !self.is_network()
    }
}

impl From<reqwest::Error> for PaletteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Self::Network(format!("connection failed: {err}"))
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PaletteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Convenience result type for palette operations.
pub type PaletteResult<T> = Result<T, PaletteError>;
