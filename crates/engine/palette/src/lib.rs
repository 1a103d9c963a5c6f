//! Palette acquisition for Towerscape
//!
//! Fetches random color palettes from the COLOURlovers API and decodes them
//! into a [`PaletteSet`]. The fetch never fails from the caller's point of
//! view: network errors and malformed responses are logged and replaced by a
//! fixed white/red/green/blue palette.
//!
//! # Modules
//!
//! - [`color`]: `Color`, `Palette`, `PaletteSet` and hex decoding
//! - [`client`]: URL building, relay routing and response decoding
//! - [`transport`]: HTTP transport seam
//! - [`source`]: `PaletteSource` trait consumed by the scene controller
//! - [`error`]: error types

pub mod client;
pub mod color;
pub mod error;
pub mod source;
pub mod transport;

pub use client::{
    parse_palettes, PaletteClient, Routing, DEFAULT_ENDPOINT, DEFAULT_NUM_RESULTS,
    DEFAULT_RELAY_ENDPOINT,
};
pub use color::{Color, Palette, PaletteSet};
pub use error::{PaletteError, PaletteResult};
pub use source::{PaletteSource, StaticPalettes};
pub use transport::{HttpTransport, PaletteTransport};
