//! Colors, palettes and palette sets
//!
//! A [`Palette`] is never empty and a [`PaletteSet`] always holds at least one
//! palette, so consumers can index with [`PaletteSet::wrapping`] and
//! [`Palette::wrapping`] without checking.

use crate::error::{PaletteError, PaletteResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `RRGGBB` hex string (no leading `#`, either case)
    pub fn from_hex(hex: &str) -> PaletteResult<Self> {
        let bytes = hex.as_bytes();
        if bytes.len() != 6 || !bytes.iter().all(u8::is_ascii_hexdigit) {
            return Err(PaletteError::InvalidHex(hex.to_string()));
        }

        let channel = |start: usize| {
            u8::from_str_radix(&hex[start..start + 2], 16)
                .map_err(|_| PaletteError::InvalidHex(hex.to_string()))
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Ordered, non-empty sequence of colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> PaletteResult<Self> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Decode a palette from `RRGGBB` strings
    pub fn from_hex<S: AsRef<str>>(hexes: &[S]) -> PaletteResult<Self> {
        let colors = hexes
            .iter()
            .map(|hex| Color::from_hex(hex.as_ref()))
            .collect::<PaletteResult<Vec<_>>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index` modulo the palette length
    pub fn wrapping(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }
}

/// Non-empty sequence of palettes, replaced wholesale on every fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PaletteSet {
    palettes: Vec<Palette>,
}

impl PaletteSet {
    pub fn new(palettes: Vec<Palette>) -> PaletteResult<Self> {
        if palettes.is_empty() {
            return Err(PaletteError::EmptySet);
        }
        Ok(Self { palettes })
    }

    /// The built-in set used whenever the remote service is unavailable:
    /// a single palette of white, red, green and blue.
    pub fn fallback() -> Self {
        Self {
            palettes: vec![Palette {
                colors: vec![Color::WHITE, Color::RED, Color::GREEN, Color::BLUE],
            }],
        }
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Palette at `index` modulo the number of palettes
    pub fn wrapping(&self, index: usize) -> &Palette {
        &self.palettes[index % self.palettes.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }

    /// Total number of colors across all palettes
    pub fn color_count(&self) -> usize {
        self.palettes.iter().map(Palette::len).sum()
    }
}

impl Default for PaletteSet {
    fn default() -> Self {
        Self::fallback()
    }
}
