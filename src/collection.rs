//! Ordered, hex-deduplicated list of extracted colors.

use log::debug;
use serde::Serialize;

use crate::color::{Hsl, rgb_to_css, rgb_to_hex, rgb_to_hsl};

/// One extracted color with its display strings computed at insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// `#rrggbb`, lowercase.
    pub hex: String,
    /// `rgb(r, g, b)`.
    pub rgb: String,
    pub hsl: Hsl,
    /// `hsl(h, s%, l%)`.
    pub hsl_string: String,
}

impl ColorEntry {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        let hsl = rgb_to_hsl(r, g, b);
        Self {
            r,
            g,
            b,
            hex: rgb_to_hex(r, g, b),
            rgb: rgb_to_css(r, g, b),
            hsl,
            hsl_string: hsl.to_string(),
        }
    }
}

/// Result of [`ColorCollection::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(ColorEntry),
    /// An entry with the same hex already exists; nothing changed.
    Duplicate,
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColorCollection {
    entries: Vec<ColorEntry>,
}

impl ColorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `(r, g, b)` unless an entry with the same hex is already present.
    pub fn add(&mut self, r: u8, g: u8, b: u8) -> AddOutcome {
        let hex = rgb_to_hex(r, g, b);
        if self.contains_hex(&hex) {
            debug!("Color {hex} already collected");
            return AddOutcome::Duplicate;
        }

        let entry = ColorEntry::new(r, g, b);
        self.entries.push(entry.clone());
        AddOutcome::Added(entry)
    }

    pub fn contains_hex(&self, hex: &str) -> bool {
        self.entries.iter().any(|e| e.hex.eq_ignore_ascii_case(hex))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn list(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
