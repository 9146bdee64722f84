//! Session state for one loaded image: buffer, picked colors and tool state.
//!
//! Input handling lives outside the crate. Whatever event model the host has
//! calls [`Workspace::hover`] for live previews and [`Workspace::commit`] for
//! clicks, passing pointer positions relative to the displayed image.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::buffer::PixelBuffer;
use crate::cluster::{Cluster, ClusterConfig, dominant_colors};
use crate::collection::{AddOutcome, ColorCollection, ColorEntry};
use crate::color::Color;

/// On-screen size of the displayed image, in the same units as pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport showing `buffer` at its native resolution.
    pub fn native(buffer: &PixelBuffer) -> Self {
        Self::new(buffer.width() as f64, buffer.height() as f64)
    }

    /// Scales a viewport point into buffer space. `None` for a degenerate viewport.
    pub fn to_buffer(&self, buffer: &PixelBuffer, x: f64, y: f64) -> Option<(f64, f64)> {
        let usable = |d: f64| d.is_finite() && d > 0.0;
        if !usable(self.width) || !usable(self.height) {
            return None;
        }
        let scale_x = buffer.width() as f64 / self.width;
        let scale_y = buffer.height() as f64 / self.height;
        Some((x * scale_x, y * scale_y))
    }
}

/// Owns the current image and the colors extracted from it.
///
/// Generic over the random source used for clustering so tests can inject a
/// seeded generator.
#[derive(Debug)]
pub struct Workspace<R = StdRng> {
    buffer: Option<PixelBuffer>,
    colors: ColorCollection,
    eyedropper_active: bool,
    cluster_config: ClusterConfig,
    rng: R,
}

impl Workspace<StdRng> {
    /// Workspace with an OS-seeded generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for Workspace<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Workspace<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            buffer: None,
            colors: ColorCollection::new(),
            eyedropper_active: false,
            cluster_config: ClusterConfig::default(),
            rng,
        }
    }

    /// Replaces the current image and drops every collected color.
    pub fn load(&mut self, buffer: PixelBuffer) {
        info!("Loaded {}x{} image", buffer.width(), buffer.height());
        self.buffer = Some(buffer);
        self.colors.clear();
    }

    /// Drops the image and colors and switches the eyedropper off.
    pub fn reset(&mut self) {
        info!("Workspace reset");
        self.buffer = None;
        self.colors.clear();
        self.eyedropper_active = false;
    }

    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    pub fn colors(&self) -> &[ColorEntry] {
        self.colors.list()
    }

    pub fn clear_colors(&mut self) {
        self.colors.clear();
    }

    pub fn cluster_config(&self) -> &ClusterConfig {
        &self.cluster_config
    }

    pub fn set_cluster_config(&mut self, config: ClusterConfig) {
        self.cluster_config = config;
    }

    pub fn eyedropper_active(&self) -> bool {
        self.eyedropper_active
    }

    pub fn set_eyedropper_active(&mut self, active: bool) {
        self.eyedropper_active = active;
    }

    /// Flips the eyedropper and returns the new state.
    pub fn toggle_eyedropper(&mut self) -> bool {
        self.eyedropper_active = !self.eyedropper_active;
        self.eyedropper_active
    }

    /// Color under a viewport point, for cursor previews. Never mutates.
    ///
    /// `None` if the eyedropper is off, nothing is loaded or the point misses the image.
    pub fn hover(&self, x: f64, y: f64, viewport: Viewport) -> Option<Color> {
        if !self.eyedropper_active {
            return None;
        }
        let buffer = self.buffer.as_ref()?;
        let (bx, by) = viewport.to_buffer(buffer, x, y)?;
        buffer.color_at(bx, by)
    }

    /// Samples the color under a viewport point and adds it to the collection.
    ///
    /// `None` under the same conditions as [`Workspace::hover`].
    pub fn commit(&mut self, x: f64, y: f64, viewport: Viewport) -> Option<AddOutcome> {
        let color = self.hover(x, y, viewport)?;
        Some(self.colors.add(color.r, color.g, color.b))
    }

    /// Replaces the collection with the image's dominant colors using the
    /// workspace's cluster settings. Returns how many colors were added.
    pub fn auto_detect(&mut self) -> usize {
        let config = self.cluster_config;
        self.auto_detect_with(&config)
    }

    /// Like [`Workspace::auto_detect`] with explicit settings.
    ///
    /// Without a loaded image this is a no-op returning 0 and the collection
    /// is left untouched.
    pub fn auto_detect_with(&mut self, config: &ClusterConfig) -> usize {
        let Some(buffer) = self.buffer.as_ref() else {
            return 0;
        };
        let clusters = dominant_colors(buffer, config, &mut self.rng);

        self.colors.clear();
        let added = emit_clusters(&clusters, config.k, &mut self.colors);

        info!("Detected {added} dominant colors");
        added
    }
}

/// Adds the first `k` clusters that received any pixels, in rank order.
/// Returns how many were new to `colors`.
fn emit_clusters(clusters: &[Cluster], k: usize, colors: &mut ColorCollection) -> usize {
    let mut added = 0;
    for cluster in clusters.iter().take(k) {
        if cluster.population == 0 {
            continue;
        }
        let rgb = cluster.centroid;
        if colors.add(rgb.red, rgb.green, rgb.blue).is_added() {
            added += 1;
        }
    }
    added
}
