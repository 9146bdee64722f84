//! Color extraction for an interactive image viewer.
//!
//! Colors come from two places: the eyedropper, which samples single pixels
//! under the pointer, and auto-detection, which runs a small k-means over
//! randomly sampled pixels to find the dominant colors. Both feed one ordered,
//! hex-deduplicated [`ColorCollection`] that the UI renders.
//!
//! [`Workspace`] ties it together for native callers; [`ColorPicker`] exposes
//! the same operations to JavaScript.

pub mod buffer;
pub mod cluster;
pub mod collection;
pub mod color;
pub mod error;
pub mod wasm;
pub mod workspace;

pub use buffer::PixelBuffer;
pub use cluster::{Cluster, ClusterConfig, dominant_colors};
pub use collection::{AddOutcome, ColorCollection, ColorEntry};
pub use color::{Color, Hsl, parse_hex, rgb_to_css, rgb_to_hex, rgb_to_hsl};
pub use error::ExtractError;
pub use wasm::{ColorPicker, PickStatus};
pub use workspace::{Viewport, Workspace};
