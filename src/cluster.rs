//! Dominant colors through approximate k-means over RGB.
//!
//! A fixed number of pixels is drawn at random (with replacement), `k` of
//! those samples seed the centroids, and a fixed number of assign/update
//! passes follows. There is no convergence test: cost is bounded by
//! `sample_size * k * iterations` regardless of image size.
//!
//! Ties go to the lowest centroid index, and a centroid that loses all its
//! pixels keeps its previous value instead of being reseeded.

use log::{debug, info};
use palette::Srgb;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

const DEFAULT_K: usize = 5;
const DEFAULT_SAMPLE_SIZE: usize = 10_000;
const DEFAULT_ITERATIONS: usize = 5;

/// Tunables for [`dominant_colors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Number of centroids, and the maximum number of colors reported.
    pub k: usize,
    /// Pixels drawn from the image per run.
    pub sample_size: usize,
    /// Assign/update passes.
    pub iterations: usize,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            sample_size: DEFAULT_SAMPLE_SIZE,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl ClusterConfig {
    pub fn with_k(self, k: usize) -> Self {
        Self { k, ..self }
    }
}

/// A final centroid and the number of samples assigned to it in the last pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub centroid: Srgb<u8>,
    pub population: usize,
}

#[derive(Debug, Clone, Copy)]
struct Centroid {
    rgb: Srgb<u8>,
    count: usize,
    sum: [u64; 3],
}

impl Centroid {
    fn seed(rgb: Srgb<u8>) -> Self {
        Self {
            rgb,
            count: 0,
            sum: [0; 3],
        }
    }

    fn reset(&mut self) {
        self.count = 0;
        self.sum = [0; 3];
    }

    fn push(&mut self, px: Srgb<u8>) {
        self.count += 1;
        self.sum[0] += px.red as u64;
        self.sum[1] += px.green as u64;
        self.sum[2] += px.blue as u64;
    }

    /// Moves to the rounded mean of the assigned pixels; empty centroids stay put.
    fn recenter(&mut self) {
        if self.count == 0 {
            return;
        }
        let n = self.count as f64;
        let mean = |s: u64| (s as f64 / n).round() as u8;
        self.rgb = Srgb::new(mean(self.sum[0]), mean(self.sum[1]), mean(self.sum[2]));
    }
}

/// Squared Euclidean distance in RGB; ordering matches the true distance.
#[inline(always)]
fn distance_sq(a: Srgb<u8>, b: Srgb<u8>) -> i32 {
    let dr = a.red as i32 - b.red as i32;
    let dg = a.green as i32 - b.green as i32;
    let db = a.blue as i32 - b.blue as i32;
    dr * dr + dg * dg + db * db
}

/// Index of the closest centroid; the first strict minimum wins.
fn nearest(px: Srgb<u8>, centroids: &[Centroid]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = i32::MAX;
    for (idx, c) in centroids.iter().enumerate() {
        let dist = distance_sq(px, c.rgb);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    best_idx
}

fn sample_pixels<R: Rng + ?Sized>(
    buffer: &PixelBuffer,
    sample_size: usize,
    rng: &mut R,
) -> Vec<Srgb<u8>> {
    let total = buffer.pixel_count();
    (0..sample_size)
        .filter_map(|_| buffer.rgb_at_index(rng.random_range(0..total)))
        .collect()
}

/// Runs approximate k-means over `buffer` and returns every centroid, most
/// populated first.
///
/// Clusters with equal population keep their centroid index order. Clusters
/// with zero population are included; callers decide whether to show them.
/// Returns an empty list when `k` or `sample_size` is zero.
pub fn dominant_colors<R: Rng + ?Sized>(
    buffer: &PixelBuffer,
    config: &ClusterConfig,
    rng: &mut R,
) -> Vec<Cluster> {
    if config.k == 0 || config.sample_size == 0 {
        return Vec::new();
    }

    let samples = sample_pixels(buffer, config.sample_size, rng);
    if samples.is_empty() {
        return Vec::new();
    }

    let mut centroids: Vec<Centroid> = (0..config.k)
        .map(|_| Centroid::seed(samples[rng.random_range(0..samples.len())]))
        .collect();

    for iter in 0..config.iterations {
        centroids.iter_mut().for_each(Centroid::reset);

        for &px in &samples {
            let idx = nearest(px, &centroids);
            centroids[idx].push(px);
        }

        centroids.iter_mut().for_each(Centroid::recenter);

        let empty = centroids.iter().filter(|c| c.count == 0).count();
        debug!("k-means pass {}: {} empty of {} centroids", iter + 1, empty, config.k);
    }

    let mut clusters: Vec<Cluster> = centroids
        .iter()
        .map(|c| Cluster {
            centroid: c.rgb,
            population: c.count,
        })
        .collect();
    // Stable, so equal populations keep index order.
    clusters.sort_by(|a, b| b.population.cmp(&a.population));

    info!(
        "Clustered {} samples into {} centroids over {} passes",
        samples.len(),
        config.k,
        config.iterations
    );
    clusters
}
