// How much of a layer has been scratched away.

use serde::Deserialize;

use crate::layer::{Layer, TRANSPARENT};

/// Where the transparent count comes from. Both give identical answers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearanceMode {
    /// Counter maintained by the brush as it erases. O(1).
    #[default]
    Incremental,
    /// Walk every alpha value. O(width * height).
    FullScan,
}

/// Transparent fraction by walking the whole buffer.
pub fn scan(layer: &Layer) -> f64 {
    fraction(count_transparent(layer), layer.pixel_count())
}

/// Transparent fraction from the layer's running counter.
pub fn ratio(layer: &Layer) -> f64 {
    fraction(layer.transparent_pixels(), layer.pixel_count())
}

/// Transparent fraction, counted the way `mode` says.
pub fn evaluate(layer: &Layer, mode: ClearanceMode) -> f64 {
    match mode {
        ClearanceMode::Incremental => ratio(layer),
        ClearanceMode::FullScan => scan(layer),
    }
}

/// Cleared strictly above 99% transparent. Compared on the integer counts so
/// the boundary is exact.
pub fn is_cleared(layer: &Layer, mode: ClearanceMode) -> bool {
    let transparent = match mode {
        ClearanceMode::Incremental => layer.transparent_pixels(),
        ClearanceMode::FullScan => count_transparent(layer),
    };
    counts_cleared(transparent, layer.pixel_count())
}

fn counts_cleared(transparent: usize, total: usize) -> bool {
    total > 0 && (transparent as u128) * 100 > (total as u128) * 99
}

fn count_transparent(layer: &Layer) -> usize {
    layer.buffer().pixels().filter(|p| p[3] == TRANSPARENT).count()
}

fn fraction(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64
}
