// Loads the artwork for each layer.
// Visual expectation: layer 1 is what you see first; scratching through it
// reveals layer 2, and so on. A file that can't be read is replaced by a
// striped placeholder so the stack still has the right number of sheets.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::{Rgba, RgbaImage};

const PLACEHOLDER_SIZE: u32 = 256;

// One tint per placeholder, cycling for deep stacks.
const PLACEHOLDER_TINTS: [[u8; 3]; 4] = [
    [0xC0, 0x39, 0x2B], // red
    [0x27, 0xAE, 0x60], // green
    [0x29, 0x80, 0xB9], // blue
    [0xD4, 0xAC, 0x0D], // gold
];

/// Decode every path to RGBA. Never fails: unreadable files are logged and
/// swapped for a placeholder.
pub fn load_sources(paths: &[PathBuf]) -> Vec<Arc<RgbaImage>> {
    paths
        .iter()
        .enumerate()
        .map(|(i, path)| match load_one(path) {
            Ok(img) => {
                log::info!("layer {} <- {} ({}x{})", i + 1, path.display(), img.width(), img.height());
                Arc::new(img)
            }
            Err(e) => {
                log::warn!("layer {}: can't load {}: {e}; using placeholder", i + 1, path.display());
                Arc::new(placeholder(i))
            }
        })
        .collect()
}

fn load_one(path: &Path) -> Result<RgbaImage, image::ImageError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Diagonal stripes in the layer's tint, a darker shade every other band.
pub fn placeholder(index: usize) -> RgbaImage {
    let [r, g, b] = PLACEHOLDER_TINTS[index % PLACEHOLDER_TINTS.len()];
    RgbaImage::from_fn(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, |x, y| {
        if ((x + y) / 24) % 2 == 0 {
            Rgba([r, g, b, 255])
        } else {
            Rgba([r / 2, g / 2, b / 2, 255])
        }
    })
}
