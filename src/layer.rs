// One erasable sheet of the stack.
//
// A layer owns an RGBA buffer sized to the viewport, built from its source
// image. The brush is the only writer, and it goes through `Layer::erase_pixel`,
// which keeps the transparent-pixel count exact.

use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

pub const OPAQUE: u8 = 255;
pub const TRANSPARENT: u8 = 0;

pub struct Layer {
    index: usize,
    source: Arc<RgbaImage>,
    buffer: RgbaImage,
    active: bool,
    cleared: bool,
    // pixels with alpha == 0, kept in step with `buffer`
    transparent: usize,
}

impl Layer {
    /// Build a layer and composite its source at `width x height`.
    pub fn new(index: usize, source: Arc<RgbaImage>, width: u32, height: u32) -> Self {
        let mut layer = Self {
            index,
            source,
            buffer: RgbaImage::new(0, 0),
            active: false,
            cleared: false,
            transparent: 0,
        };
        layer.reset(width, height);
        layer
    }

    /// Throw away the buffer and composite the source again, scaled to fill
    /// `width x height`, fully opaque. The sequencer decides `active` afterwards.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.buffer = if width == 0 || height == 0 {
            RgbaImage::new(width, height)
        } else if self.source.width() == 0 || self.source.height() == 0 {
            RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, OPAQUE]))
        } else if self.source.dimensions() == (width, height) {
            (*self.source).clone()
        } else {
            imageops::resize(&*self.source, width, height, FilterType::Triangle)
        };

        for px in self.buffer.pixels_mut() {
            px[3] = OPAQUE;
        }

        self.transparent = 0;
        self.cleared = false;
        self.active = false;
    }

    /// Set one pixel's alpha to zero. Colour channels are left alone.
    /// Returns true if the pixel was not already transparent.
    #[inline]
    pub(crate) fn erase_pixel(&mut self, x: u32, y: u32) -> bool {
        let px = self.buffer.get_pixel_mut(x, y);
        if px[3] == TRANSPARENT {
            return false;
        }
        px[3] = TRANSPARENT;
        self.transparent += 1;
        true
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(crate) fn mark_cleared(&mut self) {
        self.cleared = true;
        self.active = false;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    pub fn pixel_count(&self) -> usize {
        self.buffer.width() as usize * self.buffer.height() as usize
    }

    /// Fully transparent pixels, from the running counter.
    pub fn transparent_pixels(&self) -> usize {
        self.transparent
    }

    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.buffer.get_pixel(x, y)[3]
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(w: u32, h: u32) -> Arc<RgbaImage> {
        // half-transparent source: reset must still come out opaque
        Arc::new(RgbaImage::from_pixel(w, h, Rgba([200, 40, 10, 128])))
    }

    #[test]
    fn reset_scales_source_and_forces_opacity() {
        let layer = Layer::new(0, source(8, 4), 30, 20);
        assert_eq!((layer.width(), layer.height()), (30, 20));
        assert!(layer.buffer().pixels().all(|p| p[3] == OPAQUE));
        assert_eq!(layer.transparent_pixels(), 0);
        assert_eq!(layer.buffer().get_pixel(15, 10)[0], 200);
    }

    #[test]
    fn reset_discards_previous_erasure() {
        let mut layer = Layer::new(0, source(10, 10), 10, 10);
        assert!(layer.erase_pixel(3, 3));
        layer.mark_cleared();

        layer.reset(12, 9);
        assert_eq!((layer.width(), layer.height()), (12, 9));
        assert_eq!(layer.transparent_pixels(), 0);
        assert_eq!(layer.alpha_at(3, 3), OPAQUE);
        assert!(!layer.is_cleared());
    }

    #[test]
    fn erase_pixel_counts_only_fresh_pixels() {
        let mut layer = Layer::new(0, source(4, 4), 4, 4);
        let before = *layer.buffer().get_pixel(1, 2);

        assert!(layer.erase_pixel(1, 2));
        assert!(!layer.erase_pixel(1, 2));
        assert_eq!(layer.transparent_pixels(), 1);

        let after = layer.buffer().get_pixel(1, 2);
        assert_eq!(after[3], TRANSPARENT);
        assert_eq!(&after.0[..3], &before.0[..3]);
    }

    #[test]
    fn zero_viewport_gives_empty_layer() {
        let layer = Layer::new(2, source(4, 4), 0, 50);
        assert!(layer.is_empty());
        assert_eq!(layer.index(), 2);
    }
}
