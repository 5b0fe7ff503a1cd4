// Brush rasterization: hard-edged alpha erasure of discs and capsules.
//
// A pixel `(px, py)` is erased when its distance to the stroke geometry is at
// most `radius`. The distance test is done in integers, so repeating a call
// is an exact no-op.

use std::ops::RangeInclusive;

use crate::layer::Layer;
use crate::types::Point;

/// Brush size with host-declared bounds. Requests outside the bounds are
/// clamped, never rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Brush {
    radius: u32,
    min: u32,
    max: u32,
}

impl Brush {
    /// `min` is raised to 1 and `max` to `min` if they are out of order.
    pub fn new(radius: i64, min: u32, max: u32) -> Self {
        let min = min.max(1);
        let max = max.max(min);
        let mut brush = Self { radius: min, min, max };
        brush.set_radius(radius);
        brush
    }

    /// Apply a requested radius, clamped into bounds. Returns the radius in use.
    pub fn set_radius(&mut self, requested: i64) -> u32 {
        self.radius = requested.clamp(self.min as i64, self.max as i64) as u32;
        self.radius
    }

    /// Grow or shrink by `delta` pixels (keyboard / scroll wheel).
    pub fn step_radius(&mut self, delta: i64) -> u32 {
        self.set_radius((self.radius as i64).saturating_add(delta))
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn bounds(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

/// Progress of one pointer-down..pointer-up interaction.
/// A stroke is in progress exactly when there is a last position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stroke {
    last: Option<Point>,
}

impl Stroke {
    pub fn begin(&mut self, at: Point) {
        self.last = Some(at);
    }

    /// Move the stroke head to `to`; returns where it was.
    /// `None` means no stroke is in progress and nothing changed.
    pub fn extend(&mut self, to: Point) -> Option<Point> {
        let from = self.last?;
        self.last = Some(to);
        Some(from)
    }

    pub fn end(&mut self) {
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }

    pub fn last_position(&self) -> Option<Point> {
        self.last
    }
}

/// Erase a filled disc centred on `center`.
/// Returns how many pixels turned transparent.
pub fn erase_point(layer: &mut Layer, center: Point, radius: u32) -> usize {
    erase_segment(layer, center, center, radius)
}

/// Erase a capsule of width `2 * radius` from `from` to `to` (round caps).
/// Endpoints are clamped into the buffer first.
/// Returns how many pixels turned transparent.
pub fn erase_segment(layer: &mut Layer, from: Point, to: Point, radius: u32) -> usize {
    debug_assert!(layer.is_active(), "erasure routed to inactive layer {}", layer.index());
    if layer.is_empty() {
        return 0;
    }

    let w = layer.width() as i64;
    let h = layer.height() as i64;
    let (ax, ay) = clamp_to(from, w, h);
    let (bx, by) = clamp_to(to, w, h);
    // Anything past w + h already covers the whole buffer.
    let r = (radius as i64).min(w + h);
    let r2 = (r * r) as i128;

    let (dx, dy) = (bx - ax, by - ay);
    let len2 = (dx * dx + dy * dy) as i128;

    // Only the bounding box of the capsule can be touched.
    let x0 = (ax.min(bx) - r).max(0);
    let x1 = (ax.max(bx) + r).min(w - 1);
    let y0 = (ay.min(by) - r).max(0);
    let y1 = (ay.max(by) + r).min(h - 1);

    let mut erased = 0;
    for py in y0..=y1 {
        for px in x0..=x1 {
            let (ux, uy) = (px - ax, py - ay);
            let dot = (ux * dx + uy * dy) as i128;

            let inside = if dot <= 0 {
                // nearest to `from` (also the whole disc case)
                ((ux * ux + uy * uy) as i128) <= r2
            } else if dot >= len2 {
                let (vx, vy) = (px - bx, py - by);
                ((vx * vx + vy * vy) as i128) <= r2
            } else {
                // perpendicular distance^2 = cross^2 / len2
                let cross = (ux * dy - uy * dx) as i128;
                cross * cross <= r2 * len2
            };

            if inside && layer.erase_pixel(px as u32, py as u32) {
                erased += 1;
            }
        }
    }
    erased
}

#[inline]
fn clamp_to(p: Point, w: i64, h: i64) -> (i64, i64) {
    ((p.x as i64).clamp(0, w - 1), (p.y as i64).clamp(0, h - 1))
}
