// Single owner of all scratch state: layers (via the sequencer), brush size
// and the stroke in progress. Input arrives as `InputEvent`s and is handled
// synchronously, one at a time.

use crate::brush::{self, Brush, Stroke};
use crate::sequencer::{LayerSequencer, SequencerState};
use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    Resize { width: u32, height: u32 },
    Reset,
    BrushSizeChanged(i64),
    /// Relative nudge in pixels, e.g. from keys or the scroll wheel.
    BrushSizeStepped(i64),
}

pub struct ScratchController {
    sequencer: LayerSequencer,
    brush: Brush,
    stroke: Stroke,
}

impl ScratchController {
    pub fn new(sequencer: LayerSequencer, brush: Brush) -> Self {
        Self { sequencer, brush, stroke: Stroke::default() }
    }

    /// Apply one event. Returns the sequencer transition it caused, if any.
    pub fn handle(&mut self, event: InputEvent) -> Option<SequencerState> {
        match event {
            InputEvent::PointerDown(at) => {
                // nothing left to scratch: don't start a stroke
                let layer = self.sequencer.active_layer_mut()?;
                self.stroke.begin(at);
                let erased = brush::erase_point(layer, at, self.brush.radius());
                log::trace!("dot at ({}, {}) erased {erased} px", at.x, at.y);
                self.evaluate()
            }
            InputEvent::PointerMove(to) => {
                let from = self.stroke.last_position()?;
                let Some(layer) = self.sequencer.active_layer_mut() else {
                    // last layer went away mid-stroke
                    self.stroke.end();
                    return None;
                };
                self.stroke.extend(to);
                let erased = brush::erase_segment(layer, from, to, self.brush.radius());
                log::trace!("segment to ({}, {}) erased {erased} px", to.x, to.y);
                self.evaluate()
            }
            InputEvent::PointerUp => {
                self.stroke.end();
                None
            }
            InputEvent::Resize { width, height } => {
                // same size: keep the stroke and the progress
                if !self.sequencer.resize(width, height) {
                    return None;
                }
                self.stroke.end();
                log::info!("viewport now {width}x{height}, layers rebuilt");
                Some(self.sequencer.state())
            }
            InputEvent::Reset => {
                self.stroke.end();
                self.sequencer.reset();
                log::info!("reset: back to the top layer");
                Some(self.sequencer.state())
            }
            InputEvent::BrushSizeChanged(requested) => {
                let radius = self.brush.set_radius(requested);
                if radius as i64 != requested {
                    log::debug!("brush radius {requested} clamped to {radius}");
                }
                None
            }
            InputEvent::BrushSizeStepped(delta) => {
                let radius = self.brush.step_radius(delta);
                log::debug!("brush radius {radius}");
                None
            }
        }
    }

    fn evaluate(&mut self) -> Option<SequencerState> {
        let next = self.sequencer.evaluate()?;
        match next {
            SequencerState::Active(i) => log::info!("layer {} cleared, layer {} is up", i - 1, i),
            SequencerState::AllCleared => log::info!("all layers cleared"),
        }
        Some(next)
    }

    pub fn sequencer(&self) -> &LayerSequencer {
        &self.sequencer
    }

    pub fn current_layer_index(&self) -> Option<usize> {
        self.sequencer.current_layer_index()
    }

    pub fn is_all_cleared(&self) -> bool {
        self.sequencer.is_all_cleared()
    }

    pub fn is_cleared(&self, i: usize) -> bool {
        self.sequencer.is_cleared(i)
    }

    pub fn brush_radius(&self) -> u32 {
        self.brush.radius()
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clearance::ClearanceMode;
    use crate::input::PointerTracker;
    use crate::layer::{OPAQUE, TRANSPARENT};
    use image::{Rgba, RgbaImage};
    use std::sync::Arc;

    fn controller(layers: usize, radius: i64) -> ScratchController {
        controller_with_max(layers, radius, 150)
    }

    fn controller_with_max(layers: usize, radius: i64, max: u32) -> ScratchController {
        let sources = (0..layers)
            .map(|_| Arc::new(RgbaImage::from_pixel(3, 3, Rgba([9, 9, 9, 255]))))
            .collect();
        let seq = LayerSequencer::new(sources, 100, 100, ClearanceMode::Incremental);
        ScratchController::new(seq, Brush::new(radius, 1, max))
    }

    fn top_alpha(c: &ScratchController, x: u32, y: u32) -> u8 {
        c.sequencer().layers()[0].alpha_at(x, y)
    }

    #[test]
    fn big_dot_on_press_advances_immediately() {
        let mut c = controller(3, 75);
        let next = c.handle(InputEvent::PointerDown(Point::new(50, 50)));

        assert_eq!(next, Some(SequencerState::Active(1)));
        assert_eq!(c.current_layer_index(), Some(1));
        assert!(!c.sequencer().layers()[0].is_active());
        assert!(c.is_cleared(0));
        // layer below untouched
        assert!(c.sequencer().layers()[1].buffer().pixels().all(|p| p[3] == OPAQUE));
    }

    #[test]
    fn drag_erases_connected_path() {
        let mut c = controller(2, 3);
        c.handle(InputEvent::PointerDown(Point::new(5, 5)));
        c.handle(InputEvent::PointerMove(Point::new(90, 5)));
        c.handle(InputEvent::PointerUp);

        for x in 5..=90 {
            assert_eq!(top_alpha(&c, x, 5), TRANSPARENT);
        }
        assert!(!c.stroke().is_active());
        assert_eq!(c.stroke().last_position(), None);
    }

    #[test]
    fn hover_without_press_erases_nothing() {
        let mut c = controller(1, 10);
        assert_eq!(c.handle(InputEvent::PointerMove(Point::new(50, 50))), None);
        assert_eq!(c.sequencer().layers()[0].transparent_pixels(), 0);
    }

    #[test]
    fn brush_change_applies_mid_stroke() {
        let mut c = controller(1, 2);
        c.handle(InputEvent::PointerDown(Point::new(10, 50)));
        c.handle(InputEvent::BrushSizeChanged(10));
        c.handle(InputEvent::PointerMove(Point::new(40, 50)));

        assert_eq!(c.brush_radius(), 10);
        assert_eq!(top_alpha(&c, 25, 58), TRANSPARENT);
        assert_eq!(top_alpha(&c, 10, 58), TRANSPARENT);
        assert_eq!(top_alpha(&c, 25, 61), OPAQUE);

        c.handle(InputEvent::BrushSizeChanged(-5));
        assert_eq!(c.brush_radius(), 1);
    }

    #[test]
    fn stroke_carries_on_to_next_layer() {
        let mut c = controller(2, 75);
        c.handle(InputEvent::PointerDown(Point::new(50, 50)));
        assert_eq!(c.current_layer_index(), Some(1));

        c.handle(InputEvent::BrushSizeChanged(2));
        c.handle(InputEvent::PointerMove(Point::new(60, 50)));
        let next = &c.sequencer().layers()[1];
        assert_eq!(next.alpha_at(55, 50), TRANSPARENT);
    }

    #[test]
    fn last_layer_cleared_stops_everything() {
        let mut c = controller(1, 75);
        assert_eq!(
            c.handle(InputEvent::PointerDown(Point::new(50, 50))),
            Some(SequencerState::AllCleared)
        );
        assert!(c.is_all_cleared());

        assert_eq!(c.handle(InputEvent::PointerMove(Point::new(10, 10))), None);
        assert!(!c.stroke().is_active());
        assert_eq!(c.handle(InputEvent::PointerDown(Point::new(1, 1))), None);
        assert!(!c.stroke().is_active());
    }

    #[test]
    fn reset_mid_stroke_after_advancing() {
        let mut c = controller(2, 75);
        c.handle(InputEvent::PointerUp);
        c.handle(InputEvent::PointerDown(Point::new(50, 50)));
        c.handle(InputEvent::BrushSizeChanged(5));
        c.handle(InputEvent::PointerMove(Point::new(20, 20)));
        assert_eq!(c.current_layer_index(), Some(1));

        assert_eq!(c.handle(InputEvent::Reset), Some(SequencerState::Active(0)));
        assert!(!c.stroke().is_active());
        for layer in c.sequencer().layers() {
            assert!(layer.buffer().pixels().all(|p| p[3] == OPAQUE));
        }
        // the held pointer no longer draws
        assert_eq!(c.handle(InputEvent::PointerMove(Point::new(30, 30))), None);
        assert_eq!(c.sequencer().layers()[0].transparent_pixels(), 0);
    }

    #[test]
    fn resize_discards_progress() {
        let mut c = controller(2, 4);
        c.handle(InputEvent::PointerDown(Point::new(50, 50)));
        assert_eq!(c.handle(InputEvent::Resize { width: 100, height: 100 }), None);
        assert!(c.sequencer().layers()[0].transparent_pixels() > 0);

        let next = c.handle(InputEvent::Resize { width: 80, height: 60 });
        assert_eq!(next, Some(SequencerState::Active(0)));
        assert_eq!(c.sequencer().layers()[0].transparent_pixels(), 0);
        assert_eq!(c.sequencer().size(), (80, 60));
    }

    #[test]
    fn drag_survives_per_frame_resize() {
        // frame loop order: viewport check, then pointer sample
        let mut c = controller(1, 2);
        let mut pointer = PointerTracker::default();
        for x in [10, 30, 50, 70, 90] {
            c.handle(InputEvent::Resize { width: 100, height: 100 });
            if let Some(event) = pointer.poll(true, Some(Point::new(x, 50))) {
                c.handle(event);
            }
            assert!(c.stroke().is_active());
        }

        for x in 10..=90 {
            assert_eq!(top_alpha(&c, x, 50), TRANSPARENT, "gap at x = {x}");
        }
    }

    #[test]
    fn real_resize_ends_the_stroke() {
        let mut c = controller(1, 2);
        c.handle(InputEvent::PointerDown(Point::new(10, 10)));
        assert!(c.stroke().is_active());

        c.handle(InputEvent::Resize { width: 100, height: 100 });
        assert!(c.stroke().is_active());

        c.handle(InputEvent::Resize { width: 120, height: 90 });
        assert!(!c.stroke().is_active());
        assert_eq!(c.handle(InputEvent::PointerMove(Point::new(60, 10))), None);
        assert_eq!(c.sequencer().layers()[0].transparent_pixels(), 0);
    }

    #[test]
    fn giant_brush_from_settings_clears_instead_of_panicking() {
        let mut c = controller_with_max(2, i64::MAX, u32::MAX);
        assert_eq!(c.brush_radius(), u32::MAX);
        assert_eq!(
            c.handle(InputEvent::PointerDown(Point::new(50, 50))),
            Some(SequencerState::Active(1))
        );
    }

    #[test]
    fn brush_steps_are_relative_and_clamped() {
        let mut c = controller(1, 24);
        c.handle(InputEvent::BrushSizeStepped(4));
        assert_eq!(c.brush_radius(), 28);
        c.handle(InputEvent::BrushSizeStepped(-100));
        assert_eq!(c.brush_radius(), 1);
        c.handle(InputEvent::BrushSizeStepped(i64::MAX));
        assert_eq!(c.brush_radius(), 150);
    }

    #[test]
    fn never_skips_a_layer() {
        let mut c = controller(3, 75);
        let mut states = Vec::new();
        for _ in 0..5 {
            if let Some(s) = c.handle(InputEvent::PointerDown(Point::new(50, 50))) {
                states.push(s);
            }
            c.handle(InputEvent::PointerUp);
        }
        assert_eq!(
            states,
            vec![
                SequencerState::Active(1),
                SequencerState::Active(2),
                SequencerState::AllCleared
            ]
        );
    }
}
