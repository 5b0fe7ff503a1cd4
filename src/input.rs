// Pointer glue between the host window and the controller.
// The window only tells us "is the button held" and "where is the mouse" each
// frame; `PointerTracker` turns those samples into discrete stroke events.

use crate::controller::InputEvent;
use crate::types::Point;

/// Host position -> layer-local buffer pixel.
/// Linear scale by buffer size / displayed size, then floor.
pub fn map_to_buffer(pos: (f32, f32), display: (usize, usize), buffer: (u32, u32)) -> Point {
    let (dw, dh) = (display.0.max(1) as f32, display.1.max(1) as f32);
    let x = (pos.0 / dw * buffer.0 as f32).floor();
    let y = (pos.1 / dh * buffer.1 as f32).floor();
    // `as` saturates, so wild positions stay representable; the brush clamps
    Point::new(x as i32, y as i32)
}

/// Edge detector over polled pointer state.
#[derive(Debug, Default)]
pub struct PointerTracker {
    down: bool,
    last: Option<Point>,
}

impl PointerTracker {
    /// Feed one sample. `pos` is `None` when the host has no position.
    pub fn poll(&mut self, down: bool, pos: Option<Point>) -> Option<InputEvent> {
        match (self.down, down) {
            // released anywhere ends the stroke
            (true, false) => {
                self.down = false;
                self.last = None;
                Some(InputEvent::PointerUp)
            }
            (false, true) => {
                let at = pos?;
                self.down = true;
                self.last = Some(at);
                Some(InputEvent::PointerDown(at))
            }
            (true, true) => {
                let at = pos?;
                if self.last == Some(at) {
                    return None;
                }
                self.last = Some(at);
                Some(InputEvent::PointerMove(at))
            }
            (false, false) => None,
        }
    }
}
