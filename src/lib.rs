// Scratch-reveal core: a stack of opaque layers erased by brush strokes.
// Nothing in here touches a window or the file system, so the whole state
// machine runs in tests from a plain list of input events.

pub mod brush;
pub mod clearance;
pub mod compose;
pub mod controller;
pub mod input;
pub mod layer;
pub mod sequencer;
pub mod types;

pub use controller::{InputEvent, ScratchController};
pub use sequencer::{LayerSequencer, SequencerState};
pub use types::{FrameBuffer, Point};
