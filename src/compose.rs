// Flatten the layer stack into the window's framebuffer.
// Visual: the active layer on top; wherever it has been scratched through,
// the next layer shows, then the next, and finally the background colour.
// Cleared layers are hidden outright, even their last opaque 1%.

use crate::layer::{Layer, TRANSPARENT};
use crate::sequencer::LayerSequencer;
use crate::types::{pack_rgb, FrameBuffer};

/// Redraw `frame` from the stack. `frame` is resized to the layer size.
pub fn compose(seq: &LayerSequencer, frame: &mut FrameBuffer, background: u32) {
    let (w, h) = seq.size();
    frame.resize(w as usize, h as usize);

    let visible: Vec<&Layer> = match seq.current_layer_index() {
        Some(i) => seq.layers()[i..].iter().filter(|l| !l.is_cleared()).collect(),
        None => Vec::new(),
    };

    for (idx, out) in frame.pixels.iter_mut().enumerate() {
        let (x, y) = ((idx % w as usize) as u32, (idx / w as usize) as u32);
        *out = visible
            .iter()
            .map(|layer| layer.buffer().get_pixel(x, y))
            .find(|px| px[3] != TRANSPARENT)
            .map_or(background, |px| pack_rgb(px[0], px[1], px[2]));
    }
}
