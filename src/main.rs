// What you SEE:
// • A stack of pictures; only the top one is visible at first.
// • Hold Left Mouse and drag: you scratch the top picture away.
// • Once it is (almost) all gone, it disappears and the next picture is up.
// • R brings every layer back. [ / ] or the scroll wheel change brush size.
// • Resizing the window starts over at the new size. ESC quits.

mod assets;
mod config;
mod draw;
mod error;

use config::Config;
use draw::{draw_cursor_ring, draw_text_5x7, hud_text, Drawer};
use error::Error;
use scratch_reveal::brush::Brush;
use scratch_reveal::compose::compose;
use scratch_reveal::input::{map_to_buffer, PointerTracker};
use scratch_reveal::{FrameBuffer, InputEvent, LayerSequencer, ScratchController};

fn main() -> Result<(), Error> {
    // RUST_LOG=debug for brush clamping, trace for every erased segment
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    /* --- Settings + artwork --- */
    let config = Config::from_args(std::env::args_os().skip(1))?;
    let sources = assets::load_sources(&config.layers);
    log::info!("{} layers, clearance mode {:?}", sources.len(), config.clearance);

    /* --- Window + scratch state ---
       Visual: window opens showing the top layer, untouched. */
    let mut drawer = Drawer::new("Scratch Reveal", config.window.width, config.window.height)?;
    let (w, h) = drawer.size();
    let sequencer = LayerSequencer::new(sources, w as u32, h as u32, config.clearance);
    let brush = Brush::new(config.brush.radius, config.brush.min, config.brush.max);
    log::info!("brush radius {} px, allowed {:?}", brush.radius(), brush.bounds());
    let mut scratch = ScratchController::new(sequencer, brush);
    let brush_step = config.brush.step.max(1) as i64;

    let mut screen = FrameBuffer::new(w, h);
    let mut pointer = PointerTracker::default();

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Viewport: a changed size rebuilds every layer (no-op otherwise). */
        let display = drawer.size();
        scratch.handle(InputEvent::Resize { width: display.0 as u32, height: display.1 as u32 });

        /* 2) Keys */
        if drawer.r_pressed_once() {
            scratch.handle(InputEvent::Reset);
        }
        let notches = drawer.brush_notches();
        if notches != 0 {
            scratch.handle(InputEvent::BrushSizeStepped(notches * brush_step));
        }

        /* 3) Pointer -> stroke events (only the active layer is touched). */
        let buffer_size = scratch.sequencer().size();
        let held_at = drawer.mouse_pos_clamped().map(|p| map_to_buffer(p, display, buffer_size));
        if let Some(event) = pointer.poll(drawer.left_mouse_down(), held_at) {
            scratch.handle(event);
        }

        /* 4) Flatten the stack, then cursor ring and HUD on top. */
        compose(scratch.sequencer(), &mut screen, config.background);

        if let Some(p) = drawer.mouse_pos_inside() {
            let at = map_to_buffer(p, display, buffer_size);
            draw_cursor_ring(&mut screen, at.x, at.y, scratch.brush_radius(), 0x00_F0_F0_F0);
        }

        let hud = hud_text(
            scratch.current_layer_index(),
            scratch.sequencer().layer_count(),
            scratch.sequencer().active_ratio().unwrap_or(1.0),
            scratch.brush_radius(),
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 5) Present to the window (this is when the on-screen image updates).
           A minimized window has no pixels; just keep pumping its events. */
        if screen.pixels.is_empty() {
            drawer.pump();
        } else {
            drawer.present(&screen)?;
        }
    }

    Ok(())
}
