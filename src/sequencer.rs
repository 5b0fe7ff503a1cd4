// Which layer is being scratched, and when control moves to the next one.
//
// ```text
// Active(0) -> Active(1) -> ... -> Active(n-1) -> AllCleared
//     ^___________________ reset / resize ____________|
// ```
//
// Only the active layer is ever handed out mutably, so erasure can't land on
// a layer the sequencer isn't watching and at most one advance happens per
// evaluation.

use std::sync::Arc;

use image::RgbaImage;

use crate::clearance::{self, ClearanceMode};
use crate::layer::Layer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    Active(usize),
    AllCleared,
}

pub struct LayerSequencer {
    layers: Vec<Layer>,
    state: SequencerState,
    mode: ClearanceMode,
    width: u32,
    height: u32,
}

impl LayerSequencer {
    /// One layer per source, index 0 on top. Starts in `Active(0)`.
    pub fn new(sources: Vec<Arc<RgbaImage>>, width: u32, height: u32, mode: ClearanceMode) -> Self {
        let layers = sources
            .into_iter()
            .enumerate()
            .map(|(i, src)| Layer::new(i, src, width, height))
            .collect();

        let mut seq = Self { layers, state: SequencerState::AllCleared, mode, width, height };
        seq.restart();
        seq
    }

    /// Rebuild every layer from its source and go back to `Active(0)`.
    pub fn reset(&mut self) {
        for layer in &mut self.layers {
            layer.reset(self.width, self.height);
        }
        self.restart();
    }

    /// New viewport size. Progress is discarded; same size is a no-op.
    /// Returns true if the layers were rebuilt.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if (width, height) == (self.width, self.height) {
            return false;
        }
        self.width = width;
        self.height = height;
        self.reset();
        true
    }

    fn restart(&mut self) {
        self.state = if self.layers.is_empty() {
            SequencerState::AllCleared
        } else {
            SequencerState::Active(0)
        };
        for layer in &mut self.layers {
            layer.set_active(false);
        }
        if let Some(top) = self.layers.first_mut() {
            top.set_active(true);
        }
    }

    /// Check the active layer after an erasure; advance at most one step.
    /// Returns the new state if a transition happened.
    pub fn evaluate(&mut self) -> Option<SequencerState> {
        let SequencerState::Active(i) = self.state else {
            return None;
        };

        let layer = &mut self.layers[i];
        if !clearance::is_cleared(layer, self.mode) {
            return None;
        }
        layer.mark_cleared();

        self.state = if i + 1 < self.layers.len() {
            self.layers[i + 1].set_active(true);
            SequencerState::Active(i + 1)
        } else {
            SequencerState::AllCleared
        };
        Some(self.state)
    }

    /// How far the active layer has been scratched, 0.0..=1.0.
    pub fn active_ratio(&self) -> Option<f64> {
        let i = self.current_layer_index()?;
        Some(clearance::evaluate(&self.layers[i], self.mode))
    }

    /// The one layer that accepts erasure, if any.
    pub fn active_layer_mut(&mut self) -> Option<&mut Layer> {
        match self.state {
            SequencerState::Active(i) => self.layers.get_mut(i),
            SequencerState::AllCleared => None,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn current_layer_index(&self) -> Option<usize> {
        match self.state {
            SequencerState::Active(i) => Some(i),
            SequencerState::AllCleared => None,
        }
    }

    pub fn is_all_cleared(&self) -> bool {
        self.state == SequencerState::AllCleared
    }

    /// Whether layer `i` has been scratched off. Out of range is `false`.
    pub fn is_cleared(&self, i: usize) -> bool {
        self.layers.get(i).is_some_and(Layer::is_cleared)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
