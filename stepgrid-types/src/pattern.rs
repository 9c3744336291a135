//! Per-sample step grid.

use serde::{Deserialize, Serialize};

use crate::{SampleId, DEFAULT_PITCH, SEQUENCE_LENGTH};

/// One cycle of on/off steps, index = step number.
pub type Sequence = [bool; SEQUENCE_LENGTH];

/// Editable state of one sample slot in the loaded pack.
///
/// The engine owns the audio nodes for the sample; this struct only carries
/// the parameters that end up in a shared pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEntity {
    pub id: SampleId,
    pub sequence: Sequence,
    pub pitch: String,
    pub delay_active: bool,
    pub reverb_active: bool,
    pub muted: bool,
}

impl PatternEntity {
    pub fn new(id: SampleId) -> Self {
        Self {
            id,
            sequence: [false; SEQUENCE_LENGTH],
            pitch: DEFAULT_PITCH.to_string(),
            delay_active: false,
            reverb_active: false,
            muted: false,
        }
    }

    /// Whether `step` fires. Steps past the grid never fire.
    pub fn is_active(&self, step: usize) -> bool {
        self.sequence.get(step).copied().unwrap_or(false)
    }

    /// Flip a step. Returns the new value, or `None` if `step` is off the grid.
    pub fn toggle_step(&mut self, step: usize) -> Option<bool> {
        let slot = self.sequence.get_mut(step)?;
        *slot = !*slot;
        Some(*slot)
    }

    pub fn set_step(&mut self, step: usize, active: bool) -> bool {
        match self.sequence.get_mut(step) {
            Some(slot) => {
                *slot = active;
                true
            }
            None => false,
        }
    }

    pub fn active_steps(&self) -> usize {
        self.sequence.iter().filter(|s| **s).count()
    }

    /// Clear every step; pitch and flags are kept.
    pub fn clear(&mut self) {
        self.sequence = [false; SEQUENCE_LENGTH];
    }
}
