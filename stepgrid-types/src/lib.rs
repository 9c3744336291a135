//! # stepgrid-types
//!
//! Shared type definitions for the stepgrid sequencer.
//! This crate holds the pattern constants, the per-sample step grid and the
//! pack catalog used by stepgrid-core and the command line front end.

mod packs;
mod pattern;

pub use packs::{pack, sample_header, PackHeader, SampleHeader, PACKS};
pub use pattern::{PatternEntity, Sequence};

/// Number of steps in one cycle of every sample's grid.
pub const SEQUENCE_LENGTH: usize = 16;

pub const MIN_BPM: f32 = 60.0;
pub const MAX_BPM: f32 = 300.0;
pub const DEFAULT_BPM: f32 = 120.0;

/// Highest selectable pack index (`PACKS.len() - 1`).
pub const MAX_PACK_INDEX: i64 = 3;

/// Highest sample id across all packs.
pub const MAX_SAMPLE_ID: i64 = 31;

/// Schema version written into every shared pattern.
pub const PATTERN_VERSION: u32 = 1;

/// Note every sampler plays unless the user picks another one.
pub const DEFAULT_PITCH: &str = "C2";

/// Global identifier of a sample, unique across all packs (0..=31).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SampleId(u8);

impl SampleId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Convert a wire id, rejecting anything outside `0..=MAX_SAMPLE_ID`.
    pub fn from_wire(id: i64) -> Option<Self> {
        if (0..=MAX_SAMPLE_ID).contains(&id) {
            Some(Self(id as u8))
        } else {
            None
        }
    }
}

impl std::fmt::Display for SampleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
