//! Detached copy of the editable pattern, the unit of sharing.
//!
//! Integer fields are wider than the live types so that out-of-range values
//! coming off the wire survive until the validator can reject them by name.

use serde::{Deserialize, Serialize};
use stepgrid_types::{PatternEntity, PATTERN_VERSION};

use crate::state::PatternState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSnapshot {
    pub id: i64,
    pub sequence: Vec<bool>,
    pub pitch: String,
    pub delay_active: bool,
    pub reverb_active: bool,
    pub muted: bool,
}

impl SampleSnapshot {
    pub fn from_entity(entity: &PatternEntity) -> Self {
        Self {
            id: i64::from(entity.id.get()),
            sequence: entity.sequence.to_vec(),
            pitch: entity.pitch.clone(),
            delay_active: entity.delay_active,
            reverb_active: entity.reverb_active,
            muted: entity.muted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternSnapshot {
    pub version: u32,
    pub bpm: f64,
    pub selected_pack_index: i64,
    pub main_highpass: bool,
    pub main_distortion: bool,
    pub entities: Vec<SampleSnapshot>,
}

/// Capture the live pattern. Nothing in the result aliases `state`.
pub fn serialize(bpm: f32, state: &PatternState) -> PatternSnapshot {
    PatternSnapshot {
        version: PATTERN_VERSION,
        bpm: f64::from(bpm),
        selected_pack_index: state.selected_pack_index() as i64,
        main_highpass: state.main_highpass,
        main_distortion: state.main_distortion,
        entities: state.entities().iter().map(SampleSnapshot::from_entity).collect(),
    }
}
