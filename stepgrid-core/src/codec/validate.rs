//! Gatekeeper for snapshots coming from outside the process.
//!
//! Field types (booleans in the step grid, strings for pitch) are already
//! enforced when the token is parsed; this checks versions, ranges and
//! lengths.

use stepgrid_types::{
    MAX_BPM, MAX_PACK_INDEX, MAX_SAMPLE_ID, MIN_BPM, PATTERN_VERSION, SEQUENCE_LENGTH,
};

use super::snapshot::PatternSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Version(u32),
    Bpm(f64),
    PackIndex(i64),
    SampleId(i64),
    SequenceLength { id: i64, len: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Version(v) => write!(f, "invalid pattern version: {}", v),
            Self::Bpm(bpm) => write!(f, "invalid bpm: {} (expected {}..={})", bpm, MIN_BPM, MAX_BPM),
            Self::PackIndex(p) => {
                write!(f, "invalid pack index: {} (expected 0..={})", p, MAX_PACK_INDEX)
            }
            Self::SampleId(id) => {
                write!(f, "invalid sample id: {} (expected 0..={})", id, MAX_SAMPLE_ID)
            }
            Self::SequenceLength { id, len } => write!(
                f,
                "invalid sequence length for sample {}: {} (expected {})",
                id, len, SEQUENCE_LENGTH
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Return the first rule `snapshot` breaks.
pub fn check(snapshot: &PatternSnapshot) -> Result<(), ValidationError> {
    if snapshot.version != PATTERN_VERSION {
        return Err(ValidationError::Version(snapshot.version));
    }
    // compared at full width so values just outside a bound do not round onto it;
    // NaN fails the range check
    if !(f64::from(MIN_BPM)..=f64::from(MAX_BPM)).contains(&snapshot.bpm) {
        return Err(ValidationError::Bpm(snapshot.bpm));
    }
    if !(0..=MAX_PACK_INDEX).contains(&snapshot.selected_pack_index) {
        return Err(ValidationError::PackIndex(snapshot.selected_pack_index));
    }
    for sample in &snapshot.entities {
        if !(0..=MAX_SAMPLE_ID).contains(&sample.id) {
            return Err(ValidationError::SampleId(sample.id));
        }
        if sample.sequence.len() != SEQUENCE_LENGTH {
            return Err(ValidationError::SequenceLength {
                id: sample.id,
                len: sample.sequence.len(),
            });
        }
    }
    Ok(())
}

/// Pass `snapshot` through if it satisfies every rule, otherwise log why not.
pub fn validate(snapshot: PatternSnapshot) -> Option<PatternSnapshot> {
    match check(&snapshot) {
        Ok(()) => Some(snapshot),
        Err(e) => {
            log::warn!(target: "codec", "rejecting pattern: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::snapshot::SampleSnapshot;

    fn valid() -> PatternSnapshot {
        PatternSnapshot {
            version: PATTERN_VERSION,
            bpm: 120.0,
            selected_pack_index: 0,
            main_highpass: false,
            main_distortion: false,
            entities: vec![SampleSnapshot {
                id: 0,
                sequence: vec![false; SEQUENCE_LENGTH],
                pitch: "C2".into(),
                delay_active: false,
                reverb_active: false,
                muted: false,
            }],
        }
    }

    fn with_bpm(bpm: f64) -> PatternSnapshot {
        PatternSnapshot { bpm, ..valid() }
    }

    fn with_pack(p: i64) -> PatternSnapshot {
        PatternSnapshot { selected_pack_index: p, ..valid() }
    }

    fn with_sample_id(id: i64) -> PatternSnapshot {
        let mut s = valid();
        s.entities[0].id = id;
        s
    }

    #[test]
    fn accepts_valid() {
        assert_eq!(check(&valid()), Ok(()));
        assert_eq!(validate(valid()), Some(valid()));
    }

    #[test]
    fn version_must_match() {
        let s = PatternSnapshot { version: 2, ..valid() };
        assert_eq!(check(&s), Err(ValidationError::Version(2)));
        assert!(validate(s).is_none());
    }

    #[test]
    fn bpm_bounds() {
        assert!(validate(with_bpm(60.0)).is_some());
        assert!(validate(with_bpm(300.0)).is_some());
        assert!(validate(with_bpm(59.0)).is_none());
        assert!(validate(with_bpm(301.0)).is_none());
        assert!(validate(with_bpm(f64::NAN)).is_none());
        assert!(validate(with_bpm(f64::INFINITY)).is_none());
    }

    #[test]
    fn bpm_just_outside_bounds() {
        assert_eq!(check(&with_bpm(300.00001)), Err(ValidationError::Bpm(300.00001)));
        assert_eq!(check(&with_bpm(59.999999)), Err(ValidationError::Bpm(59.999999)));
        assert!(validate(with_bpm(299.99999)).is_some());
    }

    #[test]
    fn pack_index_bounds() {
        assert!(validate(with_pack(0)).is_some());
        assert!(validate(with_pack(3)).is_some());
        assert_eq!(check(&with_pack(-1)), Err(ValidationError::PackIndex(-1)));
        assert_eq!(check(&with_pack(4)), Err(ValidationError::PackIndex(4)));
    }

    #[test]
    fn sample_id_bounds() {
        assert!(validate(with_sample_id(0)).is_some());
        assert!(validate(with_sample_id(31)).is_some());
        assert_eq!(check(&with_sample_id(-1)), Err(ValidationError::SampleId(-1)));
        assert_eq!(check(&with_sample_id(32)), Err(ValidationError::SampleId(32)));
    }

    #[test]
    fn sequence_length_is_fixed() {
        let mut s = valid();
        s.entities[0].sequence.push(true);
        assert_eq!(
            check(&s),
            Err(ValidationError::SequenceLength { id: 0, len: 17 })
        );
        s.entities[0].sequence.truncate(15);
        assert!(validate(s).is_none());
    }

    #[test]
    fn any_pitch_string_is_accepted() {
        let mut s = valid();
        s.entities[0].pitch = String::new();
        assert_eq!(check(&s), Ok(()));
        s.entities[0].pitch = "not a note".into();
        assert_eq!(check(&s), Ok(()));
    }

    #[test]
    fn empty_sample_list_is_valid() {
        let s = PatternSnapshot { entities: vec![], ..valid() };
        assert!(validate(s).is_some());
    }

    #[test]
    fn error_messages_name_the_field() {
        assert_eq!(
            ValidationError::PackIndex(4).to_string(),
            "invalid pack index: 4 (expected 0..=3)"
        );
        assert!(ValidationError::Bpm(59.0).to_string().starts_with("invalid bpm: 59"));
    }
}
