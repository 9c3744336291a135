//! Size-reduced wire form of a [`PatternSnapshot`].
//!
//! Field names are single letters and every field holding its default value
//! is left out. Step grids travel as one 16-bit mask per sample, bit `i` set
//! when step `i` fires.

use serde::{Deserialize, Deserializer, Serialize};
use stepgrid_types::{Sequence, SEQUENCE_LENGTH};

use super::defaults::{
    flag_or_default, pitch_or_default, unless_default, DEFAULT_FLAG, DEFAULT_PACKED_SEQUENCE,
    DEFAULT_PITCH,
};
use super::snapshot::{PatternSnapshot, SampleSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactSample {
    /// Sample id
    pub i: i64,
    /// Packed step mask; only the low 16 bits are read.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_mask"
    )]
    pub q: Option<i64>,
    /// Pitch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,
    /// Delay send
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<bool>,
    /// Reverb send
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<bool>,
    /// Muted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactPattern {
    /// Schema version
    pub v: u32,
    /// Tempo
    pub b: f64,
    /// Selected pack index
    pub p: i64,
    /// Main high-pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<bool>,
    /// Main distortion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<bool>,
    pub s: Vec<CompactSample>,
}

/// Read a step mask from any JSON number. Fractions are truncated toward
/// zero and floats are reduced to their low 16 bits, so `17.0` reads as 17.
fn deserialize_mask<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(n) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Some(i) = n.as_i64() {
        return Ok(Some(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Some((u & 0xFFFF) as i64));
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => Ok(Some(f.trunc().rem_euclid(65536.0) as i64)),
        _ => Err(serde::de::Error::custom(format!("invalid step mask: {}", n))),
    }
}

/// Pack up to the first 16 steps into a mask, step 0 in the lowest bit.
pub fn pack_sequence(sequence: &[bool]) -> u16 {
    sequence
        .iter()
        .take(SEQUENCE_LENGTH)
        .enumerate()
        .fold(0u16, |acc, (i, &on)| acc | (u16::from(on) << i))
}

/// Expand a mask into a full grid. Bits above 15 are ignored.
pub fn unpack_sequence(packed: i64) -> Sequence {
    std::array::from_fn(|i| (packed >> i) & 1 == 1)
}

pub fn compress(snapshot: &PatternSnapshot) -> CompactPattern {
    CompactPattern {
        v: snapshot.version,
        b: snapshot.bpm,
        p: snapshot.selected_pack_index,
        h: unless_default(snapshot.main_highpass, DEFAULT_FLAG),
        d: unless_default(snapshot.main_distortion, DEFAULT_FLAG),
        s: snapshot.entities.iter().map(compress_sample).collect(),
    }
}

fn compress_sample(sample: &SampleSnapshot) -> CompactSample {
    CompactSample {
        i: sample.id,
        q: unless_default(pack_sequence(&sample.sequence), DEFAULT_PACKED_SEQUENCE).map(i64::from),
        t: unless_default(sample.pitch.as_str(), DEFAULT_PITCH).map(str::to_string),
        e: unless_default(sample.delay_active, DEFAULT_FLAG),
        r: unless_default(sample.reverb_active, DEFAULT_FLAG),
        m: unless_default(sample.muted, DEFAULT_FLAG),
    }
}

pub fn decompress(compact: CompactPattern) -> PatternSnapshot {
    PatternSnapshot {
        version: compact.v,
        bpm: compact.b,
        selected_pack_index: compact.p,
        main_highpass: flag_or_default(compact.h),
        main_distortion: flag_or_default(compact.d),
        entities: compact.s.into_iter().map(decompress_sample).collect(),
    }
}

fn decompress_sample(sample: CompactSample) -> SampleSnapshot {
    let packed = sample.q.unwrap_or(i64::from(DEFAULT_PACKED_SEQUENCE));
    SampleSnapshot {
        id: sample.i,
        sequence: unpack_sequence(packed).to_vec(),
        pitch: pitch_or_default(sample.t),
        delay_active: flag_or_default(sample.e),
        reverb_active: flag_or_default(sample.r),
        muted: flag_or_default(sample.m),
    }
}
