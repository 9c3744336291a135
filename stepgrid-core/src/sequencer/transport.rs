//! Capabilities the step clock needs from the audio side.
//!
//! The engine implements these; the clock never touches audio nodes directly,
//! it only addresses samples by id.

use stepgrid_types::SampleId;

/// Handle for one repeating 16-step callback registered with a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleId(pub u64);

/// One firing of a scheduled grid callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub schedule: ScheduleId,
    /// Step number within the cycle, 0..16
    pub step: usize,
    /// Transport time in seconds at which the step sounds
    pub time: f64,
}

pub trait TransportClock {
    fn start(&mut self);
    fn stop(&mut self);
    fn set_tempo(&mut self, bpm: f32);
    /// Register a callback that fires once per 16th note, cycling through
    /// `steps` positions. Ticks are delivered to [`StepClock::on_tick`].
    ///
    /// [`StepClock::on_tick`]: super::StepClock::on_tick
    fn schedule_grid(&mut self, steps: usize) -> ScheduleId;
    fn cancel(&mut self, id: ScheduleId);
    /// Current transport time in seconds.
    fn now(&self) -> f64;
}

/// Something that can play a sample at a transport time.
pub trait Triggerable {
    fn trigger(&mut self, sample: SampleId, pitch: &str, time: f64);
}

/// Lifecycle of the engine's audio context.
pub trait AudioContext {
    fn is_running(&self) -> bool;
    fn resume(&mut self) -> Result<(), EngineError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    ResumeFailed(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResumeFailed(reason) => write!(f, "audio context could not resume: {}", reason),
        }
    }
}

impl std::error::Error for EngineError {}
