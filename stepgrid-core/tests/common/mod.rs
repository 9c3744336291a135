#![allow(dead_code)]

use stepgrid_core::sequencer::{AudioContext, EngineError, ScheduleId, Tick, TransportClock, Triggerable};
use stepgrid_types::SampleId;

/// Transport whose ticks are fired by hand.
#[derive(Default)]
pub struct ManualTransport {
    pub running: bool,
    pub tempo: f32,
    pub starts: usize,
    pub stops: usize,
    next_id: u64,
    pub live: Vec<ScheduleId>,
    pub cancelled: Vec<ScheduleId>,
}

impl ManualTransport {
    /// One tick for every live schedule at `step`.
    pub fn ticks_for_step(&self, step: usize, time: f64) -> Vec<Tick> {
        self.live
            .iter()
            .map(|&schedule| Tick { schedule, step, time })
            .collect()
    }
}

impl TransportClock for ManualTransport {
    fn start(&mut self) {
        self.running = true;
        self.starts += 1;
    }

    fn stop(&mut self) {
        self.running = false;
        self.stops += 1;
    }

    fn set_tempo(&mut self, bpm: f32) {
        self.tempo = bpm;
    }

    fn schedule_grid(&mut self, _steps: usize) -> ScheduleId {
        self.next_id += 1;
        let id = ScheduleId(self.next_id);
        self.live.push(id);
        id
    }

    fn cancel(&mut self, id: ScheduleId) {
        self.live.retain(|s| *s != id);
        self.cancelled.push(id);
    }

    fn now(&self) -> f64 {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub sample: SampleId,
    pub pitch: String,
    pub time: f64,
}

#[derive(Default)]
pub struct RecordingEngine {
    pub suspended: bool,
    pub fail_resume: bool,
    pub hits: Vec<Hit>,
}

impl RecordingEngine {
    pub fn suspended() -> Self {
        Self { suspended: true, ..Default::default() }
    }

    pub fn hit_ids(&self) -> Vec<u8> {
        self.hits.iter().map(|h| h.sample.get()).collect()
    }
}

impl AudioContext for RecordingEngine {
    fn is_running(&self) -> bool {
        !self.suspended
    }

    fn resume(&mut self) -> Result<(), EngineError> {
        if self.fail_resume {
            return Err(EngineError::ResumeFailed("device unavailable".into()));
        }
        self.suspended = false;
        Ok(())
    }
}

impl Triggerable for RecordingEngine {
    fn trigger(&mut self, sample: SampleId, pitch: &str, time: f64) {
        self.hits.push(Hit { sample, pitch: pitch.to_string(), time });
    }
}
