//! Software transport driven by elapsed wall time.
//!
//! Used where no audio engine owns the timeline (the headless player and
//! tests). The caller feeds elapsed time to [`OfflineTransport::advance`]
//! and forwards the returned ticks to the step clock.

use std::time::Duration;

use super::transport::{ScheduleId, Tick, TransportClock};

/// Delay between `start()` and the first step, leaving the engine time to
/// schedule it.
pub const START_OFFSET_SECS: f64 = 0.1;

const STEPS_PER_BEAT: f64 = 4.0;

pub struct OfflineTransport {
    running: bool,
    bpm: f32,
    /// Transport time in seconds since `start()`
    position: f64,
    next_step_time: f64,
    step_counter: usize,
    next_id: u64,
    schedules: Vec<(ScheduleId, usize)>,
}

impl OfflineTransport {
    pub fn new(bpm: f32) -> Self {
        Self {
            running: false,
            bpm,
            position: 0.0,
            next_step_time: START_OFFSET_SECS,
            step_counter: 0,
            next_id: 0,
            schedules: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tempo(&self) -> f32 {
        self.bpm
    }

    pub fn live_schedules(&self) -> usize {
        self.schedules.len()
    }

    /// Length of one 16th note at the current tempo.
    pub fn step_duration(&self) -> f64 {
        60.0 / (self.bpm as f64 * STEPS_PER_BEAT)
    }

    /// Move the timeline forward and collect every tick that came due,
    /// one per live schedule per step, in time order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Tick> {
        let mut ticks = Vec::new();
        if !self.running {
            return ticks;
        }
        self.position += elapsed.as_secs_f64();

        while self.next_step_time <= self.position {
            for &(schedule, steps) in &self.schedules {
                ticks.push(Tick {
                    schedule,
                    step: self.step_counter % steps.max(1),
                    time: self.next_step_time,
                });
            }
            self.step_counter += 1;
            // tempo changes apply from the next step on
            self.next_step_time += self.step_duration();
        }
        ticks
    }
}

impl TransportClock for OfflineTransport {
    fn start(&mut self) {
        self.running = true;
        self.position = 0.0;
        self.next_step_time = START_OFFSET_SECS;
        self.step_counter = 0;
    }

    fn stop(&mut self) {
        self.running = false;
        self.position = 0.0;
    }

    fn set_tempo(&mut self, bpm: f32) {
        self.bpm = bpm;
    }

    fn schedule_grid(&mut self, steps: usize) -> ScheduleId {
        self.next_id += 1;
        let id = ScheduleId(self.next_id);
        self.schedules.push((id, steps));
        id
    }

    fn cancel(&mut self, id: ScheduleId) {
        self.schedules.retain(|(s, _)| *s != id);
    }

    fn now(&self) -> f64 {
        self.position
    }
}
