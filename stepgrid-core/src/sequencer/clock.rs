use stepgrid_types::{PatternEntity, SampleId, MAX_BPM, MIN_BPM, SEQUENCE_LENGTH};

use super::transport::{AudioContext, ScheduleId, Tick, TransportClock, Triggerable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// Play/stop state machine driving one repeating grid callback per sample.
///
/// The clock owns the transport: nothing else starts it, stops it or
/// registers callbacks on it. Schedules are keyed by sample id, and the
/// entity is looked up again on every tick, so step and pitch edits made
/// between ticks are heard on the next one.
pub struct StepClock<T> {
    transport: T,
    state: PlaybackState,
    active_step_index: usize,
    bpm: f32,
    schedules: Vec<(ScheduleId, SampleId)>,
}

impl<T: TransportClock> StepClock<T> {
    pub fn new(mut transport: T, bpm: f32) -> Self {
        let bpm = bpm.clamp(MIN_BPM, MAX_BPM);
        transport.set_tempo(bpm);
        Self {
            transport,
            state: PlaybackState::Idle,
            active_step_index: 0,
            bpm,
            schedules: Vec::new(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn active_step_index(&self) -> usize {
        self.active_step_index
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    /// Number of grid callbacks currently registered with the transport.
    pub fn live_schedules(&self) -> usize {
        self.schedules.len()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Start when idle, stop when playing. Returns the resulting state.
    ///
    /// Starting resumes the audio context first if it is suspended. If that
    /// fails the clock stays idle with nothing scheduled.
    pub fn toggle_playback<E: AudioContext>(
        &mut self,
        entities: &[PatternEntity],
        engine: &mut E,
    ) -> PlaybackState {
        match self.state {
            PlaybackState::Idle => self.start(entities, engine),
            PlaybackState::Playing => self.stop(),
        }
        self.state
    }

    fn start<E: AudioContext>(&mut self, entities: &[PatternEntity], engine: &mut E) {
        if !engine.is_running() {
            if let Err(e) = engine.resume() {
                log::error!(target: "sequencer", "playback not started: {}", e);
                return;
            }
        }
        self.active_step_index = 0;
        self.cancel_all();
        self.schedule_all(entities);
        self.transport.start();
        self.state = PlaybackState::Playing;
        log::debug!(target: "sequencer", "playing {} samples at {} bpm", entities.len(), self.bpm);
    }

    pub fn stop(&mut self) {
        // Flag idle before cancelling so stragglers from the old schedules are dropped.
        self.state = PlaybackState::Idle;
        self.cancel_all();
        self.transport.stop();
        self.active_step_index = 0;
        log::debug!(target: "sequencer", "stopped");
    }

    /// Replace the per-sample callbacks after the sample list changed.
    /// Old callbacks are cancelled before any new one is registered; while
    /// idle nothing new is registered until playback starts.
    pub fn rebuild_schedules(&mut self, entities: &[PatternEntity]) {
        self.cancel_all();
        if self.state == PlaybackState::Playing {
            self.schedule_all(entities);
        }
    }

    /// Change tempo on the running transport. Values are clamped to the
    /// supported range; non-finite values are ignored.
    pub fn set_bpm(&mut self, bpm: f32) {
        if !bpm.is_finite() {
            log::warn!(target: "sequencer", "ignoring tempo {}", bpm);
            return;
        }
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
        self.transport.set_tempo(self.bpm);
    }

    /// Handle one grid callback. Returns whether a sample was triggered.
    ///
    /// Ticks that arrive while idle, or from a schedule that has already
    /// been cancelled, are ignored.
    pub fn on_tick<E: Triggerable>(
        &mut self,
        tick: Tick,
        entities: &[PatternEntity],
        engine: &mut E,
    ) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }
        let Some(&(_, sample)) = self.schedules.iter().find(|(id, _)| *id == tick.schedule) else {
            log::debug!(target: "sequencer", "dropping tick from cancelled schedule {:?}", tick.schedule);
            return false;
        };

        let step = tick.step % SEQUENCE_LENGTH;
        self.active_step_index = step;

        match entities.iter().find(|e| e.id == sample) {
            Some(entity) if entity.is_active(step) => {
                engine.trigger(entity.id, &entity.pitch, tick.time);
                true
            }
            _ => false,
        }
    }

    fn schedule_all(&mut self, entities: &[PatternEntity]) {
        for entity in entities {
            let id = self.transport.schedule_grid(SEQUENCE_LENGTH);
            self.schedules.push((id, entity.id));
        }
    }

    fn cancel_all(&mut self) {
        for (id, _) in self.schedules.drain(..) {
            self.transport.cancel(id);
        }
    }
}
