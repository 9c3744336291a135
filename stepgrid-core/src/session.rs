//! Live pattern plus the clock that plays it.

use crate::codec::{self, PatternSnapshot};
use crate::config::Config;
use crate::feedback::{Feedback, FeedbackKind};
use crate::sequencer::{AudioContext, PlaybackState, StepClock, Tick, TransportClock, Triggerable};
use crate::share;
use crate::state::PatternState;

pub struct Session<T> {
    pattern: PatternState,
    clock: StepClock<T>,
    feedback: Feedback,
}

impl<T: TransportClock> Session<T> {
    pub fn new(transport: T, bpm: f32, pack_index: usize) -> Self {
        Self {
            pattern: PatternState::new(pack_index),
            clock: StepClock::new(transport, bpm),
            feedback: Feedback::new(),
        }
    }

    pub fn from_config(transport: T, config: &Config) -> Self {
        Self::new(transport, config.default_bpm(), config.default_pack())
    }

    pub fn pattern(&self) -> &PatternState {
        &self.pattern
    }

    /// Step and parameter edits. Switch packs through [`Session::select_pack`]
    /// so the clock's schedules follow.
    pub fn pattern_mut(&mut self) -> &mut PatternState {
        &mut self.pattern
    }

    pub fn clock(&self) -> &StepClock<T> {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut StepClock<T> {
        &mut self.clock
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut Feedback {
        &mut self.feedback
    }

    pub fn toggle_playback<E: AudioContext>(&mut self, engine: &mut E) -> PlaybackState {
        self.clock.toggle_playback(self.pattern.entities(), engine)
    }

    pub fn on_tick<E: Triggerable>(&mut self, tick: Tick, engine: &mut E) -> bool {
        self.clock.on_tick(tick, self.pattern.entities(), engine)
    }

    pub fn set_bpm(&mut self, bpm: f32) {
        self.clock.set_bpm(bpm);
    }

    pub fn select_pack(&mut self, index: usize) -> bool {
        if !self.pattern.select_pack(index) {
            return false;
        }
        self.clock.rebuild_schedules(self.pattern.entities());
        true
    }

    pub fn snapshot(&self) -> PatternSnapshot {
        codec::serialize(self.clock.bpm(), &self.pattern)
    }

    pub fn share_token(&mut self) -> Option<String> {
        let token = share::create_share_token(&self.snapshot())?;
        self.feedback.push("Pattern link created", FeedbackKind::Confirmation);
        Some(token)
    }

    pub fn share_url(&mut self, base_url: &str) -> Option<String> {
        let token = self.share_token()?;
        Some(share::share_url(base_url, &token))
    }

    /// Replace the live pattern with a validated snapshot.
    pub fn apply_snapshot(&mut self, snapshot: &PatternSnapshot) -> usize {
        let applied = self.pattern.apply_snapshot(snapshot);
        // validated, so within 60..=300
        self.clock.set_bpm(snapshot.bpm as f32);
        self.clock.rebuild_schedules(self.pattern.entities());
        applied
    }

    /// Load the pattern carried by a location string. When there is none,
    /// or it fails validation, the current pattern is left untouched.
    pub fn load_from_location(&mut self, raw: &str) -> bool {
        match share::load_from_location_string(raw) {
            Some(snapshot) => {
                let applied = self.apply_snapshot(&snapshot);
                log::info!(target: "session", "loaded shared pattern ({} samples)", applied);
                self.feedback.push("Pattern loaded", FeedbackKind::Confirmation);
                true
            }
            None => false,
        }
    }
}
