//! Short-lived user feedback ("Pattern link created", hover hints).
//!
//! Owned by whoever renders it and passed where needed; there is no global
//! message slot.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Tooltip,
    Confirmation,
}

impl FeedbackKind {
    fn ttl(self) -> Duration {
        match self {
            FeedbackKind::Tooltip => Duration::from_millis(1000),
            FeedbackKind::Confirmation => Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedbackMessage {
    pub text: String,
    pub kind: FeedbackKind,
    pub shown_at: Instant,
}

impl FeedbackMessage {
    fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) > self.kind.ttl()
    }
}

/// Holds at most one message; a new message replaces the old one.
#[derive(Debug, Default)]
pub struct Feedback {
    message: Option<FeedbackMessage>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, kind: FeedbackKind) {
        self.push_at(text, kind, Instant::now());
    }

    pub fn push_at(&mut self, text: impl Into<String>, kind: FeedbackKind, now: Instant) {
        self.message = Some(FeedbackMessage {
            text: text.into(),
            kind,
            shown_at: now,
        });
    }

    pub fn current(&self) -> Option<&FeedbackMessage> {
        self.current_at(Instant::now())
    }

    pub fn current_at(&self, now: Instant) -> Option<&FeedbackMessage> {
        self.message.as_ref().filter(|m| !m.is_expired_at(now))
    }

    pub fn clear(&mut self) {
        self.message = None;
    }
}
