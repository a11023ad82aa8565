//! Status message sequence played after the login action.
//!
//! ```text
//! Idle -> Submitting -> ShowingMessage(0) -> SlidingOut(0) -> ShowingMessage(1)
//!      -> ... -> ShowingMessage(N-1) -> Resetting -> Idle
//! ```
//!
//! Every state except `Idle` has a deadline. [`Sequencer::poll`] walks all
//! deadlines that have passed, entering each successor at its predecessor's
//! deadline, so the timeline does not depend on how often it is polled.

use crate::anim::{Easing, Point, Transition};
use crate::config::{SequenceConfig, SequenceTiming};
use crate::error::{LoginError, Result};
use crate::screen::view::{BannerVisual, ButtonVisual};
use std::time::{Duration, Instant};
use tracing::{debug, info};

const SUBMIT_DAMPING: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStage {
    /// Flip transition bringing the banner into view
    Revealing,
    /// Banner fully shown, waiting out the step delay
    Holding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    Idle,
    Submitting,
    ShowingMessage { index: usize, stage: MessageStage },
    SlidingOut(usize),
    Resetting,
}

impl SequenceState {
    pub fn display_name(&self) -> &'static str {
        match self {
            SequenceState::Idle => "IDLE",
            SequenceState::Submitting => "SUBMITTING",
            SequenceState::ShowingMessage { .. } => "STATUS",
            SequenceState::SlidingOut(_) => "STATUS",
            SequenceState::Resetting => "RESET",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceEvent {
    Submitted,
    MessageShown { index: usize, text: String },
    SlidOut { index: usize },
    Resetting,
    Idle,
}

pub struct Sequencer {
    messages: Vec<String>,
    timing: SequenceTiming,
    anchor: Point,
    /// Horizontal distance a message slides before it is replaced
    travel: f64,
    pending_layout: Option<(Point, f64)>,
    pending_events: Vec<SequenceEvent>,
    state: SequenceState,
    entered_at: Instant,
    button: Transition<ButtonVisual>,
    banner: Transition<BannerVisual>,
}

impl Sequencer {
    /// Build an idle sequencer whose banner rests at `anchor`.
    ///
    /// Fails when the configuration has no messages to show.
    pub fn new(config: &SequenceConfig, anchor: Point, travel: f64, now: Instant) -> Result<Self> {
        if config.messages.is_empty() {
            return Err(LoginError::Config(
                "status sequence needs at least one message".to_string(),
            ));
        }

        Ok(Self {
            messages: config.messages.clone(),
            timing: config.timing(),
            anchor,
            travel,
            pending_layout: None,
            pending_events: Vec::new(),
            state: SequenceState::Idle,
            entered_at: now,
            button: Transition::settled(ButtonVisual::idle(), now),
            banner: Transition::settled(BannerVisual::hidden_at(anchor), now),
        })
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == SequenceState::Idle
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Index of the message currently on screen, if any.
    pub fn cursor(&self) -> Option<usize> {
        match self.state {
            SequenceState::ShowingMessage { index, .. } | SequenceState::SlidingOut(index) => {
                Some(index)
            }
            // The last message stays up while the form fades back.
            SequenceState::Resetting => Some(self.messages.len() - 1),
            SequenceState::Idle | SequenceState::Submitting => None,
        }
    }

    /// Text on the banner, if the banner is showing one.
    pub fn banner_text(&self) -> Option<&str> {
        self.cursor().map(|i| self.messages[i].as_str())
    }

    pub fn button(&self, now: Instant) -> ButtonVisual {
        self.button.sample(now)
    }

    pub fn banner(&self, now: Instant) -> BannerVisual {
        self.banner.sample(now)
    }

    /// When the current state completes, or `None` while idle.
    pub fn deadline(&self) -> Option<Instant> {
        let t = &self.timing;
        let length = match self.state {
            SequenceState::Idle => return None,
            SequenceState::Submitting => t.submit,
            SequenceState::ShowingMessage { stage: MessageStage::Revealing, .. } => t.reveal,
            SequenceState::ShowingMessage { stage: MessageStage::Holding, .. } => t.hold,
            SequenceState::SlidingOut(_) => t.slide_out,
            SequenceState::Resetting => t.reset(),
        };
        Some(self.entered_at + length)
    }

    /// Start a run. Ignored unless idle; returns whether a run started.
    pub fn trigger(&mut self, now: Instant) -> bool {
        if !self.is_idle() {
            debug!("Login ignored, sequence already in {:?}", self.state);
            return false;
        }

        let current = self.button.sample(now);
        self.button = Transition::new(
            current,
            current.busy(),
            now,
            self.timing.submit,
            Easing::Spring { damping: SUBMIT_DAMPING },
        );
        self.enter(SequenceState::Submitting, now);
        self.pending_events.push(SequenceEvent::Submitted);
        true
    }

    /// Advance through every state whose deadline is at or before `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<SequenceEvent> {
        let mut events = std::mem::take(&mut self.pending_events);

        while let Some(deadline) = self.deadline() {
            if deadline > now {
                break;
            }
            self.complete(deadline, &mut events);
        }
        events
    }

    /// Update the anchor and slide distance after a relayout.
    ///
    /// Applied immediately when idle. Mid-run the banner keeps returning to
    /// the anchor it started with; the new one takes over once idle.
    pub fn relayout(&mut self, anchor: Point, travel: f64, now: Instant) {
        if self.is_idle() {
            self.apply_layout(anchor, travel, now);
        } else {
            self.pending_layout = Some((anchor, travel));
        }
    }

    fn apply_layout(&mut self, anchor: Point, travel: f64, now: Instant) {
        self.anchor = anchor;
        self.travel = travel;
        self.banner = Transition::settled(BannerVisual::hidden_at(anchor), now);
    }

    fn enter(&mut self, state: SequenceState, at: Instant) {
        debug!("Sequence {:?} -> {:?}", self.state, state);
        self.state = state;
        self.entered_at = at;
    }

    fn complete(&mut self, at: Instant, events: &mut Vec<SequenceEvent>) {
        match self.state {
            SequenceState::Idle => {}
            SequenceState::Submitting => {
                self.show_message(0, at, events);
            }
            SequenceState::ShowingMessage { index, stage: MessageStage::Revealing } => {
                self.enter(
                    SequenceState::ShowingMessage { index, stage: MessageStage::Holding },
                    at,
                );
            }
            SequenceState::ShowingMessage { index, stage: MessageStage::Holding } => {
                if index + 1 < self.messages.len() {
                    self.slide_out(index, at);
                } else {
                    self.reset(at, events);
                }
            }
            SequenceState::SlidingOut(index) => {
                self.banner = Transition::settled(BannerVisual::hidden_at(self.anchor), at);
                events.push(SequenceEvent::SlidOut { index });
                self.show_message(index + 1, at, events);
            }
            SequenceState::Resetting => {
                self.banner = Transition::settled(BannerVisual::hidden_at(self.anchor), at);
                self.button = Transition::settled(ButtonVisual::idle(), at);
                self.enter(SequenceState::Idle, at);
                if let Some((anchor, travel)) = self.pending_layout.take() {
                    self.apply_layout(anchor, travel, at);
                }
                info!("Login sequence finished");
                events.push(SequenceEvent::Idle);
            }
        }
    }

    fn show_message(&mut self, index: usize, at: Instant, events: &mut Vec<SequenceEvent>) {
        let text = self.messages[index].clone();
        info!("Showing status message {}: {}", index, text);

        self.banner = Transition::new(
            BannerVisual::hidden_at(self.anchor),
            BannerVisual::shown_at(self.anchor),
            at,
            self.timing.reveal,
            Easing::EaseOut,
        );
        self.enter(
            SequenceState::ShowingMessage { index, stage: MessageStage::Revealing },
            at,
        );
        events.push(SequenceEvent::MessageShown { index, text });
    }

    fn slide_out(&mut self, index: usize, at: Instant) {
        let shown = self.banner.sample(at);
        self.banner = Transition::new(
            shown,
            shown.slid_by(self.travel),
            at,
            self.timing.slide_out,
            Easing::Linear,
        );
        self.enter(SequenceState::SlidingOut(index), at);
    }

    fn reset(&mut self, at: Instant, events: &mut Vec<SequenceEvent>) {
        self.banner = Transition::new(
            self.banner.sample(at),
            BannerVisual::faded_at(self.anchor),
            at,
            self.timing.reset_banner,
            Easing::Linear,
        );
        self.button = Transition::new(
            self.button.sample(at),
            ButtonVisual::idle(),
            at,
            self.timing.reset_button,
            Easing::Linear,
        );
        self.enter(SequenceState::Resetting, at);
        events.push(SequenceEvent::Resetting);
    }

    /// Total length of one run with the current timing.
    pub fn run_length(&self) -> Duration {
        let t = &self.timing;
        let n = self.messages.len() as u32;
        t.submit + (t.reveal + t.hold) * n + t.slide_out * (n - 1) + t.reset()
    }
}
