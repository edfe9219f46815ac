// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fallback scroll and tap recognizer.
//!
//! Hosts with a platform gesture detector should forward its callbacks to the
//! [`GestureStateMachine`](crate::GestureStateMachine) directly. Hosts without
//! one can feed raw events to a [`SignalRecognizer`] and forward what it
//! reports instead. Pinch recognition is not provided.
//!
//! Single taps are only confirmed once the double-tap timeout has passed, so
//! callers must also [`poll`](SignalRecognizer::poll) with the current time.

use kurbo::Point;
use smallvec::SmallVec;

use crate::drag::DragState;
use crate::{PointerAction, PointerEvent, ScrollSignal};

/// Thresholds for [`SignalRecognizer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecognizerConfig {
    /// Distance a pointer may travel before a press becomes a scroll.
    pub touch_slop: f64,
    /// Maximum time between the first up and the second down of a double tap.
    pub double_tap_timeout_ms: u64,
    /// Maximum distance between the two downs of a double tap.
    pub double_tap_slop: f64,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            double_tap_timeout_ms: 300,
            double_tap_slop: 100.0,
        }
    }
}

/// A signal recognized from the raw event stream.
#[derive(Clone, Debug, PartialEq)]
pub enum RecognizedSignal {
    /// The pointers scrolled.
    Scroll(ScrollSignal),
    /// A tap that was not followed by a second one. Carries the down event.
    SingleTapConfirmed(PointerEvent),
    /// The second down of a double tap.
    DoubleTap {
        /// Position of the second down.
        focus: Point,
        /// The second down event.
        event: PointerEvent,
    },
}

/// Signals produced by one input.
pub type Signals = SmallVec<[RecognizedSignal; 2]>;

#[derive(Clone, Debug)]
struct PendingTap {
    down: PointerEvent,
    up_time_ms: u64,
}

/// Turns raw pointer events into scroll and tap signals.
#[derive(Clone, Debug, Default)]
pub struct SignalRecognizer {
    config: RecognizerConfig,
    drag: DragState,
    down: Option<PointerEvent>,
    pending_tap: Option<PendingTap>,
    saw_multi_touch: bool,
    in_double_tap: bool,
}

impl SignalRecognizer {
    /// Creates a recognizer with the given thresholds.
    #[must_use]
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The thresholds in use.
    #[must_use]
    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    /// Whether a tap is waiting for its double-tap timeout.
    #[must_use]
    pub fn has_pending_tap(&self) -> bool {
        self.pending_tap.is_some()
    }

    /// Forgets the current gesture and any pending tap.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Handles one raw event.
    pub fn on_pointer(&mut self, event: &PointerEvent) -> Signals {
        let mut out = Signals::new();
        match event.action {
            PointerAction::Down => self.on_down(event, &mut out),
            PointerAction::PointerDown | PointerAction::PointerUp => {
                self.saw_multi_touch = true;
                self.pending_tap = None;
                self.in_double_tap = false;
                if let Some(focus) = event.focus() {
                    self.drag.rebase(focus);
                }
            }
            PointerAction::Move => self.on_move(event, &mut out),
            PointerAction::Up => self.on_up(event),
            PointerAction::Cancel => self.reset(),
        }
        out
    }

    /// Confirms a pending single tap once the double-tap timeout has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<RecognizedSignal> {
        let pending = self.pending_tap.as_ref()?;
        if now_ms.saturating_sub(pending.up_time_ms) < self.config.double_tap_timeout_ms {
            return None;
        }
        let pending = self.pending_tap.take()?;
        log::trace!("single tap confirmed at {now_ms}");
        Some(RecognizedSignal::SingleTapConfirmed(pending.down))
    }

    fn on_down(&mut self, event: &PointerEvent, out: &mut Signals) {
        let Some(position) = event.position(0) else {
            return;
        };
        self.in_double_tap = false;
        if let Some(pending) = self.pending_tap.take() {
            let elapsed = event.time_ms.saturating_sub(pending.up_time_ms);
            let first = pending.down.position(0).unwrap_or(position);
            if elapsed <= self.config.double_tap_timeout_ms
                && (position - first).hypot() <= self.config.double_tap_slop
            {
                log::debug!("double tap at ({}, {})", position.x, position.y);
                self.in_double_tap = true;
                out.push(RecognizedSignal::DoubleTap {
                    focus: position,
                    event: event.clone(),
                });
            } else {
                out.push(RecognizedSignal::SingleTapConfirmed(pending.down));
            }
        }
        self.saw_multi_touch = false;
        self.drag.start(event.focus().unwrap_or(position));
        self.down = Some(event.clone());
    }

    fn on_move(&mut self, event: &PointerEvent, out: &mut Signals) {
        let Some(focus) = event.focus() else {
            return;
        };
        let Some(delta) = self.drag.update(focus) else {
            return;
        };
        if !self.drag.exceeded_slop(self.config.touch_slop) || self.in_double_tap {
            return;
        }
        let Some(anchor) = self.down.as_ref().and_then(|d| d.position(0)) else {
            return;
        };
        out.push(RecognizedSignal::Scroll(ScrollSignal {
            anchor,
            current: event.position(0),
            distance: -delta,
        }));
    }

    fn on_up(&mut self, event: &PointerEvent) {
        let is_tap = !self.saw_multi_touch
            && !self.in_double_tap
            && !self.drag.exceeded_slop(self.config.touch_slop);
        if is_tap {
            if let Some(down) = self.down.take() {
                self.pending_tap = Some(PendingTap {
                    down,
                    up_time_ms: event.time_ms,
                });
            }
        }
        self.drag.end();
        self.down = None;
        self.in_double_tap = false;
    }
}
