// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw pointer events and down-pointer bookkeeping.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

/// What happened to the pointers in a [`PointerEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// The first pointer touched down.
    Down,
    /// An additional pointer touched down while others are down.
    PointerDown,
    /// One or more down pointers moved.
    Move,
    /// A pointer lifted while others remain down.
    PointerUp,
    /// The last pointer lifted.
    Up,
    /// The host aborted the gesture stream.
    Cancel,
}

/// Position of one active pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Host-assigned pointer identifier, stable while the pointer is down.
    pub id: u32,
    /// Screen-space position.
    pub position: Point,
}

/// A raw pointer event, in the host's dispatch order.
///
/// `pointers` lists every pointer that is down at the time of the event,
/// including the one that is going down or lifting. Index `0` is the primary
/// pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// The action.
    pub action: PointerAction,
    /// Index into `pointers` of the pointer that went down or lifted.
    ///
    /// Meaningful for [`PointerAction::PointerDown`] and
    /// [`PointerAction::PointerUp`]; `0` otherwise.
    pub action_index: usize,
    /// All pointers down at the time of the event.
    pub pointers: SmallVec<[PointerSample; 2]>,
    /// Host timestamp in milliseconds.
    pub time_ms: u64,
}

impl PointerEvent {
    /// Creates an event with no pointers; add them with [`Self::with_pointer`].
    #[must_use]
    pub fn new(action: PointerAction, time_ms: u64) -> Self {
        Self {
            action,
            action_index: 0,
            pointers: SmallVec::new(),
            time_ms,
        }
    }

    /// Appends a pointer.
    #[must_use]
    pub fn with_pointer(mut self, id: u32, position: Point) -> Self {
        self.pointers.push(PointerSample { id, position });
        self
    }

    /// Sets [`Self::action_index`].
    #[must_use]
    pub fn with_action_index(mut self, index: usize) -> Self {
        self.action_index = index;
        self
    }

    /// The primary pointer, if any.
    #[must_use]
    pub fn primary(&self) -> Option<&PointerSample> {
        self.pointers.first()
    }

    /// Position of the pointer at `index`, if present.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Point> {
        self.pointers.get(index).map(|p| p.position)
    }

    /// Number of pointers carried by the event.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Mean position of the pointers, skipping the lifting pointer on
    /// [`PointerAction::PointerUp`].
    #[must_use]
    pub fn focus(&self) -> Option<Point> {
        let skip = (self.action == PointerAction::PointerUp).then_some(self.action_index);
        let mut sum = Vec2::ZERO;
        let mut n = 0_u32;
        for (idx, p) in self.pointers.iter().enumerate() {
            if Some(idx) == skip {
                continue;
            }
            sum += p.position.to_vec2();
            n += 1;
        }
        (n > 0).then(|| (sum / f64::from(n)).to_point())
    }
}

/// Coarse touch state derived from the number of down pointers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum TouchPhase {
    /// No pointer is down.
    #[default]
    Idle,
    /// Exactly one pointer is down.
    SingleTouch,
    /// More than one pointer is down.
    MultiTouch,
}

/// Counts down pointers from the action stream.
///
/// The count follows the action kinds only; it does not inspect pointer ids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerTracker {
    down: usize,
}

impl PointerTracker {
    /// Applies one action and returns the resulting phase.
    pub fn update(&mut self, action: PointerAction) -> TouchPhase {
        match action {
            PointerAction::Down => self.down = 1,
            PointerAction::PointerDown => self.down += 1,
            PointerAction::PointerUp => self.down = self.down.saturating_sub(1),
            PointerAction::Up | PointerAction::Cancel => self.down = 0,
            PointerAction::Move => {}
        }
        self.phase()
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn count(&self) -> usize {
        self.down
    }

    /// Returns `true` while more than one pointer is down.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        self.down > 1
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TouchPhase {
        match self.down {
            0 => TouchPhase::Idle,
            1 => TouchPhase::SingleTouch,
            _ => TouchPhase::MultiTouch,
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{PointerAction, PointerEvent, PointerTracker, TouchPhase};

    #[test]
    fn tracker_follows_action_stream() {
        let mut t = PointerTracker::default();
        assert_eq!(t.phase(), TouchPhase::Idle);
        assert_eq!(t.update(PointerAction::Down), TouchPhase::SingleTouch);
        assert_eq!(t.update(PointerAction::PointerDown), TouchPhase::MultiTouch);
        assert_eq!(t.update(PointerAction::PointerDown), TouchPhase::MultiTouch);
        assert_eq!(t.count(), 3);
        assert_eq!(t.update(PointerAction::Move), TouchPhase::MultiTouch);
        assert_eq!(t.update(PointerAction::PointerUp), TouchPhase::MultiTouch);
        assert_eq!(t.update(PointerAction::PointerUp), TouchPhase::SingleTouch);
        assert!(!t.is_multi_touch());
        assert_eq!(t.update(PointerAction::Up), TouchPhase::Idle);
    }

    #[test]
    fn tracker_never_underflows() {
        let mut t = PointerTracker::default();
        t.update(PointerAction::PointerUp);
        t.update(PointerAction::PointerUp);
        assert_eq!(t.count(), 0);
    }

    #[test]
    fn down_resets_stale_count() {
        let mut t = PointerTracker::default();
        t.update(PointerAction::Down);
        t.update(PointerAction::PointerDown);
        // The host lost the up events; a fresh down starts over.
        t.update(PointerAction::Down);
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn focus_skips_lifting_pointer() {
        let e = PointerEvent::new(PointerAction::PointerUp, 0)
            .with_pointer(0, Point::new(0.0, 0.0))
            .with_pointer(1, Point::new(10.0, 20.0))
            .with_action_index(0);
        assert_eq!(e.focus(), Some(Point::new(10.0, 20.0)));

        let e = PointerEvent::new(PointerAction::Move, 0)
            .with_pointer(0, Point::new(0.0, 0.0))
            .with_pointer(1, Point::new(10.0, 20.0));
        assert_eq!(e.focus(), Some(Point::new(5.0, 10.0)));

        assert_eq!(PointerEvent::new(PointerAction::Move, 0).focus(), None);
    }
}
