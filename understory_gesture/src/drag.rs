// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking for the fallback recognizer.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] with the focus when the first pointer goes down.
//! 2) On each move, call [`DragState::update`] with the new focus to get the delta.
//! 3) When the pointer set changes, call [`DragState::rebase`] so the focus jump
//!    is not reported as movement.
//! 4) End the drag with [`DragState::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//!
//! // A second finger moves the focus; that is not a drag.
//! drag.rebase(Point::new(40.0, 25.0));
//! assert_eq!(drag.update(Point::new(41.0, 25.0)), Some(Vec2::new(1.0, 0.0)));
//!
//! assert!(drag.exceeded_slop(8.0));
//! ```

use kurbo::{Point, Vec2};

/// Tracks a drag's anchor, last focus and the largest distance travelled.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Where the first pointer went down.
    pub start_pos: Option<Point>,
    /// Focus at the last update or rebase.
    pub last_pos: Option<Point>,
    travelled: f64,
}

impl DragState {
    /// Starts a new drag at `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.travelled = 0.0;
    }

    /// Moves to `pos`, returning the delta since the last update.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let start = self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        self.travelled = self.travelled.max((pos - start).hypot());
        delta
    }

    /// Replaces the last focus without reporting movement.
    pub fn rebase(&mut self, pos: Point) {
        if self.start_pos.is_some() {
            self.last_pos = Some(pos);
        }
    }

    /// Whether the drag has ever moved further than `slop` from its start.
    #[must_use]
    pub fn exceeded_slop(&self, slop: f64) -> bool {
        self.travelled > slop
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        *self = Self::default();
    }
}
