// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gesture state machine.
//!
//! ## Usage
//!
//! 1) Feed every raw pointer event to [`GestureStateMachine::on_pointer`].
//! 2) Forward the host recognizer's callbacks to the matching `on_*` method.
//! 3) Apply the returned [`Intents`] in order.
//!
//! The machine never owns transform state. Methods that need the current
//! scale or rotation take a [`TransformSnapshot`], or `None` when nothing is
//! targeted.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::{
//!     GestureIntent, GesturePolicy, GestureStateMachine, PointerAction, PointerEvent,
//!     TransformSnapshot,
//! };
//!
//! let mut machine = GestureStateMachine::new();
//! let policy = GesturePolicy { rotation_enabled: true, ..GesturePolicy::default() };
//! let snapshot = Some(TransformSnapshot { scale: 1.0, rotation_degrees: 0.0 });
//!
//! let down = PointerEvent::new(PointerAction::Down, 0).with_pointer(0, Point::new(0.0, 0.0));
//! machine.on_pointer(&down, &policy, snapshot);
//!
//! // Second finger straight to the left: reference angle 0°.
//! let second = PointerEvent::new(PointerAction::PointerDown, 10)
//!     .with_pointer(0, Point::new(0.0, 0.0))
//!     .with_pointer(1, Point::new(-100.0, 0.0))
//!     .with_action_index(1);
//! machine.on_pointer(&second, &policy, snapshot);
//! assert!(machine.is_multi_touch());
//!
//! // Second finger swings straight up.
//! let moved = PointerEvent::new(PointerAction::Move, 20)
//!     .with_pointer(0, Point::new(0.0, 0.0))
//!     .with_pointer(1, Point::new(0.0, -100.0));
//! let intents = machine.on_pointer(&moved, &policy, snapshot);
//! let GestureIntent::Rotate { degrees } = intents[0] else { unreachable!() };
//! assert!((degrees - 90.0).abs() < 1e-9);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;
use understory_touch_math::to_degrees;

use crate::{
    GestureIntent, GesturePolicy, Intents, PointerAction, PointerEvent, PointerTracker,
    ScaleSignal, ScalingType, ScrollSignal, TouchPhase, TransformSnapshot,
};

/// Span changes below this while several pointers are down are treated as
/// two-finger panning rather than pinching.
pub const SPAN_JITTER_THRESHOLD: f64 = 3.8;

/// Pinch sub-state, driven by the host recognizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScalePhase {
    /// No pinch is active.
    #[default]
    NotScaling,
    /// The recognizer reported a begin; no scale was applied yet.
    Began,
    /// At least one scale signal was applied.
    InProgress,
}

/// Interprets pointer events and recognizer callbacks as gesture intents.
#[derive(Clone, Debug)]
pub struct GestureStateMachine {
    pointers: PointerTracker,
    scale_phase: ScalePhase,
    begin_scale: f64,
    reference_angle: f64,
}

impl Default for GestureStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureStateMachine {
    /// Creates an idle state machine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pointers: PointerTracker::default(),
            scale_phase: ScalePhase::NotScaling,
            begin_scale: 1.0,
            reference_angle: 0.0,
        }
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.count()
    }

    /// Returns `true` while more than one pointer is down.
    #[must_use]
    pub fn is_multi_touch(&self) -> bool {
        self.pointers.is_multi_touch()
    }

    /// Current touch phase.
    #[must_use]
    pub fn touch_phase(&self) -> TouchPhase {
        self.pointers.phase()
    }

    /// Current pinch sub-state.
    #[must_use]
    pub fn scale_phase(&self) -> ScalePhase {
        self.scale_phase
    }

    /// Scale captured when the current (or last) pinch began.
    #[must_use]
    pub fn begin_scale(&self) -> f64 {
        self.begin_scale
    }

    /// Forgets all pointer and pinch state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Handles a raw pointer event.
    ///
    /// Updates the pointer count, then tracks rotation (when enabled and
    /// several pointers are down), then passes the event through.
    pub fn on_pointer(
        &mut self,
        event: &PointerEvent,
        policy: &GesturePolicy,
        snapshot: Option<TransformSnapshot>,
    ) -> Intents {
        let mut intents = Intents::new();

        let before = self.pointers.phase();
        let after = self.pointers.update(event.action);
        if before != after {
            log::debug!("touch phase {before:?} -> {after:?}");
        }

        if policy.rotation_enabled && self.pointers.is_multi_touch() {
            if let Some(degrees) = self.track_rotation(event, snapshot) {
                intents.push(GestureIntent::Rotate { degrees });
            }
        }

        intents.push(GestureIntent::Touch(event.clone()));
        intents
    }

    fn track_rotation(
        &mut self,
        event: &PointerEvent,
        snapshot: Option<TransformSnapshot>,
    ) -> Option<f64> {
        match event.action {
            PointerAction::PointerDown if event.pointer_count() == 2 => {
                let snapshot = snapshot?;
                self.reference_angle = pointer_angle(event)? - snapshot.rotation_degrees;
                log::trace!("rotation reference {}", self.reference_angle);
                None
            }
            PointerAction::Move if event.pointer_count() > 1 => {
                snapshot?;
                Some(-(self.reference_angle - pointer_angle(event)?))
            }
            _ => None,
        }
    }

    /// Handles a scroll callback.
    ///
    /// Always reports the drag; translates only when dragging is permitted
    /// for the current pointer count. Ignored while zoom is disabled.
    pub fn on_scroll(&mut self, signal: &ScrollSignal, policy: &GesturePolicy) -> Intents {
        let mut intents = Intents::new();
        if !policy.zoom_enabled {
            return intents;
        }
        let multi_touch = self.pointers.is_multi_touch();
        intents.push(GestureIntent::Drag {
            anchor: signal.anchor,
            second: signal.current,
            multi_touch,
        });
        if policy.allows_drag(multi_touch) {
            intents.push(GestureIntent::TranslateBy(-signal.distance));
        }
        intents
    }

    /// Handles the recognizer's scale-begin callback.
    ///
    /// Captures the current scale for classifying the pinch direction later.
    pub fn on_scale_begin(&mut self, _signal: &ScaleSignal, snapshot: Option<TransformSnapshot>) {
        if let Some(snapshot) = snapshot {
            self.begin_scale = snapshot.scale;
        }
        self.scale_phase = ScalePhase::Began;
    }

    /// Handles an in-progress scale callback.
    pub fn on_scale(&mut self, signal: &ScaleSignal, policy: &GesturePolicy) -> Intents {
        let mut intents = Intents::new();
        if !signal.in_progress || !policy.zoom_enabled {
            return intents;
        }
        if signal.span_delta() < SPAN_JITTER_THRESHOLD && self.pointers.is_multi_touch() {
            log::trace!("suppressed pinch jitter, span delta {}", signal.span_delta());
            return intents;
        }
        self.scale_phase = ScalePhase::InProgress;
        intents.push(GestureIntent::ScaleBy {
            factor: signal.scale_factor,
            focus: signal.focus,
        });
        intents
    }

    /// Handles the recognizer's scale-end callback.
    ///
    /// Requests an animated bounds correction, then reports the pinch
    /// direction by comparing the current scale with the captured one.
    pub fn on_scale_end(
        &mut self,
        _signal: &ScaleSignal,
        policy: &GesturePolicy,
        snapshot: Option<TransformSnapshot>,
    ) -> Intents {
        self.scale_phase = ScalePhase::NotScaling;
        let mut intents = Intents::new();
        if !policy.zoom_enabled {
            return intents;
        }
        intents.push(GestureIntent::CorrectBounds { animate: true });
        if let Some(snapshot) = snapshot {
            intents.push(GestureIntent::ScalingEnded(ScalingType::Pinch {
                is_scaling_in: snapshot.scale > self.begin_scale,
            }));
        }
        intents
    }

    /// Handles a double tap at `focus`.
    ///
    /// A zoomed-in surface (scale above 1) zooms out; anything else zooms in.
    pub fn on_double_tap(
        &mut self,
        focus: Point,
        policy: &GesturePolicy,
        snapshot: Option<TransformSnapshot>,
    ) -> Intents {
        let mut intents = Intents::new();
        if !(policy.zoom_enabled && policy.double_tap_enabled) {
            return intents;
        }
        let Some(snapshot) = snapshot else {
            return intents;
        };
        intents.push(if snapshot.scale > 1.0 {
            GestureIntent::ZoomOut
        } else {
            GestureIntent::ZoomIn { focus }
        });
        intents
    }

    /// Handles a confirmed single tap.
    pub fn on_single_tap(&mut self, event: &PointerEvent) -> Intents {
        let mut intents = Intents::new();
        if let Some(primary) = event.primary() {
            intents.push(GestureIntent::Tap {
                event: event.clone(),
                position: primary.position,
            });
        }
        intents
    }
}

/// Angle in degrees of the vector from pointer 1 to pointer 0.
fn pointer_angle(event: &PointerEvent) -> Option<f64> {
    let p0 = event.position(0)?;
    let p1 = event.position(1)?;
    let delta = p0 - p1;
    Some(to_degrees(delta.y.atan2(delta.x)))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::*;

    const SNAP: Option<TransformSnapshot> = Some(TransformSnapshot {
        scale: 1.0,
        rotation_degrees: 0.0,
    });

    fn two_finger(action: PointerAction, p0: Point, p1: Point) -> PointerEvent {
        PointerEvent::new(action, 0)
            .with_pointer(0, p0)
            .with_pointer(1, p1)
            .with_action_index(1)
    }

    fn pinch_down(machine: &mut GestureStateMachine, policy: &GesturePolicy) {
        let down = PointerEvent::new(PointerAction::Down, 0).with_pointer(0, Point::ZERO);
        machine.on_pointer(&down, policy, SNAP);
        let second = two_finger(
            PointerAction::PointerDown,
            Point::ZERO,
            Point::new(100.0, 0.0),
        );
        machine.on_pointer(&second, policy, SNAP);
    }

    #[test]
    fn touch_is_always_passed_through_last() {
        let mut m = GestureStateMachine::new();
        let policy = GesturePolicy {
            rotation_enabled: true,
            ..GesturePolicy::default()
        };
        pinch_down(&mut m, &policy);
        let moved = two_finger(PointerAction::Move, Point::ZERO, Point::new(0.0, 100.0));
        let intents = m.on_pointer(&moved, &policy, SNAP);
        assert_eq!(intents.len(), 2);
        assert!(matches!(intents[0], GestureIntent::Rotate { .. }));
        assert_eq!(intents[1], GestureIntent::Touch(moved));
    }

    #[test]
    fn rotation_is_relative_to_current_rotation() {
        let mut m = GestureStateMachine::new();
        let policy = GesturePolicy {
            rotation_enabled: true,
            ..GesturePolicy::default()
        };
        let rotated = Some(TransformSnapshot {
            scale: 1.0,
            rotation_degrees: 30.0,
        });
        let down = PointerEvent::new(PointerAction::Down, 0).with_pointer(0, Point::ZERO);
        m.on_pointer(&down, &policy, rotated);
        let second = two_finger(
            PointerAction::PointerDown,
            Point::ZERO,
            Point::new(100.0, 0.0),
        );
        m.on_pointer(&second, &policy, rotated);

        // Fingers have not turned: rotation stays where it was.
        let still = two_finger(PointerAction::Move, Point::ZERO, Point::new(100.0, 0.0));
        let intents = m.on_pointer(&still, &policy, rotated);
        let GestureIntent::Rotate { degrees } = intents[0] else {
            panic!("expected a rotation, got {intents:?}");
        };
        assert!((degrees - 30.0).abs() < 1e-9, "{degrees}");
    }

    #[test]
    fn rotation_disabled_emits_only_touch() {
        let mut m = GestureStateMachine::new();
        let policy = GesturePolicy::default();
        pinch_down(&mut m, &policy);
        let moved = two_finger(PointerAction::Move, Point::ZERO, Point::new(0.0, 100.0));
        let intents = m.on_pointer(&moved, &policy, SNAP);
        assert_eq!(intents.len(), 1);
    }

    #[test]
    fn scroll_translates_by_negated_distance() {
        let mut m = GestureStateMachine::new();
        let policy = GesturePolicy::default();
        let down = PointerEvent::new(PointerAction::Down, 0).with_pointer(0, Point::ZERO);
        m.on_pointer(&down, &policy, SNAP);
        let signal = ScrollSignal {
            anchor: Point::ZERO,
            current: Some(Point::new(-5.0, 3.0)),
            distance: Vec2::new(5.0, -3.0),
        };
        let intents = m.on_scroll(&signal, &policy);
        assert_eq!(
            intents[0],
            GestureIntent::Drag {
                anchor: Point::ZERO,
                second: Some(Point::new(-5.0, 3.0)),
                multi_touch: false,
            }
        );
        assert_eq!(intents[1], GestureIntent::TranslateBy(Vec2::new(-5.0, 3.0)));
    }

    #[test]
    fn scroll_respects_finger_count_policy() {
        let mut m = GestureStateMachine::new();
        let policy = GesturePolicy {
            multi_finger_dragging_enabled: false,
            ..GesturePolicy::default()
        };
        pinch_down(&mut m, &policy);
        let signal = ScrollSignal {
            anchor: Point::ZERO,
            current: None,
            distance: Vec2::new(1.0, 1.0),
        };
        let intents = m.on_scroll(&signal, &policy);
        assert_eq!(intents.len(), 1, "drag is still reported");
        assert!(matches!(
            intents[0],
            GestureIntent::Drag {
                multi_touch: true,
                ..
            }
        ));
    }

    #[test]
    fn scroll_ignored_without_zoom() {
        let mut m = GestureStateMachine::new();
        let policy = GesturePolicy {
            zoom_enabled: false,
            ..GesturePolicy::default()
        };
        let signal = ScrollSignal {
            anchor: Point::ZERO,
            current: None,
            distance: Vec2::new(1.0, 1.0),
        };
        assert!(m.on_scroll(&signal, &policy).is_empty());
    }

    #[test]
    fn pinch_jitter_is_suppressed_only_with_several_fingers() {
        let mut m = GestureStateMachine::new();
        let policy = GesturePolicy::default();
        let signal = ScaleSignal::new(1.01, Point::new(50.0, 50.0)).with_spans(100.0, 102.0);

        let down = PointerEvent::new(PointerAction::Down, 0).with_pointer(0, Point::ZERO);
        m.on_pointer(&down, &policy, SNAP);
        assert_eq!(m.on_scale(&signal, &policy).len(), 1);

        let second = two_finger(
            PointerAction::PointerDown,
            Point::ZERO,
            Point::new(100.0, 0.0),
        );
        m.on_pointer(&second, &policy, SNAP);
        assert!(m.on_scale(&signal, &policy).is_empty());

        let wide = ScaleSignal::new(1.05, Point::new(50.0, 50.0)).with_spans(100.0, 105.0);
        assert_eq!(
            m.on_scale(&wide, &policy)[0],
            GestureIntent::ScaleBy {
                factor: 1.05,
                focus: Point::new(50.0, 50.0),
            }
        );
        assert_eq!(m.scale_phase(), ScalePhase::InProgress);
    }

    #[test]
    fn scale_signal_not_in_progress_is_dropped() {
        let mut m = GestureStateMachine::new();
        let mut signal = ScaleSignal::new(2.0, Point::ZERO).with_spans(0.0, 50.0);
        signal.in_progress = false;
        assert!(m.on_scale(&signal, &GesturePolicy::default()).is_empty());
    }

    #[test]
    fn scale_end_classifies_against_begin_scale() {
        let mut m = GestureStateMachine::new();
        let policy = GesturePolicy::default();
        let signal = ScaleSignal::new(1.0, Point::ZERO);
        m.on_scale_begin(
            &signal,
            Some(TransformSnapshot {
                scale: 1.5,
                rotation_degrees: 0.0,
            }),
        );
        assert_eq!(m.begin_scale(), 1.5);

        let intents = m.on_scale_end(
            &signal,
            &policy,
            Some(TransformSnapshot {
                scale: 2.0,
                rotation_degrees: 0.0,
            }),
        );
        assert_eq!(intents[0], GestureIntent::CorrectBounds { animate: true });
        assert_eq!(
            intents[1],
            GestureIntent::ScalingEnded(ScalingType::Pinch {
                is_scaling_in: true
            })
        );
        assert_eq!(m.scale_phase(), ScalePhase::NotScaling);

        m.on_scale_begin(&signal, SNAP);
        let intents = m.on_scale_end(
            &signal,
            &policy,
            Some(TransformSnapshot {
                scale: 0.95,
                rotation_degrees: 0.0,
            }),
        );
        assert_eq!(
            intents[1],
            GestureIntent::ScalingEnded(ScalingType::Pinch {
                is_scaling_in: false
            })
        );
    }

    #[test]
    fn double_tap_direction_follows_scale() {
        let mut m = GestureStateMachine::new();
        let policy = GesturePolicy::default();
        let focus = Point::new(10.0, 20.0);
        assert_eq!(
            m.on_double_tap(focus, &policy, SNAP)[0],
            GestureIntent::ZoomIn { focus }
        );
        let zoomed = Some(TransformSnapshot {
            scale: 4.0,
            rotation_degrees: 0.0,
        });
        assert_eq!(
            m.on_double_tap(focus, &policy, zoomed)[0],
            GestureIntent::ZoomOut
        );
        assert!(m.on_double_tap(focus, &policy, None).is_empty());

        let no_double_tap = GesturePolicy {
            double_tap_enabled: false,
            ..policy
        };
        assert!(m.on_double_tap(focus, &no_double_tap, SNAP).is_empty());
    }

    #[test]
    fn single_tap_uses_primary_pointer() {
        let mut m = GestureStateMachine::new();
        let tap = PointerEvent::new(PointerAction::Up, 5).with_pointer(3, Point::new(7.0, 8.0));
        let intents = m.on_single_tap(&tap);
        assert_eq!(
            intents[0],
            GestureIntent::Tap {
                event: tap,
                position: Point::new(7.0, 8.0),
            }
        );
    }
}
