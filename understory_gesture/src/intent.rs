// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recognizer signals in, gesture intents out.

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::PointerEvent;

/// How a scale gesture ended, and in which direction it went.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalingType {
    /// A pinch ended.
    Pinch {
        /// `true` if the pinch left the surface more zoomed in than it began.
        is_scaling_in: bool,
    },
    /// An animated double-tap (or reset) transition finished.
    DoubleTap {
        /// `true` for a zoom-in transition.
        is_scaling_in: bool,
    },
}

impl ScalingType {
    /// Direction of the scale change.
    #[must_use]
    pub fn is_scaling_in(self) -> bool {
        match self {
            Self::Pinch { is_scaling_in } | Self::DoubleTap { is_scaling_in } => is_scaling_in,
        }
    }
}

/// A scroll callback from the host's gesture detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSignal {
    /// Where the scrolling pointer first went down.
    pub anchor: Point,
    /// Current position of the primary pointer, when the detector reports it.
    pub current: Option<Point>,
    /// Distance scrolled since the previous signal, as `previous - current`.
    pub distance: Vec2,
}

/// A callback from the host's pinch recognizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSignal {
    /// Scale factor relative to the previous signal.
    pub scale_factor: f64,
    /// Focal point between the pinching pointers.
    pub focus: Point,
    /// Current distance between the pointers.
    pub current_span: f64,
    /// Distance between the pointers at the previous signal.
    pub previous_span: f64,
    /// Whether the recognizer considers the pinch in progress.
    pub in_progress: bool,
}

impl ScaleSignal {
    /// An in-progress signal with equal spans.
    #[must_use]
    pub fn new(scale_factor: f64, focus: Point) -> Self {
        Self {
            scale_factor,
            focus,
            current_span: 0.0,
            previous_span: 0.0,
            in_progress: true,
        }
    }

    /// Sets the previous and current spans.
    #[must_use]
    pub fn with_spans(mut self, previous_span: f64, current_span: f64) -> Self {
        self.previous_span = previous_span;
        self.current_span = current_span;
        self
    }

    /// Absolute change in span since the previous signal.
    #[must_use]
    pub fn span_delta(&self) -> f64 {
        (self.current_span - self.previous_span).abs()
    }
}

/// The slice of transform state the state machine consults.
///
/// Callers pass `None` instead when no surface is targeted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformSnapshot {
    /// Current uniform scale.
    pub scale: f64,
    /// Current rotation in degrees.
    pub rotation_degrees: f64,
}

/// What the caller should do in response to input.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureIntent {
    /// Pass the raw event through to touch observers.
    Touch(PointerEvent),
    /// Set the surface rotation.
    Rotate {
        /// Absolute rotation in degrees.
        degrees: f64,
    },
    /// Report a drag; the caller maps each point to content space.
    Drag {
        /// Scroll anchor in screen space.
        anchor: Point,
        /// Current primary pointer in screen space.
        second: Option<Point>,
        /// Whether more than one pointer was down.
        multi_touch: bool,
    },
    /// Translate the surface by a screen-space delta.
    TranslateBy(Vec2),
    /// Scale the surface, keeping `focus` under the fingers.
    ScaleBy {
        /// Multiplicative factor.
        factor: f64,
        /// Pinch focus in screen space.
        focus: Point,
    },
    /// Bring the scale back within limits after a pinch.
    CorrectBounds {
        /// Whether the correction should animate.
        animate: bool,
    },
    /// Notify scaling-ended observers.
    ScalingEnded(ScalingType),
    /// Animate a zoom in that keeps `focus` stationary.
    ZoomIn {
        /// Double-tap position in screen space.
        focus: Point,
    },
    /// Animate a zoom out that re-centers the surface.
    ZoomOut,
    /// A confirmed single tap at `position` (primary pointer, screen space).
    Tap {
        /// The event the detector confirmed.
        event: PointerEvent,
        /// Primary pointer position.
        position: Point,
    },
}

/// Intents produced by one input, in the order they must be applied.
pub type Intents = SmallVec<[GestureIntent; 2]>;

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{ScaleSignal, ScalingType};

    #[test]
    fn span_delta_is_absolute() {
        let s = ScaleSignal::new(1.0, Point::ZERO).with_spans(100.0, 97.0);
        assert!((s.span_delta() - 3.0).abs() < 1e-12);
        let s = ScaleSignal::new(1.0, Point::ZERO).with_spans(97.0, 100.0);
        assert!((s.span_delta() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn scaling_type_direction() {
        assert!(ScalingType::Pinch { is_scaling_in: true }.is_scaling_in());
        assert!(!ScalingType::DoubleTap { is_scaling_in: false }.is_scaling_in());
    }
}
