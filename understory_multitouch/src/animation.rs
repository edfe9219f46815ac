// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated zoom transitions.
//!
//! A [`Transition`] describes what to animate: a scale range and, for zooms
//! that move the surface, a translation range per axis. The controller keeps
//! at most one in an [`AnimationSlot`]; starting another replaces it.
//!
//! Hosts with their own animator read the active transition, sample it with
//! their own clock and feed the values back. Hosts without one call
//! [`AnimationSlot::advance`] (through the controller) with frame deltas.

use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Vec2;
use understory_gesture::ScalingType;

/// A value animated from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatRange {
    /// Value at the start.
    pub from: f64,
    /// Value at the end.
    pub to: f64,
}

impl FloatRange {
    /// Creates a range.
    #[must_use]
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// Linear interpolation at `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(&self, t: f64) -> f64 {
        self.from + (self.to - self.from) * t
    }
}

/// Timing curve applied to the linear progress of a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Slow at both ends: `cos((t + 1)π) / 2 + 0.5`.
    #[default]
    AccelerateDecelerate,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

/// Which animated operation a transition performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    /// Zoom in, keeping a focus point stationary.
    ZoomIn,
    /// Zoom out and re-center.
    ZoomOut,
    /// Scale back up to the lower limit in place.
    ScaleOut,
}

impl TransitionKind {
    /// The scaling-ended event reported when the transition completes.
    #[must_use]
    pub fn completion(self) -> ScalingType {
        ScalingType::DoubleTap {
            is_scaling_in: matches!(self, Self::ZoomIn),
        }
    }
}

/// An animated transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// What the transition does.
    pub kind: TransitionKind,
    /// Absolute scale over time.
    pub scale: FloatRange,
    /// Translation over time, when the transition moves the surface.
    pub translation: Option<[FloatRange; 2]>,
    /// Total duration.
    pub duration_ms: u64,
    /// Timing curve.
    pub easing: Easing,
}

impl Transition {
    /// The values at eased progress `t` in `[0, 1]`.
    #[must_use]
    pub fn sample(&self, t: f64) -> AnimationSample {
        AnimationSample {
            scale: self.scale.lerp(t),
            translation: self
                .translation
                .map(|[x, y]| Vec2::new(x.lerp(t), y.lerp(t))),
        }
    }

    /// The values at linear progress `t`, after easing.
    #[must_use]
    pub fn sample_linear(&self, t: f64) -> AnimationSample {
        self.sample(self.easing.apply(t))
    }
}

/// One set of animated values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSample {
    /// Absolute scale.
    pub scale: f64,
    /// Translation, for transitions that move the surface.
    pub translation: Option<Vec2>,
}

/// The result of advancing the built-in clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// Values to apply.
    pub sample: AnimationSample,
    /// Set on the final tick; carries the completed transition.
    pub finished: Option<Transition>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Running {
    transition: Transition,
    elapsed_ms: u64,
}

/// Holds at most one running transition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationSlot {
    running: Option<Running>,
}

impl AnimationSlot {
    /// Starts `transition`, returning the one it replaced.
    pub fn start(&mut self, transition: Transition) -> Option<Transition> {
        self.running
            .replace(Running {
                transition,
                elapsed_ms: 0,
            })
            .map(|r| r.transition)
    }

    /// The running transition.
    #[must_use]
    pub fn current(&self) -> Option<&Transition> {
        self.running.as_ref().map(|r| &r.transition)
    }

    /// Time elapsed on the built-in clock.
    #[must_use]
    pub fn elapsed_ms(&self) -> Option<u64> {
        self.running.map(|r| r.elapsed_ms)
    }

    /// Returns `true` while a transition is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Stops and returns the running transition.
    pub fn take(&mut self) -> Option<Transition> {
        self.running.take().map(|r| r.transition)
    }

    /// Advances the built-in clock by `dt_ms`.
    ///
    /// The final tick samples the end values exactly and empties the slot.
    pub fn advance(&mut self, dt_ms: u64) -> Option<Tick> {
        let running = self.running.as_mut()?;
        running.elapsed_ms = running.elapsed_ms.saturating_add(dt_ms);
        let duration = running.transition.duration_ms;
        if running.elapsed_ms >= duration {
            let transition = running.transition;
            self.running = None;
            return Some(Tick {
                sample: transition.sample(1.0),
                finished: Some(transition),
            });
        }
        let t = running.elapsed_ms as f64 / duration as f64;
        Some(Tick {
            sample: running.transition.sample_linear(t),
            finished: None,
        })
    }
}
