// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits implemented by the controller and the frame.

use kurbo::{Point, Rect, Vec2};
use understory_gesture::{PointerEvent, ScalingType};

use crate::{Config, Observers, TransformedPoint};

/// Read and change options one at a time.
///
/// Implementors only provide access to their [`Config`]; every option has a
/// provided getter and setter. Setters for scale values ignore unusable input.
pub trait Configurable {
    /// The current options.
    fn config(&self) -> &Config;

    /// Mutable access to the options.
    fn config_mut(&mut self) -> &mut Config;

    /// Whether pinch, scroll and double-tap handling is on.
    fn is_zoom_enabled(&self) -> bool {
        self.config().zoom_enabled
    }

    /// Turns pinch, scroll and double-tap handling on or off.
    fn set_zoom_enabled(&mut self, enabled: bool) {
        self.config_mut().zoom_enabled = enabled;
    }

    /// Whether double-tap zoom is on.
    fn is_double_tap_enabled(&self) -> bool {
        self.config().double_tap_enabled
    }

    /// Turns double-tap zoom on or off.
    fn set_double_tap_enabled(&mut self, enabled: bool) {
        self.config_mut().double_tap_enabled = enabled;
    }

    /// Lower scale limit.
    fn min_scale(&self) -> f64 {
        self.config().min_scale()
    }

    /// Sets the lower scale limit; non-positive values are ignored.
    fn set_min_scale(&mut self, value: f64) {
        self.config_mut().set_min_scale(value);
    }

    /// Upper scale limit.
    fn max_scale(&self) -> f64 {
        self.config().max_scale()
    }

    /// Sets the upper scale limit.
    fn set_max_scale(&mut self, value: f64) {
        self.config_mut().set_max_scale(value);
    }

    /// Whether a pinch may overshoot below the lower limit.
    fn is_bounds_limit_effect_enabled(&self) -> bool {
        self.config().bounds_limit_effect_enabled
    }

    /// Turns the overshoot on or off.
    fn set_bounds_limit_effect_enabled(&mut self, enabled: bool) {
        self.config_mut().bounds_limit_effect_enabled = enabled;
    }

    /// Overshoot multiplier.
    fn bounds_limit_effect_scale_factor(&self) -> f64 {
        self.config().bounds_limit_effect_scale_factor()
    }

    /// Sets the overshoot multiplier; non-positive values are ignored.
    fn set_bounds_limit_effect_scale_factor(&mut self, value: f64) {
        self.config_mut().set_bounds_limit_effect_scale_factor(value);
    }

    /// Whether one finger may drag.
    fn is_one_finger_dragging_enabled(&self) -> bool {
        self.config().one_finger_dragging_enabled
    }

    /// Allows or forbids dragging with one finger.
    fn set_one_finger_dragging_enabled(&mut self, enabled: bool) {
        self.config_mut().one_finger_dragging_enabled = enabled;
    }

    /// Whether several fingers may drag.
    fn is_multi_finger_dragging_enabled(&self) -> bool {
        self.config().multi_finger_dragging_enabled
    }

    /// Allows or forbids dragging with several fingers.
    fn set_multi_finger_dragging_enabled(&mut self, enabled: bool) {
        self.config_mut().multi_finger_dragging_enabled = enabled;
    }

    /// Whether two-finger rotation is on.
    fn is_rotation_enabled(&self) -> bool {
        self.config().rotation_enabled
    }

    /// Turns two-finger rotation on or off.
    fn set_rotation_enabled(&mut self, enabled: bool) {
        self.config_mut().rotation_enabled = enabled;
    }
}

/// Register one handler per event kind.
///
/// Registering replaces the previous handler; `clear_*` removes it.
pub trait GestureObservable {
    /// The handler slots.
    fn observers_mut(&mut self) -> &mut Observers;

    /// Called with the new scale after every change.
    fn on_scale_changed(&mut self, f: impl FnMut(f64) + 'static) {
        self.observers_mut().set_scale_changed(f);
    }

    /// Called when a pinch or an animated transition ends.
    fn on_scaling_ended(&mut self, f: impl FnMut(ScalingType) + 'static) {
        self.observers_mut().set_scaling_ended(f);
    }

    /// Called with the total translation after every change.
    fn on_translated(&mut self, f: impl FnMut(Vec2) + 'static) {
        self.observers_mut().set_translated(f);
    }

    /// Called for a confirmed tap, with its position in content space.
    fn on_tap(&mut self, f: impl FnMut(&PointerEvent, Point) + 'static) {
        self.observers_mut().set_tap(f);
    }

    /// Called for every raw pointer event.
    fn on_touch(&mut self, f: impl FnMut(&PointerEvent) + 'static) {
        self.observers_mut().set_touch(f);
    }

    /// Called for every drag.
    fn on_drag(
        &mut self,
        f: impl FnMut(TransformedPoint, Option<TransformedPoint>, bool) + 'static,
    ) {
        self.observers_mut().set_drag(f);
    }

    /// Removes the scale-changed handler.
    fn clear_scale_changed(&mut self) {
        self.observers_mut().clear_scale_changed();
    }

    /// Removes the scaling-ended handler.
    fn clear_scaling_ended(&mut self) {
        self.observers_mut().clear_scaling_ended();
    }

    /// Removes the translated handler.
    fn clear_translated(&mut self) {
        self.observers_mut().clear_translated();
    }

    /// Removes the tap handler.
    fn clear_tap(&mut self) {
        self.observers_mut().clear_tap();
    }

    /// Removes the touch handler.
    fn clear_touch(&mut self) {
        self.observers_mut().clear_touch();
    }

    /// Removes the drag handler.
    fn clear_drag(&mut self) {
        self.observers_mut().clear_drag();
    }
}

/// Coordinate queries against the targeted surface.
///
/// Without a bound target, [`map_point`](Self::map_point) returns its input
/// and the rotation queries return the origin.
pub trait PointMapper {
    /// Maps a container-space point to the target's untransformed space.
    fn map_point(&self, point: Point) -> Point;

    /// Where a point seen on the rotated target was before the rotation.
    fn point_before_rotation(&self, point: Point, rotation_degrees: f64) -> Point;

    /// Where an unrotated point lands once the target is rotated.
    fn point_after_rotation(&self, point: Point, rotation_degrees: f64) -> Point;

    /// The target's scaled and translated rectangle.
    fn current_content_rect(&self) -> Option<Rect>;
}
