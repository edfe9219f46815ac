// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Options shared by the gesture layer and the transform controller.

use core::fmt;

use understory_gesture::GesturePolicy;

/// Default lower scale limit.
pub const DEFAULT_MIN_SCALE: f64 = 1.0;
/// Default upper scale limit.
pub const DEFAULT_MAX_SCALE: f64 = 4.0;
/// Default multiplier applied to `min_scale` while the bounds-limit effect is on.
pub const DEFAULT_BOUNDS_LIMIT_EFFECT_SCALE_FACTOR: f64 = 0.9;
/// Default duration of animated zoom transitions.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 350;

/// Why a configuration was rejected as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// `min_scale` was zero or negative.
    NonPositiveMinScale,
    /// `max_scale` was below `min_scale`.
    MaxBelowMin,
    /// `bounds_limit_effect_scale_factor` was zero or negative.
    NonPositiveBoundsFactor,
    /// A scale value was NaN or infinite.
    NonFinite,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NonPositiveMinScale => "min_scale must be greater than zero",
            Self::MaxBelowMin => "max_scale must not be below min_scale",
            Self::NonPositiveBoundsFactor => {
                "bounds_limit_effect_scale_factor must be greater than zero"
            }
            Self::NonFinite => "scale values must be finite",
        })
    }
}

impl core::error::Error for ConfigError {}

/// Transform and gesture options.
///
/// The scale limits are only reachable through setters, which silently keep
/// the previous value when given something unusable. [`Config::validate`] and
/// `TryFrom<ConfigRecord>` check a whole configuration at once.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ConfigRecord")
)]
pub struct Config {
    /// Pinch, scroll and double-tap handling.
    pub zoom_enabled: bool,
    /// Double-tap zoom; also requires `zoom_enabled`.
    pub double_tap_enabled: bool,
    pub(crate) min_scale: f64,
    pub(crate) max_scale: f64,
    /// Let a pinch overshoot below `min_scale` and bounce back.
    pub bounds_limit_effect_enabled: bool,
    pub(crate) bounds_limit_effect_scale_factor: f64,
    /// Translation while exactly one pointer is down.
    pub one_finger_dragging_enabled: bool,
    /// Translation while several pointers are down.
    pub multi_finger_dragging_enabled: bool,
    /// Two-finger rotation.
    pub rotation_enabled: bool,
    /// Duration of animated zoom transitions.
    pub animation_duration_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            double_tap_enabled: true,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            bounds_limit_effect_enabled: false,
            bounds_limit_effect_scale_factor: DEFAULT_BOUNDS_LIMIT_EFFECT_SCALE_FACTOR,
            one_finger_dragging_enabled: true,
            multi_finger_dragging_enabled: true,
            rotation_enabled: false,
            animation_duration_ms: DEFAULT_ANIMATION_DURATION_MS,
        }
    }
}

impl Config {
    /// Checks the scale options against each other.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scales = [
            self.min_scale,
            self.max_scale,
            self.bounds_limit_effect_scale_factor,
        ];
        if scales.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::NonFinite);
        }
        if self.min_scale <= 0.0 {
            return Err(ConfigError::NonPositiveMinScale);
        }
        if self.max_scale < self.min_scale {
            return Err(ConfigError::MaxBelowMin);
        }
        if self.bounds_limit_effect_scale_factor <= 0.0 {
            return Err(ConfigError::NonPositiveBoundsFactor);
        }
        Ok(())
    }

    /// The gesture-facing subset of the options.
    #[must_use]
    pub fn gesture_policy(&self) -> GesturePolicy {
        GesturePolicy {
            zoom_enabled: self.zoom_enabled,
            double_tap_enabled: self.double_tap_enabled,
            one_finger_dragging_enabled: self.one_finger_dragging_enabled,
            multi_finger_dragging_enabled: self.multi_finger_dragging_enabled,
            rotation_enabled: self.rotation_enabled,
        }
    }

    /// Lower scale limit. Always greater than zero.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Upper scale limit.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// How far below `min_scale` the overshoot may go, as a multiplier.
    #[must_use]
    pub fn bounds_limit_effect_scale_factor(&self) -> f64 {
        self.bounds_limit_effect_scale_factor
    }

    /// Lowest scale a pinch may reach, including the bounds-limit overshoot.
    ///
    /// Never zero, even when the product of two tiny limits underflows.
    #[must_use]
    pub fn lower_scale_bound(&self) -> f64 {
        if !self.bounds_limit_effect_enabled {
            return self.min_scale;
        }
        let bound = self.bounds_limit_effect_scale_factor * self.min_scale;
        if bound > 0.0 { bound } else { self.min_scale }
    }

    /// Scale a zoom out settles on: `max(min_scale, 1)`.
    #[must_use]
    pub fn resting_scale(&self) -> f64 {
        self.min_scale.max(1.0)
    }

    /// Sets `min_scale`; non-positive and non-finite values are ignored.
    pub fn set_min_scale(&mut self, value: f64) {
        if value <= 0.0 || !value.is_finite() {
            log::warn!("ignoring min_scale {value}");
            return;
        }
        self.min_scale = value;
    }

    /// Sets `max_scale`; non-positive and non-finite values are ignored.
    pub fn set_max_scale(&mut self, value: f64) {
        if value <= 0.0 || !value.is_finite() {
            log::warn!("ignoring max_scale {value}");
            return;
        }
        self.max_scale = value;
    }

    /// Sets `bounds_limit_effect_scale_factor`; non-positive and non-finite
    /// values are ignored.
    pub fn set_bounds_limit_effect_scale_factor(&mut self, value: f64) {
        if value <= 0.0 || !value.is_finite() {
            log::warn!("ignoring bounds_limit_effect_scale_factor {value}");
            return;
        }
        self.bounds_limit_effect_scale_factor = value;
    }

    /// Builder form of [`Self::set_min_scale`].
    #[must_use]
    pub fn with_min_scale(mut self, value: f64) -> Self {
        self.set_min_scale(value);
        self
    }

    /// Builder form of [`Self::set_max_scale`].
    #[must_use]
    pub fn with_max_scale(mut self, value: f64) -> Self {
        self.set_max_scale(value);
        self
    }

    /// Enables the bounds-limit overshoot with the given factor.
    #[must_use]
    pub fn with_bounds_limit_effect(mut self, factor: f64) -> Self {
        self.bounds_limit_effect_enabled = true;
        self.set_bounds_limit_effect_scale_factor(factor);
        self
    }

    /// Sets `zoom_enabled`.
    #[must_use]
    pub fn with_zoom(mut self, enabled: bool) -> Self {
        self.zoom_enabled = enabled;
        self
    }

    /// Sets `double_tap_enabled`.
    #[must_use]
    pub fn with_double_tap(mut self, enabled: bool) -> Self {
        self.double_tap_enabled = enabled;
        self
    }

    /// Sets `rotation_enabled`.
    #[must_use]
    pub fn with_rotation(mut self, enabled: bool) -> Self {
        self.rotation_enabled = enabled;
        self
    }

    /// Sets both dragging options.
    #[must_use]
    pub fn with_dragging(mut self, one_finger: bool, multi_finger: bool) -> Self {
        self.one_finger_dragging_enabled = one_finger;
        self.multi_finger_dragging_enabled = multi_finger;
        self
    }

    /// Sets `animation_duration_ms`.
    #[must_use]
    pub fn with_animation_duration_ms(mut self, duration_ms: u64) -> Self {
        self.animation_duration_ms = duration_ms;
        self
    }
}

/// A loosely specified configuration, as loaded from a settings file.
///
/// Missing fields take their defaults. Convert with `Config::try_from`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[allow(missing_docs, reason = "fields mirror `Config`")]
pub struct ConfigRecord {
    pub zoom_enabled: Option<bool>,
    pub double_tap_enabled: Option<bool>,
    pub min_scale: Option<f64>,
    pub max_scale: Option<f64>,
    pub bounds_limit_effect_enabled: Option<bool>,
    pub bounds_limit_effect_scale_factor: Option<f64>,
    pub one_finger_dragging_enabled: Option<bool>,
    pub multi_finger_dragging_enabled: Option<bool>,
    pub rotation_enabled: Option<bool>,
    pub animation_duration_ms: Option<u64>,
}

impl TryFrom<ConfigRecord> for Config {
    type Error = ConfigError;

    fn try_from(record: ConfigRecord) -> Result<Self, Self::Error> {
        let d = Self::default();
        let config = Self {
            zoom_enabled: record.zoom_enabled.unwrap_or(d.zoom_enabled),
            double_tap_enabled: record.double_tap_enabled.unwrap_or(d.double_tap_enabled),
            min_scale: record.min_scale.unwrap_or(d.min_scale),
            max_scale: record.max_scale.unwrap_or(d.max_scale),
            bounds_limit_effect_enabled: record
                .bounds_limit_effect_enabled
                .unwrap_or(d.bounds_limit_effect_enabled),
            bounds_limit_effect_scale_factor: record
                .bounds_limit_effect_scale_factor
                .unwrap_or(d.bounds_limit_effect_scale_factor),
            one_finger_dragging_enabled: record
                .one_finger_dragging_enabled
                .unwrap_or(d.one_finger_dragging_enabled),
            multi_finger_dragging_enabled: record
                .multi_finger_dragging_enabled
                .unwrap_or(d.multi_finger_dragging_enabled),
            rotation_enabled: record.rotation_enabled.unwrap_or(d.rotation_enabled),
            animation_duration_ms: record
                .animation_duration_ms
                .unwrap_or(d.animation_duration_ms),
        };
        config.validate()?;
        Ok(config)
    }
}
