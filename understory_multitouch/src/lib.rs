// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_multitouch --heading-base-level=0

//! Understory Multitouch: pan, zoom and rotate a content surface with touch.
//!
//! This crate owns the live transform of a content surface inside a
//! container and keeps an exact mapping between what is on screen and the
//! content's own, untransformed coordinates.
//!
//! - [`TransformController`] owns per-surface state ([`Surface`]) and applies
//!   clamped scale and translation changes, bounds correction and animated
//!   zoom transitions.
//! - [`PointMapper`] answers "which content point is under this touch?",
//!   with or without rotation.
//! - [`MultiTouchFrame`] wires a gesture state machine from
//!   `understory_gesture` to a controller. It is what a host embeds.
//!
//! Nothing happens until the host calls `bind` with the container and content
//! sizes; until then commands are no-ops and queries return neutral values.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_gesture::ScaleSignal;
//! use understory_multitouch::{Config, MultiTouchFrame, PointMapper};
//!
//! let mut frame = MultiTouchFrame::new(Config::default());
//! frame.bind(Size::new(200.0, 200.0), Size::new(200.0, 200.0));
//!
//! // A pinch around the center doubles the scale.
//! let focus = Point::new(100.0, 100.0);
//! frame.on_scale_begin(&ScaleSignal::new(1.0, focus));
//! frame.on_scale(&ScaleSignal::new(2.0, focus).with_spans(100.0, 200.0));
//! assert_eq!(frame.current_scale(), 2.0);
//!
//! // The top-left corner of the screen now shows a quarter into the content.
//! let p = frame.map_point(Point::ZERO);
//! assert!((p.x - 50.0).abs() < 1e-9 && (p.y - 50.0).abs() < 1e-9);
//! ```
//!
//! ## Animation
//!
//! Double-tap zooms and bounds corrections are animated. The controller holds
//! one [`Transition`] at a time. Hosts either drive it with
//! [`TransformController::advance_animation`] or sample it with their own
//! animator and feed the values back.
//!
//! ## Features
//!
//! - `serde`: `Config` serializes, and deserializes through a validated
//!   [`ConfigRecord`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod animation;
mod api;
mod config;
mod controller;
mod events;
mod frame;
pub mod mapper;
mod surface;

pub use animation::{
    AnimationSample, AnimationSlot, Easing, FloatRange, Tick, Transition, TransitionKind,
};
pub use api::{Configurable, GestureObservable, PointMapper};
pub use config::{
    Config, ConfigError, ConfigRecord, DEFAULT_ANIMATION_DURATION_MS,
    DEFAULT_BOUNDS_LIMIT_EFFECT_SCALE_FACTOR, DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE,
};
pub use controller::TransformController;
pub use events::{Observers, TransformedPoint};
pub use frame::MultiTouchFrame;
pub use surface::{ContentState, Surface, SurfaceId, TransformState};
