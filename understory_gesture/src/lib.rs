// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: turn multi-touch input into transform intents.
//!
//! The central type is [`GestureStateMachine`]. It consumes two streams:
//! - raw pointer events ([`PointerEvent`]), in dispatch order, and
//! - callbacks from a scroll/tap/pinch recognizer ([`ScrollSignal`],
//!   [`ScaleSignal`], double and single taps).
//!
//! It tracks how many pointers are down, the scale captured when a pinch
//! began and the reference angle captured when a second finger landed, and
//! answers each input with a short list of [`GestureIntent`]s for a
//! transform owner to apply in order.
//!
//! The machine holds no transform state. When it needs the current scale or
//! rotation it takes a [`TransformSnapshot`]; pass `None` when nothing is
//! targeted and the corresponding intents are skipped. Which gestures are
//! allowed is decided per call by a [`GesturePolicy`].
//!
//! For hosts without a platform gesture detector, [`SignalRecognizer`]
//! derives scroll, single-tap and double-tap signals from the raw stream.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_gesture::{
//!     GestureIntent, GesturePolicy, GestureStateMachine, ScaleSignal, TransformSnapshot,
//! };
//!
//! let mut machine = GestureStateMachine::new();
//! let policy = GesturePolicy::default();
//! let snapshot = Some(TransformSnapshot { scale: 1.0, rotation_degrees: 0.0 });
//!
//! let begin = ScaleSignal::new(1.0, Point::new(50.0, 50.0));
//! machine.on_scale_begin(&begin, snapshot);
//!
//! let pinch = ScaleSignal::new(1.2, Point::new(50.0, 50.0)).with_spans(100.0, 120.0);
//! let intents = machine.on_scale(&pinch, &policy);
//! assert_eq!(
//!     intents[0],
//!     GestureIntent::ScaleBy { factor: 1.2, focus: Point::new(50.0, 50.0) }
//! );
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
mod intent;
mod machine;
mod pointer;
mod policy;
mod recognizer;

pub use intent::{
    GestureIntent, Intents, ScaleSignal, ScalingType, ScrollSignal, TransformSnapshot,
};
pub use machine::{GestureStateMachine, SPAN_JITTER_THRESHOLD, ScalePhase};
pub use pointer::{PointerAction, PointerEvent, PointerSample, PointerTracker, TouchPhase};
pub use policy::GesturePolicy;
pub use recognizer::{RecognizedSignal, RecognizerConfig, SignalRecognizer, Signals};
