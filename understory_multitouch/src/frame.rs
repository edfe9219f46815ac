// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-facing facade.

use kurbo::{Point, Rect, Size, Vec2};
use understory_gesture::{
    GestureIntent, GestureStateMachine, Intents, PointerEvent, RecognizedSignal,
    RecognizerConfig, ScaleSignal, ScrollSignal, SignalRecognizer,
};

use crate::{
    Config, Configurable, GestureObservable, Observers, PointMapper, Surface, TransformController,
};

/// A container whose targeted surface can be panned, zoomed and rotated.
///
/// Feed raw pointer events to [`handle_pointer`](Self::handle_pointer) and
/// recognizer callbacks to the `on_*` methods. Each input is interpreted by a
/// [`GestureStateMachine`] and the resulting intents are applied, in order,
/// to a [`TransformController`].
///
/// Hosts without a platform scroll/tap detector can enable the
/// [fallback recognizer](Self::with_fallback_recognizer) and call
/// [`poll`](Self::poll) once per frame.
#[derive(Debug, Default)]
pub struct MultiTouchFrame {
    controller: TransformController,
    machine: GestureStateMachine,
    recognizer: Option<SignalRecognizer>,
}

impl MultiTouchFrame {
    /// Creates an unbound frame.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            controller: TransformController::new(config),
            machine: GestureStateMachine::new(),
            recognizer: None,
        }
    }

    /// Derives scroll and tap signals from the raw stream.
    #[must_use]
    pub fn with_fallback_recognizer(mut self, config: RecognizerConfig) -> Self {
        self.recognizer = Some(SignalRecognizer::new(config));
        self
    }

    /// The transform controller.
    #[must_use]
    pub fn controller(&self) -> &TransformController {
        &self.controller
    }

    /// Mutable access to the transform controller.
    pub fn controller_mut(&mut self) -> &mut TransformController {
        &mut self.controller
    }

    /// See [`TransformController::bind`].
    pub fn bind(&mut self, container: Size, content_size: Size) {
        self.controller.bind(container, content_size);
    }

    /// See [`TransformController::bind_surface`].
    pub fn bind_surface(&mut self, index: usize, content_size: Size) {
        self.controller.bind_surface(index, content_size);
    }

    /// See [`TransformController::detach_surface`].
    pub fn detach_surface(&mut self, index: usize) -> Option<Surface> {
        self.controller.detach_surface(index)
    }

    /// See [`TransformController::set_container_size`].
    pub fn set_container_size(&mut self, container: Size) {
        self.controller.set_container_size(container);
    }

    fn apply(&mut self, intents: Intents) {
        for intent in intents {
            self.controller.apply_intent(intent);
        }
    }

    // --- input ---

    /// Handles one raw pointer event.
    ///
    /// Rotation and recognized scrolls are applied before the touch observer
    /// sees the event.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        let was_multi = self.machine.is_multi_touch();
        let policy = self.controller.config().gesture_policy();
        let intents = self
            .machine
            .on_pointer(event, &policy, self.controller.snapshot());
        if was_multi != self.machine.is_multi_touch() {
            log::debug!("multi-touch {}", self.machine.is_multi_touch());
        }

        let mut touch = None;
        for intent in intents {
            match intent {
                GestureIntent::Touch(e) => touch = Some(e),
                other => self.controller.apply_intent(other),
            }
        }

        if let Some(recognizer) = &mut self.recognizer {
            for signal in recognizer.on_pointer(event) {
                self.dispatch(signal);
            }
        }

        if let Some(e) = touch {
            self.controller.apply_intent(GestureIntent::Touch(e));
        }
    }

    /// Confirms a pending single tap from the fallback recognizer.
    pub fn poll(&mut self, now_ms: u64) {
        let signal = self.recognizer.as_mut().and_then(|r| r.poll(now_ms));
        if let Some(signal) = signal {
            self.dispatch(signal);
        }
    }

    fn dispatch(&mut self, signal: RecognizedSignal) {
        match signal {
            RecognizedSignal::Scroll(s) => self.on_scroll(&s),
            RecognizedSignal::DoubleTap { focus, .. } => self.on_double_tap(focus),
            RecognizedSignal::SingleTapConfirmed(event) => self.on_single_tap(&event),
        }
    }

    /// Handles a scroll callback.
    pub fn on_scroll(&mut self, signal: &ScrollSignal) {
        let policy = self.controller.config().gesture_policy();
        let intents = self.machine.on_scroll(signal, &policy);
        self.apply(intents);
    }

    /// Handles the pinch recognizer's begin callback.
    pub fn on_scale_begin(&mut self, signal: &ScaleSignal) {
        self.machine
            .on_scale_begin(signal, self.controller.snapshot());
    }

    /// Handles an in-progress pinch callback.
    pub fn on_scale(&mut self, signal: &ScaleSignal) {
        let policy = self.controller.config().gesture_policy();
        let intents = self.machine.on_scale(signal, &policy);
        self.apply(intents);
    }

    /// Handles the pinch recognizer's end callback.
    pub fn on_scale_end(&mut self, signal: &ScaleSignal) {
        let policy = self.controller.config().gesture_policy();
        let intents = self
            .machine
            .on_scale_end(signal, &policy, self.controller.snapshot());
        self.apply(intents);
    }

    /// Handles a double tap at `focus`.
    pub fn on_double_tap(&mut self, focus: Point) {
        let policy = self.controller.config().gesture_policy();
        let intents = self
            .machine
            .on_double_tap(focus, &policy, self.controller.snapshot());
        self.apply(intents);
    }

    /// Handles a confirmed single tap.
    pub fn on_single_tap(&mut self, event: &PointerEvent) {
        let intents = self.machine.on_single_tap(event);
        self.apply(intents);
    }

    // --- queries and commands ---

    /// Whether more than one pointer is down.
    #[must_use]
    pub fn is_multi_touch_active(&self) -> bool {
        self.machine.is_multi_touch()
    }

    /// See [`TransformController::is_zoomed`].
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.controller.is_zoomed()
    }

    /// Index of the targeted surface.
    #[must_use]
    pub fn target_index(&self) -> usize {
        self.controller.target_index()
    }

    /// Retargets subsequent gestures.
    pub fn set_target_index(&mut self, index: usize) {
        self.controller.set_target_index(index);
    }

    /// Current scale of the target.
    #[must_use]
    pub fn current_scale(&self) -> f64 {
        self.controller.current_scale()
    }

    /// Current translation of the target.
    #[must_use]
    pub fn current_translation(&self) -> Vec2 {
        self.controller.current_translation()
    }

    /// Current rotation of the target in degrees.
    #[must_use]
    pub fn current_rotation(&self) -> f64 {
        self.controller.current_rotation()
    }

    /// See [`TransformController::set_scale`].
    pub fn set_scale(&mut self, scale: f64) {
        self.controller.set_scale(scale);
    }

    /// See [`TransformController::reset_scale`].
    pub fn reset_scale(&mut self, animate: bool) {
        self.controller.reset_scale(animate);
    }

    /// See [`TransformController::advance_animation`].
    pub fn advance_animation(&mut self, dt_ms: u64) -> bool {
        self.controller.advance_animation(dt_ms)
    }
}

impl Configurable for MultiTouchFrame {
    fn config(&self) -> &Config {
        self.controller.config()
    }

    fn config_mut(&mut self) -> &mut Config {
        self.controller.config_mut()
    }

    fn set_rotation_enabled(&mut self, enabled: bool) {
        self.controller.set_rotation_enabled(enabled);
    }
}

impl GestureObservable for MultiTouchFrame {
    fn observers_mut(&mut self) -> &mut Observers {
        self.controller.observers_mut()
    }
}

impl PointMapper for MultiTouchFrame {
    fn map_point(&self, point: Point) -> Point {
        self.controller.map_point(point)
    }

    fn point_before_rotation(&self, point: Point, rotation_degrees: f64) -> Point {
        self.controller.point_before_rotation(point, rotation_degrees)
    }

    fn point_after_rotation(&self, point: Point, rotation_degrees: f64) -> Point {
        self.controller.point_after_rotation(point, rotation_degrees)
    }

    fn current_content_rect(&self) -> Option<Rect> {
        self.controller.current_content_rect()
    }
}
