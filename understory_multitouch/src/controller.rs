// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transform controller.
//!
//! ## Usage
//!
//! 1) Construct with a [`Config`].
//! 2) Call [`TransformController::bind`] once the container and content sizes
//!    are known. Until then every command is a no-op and every query returns
//!    a neutral value.
//! 3) Apply gesture intents with [`TransformController::apply_intent`], or
//!    call the commands directly.
//! 4) Drive animated transitions with [`TransformController::advance_animation`],
//!    or sample [`TransformController::active_transition`] with an external
//!    animator and feed [`TransformController::apply_animation_sample`] and
//!    [`TransformController::finish_animation`].
//!
//! Scale and translation only change through [`TransformController::scale_by`]
//! and [`TransformController::translate_by`]; both clamp and both notify.

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size, Vec2};
use understory_gesture::{GestureIntent, PointerEvent, TransformSnapshot};
use understory_touch_math::{map_point_between, scale_rect_about_center};

use crate::animation::{
    AnimationSample, AnimationSlot, Easing, FloatRange, Transition, TransitionKind,
};
use crate::{
    Config, Configurable, GestureObservable, Observers, PointMapper, Surface, SurfaceId,
    TransformedPoint, mapper,
};

/// Owns the transform state of every known surface and applies changes to
/// the targeted one.
#[derive(Debug)]
pub struct TransformController {
    config: Config,
    container: Option<Size>,
    surfaces: HashMap<SurfaceId, Surface>,
    target: SurfaceId,
    animation: AnimationSlot,
    easing: Easing,
    observers: Observers,
}

impl Default for TransformController {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl TransformController {
    /// Creates an unbound controller targeting surface `0`.
    ///
    /// A `config` that fails [`Config::validate`] is replaced by the defaults.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("invalid config ({e}), using defaults");
                Config::default()
            }
        };
        Self {
            config,
            container: None,
            surfaces: HashMap::new(),
            target: SurfaceId(0),
            animation: AnimationSlot::default(),
            easing: Easing::default(),
            observers: Observers::default(),
        }
    }

    // --- binding ---

    /// Sets the container size and binds the targeted surface.
    pub fn bind(&mut self, container: Size, content_size: Size) {
        self.set_container_size(container);
        self.bind_surface(self.target.0, content_size);
    }

    /// Sets the container size.
    pub fn set_container_size(&mut self, container: Size) {
        if !is_usable(container) {
            log::warn!("ignoring container size {container:?}");
            return;
        }
        self.container = Some(container);
    }

    /// Makes the surface at `index` known with its untransformed size.
    ///
    /// A surface that is already known keeps its state.
    pub fn bind_surface(&mut self, index: usize, content_size: Size) {
        if !is_usable(content_size) {
            log::warn!("ignoring surface {index} with size {content_size:?}");
            return;
        }
        self.surfaces.entry(SurfaceId(index)).or_insert_with(|| {
            log::debug!("bound surface {index} at {content_size:?}");
            Surface::new(content_size)
        });
    }

    /// Forgets the surface at `index`, returning its last state.
    pub fn detach_surface(&mut self, index: usize) -> Option<Surface> {
        let id = SurfaceId(index);
        if id == self.target {
            self.drop_animation();
        }
        let removed = self.surfaces.remove(&id);
        if removed.is_some() {
            log::debug!("detached surface {index}");
        }
        removed
    }

    /// Returns `true` once the container size and the targeted surface are known.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.target().is_some()
    }

    /// The container size, if set.
    #[must_use]
    pub fn container_size(&self) -> Option<Size> {
        self.container
    }

    /// Index of the targeted surface.
    #[must_use]
    pub fn target_index(&self) -> usize {
        self.target.0
    }

    /// Retargets subsequent gestures. Drops any running transition.
    pub fn set_target_index(&mut self, index: usize) {
        if self.target.0 == index {
            return;
        }
        self.drop_animation();
        log::debug!("target surface {} -> {index}", self.target.0);
        self.target = SurfaceId(index);
    }

    /// The surface at `index`, if known.
    #[must_use]
    pub fn surface(&self, index: usize) -> Option<&Surface> {
        self.surfaces.get(&SurfaceId(index))
    }

    /// Attaches host data to a known surface.
    pub fn set_surface_tag(&mut self, index: usize, tag: Option<u64>) {
        if let Some(surface) = self.surfaces.get_mut(&SurfaceId(index)) {
            surface.set_tag(tag);
        }
    }

    /// Host data attached to the surface at `index`.
    #[must_use]
    pub fn surface_tag(&self, index: usize) -> Option<u64> {
        self.surface(index).and_then(Surface::tag)
    }

    fn target(&self) -> Option<(&Surface, Size)> {
        let container = self.container?;
        let surface = self.surfaces.get(&self.target)?;
        Some((surface, container))
    }

    fn target_mut(&mut self) -> Option<(&mut Surface, Size)> {
        let container = self.container?;
        let surface = self.surfaces.get_mut(&self.target)?;
        Some((surface, container))
    }

    // --- queries ---

    /// Current scale, or `1` without a target.
    #[must_use]
    pub fn current_scale(&self) -> f64 {
        self.target().map_or(1.0, |(s, _)| s.transform().scale)
    }

    /// Current translation, or zero without a target.
    #[must_use]
    pub fn current_translation(&self) -> Vec2 {
        self.target().map_or(Vec2::ZERO, |(s, _)| s.transform().translation)
    }

    /// Current rotation in degrees, or zero without a target.
    #[must_use]
    pub fn current_rotation(&self) -> f64 {
        self.target()
            .map_or(0.0, |(s, _)| s.content().rotation_degrees)
    }

    /// Whether the target's scale differs from `min_scale`.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.target()
            .is_some_and(|(s, _)| s.transform().scale != self.config.min_scale())
    }

    /// The values the gesture state machine needs, or `None` without a target.
    #[must_use]
    pub fn snapshot(&self) -> Option<TransformSnapshot> {
        self.target().map(|(s, _)| {
            let t = s.transform();
            TransformSnapshot {
                scale: t.scale,
                rotation_degrees: t.rotation_degrees,
            }
        })
    }

    // --- primitives ---

    /// Multiplies the scale by `factor`, clamped to the configured range.
    pub fn scale_by(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            log::trace!("ignoring scale factor {factor}");
            return;
        }
        let (lower, upper) = (self.config.lower_scale_bound(), self.config.max_scale());
        let Some((surface, _)) = self.target_mut() else {
            log::trace!("scale_by without a target");
            return;
        };
        let scale = surface.scale_by(factor, lower, upper);
        self.observers.scale_changed(scale);
    }

    /// Translates by `delta`, clamped to the content's overflow.
    pub fn translate_by(&mut self, delta: Vec2) {
        let Some((surface, container)) = self.target_mut() else {
            log::trace!("translate_by without a target");
            return;
        };
        let total = surface.translate_by(delta, container);
        self.observers.translated(total);
    }

    // --- commands ---

    /// Scales by `factor`, then translates so `focus` stays under the fingers.
    pub fn scale_about(&mut self, factor: f64, focus: Point) {
        let Some(before) = self.current_content_rect() else {
            return;
        };
        self.scale_by(factor);
        let Some(after) = self.current_content_rect() else {
            return;
        };
        let mapped = map_point_between(focus, before, after);
        self.translate_by(focus - mapped);
    }

    /// Sets the rotation. Ignored while rotation is disabled.
    pub fn set_rotation(&mut self, degrees: f64) {
        if !self.config.rotation_enabled {
            log::trace!("rotation disabled, ignoring {degrees}");
            return;
        }
        if let Some((surface, _)) = self.target_mut() {
            surface.set_rotation(degrees);
        }
    }

    /// Sets the scale directly.
    ///
    /// Zero and values outside `[min_scale, max_scale]` are ignored. A result
    /// below `1` re-centers the surface.
    pub fn set_scale(&mut self, scale: f64) {
        if scale == 0.0
            || !scale.is_finite()
            || scale < self.config.min_scale()
            || scale > self.config.max_scale()
        {
            log::debug!("ignoring scale {scale}");
            return;
        }
        let Some((surface, _)) = self.target() else {
            return;
        };
        let current = surface.transform().scale;
        self.scale_by(scale / current);
        if self.current_scale() < 1.0 {
            self.centralize();
        }
    }

    /// Returns to the resting scale and zero translation.
    ///
    /// Without animation this completes synchronously; with animation it
    /// starts a zoom-out transition.
    pub fn reset_scale(&mut self, animate: bool) {
        if animate {
            self.animate_zoom_out();
            return;
        }
        let Some((surface, _)) = self.target() else {
            return;
        };
        let scale = surface.transform().scale;
        self.scale_by(1.0 / scale);
        self.centralize();
    }

    /// Brings a scale below `min_scale` back into range.
    ///
    /// An overshoot below `1` with `min_scale < 1` bounces back in place.
    /// Otherwise the surface zooms out and re-centers, animated or not.
    pub fn correct_scale_if_needed(&mut self, animate: bool) {
        let Some((surface, _)) = self.target() else {
            return;
        };
        let scale = surface.transform().scale;
        let min = self.config.min_scale();
        if scale >= min {
            return;
        }
        if scale < 1.0 && min < 1.0 {
            self.animate_scale_out();
        } else if animate {
            self.animate_zoom_out();
        } else {
            self.scale_by(self.config.resting_scale() / scale);
            self.centralize();
        }
    }

    fn centralize(&mut self) {
        let t = self.current_translation();
        self.translate_by(-t);
    }

    // --- gesture intents ---

    /// Applies one gesture intent.
    pub fn apply_intent(&mut self, intent: GestureIntent) {
        match intent {
            GestureIntent::Touch(event) => self.observers.touch(&event),
            GestureIntent::Rotate { degrees } => self.set_rotation(degrees),
            GestureIntent::Drag {
                anchor,
                second,
                multi_touch,
            } => self.report_drag(anchor, second, multi_touch),
            GestureIntent::TranslateBy(delta) => self.translate_by(delta),
            GestureIntent::ScaleBy { factor, focus } => self.scale_about(factor, focus),
            GestureIntent::CorrectBounds { animate } => self.correct_scale_if_needed(animate),
            GestureIntent::ScalingEnded(kind) => self.observers.scaling_ended(kind),
            GestureIntent::ZoomIn { focus } => self.animate_zoom_in(focus),
            GestureIntent::ZoomOut => self.animate_zoom_out(),
            GestureIntent::Tap { event, position } => self.report_tap(&event, position),
        }
    }

    fn report_drag(&mut self, anchor: Point, second: Option<Point>, multi_touch: bool) {
        if !self.is_bound() {
            return;
        }
        let first = TransformedPoint {
            original: anchor,
            transformed: self.map_point(anchor),
        };
        let second = second.map(|p| TransformedPoint {
            original: p,
            transformed: self.map_point(p),
        });
        self.observers.drag(first, second, multi_touch);
    }

    fn report_tap(&mut self, event: &PointerEvent, position: Point) {
        if !self.is_bound() {
            return;
        }
        let rotation = self.current_rotation();
        let unrotated = if rotation == 0.0 {
            position
        } else {
            self.point_before_rotation(position, rotation)
        };
        let mapped = self.map_point(unrotated);
        self.observers.tap(event, mapped);
    }

    // --- animation ---

    /// Timing curve for transitions started from now on.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// The running transition, for hosts that sample it themselves.
    #[must_use]
    pub fn active_transition(&self) -> Option<&Transition> {
        self.animation.current()
    }

    /// Animates towards `max_scale` (or `1` from below `1`) keeping `focus`
    /// where it is on screen.
    pub fn animate_zoom_in(&mut self, focus: Point) {
        let Some((surface, _)) = self.target() else {
            return;
        };
        let scale = surface.transform().scale;
        let rect = surface.content().content_rect;
        let target = if scale < 1.0 {
            1.0
        } else {
            self.config.max_scale()
        };
        let zoomed = scale_rect_about_center(rect, target / scale);
        let shift = focus - map_point_between(focus, rect, zoomed);
        self.start_transition(
            TransitionKind::ZoomIn,
            FloatRange::new(scale, target),
            Some([FloatRange::new(0.0, shift.x), FloatRange::new(0.0, shift.y)]),
        );
    }

    /// Animates back to the resting scale and zero translation.
    pub fn animate_zoom_out(&mut self) {
        let Some((surface, _)) = self.target() else {
            return;
        };
        let t = surface.transform();
        let target = self.zoom_out_target(t.scale);
        self.start_transition(
            TransitionKind::ZoomOut,
            FloatRange::new(t.scale, target),
            Some([
                FloatRange::new(t.translation.x, 0.0),
                FloatRange::new(t.translation.y, 0.0),
            ]),
        );
    }

    /// Animates the scale back up without moving the surface.
    pub fn animate_scale_out(&mut self) {
        let Some((surface, _)) = self.target() else {
            return;
        };
        let scale = surface.transform().scale;
        let target = self.zoom_out_target(scale);
        self.start_transition(
            TransitionKind::ScaleOut,
            FloatRange::new(scale, target),
            None,
        );
    }

    fn zoom_out_target(&self, scale: f64) -> f64 {
        if scale < 1.0 {
            self.config.min_scale()
        } else {
            self.config.resting_scale()
        }
    }

    fn start_transition(
        &mut self,
        kind: TransitionKind,
        scale: FloatRange,
        translation: Option<[FloatRange; 2]>,
    ) {
        let transition = Transition {
            kind,
            scale,
            translation,
            duration_ms: self.config.animation_duration_ms,
            easing: self.easing,
        };
        if let Some(replaced) = self.animation.start(transition) {
            log::debug!("{:?} replaced by {kind:?}", replaced.kind);
        } else {
            log::debug!("started {kind:?} to scale {}", scale.to);
        }
    }

    fn drop_animation(&mut self) {
        if let Some(dropped) = self.animation.take() {
            log::debug!("dropped {:?}", dropped.kind);
        }
    }

    /// Applies one set of animated values.
    ///
    /// Deltas are taken against the surface as it is now, so input that
    /// arrives mid-transition is absorbed rather than overwritten.
    pub fn apply_animation_sample(&mut self, sample: AnimationSample) {
        let Some((surface, _)) = self.target() else {
            return;
        };
        let t = surface.transform();
        log::trace!("animation sample {sample:?}");
        self.scale_by(sample.scale / t.scale);
        if let Some(translation) = sample.translation {
            let current = self.current_translation();
            self.translate_by(translation - current);
        }
    }

    /// Ends the running transition and reports its completion.
    pub fn finish_animation(&mut self) {
        if let Some(done) = self.animation.take() {
            log::debug!("finished {:?}", done.kind);
            self.observers.scaling_ended(done.kind.completion());
        }
    }

    /// Advances the built-in animation clock by `dt_ms`.
    ///
    /// Returns `true` while a transition is still running afterwards.
    pub fn advance_animation(&mut self, dt_ms: u64) -> bool {
        let Some(tick) = self.animation.advance(dt_ms) else {
            return false;
        };
        self.apply_animation_sample(tick.sample);
        match tick.finished {
            Some(done) => {
                log::debug!("finished {:?}", done.kind);
                self.observers.scaling_ended(done.kind.completion());
                false
            }
            None => true,
        }
    }
}

fn is_usable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

impl Configurable for TransformController {
    fn config(&self) -> &Config {
        &self.config
    }

    fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Disabling rotation also puts every surface back at zero degrees.
    fn set_rotation_enabled(&mut self, enabled: bool) {
        self.config.rotation_enabled = enabled;
        if enabled {
            return;
        }
        for surface in self.surfaces.values_mut() {
            surface.set_rotation(0.0);
        }
    }
}

impl GestureObservable for TransformController {
    fn observers_mut(&mut self) -> &mut Observers {
        &mut self.observers
    }
}

impl PointMapper for TransformController {
    fn map_point(&self, point: Point) -> Point {
        match self.target() {
            Some((surface, container)) => mapper::map_point(surface, container, point),
            None => point,
        }
    }

    fn point_before_rotation(&self, point: Point, rotation_degrees: f64) -> Point {
        self.target().map_or(Point::ZERO, |(surface, _)| {
            mapper::point_before_rotation(surface, point, rotation_degrees)
        })
    }

    fn point_after_rotation(&self, point: Point, rotation_degrees: f64) -> Point {
        self.target().map_or(Point::ZERO, |(surface, _)| {
            mapper::point_after_rotation(surface, point, rotation_degrees)
        })
    }

    fn current_content_rect(&self) -> Option<Rect> {
        self.target().map(|(s, _)| s.content().content_rect)
    }
}
