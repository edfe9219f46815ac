// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observer slots, one handler per event kind.

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Vec2};
use understory_gesture::{PointerEvent, ScalingType};

/// A screen point together with its position in content space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformedPoint {
    /// The point as reported by the pointer stream.
    pub original: Point,
    /// The same point mapped to the content's untransformed space.
    pub transformed: Point,
}

type ScaleChanged = Box<dyn FnMut(f64)>;
type ScalingEnded = Box<dyn FnMut(ScalingType)>;
type Translated = Box<dyn FnMut(Vec2)>;
type Tap = Box<dyn FnMut(&PointerEvent, Point)>;
type Touch = Box<dyn FnMut(&PointerEvent)>;
type Drag = Box<dyn FnMut(TransformedPoint, Option<TransformedPoint>, bool)>;

/// Registered event handlers.
///
/// Registering a handler replaces the previous one for that event kind.
#[derive(Default)]
pub struct Observers {
    scale_changed: Option<ScaleChanged>,
    scaling_ended: Option<ScalingEnded>,
    translated: Option<Translated>,
    tap: Option<Tap>,
    touch: Option<Touch>,
    drag: Option<Drag>,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("scale_changed", &self.scale_changed.is_some())
            .field("scaling_ended", &self.scaling_ended.is_some())
            .field("translated", &self.translated.is_some())
            .field("tap", &self.tap.is_some())
            .field("touch", &self.touch.is_some())
            .field("drag", &self.drag.is_some())
            .finish()
    }
}

impl Observers {
    /// Handles the new scale after every change.
    pub fn set_scale_changed(&mut self, f: impl FnMut(f64) + 'static) {
        self.scale_changed = Some(Box::new(f));
    }

    /// Handles the end of a pinch or an animated transition.
    pub fn set_scaling_ended(&mut self, f: impl FnMut(ScalingType) + 'static) {
        self.scaling_ended = Some(Box::new(f));
    }

    /// Handles the total translation after every change.
    pub fn set_translated(&mut self, f: impl FnMut(Vec2) + 'static) {
        self.translated = Some(Box::new(f));
    }

    /// Handles a confirmed tap with its content-space position.
    pub fn set_tap(&mut self, f: impl FnMut(&PointerEvent, Point) + 'static) {
        self.tap = Some(Box::new(f));
    }

    /// Handles every raw pointer event.
    pub fn set_touch(&mut self, f: impl FnMut(&PointerEvent) + 'static) {
        self.touch = Some(Box::new(f));
    }

    /// Handles every drag with its anchor, optional current point and
    /// whether several pointers were down.
    pub fn set_drag(
        &mut self,
        f: impl FnMut(TransformedPoint, Option<TransformedPoint>, bool) + 'static,
    ) {
        self.drag = Some(Box::new(f));
    }

    /// Removes the scale-changed handler.
    pub fn clear_scale_changed(&mut self) {
        self.scale_changed = None;
    }

    /// Removes the scaling-ended handler.
    pub fn clear_scaling_ended(&mut self) {
        self.scaling_ended = None;
    }

    /// Removes the translated handler.
    pub fn clear_translated(&mut self) {
        self.translated = None;
    }

    /// Removes the tap handler.
    pub fn clear_tap(&mut self) {
        self.tap = None;
    }

    /// Removes the touch handler.
    pub fn clear_touch(&mut self) {
        self.touch = None;
    }

    /// Removes the drag handler.
    pub fn clear_drag(&mut self) {
        self.drag = None;
    }

    /// Removes every handler.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn scale_changed(&mut self, scale: f64) {
        if let Some(f) = &mut self.scale_changed {
            f(scale);
        }
    }

    pub(crate) fn scaling_ended(&mut self, kind: ScalingType) {
        if let Some(f) = &mut self.scaling_ended {
            f(kind);
        }
    }

    pub(crate) fn translated(&mut self, total: Vec2) {
        if let Some(f) = &mut self.translated {
            f(total);
        }
    }

    pub(crate) fn tap(&mut self, event: &PointerEvent, mapped: Point) {
        if let Some(f) = &mut self.tap {
            f(event, mapped);
        }
    }

    pub(crate) fn touch(&mut self, event: &PointerEvent) {
        if let Some(f) = &mut self.touch {
            f(event);
        }
    }

    pub(crate) fn drag(
        &mut self,
        first: TransformedPoint,
        second: Option<TransformedPoint>,
        multi_touch: bool,
    ) {
        if let Some(f) = &mut self.drag {
            f(first, second, multi_touch);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::*;

    #[test]
    fn registration_replaces_previous_handler() {
        let first = Rc::new(Cell::new(0.0));
        let second = Rc::new(Cell::new(0.0));
        let mut obs = Observers::default();

        let sink = first.clone();
        obs.set_scale_changed(move |s| sink.set(s));
        obs.scale_changed(2.0);

        let sink = second.clone();
        obs.set_scale_changed(move |s| sink.set(s));
        obs.scale_changed(3.0);

        assert_eq!(first.get(), 2.0);
        assert_eq!(second.get(), 3.0);
    }

    #[test]
    fn cleared_handler_is_not_called() {
        let hits = Rc::new(Cell::new(0_u32));
        let mut obs = Observers::default();
        let sink = hits.clone();
        obs.set_translated(move |_| sink.set(sink.get() + 1));
        obs.translated(Vec2::ZERO);
        obs.clear_translated();
        obs.translated(Vec2::ZERO);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn debug_lists_registered_slots() {
        let mut obs = Observers::default();
        obs.set_touch(|_| {});
        let text = alloc::format!("{obs:?}");
        assert!(text.contains("touch: true"), "{text}");
        assert!(text.contains("drag: false"), "{text}");
    }
}
