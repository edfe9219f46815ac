// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface transform state.

use kurbo::{Point, Rect, Size, Vec2};
use understory_touch_math::scale_rect_about_center;

/// Identifies a content surface by its index in the host container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub usize);

/// Geometry tracked for a surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentState {
    /// Where the scaled and translated surface sits, in container space.
    ///
    /// Never includes rotation.
    pub content_rect: Rect,
    /// Current rotation in degrees.
    pub rotation_degrees: f64,
}

/// A read-only view of a surface's transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    /// Uniform scale.
    pub scale: f64,
    /// Offset from the laid-out position.
    pub translation: Vec2,
    /// Rotation in degrees.
    pub rotation_degrees: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translation: Vec2::ZERO,
            rotation_degrees: 0.0,
        }
    }
}

/// A content surface known to the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    content_size: Size,
    scale: f64,
    translation: Vec2,
    content: ContentState,
    tag: Option<u64>,
}

impl Surface {
    /// A surface of `content_size` at its laid-out position, unscaled.
    #[must_use]
    pub fn new(content_size: Size) -> Self {
        Self {
            content_size,
            scale: 1.0,
            translation: Vec2::ZERO,
            content: ContentState {
                content_rect: content_size.to_rect(),
                rotation_degrees: 0.0,
            },
            tag: None,
        }
    }

    /// Untransformed size of the surface.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// The untransformed rectangle, anchored at the origin.
    #[must_use]
    pub fn original_rect(&self) -> Rect {
        self.content_size.to_rect()
    }

    /// Current geometry.
    #[must_use]
    pub fn content(&self) -> &ContentState {
        &self.content
    }

    /// Current transform.
    #[must_use]
    pub fn transform(&self) -> TransformState {
        TransformState {
            scale: self.scale,
            translation: self.translation,
            rotation_degrees: self.content.rotation_degrees,
        }
    }

    /// Rotation pivot: the surface center, moved by the translation.
    #[must_use]
    pub fn pivot(&self) -> Point {
        (self.content_size.to_vec2() / 2.0 + self.translation).to_point()
    }

    /// Host data attached to the surface.
    #[must_use]
    pub fn tag(&self) -> Option<u64> {
        self.tag
    }

    pub(crate) fn set_tag(&mut self, tag: Option<u64>) {
        self.tag = tag;
    }

    pub(crate) fn set_rotation(&mut self, degrees: f64) {
        self.content.rotation_degrees = degrees;
    }

    /// Multiplies the scale by `factor`, clamped to `[lower, upper]`, and
    /// rescales the content rectangle about its center. Returns the new scale.
    pub(crate) fn scale_by(&mut self, factor: f64, lower: f64, upper: f64) -> f64 {
        let previous = self.scale;
        let scale = (previous * factor).min(upper).max(lower);
        self.scale = scale;
        self.content.content_rect =
            scale_rect_about_center(self.content.content_rect, scale / previous);
        scale
    }

    /// Translates by `delta`, clamped so the content never overflows the
    /// container by more than half the size difference on each axis.
    /// Returns the new total translation.
    pub(crate) fn translate_by(&mut self, delta: Vec2, container: Size) -> Vec2 {
        let rect = self.content.content_rect;
        let max_dx = ((rect.width() - container.width) / 2.0).abs();
        let max_dy = ((rect.height() - container.height) / 2.0).abs();
        let t = self.translation;

        let dx = delta.x.min(max_dx - t.x).max(-max_dx - t.x);
        let dy = delta.y.min(max_dy - t.y).max(-max_dy - t.y);
        let applied = Vec2::new(dx, dy);

        self.translation += applied;
        self.content.content_rect = rect + applied;
        self.translation
    }
}
