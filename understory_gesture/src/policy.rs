// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Which gestures the state machine may turn into intents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GesturePolicy {
    /// Pinch, scroll and double-tap handling.
    pub zoom_enabled: bool,
    /// Double-tap zoom; also requires `zoom_enabled`.
    pub double_tap_enabled: bool,
    /// Translation while exactly one pointer is down.
    pub one_finger_dragging_enabled: bool,
    /// Translation while several pointers are down.
    pub multi_finger_dragging_enabled: bool,
    /// Two-finger rotation.
    pub rotation_enabled: bool,
}

impl Default for GesturePolicy {
    fn default() -> Self {
        Self {
            zoom_enabled: true,
            double_tap_enabled: true,
            one_finger_dragging_enabled: true,
            multi_finger_dragging_enabled: true,
            rotation_enabled: false,
        }
    }
}

impl GesturePolicy {
    /// Whether dragging is permitted with the given touch state.
    #[must_use]
    pub fn allows_drag(&self, multi_touch: bool) -> bool {
        if multi_touch {
            self.multi_finger_dragging_enabled
        } else {
            self.one_finger_dragging_enabled
        }
    }
}
