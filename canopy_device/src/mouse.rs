// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mouse sample: screen-space position, scroll delta, and three buttons.
//!
//! The host sampling layer writes raw state through the mutators below; each
//! mutator raises the `changed` flag only when the value actually changed, so
//! a dispatcher can skip frames where the device produced nothing new.

use kurbo::{Point, Vec2};

use crate::button::ButtonSample;

/// Mouse button identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; drives hover and scroll in the dispatcher.
    Left,
    /// Secondary button.
    Right,
    /// Middle (wheel) button.
    Middle,
}

/// One frame of mouse state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MouseSample {
    position: Point,
    scroll: Vec2,
    left: ButtonSample,
    right: ButtonSample,
    middle: ButtonSample,
    changed: bool,
}

impl MouseSample {
    /// Current screen-space position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Scroll delta accumulated since the last frame finish.
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// State of one button.
    pub fn button(&self, button: MouseButton) -> &ButtonSample {
        match button {
            MouseButton::Left => &self.left,
            MouseButton::Right => &self.right,
            MouseButton::Middle => &self.middle,
        }
    }

    /// True while this sample holds unconsumed changes.
    pub fn changed_this_frame(&self) -> bool {
        self.changed
    }

    /// Host mutator: move the pointer.
    pub fn set_position(&mut self, position: Point) {
        if self.position == position {
            return;
        }
        self.position = position;
        self.changed = true;
    }

    /// Host mutator: accumulate scroll.
    pub fn scroll_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.scroll += delta;
        self.changed = true;
    }

    /// Host mutator: feed a raw button sample.
    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        let sample = match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Right => &mut self.right,
            MouseButton::Middle => &mut self.middle,
        };
        if sample.update(pressed) {
            self.changed = true;
        }
    }

    /// Host mutator: a press-and-release compressed into one sample window.
    pub fn press_and_release(&mut self, button: MouseButton) {
        let sample = match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Right => &mut self.right,
            MouseButton::Middle => &mut self.middle,
        };
        sample.press_and_release();
        self.changed = true;
    }

    /// Frame-finish reset: clears button deltas, scroll, and the changed flag.
    ///
    /// Mandatory after dispatch; a stale sample would re-deliver its events.
    pub fn on_frame_finished(&mut self) {
        self.left.clear_delta();
        self.right.clear_delta();
        self.middle.clear_delta();
        self.scroll = Vec2::ZERO;
        self.changed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_sample_is_unchanged() {
        let mouse = MouseSample::default();
        assert!(!mouse.changed_this_frame());
    }

    #[test]
    fn position_move_marks_changed() {
        let mut mouse = MouseSample::default();
        mouse.set_position(Point::new(1.0, 2.0));
        assert!(mouse.changed_this_frame());
        assert_eq!(mouse.position(), Point::new(1.0, 2.0));
    }

    #[test]
    fn same_position_does_not_mark_changed() {
        let mut mouse = MouseSample::default();
        mouse.set_position(Point::new(1.0, 2.0));
        mouse.on_frame_finished();
        mouse.set_position(Point::new(1.0, 2.0));
        assert!(!mouse.changed_this_frame());
    }

    #[test]
    fn scroll_accumulates_until_frame_finish() {
        let mut mouse = MouseSample::default();
        mouse.scroll_by(Vec2::new(0.0, 1.0));
        mouse.scroll_by(Vec2::new(0.0, 2.0));
        assert_eq!(mouse.scroll(), Vec2::new(0.0, 3.0));
        mouse.on_frame_finished();
        assert_eq!(mouse.scroll(), Vec2::ZERO);
    }

    #[test]
    fn button_transitions_mark_changed_and_clear() {
        let mut mouse = MouseSample::default();
        mouse.set_button(MouseButton::Left, true);
        assert!(mouse.changed_this_frame());
        assert!(mouse.button(MouseButton::Left).pressed_this_frame());

        mouse.on_frame_finished();
        assert!(!mouse.changed_this_frame());
        assert!(!mouse.button(MouseButton::Left).pressed_this_frame());
        // Raw state survives the frame finish.
        assert!(mouse.button(MouseButton::Left).pressed);
    }

    #[test]
    fn repeated_button_state_does_not_mark_changed() {
        let mut mouse = MouseSample::default();
        mouse.set_button(MouseButton::Right, true);
        mouse.on_frame_finished();
        mouse.set_button(MouseButton::Right, true);
        assert!(!mouse.changed_this_frame());
    }

    #[test]
    fn compressed_click_raises_both_flags() {
        let mut mouse = MouseSample::default();
        mouse.press_and_release(MouseButton::Left);
        assert!(mouse.button(MouseButton::Left).pressed_this_frame());
        assert!(mouse.button(MouseButton::Left).released_this_frame());
        assert!(mouse.changed_this_frame());
    }
}
