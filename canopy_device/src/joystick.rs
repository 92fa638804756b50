// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Joystick sample: a navigation axis, submit/cancel buttons, and the move
//! repeat gate.
//!
//! Directional navigation needs debouncing: a held stick should produce one
//! move, then nothing until an initial delay has passed, then a steady repeat.
//! [`MoveRepeat`] implements that gate against a caller-supplied monotonic
//! clock; it lives inside the sample because the streak belongs to the device,
//! not to the dispatcher.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Vec2;
//! use canopy_device::joystick::{MoveDirection, MoveRepeat};
//!
//! let dir = MoveDirection::from_vector(Vec2::new(1.0, 0.1), 0.6);
//! assert_eq!(dir, MoveDirection::Right);
//!
//! let mut gate = MoveRepeat::default();
//! assert!(gate.permits(dir, 0.0, 0.5, 0.1)); // first move fires immediately
//! assert!(!gate.permits(dir, 0.3, 0.5, 0.1)); // within the initial delay
//! assert!(gate.permits(dir, 0.5, 0.5, 0.1)); // delay elapsed
//! assert!(gate.permits(dir, 0.6, 0.5, 0.1)); // later moves use the repeat rate
//! ```

use kurbo::Vec2;

use crate::button::ButtonSample;

/// Cardinal direction of a navigation move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Axis within the deadzone; no move.
    #[default]
    None,
    /// Dominant negative x.
    Left,
    /// Dominant positive y.
    Up,
    /// Dominant positive x.
    Right,
    /// Dominant negative y.
    Down,
}

impl MoveDirection {
    /// Classify an axis vector against a deadzone (compared squared, so no
    /// square root is taken). The dominant axis wins; y is up.
    pub fn from_vector(v: Vec2, deadzone: f64) -> Self {
        if v.hypot2() <= deadzone * deadzone {
            return Self::None;
        }
        if v.x.abs() > v.y.abs() {
            if v.x > 0.0 { Self::Right } else { Self::Left }
        } else if v.y > 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }
}

// Slack for the wait comparison: differences like 0.6 - 0.5 land just under
// the nominal wait in floating point, and an exact-boundary tick must fire.
const REPEAT_SLACK: f64 = 1e-9;

/// Repeat gate for directional moves.
///
/// The first move in a new direction fires immediately; the second waits for
/// the initial delay; later ones wait for the repeat rate. Changing direction
/// resets the streak. Times are seconds on a monotonic unscaled clock supplied
/// by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveRepeat {
    direction: MoveDirection,
    streak: u32,
    last_time: f64,
}

impl MoveRepeat {
    /// Direction of the current streak.
    pub fn direction(&self) -> MoveDirection {
        self.direction
    }

    /// Number of moves fired in the current streak.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Gate one candidate move. Returns `true` if the move may fire now, and
    /// records it as fired.
    pub fn permits(&mut self, direction: MoveDirection, now: f64, delay: f64, rate: f64) -> bool {
        if direction == MoveDirection::None {
            *self = Self::default();
            return false;
        }
        if direction != self.direction {
            self.direction = direction;
            self.streak = 1;
            self.last_time = now;
            return true;
        }
        let wait = if self.streak == 1 { delay } else { rate };
        if now - self.last_time >= wait - REPEAT_SLACK {
            self.streak += 1;
            self.last_time = now;
            true
        } else {
            false
        }
    }
}

/// One frame of joystick state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JoystickSample {
    move_axis: Vec2,
    submit: ButtonSample,
    cancel: ButtonSample,
    repeat: MoveRepeat,
    changed: bool,
}

impl JoystickSample {
    /// Current navigation axis vector.
    pub fn move_axis(&self) -> Vec2 {
        self.move_axis
    }

    /// The submit button.
    pub fn submit(&self) -> &ButtonSample {
        &self.submit
    }

    /// The cancel button.
    pub fn cancel(&self) -> &ButtonSample {
        &self.cancel
    }

    /// The embedded repeat gate, mutably; the dispatcher drives it.
    pub fn repeat_mut(&mut self) -> &mut MoveRepeat {
        &mut self.repeat
    }

    /// True while this sample holds unconsumed changes.
    pub fn changed_this_frame(&self) -> bool {
        self.changed
    }

    /// Host mutator: set the navigation axis.
    pub fn set_move(&mut self, axis: Vec2) {
        if self.move_axis == axis {
            return;
        }
        self.move_axis = axis;
        self.changed = true;
    }

    /// Host mutator: feed a raw submit button sample.
    pub fn set_submit(&mut self, pressed: bool) {
        if self.submit.update(pressed) {
            self.changed = true;
        }
    }

    /// Host mutator: feed a raw cancel button sample.
    pub fn set_cancel(&mut self, pressed: bool) {
        if self.cancel.update(pressed) {
            self.changed = true;
        }
    }

    /// Frame-finish reset: clears button deltas and the changed flag. The
    /// axis persists; a held stick keeps its value between samples.
    pub fn on_frame_finished(&mut self) {
        self.submit.clear_delta();
        self.cancel.clear_delta();
        self.changed = false;
    }
}
