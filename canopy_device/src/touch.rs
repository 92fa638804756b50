// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch sample: one contact, driven by a phase enum.
//!
//! A touch has no persistent button; its press/release transitions are derived
//! from the phase: `Began` is a press, `Ended`/`Canceled` is a release. A tap
//! that begins and ends between two dispatches is reported by the host as
//! `Began` followed by `Ended` within the same frame, which the derived delta
//! cannot represent per-phase; hosts that compress taps should instead call
//! [`TouchSample::touch_up`] on the frame after [`TouchSample::touch_down`].

use kurbo::Point;

use crate::button::ButtonDelta;

/// Contact phase of a touch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// No contact.
    #[default]
    None,
    /// Contact started this frame.
    Began,
    /// Contact moved this frame.
    Moved,
    /// Contact is held without movement.
    Stationary,
    /// Contact lifted this frame.
    Ended,
    /// Contact was canceled by the system this frame.
    Canceled,
}

/// One frame of state for a single touch contact.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchSample {
    finger_id: u32,
    phase: TouchPhase,
    position: Point,
    changed: bool,
}

impl TouchSample {
    /// Create a sample for one finger identity.
    pub fn new(finger_id: u32) -> Self {
        Self {
            finger_id,
            ..Self::default()
        }
    }

    /// The finger identity this sample tracks.
    pub fn finger_id(&self) -> u32 {
        self.finger_id
    }

    /// Current contact phase.
    pub fn phase(&self) -> TouchPhase {
        self.phase
    }

    /// Current screen-space position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// True while this sample holds unconsumed changes.
    pub fn changed_this_frame(&self) -> bool {
        self.changed
    }

    /// Press/release transition derived from the phase.
    pub fn select_delta(&self) -> ButtonDelta {
        match self.phase {
            TouchPhase::Began => ButtonDelta::PRESSED,
            TouchPhase::Ended | TouchPhase::Canceled => ButtonDelta::RELEASED,
            _ => ButtonDelta::empty(),
        }
    }

    /// Host mutator: contact started.
    pub fn touch_down(&mut self, position: Point) {
        self.phase = TouchPhase::Began;
        self.position = position;
        self.changed = true;
    }

    /// Host mutator: contact moved.
    pub fn touch_move(&mut self, position: Point) {
        self.phase = TouchPhase::Moved;
        self.position = position;
        self.changed = true;
    }

    /// Host mutator: contact lifted.
    pub fn touch_up(&mut self, position: Point) {
        self.phase = TouchPhase::Ended;
        self.position = position;
        self.changed = true;
    }

    /// Host mutator: contact canceled by the system.
    pub fn touch_cancel(&mut self) {
        self.phase = TouchPhase::Canceled;
        self.changed = true;
    }

    /// Frame-finish reset: demotes the phase and clears the changed flag.
    ///
    /// `Began`/`Moved` become `Stationary`; `Ended`/`Canceled` become `None`.
    pub fn on_frame_finished(&mut self) {
        self.phase = match self.phase {
            TouchPhase::Began | TouchPhase::Moved | TouchPhase::Stationary => {
                TouchPhase::Stationary
            }
            TouchPhase::Ended | TouchPhase::Canceled | TouchPhase::None => TouchPhase::None,
        };
        self.changed = false;
    }
}
