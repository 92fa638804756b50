// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-button delta state: the press/release transition between two samples.
//!
//! A [`ButtonDelta`] is recomputed from consecutive boolean samples and is a
//! flag set rather than an enum because some devices (touch taps, tracked
//! controllers with compressed reports) can press *and* release a button
//! entirely inside one inter-sample window. Both bits set encodes that case.
//!
//! ## Minimal example
//!
//! ```
//! use canopy_device::button::{ButtonDelta, ButtonSample};
//!
//! let mut select = ButtonSample::default();
//! select.update(true);
//! assert_eq!(select.delta, ButtonDelta::PRESSED);
//!
//! // Release within the same frame: both transitions are visible at once.
//! select.update(false);
//! assert_eq!(select.delta, ButtonDelta::PRESSED | ButtonDelta::RELEASED);
//!
//! select.clear_delta();
//! assert!(select.delta.is_empty());
//! ```

bitflags::bitflags! {
    /// Button transition flags between two consecutive samples.
    ///
    /// Empty means no transition. `PRESSED | RELEASED` means a press followed
    /// by a release (or the reverse) happened entirely within one frame.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ButtonDelta: u8 {
        /// The button went from released to pressed.
        const PRESSED  = 0b0000_0001;
        /// The button went from pressed to released.
        const RELEASED = 0b0000_0010;
    }
}

impl Default for ButtonDelta {
    fn default() -> Self {
        Self::empty()
    }
}

/// One button's raw state plus its transition since the last frame finish.
///
/// `delta` accumulates across `update` calls within a frame and is only reset
/// by [`ButtonSample::clear_delta`], so multiple samples between dispatches
/// cannot lose a press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonSample {
    /// Current raw pressed state.
    pub pressed: bool,
    /// Transitions observed since the last frame finish.
    pub delta: ButtonDelta,
}

impl ButtonSample {
    /// Feed a new raw sample, accumulating the transition into `delta`.
    ///
    /// Returns `true` if this sample produced a new transition.
    pub fn update(&mut self, pressed: bool) -> bool {
        let transition = match (self.pressed, pressed) {
            (false, true) => ButtonDelta::PRESSED,
            (true, false) => ButtonDelta::RELEASED,
            _ => ButtonDelta::empty(),
        };
        self.pressed = pressed;
        self.delta |= transition;
        !transition.is_empty()
    }

    /// Record a press-and-release compressed into one inter-sample window.
    ///
    /// Only devices that report this case call it; the raw state ends released.
    pub fn press_and_release(&mut self) {
        self.pressed = false;
        self.delta |= ButtonDelta::PRESSED | ButtonDelta::RELEASED;
    }

    /// Whether a press transition is pending consumption.
    pub fn pressed_this_frame(&self) -> bool {
        self.delta.contains(ButtonDelta::PRESSED)
    }

    /// Whether a release transition is pending consumption.
    pub fn released_this_frame(&self) -> bool {
        self.delta.contains(ButtonDelta::RELEASED)
    }

    /// Frame-finish reset. The raw `pressed` state survives.
    pub fn clear_delta(&mut self) {
        self.delta = ButtonDelta::empty();
    }
}
