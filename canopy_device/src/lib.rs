// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Device: per-frame input device sample records.
//!
//! This crate holds the raw side of the Canopy input pipeline: one small record
//! type per physical device kind, each capturing exactly one frame's worth of
//! sampled state plus the press/release transitions since the previous sample:
//!
//! - [`button`]: the per-button delta state machine shared by every device kind
//! - [`mouse`]: screen-space pointer with three buttons and a scroll wheel
//! - [`touch`]: a single touch contact driven by a phase enum
//! - [`tracked`]: a spatial (3D ray) pointer that is re-projected to screen space
//! - [`joystick`]: a navigation axis with submit/cancel buttons and a move
//!   repeat gate
//!
//! ## Lifecycle contract
//!
//! A sample record is created once when a device is bound, mutated by the host
//! sampling layer every tick, and consumed by a dispatcher (see
//! `canopy_dispatch`) once per frame. Host mutators raise a `changed` flag;
//! the consumer calls `on_frame_finished()` after dispatch, which clears the
//! per-frame deltas and the flag. Skipping `on_frame_finished()` makes the
//! next dispatch re-deliver events from the stale sample, so the clear is part
//! of the contract, not an optimization.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use canopy_device::mouse::{MouseButton, MouseSample};
//!
//! let mut mouse = MouseSample::default();
//! mouse.set_position(Point::new(10.0, 20.0));
//! mouse.set_button(MouseButton::Left, true);
//! assert!(mouse.changed_this_frame());
//! assert!(mouse.button(MouseButton::Left).pressed_this_frame());
//!
//! // A consumer would dispatch here, then finish the frame.
//! mouse.on_frame_finished();
//! assert!(!mouse.changed_this_frame());
//! assert!(!mouse.button(MouseButton::Left).pressed_this_frame());
//! // The raw state survives; only the transitions are cleared.
//! assert!(mouse.button(MouseButton::Left).pressed);
//! ```
//!
//! This crate is `no_std` compatible for all modules.

#![no_std]

pub mod button;
pub mod joystick;
pub mod mouse;
pub mod touch;
pub mod tracked;
