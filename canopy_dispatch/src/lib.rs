// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Dispatch: a frame-stepped dispatcher turning device samples into UI
//! interaction events.
//!
//! This crate is the processing side of the Canopy input pipeline. Each frame
//! the host feeds it the sample records from `canopy_device`; the dispatcher
//! resolves where each pointer lands, tracks per-pointer interaction state,
//! and fires enter/exit, press/release, click, drag, drop, scroll, selection,
//! and navigation events at the application's targets.
//!
//! The crate owns no scene. Applications plug in through two traits:
//!
//! - [`hit::HitTest`] answers "what is under this screen point / along this
//!   ray", plus camera projection for tracked pointers.
//! - [`tree::EventTree`] exposes parent links, per-node capability queries,
//!   and event delivery with a consumed/not-consumed result.
//!
//! State lives in pooled [`record::PointerRecord`]s keyed by
//! [`record::PointerId`], one per mouse button, touch contact, or tracked
//! device, mutated in place across frames by [`dispatcher::Dispatcher`].
//!
//! ## Usage
//!
//! Implement both traits for your scene type, then call one `process_*` entry
//! point per device per frame:
//!
//! ```ignore
//! let mut dispatcher = Dispatcher::new(Config::default());
//! loop {
//!     host.sample_devices(&mut mouse, &mut pad);
//!     dispatcher.process_mouse(&mut scene, &mut mouse, host.now());
//!     dispatcher.process_joystick(&mut scene, &mut pad, host.now());
//! }
//! ```
//!
//! ## Features
//!
//! - `std` (enabled by default): forwards `std` to the math crates.
//! - `libm`: required for `no_std` builds without `std` float math.
//!
//! This crate is `no_std` compatible for all modules.

#![no_std]

extern crate alloc;

pub mod dispatcher;
pub mod hit;
pub mod record;
pub mod tree;
