// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer event record: the mutable accumulator for one logical pointer.
//!
//! The dispatcher keeps one record per pointer identity, pooled and mutated in
//! place across frames; nothing here is reallocated per frame. At the top of a
//! dispatch only the per-frame fields are reset (see
//! [`PointerRecord::begin_frame`]); press bookkeeping, hover state, and click
//! counting persist between frames because they are the state machine.
//!
//! Two invariants hold at the end of every dispatch call:
//!
//! - `hovered` equals the ancestor chain from `entered` up to the root.
//! - `dragged` is non-`None` only while `dragging` is set or a press is
//!   pending evaluation.

use glam::Vec3;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use canopy_device::mouse::MouseButton;

use crate::hit::Hit;

/// Identity of one logical pointer, the key the record pool uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
    /// One mouse button. Each button keeps its own press/drag bookkeeping.
    Mouse(MouseButton),
    /// One touch contact, by finger id.
    Touch(u32),
    /// One tracked spatial device, by device id.
    Tracked(u32),
}

/// Interaction state for one logical pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerRecord<K, C> {
    /// Which pointer this record belongs to.
    pub id: PointerId,
    /// Screen-space position this frame.
    pub position: Point,
    /// Screen-space movement since the previous frame.
    pub delta: Vec2,
    /// Scroll delta this frame (mouse only).
    pub scroll: Vec2,
    /// Position at the most recent press.
    pub press_position: Point,
    /// World-space position of the current hit (tracked pointers).
    pub world_position: Option<Vec3>,
    /// Whether a drag is in progress.
    pub dragging: bool,
    /// Whether a release on the press target should still count as a click.
    pub click_eligible: bool,
    /// Time of the most recent press, seconds on the caller's monotonic clock.
    pub click_time: f64,
    /// Consecutive clicks on the same target within the click-speed window.
    pub click_count: u32,
    /// Target the pointer most recently entered.
    pub entered: Option<K>,
    /// Every target currently hovered: `entered` and its ancestors.
    pub hovered: SmallVec<[K; 8]>,
    /// Resolved press handler of the active press.
    pub pressed: Option<K>,
    /// Raw hit target at the active press, before handler resolution.
    pub raw_pressed: Option<K>,
    /// Resolved press handler of the previous press, for click counting.
    pub last_pressed: Option<K>,
    /// Resolved drag handler of the active press.
    pub dragged: Option<K>,
    /// Hit-test result of this frame.
    pub current_hit: Hit<K, C>,
    /// Hit-test result captured at the most recent press.
    pub press_hit: Hit<K, C>,
}

impl<K: Copy + Eq, C: Copy + Eq> PointerRecord<K, C> {
    /// Fresh record for one pointer identity.
    pub fn new(id: PointerId) -> Self {
        Self {
            id,
            position: Point::ZERO,
            delta: Vec2::ZERO,
            scroll: Vec2::ZERO,
            press_position: Point::ZERO,
            world_position: None,
            dragging: false,
            click_eligible: false,
            // Far enough in the past that the first press never chains.
            click_time: f64::NEG_INFINITY,
            click_count: 0,
            entered: None,
            hovered: SmallVec::new(),
            pressed: None,
            raw_pressed: None,
            last_pressed: None,
            dragged: None,
            current_hit: Hit::none(),
            press_hit: Hit::none(),
        }
    }

    /// Reset the per-frame fields. Everything else persists.
    pub fn begin_frame(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = Vec2::ZERO;
    }

    /// Whether the pointer moved this frame.
    pub fn is_moving(&self) -> bool {
        self.delta.hypot2() > 0.0
    }
}
