// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracked spatial pointer sample: a world-space ray plus a select button.
//!
//! Tracked devices (hand controllers, head gaze) report a ray as a short list
//! of world-space sample points, origin first. They have no native screen
//! position; the dispatcher re-projects either the hit point or the terminal
//! ray point through a camera and writes the result back into the sample via
//! [`TrackedSample::set_screen_state`], so the host can read where the pointer
//! landed on screen.

use glam::Vec3;
use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::button::ButtonSample;

/// One frame of state for a tracked spatial pointer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackedSample {
    id: u32,
    ray: SmallVec<[Vec3; 4]>,
    select: ButtonSample,
    position: Point,
    delta: Vec2,
    changed: bool,
}

impl TrackedSample {
    /// Create a sample for one device identity.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// The device identity this sample tracks.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// World-space ray sample points, origin first.
    pub fn ray(&self) -> &[Vec3] {
        &self.ray
    }

    /// The select button.
    pub fn select(&self) -> &ButtonSample {
        &self.select
    }

    /// Screen-space position echoed back by the dispatcher.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Screen-space frame delta echoed back by the dispatcher.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// True while this sample holds unconsumed changes.
    pub fn changed_this_frame(&self) -> bool {
        self.changed
    }

    /// Host mutator: replace the ray sample points.
    pub fn set_ray(&mut self, points: &[Vec3]) {
        if self.ray.as_slice() == points {
            return;
        }
        self.ray.clear();
        self.ray.extend_from_slice(points);
        self.changed = true;
    }

    /// Host mutator: feed a raw select button sample.
    pub fn set_select(&mut self, pressed: bool) {
        if self.select.update(pressed) {
            self.changed = true;
        }
    }

    /// Host mutator: a select press-and-release compressed into one window.
    pub fn select_press_and_release(&mut self) {
        self.select.press_and_release();
        self.changed = true;
    }

    /// Dispatcher write-back of the re-projected screen position and delta.
    ///
    /// Does not raise the changed flag; these are derived fields.
    pub fn set_screen_state(&mut self, position: Point, delta: Vec2) {
        self.position = position;
        self.delta = delta;
    }

    /// Frame-finish reset: clears the select delta, the screen-space delta,
    /// and the changed flag. The ray persists until the host replaces it.
    pub fn on_frame_finished(&mut self) {
        self.select.clear_delta();
        self.delta = Vec2::ZERO;
        self.changed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_replacement_marks_changed() {
        let mut sample = TrackedSample::new(1);
        sample.set_ray(&[Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)]);
        assert!(sample.changed_this_frame());
        assert_eq!(sample.ray().len(), 2);
    }

    #[test]
    fn identical_ray_does_not_mark_changed() {
        let mut sample = TrackedSample::new(1);
        let points = [Vec3::ZERO, Vec3::new(0.0, 1.0, -2.0)];
        sample.set_ray(&points);
        sample.on_frame_finished();
        sample.set_ray(&points);
        assert!(!sample.changed_this_frame());
    }

    #[test]
    fn select_supports_compressed_click() {
        let mut sample = TrackedSample::new(0);
        sample.select_press_and_release();
        assert!(sample.select().pressed_this_frame());
        assert!(sample.select().released_this_frame());
        assert!(sample.changed_this_frame());
    }

    #[test]
    fn screen_echo_does_not_mark_changed() {
        let mut sample = TrackedSample::new(0);
        sample.set_screen_state(Point::new(5.0, 6.0), Vec2::new(1.0, 0.0));
        assert!(!sample.changed_this_frame());
        assert_eq!(sample.position(), Point::new(5.0, 6.0));
        assert_eq!(sample.delta(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn frame_finish_clears_delta_but_keeps_ray_and_position() {
        let mut sample = TrackedSample::new(0);
        sample.set_ray(&[Vec3::ZERO, Vec3::ONE]);
        sample.set_select(true);
        sample.set_screen_state(Point::new(2.0, 3.0), Vec2::new(0.5, 0.5));

        sample.on_frame_finished();
        assert!(!sample.changed_this_frame());
        assert!(sample.select().delta.is_empty());
        assert!(sample.select().pressed);
        assert_eq!(sample.delta(), Vec2::ZERO);
        assert_eq!(sample.position(), Point::new(2.0, 3.0));
        assert_eq!(sample.ray().len(), 2);
    }
}
