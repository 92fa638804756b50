// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test gateway: the abstract "where does this pointer land" operation.
//!
//! The dispatcher never performs hit-testing geometry itself. It asks an
//! implementation of [`HitTest`] (a box tree, a 3D ray cast, anything) for
//! the nearest valid candidate under a screen point or along a world-space
//! ray, and receives a [`Hit`]. Ties among overlapping candidates are broken
//! by the gateway's own depth ordering; the dispatcher only sees the winner.
//!
//! Camera projection also lives behind this trait: for tracked pointers the
//! dispatcher needs "world point → screen point" through a specific camera,
//! and camera math belongs to the host, not to this crate.

use glam::Vec3;
use kurbo::Point;

/// Result of resolving one pointer sample against the scene.
///
/// Produced fresh each dispatch call; the dispatcher caches it only as the
/// pointer record's current and press hits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit<K, C> {
    /// The object the pointer resolved to, if any.
    pub target: Option<K>,
    /// World-space point of the hit, when the gateway knows it.
    pub world_point: Option<Vec3>,
    /// Camera associated with the module that produced the hit, when any.
    pub camera: Option<C>,
}

impl<K, C> Hit<K, C> {
    /// A miss: no target, no world point, no camera.
    pub const fn none() -> Self {
        Self {
            target: None,
            world_point: None,
            camera: None,
        }
    }

    /// Whether the cast found a target.
    pub fn is_valid(&self) -> bool {
        self.target.is_some()
    }
}

impl<K, C> Default for Hit<K, C> {
    fn default() -> Self {
        Self::none()
    }
}

/// The hit-test gateway the dispatcher calls once per pointer per frame.
///
/// Implementations must be deterministic for a given scene state and sample.
pub trait HitTest {
    /// Target object handle.
    type Node: Copy + Eq;
    /// Camera handle, used only for tracked-pointer re-projection.
    type Camera: Copy + Eq;

    /// Resolve a screen-space point to the nearest valid candidate.
    fn hit_point(&mut self, position: Point) -> Hit<Self::Node, Self::Camera>;

    /// Resolve a world-space ray (sample points, origin first) to the nearest
    /// valid candidate.
    fn hit_ray(&mut self, ray: &[Vec3]) -> Hit<Self::Node, Self::Camera>;

    /// The designated main camera, if one exists this frame.
    fn main_camera(&self) -> Option<Self::Camera>;

    /// Project a world-space point to screen space through a camera.
    fn project(&self, camera: Self::Camera, world: Vec3) -> Point;
}
