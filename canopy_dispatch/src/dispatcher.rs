// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event dispatcher: one dispatch pass per device per frame.
//!
//! [`Dispatcher`] consumes device samples from `canopy_device`, resolves hit
//! targets through the [`HitTest`](crate::hit::HitTest) gateway, mutates the
//! pooled [`PointerRecord`]s, and fires interaction events into an
//! [`EventTree`]. It is single-threaded and frame-stepped: the host calls one
//! `process_*` entry point per device per tick, passing the current time in
//! seconds on a monotonic unscaled clock. No operation blocks or suspends.
//!
//! Per pointer-like device the pipeline is: skip if the sample is unchanged;
//! fetch the pooled record; derive position and delta; resolve the hit; then
//! run button transitions, hover transitions, scroll (mouse), and drag
//! hysteresis, in that order; finally finish the sample's frame so a stale
//! sample cannot re-deliver.
//!
//! ## Minimal example
//!
//! ```ignore
//! let mut dispatcher: Dispatcher<NodeId, CameraId> = Dispatcher::new(Config::default());
//! // Each frame, after the host has sampled its devices:
//! dispatcher.process_mouse(&mut scene, &mut mouse, now);
//! dispatcher.process_touch(&mut scene, &mut touch, now);
//! dispatcher.process_tracked(&mut scene, &mut wand, now);
//! dispatcher.process_joystick(&mut scene, &mut pad, now);
//! ```

use hashbrown::HashMap;
use kurbo::Vec2;

use canopy_device::button::ButtonDelta;
use canopy_device::joystick::{JoystickSample, MoveDirection};
use canopy_device::mouse::{MouseButton, MouseSample};
use canopy_device::touch::{TouchPhase, TouchSample};
use canopy_device::tracked::TrackedSample;

use crate::hit::{Hit, HitTest};
use crate::record::{PointerId, PointerRecord};
use crate::tree::{EventKind, EventTree, NavMove, Payload, common_ancestor, deliver_to_nearest, nearest_handler};

/// Tunable thresholds. Times are seconds, distances are pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Window within which consecutive clicks on one target chain.
    pub click_speed: f64,
    /// Minimum joystick-axis magnitude before a move is recognized.
    pub move_deadzone: f64,
    /// Delay between the first and second move in one direction.
    pub repeat_delay: f64,
    /// Delay between later moves in one direction.
    pub repeat_rate: f64,
    /// Displacement from the press position before a drag begins.
    pub drag_threshold: f64,
    /// Drag-threshold multiplier for tracked devices, which jitter more.
    pub tracked_drag_multiplier: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            click_speed: 0.3,
            move_deadzone: 0.6,
            repeat_delay: 0.5,
            repeat_rate: 0.1,
            drag_threshold: 10.0,
            tracked_drag_multiplier: 2.0,
        }
    }
}

/// The stateful orchestrator for one scene's input.
///
/// Owns the pooled pointer records and the shared selection state; both are
/// explicit fields here rather than ambient globals so the dispatcher is
/// testable without a live host.
#[derive(Debug)]
pub struct Dispatcher<K, C> {
    /// Thresholds; mutable between frames.
    pub config: Config,
    /// Gate for joystick directional moves.
    pub navigation_enabled: bool,
    /// While the cursor is locked/captured, drags are suppressed.
    pub cursor_locked: bool,
    /// Explicit camera override for tracked-pointer projection.
    pub ui_camera: Option<C>,
    selected: Option<K>,
    records: HashMap<PointerId, PointerRecord<K, C>>,
}

impl<K: Copy + Eq, C: Copy + Eq> Dispatcher<K, C> {
    /// New dispatcher with the given thresholds and no pointers yet.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            navigation_enabled: true,
            cursor_locked: false,
            ui_camera: None,
            selected: None,
            records: HashMap::new(),
        }
    }

    /// The currently selected target, if any.
    pub fn selected(&self) -> Option<K> {
        self.selected
    }

    /// Change the selection, firing `Deselect`/`Select` as appropriate.
    pub fn set_selected<S>(&mut self, scene: &mut S, target: Option<K>)
    where
        S: EventTree<Node = K, Camera = C>,
    {
        if self.selected == target {
            return;
        }
        if let Some(old) = self.selected.take() {
            scene.deliver(old, EventKind::Deselect, Payload::None);
        }
        self.selected = target;
        if let Some(new) = target {
            scene.deliver(new, EventKind::Select, Payload::None);
        }
    }

    /// The pooled record for one pointer identity, if it has dispatched.
    pub fn record(&self, id: PointerId) -> Option<&PointerRecord<K, C>> {
        self.records.get(&id)
    }

    /// Process one frame of mouse state.
    ///
    /// One hit test per frame, shared by all three buttons; each button owns
    /// its own pooled record. Hover and scroll run on the left button only,
    /// press/release and drag on all three.
    pub fn process_mouse<S>(&mut self, scene: &mut S, sample: &mut MouseSample, now: f64)
    where
        S: EventTree<Node = K, Camera = C> + HitTest<Node = K, Camera = C>,
    {
        if !sample.changed_this_frame() {
            return;
        }
        let hit = scene.hit_point(sample.position());
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            let id = PointerId::Mouse(button);
            let mut record = self.take_record(id);
            record.begin_frame();
            record.delta = sample.position() - record.position;
            record.position = sample.position();
            record.current_hit = hit;

            self.run_button(scene, &mut record, sample.button(button).delta, now);
            if button == MouseButton::Left {
                record.scroll = sample.scroll();
                self.handle_hover(scene, &mut record);
                self.handle_scroll(scene, &record);
            }
            self.handle_drag(scene, &mut record, 1.0);
            self.records.insert(id, record);
        }
        sample.on_frame_finished();
    }

    /// Process one frame of state for a single touch contact.
    ///
    /// The press/release transition comes from the touch phase. On the
    /// release frame the contact no longer exists, so hover runs against no
    /// target (exiting everything) and drag continuation is skipped. A
    /// system-canceled contact releases with no hit at all, so it ends the
    /// press without ever completing a click.
    pub fn process_touch<S>(&mut self, scene: &mut S, sample: &mut TouchSample, now: f64)
    where
        S: EventTree<Node = K, Camera = C> + HitTest<Node = K, Camera = C>,
    {
        if !sample.changed_this_frame() {
            return;
        }
        let id = PointerId::Touch(sample.finger_id());
        let delta = sample.select_delta();
        let mut record = self.take_record(id);
        record.begin_frame();
        if delta.contains(ButtonDelta::PRESSED) {
            record.delta = Vec2::ZERO;
        } else {
            record.delta = sample.position() - record.position;
        }
        record.position = sample.position();
        record.current_hit = scene.hit_point(sample.position());
        if sample.phase() == TouchPhase::Canceled {
            record.current_hit = Hit::none();
        }

        self.run_button(scene, &mut record, delta, now);
        if delta.contains(ButtonDelta::RELEASED) {
            record.current_hit = Hit::none();
            self.handle_hover(scene, &mut record);
        } else {
            self.handle_hover(scene, &mut record);
            self.handle_drag(scene, &mut record, 1.0);
        }
        self.records.insert(id, record);
        sample.on_frame_finished();
    }

    /// Process one frame of tracked-pointer state.
    ///
    /// The hit is resolved from the world-space ray; the screen position is
    /// the hit point (or the terminal ray point on a miss) projected through
    /// the first camera that resolves: the explicit [`Self::ui_camera`], then
    /// the gateway's main camera, then the camera attached to the hit. With
    /// no camera (or an empty ray) the frame is silently skipped and the
    /// sample keeps its changed flag, so dispatch retries next tick.
    pub fn process_tracked<S>(&mut self, scene: &mut S, sample: &mut TrackedSample, now: f64)
    where
        S: EventTree<Node = K, Camera = C> + HitTest<Node = K, Camera = C>,
    {
        if !sample.changed_this_frame() {
            return;
        }
        let Some(&terminal) = sample.ray().last() else {
            return;
        };
        let hit = scene.hit_ray(sample.ray());
        let camera = self.ui_camera.or_else(|| scene.main_camera()).or(hit.camera);
        let Some(camera) = camera else {
            return;
        };
        let position = scene.project(camera, hit.world_point.unwrap_or(terminal));

        let id = PointerId::Tracked(sample.id());
        let mut record = self.take_record(id);
        record.begin_frame();
        record.delta = position - record.position;
        record.position = position;
        record.world_position = hit.world_point;
        record.current_hit = hit;

        self.run_button(scene, &mut record, sample.select().delta, now);
        self.handle_hover(scene, &mut record);
        self.handle_drag(scene, &mut record, self.config.tracked_drag_multiplier);

        sample.set_screen_state(record.position, record.delta);
        self.records.insert(id, record);
        sample.on_frame_finished();
    }

    /// Process one frame of joystick state.
    ///
    /// Runs on every call rather than gating on the changed flag: a held axis
    /// produces no new sample yet must keep generating repeat-gated moves.
    /// The selected target first receives `UpdateSelected`; if it consumes
    /// that, nothing else fires this frame. Otherwise a deadzone-and-repeat
    /// gated `Move` fires when navigation is enabled, and `Submit`/`Cancel`
    /// fire on their press transitions, `Cancel` only when `Submit` was not
    /// consumed.
    pub fn process_joystick<S>(&mut self, scene: &mut S, sample: &mut JoystickSample, now: f64)
    where
        S: EventTree<Node = K, Camera = C>,
    {
        let consumed = match self.selected {
            Some(selected) => scene.deliver(selected, EventKind::UpdateSelected, Payload::None),
            None => false,
        };
        if !consumed {
            if self.navigation_enabled {
                let direction =
                    MoveDirection::from_vector(sample.move_axis(), self.config.move_deadzone);
                let fire = sample.repeat_mut().permits(
                    direction,
                    now,
                    self.config.repeat_delay,
                    self.config.repeat_rate,
                );
                if fire && let Some(selected) = self.selected {
                    let mv = NavMove {
                        direction,
                        vector: sample.move_axis(),
                    };
                    scene.deliver(selected, EventKind::Move, Payload::Move(&mv));
                }
            }
            let mut used = false;
            if sample.submit().pressed_this_frame()
                && let Some(selected) = self.selected
            {
                used = scene.deliver(selected, EventKind::Submit, Payload::None);
            }
            if !used
                && sample.cancel().pressed_this_frame()
                && let Some(selected) = self.selected
            {
                scene.deliver(selected, EventKind::Cancel, Payload::None);
            }
        }
        sample.on_frame_finished();
    }

    fn take_record(&mut self, id: PointerId) -> PointerRecord<K, C> {
        self.records
            .remove(&id)
            .unwrap_or_else(|| PointerRecord::new(id))
    }

    fn run_button<S>(
        &mut self,
        scene: &mut S,
        record: &mut PointerRecord<K, C>,
        delta: ButtonDelta,
        now: f64,
    ) where
        S: EventTree<Node = K, Camera = C>,
    {
        if delta.contains(ButtonDelta::PRESSED) {
            self.handle_press(scene, record, now);
        }
        if delta.contains(ButtonDelta::RELEASED) {
            self.handle_release(scene, record);
        }
    }

    fn handle_press<S>(&mut self, scene: &mut S, record: &mut PointerRecord<K, C>, now: f64)
    where
        S: EventTree<Node = K, Camera = C>,
    {
        let over = record.current_hit.target;
        record.click_eligible = true;
        record.delta = Vec2::ZERO;
        record.dragging = false;
        record.press_position = record.position;
        record.press_hit = record.current_hit;

        self.deselect_if_selection_changed(scene, over);

        // Nearest down handler takes the press; with none, the nearest click
        // handler is recorded without receiving a down event.
        let mut pressed =
            deliver_to_nearest(scene, over, EventKind::PointerDown, Payload::Pointer(record));
        if pressed.is_none() {
            pressed = nearest_handler(scene, over, EventKind::PointerClick);
        }

        if pressed.is_some()
            && pressed == record.last_pressed
            && now - record.click_time < self.config.click_speed
        {
            record.click_count += 1;
        } else {
            record.click_count = 1;
        }
        record.click_time = now;
        record.pressed = pressed;
        record.raw_pressed = over;

        record.dragged = nearest_handler(scene, over, EventKind::Drag);
        if let Some(dragged) = record.dragged {
            scene.deliver(dragged, EventKind::InitializePotentialDrag, Payload::Pointer(record));
        }
    }

    fn handle_release<S>(&mut self, scene: &mut S, record: &mut PointerRecord<K, C>)
    where
        S: EventTree<Node = K, Camera = C>,
    {
        if let Some(pressed) = record.pressed {
            scene.deliver(pressed, EventKind::PointerUp, Payload::Pointer(record));
        }

        let over = record.current_hit.target;
        let click_handler = nearest_handler(scene, over, EventKind::PointerClick);
        if record.pressed.is_some() && record.pressed == click_handler && record.click_eligible {
            if let Some(pressed) = record.pressed {
                scene.deliver(pressed, EventKind::PointerClick, Payload::Pointer(record));
            }
        } else if record.dragging && record.dragged.is_some() {
            deliver_to_nearest(scene, over, EventKind::Drop, Payload::Pointer(record));
            if let Some(dragged) = record.dragged {
                scene.deliver(dragged, EventKind::EndDrag, Payload::Pointer(record));
            }
        }

        record.click_eligible = false;
        record.last_pressed = record.pressed;
        record.pressed = None;
        record.raw_pressed = None;
        record.dragging = false;
        record.dragged = None;
    }

    fn handle_hover<S>(&mut self, scene: &mut S, record: &mut PointerRecord<K, C>)
    where
        S: EventTree<Node = K, Camera = C>,
    {
        let over = record.current_hit.target;

        if over.is_none() || record.entered.is_none() {
            let hovered = core::mem::take(&mut record.hovered);
            for node in hovered {
                scene.deliver(node, EventKind::PointerExit, Payload::Pointer(record));
            }
            if over.is_none() {
                record.entered = None;
                return;
            }
        }

        if record.entered == over {
            return;
        }

        let common = common_ancestor(scene, record.entered, over);

        // Exit upward from the old enter target, stopping short of the
        // common ancestor.
        let mut node = record.entered;
        while let Some(n) = node {
            if Some(n) == common {
                break;
            }
            scene.deliver(n, EventKind::PointerExit, Payload::Pointer(record));
            record.hovered.retain(|h| *h != n);
            node = scene.parent(n);
        }

        // Enter upward from the new target, stopping short of the same
        // ancestor.
        let mut node = over;
        while let Some(n) = node {
            if Some(n) == common {
                break;
            }
            scene.deliver(n, EventKind::PointerEnter, Payload::Pointer(record));
            record.hovered.push(n);
            node = scene.parent(n);
        }

        record.entered = over;
    }

    fn handle_scroll<S>(&mut self, scene: &mut S, record: &PointerRecord<K, C>)
    where
        S: EventTree<Node = K, Camera = C>,
    {
        if record.scroll.hypot2() <= f64::EPSILON {
            return;
        }
        deliver_to_nearest(scene, record.entered, EventKind::Scroll, Payload::Pointer(record));
    }

    fn handle_drag<S>(&mut self, scene: &mut S, record: &mut PointerRecord<K, C>, multiplier: f64)
    where
        S: EventTree<Node = K, Camera = C>,
    {
        if !record.is_moving() || self.cursor_locked || record.dragged.is_none() {
            return;
        }

        if !record.dragging {
            let threshold = self.config.drag_threshold * multiplier;
            let displacement = record.position - record.press_position;
            if displacement.hypot2() > threshold * threshold {
                if let Some(dragged) = record.dragged {
                    scene.deliver(dragged, EventKind::BeginDrag, Payload::Pointer(record));
                }
                record.dragging = true;
            }
        }

        if record.dragging {
            // The pointer slid off the original press target before the
            // threshold: release that press before dragging on.
            if record.pressed != record.dragged {
                if let Some(pressed) = record.pressed {
                    scene.deliver(pressed, EventKind::PointerUp, Payload::Pointer(record));
                }
                record.click_eligible = false;
                record.last_pressed = record.pressed;
                record.pressed = None;
                record.raw_pressed = None;
            }
            if let Some(dragged) = record.dragged {
                scene.deliver(dragged, EventKind::Drag, Payload::Pointer(record));
            }
        }
    }

    fn deselect_if_selection_changed<S>(&mut self, scene: &mut S, over: Option<K>)
    where
        S: EventTree<Node = K, Camera = C>,
    {
        let select_target = nearest_handler(scene, over, EventKind::Select);
        if select_target != self.selected
            && let Some(old) = self.selected.take()
        {
            scene.deliver(old, EventKind::Deselect, Payload::None);
        }
    }
}

impl<K: Copy + Eq, C: Copy + Eq> Default for Dispatcher<K, C> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(config.click_speed, 0.3);
        assert_eq!(config.move_deadzone, 0.6);
        assert_eq!(config.repeat_delay, 0.5);
        assert_eq!(config.repeat_rate, 0.1);
        assert_eq!(config.drag_threshold, 10.0);
        assert_eq!(config.tracked_drag_multiplier, 2.0);
    }

    #[test]
    fn fresh_dispatcher_has_no_state() {
        let dispatcher: Dispatcher<u32, u8> = Dispatcher::default();
        assert!(dispatcher.navigation_enabled);
        assert!(!dispatcher.cursor_locked);
        assert_eq!(dispatcher.selected(), None);
        assert!(dispatcher.record(PointerId::Touch(0)).is_none());
    }
}
