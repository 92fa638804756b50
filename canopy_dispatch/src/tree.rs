// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target tree access: parent links, capability lookup, and event delivery.
//!
//! The dispatcher does not own target objects. It sees them through
//! [`EventTree`]: an abstract parent-link accessor plus two questions, "does
//! this node handle events of this kind" and "deliver this event, was it
//! consumed". Capability resolution ("find the nearest ancestor that handles
//! X") is an explicit tree walk over those parent links, implemented by the
//! free functions below rather than baked into the target type.
//!
//! Delivering to an absent target is a silent no-op everywhere: "nobody is
//! listening" is a normal condition, so all walk entry points take
//! `Option` targets.

use smallvec::SmallVec;

use canopy_device::joystick::MoveDirection;
use kurbo::Vec2;

use crate::record::PointerRecord;

/// The named interaction events a target can receive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer moved onto the target or one of its descendants.
    PointerEnter,
    /// Pointer left the target's subtree.
    PointerExit,
    /// Button press over the target.
    PointerDown,
    /// Button release, sent to the previously pressed target.
    PointerUp,
    /// Press and release resolved to the same target.
    PointerClick,
    /// A press found a drag handler that may start dragging later.
    InitializePotentialDrag,
    /// Displacement exceeded the drag threshold.
    BeginDrag,
    /// Continued movement while dragging.
    Drag,
    /// Drag finished.
    EndDrag,
    /// A dragged pointer was released over the target.
    Drop,
    /// Scroll wheel movement over the target.
    Scroll,
    /// Target became the selection.
    Select,
    /// Target stopped being the selection.
    Deselect,
    /// Per-frame tick for the selected target.
    UpdateSelected,
    /// Directional navigation move.
    Move,
    /// Submit action on the selected target.
    Submit,
    /// Cancel action on the selected target.
    Cancel,
}

/// Payload of a directional navigation move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavMove {
    /// Cardinal direction after deadzone classification.
    pub direction: MoveDirection,
    /// The raw axis vector that produced the move.
    pub vector: Vec2,
}

/// Data accompanying a delivered event.
#[derive(Clone, Copy, Debug)]
pub enum Payload<'a, K, C> {
    /// Pointer-derived events carry the full pointer record.
    Pointer(&'a PointerRecord<K, C>),
    /// Navigation moves carry direction and vector.
    Move(&'a NavMove),
    /// Selection lifecycle events carry nothing.
    None,
}

/// Abstract view of the target hierarchy.
pub trait EventTree {
    /// Target object handle.
    type Node: Copy + Eq;
    /// Camera handle carried by pointer records.
    type Camera: Copy + Eq;

    /// Parent link, `None` at a root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether the node handles events of this kind. Used for capability
    /// resolution, not delivery.
    fn handles(&self, node: Self::Node, kind: EventKind) -> bool;

    /// Deliver one event to one node. Returns `true` if the node consumed it.
    fn deliver(
        &mut self,
        node: Self::Node,
        kind: EventKind,
        payload: Payload<'_, Self::Node, Self::Camera>,
    ) -> bool;
}

/// Find the nearest ancestor (including `from` itself) that handles `kind`.
pub fn nearest_handler<T: EventTree + ?Sized>(
    tree: &T,
    from: Option<T::Node>,
    kind: EventKind,
) -> Option<T::Node> {
    let mut node = from;
    while let Some(n) = node {
        if tree.handles(n, kind) {
            return Some(n);
        }
        node = tree.parent(n);
    }
    None
}

/// Deliver to the nearest ancestor that handles `kind`, returning the node
/// that received the event, or `None` if nobody along the chain handles it.
pub fn deliver_to_nearest<T: EventTree + ?Sized>(
    tree: &mut T,
    from: Option<T::Node>,
    kind: EventKind,
    payload: Payload<'_, T::Node, T::Camera>,
) -> Option<T::Node> {
    let target = nearest_handler(tree, from, kind)?;
    tree.deliver(target, kind, payload);
    Some(target)
}

/// Lowest common ancestor of two nodes, or `None` if either is absent or the
/// nodes live in disjoint trees.
pub fn common_ancestor<T: EventTree + ?Sized>(
    tree: &T,
    a: Option<T::Node>,
    b: Option<T::Node>,
) -> Option<T::Node> {
    let (Some(a), Some(b)) = (a, b) else {
        return None;
    };
    let mut chain: SmallVec<[T::Node; 16]> = SmallVec::new();
    let mut node = Some(a);
    while let Some(n) = node {
        chain.push(n);
        node = tree.parent(n);
    }
    let mut node = Some(b);
    while let Some(n) = node {
        if chain.contains(&n) {
            return Some(n);
        }
        node = tree.parent(n);
    }
    None
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::vec::Vec;

    use super::*;

    // Tree: 0 -> 1 -> 2, 1 -> 3; node 1 handles clicks, node 0 handles scrolls.
    struct Fixture {
        log: Vec<(u32, EventKind)>,
    }

    impl EventTree for Fixture {
        type Node = u32;
        type Camera = u8;

        fn parent(&self, node: u32) -> Option<u32> {
            match node {
                1 => Some(0),
                2 | 3 => Some(1),
                _ => None,
            }
        }

        fn handles(&self, node: u32, kind: EventKind) -> bool {
            matches!(
                (node, kind),
                (1, EventKind::PointerClick) | (0, EventKind::Scroll)
            )
        }

        fn deliver(&mut self, node: u32, kind: EventKind, _payload: Payload<'_, u32, u8>) -> bool {
            self.log.push((node, kind));
            false
        }
    }

    #[test]
    fn nearest_handler_walks_upward() {
        let tree = Fixture { log: Vec::new() };
        assert_eq!(
            nearest_handler(&tree, Some(2), EventKind::PointerClick),
            Some(1)
        );
        assert_eq!(nearest_handler(&tree, Some(2), EventKind::Scroll), Some(0));
        assert_eq!(nearest_handler(&tree, Some(2), EventKind::Drag), None);
        assert_eq!(nearest_handler(&tree, None, EventKind::PointerClick), None);
    }

    #[test]
    fn deliver_to_nearest_hits_the_resolved_node_only() {
        let mut tree = Fixture { log: Vec::new() };
        let hit = deliver_to_nearest(&mut tree, Some(2), EventKind::PointerClick, Payload::None);
        assert_eq!(hit, Some(1));
        assert_eq!(tree.log, [(1, EventKind::PointerClick)]);

        let miss = deliver_to_nearest(&mut tree, Some(3), EventKind::Drop, Payload::None);
        assert_eq!(miss, None);
        assert_eq!(tree.log.len(), 1);
    }

    #[test]
    fn common_ancestor_of_siblings() {
        let tree = Fixture { log: Vec::new() };
        assert_eq!(common_ancestor(&tree, Some(2), Some(3)), Some(1));
        assert_eq!(common_ancestor(&tree, Some(2), Some(0)), Some(0));
        assert_eq!(common_ancestor(&tree, Some(2), Some(2)), Some(2));
        assert_eq!(common_ancestor(&tree, None, Some(2)), None);
        // Disjoint roots share nothing.
        assert_eq!(common_ancestor(&tree, Some(2), Some(9)), None);
    }
}
