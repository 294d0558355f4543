//! Phase 2 of the clipper: entry/exit classification.
//!
//! Each ring is walked once. Starting from the containment state of its
//! first vertex relative to the other polygon, every intersection node
//! toggles the state; nodes reached while inside are flagged as exits.
//! The follow direction flips the initial state, which is the whole trick
//! behind operation selection: the emission phase walks backward through
//! exits and forward otherwise, so flipping what counts as an exit flips
//! which side of the other polygon survives.

use super::ring::ClipRing;
use num_traits::Float;

/// Traversal direction assigned to one polygon of a clipping operation.
///
/// The pair of directions passed to [`mark_entry_exit`] selects the
/// Boolean operation; see [`BooleanOp`](super::BooleanOp) for the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowDirection {
    /// Keep the side of the other polygon the ring enters.
    Forward,
    /// Keep the opposite side.
    Backward,
}

/// Classifies every intersection node of both rings as entry or exit.
///
/// `a_dir` and `b_dir` select the Boolean operation that the subsequent
/// emission phase realizes:
///
/// | `a_dir`  | `b_dir`  | Result |
/// |----------|----------|--------|
/// | Forward  | Forward  | A ∩ B  |
/// | Backward | Forward  | A ∖ B  |
/// | Forward  | Backward | B ∖ A  |
/// | Backward | Backward | A ∪ B  |
///
/// The direction is also recorded on each ring for the emission phase's
/// no-crossing fallback.
pub fn mark_entry_exit<F: Float>(
    a: &mut ClipRing<'_, F>,
    b: &mut ClipRing<'_, F>,
    a_dir: FollowDirection,
    b_dir: FollowDirection,
) {
    mark_ring(a, b, a_dir);
    mark_ring(b, a, b_dir);
}

fn mark_ring<F: Float>(
    current: &mut ClipRing<'_, F>,
    other: &ClipRing<'_, F>,
    dir: FollowDirection,
) {
    current.set_follow(dir);
    if current.is_empty() {
        return;
    }

    let mut inside = other.contains_point(current.node(0).pos);
    if dir == FollowDirection::Backward {
        inside = !inside;
    }

    // The first slot holds an original vertex, so starting the walk at its
    // successor visits every intersection exactly once.
    let mut i = current.node(0).next_index();
    while i != 0 {
        let node = current.node_mut(i);
        if node.intersect {
            if inside {
                node.exit = true;
            }
            inside = !inside;
        }
        i = node.next_index();
    }
}
