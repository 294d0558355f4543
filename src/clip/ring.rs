//! Index-linked vertex rings backing the clipper.
//!
//! A [`ClipRing`] is a circular doubly-linked list embedded in a contiguous
//! caller-owned slab. Links are slab indices rather than references, so the
//! slab owns every node and cross-links between the two rings of a clipping
//! operation are plain integers. Intersection nodes found during phase 1 are
//! appended at the slab tail and spliced into the loop, which is why the
//! slab must be larger than the polygon it starts from.

use super::mark::FollowDirection;
use crate::primitives::Point2;
use num_traits::Float;

/// A node of a clip ring.
///
/// The first `original_len` slots of a slab hold the input polygon; nodes
/// appended past that are intersections. `neighbor` pairs an intersection
/// with its twin on the other polygon's ring and is meaningless for
/// original vertices, as is `alpha`.
#[derive(Debug, Clone, Copy)]
pub struct ClipVertex<F> {
    /// Position of this vertex.
    pub pos: Point2<F>,
    pub(crate) next: u32,
    pub(crate) prev: u32,
    pub(crate) neighbor: u32,
    pub(crate) alpha: F,
    pub(crate) intersect: bool,
    pub(crate) exit: bool,
    pub(crate) processed: bool,
}

impl<F: Float> ClipVertex<F> {
    /// Returns true if this node is an intersection inserted by phase 1.
    #[inline]
    pub fn is_intersection(&self) -> bool {
        self.intersect
    }

    /// Returns true if this intersection was classified as an exit during
    /// phase 2.
    #[inline]
    pub fn is_exit(&self) -> bool {
        self.exit
    }

    /// Parametric position of this intersection along its source edge.
    #[inline]
    pub fn alpha(&self) -> F {
        self.alpha
    }

    /// Slab index of this node's successor.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.next as usize
    }

    /// Slab index of this node's predecessor.
    #[inline]
    pub fn prev_index(&self) -> usize {
        self.prev as usize
    }

    /// Slab index of the paired intersection on the other ring.
    #[inline]
    pub fn neighbor_index(&self) -> usize {
        self.neighbor as usize
    }
}

impl<F: Float> Default for ClipVertex<F> {
    fn default() -> Self {
        Self {
            pos: Point2::origin(),
            next: 0,
            prev: 0,
            neighbor: 0,
            alpha: F::zero(),
            intersect: false,
            exit: false,
            processed: false,
        }
    }
}

/// A polygon in the clipper's working form: a caller-owned slab of
/// [`ClipVertex`] nodes linked into a circular loop.
///
/// Created by [`ClipRing::new`] (the transform phase); mutated by
/// [`find_intersections`](super::find_intersections), which appends
/// intersection nodes, and by the marking and emission phases, which set
/// flags. The slab borrow ends when the ring is dropped, handing the
/// memory back untouched.
#[derive(Debug)]
pub struct ClipRing<'a, F> {
    slab: &'a mut [ClipVertex<F>],
    original_len: usize,
    len: usize,
    follow: FollowDirection,
}

impl<'a, F: Float> ClipRing<'a, F> {
    /// Builds a ring over `slab` from the given vertex loop.
    ///
    /// The first `vertices.len()` slots are initialized with positions and
    /// circular `prev`/`next` linkage; flags and auxiliary fields are
    /// cleared. The remaining slots are headroom for intersections — size
    /// the slab at `n + 2·k` for `k` anticipated crossings.
    ///
    /// Debug builds assert that the slab is at least as long as the vertex
    /// loop; release builds truncate the loop to the slab.
    pub fn new(vertices: &[Point2<F>], slab: &'a mut [ClipVertex<F>]) -> Self {
        debug_assert!(
            slab.len() >= vertices.len(),
            "clip slab shorter than vertex loop"
        );
        let count = vertices.len().min(slab.len());

        let mut prev = count.wrapping_sub(1);
        for i in 0..count {
            slab[i] = ClipVertex {
                pos: vertices[i],
                next: (i + 1) as u32,
                prev: prev as u32,
                ..ClipVertex::default()
            };
            prev = i;
        }
        if count > 0 {
            slab[count - 1].next = 0;
        }

        Self {
            slab,
            original_len: count,
            len: count,
            follow: FollowDirection::Forward,
        }
    }

    /// Number of user-supplied vertices occupying the slab prefix.
    #[inline]
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Populated node count, including inserted intersections.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the ring holds no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total slab capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slab.len()
    }

    /// Borrows the node at slab index `index`.
    #[inline]
    pub fn node(&self, index: usize) -> &ClipVertex<F> {
        &self.slab[index]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, index: usize) -> &mut ClipVertex<F> {
        &mut self.slab[index]
    }

    #[inline]
    pub(crate) fn follow(&self) -> FollowDirection {
        self.follow
    }

    #[inline]
    pub(crate) fn set_follow(&mut self, follow: FollowDirection) {
        self.follow = follow;
    }

    /// Walks backward from `at` to the last position whose predecessor is
    /// an intersection with a larger `alpha`, keeping intersections on one
    /// edge sorted by ascending `alpha`.
    pub(crate) fn ascending_alpha_slot(&self, mut at: usize, alpha: F) -> usize {
        while self.slab[at].intersect && self.slab[at].alpha > alpha {
            at = self.slab[at].prev as usize;
        }
        at
    }

    /// Appends an intersection node at the slab tail and splices it in
    /// after `after`. The caller has already checked capacity.
    pub(crate) fn insert_intersection(
        &mut self,
        after: usize,
        pos: Point2<F>,
        neighbor: usize,
        alpha: F,
    ) {
        let index = self.len;
        let next = self.slab[after].next as usize;

        self.slab[index] = ClipVertex {
            pos,
            next: next as u32,
            prev: after as u32,
            neighbor: neighbor as u32,
            alpha,
            intersect: true,
            exit: false,
            processed: false,
        };
        self.slab[after].next = index as u32;
        self.slab[next].prev = index as u32;
        self.len += 1;
    }

    /// Tests whether a point lies inside the original polygon using a
    /// horizontal-ray crossing count.
    ///
    /// The half-open comparisons keep edges meeting at a vertex from being
    /// counted twice. Intersections inserted by phase 1 are ignored; only
    /// the original loop participates.
    pub fn contains_point(&self, p: Point2<F>) -> bool {
        let count = self.original_len;
        if count == 0 {
            return false;
        }

        let mut crossings = 0u32;
        let mut prev = count - 1;
        for i in 0..count {
            let cur = self.slab[i].pos;
            let prev_pos = self.slab[prev].pos;

            if (p.y <= prev_pos.y && p.y > cur.y) || (p.y > prev_pos.y && p.y <= cur.y) {
                let alpha = (prev_pos.y - p.y) / (prev_pos.y - cur.y);
                let x_intersection = prev_pos.x + alpha * (cur.x - prev_pos.x);
                if p.x < x_intersection {
                    crossings += 1;
                }
            }
            prev = i;
        }

        crossings % 2 == 1
    }
}
