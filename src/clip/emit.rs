//! Phase 3 of the clipper: emitting the clipped polygons.
//!
//! The emitter walks ring A looking for unprocessed intersection nodes.
//! Each one starts an output polygon: the traversal follows the current
//! ring forward, or backward through nodes marked as exits, emitting every
//! position it passes, and hops to the twin node on the other ring at each
//! intersection. The loop closes when it returns to the node it started
//! from, at which point the scan of ring A resumes.
//!
//! When the rings never cross, the result is decided by containment and
//! the follow directions recorded during marking. One known limitation is
//! inherited from the hole-free data model: a difference whose subtrahend
//! lies strictly inside the minuend would need a hole, which cannot be
//! represented, so the minuend is emitted without it.

use super::ring::ClipRing;
use crate::primitives::Point2;
use num_traits::Float;

use super::mark::FollowDirection;

/// Describes one emitted polygon as a contiguous range of the shared
/// output pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolygonSpan {
    /// Offset of the polygon's first vertex in the pool.
    pub start: usize,
    /// Number of vertices in the polygon.
    pub len: usize,
}

impl PolygonSpan {
    /// Resolves this span against the pool it was emitted into.
    #[inline]
    pub fn resolve<'p, F>(&self, pool: &'p [Point2<F>]) -> &'p [Point2<F>] {
        &pool[self.start..self.start + self.len]
    }
}

/// Totals returned by [`emit_polygons`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipCounts {
    /// Polygons emitted into the span table.
    pub polygons: usize,
    /// Vertices consumed from the shared pool.
    pub vertices: usize,
}

/// Emits the polygons produced by a marked pair of rings.
///
/// Span descriptors are written to `polygons` and vertex data to the
/// shared `pool`; each emitted polygon occupies one span. The pool must
/// hold the sum of all resulting polygon sizes, worst case
/// `2·(n_a + n_b)` vertices. Exhausting either buffer stops emission with
/// everything produced so far finalized and counted — the caller detects
/// truncation by comparing counts against expectations and must rerun the
/// whole pipeline with larger buffers.
///
/// # Example
///
/// ```
/// use polycut::{
///     emit_polygons, find_intersections, mark_entry_exit, polygon_area, BooleanOp, ClipRing,
///     ClipVertex, Point2, PolygonSpan,
/// };
///
/// let a_verts = [
///     Point2::new(0.0_f32, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let b_verts = [
///     Point2::new(0.5_f32, 0.5),
///     Point2::new(1.5, 0.5),
///     Point2::new(1.5, 1.5),
///     Point2::new(0.5, 1.5),
/// ];
///
/// let mut slab_a = [ClipVertex::default(); 8];
/// let mut slab_b = [ClipVertex::default(); 8];
/// let mut a = ClipRing::new(&a_verts, &mut slab_a);
/// let mut b = ClipRing::new(&b_verts, &mut slab_b);
///
/// find_intersections(&mut a, &mut b);
/// let (dir_a, dir_b) = BooleanOp::Intersection.follow_directions();
/// mark_entry_exit(&mut a, &mut b, dir_a, dir_b);
///
/// let mut spans = [PolygonSpan::default(); 4];
/// let mut pool = [Point2::new(0.0_f32, 0.0); 16];
/// let counts = emit_polygons(&mut a, &mut b, &mut spans, &mut pool);
///
/// assert_eq!(counts.polygons, 1);
/// let overlap = spans[0].resolve(&pool);
/// assert!((polygon_area(overlap) - 0.25).abs() < 1e-4);
/// ```
pub fn emit_polygons<'a, F: Float>(
    a: &mut ClipRing<'a, F>,
    b: &mut ClipRing<'a, F>,
    polygons: &mut [PolygonSpan],
    pool: &mut [Point2<F>],
) -> ClipCounts {
    if a.is_empty() {
        return ClipCounts::default();
    }

    let mut emitted = 0;
    let mut open: Option<usize> = None;
    let mut put = 0;
    let mut has_intersections = false;

    // The scan stays on ring A; slot 0 is always an original vertex, so
    // starting past it is safe.
    let mut on_a = true;
    let mut i = a.node(0).next_index();

    while i != 0 {
        let starts_polygon = {
            let node = a.node(i);
            node.intersect && !node.processed
        };
        if starts_polygon {
            a.node_mut(i).processed = true;
            has_intersections = true;

            if let Some(span) = open {
                polygons[span].len = put - polygons[span].start;
            }
            if emitted + 1 > polygons.len() {
                debug_assert!(false, "polygon span table exhausted");
                return ClipCounts {
                    polygons: emitted,
                    vertices: put,
                };
            }
            let span = emitted;
            emitted += 1;
            polygons[span] = PolygonSpan { start: put, len: 0 };
            open = Some(span);

            let start = i;
            let start_on_a = on_a;
            loop {
                // Walk the current ring to the next intersection, emitting
                // every position passed (including that intersection).
                let backward = {
                    let node = if on_a { a.node(i) } else { b.node(i) };
                    node.exit
                };
                loop {
                    let ring: &mut ClipRing<'_, F> = if on_a { &mut *a } else { &mut *b };
                    i = if backward {
                        ring.node(i).prev_index()
                    } else {
                        ring.node(i).next_index()
                    };
                    let node = ring.node_mut(i);
                    node.processed = true;
                    let pos = node.pos;
                    let reached_intersection = node.intersect;

                    if put + 1 > pool.len() {
                        debug_assert!(false, "vertex pool exhausted");
                        if let Some(span) = open {
                            polygons[span].len = put - polygons[span].start;
                        }
                        return ClipCounts {
                            polygons: emitted,
                            vertices: put,
                        };
                    }
                    pool[put] = pos;
                    put += 1;

                    if reached_intersection {
                        break;
                    }
                }

                // Hop to the twin on the other ring and keep going there.
                i = if on_a {
                    a.node(i).neighbor_index()
                } else {
                    b.node(i).neighbor_index()
                };
                on_a = !on_a;
                {
                    let node = if on_a { a.node_mut(i) } else { b.node_mut(i) };
                    debug_assert!(node.intersect);
                    node.processed = true;
                }

                if i == start && on_a == start_on_a {
                    break;
                }
            }
        }

        i = a.node(i).next_index();
    }

    if !has_intersections {
        if let Some(emit_a) = containment_choice(a, b) {
            let ring: &ClipRing<'_, F> = if emit_a { &*a } else { &*b };
            if emitted + 1 > polygons.len() {
                debug_assert!(false, "polygon span table exhausted");
                return ClipCounts {
                    polygons: emitted,
                    vertices: put,
                };
            }
            let span = emitted;
            emitted += 1;
            polygons[span] = PolygonSpan { start: put, len: 0 };
            open = Some(span);

            let count = ring.original_len().min(pool.len() - put);
            for slot in 0..count {
                pool[put] = ring.node(slot).pos;
                put += 1;
            }
        }
    }

    if let Some(span) = open {
        polygons[span].len = put - polygons[span].start;
    }
    ClipCounts {
        polygons: emitted,
        vertices: put,
    }
}

/// Resolves the no-crossing case by containment, honoring the follow
/// directions recorded during marking so every operation gets its
/// documented fallback. Returns which ring's original loop to emit, if
/// any: `Some(true)` for A, `Some(false)` for B.
fn containment_choice<F: Float>(a: &ClipRing<'_, F>, b: &ClipRing<'_, F>) -> Option<bool> {
    use FollowDirection::{Backward, Forward};

    let a_inside_b = !a.is_empty() && b.contains_point(a.node(0).pos);
    let b_inside_a = !b.is_empty() && a.contains_point(b.node(0).pos);

    match (a.follow(), b.follow()) {
        // Intersection: the contained polygon is the overlap.
        (Forward, Forward) => {
            if a_inside_b {
                Some(true)
            } else if b_inside_a {
                Some(false)
            } else {
                None
            }
        }
        // Union: the containing polygon covers both; disjoint inputs
        // cannot be joined into one outline and intentionally emit
        // nothing.
        (Backward, Backward) => {
            if a_inside_b {
                Some(false)
            } else if b_inside_a {
                Some(true)
            } else {
                None
            }
        }
        // A minus B: a fully covered A vanishes; otherwise A survives.
        // A contained B would punch a hole, which the data model cannot
        // express, so the hole is dropped.
        (Backward, Forward) => {
            if a_inside_b || a.is_empty() {
                None
            } else {
                Some(true)
            }
        }
        // B minus A, symmetric.
        (Forward, Backward) => {
            if b_inside_a || b.is_empty() {
                None
            } else {
                Some(false)
            }
        }
    }
}

/// Convenience wrapper for operations expected to produce one polygon.
///
/// Runs [`emit_polygons`] with a single-entry span table and returns the
/// vertex count of the emitted polygon, or 0 when nothing was produced.
pub fn emit_polygon<'a, F: Float>(
    a: &mut ClipRing<'a, F>,
    b: &mut ClipRing<'a, F>,
    pool: &mut [Point2<F>],
) -> usize {
    let mut spans = [PolygonSpan::default()];
    emit_polygons(a, b, &mut spans, pool);
    spans[0].len
}
