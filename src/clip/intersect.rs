//! Phase 1 of the clipper: pairwise edge intersection finding.
//!
//! Every edge of polygon A is tested against every edge of polygon B. Each
//! crossing becomes a pair of cross-linked intersection nodes, one spliced
//! into each ring at the position that keeps `alpha` values ascending along
//! the source edge.
//!
//! Crossings that coincide with an edge endpoint would leave the marking
//! phase without a well-defined inside/outside transition, so the offending
//! endpoint is nudged sideways by a tiny amount and the edge pair is
//! re-examined. Input geometry is perturbed by at most a few multiples of
//! `1e-4`; exact predicates are out of scope.

use super::ring::ClipRing;
use crate::primitives::{Point2, Vec2};
use num_traits::Float;

/// Edges with a cross product below this are treated as parallel.
const PARALLEL_EPSILON: f64 = 1.0e-6;
/// Intersections closer than this to an edge endpoint are degenerate.
const ENDPOINT_ALPHA_EPSILON: f64 = 1.0e-5;
/// Distance an endpoint is nudged to resolve a degeneracy.
const PERTURBATION: f64 = 1.0e-4;

/// Solves for the parameter `t` such that `origin + t·dir` lies on the
/// infinite line through `other_origin` with direction `other_dir`.
///
/// Returns `None` when the directions are parallel within
/// [`PARALLEL_EPSILON`].
#[inline]
fn line_intersection_factor<F: Float>(
    origin: Point2<F>,
    dir: Vec2<F>,
    other_origin: Point2<F>,
    other_dir: Vec2<F>,
) -> Option<F> {
    let cross = dir.cross(other_dir);
    if cross.abs() <= F::from(PARALLEL_EPSILON).unwrap() {
        return None;
    }
    let rel = origin - other_origin;
    Some(other_dir.cross(rel) / cross)
}

#[inline]
fn in_unit_interval<F: Float>(t: F) -> bool {
    t >= F::zero() && t <= F::one()
}

/// Finds all edge crossings between the original loops of `a` and `b` and
/// inserts the paired intersection nodes into both rings.
///
/// Each inserted pair shares one position, carries the parametric `alpha`
/// of the crossing along its own edge, and cross-references its twin
/// through the neighbor link. Endpoint-grazing crossings perturb the input
/// (see the module docs) so that every surviving `alpha` is strictly
/// inside `(0, 1)`.
///
/// If either slab runs out of headroom the scan stops early; pairs
/// inserted up to that point remain consistent. Debug builds assert
/// instead.
pub fn find_intersections<F: Float>(a: &mut ClipRing<'_, F>, b: &mut ClipRing<'_, F>) {
    let a_count = a.original_len();
    let b_count = b.original_len();
    if a_count == 0 || b_count == 0 {
        return;
    }

    let endpoint_eps = F::from(ENDPOINT_ALPHA_EPSILON).unwrap();
    let delta = F::from(PERTURBATION).unwrap();

    let mut a_prev = a_count - 1;
    for i in 0..a_count {
        let mut b_prev = b_count - 1;
        let mut j = 0;
        while j < b_count {
            // Re-read positions every pass; a perturbation may have moved
            // one of the endpoints.
            let a_cur_pos = a.node(i).pos;
            let a_prev_pos = a.node(a_prev).pos;
            let b_cur_pos = b.node(j).pos;
            let b_prev_pos = b.node(b_prev).pos;

            let a_dir = a_cur_pos - a_prev_pos;
            let b_dir = b_cur_pos - b_prev_pos;

            let factors = match (
                line_intersection_factor(a_prev_pos, a_dir, b_prev_pos, b_dir),
                line_intersection_factor(b_prev_pos, b_dir, a_prev_pos, a_dir),
            ) {
                (Some(a_alpha), Some(b_alpha))
                    if in_unit_interval(a_alpha) && in_unit_interval(b_alpha) =>
                {
                    Some((a_alpha, b_alpha))
                }
                _ => None,
            };

            if let Some((a_alpha, b_alpha)) = factors {
                // Endpoint degeneracies: nudge the grazed vertex along the
                // perpendicular of the other edge and retry this pair.
                if a_alpha <= endpoint_eps {
                    a.node_mut(a_prev).pos = a_prev_pos + b_dir.perpendicular() * delta;
                    continue;
                }
                if a_alpha >= F::one() - endpoint_eps {
                    a.node_mut(i).pos = a_cur_pos + b_dir.perpendicular() * delta;
                    continue;
                }
                if b_alpha <= endpoint_eps {
                    b.node_mut(b_prev).pos = b_prev_pos + a_dir.perpendicular() * delta;
                    continue;
                }
                if b_alpha >= F::one() - endpoint_eps {
                    b.node_mut(j).pos = b_cur_pos + a_dir.perpendicular() * delta;
                    continue;
                }

                if a.len() == a.capacity() || b.len() == b.capacity() {
                    debug_assert!(false, "clip slab exhausted; remaining crossings dropped");
                    return;
                }

                let point = a_prev_pos.lerp(a_cur_pos, a_alpha);
                let a_slot = a.ascending_alpha_slot(a.node(i).prev_index(), a_alpha);
                let b_slot = b.ascending_alpha_slot(b.node(j).prev_index(), b_alpha);
                // Both tails are known before either insertion, which is
                // what lets the neighbor links be written in one pass.
                let a_neighbor = b.len();
                let b_neighbor = a.len();
                a.insert_intersection(a_slot, point, a_neighbor, a_alpha);
                b.insert_intersection(b_slot, point, b_neighbor, b_alpha);
            }

            b_prev = j;
            j += 1;
        }
        a_prev = i;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ring::ClipVertex;
    use approx::assert_relative_eq;

    fn ring_of<'a>(
        vertices: &[Point2<f32>],
        slab: &'a mut [ClipVertex<f32>],
    ) -> ClipRing<'a, f32> {
        ClipRing::new(vertices, slab)
    }

    fn square_at(x: f32, y: f32, side: f32) -> Vec<Point2<f32>> {
        vec![
            Point2::new(x, y),
            Point2::new(x + side, y),
            Point2::new(x + side, y + side),
            Point2::new(x, y + side),
        ]
    }

    fn intersection_indices(ring: &ClipRing<'_, f32>) -> Vec<usize> {
        (0..ring.len())
            .filter(|&i| ring.node(i).is_intersection())
            .collect()
    }

    #[test]
    fn test_overlapping_squares_two_crossings() {
        let a_verts = square_at(0.0, 0.0, 1.0);
        let b_verts = square_at(0.5, 0.5, 1.0);
        let mut slab_a = vec![ClipVertex::default(); 8];
        let mut slab_b = vec![ClipVertex::default(); 8];
        let mut a = ring_of(&a_verts, &mut slab_a);
        let mut b = ring_of(&b_verts, &mut slab_b);

        find_intersections(&mut a, &mut b);

        assert_eq!(a.len(), 6);
        assert_eq!(b.len(), 6);
        assert_eq!(intersection_indices(&a), vec![4, 5]);
        assert_eq!(intersection_indices(&b), vec![4, 5]);
    }

    #[test]
    fn test_neighbor_links_are_symmetric() {
        let a_verts = square_at(0.0, 0.0, 1.0);
        let b_verts = square_at(0.5, 0.5, 1.0);
        let mut slab_a = vec![ClipVertex::default(); 8];
        let mut slab_b = vec![ClipVertex::default(); 8];
        let mut a = ring_of(&a_verts, &mut slab_a);
        let mut b = ring_of(&b_verts, &mut slab_b);

        find_intersections(&mut a, &mut b);

        for i in intersection_indices(&a) {
            let twin = a.node(i).neighbor_index();
            assert!(b.node(twin).is_intersection());
            assert_eq!(b.node(twin).neighbor_index(), i);
            assert_eq!(a.node(i).pos, b.node(twin).pos);
        }
    }

    #[test]
    fn test_alpha_strictly_inside_unit_interval() {
        let a_verts = square_at(0.0, 0.0, 1.0);
        let b_verts = square_at(0.5, 0.5, 1.0);
        let mut slab_a = vec![ClipVertex::default(); 8];
        let mut slab_b = vec![ClipVertex::default(); 8];
        let mut a = ring_of(&a_verts, &mut slab_a);
        let mut b = ring_of(&b_verts, &mut slab_b);

        find_intersections(&mut a, &mut b);

        for ring in [&a, &b] {
            for i in intersection_indices(ring) {
                let alpha = ring.node(i).alpha();
                assert!(alpha > 0.0 && alpha < 1.0);
            }
        }
    }

    #[test]
    fn test_ascending_alpha_along_one_edge() {
        // A tall thin rectangle crossed twice by the same edge of a
        // sawtooth-shaped polygon produces two crossings on one edge.
        let a_verts = vec![
            Point2::new(0.0_f32, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let b_verts = vec![
            Point2::new(0.5_f32, -0.5),
            Point2::new(1.5, 1.5),
            Point2::new(2.5, -0.5),
        ];
        let mut slab_a = vec![ClipVertex::default(); 16];
        let mut slab_b = vec![ClipVertex::default(); 16];
        let mut a = ring_of(&a_verts, &mut slab_a);
        let mut b = ring_of(&b_verts, &mut slab_b);

        find_intersections(&mut a, &mut b);
        assert_eq!(a.len(), 8);

        // Walk every edge of A; alphas between consecutive intersection
        // nodes on the same edge must strictly increase.
        let mut i = a.node(0).next_index();
        let mut prev_alpha: Option<f32> = None;
        while i != 0 {
            let node = a.node(i);
            if node.is_intersection() {
                if let Some(prev) = prev_alpha {
                    assert!(node.alpha() > prev);
                }
                prev_alpha = Some(node.alpha());
            } else {
                prev_alpha = None;
            }
            i = node.next_index();
        }
    }

    #[test]
    fn test_disjoint_squares_no_crossings() {
        let a_verts = square_at(0.0, 0.0, 1.0);
        let b_verts = square_at(5.0, 5.0, 1.0);
        let mut slab_a = vec![ClipVertex::default(); 8];
        let mut slab_b = vec![ClipVertex::default(); 8];
        let mut a = ring_of(&a_verts, &mut slab_a);
        let mut b = ring_of(&b_verts, &mut slab_b);

        find_intersections(&mut a, &mut b);

        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn test_shared_corner_is_perturbed() {
        // B's corner touches A's corner exactly; the degenerate crossing
        // must be nudged away rather than inserted at alpha 0 or 1.
        let a_verts = square_at(0.0, 0.0, 1.0);
        let b_verts = square_at(1.0, 1.0, 1.0);
        let mut slab_a = vec![ClipVertex::default(); 16];
        let mut slab_b = vec![ClipVertex::default(); 16];
        let mut a = ring_of(&a_verts, &mut slab_a);
        let mut b = ring_of(&b_verts, &mut slab_b);

        find_intersections(&mut a, &mut b);

        for ring in [&a, &b] {
            for i in 0..ring.len() {
                let node = ring.node(i);
                if node.is_intersection() {
                    assert!(node.alpha() > 0.0 && node.alpha() < 1.0);
                }
            }
        }
    }

    #[test]
    fn test_crossing_through_edge_midpoint_vertex() {
        // B has a vertex lying exactly on A's right edge. The perturbation
        // shifts it and the pipeline still finds clean crossings.
        let a_verts = square_at(0.0, 0.0, 2.0);
        let b_verts = vec![
            Point2::new(2.0_f32, 1.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 2.0),
        ];
        let mut slab_a = vec![ClipVertex::default(); 16];
        let mut slab_b = vec![ClipVertex::default(); 16];
        let mut a = ring_of(&a_verts, &mut slab_a);
        let mut b = ring_of(&b_verts, &mut slab_b);

        find_intersections(&mut a, &mut b);

        for ring in [&a, &b] {
            for i in 0..ring.len() {
                let node = ring.node(i);
                if node.is_intersection() {
                    assert!(node.alpha() > 0.0 && node.alpha() < 1.0);
                }
            }
        }
    }

    #[test]
    fn test_f64_crossing_position() {
        let a_verts = vec![
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        let b_verts = vec![
            Point2::new(1.0_f64, 1.0),
            Point2::new(3.0, 1.0),
            Point2::new(3.0, 3.0),
            Point2::new(1.0, 3.0),
        ];
        let mut slab_a = vec![ClipVertex::default(); 8];
        let mut slab_b = vec![ClipVertex::default(); 8];
        let mut a = ClipRing::new(&a_verts, &mut slab_a);
        let mut b = ClipRing::new(&b_verts, &mut slab_b);

        find_intersections(&mut a, &mut b);

        let positions: Vec<_> = (4..a.len()).map(|i| a.node(i).pos).collect();
        assert_eq!(positions.len(), 2);
        // Crossings at (2, 1) and (1, 2).
        let on_right = positions
            .iter()
            .find(|p| (p.x - 2.0).abs() < 1e-9)
            .expect("crossing on right edge");
        assert_relative_eq!(on_right.y, 1.0, epsilon = 1e-9);
        let on_top = positions
            .iter()
            .find(|p| (p.y - 2.0).abs() < 1e-9)
            .expect("crossing on top edge");
        assert_relative_eq!(on_top.x, 1.0, epsilon = 1e-9);
    }
}
