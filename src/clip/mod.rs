//! Greiner-Hormann boolean clipping of simple polygons.
//!
//! Clipping runs in three phases over a pair of index-linked vertex rings,
//! plus a setup step:
//!
//! 1. [`ClipRing::new`] turns each input polygon into a ring backed by a
//!    caller-owned slab with headroom for intersections.
//! 2. [`find_intersections`] inserts a cross-linked pair of nodes for every
//!    edge crossing, perturbing endpoint-grazing degeneracies away.
//! 3. [`mark_entry_exit`] classifies each intersection as entry or exit;
//!    the pair of [`FollowDirection`]s selects the Boolean operation.
//! 4. [`emit_polygons`] walks the rings, switching sides at every
//!    intersection, and writes the resulting polygons into a shared vertex
//!    pool.
//!
//! [`clip_boolean`] packages the phases into one checked call.
//!
//! # Example
//!
//! ```
//! use polycut::{clip_boolean, polygon_area, BooleanOp, ClipVertex, Point2, PolygonSpan};
//!
//! let subject = [
//!     Point2::new(0.0_f32, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ];
//! let clip = [
//!     Point2::new(1.0_f32, 1.0),
//!     Point2::new(3.0, 1.0),
//!     Point2::new(3.0, 3.0),
//!     Point2::new(1.0, 3.0),
//! ];
//!
//! let mut slab_a = [ClipVertex::default(); 16];
//! let mut slab_b = [ClipVertex::default(); 16];
//! let mut spans = [PolygonSpan::default(); 4];
//! let mut pool = [Point2::new(0.0_f32, 0.0); 32];
//!
//! let counts = clip_boolean(
//!     &subject,
//!     &clip,
//!     BooleanOp::Intersection,
//!     &mut slab_a,
//!     &mut slab_b,
//!     &mut spans,
//!     &mut pool,
//! )
//! .unwrap();
//!
//! assert_eq!(counts.polygons, 1);
//! assert!((polygon_area(spans[0].resolve(&pool)) - 1.0).abs() < 1e-4);
//! ```

mod emit;
mod intersect;
mod mark;
mod ring;

pub use emit::{emit_polygon, emit_polygons, ClipCounts, PolygonSpan};
pub use intersect::find_intersections;
pub use mark::{mark_entry_exit, FollowDirection};
pub use ring::{ClipRing, ClipVertex};

use crate::error::ClipError;
use crate::primitives::Point2;
use num_traits::Float;

/// Boolean combination of two polygons, selecting the pair of follow
/// directions the marking phase runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// A ∩ B.
    Intersection,
    /// A ∪ B.
    Union,
    /// A ∖ B.
    DifferenceAb,
    /// B ∖ A.
    DifferenceBa,
}

impl BooleanOp {
    /// Returns the follow directions realizing this operation.
    #[inline]
    pub fn follow_directions(self) -> (FollowDirection, FollowDirection) {
        match self {
            BooleanOp::Intersection => (FollowDirection::Forward, FollowDirection::Forward),
            BooleanOp::DifferenceAb => (FollowDirection::Backward, FollowDirection::Forward),
            BooleanOp::DifferenceBa => (FollowDirection::Forward, FollowDirection::Backward),
            BooleanOp::Union => (FollowDirection::Backward, FollowDirection::Backward),
        }
    }
}

/// Runs the full clipping pipeline for one Boolean operation.
///
/// Validates that each slab can hold its input polygon, then transforms,
/// finds intersections, marks, and emits. All buffers are caller-owned;
/// see the phase functions for the individual sizing contracts. Output
/// exhaustion is still reported by truncated counts, exactly as with
/// [`emit_polygons`] called directly.
#[allow(clippy::too_many_arguments)]
pub fn clip_boolean<F: Float>(
    subject: &[Point2<F>],
    clip: &[Point2<F>],
    op: BooleanOp,
    slab_a: &mut [ClipVertex<F>],
    slab_b: &mut [ClipVertex<F>],
    polygons: &mut [PolygonSpan],
    pool: &mut [Point2<F>],
) -> Result<ClipCounts, ClipError> {
    if slab_a.len() < subject.len() {
        return Err(ClipError::SlabTooSmall {
            required: subject.len(),
            capacity: slab_a.len(),
        });
    }
    if slab_b.len() < clip.len() {
        return Err(ClipError::SlabTooSmall {
            required: clip.len(),
            capacity: slab_b.len(),
        });
    }

    let mut a = ClipRing::new(subject, slab_a);
    let mut b = ClipRing::new(clip, slab_b);

    find_intersections(&mut a, &mut b);
    let (dir_a, dir_b) = op.follow_directions();
    mark_entry_exit(&mut a, &mut b, dir_a, dir_b);
    Ok(emit_polygons(&mut a, &mut b, polygons, pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::polygon_area;
    use approx::assert_relative_eq;

    fn square_at(x: f32, y: f32, side: f32) -> Vec<Point2<f32>> {
        vec![
            Point2::new(x, y),
            Point2::new(x + side, y),
            Point2::new(x + side, y + side),
            Point2::new(x, y + side),
        ]
    }

    #[test]
    fn test_follow_direction_table() {
        use FollowDirection::{Backward, Forward};
        assert_eq!(
            BooleanOp::Intersection.follow_directions(),
            (Forward, Forward)
        );
        assert_eq!(
            BooleanOp::DifferenceAb.follow_directions(),
            (Backward, Forward)
        );
        assert_eq!(
            BooleanOp::DifferenceBa.follow_directions(),
            (Forward, Backward)
        );
        assert_eq!(BooleanOp::Union.follow_directions(), (Backward, Backward));
    }

    #[test]
    fn test_clip_boolean_matches_phases() {
        let subject = square_at(0.0, 0.0, 1.0);
        let clip = square_at(0.5, 0.5, 1.0);

        let mut slab_a = vec![ClipVertex::default(); 16];
        let mut slab_b = vec![ClipVertex::default(); 16];
        let mut spans = vec![PolygonSpan::default(); 4];
        let mut pool = vec![Point2::new(0.0, 0.0); 32];

        let counts = clip_boolean(
            &subject,
            &clip,
            BooleanOp::Union,
            &mut slab_a,
            &mut slab_b,
            &mut spans,
            &mut pool,
        )
        .unwrap();

        assert_eq!(counts.polygons, 1);
        assert_eq!(counts.vertices, 8);
        assert_relative_eq!(polygon_area(spans[0].resolve(&pool)), 1.75, epsilon = 1e-4);
    }

    #[test]
    fn test_clip_boolean_rejects_short_slab() {
        let subject = square_at(0.0, 0.0, 1.0);
        let clip = square_at(0.5, 0.5, 1.0);

        let mut slab_a = vec![ClipVertex::default(); 2];
        let mut slab_b = vec![ClipVertex::default(); 16];
        let mut spans = vec![PolygonSpan::default(); 4];
        let mut pool = vec![Point2::new(0.0, 0.0); 32];

        let err = clip_boolean(
            &subject,
            &clip,
            BooleanOp::Intersection,
            &mut slab_a,
            &mut slab_b,
            &mut spans,
            &mut pool,
        )
        .unwrap_err();

        assert_eq!(
            err,
            crate::error::ClipError::SlabTooSmall {
                required: 4,
                capacity: 2,
            }
        );
    }

    #[test]
    fn test_f64() {
        let subject = [
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let clip = [
            Point2::new(0.5_f64, 0.5),
            Point2::new(1.5, 0.5),
            Point2::new(1.5, 1.5),
            Point2::new(0.5, 1.5),
        ];

        let mut slab_a = vec![ClipVertex::default(); 16];
        let mut slab_b = vec![ClipVertex::default(); 16];
        let mut spans = vec![PolygonSpan::default(); 4];
        let mut pool = vec![Point2::new(0.0_f64, 0.0); 32];

        let counts = clip_boolean(
            &subject,
            &clip,
            BooleanOp::Union,
            &mut slab_a,
            &mut slab_b,
            &mut spans,
            &mut pool,
        )
        .unwrap();

        assert_eq!(counts.polygons, 1);
        assert_eq!(counts.vertices, 8);
        assert_relative_eq!(
            polygon_area(spans[0].resolve(&pool)),
            1.75,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_all_operations_on_same_inputs() {
        let subject = square_at(0.0, 0.0, 2.0);
        let clip = square_at(1.0, 1.0, 2.0);

        let run = |op| {
            let mut slab_a = vec![ClipVertex::default(); 16];
            let mut slab_b = vec![ClipVertex::default(); 16];
            let mut spans = vec![PolygonSpan::default(); 4];
            let mut pool = vec![Point2::new(0.0, 0.0); 32];
            let counts = clip_boolean(
                &subject,
                &clip,
                op,
                &mut slab_a,
                &mut slab_b,
                &mut spans,
                &mut pool,
            )
            .unwrap();
            (0..counts.polygons)
                .map(|p| polygon_area(spans[p].resolve(&pool)))
                .sum::<f32>()
        };

        assert_relative_eq!(run(BooleanOp::Intersection), 1.0, epsilon = 1e-3);
        assert_relative_eq!(run(BooleanOp::Union), 7.0, epsilon = 1e-3);
        assert_relative_eq!(run(BooleanOp::DifferenceAb), 3.0, epsilon = 1e-3);
        assert_relative_eq!(run(BooleanOp::DifferenceBa), 3.0, epsilon = 1e-3);
    }
}
