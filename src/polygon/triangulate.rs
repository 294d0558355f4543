//! Ear-clipping triangulation into caller-supplied index buffers.
//!
//! Converts a simple polygon into a stream of triangle indices that can be
//! uploaded to a graphics index buffer as-is. Self-intersecting polygons and
//! polygons with holes are not handled.
//!
//! # Algorithm
//!
//! The classic ear-clipping loop over a shrinking vertex ring:
//! - A candidate triangle of three consecutive ring vertices is an ear when
//!   it matches the polygon's winding and contains no other ring vertex.
//! - Clipping an ear removes its middle vertex from the ring and rewinds the
//!   scan so the two preceding vertices are reconsidered immediately.
//! - A rejection advances the scan by one vertex with wraparound.
//!
//! The ring lives in a caller-supplied scratch buffer; nothing is allocated.
//!
//! # Complexity
//!
//! - Time: O(n²) for a polygon with n vertices
//! - Space: O(1) beyond the caller's buffers

use crate::polygon::Winding;
use crate::primitives::Point2;
use num_traits::Float;

/// Index type emitted by the triangulator.
///
/// Selects the width of the produced index stream; `u16` matches compact
/// GPU index buffers, `u32` and `usize` are available for larger meshes.
pub trait Index: Copy {
    /// Converts a vertex ordinal into this index type.
    fn from_usize(value: usize) -> Self;
    /// Widens this index back to a usize.
    fn as_usize(self) -> usize;
}

impl Index for u16 {
    #[inline]
    fn from_usize(value: usize) -> Self {
        value as u16
    }

    #[inline]
    fn as_usize(self) -> usize {
        self as usize
    }
}

impl Index for u32 {
    #[inline]
    fn from_usize(value: usize) -> Self {
        value as u32
    }

    #[inline]
    fn as_usize(self) -> usize {
        self as usize
    }
}

impl Index for usize {
    #[inline]
    fn from_usize(value: usize) -> Self {
        value
    }

    #[inline]
    fn as_usize(self) -> usize {
        self
    }
}

/// Triangulates a simple polygon by ear clipping, writing triangle indices
/// into `indices`.
///
/// Every emitted index is the position of a vertex in `vertices`, offset by
/// `begin`; triples of indices form triangles. Triangles are wound according
/// to `emit`: when the input `winding` differs, the last two indices of each
/// triple are swapped.
///
/// `scratch` must hold at least `vertices.len()` entries; it is the working
/// ring of the algorithm and its contents are overwritten. The caller keeps
/// ownership of all buffers; nothing is allocated.
///
/// Returns the number of indices written, always a multiple of 3. For a
/// simple polygon of `n` vertices and an output buffer of at least
/// `3·(n−2)` entries, exactly `3·(n−2)` indices are produced. On output
/// exhaustion, or when no ear can be found (non-simple or numerically
/// degenerate input), the indices emitted so far are returned.
///
/// # Example
///
/// ```
/// use polycut::polygon::{triangulate_polygon, Winding};
/// use polycut::Point2;
///
/// let triangle = [
///     Point2::new(0.0_f32, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// ];
///
/// let mut scratch = [0u16; 3];
/// let mut indices = [0u16; 3];
/// let winding = Winding::of(&triangle);
/// let written =
///     triangulate_polygon(&triangle, winding, &mut scratch, 5, &mut indices, winding);
///
/// assert_eq!(written, 3);
/// assert_eq!(indices, [5, 6, 7]);
/// ```
pub fn triangulate_polygon<F: Float, I: Index>(
    vertices: &[Point2<F>],
    winding: Winding,
    scratch: &mut [I],
    begin: usize,
    indices: &mut [I],
    emit: Winding,
) -> usize {
    let n = vertices.len();
    if n < 3 {
        return 0;
    }
    if scratch.len() < n {
        debug_assert!(false, "scratch ring shorter than vertex count");
        return 0;
    }

    let ring = &mut scratch[..n];
    for (i, entry) in ring.iter_mut().enumerate() {
        *entry = I::from_usize(i);
    }

    let clockwise = winding == Winding::Clockwise;
    let swap = winding != emit;

    let mut size = n;
    let mut written = 0;
    let (mut a, mut b, mut c) = (0, 1, 2);
    let mut current = 2;
    let mut attempts = 0;

    while size > 2 {
        if is_ear(&ring[..size], a, b, c, vertices, clockwise) {
            if written + 3 > indices.len() {
                debug_assert!(false, "index buffer exhausted");
                break;
            }
            let ia = I::from_usize(ring[a].as_usize() + begin);
            let ib = I::from_usize(ring[b].as_usize() + begin);
            let ic = I::from_usize(ring[c].as_usize() + begin);
            indices[written] = ia;
            if swap {
                indices[written + 1] = ic;
                indices[written + 2] = ib;
            } else {
                indices[written + 1] = ib;
                indices[written + 2] = ic;
            }
            written += 3;

            // Drop the ear tip from the ring and rewind so the triangle
            // ending at the removed slot is examined next.
            size -= 1;
            attempts = 0;
            ring.copy_within(b + 1..size + 1, b);
            current = a;
            if current >= size {
                current -= size;
            }
            if current >= 2 {
                a = current - 2;
                b = current - 1;
            } else {
                a = size - (2 - current);
                b = if current >= 1 { current - 1 } else { size - 1 };
            }
            c = current;
        } else {
            a = b;
            b = current;
            current += 1;
            c = current;
            if current >= size {
                current = 0;
                a = size - 2;
                b = size - 1;
                c = current;
            }
            // A full lap without clipping an ear means the input is not a
            // simple polygon (or is numerically degenerate); bail out with
            // whatever has been emitted.
            if attempts > 2 * size {
                break;
            }
            attempts += 1;
        }
    }

    written
}

/// Returns true if the triangle `(a, b, c)` is wound clockwise under the
/// Y-down convention (non-negative cross product).
#[inline]
fn is_triangle_clockwise<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> bool {
    (b - a).cross(c - a) >= F::zero()
}

/// Tests whether `v` lies inside the closed triangle `(a, b, c)` using
/// barycentric coordinates.
///
/// Boundary points count as inside. Rejecting ears whose candidate triangle
/// merely touches another vertex keeps collinear neighbors from producing
/// zero-area slivers and the scan from cycling forever.
fn point_in_triangle<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, v: Point2<F>) -> bool {
    let ab = b - a;
    let ac = c - a;
    let av = v - a;

    let bc = ab.dot(ac);
    let vc = av.dot(ac);
    let vb = av.dot(ab);
    let cc = ac.dot(ac);
    let bb = ab.dot(ab);

    let inv_denom = F::one() / (bb * cc - bc * bc);
    let r = (cc * vb - bc * vc) * inv_denom;
    let s = (bb * vc - bc * vb) * inv_denom;

    r >= F::zero() && s >= F::zero() && r + s <= F::one()
}

/// Checks whether the ring positions `(a, b, c)` form a clippable ear.
fn is_ear<F: Float, I: Index>(
    ring: &[I],
    a: usize,
    b: usize,
    c: usize,
    vertices: &[Point2<F>],
    clockwise: bool,
) -> bool {
    let va = vertices[ring[a].as_usize()];
    let vb = vertices[ring[b].as_usize()];
    let vc = vertices[ring[c].as_usize()];

    if is_triangle_clockwise(va, vb, vc) != clockwise {
        return false;
    }

    for (i, entry) in ring.iter().enumerate() {
        if i == a || i == b || i == c {
            continue;
        }
        if point_in_triangle(va, vb, vc, vertices[entry.as_usize()]) {
            return false;
        }
    }

    true
}
