//! polycut - Planar polygon triangulation and boolean clipping
//!
//! Two classical polygon algorithms over caller-supplied buffers: an
//! ear-clipping triangulator that streams triangle indices fit for a GPU
//! index buffer, and a Greiner-Hormann clipper computing the intersection,
//! union, or difference of two simple polygons.
//!
//! The crate never allocates. Every operation reads and writes memory the
//! caller owns — scratch rings, clip slabs, span tables, vertex pools — so
//! inputs can live on the stack, in arenas, or in pooled buffers. Output
//! buffer exhaustion truncates; callers detect it by comparing returned
//! counts against expectations.

pub mod clip;
pub mod error;
pub mod polygon;
pub mod primitives;

pub use clip::{
    clip_boolean, emit_polygon, emit_polygons, find_intersections, mark_entry_exit, BooleanOp,
    ClipCounts, ClipRing, ClipVertex, FollowDirection, PolygonSpan,
};
pub use error::ClipError;
pub use polygon::{
    polygon_area, polygon_is_clockwise, polygon_twice_signed_area, triangulate_polygon, Winding,
};
pub use primitives::{Point2, Vec2};
