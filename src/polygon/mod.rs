//! Polygon orientation and ear-clipping triangulation.
//!
//! A polygon is an ordered slice of [`Point2`](crate::primitives::Point2)
//! vertices forming a closed loop; the edge from the last vertex back to the
//! first is implicit. This module determines the winding of such a loop and
//! triangulates it into an index stream suitable for a graphics index
//! buffer.
//!
//! # Example
//!
//! ```
//! use polycut::polygon::{polygon_is_clockwise, triangulate_polygon, Winding};
//! use polycut::Point2;
//!
//! let square = [
//!     Point2::new(0.0_f32, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//!
//! // Y-down screen convention: this loop reads as clockwise.
//! assert!(polygon_is_clockwise(&square));
//!
//! let mut scratch = [0u16; 4];
//! let mut indices = [0u16; 6];
//! let written = triangulate_polygon(
//!     &square,
//!     Winding::Clockwise,
//!     &mut scratch,
//!     0,
//!     &mut indices,
//!     Winding::Clockwise,
//! );
//! assert_eq!(written, 6); // two triangles
//! ```

mod core;
mod triangulate;

pub use self::core::{
    polygon_area, polygon_is_clockwise, polygon_twice_signed_area, Winding,
};
pub use self::triangulate::{triangulate_polygon, Index};
