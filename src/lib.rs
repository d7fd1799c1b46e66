// polytess: sweep-line polygon tessellation
// License: MIT

//! Polygon tessellation by plane sweep.
//!
//! Takes one or more closed 3-D contours (planar; z is carried through
//! to the output but ignored by the algorithm), resolves overlaps and
//! self-intersections into a planar subdivision, selects the interior
//! with a [`WindingRule`], and emits an indexed triangle set.
//!
//! ```
//! use polytess::{tessellate, WindingRule};
//!
//! let outer = vec![
//!     [0.0, 0.0, 0.0],
//!     [3.0, 0.0, 0.0],
//!     [3.0, 3.0, 0.0],
//!     [0.0, 3.0, 0.0],
//! ];
//! let hole = vec![
//!     [1.0, 1.0, 0.0],
//!     [1.0, 2.0, 0.0],
//!     [2.0, 2.0, 0.0],
//!     [2.0, 1.0, 0.0],
//! ];
//! let out = tessellate(&[outer, hole], WindingRule::Positive).unwrap();
//! assert_eq!(out.triangle_count(), 8);
//! ```

pub mod dict;
pub mod error;
pub mod geom;
pub mod mesh;
pub mod mono;
pub mod pool;
pub mod priorityq;
pub mod svg;
pub mod sweep;
pub mod tess;

pub use error::TessError;
pub use tess::{tessellate, Tessellation, Tessellator, WindingRule};
