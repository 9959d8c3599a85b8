//! Map two-dimensional canvas coordinates onto a one-dimensional wire order.
//!
//! A [`CoordinateMapper`] is built from drawing operations (single points,
//! straight lines, serpentine-filled rectangles and gaps) that describe how a
//! physical LED strip is laid out. Each appended entry occupies the next wire
//! position, so the mapper answers both "which pixel does LED *n* show?" and
//! "which LED shows pixel *(x, y)*?".
//!
//! The operations that built a mapper are recorded in an operation log that
//! can be exported as JSON and replayed to rebuild an identical mapper.
//!
//! ```
//! use pixelmap::{CoordinateMapper, Coord};
//!
//! let mut map = CoordinateMapper::new();
//! map.zigzag(0, 0, 3, 3, false)?;
//! assert_eq!(map.len(), 9);
//! assert_eq!(map.at(3)?.coord(), Some(Coord::new(1, 2)));
//!
//! let copy = CoordinateMapper::restore(&map.export()?)?;
//! assert_eq!(copy.entries(), map.entries());
//! # Ok::<(), pixelmap::error::Error>(())
//! ```

/// Coordinates, entries and bounding boxes.
pub mod coord;
/// Error types used across the crate.
pub mod error;
/// The mapper itself.
mod mapper;
/// Construction operations and their serialized log form.
pub mod operation;
/// Pure rasterization of lines and serpentine fills.
pub mod raster;

pub use crate::{
    coord::{Bounds, Coord, Entry},
    mapper::CoordinateMapper,
    operation::{Direction, Operation},
};
