//! Coordinate and entry types stored by the mapper.

use std::fmt;

/// A concrete canvas coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Coord {
    /// Create a new coordinate.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance between two coordinates.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        ((dx * dx + dy * dy) as f64).sqrt()
    }

    /// True if `other` is one of the eight neighbours of this coordinate.
    pub fn is_adjacent(&self, other: &Self) -> bool {
        let dx = (i64::from(self.x) - i64::from(other.x)).abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).abs();
        dx.max(dy) == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Coord> for (i32, i32) {
    fn from(val: Coord) -> Self {
        (val.x, val.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One wire position: either a coordinate or an unaddressed gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entry {
    /// The position shows this canvas coordinate.
    Coord(Coord),
    /// The position is reserved but maps to nothing on the canvas.
    Gap,
}

impl Entry {
    /// The coordinate at this position, if any.
    pub fn coord(&self) -> Option<Coord> {
        match self {
            Self::Coord(c) => Some(*c),
            Self::Gap => None,
        }
    }

    /// True for gap markers.
    pub fn is_gap(&self) -> bool {
        matches!(self, Self::Gap)
    }
}

impl From<Coord> for Entry {
    fn from(val: Coord) -> Self {
        Self::Coord(val)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coord(c) => c.fmt(f),
            Self::Gap => f.write_str("gap"),
        }
    }
}

/// Inclusive bounding box of a set of coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// Smallest x and y seen.
    pub min: Coord,
    /// Largest x and y seen.
    pub max: Coord,
}

impl Bounds {
    /// Bounds covering a single coordinate.
    pub fn from_coord(c: Coord) -> Self {
        Self { min: c, max: c }
    }

    /// Grow the box to include `c`.
    pub fn include(&mut self, c: Coord) {
        self.min.x = self.min.x.min(c.x);
        self.min.y = self.min.y.min(c.y);
        self.max.x = self.max.x.max(c.x);
        self.max.y = self.max.y.max(c.y);
    }

    /// Width of the box in cells.
    pub fn width(&self) -> u64 {
        (i64::from(self.max.x) - i64::from(self.min.x) + 1) as u64
    }

    /// Height of the box in cells.
    pub fn height(&self) -> u64 {
        (i64::from(self.max.y) - i64::from(self.min.y) + 1) as u64
    }
}
