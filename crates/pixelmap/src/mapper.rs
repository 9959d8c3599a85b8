//! The coordinate mapper: an append-only wire order with reverse lookup.

use std::{collections::HashMap, iter, str::FromStr};

use tracing::{debug, trace};

use crate::{
    coord::{Bounds, Coord, Entry},
    error::{Error, Result},
    operation::{self, Direction, Operation},
    raster,
};

/// Maps wire positions to canvas coordinates and back.
///
/// Entries are only ever appended; an entry's position in the sequence is its
/// wire position. Every successful construction operation is recorded in an
/// operation log, and replaying that log from empty reproduces the same
/// entries in the same order.
///
/// Operations fail fast: when a `line` or `zigzag` hits a duplicate
/// coordinate, the points appended before the collision stay in place and
/// the operation is not recorded. Use [`CoordinateMapper::apply_atomic`] to
/// commit an operation only if all of its points are accepted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CoordinateMapper {
    /// Wire order.
    entries: Vec<Entry>,
    /// Reverse lookup from coordinate to wire position.
    index: HashMap<Coord, usize>,
    /// Operations applied so far, in order.
    operations: Vec<Operation>,
}

impl CoordinateMapper {
    /// Create an empty mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapper by replaying `ops` in order.
    ///
    /// Stops at, and returns, the first failing operation.
    pub fn from_operations(ops: impl IntoIterator<Item = Operation>) -> Result<Self> {
        let mut map = Self::new();
        for op in ops {
            debug!(%op, "replaying operation");
            map.apply(&op)?;
        }
        Ok(map)
    }

    /// Build a mapper from a serialized operation log.
    pub fn restore(log: &str) -> Result<Self> {
        let ops = operation::parse_log(log)?;
        debug!(operations = ops.len(), "restoring mapper from log");
        Self::from_operations(ops)
    }

    /// Serialize the operation log as compact JSON.
    pub fn export(&self) -> Result<String> {
        operation::write_log(&self.operations)
    }

    /// Serialize the operation log as indented JSON.
    pub fn export_pretty(&self) -> Result<String> {
        operation::write_log_pretty(&self.operations)
    }

    /// Append a single coordinate.
    pub fn point(&mut self, x: i32, y: i32) -> Result<&mut Self> {
        self.apply(&Operation::Point { x, y })?;
        Ok(self)
    }

    /// Append the `max(|dx|, |dy|)` points of a line starting at `(x1, y1)`.
    ///
    /// The line must be horizontal, vertical or exactly diagonal.
    pub fn line(&mut self, x1: i32, y1: i32, dx: i32, dy: i32) -> Result<&mut Self> {
        self.apply(&Operation::Line { x1, y1, dx, dy })?;
        Ok(self)
    }

    /// Fill the rectangle spanned by `(x1, y1)` and `(x1 + dx, y1 + dy)` with a
    /// serpentine path. `true` snakes along rows, `false` along columns.
    pub fn zigzag(
        &mut self,
        x1: i32,
        y1: i32,
        dx: i32,
        dy: i32,
        direction: impl Into<Direction>,
    ) -> Result<&mut Self> {
        self.apply(&Operation::Zigzag {
            x1,
            y1,
            dx,
            dy,
            direction: direction.into(),
        })?;
        Ok(self)
    }

    /// Reserve `count` wire positions that map to no coordinate.
    pub fn gap(&mut self, count: usize) -> Result<&mut Self> {
        self.apply(&Operation::Gap { count })?;
        Ok(self)
    }

    /// Execute one operation and record it in the log.
    pub fn apply(&mut self, op: &Operation) -> Result<()> {
        match *op {
            Operation::Gap { count } => self.push_gaps(count)?,
            _ => {
                for c in rasterize(op)? {
                    self.push_point(c)?;
                }
            }
        }
        self.operations.push(*op);
        Ok(())
    }

    /// Execute one operation, leaving the mapper untouched if any of its
    /// points would be rejected.
    pub fn apply_atomic(&mut self, op: &Operation) -> Result<()> {
        match *op {
            Operation::Gap { count } => self.push_gaps(count)?,
            _ => {
                let points = rasterize(op)?;
                let pending = self.check_batch(&points)?;
                raster::reserve(&mut self.entries, points.len() as u64)?;
                self.index.extend(pending);
                self.entries.extend(points.into_iter().map(Entry::Coord));
            }
        }
        self.operations.push(*op);
        Ok(())
    }

    /// The entry at wire position `index`.
    pub fn at(&self, index: usize) -> Result<Entry> {
        self.entries
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Wire position of `(x, y)`, or `None` if no entry maps to it.
    pub fn find(&self, x: i32, y: i32) -> Option<usize> {
        self.index.get(&Coord::new(x, y)).copied()
    }

    /// True if some entry maps to `(x, y)`.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index.contains_key(&Coord::new(x, y))
    }

    /// Number of wire positions, gaps included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in wire order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Concrete coordinates with their wire positions, gaps skipped.
    pub fn coords(&self) -> impl Iterator<Item = (usize, Coord)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.coord().map(|c| (i, c)))
    }

    /// Number of gap entries.
    pub fn gap_count(&self) -> usize {
        self.entries.len() - self.index.len()
    }

    /// The recorded operation log.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Bounding box of all concrete coordinates.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut coords = self.coords().map(|(_, c)| c);
        let mut bounds = Bounds::from_coord(coords.next()?);
        for c in coords {
            bounds.include(c);
        }
        Some(bounds)
    }

    /// Append one coordinate, rejecting duplicates. Not recorded in the log.
    fn push_point(&mut self, c: Coord) -> Result<()> {
        if let Some(&index) = self.index.get(&c) {
            return Err(duplicate(c, index));
        }
        let index = self.entries.len();
        trace!(index, x = c.x, y = c.y, "append");
        self.entries.push(Entry::Coord(c));
        self.index.insert(c, index);
        Ok(())
    }

    /// Append `count` gap markers. Not recorded in the log.
    fn push_gaps(&mut self, count: usize) -> Result<()> {
        raster::reserve(&mut self.entries, count as u64)?;
        self.entries.extend(iter::repeat_n(Entry::Gap, count));
        Ok(())
    }

    /// Check a batch of points against existing entries and each other,
    /// returning the reverse-index entries they would add.
    fn check_batch(&self, points: &[Coord]) -> Result<HashMap<Coord, usize>> {
        let base = self.entries.len();
        let mut pending = HashMap::with_capacity(points.len());
        for (offset, &c) in points.iter().enumerate() {
            if let Some(&index) = self.index.get(&c).or_else(|| pending.get(&c)) {
                return Err(duplicate(c, index));
            }
            pending.insert(c, base + offset);
        }
        Ok(pending)
    }
}

impl FromStr for CoordinateMapper {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::restore(s)
    }
}

/// Coordinates appended by a point, line or zigzag operation.
fn rasterize(op: &Operation) -> Result<Vec<Coord>> {
    match *op {
        Operation::Point { x, y } => Ok(vec![Coord::new(x, y)]),
        Operation::Line { x1, y1, dx, dy } => raster::line_points(Coord::new(x1, y1), dx, dy),
        Operation::Zigzag {
            x1,
            y1,
            dx,
            dy,
            direction,
        } => raster::zigzag_points(Coord::new(x1, y1), dx, dy, direction),
        Operation::Gap { .. } => Ok(Vec::new()),
    }
}

/// Duplicate-coordinate error for `c`, already held at `index`.
fn duplicate(c: Coord, index: usize) -> Error {
    Error::DuplicateCoordinate {
        x: c.x,
        y: c.y,
        index,
    }
}
