//! Rasterization of lines and serpentine fills into unit-step coordinates.
//!
//! These functions are pure: they only compute the coordinates an operation
//! would append, in wire order. Duplicate detection happens in the mapper.

use crate::{
    coord::Coord,
    error::{Error, Result},
    operation::Direction,
};

/// Unit step for one axis: -1, 0 or +1 following the sign of `delta`.
fn step(delta: i64) -> i64 {
    delta.signum()
}

/// Append the points of an axis-aligned or diagonal segment to `out`.
///
/// `x1`, `y1`, `dx` and `dy` are widened so serpentine rows can be derived
/// without overflow. `err` is reported if any point leaves the `i32` range.
fn segment(x1: i64, y1: i64, dx: i64, dy: i64, err: &Error, out: &mut Vec<Coord>) -> Result<()> {
    let steps = dx.abs().max(dy.abs());
    let (sx, sy) = (step(dx), step(dy));
    // Check the far end first so an out-of-range segment allocates nothing.
    if steps > 0 {
        i32::try_from(x1 + sx * (steps - 1)).map_err(|_| err.clone())?;
        i32::try_from(y1 + sy * (steps - 1)).map_err(|_| err.clone())?;
    }
    reserve(out, steps.unsigned_abs())?;
    for i in 0..steps {
        let x = i32::try_from(x1 + sx * i).map_err(|_| err.clone())?;
        let y = i32::try_from(y1 + sy * i).map_err(|_| err.clone())?;
        out.push(Coord::new(x, y));
    }
    Ok(())
}

/// Reserve room for `count` more items, failing instead of aborting.
pub(crate) fn reserve<T>(out: &mut Vec<T>, count: u64) -> Result<()> {
    usize::try_from(count)
        .ok()
        .and_then(|n| out.try_reserve(n).ok())
        .ok_or(Error::CapacityExceeded { requested: count })
}

/// Overflow error for a shape starting at `start` with extent `(dx, dy)`.
fn overflow(start: Coord, dx: i32, dy: i32) -> Error {
    Error::CoordinateOverflow {
        x: start.x,
        y: start.y,
        dx,
        dy,
    }
}

/// True if `(dx, dy)` describes a horizontal, vertical or 45° line.
pub fn is_valid_line(dx: i32, dy: i32) -> bool {
    dx == 0 || dy == 0 || dx.unsigned_abs() == dy.unsigned_abs()
}

/// Points of a line starting at `start` and extending by `(dx, dy)`.
///
/// Produces exactly `max(|dx|, |dy|)` points: the start is included, the
/// far end `start + (dx, dy)` is not. Each axis steps by one unit towards
/// its delta, or stays fixed when its delta is zero.
pub fn line_points(start: Coord, dx: i32, dy: i32) -> Result<Vec<Coord>> {
    if !is_valid_line(dx, dy) {
        return Err(Error::InvalidGeometry { dx, dy });
    }
    let err = overflow(start, dx, dy);
    let mut out = Vec::new();
    segment(
        i64::from(start.x),
        i64::from(start.y),
        i64::from(dx),
        i64::from(dy),
        &err,
        &mut out,
    )?;
    Ok(out)
}

/// Points of a serpentine fill of the rectangle spanned by `start` and
/// `start + (dx, dy)`.
///
/// A horizontal fill draws `|dy|` rows of `|dx|` points; odd rows run
/// backwards from the far edge so consecutive rows join into one path. A
/// vertical fill does the same along `|dx|` columns.
pub fn zigzag_points(start: Coord, dx: i32, dy: i32, direction: Direction) -> Result<Vec<Coord>> {
    let err = overflow(start, dx, dy);
    let mut out = Vec::new();
    reserve(
        &mut out,
        u64::from(dx.unsigned_abs()) * u64::from(dy.unsigned_abs()),
    )?;

    let (x1, y1) = (i64::from(start.x), i64::from(start.y));
    let (dx, dy) = (i64::from(dx), i64::from(dy));
    // Offset of the far edge, one unit inside the rectangle.
    let far = |d: i64| if d > 0 { d - 1 } else { d + 1 };

    match direction {
        Direction::Horizontal => {
            for row in 0..dy.abs() {
                let y = y1 + step(dy) * row;
                if row % 2 == 0 {
                    segment(x1, y, dx, 0, &err, &mut out)?;
                } else {
                    segment(x1 + far(dx), y, -dx, 0, &err, &mut out)?;
                }
            }
        }
        Direction::Vertical => {
            for col in 0..dx.abs() {
                let x = x1 + step(dx) * col;
                if col % 2 == 0 {
                    segment(x, y1, 0, dy, &err, &mut out)?;
                } else {
                    segment(x, y1 + far(dy), 0, -dy, &err, &mut out)?;
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(v: &[(i32, i32)]) -> Vec<Coord> {
        v.iter().copied().map(Coord::from).collect()
    }

    #[test]
    fn horizontal_and_vertical_lines() -> Result<()> {
        assert_eq!(
            line_points(Coord::new(0, 0), 3, 0)?,
            coords(&[(0, 0), (1, 0), (2, 0)])
        );
        assert_eq!(
            line_points(Coord::new(5, 5), 0, -2)?,
            coords(&[(5, 5), (5, 4)])
        );
        Ok(())
    }

    #[test]
    fn diagonal_lines() -> Result<()> {
        assert_eq!(
            line_points(Coord::new(0, 0), 2, 2)?,
            coords(&[(0, 0), (1, 1)])
        );
        assert_eq!(
            line_points(Coord::new(0, 0), -3, 3)?,
            coords(&[(0, 0), (-1, 1), (-2, 2)])
        );
        Ok(())
    }

    #[test]
    fn empty_line() -> Result<()> {
        assert!(line_points(Coord::new(1, 1), 0, 0)?.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_skewed_lines() {
        assert_eq!(
            line_points(Coord::new(0, 0), 2, 1),
            Err(Error::InvalidGeometry { dx: 2, dy: 1 })
        );
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(
            line_points(Coord::new(i32::MAX, 0), 2, 0),
            Err(Error::CoordinateOverflow {
                x: i32::MAX,
                y: 0,
                dx: 2,
                dy: 0
            })
        );
        assert_eq!(
            line_points(Coord::new(i32::MAX, 0), 1, 0),
            Ok(coords(&[(i32::MAX, 0)]))
        );
    }

    #[test]
    fn horizontal_zigzag() -> Result<()> {
        assert_eq!(
            zigzag_points(Coord::new(0, 0), 3, 2, Direction::Horizontal)?,
            coords(&[(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)])
        );
        Ok(())
    }

    #[test]
    fn vertical_zigzag() -> Result<()> {
        assert_eq!(
            zigzag_points(Coord::new(0, 0), 3, 3, Direction::Vertical)?,
            coords(&[
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 2),
                (1, 1),
                (1, 0),
                (2, 0),
                (2, 1),
                (2, 2),
            ])
        );
        Ok(())
    }

    #[test]
    fn negative_zigzag() -> Result<()> {
        assert_eq!(
            zigzag_points(Coord::new(0, 0), -2, -2, Direction::Horizontal)?,
            coords(&[(0, 0), (-1, 0), (-1, -1), (0, -1)])
        );
        Ok(())
    }

    #[test]
    fn zigzag_overflow() {
        let err = zigzag_points(Coord::new(i32::MAX, 0), 3, 2, Direction::Horizontal);
        assert_eq!(
            err,
            Err(Error::CoordinateOverflow {
                x: i32::MAX,
                y: 0,
                dx: 3,
                dy: 2
            })
        );
        assert_eq!(
            err.map(|_| ()).unwrap_err().to_string(),
            "shape at (2147483647, 0) with extent (3, 2) leaves the coordinate range"
        );
    }

    #[test]
    fn oversized_zigzag() {
        assert_eq!(
            zigzag_points(Coord::new(0, 0), i32::MAX, -i32::MAX, Direction::Vertical),
            Err(Error::CapacityExceeded {
                requested: 4_611_686_014_132_420_609
            })
        );
    }

    #[test]
    fn degenerate_zigzag() -> Result<()> {
        assert!(zigzag_points(Coord::new(0, 0), 4, 0, Direction::Horizontal)?.is_empty());
        assert!(zigzag_points(Coord::new(0, 0), 0, 4, Direction::Vertical)?.is_empty());
        Ok(())
    }
}
