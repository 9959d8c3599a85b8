//! Construction operations and the JSON operation log.
//!
//! On the wire every operation is an object with a `name` and an ordered
//! `arguments` array:
//!
//! ```json
//! [{"name":"zigzag","arguments":[0,0,3,3,false]},{"name":"gap","arguments":[2]}]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::error::{Error, Result};

/// Fill direction of a zigzag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Serpentine along rows. Recorded as `true`.
    Horizontal,
    /// Serpentine along columns. Recorded as `false`.
    Vertical,
}

impl From<bool> for Direction {
    fn from(horizontal: bool) -> Self {
        if horizontal {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }
}

impl From<Direction> for bool {
    fn from(val: Direction) -> Self {
        matches!(val, Direction::Horizontal)
    }
}

/// A single recorded construction step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOperation", into = "RawOperation")]
pub enum Operation {
    /// One coordinate.
    Point {
        /// Column.
        x: i32,
        /// Row.
        y: i32,
    },
    /// A straight run of `max(|dx|, |dy|)` coordinates.
    Line {
        /// Start column.
        x1: i32,
        /// Start row.
        y1: i32,
        /// Extent along x.
        dx: i32,
        /// Extent along y.
        dy: i32,
    },
    /// A serpentine fill of a rectangle.
    Zigzag {
        /// Start column.
        x1: i32,
        /// Start row.
        y1: i32,
        /// Extent along x.
        dx: i32,
        /// Extent along y.
        dy: i32,
        /// Whether rows or columns snake.
        direction: Direction,
    },
    /// Wire positions with no coordinate.
    Gap {
        /// Number of positions to reserve.
        count: usize,
    },
}

impl Operation {
    /// Build an operation from its log name and argument list.
    ///
    /// `add` and `fillEmpty` are accepted as older names for `point` and
    /// `gap`.
    pub fn from_parts(name: &str, arguments: &[Argument]) -> Result<Self> {
        let args = Args {
            name,
            values: arguments,
        };
        match name {
            "point" | "add" => {
                args.arity(2)?;
                Ok(Self::Point {
                    x: args.i32(0)?,
                    y: args.i32(1)?,
                })
            }
            "line" => {
                args.arity(4)?;
                Ok(Self::Line {
                    x1: args.i32(0)?,
                    y1: args.i32(1)?,
                    dx: args.i32(2)?,
                    dy: args.i32(3)?,
                })
            }
            "zigzag" => {
                args.arity(5)?;
                Ok(Self::Zigzag {
                    x1: args.i32(0)?,
                    y1: args.i32(1)?,
                    dx: args.i32(2)?,
                    dy: args.i32(3)?,
                    direction: args.bool(4)?.into(),
                })
            }
            "gap" | "fillEmpty" => {
                args.arity(1)?;
                Ok(Self::Gap {
                    count: args.count(0)?,
                })
            }
            _ => Err(Error::UnknownOperation(name.to_string())),
        }
    }

    /// Name used for this operation in the serialized log.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point { .. } => "point",
            Self::Line { .. } => "line",
            Self::Zigzag { .. } => "zigzag",
            Self::Gap { .. } => "gap",
        }
    }

    /// Ordered argument list used in the serialized log.
    pub fn arguments(&self) -> SmallVec<[Argument; 5]> {
        match *self {
            Self::Point { x, y } => smallvec![x.into(), y.into()],
            Self::Line { x1, y1, dx, dy } => {
                smallvec![x1.into(), y1.into(), dx.into(), dy.into()]
            }
            Self::Zigzag {
                x1,
                y1,
                dx,
                dy,
                direction,
            } => smallvec![
                x1.into(),
                y1.into(),
                dx.into(),
                dy.into(),
                Argument::Bool(direction.into()),
            ],
            Self::Gap { count } => {
                smallvec![Argument::Int(i64::try_from(count).unwrap_or(i64::MAX))]
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name())?;
        for (i, arg) in self.arguments().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// A single value in an operation's argument list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    /// Flag argument.
    Bool(bool),
    /// Integer argument.
    Int(i64),
}

impl From<i32> for Argument {
    fn from(val: i32) -> Self {
        Self::Int(i64::from(val))
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => b.fmt(f),
            Self::Int(i) => i.fmt(f),
        }
    }
}

/// Untyped wire form of an operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawOperation {
    /// Operation name.
    name: String,
    /// Ordered argument values.
    arguments: SmallVec<[Argument; 5]>,
}

impl From<Operation> for RawOperation {
    fn from(op: Operation) -> Self {
        Self {
            name: op.name().to_string(),
            arguments: op.arguments(),
        }
    }
}

/// Typed access to the arguments of one raw operation.
struct Args<'a> {
    /// Name as it appeared in the log, for error messages.
    name: &'a str,
    /// The arguments themselves.
    values: &'a [Argument],
}

impl Args<'_> {
    /// Build an argument error for this operation.
    fn invalid(&self, reason: String) -> Error {
        Error::InvalidArguments {
            name: self.name.to_string(),
            reason,
        }
    }

    /// Require exactly `n` arguments.
    fn arity(&self, n: usize) -> Result<()> {
        if self.values.len() == n {
            Ok(())
        } else {
            Err(self.invalid(format!(
                "expected {n} arguments, got {}",
                self.values.len()
            )))
        }
    }

    /// Raw integer at position `i`.
    fn int(&self, i: usize) -> Result<i64> {
        match self.values.get(i) {
            Some(Argument::Int(v)) => Ok(*v),
            Some(other) => Err(self.invalid(format!("argument {i} must be an integer, got {other}"))),
            None => Err(self.invalid(format!("missing argument {i}"))),
        }
    }

    /// Coordinate-sized integer at position `i`.
    fn i32(&self, i: usize) -> Result<i32> {
        let v = self.int(i)?;
        i32::try_from(v).map_err(|_| self.invalid(format!("argument {i} ({v}) is out of range")))
    }

    /// Non-negative count at position `i`.
    fn count(&self, i: usize) -> Result<usize> {
        let v = self.int(i)?;
        usize::try_from(v).map_err(|_| self.invalid(format!("argument {i} ({v}) must be non-negative")))
    }

    /// Flag at position `i`.
    fn bool(&self, i: usize) -> Result<bool> {
        match self.values.get(i) {
            Some(Argument::Bool(b)) => Ok(*b),
            Some(other) => Err(self.invalid(format!("argument {i} must be a boolean, got {other}"))),
            None => Err(self.invalid(format!("missing argument {i}"))),
        }
    }
}

impl TryFrom<RawOperation> for Operation {
    type Error = Error;

    fn try_from(raw: RawOperation) -> Result<Self> {
        Self::from_parts(&raw.name, &raw.arguments)
    }
}

/// Parse a serialized operation log.
///
/// Text that is not a JSON array of `{name, arguments}` objects is a
/// [`Error::MalformedLog`]; well-formed entries naming an unsupported
/// operation or carrying bad arguments fail with the corresponding error.
pub fn parse_log(text: &str) -> Result<Vec<Operation>> {
    let raw: Vec<RawOperation> = serde_json::from_str(text)?;
    raw.into_iter().map(Operation::try_from).collect()
}

/// Serialize an operation log to compact JSON.
pub fn write_log(ops: &[Operation]) -> Result<String> {
    Ok(serde_json::to_string(ops)?)
}

/// Serialize an operation log to indented JSON.
pub fn write_log_pretty(ops: &[Operation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(ops)?)
}
