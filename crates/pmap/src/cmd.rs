//! Command handlers for the `pmap` CLI.
//!
//! Handlers take an already built mapper and return the text to print, so
//! `main` owns all terminal and file I/O.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use pixelmap::{CoordinateMapper, Entry, Operation};
use tracing::info;

/// Build a mapper from operations given on the command line.
pub fn build(ops: &[Operation]) -> Result<CoordinateMapper> {
    let mut map = CoordinateMapper::new();
    for (i, op) in ops.iter().enumerate() {
        map.apply(op)
            .with_context(|| format!("operation {} ({op}) failed", i + 1))?;
    }
    info!(
        operations = ops.len(),
        entries = map.len(),
        "built mapper"
    );
    Ok(map)
}

/// Read and replay an operation log from `path`, or stdin when `path` is `-`.
pub fn load(path: &Path) -> Result<CoordinateMapper> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read operation log from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read operation log {}", path.display()))?
    };
    let map = CoordinateMapper::restore(&text)
        .with_context(|| format!("failed to replay operation log {}", path.display()))?;
    info!(entries = map.len(), "loaded {}", path.display());
    Ok(map)
}

/// Serialize the mapper's operation log.
pub fn export(map: &CoordinateMapper, pretty: bool) -> Result<String> {
    let log = if pretty {
        map.export_pretty()?
    } else {
        map.export()?
    };
    Ok(log)
}

/// One line per wire position: `index x y`, or `index -` for gaps.
pub fn show(map: &CoordinateMapper) -> String {
    map.entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            Entry::Coord(c) => format!("{i}\t{}\t{}\n", c.x, c.y),
            Entry::Gap => format!("{i}\t-\n"),
        })
        .collect()
}

/// Describe the entry at wire position `index`.
pub fn at(map: &CoordinateMapper, index: usize) -> Result<String> {
    Ok(map.at(index)?.to_string())
}

/// Wire position of `(x, y)`.
pub fn find(map: &CoordinateMapper, x: i32, y: i32) -> Result<String> {
    map.find(x, y)
        .map(|i| i.to_string())
        .ok_or_else(|| anyhow!("no wire position maps to ({x}, {y})"))
}

/// Summary of a mapper's size and extent.
pub fn check(map: &CoordinateMapper) -> String {
    let bounds = match map.bounds() {
        Some(b) => format!("{} .. {} ({}x{})", b.min, b.max, b.width(), b.height()),
        None => "none".to_string(),
    };
    format!(
        "operations:  {}\nentries:     {}\ncoordinates: {}\ngaps:        {}\nbounds:      {bounds}\n",
        map.operations().len(),
        map.len(),
        map.len() - map.gap_count(),
        map.gap_count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Result<CoordinateMapper> {
        let mut map = CoordinateMapper::new();
        map.gap(1)?.line(0, 0, 2, 0)?;
        Ok(map)
    }

    #[test]
    fn show_lists_entries() -> Result<()> {
        assert_eq!(show(&sample()?), "0\t-\n1\t0\t0\n2\t1\t0\n");
        Ok(())
    }

    #[test]
    fn lookups() -> Result<()> {
        let map = sample()?;
        assert_eq!(at(&map, 2)?, "(1, 0)");
        assert_eq!(at(&map, 0)?, "gap");
        assert!(at(&map, 3).is_err());
        assert_eq!(find(&map, 0, 0)?, "1");
        assert!(find(&map, 5, 5).is_err());
        Ok(())
    }

    #[test]
    fn check_summary() -> Result<()> {
        let summary = check(&sample()?);
        assert!(summary.contains("entries:     3"));
        assert!(summary.contains("gaps:        1"));
        assert!(summary.contains("bounds:      (0, 0) .. (1, 0) (2x1)"));
        Ok(())
    }

    #[test]
    fn build_reports_failing_operation() {
        let ops = [
            Operation::Point { x: 0, y: 0 },
            Operation::Point { x: 0, y: 0 },
        ];
        let err = build(&ops).expect_err("duplicate");
        assert!(format!("{err:#}").contains("operation 2 (point(0, 0)) failed"));
    }
}
