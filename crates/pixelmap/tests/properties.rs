//! Property-based tests for line rasterization, replay and lookup.

#![allow(missing_docs, clippy::tests_outside_test_module)]

use pixelmap::{Coord, CoordinateMapper, Direction, Entry, Operation, error::Error};
use proptest::prelude::*;

/// A valid line: horizontal, vertical or diagonal, with a bounded extent.
fn valid_line() -> impl Strategy<Value = (i32, i32, i32, i32)> {
    (-50i32..50, -50i32..50, -20i32..=20, 0u8..3).prop_map(|(x, y, d, kind)| match kind {
        0 => (x, y, d, 0),
        1 => (x, y, 0, d),
        _ => (x, y, d, if d % 2 == 0 { d } else { -d }),
    })
}

/// Operations that never collide: each is shifted into its own band of rows.
fn disjoint_ops() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(
        (0u8..4, -6i32..=6, -6i32..=6, any::<bool>(), 0usize..4),
        0..8,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(band, (kind, dx, dy, flag, count))| {
                // Bands are 20 rows apart, wider than any extent below.
                let y1 = band as i32 * 20 + 7;
                match kind {
                    0 => Operation::Point { x: dx, y: y1 },
                    1 => Operation::Line {
                        x1: 0,
                        y1,
                        dx,
                        dy: if flag { 0 } else { dx },
                    },
                    2 => Operation::Zigzag {
                        x1: 0,
                        y1,
                        dx,
                        dy,
                        direction: Direction::from(flag),
                    },
                    _ => Operation::Gap { count },
                }
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Lines produce max(|dx|, |dy|) unit steps starting at the origin point.
    #[test]
    fn line_steps((x1, y1, dx, dy) in valid_line()) {
        let mut map = CoordinateMapper::new();
        map.line(x1, y1, dx, dy).expect("valid line");

        let expected = dx.abs().max(dy.abs()) as usize;
        prop_assert_eq!(map.len(), expected);
        if expected == 0 {
            return Ok(());
        }
        prop_assert_eq!(map.at(0).expect("first").coord(), Some(Coord::new(x1, y1)));
        for i in 0..expected {
            let c = map.at(i).expect("in range").coord().expect("concrete");
            let i = i as i32;
            prop_assert_eq!(c, Coord::new(x1 + dx.signum() * i, y1 + dy.signum() * i));
        }
        for pair in map.coords().map(|(_, c)| c).collect::<Vec<_>>().windows(2) {
            prop_assert!(pair[0].is_adjacent(&pair[1]), "{} and {} are not adjacent", pair[0], pair[1]);
        }
    }

    /// Skewed lines fail and leave the mapper empty.
    #[test]
    fn skewed_lines_rejected(dx in -30i32..30, dy in -30i32..30) {
        prop_assume!(dx != 0 && dy != 0 && dx.abs() != dy.abs());
        let mut map = CoordinateMapper::new();
        prop_assert_eq!(
            map.line(0, 0, dx, dy).map(|_| ()),
            Err(Error::InvalidGeometry { dx, dy })
        );
        prop_assert!(map.is_empty());
    }

    /// Replaying the exported log reproduces the same entries.
    #[test]
    fn export_restore_roundtrip(ops in disjoint_ops()) {
        let map = CoordinateMapper::from_operations(ops).expect("disjoint ops");
        let restored = CoordinateMapper::restore(&map.export().expect("export")).expect("restore");
        prop_assert_eq!(restored.entries(), map.entries());
        prop_assert_eq!(restored.operations(), map.operations());
    }

    /// Every appended coordinate is found at its own wire position.
    #[test]
    fn find_at_agree(ops in disjoint_ops()) {
        let map = CoordinateMapper::from_operations(ops).expect("disjoint ops");
        for (i, c) in map.coords() {
            let found = map.find(c.x, c.y);
            prop_assert_eq!(found, Some(i));
            prop_assert_eq!(map.at(i).expect("in range"), Entry::Coord(c));
        }
    }

    /// Drawing the same zigzag twice collides on its first point.
    #[test]
    fn overlapping_zigzag_is_duplicate(
        x1 in -10i32..10,
        y1 in -10i32..10,
        dx in 1i32..6,
        dy in 1i32..6,
        flag in any::<bool>(),
    ) {
        let mut map = CoordinateMapper::new();
        map.zigzag(x1, y1, dx, dy, flag).expect("first zigzag");
        prop_assert_eq!(
            map.zigzag(x1, y1, dx, dy, flag).map(|_| ()),
            Err(Error::DuplicateCoordinate { x: x1, y: y1, index: 0 })
        );
    }
}
