//! Minimal example: map a serpentine panel and look pixels up both ways.

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // An 8x4 panel wired row by row, snaking back on every other row, with
    // two unused LEDs at the start of the strip.
    let mut map = pixelmap::CoordinateMapper::new();
    map.gap(2)?.zigzag(0, 0, 8, 4, true)?;
    println!("{} wire positions", map.len());

    let index = 10;
    println!("LED {index} shows {}", map.at(index)?);

    if let Some(led) = map.find(7, 1) {
        println!("Pixel (7, 1) is LED {led}");
    }

    let log = map.export()?;
    println!("Layout: {log}");

    let restored: pixelmap::CoordinateMapper = log.parse()?;
    assert_eq!(restored.entries(), map.entries());

    Ok(())
}
