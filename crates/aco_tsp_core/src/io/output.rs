use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{Result, Tour};

const TOUR_SECTION_HEADER: &str = "TOUR_SECTION";
const TOUR_END_MARKER: &str = "-1";
const EOF_MARKER: &str = "EOF";
const TSPLIB_NODE_ID_OFFSET: usize = 1;

/// Writes `tour` in TSPLIB `.tour` layout with 1-based city ids.
pub fn write_tour(mut out: impl Write, name: &str, tour: &Tour) -> Result<()> {
    let mut cost = ryu::Buffer::new();
    writeln!(out, "NAME : {name}")?;
    writeln!(out, "COMMENT : cost {}", cost.format(tour.cost()))?;
    writeln!(out, "TYPE : TOUR")?;
    writeln!(out, "DIMENSION : {}", tour.len())?;
    writeln!(out, "{TOUR_SECTION_HEADER}")?;
    for &city in tour.path() {
        writeln!(out, "{}", city + TSPLIB_NODE_ID_OFFSET)?;
    }
    writeln!(out, "{TOUR_END_MARKER}")?;
    writeln!(out, "{EOF_MARKER}")?;
    out.flush()?;
    Ok(())
}

/// Writes to `path`, or stdout when `None`.
pub fn write_tour_to(path: Option<&Path>, name: &str, tour: &Tour) -> Result<()> {
    match path {
        Some(path) => write_tour(BufWriter::new(File::create(path)?), name, tour),
        None => write_tour(io::stdout().lock(), name, tour),
    }
}
