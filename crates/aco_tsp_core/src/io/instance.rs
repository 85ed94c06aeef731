use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use crate::{City, Error, Result};

const MIN_CITIES: usize = 2;

/// A validated set of cities: at least two, all finite, no two coincident.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    cities: Vec<City>,
}

impl Instance {
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.len() < MIN_CITIES {
            return Err(Error::invalid_instance(format!(
                "need at least {MIN_CITIES} cities, got {}",
                cities.len()
            )));
        }
        if let Some(idx) = cities.iter().position(|c| !c.is_finite()) {
            return Err(Error::invalid_instance(format!(
                "city {idx} has non-finite coordinates"
            )));
        }
        if let Some((a, b)) = find_coincident(&cities) {
            return Err(Error::invalid_instance(format!(
                "cities {a} and {b} share coordinates ({})",
                cities[a]
            )));
        }
        Ok(Self { cities })
    }

    /// Reads an instance file. Any read failure is reported as an invalid instance.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::invalid_instance(format!("cannot read {}: {e}", path.display()))
        })?;
        parse_instance(&text)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::invalid_instance(format!("cannot read instance: {e}")))?;
        parse_instance(&text)
    }

    pub fn from_stdin() -> Result<Self> {
        Self::from_reader(io::stdin().lock())
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn n(&self) -> usize {
        self.cities.len()
    }
}

/// Parses TSPLIB-like text. Only lines starting with an ASCII digit are city
/// lines: `<index> <x> <y>`. Everything else (headers, `EOF`) is skipped.
pub fn parse_instance(text: &str) -> Result<Instance> {
    let mut cities = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        if !line.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        let line_no = line_idx + 1;
        let mut tokens = line.split_whitespace().skip(1);

        let (Some(x_s), Some(y_s), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(Error::invalid_instance(format!(
                "line {line_no}: expected '<index> <x> <y>' but got: {line}"
            )));
        };
        let x = parse_coordinate(line_no, "x", x_s)?;
        let y = parse_coordinate(line_no, "y", y_s)?;

        cities.push(City::new(x, y));
    }

    if cities.is_empty() {
        return Err(Error::invalid_instance("no city lines found"));
    }

    Instance::new(cities)
}

fn parse_coordinate(line_no: usize, axis: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw.parse().map_err(|_| {
        Error::invalid_instance(format!("line {line_no}: invalid {axis} coordinate: {raw}"))
    })?;
    if !value.is_finite() {
        return Err(Error::invalid_instance(format!(
            "line {line_no}: non-finite {axis} coordinate: {raw}"
        )));
    }
    Ok(value)
}

/// First pair of city indices with identical coordinates, if any. O(n log n).
fn find_coincident(cities: &[City]) -> Option<(usize, usize)> {
    let mut order: Vec<usize> = (0..cities.len()).collect();
    order.sort_by(|&a, &b| {
        cities[a]
            .x
            .total_cmp(&cities[b].x)
            .then(cities[a].y.total_cmp(&cities[b].y))
    });
    order
        .windows(2)
        .find(|pair| cities[pair[0]].coincides(&cities[pair[1]]))
        .map(|pair| (pair[0].min(pair[1]), pair[0].max(pair[1])))
}
