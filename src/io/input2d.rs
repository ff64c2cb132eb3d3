//! Simulation parameter files (`input2d`).
//!
//! The file is free-form text; every line that starts with a letter and
//! contains `=` is read as `key = value [trailing comment]`. Keys are
//! matched case-sensitively and order does not matter.
//!
//! ```text
//! Lx = 1.0      % length of the Eulerian grid
//! Ly = 0.5
//! Nx = 64
//! Ny = 32
//! string_name = "heart"
//! ```

use crate::bounds::BoundingBox;
use crate::error::MeshError;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Domain size, grid resolution and name of a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    /// Domain length in x.
    pub lx: f64,
    /// Domain length in y. Falls back to `lx` when absent.
    pub ly: f64,
    /// Grid cells in x.
    pub nx: usize,
    /// Grid cells in y. Falls back to `nx` when absent.
    pub ny: usize,
    /// Value of `string_name`, with quotes removed.
    pub name: Option<String>,
    /// Every other `key = value` entry, raw.
    pub extra: BTreeMap<String, String>,
}

impl SimParams {
    /// Parses the contents of an `input2d` file.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameters`] if `Lx` or `Nx` is missing,
    /// or if a known key has a value that is not a positive number (`Nx`
    /// and `Ny` must also be whole).
    pub fn parse(text: &str) -> Result<Self, MeshError> {
        let mut entries = BTreeMap::new();
        for line in text.lines() {
            if !line.starts_with(|c: char| c.is_ascii_alphabetic()) {
                continue;
            }
            let Some((key, rest)) = line.split_once('=') else {
                continue;
            };
            let Some(value) = rest.split_whitespace().next() else {
                continue;
            };
            let value = value.trim_end_matches(';').trim_matches('"');
            entries.insert(key.trim().to_string(), value.to_string());
        }

        let lx = take_length(&mut entries, "Lx")?
            .ok_or_else(|| MeshError::InvalidParameters("missing Lx".into()))?;
        let nx = take_count(&mut entries, "Nx")?
            .ok_or_else(|| MeshError::InvalidParameters("missing Nx".into()))?;
        let ly = take_length(&mut entries, "Ly")?.unwrap_or(lx);
        let ny = take_count(&mut entries, "Ny")?.unwrap_or(nx);
        let name = entries.remove("string_name");

        Ok(Self {
            lx,
            ly,
            nx,
            ny,
            name,
            extra: entries,
        })
    }

    /// Target distance between neighbouring mesh points: half a grid cell.
    ///
    /// ```
    /// use meshmerize::io::SimParams;
    ///
    /// let params = SimParams::parse("Lx = 1.0\nNx = 64\n").unwrap();
    /// assert_eq!(params.spacing(), 0.5 / 64.0);
    /// ```
    #[inline]
    pub fn spacing(&self) -> f64 {
        0.5 * self.lx / self.nx as f64
    }

    /// The simulation domain `[0, Lx] x [0, Ly]`.
    #[inline]
    pub fn domain(&self) -> BoundingBox<f64> {
        BoundingBox::from_size(self.lx, self.ly)
    }
}

impl FromStr for SimParams {
    type Err = MeshError;

    fn from_str(s: &str) -> Result<Self, MeshError> {
        Self::parse(s)
    }
}

fn take_length(entries: &mut BTreeMap<String, String>, key: &str) -> Result<Option<f64>, MeshError> {
    let Some(raw) = entries.remove(key) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(Some(v)),
        _ => Err(MeshError::InvalidParameters(format!(
            "{} must be a positive number, got '{}'",
            key, raw
        ))),
    }
}

fn take_count(entries: &mut BTreeMap<String, String>, key: &str) -> Result<Option<usize>, MeshError> {
    let Some(raw) = entries.remove(key) else {
        return Ok(None);
    };
    // Counts are often written as floats ("64.0").
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 1.0 && v.fract() == 0.0 => Ok(Some(v as usize)),
        _ => Err(MeshError::InvalidParameters(format!(
            "{} must be a positive whole number, got '{}'",
            key, raw
        ))),
    }
}
