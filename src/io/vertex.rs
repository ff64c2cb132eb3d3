//! Vertex file output.
//!
//! A vertex file holds the point count on the first line, then one
//! `x y` pair per line in scientific notation with 14 fractional digits.

use crate::primitives::Point2;
use num_traits::Float;
use std::fmt::LowerExp;
use std::io::{self, Write};

/// File extension of vertex files, without the dot.
pub const VERTEX_EXTENSION: &str = "vertex";

/// Writes `points` in vertex format.
///
/// ```
/// use meshmerize::io::write_vertices;
/// use meshmerize::Point2;
///
/// let mut out = Vec::new();
/// write_vertices(&mut out, &[Point2::new(0.5, -2.0)]).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "1\n5.00000000000000e-1 -2.00000000000000e0\n"
/// );
/// ```
pub fn write_vertices<W, F>(writer: &mut W, points: &[Point2<F>]) -> io::Result<()>
where
    W: Write,
    F: Float + LowerExp,
{
    writeln!(writer, "{}", points.len())?;
    for p in points {
        writeln!(writer, "{:.14e} {:.14e}", p.x, p.y)?;
    }
    Ok(())
}

/// Name of the vertex file for a simulation or input called `stem`.
#[inline]
pub fn vertex_file_name(stem: &str) -> String {
    format!("{}.{}", stem, VERTEX_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_vertices() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.25, 100.0),
            Point2::new(-3.0e-5, 7.0),
        ];
        let mut out = Vec::new();
        write_vertices(&mut out, &points).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "3");
        assert_eq!(lines[1], "0.00000000000000e0 0.00000000000000e0");
        assert_eq!(lines[2], "1.25000000000000e0 1.00000000000000e2");

        let parsed: Vec<f64> = lines[3]
            .split_whitespace()
            .map(|f| f.parse().unwrap())
            .collect();
        assert_eq!(parsed, vec![-3.0e-5, 7.0]);
    }

    #[test]
    fn test_write_empty() {
        let mut out = Vec::new();
        write_vertices::<_, f64>(&mut out, &[]).unwrap();
        assert_eq!(out, b"0\n");
    }

    #[test]
    fn test_vertex_file_name() {
        assert_eq!(vertex_file_name("heart"), "heart.vertex");
    }
}
