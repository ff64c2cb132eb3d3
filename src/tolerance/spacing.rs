//! Spacing quality of a mesh.
//!
//! Compares the distance between consecutive mesh points with the target
//! spacing `ds`. The relative error of one gap is `|d - ds| / ds`.
//!
//! # Example
//!
//! ```
//! use meshmerize::tolerance::spacing_report;
//! use meshmerize::Point2;
//!
//! let points = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(2.5, 0.0),
//! ];
//! let report = spacing_report(&points, 1.0_f64, 0.1);
//! assert_eq!(report.gaps, 2);
//! assert_eq!(report.violations, vec![1]);
//! assert!((report.max_relative_error - 0.5).abs() < 1e-12);
//! ```

use crate::primitives::Point2;
use num_traits::Float;

/// Relative spacing error above which a gap is reported: 10%.
pub const DEFAULT_SPACING_TOLERANCE: f64 = 0.10;

/// Summary of how evenly a point sequence is spaced.
#[derive(Debug, Clone, PartialEq)]
pub struct SpacingReport<F> {
    /// Number of gaps measured (points minus one).
    pub gaps: usize,
    pub mean_relative_error: F,
    pub mean_squared_relative_error: F,
    pub max_relative_error: F,
    /// Index `i` of every gap between points `i` and `i + 1` whose relative
    /// error exceeds the tolerance.
    pub violations: Vec<usize>,
}

impl<F: Float> SpacingReport<F> {
    /// Returns true if no gap exceeded the tolerance.
    #[inline]
    pub fn is_within_tolerance(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Measures every gap of `points` against `spacing`.
///
/// Fewer than two points give an empty report with zero errors.
/// `spacing` is expected to be positive; zero gives infinite errors.
pub fn spacing_report<F: Float>(points: &[Point2<F>], spacing: F, tolerance: F) -> SpacingReport<F> {
    let mut sum = F::zero();
    let mut sum_sq = F::zero();
    let mut max = F::zero();
    let mut violations = Vec::new();

    for (i, w) in points.windows(2).enumerate() {
        let err = ((w[0].distance(w[1]) - spacing) / spacing).abs();
        sum = sum + err;
        sum_sq = sum_sq + err * err;
        max = max.max(err);
        if err > tolerance {
            violations.push(i);
        }
    }

    let gaps = points.len().saturating_sub(1);
    let (mean, mean_sq) = if gaps == 0 {
        (F::zero(), F::zero())
    } else {
        let n = F::from(gaps).unwrap();
        (sum / n, sum_sq / n)
    };

    SpacingReport {
        gaps,
        mean_relative_error: mean,
        mean_squared_relative_error: mean_sq,
        max_relative_error: max,
        violations,
    }
}
