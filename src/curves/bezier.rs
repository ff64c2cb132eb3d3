//! Arbitrary-degree Bézier curves.
//!
//! A [`BezierCurve`] is defined by `degree + 1` control points. Evaluation
//! uses de Casteljau's algorithm, arc length a fixed three-point
//! Gauss–Legendre rule, and meshing samples the curve at parameter steps
//! derived from that arc length.

use crate::error::MeshError;
use crate::io::Token;
use crate::primitives::Point2;
use num_traits::Float;
use std::iter::FusedIterator;

/// Upper bound on the samples [`BezierCurve::mesh`] will produce for one curve.
pub const MAX_CURVE_SAMPLES: usize = 1 << 24;

/// A Bézier curve of any degree.
///
/// Degree 0 is a single point, degree 1 a line segment. The curve owns its
/// control points and never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve<F> {
    control_points: Vec<Point2<F>>,
}

impl<F: Float> BezierCurve<F> {
    /// Creates a curve from its control points.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::EmptyCurve`] if `control_points` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use meshmerize::curves::BezierCurve;
    /// use meshmerize::Point2;
    ///
    /// let curve = BezierCurve::new(vec![
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(1.0, 2.0),
    ///     Point2::new(2.0, 0.0),
    /// ])
    /// .unwrap();
    /// assert_eq!(curve.degree(), 2);
    /// ```
    pub fn new(control_points: Vec<Point2<F>>) -> Result<Self, MeshError> {
        if control_points.is_empty() {
            return Err(MeshError::EmptyCurve);
        }
        Ok(Self { control_points })
    }

    /// Builds a curve from a token's operands taken pairwise as points.
    ///
    /// The operands are used as given; relative tokens are not resolved
    /// against any pen position. Close-path and horizontal/vertical tokens
    /// have no control points of their own and yield `None`; the path
    /// assembler resolves them against the pen instead.
    pub fn from_token(token: &Token<F>) -> Option<Self> {
        let points = token.points();
        if points.is_empty() {
            None
        } else {
            Some(Self {
                control_points: points,
            })
        }
    }

    /// Degree of the curve: one less than the number of control points.
    #[inline]
    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    /// The control points, first to last.
    #[inline]
    pub fn control_points(&self) -> &[Point2<F>] {
        &self.control_points
    }

    /// Returns a curve with `f` applied to every control point.
    ///
    /// For an affine `f` this maps the whole curve, since Bézier curves are
    /// affine invariant.
    pub fn map_points(&self, f: impl Fn(Point2<F>) -> Point2<F>) -> Self {
        Self {
            control_points: self.control_points.iter().map(|&p| f(p)).collect(),
        }
    }

    /// First control point; the curve passes through it at `t = 0`.
    #[inline]
    pub fn start(&self) -> Point2<F> {
        self.control_points[0]
    }

    /// Last control point; the curve passes through it at `t = 1`.
    #[inline]
    pub fn end(&self) -> Point2<F> {
        self.control_points[self.control_points.len() - 1]
    }

    /// Evaluates the curve at parameter `t` using de Casteljau's algorithm.
    ///
    /// `t` is not checked: values outside `[0, 1]` extrapolate.
    pub fn eval(&self, t: F) -> Point2<F> {
        let mut scratch = self.control_points.clone();
        let n = self.degree();
        for pass in 1..=n {
            for i in 0..=(n - pass) {
                scratch[i] = scratch[i].lerp(scratch[i + 1], t);
            }
        }
        scratch[0]
    }

    /// Evaluates the curve at `t` as an explicit Bernstein polynomial sum.
    ///
    /// Slower and less stable than [`eval`](Self::eval); useful as a
    /// cross-check.
    pub fn eval_bernstein(&self, t: F) -> Point2<F> {
        let n = self.degree();
        self.control_points
            .iter()
            .enumerate()
            .fold(Point2::origin(), |acc, (i, p)| acc + p.scale(bernstein(i, n, t)))
    }

    /// Returns the derivative curve, or `None` for a degree-0 curve.
    ///
    /// For control points `P_0..P_n` the derivative has control points
    /// `Q_i = n (P_{i+1} - P_i)` and degree `n - 1`.
    pub fn derivative(&self) -> Option<Self> {
        let n = self.degree();
        if n == 0 {
            return None;
        }
        let scale = F::from(n).unwrap();
        let control_points = self
            .control_points
            .windows(2)
            .map(|w| (w[1] - w[0]).scale(scale))
            .collect();
        Some(Self { control_points })
    }

    /// Returns the arc length of the curve.
    ///
    /// Exact for line segments. Higher degrees use three-point
    /// Gauss–Legendre quadrature of `|B'(t)|` over `[0, 1]`, which is exact
    /// while the integrand is a polynomial of degree at most 5.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::DegenerateCurve`] for a degree-0 curve.
    ///
    /// # Example
    ///
    /// ```
    /// use meshmerize::curves::BezierCurve;
    /// use meshmerize::Point2;
    ///
    /// let line = BezierCurve::new(vec![Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)]).unwrap();
    /// assert_eq!(line.arc_length().unwrap(), 5.0);
    /// ```
    pub fn arc_length(&self) -> Result<F, MeshError> {
        match self.degree() {
            0 => Err(MeshError::DegenerateCurve),
            1 => Ok(self.control_points[0].distance(self.control_points[1])),
            _ => {
                let derivative = self.derivative().ok_or(MeshError::DegenerateCurve)?;
                let half = F::from(0.5).unwrap();
                let offset = half * F::from(0.6).unwrap().sqrt();
                let five = F::from(5.0).unwrap();
                let eight = F::from(8.0).unwrap();
                let eighteen = F::from(18.0).unwrap();

                let f0 = derivative.eval(half - offset).magnitude();
                let f1 = derivative.eval(half).magnitude();
                let f2 = derivative.eval(half + offset).magnitude();

                Ok((five * f0 + eight * f1 + five * f2) / eighteen)
            }
        }
    }

    /// Samples the curve at roughly `spacing` curvilinear distance.
    ///
    /// With `m = arc_length / spacing`, the samples are `eval(i / m)` for
    /// `i` from 0 (or 1 when `include_start` is false) through `floor(m)`.
    /// The steps are uniform in the parameter, not in arc length, and the
    /// final gap up to the end point may be shorter than `spacing`.
    ///
    /// # Errors
    ///
    /// * [`MeshError::InvalidSpacing`] if `spacing` is not finite and positive
    /// * [`MeshError::DegenerateCurve`] for a degree-0 curve
    /// * [`MeshError::NonFiniteLength`] if the control points are not finite
    /// * [`MeshError::TooManySamples`] if `arc_length / spacing` exceeds
    ///   [`MAX_CURVE_SAMPLES`]
    ///
    /// # Example
    ///
    /// ```
    /// use meshmerize::curves::BezierCurve;
    /// use meshmerize::Point2;
    ///
    /// let line = BezierCurve::new(vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)]).unwrap();
    /// let points: Vec<_> = line.mesh(2.5, true).unwrap().collect();
    /// assert_eq!(points.len(), 5);
    /// ```
    pub fn mesh(&self, spacing: F, include_start: bool) -> Result<CurveMesh<'_, F>, MeshError> {
        if !spacing.is_finite() || spacing <= F::zero() {
            return Err(MeshError::InvalidSpacing(spacing.to_f64().unwrap_or(f64::NAN)));
        }

        let length = self.arc_length()?;
        if !length.is_finite() {
            return Err(MeshError::NonFiniteLength);
        }
        let samples = length / spacing;
        let too_many = || MeshError::TooManySamples {
            samples: samples.to_f64().unwrap_or(f64::INFINITY),
            limit: MAX_CURVE_SAMPLES,
        };
        let last = samples.floor().to_usize().ok_or_else(too_many)?;
        if last > MAX_CURVE_SAMPLES {
            return Err(too_many());
        }

        Ok(CurveMesh {
            curve: self,
            samples,
            next: if include_start { 0 } else { 1 },
            last,
        })
    }
}

/// Lazy sequence of mesh points along one curve.
///
/// Created by [`BezierCurve::mesh`]. Finite, and not restartable.
#[derive(Debug, Clone)]
pub struct CurveMesh<'a, F> {
    curve: &'a BezierCurve<F>,
    samples: F,
    next: usize,
    last: usize,
}

impl<F: Float> Iterator for CurveMesh<'_, F> {
    type Item = Point2<F>;

    fn next(&mut self) -> Option<Point2<F>> {
        if self.next > self.last {
            return None;
        }
        let i = self.next;
        self.next += 1;

        // A zero-length curve has samples == 0 and only ever yields i == 0.
        let t = if i == 0 {
            F::zero()
        } else {
            F::from(i).unwrap() / self.samples
        };
        Some(self.curve.eval(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last + 1).saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<F: Float> ExactSizeIterator for CurveMesh<'_, F> {}

impl<F: Float> FusedIterator for CurveMesh<'_, F> {}

/// Evaluates the Bernstein basis polynomial `b_{i,n}(t) = C(n, i) (1-t)^(n-i) t^i`.
///
/// Returns zero when `i > n`.
pub fn bernstein<F: Float>(i: usize, n: usize, t: F) -> F {
    if i > n {
        return F::zero();
    }
    let k = i.min(n - i);
    let mut binomial = F::one();
    for j in 0..k {
        binomial = binomial * F::from(n - j).unwrap() / F::from(j + 1).unwrap();
    }
    binomial * (F::one() - t).powi((n - i) as i32) * t.powi(i as i32)
}
