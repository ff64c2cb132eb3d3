//! Pen state threaded through path assembly.

use crate::curves::BezierCurve;
use crate::error::MeshError;
use crate::io::{PathOp, Token};
use crate::primitives::Point2;
use num_traits::Float;

/// Where the pen is and where its sub-path began.
///
/// Both are `None` until the first move-to. Stepping is pure: [`Pen::step`]
/// returns the next state instead of mutating this one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen<F> {
    /// Current pen position.
    pub current: Option<Point2<F>>,
    /// First point of the current sub-path; close-path draws back to it.
    pub subpath_start: Option<Point2<F>>,
}

/// What one token did to the drawing.
#[derive(Debug, Clone, PartialEq)]
pub enum Stroke<F> {
    /// The pen was lifted and placed; a new sub-path begins.
    Move,
    /// A curve was drawn from the previous pen position.
    Draw(BezierCurve<F>),
}

impl<F: Float> Pen<F> {
    /// A pen that has not been placed yet.
    #[inline]
    pub fn new() -> Self {
        Self {
            current: None,
            subpath_start: None,
        }
    }

    /// Applies one token.
    ///
    /// Relative operands are offsets from the pen position at the start of
    /// the token. Every drawing command begins its curve at the current pen
    /// position:
    ///
    /// | token | control points |
    /// |-------|----------------|
    /// | `L`, implicit `M` | current, end |
    /// | `H` / `V` | current, end with the other coordinate kept |
    /// | `T` | current, current, end |
    /// | `Q` | current, control, end |
    /// | `S` | current, current, control 2, end |
    /// | `C` | current, control 1, control 2, end |
    /// | `Z` | current, sub-path start |
    ///
    /// Smooth commands repeat the current point instead of reflecting the
    /// previous control point.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MissingMoveTo`] if a drawing command comes before
    /// any move-to.
    ///
    /// # Example
    ///
    /// ```
    /// use meshmerize::io::{PathOp, Token};
    /// use meshmerize::path::{Pen, Stroke};
    /// use meshmerize::Point2;
    ///
    /// let pen = Pen::new();
    /// let (pen, _) = pen.step(&Token::absolute(PathOp::MoveTo(Point2::new(1.0, 1.0)))).unwrap();
    /// let (pen, stroke) = pen.step(&Token::relative(PathOp::LineTo(Point2::new(2.0, 0.0)))).unwrap();
    ///
    /// assert_eq!(pen.current, Some(Point2::new(3.0, 1.0)));
    /// match stroke {
    ///     Stroke::Draw(curve) => assert_eq!(curve.start(), Point2::new(1.0, 1.0)),
    ///     Stroke::Move => unreachable!(),
    /// }
    /// ```
    pub fn step(self, token: &Token<F>) -> Result<(Self, Stroke<F>), MeshError> {
        let relative = token.relative;

        if let PathOp::MoveTo(p) = token.op {
            if !token.implicit {
                // A leading relative move is taken from the origin.
                let to = match (relative, self.current) {
                    (true, Some(current)) => current + p,
                    _ => p,
                };
                let pen = Self {
                    current: Some(to),
                    subpath_start: Some(to),
                };
                return Ok((pen, Stroke::Move));
            }
        }

        let current = self.current.ok_or(MeshError::MissingMoveTo {
            command: token.letter(),
        })?;
        let at = |p: Point2<F>| if relative { current + p } else { p };
        let coord = |base: F, v: F| if relative { base + v } else { v };

        let points = match token.op {
            PathOp::ClosePath => vec![current, self.subpath_start.unwrap_or(current)],
            PathOp::HorizontalTo(x) => vec![current, Point2::new(coord(current.x, x), current.y)],
            PathOp::VerticalTo(y) => vec![current, Point2::new(current.x, coord(current.y, y))],
            PathOp::MoveTo(p) | PathOp::LineTo(p) => vec![current, at(p)],
            PathOp::SmoothQuadraticTo(p) => vec![current, current, at(p)],
            PathOp::QuadraticTo(c, p) => vec![current, at(c), at(p)],
            PathOp::SmoothCubicTo(c2, p) => vec![current, current, at(c2), at(p)],
            PathOp::CubicTo(c1, c2, p) => vec![current, at(c1), at(c2), at(p)],
        };

        let curve = BezierCurve::new(points)?;
        let pen = Self {
            current: Some(curve.end()),
            subpath_start: self.subpath_start,
        };
        Ok((pen, Stroke::Draw(curve)))
    }
}

impl<F: Float> Default for Pen<F> {
    fn default() -> Self {
        Self::new()
    }
}
