//! Bounding rectangle of a drawing.

use crate::error::MeshError;
use crate::primitives::Point2;
use num_traits::Float;
use std::fmt;
use std::str::FromStr;

/// The rectangle a drawing lives in, `[xmin, xmax] x [ymin, ymax]`.
///
/// Does not validate that `xmin <= xmax` or `ymin <= ymax`; an inverted box
/// is a caller error and simply produces mirrored mappings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox<F> {
    pub xmin: F,
    pub ymin: F,
    pub xmax: F,
    pub ymax: F,
}

impl<F: Float> BoundingBox<F> {
    /// Creates a box from its extents.
    #[inline]
    pub fn new(xmin: F, ymin: F, xmax: F, ymax: F) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// The unit square `[0, 1] x [0, 1]`.
    #[inline]
    pub fn unit() -> Self {
        Self::from_size(F::one(), F::one())
    }

    /// A box anchored at the origin with the given width and height.
    #[inline]
    pub fn from_size(width: F, height: F) -> Self {
        Self::new(F::zero(), F::zero(), width, height)
    }

    /// Derives a box from optional width/height metadata.
    ///
    /// A missing dimension mirrors the present one, giving a square. With
    /// neither present the unit square is returned.
    ///
    /// ```
    /// use meshmerize::BoundingBox;
    ///
    /// let b = BoundingBox::from_dimensions(None, Some(40.0));
    /// assert_eq!(b, BoundingBox::new(0.0, 0.0, 40.0, 40.0));
    /// ```
    pub fn from_dimensions(width: Option<F>, height: Option<F>) -> Self {
        match (width, height) {
            (Some(w), Some(h)) => Self::from_size(w, h),
            (Some(w), None) => Self::from_size(w, w),
            (None, Some(h)) => Self::from_size(h, h),
            (None, None) => Self::unit(),
        }
    }

    /// Returns the width of the box.
    #[inline]
    pub fn width(&self) -> F {
        self.xmax - self.xmin
    }

    /// Returns the height of the box.
    #[inline]
    pub fn height(&self) -> F {
        self.ymax - self.ymin
    }

    /// Lower-left corner.
    #[inline]
    pub fn min(&self) -> Point2<F> {
        Point2::new(self.xmin, self.ymin)
    }

    /// Upper-right corner.
    #[inline]
    pub fn max(&self) -> Point2<F> {
        Point2::new(self.xmax, self.ymax)
    }

    /// Returns true if the point lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, p: Point2<F>) -> bool {
        p.x >= self.xmin && p.x <= self.xmax && p.y >= self.ymin && p.y <= self.ymax
    }

    /// Maps a point linearly from this box onto `target`.
    ///
    /// Each axis is scaled independently, so the aspect ratio follows the
    /// target. A zero-width or zero-height source box yields non-finite
    /// coordinates.
    ///
    /// ```
    /// use meshmerize::{BoundingBox, Point2};
    ///
    /// let svg = BoundingBox::new(0.0, 0.0, 200.0, 100.0);
    /// let domain = BoundingBox::from_size(1.0, 0.5);
    /// assert_eq!(svg.map_to(&domain, Point2::new(100.0, 50.0)), Point2::new(0.5, 0.25));
    /// ```
    pub fn map_to(&self, target: &Self, p: Point2<F>) -> Point2<F> {
        Point2::new(
            target.xmin + (p.x - self.xmin) * target.width() / self.width(),
            target.ymin + (p.y - self.ymin) * target.height() / self.height(),
        )
    }
}

impl<F: Float> Default for BoundingBox<F> {
    fn default() -> Self {
        Self::unit()
    }
}

impl<F: Float + FromStr> FromStr for BoundingBox<F> {
    type Err = MeshError;

    /// Parses `"xmin ymin xmax ymax"`; commas may stand in for whitespace.
    fn from_str(s: &str) -> Result<Self, MeshError> {
        let fields: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|f| !f.is_empty())
            .collect();

        if fields.len() != 4 {
            return Err(MeshError::InvalidBoundingBox(format!(
                "expected 4 numbers, found {} in '{}'",
                fields.len(),
                s.trim()
            )));
        }

        let mut values = [F::zero(); 4];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field
                .parse()
                .map_err(|_| MeshError::InvalidBoundingBox(format!("'{}' is not a number", field)))?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

impl<F: fmt::Display> fmt::Display for BoundingBox<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.xmin, self.ymin, self.xmax, self.ymax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse() {
        let b: BoundingBox<f64> = "0 0 100 50".parse().unwrap();
        assert_eq!(b.xmin, 0.0);
        assert_eq!(b.ymin, 0.0);
        assert_eq!(b.xmax, 100.0);
        assert_eq!(b.ymax, 50.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 50.0);
    }

    #[test]
    fn test_parse_separators() {
        let b: BoundingBox<f64> = "  -1.5,2\t3e1 , 4\n".parse().unwrap();
        assert_eq!(b, BoundingBox::new(-1.5, 2.0, 30.0, 4.0));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "0 0 100".parse::<BoundingBox<f64>>(),
            Err(MeshError::InvalidBoundingBox(_))
        ));
        assert!(matches!(
            "0 0 100 50 7".parse::<BoundingBox<f64>>(),
            Err(MeshError::InvalidBoundingBox(_))
        ));
        assert!(matches!(
            "0 0 wide 50".parse::<BoundingBox<f64>>(),
            Err(MeshError::InvalidBoundingBox(_))
        ));
    }

    #[test]
    fn test_from_dimensions() {
        assert_eq!(
            BoundingBox::from_dimensions(Some(10.0), Some(20.0)),
            BoundingBox::new(0.0, 0.0, 10.0, 20.0)
        );
        assert_eq!(
            BoundingBox::from_dimensions(Some(10.0), None),
            BoundingBox::new(0.0, 0.0, 10.0, 10.0)
        );
        assert_eq!(
            BoundingBox::<f64>::from_dimensions(None, None),
            BoundingBox::unit()
        );
        assert_eq!(BoundingBox::<f64>::default(), BoundingBox::unit());
    }

    #[test]
    fn test_display_round_trip() {
        let b = BoundingBox::new(-1.0, 0.5, 10.0, 20.0);
        assert_eq!(b.to_string(), "-1 0.5 10 20");
        assert_eq!(b.to_string().parse::<BoundingBox<f64>>().unwrap(), b);
    }

    #[test]
    fn test_contains() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 5.0);
        assert!(b.contains(Point2::new(0.0, 0.0)));
        assert!(b.contains(Point2::new(10.0, 5.0)));
        assert!(!b.contains(Point2::new(10.1, 1.0)));
    }

    #[test]
    fn test_map_to() {
        let from = BoundingBox::new(10.0, 20.0, 110.0, 70.0);
        let to = BoundingBox::from_size(2.0, 1.0);

        assert_eq!(from.map_to(&to, from.min()), to.min());
        assert_eq!(from.map_to(&to, from.max()), to.max());

        let p = from.map_to(&to, Point2::new(35.0, 45.0));
        assert_relative_eq!(p.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.5, epsilon = 1e-12);
    }
}
