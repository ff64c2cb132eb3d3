//! Paths assembled from tokens, and their meshes.

use super::pen::{Pen, Stroke};
use crate::bounds::BoundingBox;
use crate::curves::BezierCurve;
use crate::error::MeshError;
use crate::io::Token;
use crate::primitives::Point2;
use num_traits::Float;

/// Absolute distance under which a sub-path's end counts as its start.
const CLOSURE_EPSILON: f64 = 1e-9;

/// Fraction of the spacing under which a final sample repeats the start.
const COINCIDENT_FRACTION: f64 = 1e-9;

/// An ordered chain of Bézier curves with its bounding box.
///
/// Consecutive curves within one sub-path share end and start points. A
/// move-to starts a new sub-path; [`subpaths`](Path::subpaths) iterates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<F> {
    curves: Vec<BezierCurve<F>>,
    /// Index into `curves` of each sub-path's first curve.
    subpaths: Vec<usize>,
    bounds: BoundingBox<F>,
}

impl<F: Float> Path<F> {
    /// Assembles tokens into curves inside the unit bounding box.
    ///
    /// See [`Path::with_bounds`].
    pub fn from_tokens(tokens: &[Token<F>]) -> Result<Self, MeshError> {
        Self::with_bounds(tokens, BoundingBox::default())
    }

    /// Assembles tokens into curves, tracking the pen across them.
    ///
    /// Move-to tokens produce no curve. A move-to with nothing drawn after
    /// it produces no sub-path.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MissingMoveTo`] if drawing starts before the pen
    /// is placed.
    ///
    /// # Example
    ///
    /// ```
    /// use meshmerize::io::tokenize;
    /// use meshmerize::path::Path;
    ///
    /// let tokens = tokenize::<f64>("M0,0 L10,0 L10,10 Z").unwrap().tokens;
    /// let path = Path::from_tokens(&tokens).unwrap();
    /// assert_eq!(path.curves().len(), 3);
    /// assert!(path.is_closed());
    /// ```
    pub fn with_bounds(tokens: &[Token<F>], bounds: BoundingBox<F>) -> Result<Self, MeshError> {
        let mut pen = Pen::new();
        let mut curves = Vec::new();
        let mut subpaths = Vec::new();
        let mut fresh = true;

        for token in tokens {
            let (next, stroke) = pen.step(token)?;
            pen = next;
            match stroke {
                Stroke::Move => fresh = true,
                Stroke::Draw(curve) => {
                    if fresh {
                        subpaths.push(curves.len());
                        fresh = false;
                    }
                    curves.push(curve);
                }
            }
        }

        log::debug!(
            "assembled {} curves in {} sub-paths from {} tokens",
            curves.len(),
            subpaths.len(),
            tokens.len()
        );

        Ok(Self {
            curves,
            subpaths,
            bounds,
        })
    }

    /// All curves, in drawing order.
    #[inline]
    pub fn curves(&self) -> &[BezierCurve<F>] {
        &self.curves
    }

    /// The bounding box the path was drawn in.
    #[inline]
    pub fn bounds(&self) -> &BoundingBox<F> {
        &self.bounds
    }

    /// Returns true if no curve was drawn.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Iterates the sub-paths as slices of consecutive curves.
    pub fn subpaths(&self) -> impl Iterator<Item = &[BezierCurve<F>]> + '_ {
        self.subpaths.iter().enumerate().map(move |(k, &start)| {
            let end = self
                .subpaths
                .get(k + 1)
                .copied()
                .unwrap_or(self.curves.len());
            &self.curves[start..end]
        })
    }

    /// Returns true if the last curve ends where the first one starts.
    ///
    /// An empty path is not closed.
    pub fn is_closed(&self) -> bool {
        match (self.curves.first(), self.curves.last()) {
            (Some(first), Some(last)) => is_loop(first, last),
            _ => false,
        }
    }

    /// Returns the path with every control point mapped from its bounding
    /// box onto `target`, which becomes the new bounding box.
    pub fn map_to(&self, target: &BoundingBox<F>) -> Self {
        let from = self.bounds;
        Self {
            curves: self
                .curves
                .iter()
                .map(|c| c.map_points(|p| from.map_to(target, p)))
                .collect(),
            subpaths: self.subpaths.clone(),
            bounds: *target,
        }
    }

    /// Samples the whole path at roughly `spacing` curvilinear distance.
    ///
    /// Curves are meshed in order. A point shared by two consecutive curves
    /// is emitted once. On a closed sub-path the final sample is dropped
    /// when it coincides with the sub-path's first point. A sub-path that
    /// would yield a single point also gets its last curve end that differs
    /// from the start, so any sub-path of non-zero extent contributes at
    /// least two points.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidSpacing`] for a spacing that is not finite
    /// and positive, [`MeshError::NonFiniteLength`] if a curve has
    /// non-finite control points, and [`MeshError::TooManySamples`] if the
    /// spacing is too fine for a curve.
    ///
    /// # Example
    ///
    /// ```
    /// use meshmerize::io::tokenize;
    /// use meshmerize::path::Path;
    ///
    /// let tokens = tokenize::<f64>("M0 0 H4 V4 H0 Z").unwrap().tokens;
    /// let points = Path::from_tokens(&tokens).unwrap().mesh(1.0).unwrap();
    /// // 16 units of perimeter, the start point is not repeated.
    /// assert_eq!(points.len(), 16);
    /// ```
    pub fn mesh(&self, spacing: F) -> Result<Vec<Point2<F>>, MeshError> {
        Ok(self.mesh_subpaths(spacing)?.into_iter().flatten().collect())
    }

    /// Like [`mesh`](Path::mesh), with one point list per sub-path.
    ///
    /// The jump between sub-paths is not a mesh gap; keeping the lists apart
    /// lets spacing checks skip it.
    pub fn mesh_subpaths(&self, spacing: F) -> Result<Vec<Vec<Point2<F>>>, MeshError> {
        if !spacing.is_finite() || spacing <= F::zero() {
            return Err(MeshError::InvalidSpacing(spacing.to_f64().unwrap_or(f64::NAN)));
        }

        let coincident = spacing * F::from(COINCIDENT_FRACTION).unwrap();
        let mut meshes = Vec::with_capacity(self.subpaths.len());

        for subpath in self.subpaths() {
            let (first, last) = match (subpath.first(), subpath.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => continue,
            };
            let closed = is_loop(first, last);

            let mut points = Vec::new();
            for (k, curve) in subpath.iter().enumerate() {
                points.extend(curve.mesh(spacing, k == 0)?);
            }

            let origin = first.start();
            if closed && points.len() > 1 {
                if let Some(&tail) = points.last() {
                    if tail.distance(origin) <= coincident {
                        points.pop();
                    }
                }
            }
            if points.len() == 1 {
                let far = subpath
                    .iter()
                    .rev()
                    .map(BezierCurve::end)
                    .find(|p| p.distance(origin) > coincident);
                if let Some(p) = far {
                    points.push(p);
                }
            }
            meshes.push(points);
        }

        log::trace!(
            "meshed {} curves into {} points",
            self.curves.len(),
            meshes.iter().map(Vec::len).sum::<usize>()
        );
        Ok(meshes)
    }
}

fn is_loop<F: Float>(first: &BezierCurve<F>, last: &BezierCurve<F>) -> bool {
    first
        .start()
        .approx_eq(last.end(), F::from(CLOSURE_EPSILON).unwrap())
}
