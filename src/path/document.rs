//! A set of independent paths drawn in one bounding box.

use super::bezier_path::Path;
use crate::bounds::BoundingBox;
use crate::error::{Diagnostic, MeshError};
use crate::io::tokenize;
use crate::primitives::Point2;
use num_traits::Float;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A path that could not be assembled or meshed.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFailure {
    /// Position of the path-data string in the input.
    pub index: usize,
    pub error: MeshError,
}

/// Paths parsed from several path-data strings.
///
/// A structural error in one string drops that path only; the others are
/// kept and the error is recorded in [`failures`](Document::failures).
#[derive(Debug, Clone, PartialEq)]
pub struct Document<F> {
    pub bounds: BoundingBox<F>,
    /// Successfully assembled paths, in input order.
    pub paths: Vec<Path<F>>,
    /// Input index of each entry of `paths`.
    pub indices: Vec<usize>,
    /// Recoverable tokenizer diagnostics, tagged with the input index.
    pub diagnostics: Vec<(usize, Diagnostic)>,
    pub failures: Vec<PathFailure>,
}

/// Mesh of one path, one point list per sub-path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMesh<F> {
    /// Position of the path-data string in the input.
    pub index: usize,
    pub subpaths: Vec<Vec<Point2<F>>>,
}

impl<F: Float> PathMesh<F> {
    /// All points of the path, sub-paths in order.
    pub fn points(&self) -> impl Iterator<Item = Point2<F>> + '_ {
        self.subpaths.iter().flatten().copied()
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of meshing a [`Document`].
///
/// Paths that failed to mesh are listed in `failures` and absent from
/// `paths`; the rest are unaffected.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMesh<F> {
    /// Meshes of the paths that succeeded, in input order.
    pub paths: Vec<PathMesh<F>>,
    pub failures: Vec<PathFailure>,
}

impl<F: Float> DocumentMesh<F> {
    /// Every mesh point, concatenated in path order.
    pub fn points(&self) -> Vec<Point2<F>> {
        self.paths.iter().flat_map(PathMesh::points).collect()
    }

    /// Returns true if every path meshed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Outcome<F> {
    path: Result<Path<F>, MeshError>,
    diagnostics: Vec<Diagnostic>,
}

fn parse_one<F: Float + FromStr>(data: &str, bounds: BoundingBox<F>) -> Outcome<F> {
    match tokenize::<F>(data) {
        Ok(tokenized) => Outcome {
            path: Path::with_bounds(&tokenized.tokens, bounds),
            diagnostics: tokenized.diagnostics,
        },
        Err(error) => Outcome {
            path: Err(error),
            diagnostics: Vec::new(),
        },
    }
}

#[cfg(feature = "parallel")]
fn parse_all<F, S>(sources: &[S], bounds: BoundingBox<F>) -> Vec<Outcome<F>>
where
    F: Float + FromStr + Send + Sync,
    S: AsRef<str> + Sync,
{
    sources
        .par_iter()
        .map(|s| parse_one(s.as_ref(), bounds))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn parse_all<F, S>(sources: &[S], bounds: BoundingBox<F>) -> Vec<Outcome<F>>
where
    F: Float + FromStr + Send + Sync,
    S: AsRef<str> + Sync,
{
    sources
        .iter()
        .map(|s| parse_one(s.as_ref(), bounds))
        .collect()
}

type SubpathMeshes<F> = Result<Vec<Vec<Point2<F>>>, MeshError>;

#[cfg(feature = "parallel")]
fn mesh_all<F: Float + Send + Sync>(paths: &[Path<F>], spacing: F) -> Vec<SubpathMeshes<F>> {
    paths.par_iter().map(|p| p.mesh_subpaths(spacing)).collect()
}

#[cfg(not(feature = "parallel"))]
fn mesh_all<F: Float + Send + Sync>(paths: &[Path<F>], spacing: F) -> Vec<SubpathMeshes<F>> {
    paths.iter().map(|p| p.mesh_subpaths(spacing)).collect()
}

impl<F: Float + FromStr + Send + Sync> Document<F> {
    /// Parses each path-data string into its own [`Path`].
    ///
    /// With the `parallel` feature the strings are processed on the rayon
    /// thread pool; results keep input order either way.
    ///
    /// ```
    /// use meshmerize::path::Document;
    /// use meshmerize::BoundingBox;
    ///
    /// let doc = Document::<f64>::parse(&["M0 0 L1 0", "L1 1", "M0 0 H2"], BoundingBox::unit());
    /// assert_eq!(doc.paths.len(), 2);
    /// assert_eq!(doc.failures[0].index, 1);
    /// ```
    pub fn parse<S: AsRef<str> + Sync>(sources: &[S], bounds: BoundingBox<F>) -> Self {
        let mut paths = Vec::new();
        let mut indices = Vec::new();
        let mut diagnostics = Vec::new();
        let mut failures = Vec::new();

        for (index, outcome) in parse_all(sources, bounds).into_iter().enumerate() {
            diagnostics.extend(outcome.diagnostics.into_iter().map(|d| (index, d)));
            match outcome.path {
                Ok(path) => {
                    paths.push(path);
                    indices.push(index);
                }
                Err(error) => {
                    log::warn!("path {}: {}", index, error);
                    failures.push(PathFailure { index, error });
                }
            }
        }

        log::info!(
            "parsed {} of {} paths ({} diagnostics)",
            paths.len(),
            sources.len(),
            diagnostics.len()
        );

        Self {
            bounds,
            paths,
            indices,
            diagnostics,
            failures,
        }
    }
}

impl<F: Float + Send + Sync> Document<F> {
    /// Returns the document with every path mapped onto `target`.
    pub fn map_to(&self, target: &BoundingBox<F>) -> Self {
        Self {
            bounds: *target,
            paths: self.paths.iter().map(|p| p.map_to(target)).collect(),
            indices: self.indices.clone(),
            diagnostics: self.diagnostics.clone(),
            failures: self.failures.clone(),
        }
    }

    /// Meshes every path independently.
    ///
    /// A path whose mesh fails (see [`Path::mesh`]) is recorded in
    /// [`DocumentMesh::failures`] under its input index; the other paths are
    /// still meshed.
    ///
    /// ```
    /// use meshmerize::path::Document;
    /// use meshmerize::BoundingBox;
    ///
    /// let doc = Document::<f64>::parse(&["M0 0 L2 0", "M0 0 L1e400 0"], BoundingBox::unit());
    /// let mesh = doc.mesh(1.0);
    /// assert_eq!(mesh.points().len(), 3);
    /// assert_eq!(mesh.failures[0].index, 1);
    /// ```
    pub fn mesh(&self, spacing: F) -> DocumentMesh<F> {
        let mut paths = Vec::new();
        let mut failures = Vec::new();

        for (&index, result) in self.indices.iter().zip(mesh_all(&self.paths, spacing)) {
            match result {
                Ok(subpaths) => paths.push(PathMesh { index, subpaths }),
                Err(error) => {
                    log::warn!("path {}: {}", index, error);
                    failures.push(PathFailure { index, error });
                }
            }
        }

        DocumentMesh { paths, failures }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_does_not_affect_siblings() {
        let sources = ["M0 0 L4 0", "M0 0 X1 1", "L2 2", "M0 0 L0 4"];
        let doc = Document::<f64>::parse(&sources, BoundingBox::from_size(4.0, 4.0));

        assert_eq!(doc.paths.len(), 2);
        assert_eq!(doc.failures.len(), 2);
        assert_eq!(doc.failures[0].index, 1);
        assert!(matches!(
            doc.failures[0].error,
            MeshError::UnknownCommand { command: 'X', .. }
        ));
        assert_eq!(
            doc.failures[1],
            PathFailure {
                index: 2,
                error: MeshError::MissingMoveTo { command: 'L' }
            }
        );
        assert_eq!(doc.paths[1].curves()[0].end(), Point2::new(0.0, 4.0));
    }

    #[test]
    fn test_diagnostics_are_tagged() {
        let sources = vec![
            String::from("M0 0 L1 1"),
            String::from("M0 0 A1 1 0 0 1 2 2 L3 3"),
        ];
        let doc = Document::<f64>::parse(&sources, BoundingBox::unit());
        assert_eq!(doc.paths.len(), 2);
        assert_eq!(doc.diagnostics.len(), 1);
        assert_eq!(doc.diagnostics[0].0, 1);
        assert!(matches!(
            doc.diagnostics[0].1,
            Diagnostic::UnsupportedCommand { command: 'A', .. }
        ));
    }

    #[test]
    fn test_mesh_concatenates_in_order() {
        let doc = Document::<f64>::parse(&["M0 0 L2 0", "M0 5 L0 7"], BoundingBox::unit());
        let mesh = doc.mesh(1.0);
        assert!(mesh.is_complete());
        assert_eq!(mesh.paths.len(), 2);
        assert_eq!(mesh.paths[0].len(), 3);
        assert_eq!(mesh.paths[1].len(), 3);

        let all = mesh.points();
        assert_eq!(all.len(), 6);
        assert_eq!(all[3], Point2::new(0.0, 5.0));
    }

    #[test]
    fn test_mesh_failure_does_not_affect_siblings() {
        let sources = ["M0 0 L2 0", "M0 0 L1e400 0", "M0 5 L0 7"];
        let doc = Document::<f64>::parse(&sources, BoundingBox::unit());
        assert_eq!(doc.paths.len(), 3);
        assert!(doc.failures.is_empty());

        let mesh = doc.mesh(1.0);
        assert_eq!(
            mesh.failures,
            vec![PathFailure {
                index: 1,
                error: MeshError::NonFiniteLength
            }]
        );
        let indices: Vec<_> = mesh.paths.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(mesh.points().len(), 6);
    }

    #[test]
    fn test_mesh_indices_skip_parse_failures() {
        let doc = Document::<f64>::parse(&["L1 1", "M0 0 L1e10 0", "M0 0 L0 3"], BoundingBox::unit());
        assert_eq!(doc.indices, vec![1, 2]);

        let mesh = doc.mesh(1e-10);
        assert_eq!(mesh.failures.len(), 2);
        assert_eq!(mesh.failures[0].index, 1);
        assert!(matches!(
            mesh.failures[0].error,
            MeshError::TooManySamples { .. }
        ));
        assert!(mesh.paths.is_empty());

        let mesh = doc.mesh(1e9);
        assert!(mesh.is_complete());
        assert_eq!(mesh.paths[0].len(), 11);
        assert_eq!(mesh.paths[1].index, 2);
    }

    #[test]
    fn test_mesh_keeps_subpaths_apart() {
        let doc = Document::<f64>::parse(&["M0 0 L2 0 M10 0 L12 0"], BoundingBox::unit());
        let mesh = doc.mesh(1.0);
        assert_eq!(mesh.paths[0].subpaths.len(), 2);
        assert_eq!(mesh.paths[0].subpaths[1][0], Point2::new(10.0, 0.0));
        assert_eq!(mesh.paths[0].len(), 6);
    }

    #[test]
    fn test_mesh_invalid_spacing() {
        let doc = Document::<f64>::parse(&["M0 0 L2 0", "M0 0 L0 2"], BoundingBox::unit());
        let mesh = doc.mesh(-1.0);
        assert!(mesh.paths.is_empty());
        assert_eq!(mesh.failures.len(), 2);
        assert!(matches!(mesh.failures[1].error, MeshError::InvalidSpacing(_)));
    }

    #[test]
    fn test_map_to() {
        let doc = Document::<f64>::parse(&["M0 0 L100 50"], BoundingBox::from_size(100.0, 50.0));
        let domain = BoundingBox::from_size(1.0, 1.0);
        let mapped = doc.map_to(&domain);
        assert_eq!(mapped.bounds, domain);
        assert_eq!(mapped.paths[0].curves()[0].end(), Point2::new(1.0, 1.0));
        assert_eq!(mapped.indices, doc.indices);
    }
}
