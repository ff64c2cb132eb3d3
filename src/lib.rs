//! meshmerize - Meshing SVG path geometry
//!
//! Turns SVG path data into evenly spaced points. Path data is tokenized,
//! assembled into connected Bézier curves, and each curve is sampled at a
//! target curvilinear spacing.
//!
//! # Example
//!
//! ```
//! use meshmerize::io::tokenize;
//! use meshmerize::path::Path;
//!
//! let tokenized = tokenize::<f64>("M0,0 L10,0 L10,10 Z").unwrap();
//! let path = Path::from_tokens(&tokenized.tokens).unwrap();
//! let points = path.mesh(0.5).unwrap();
//! assert!(points.len() > 40);
//! ```

pub mod bounds;
pub mod curves;
pub mod error;
pub mod io;
pub mod path;
pub mod primitives;
pub mod tolerance;

pub use bounds::BoundingBox;
pub use curves::BezierCurve;
pub use error::{Diagnostic, MeshError};
pub use io::{tokenize, Token};
pub use path::{Document, Path, Pen};
pub use primitives::Point2;
