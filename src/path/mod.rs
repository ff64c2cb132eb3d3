//! Assembling tokens into connected curves, and meshing them.
//!
//! A [`Pen`] is threaded through the token stream; each drawing token becomes
//! one [`BezierCurve`](crate::curves::BezierCurve) starting at the pen. The
//! curves form a [`Path`], and a [`Document`] groups paths that share a
//! bounding box.

mod bezier_path;
mod document;
mod pen;

pub use bezier_path::Path;
pub use document::{Document, DocumentMesh, PathFailure, PathMesh};
pub use pen::{Pen, Stroke};
