//! Bézier curve evaluation, arc length and meshing.

mod bezier;

pub use bezier::{bernstein, BezierCurve, CurveMesh, MAX_CURVE_SAMPLES};
