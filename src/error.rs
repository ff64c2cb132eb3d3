//! Error and diagnostic types for meshmerize operations.

use thiserror::Error;

/// Errors that abort processing of the current path or parameter set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// A command letter with no known operand arity.
    #[error("unknown path command '{command}' at byte {position}")]
    UnknownCommand {
        /// The offending letter.
        command: char,
        /// Byte offset of the letter in the path data.
        position: usize,
    },

    /// A drawing command appeared before the pen was placed by a move-to.
    #[error("'{command}' command issued before any move-to")]
    MissingMoveTo {
        /// Letter of the drawing command.
        command: char,
    },

    /// A curve was requested with no control points.
    #[error("a curve needs at least one control point")]
    EmptyCurve,

    /// Arc length or meshing was requested on a single-point curve.
    #[error("degenerate input: arc length is undefined for a degree-0 curve")]
    DegenerateCurve,

    /// Control points produced a NaN or infinite arc length.
    #[error("curve has a non-finite arc length")]
    NonFiniteLength,

    /// The spacing is so small relative to the curve that the sample count
    /// exceeds the limit.
    #[error("spacing yields {samples:e} samples on one curve, more than the limit of {limit}")]
    TooManySamples {
        /// Requested sample count, `arc_length / spacing`.
        samples: f64,
        limit: usize,
    },

    /// Mesh spacing must be finite and strictly positive.
    #[error("mesh spacing must be finite and positive, got {0}")]
    InvalidSpacing(f64),

    /// A bounding-box definition could not be read.
    #[error("invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// The simulation parameter file is missing entries or has bad values.
    #[error("invalid simulation parameters: {0}")]
    InvalidParameters(String),
}

/// Recoverable conditions noticed while tokenizing path data.
///
/// The tokenizer skips the offending command (or the stray text) and keeps
/// going; the diagnostics are returned next to the tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// The operand count does not split into whole groups of the command's arity.
    #[error("'{command}' at byte {position} has {operands} operands, expected a non-zero multiple of {arity}; command skipped")]
    MalformedToken {
        command: char,
        position: usize,
        operands: usize,
        arity: usize,
    },

    /// A numeric field could not be read.
    #[error("invalid number '{text}' after '{command}' at byte {position}; command skipped")]
    InvalidNumber {
        command: char,
        text: String,
        position: usize,
    },

    /// Elliptical arcs are not meshed.
    #[error("elliptical arc '{command}' at byte {position} is not supported; command skipped")]
    UnsupportedCommand { command: char, position: usize },

    /// Text that carries no meaning, e.g. numbers after a close-path.
    #[error("ignored operands '{text}' at byte {position}")]
    IgnoredOperands { text: String, position: usize },
}
