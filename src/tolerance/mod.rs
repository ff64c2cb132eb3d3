//! Checks of mesh quality against the target spacing.
//!
//! All functions take the tolerance explicitly. No hidden epsilons are used.

mod spacing;

pub use spacing::{spacing_report, SpacingReport, DEFAULT_SPACING_TOLERANCE};
