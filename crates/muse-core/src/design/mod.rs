//! Design suggestion module.
//!
//! Builds the model instruction and turns whatever the model answers with
//! into complete `DesignSuggestion` values.

pub mod model;
pub mod normalize;
pub mod prompt;

pub use model::{DesignSuggestion, FontWeight, ShapeKind, ShapeSpec, TextElement};
pub use normalize::{normalize, parse_designs, NormalizeError};
pub use prompt::build_prompt;
