//! Console helpers

pub mod display;

pub use display::{paint, ColorOutput, GridFormatter, Tone};
