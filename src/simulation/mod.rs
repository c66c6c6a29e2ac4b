//! Interactive simulation driver built on the core engine

pub mod prompt;
pub mod runner;
pub mod sink;

pub use prompt::{FixedPattern, PatternPrompt, StdinPrompt};
pub use runner::{RunSummary, Runner, Simulation};
pub use sink::{GenerationSink, RecordingSink, TerminalSink};
