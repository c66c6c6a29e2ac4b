//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{is_valid_pattern_name, CliOverrides, Settings, DEFAULT_CONFIG_FILE};
