//! Pattern files: loading, parsing and the built-in short-block fixtures
//!
//! A pattern file is plain text, one row per line, using `.` for a dead
//! cell and `X` for a live one.

use crate::config::{is_valid_pattern_name, Settings};
use anyhow::Context;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEAD_GLYPH: char = '.';
pub const ALIVE_GLYPH: char = 'X';

/// Extension appended to a pattern name to find its file
pub const PATTERN_EXTENSION: &str = "txt";

/// Small symmetric patterns that legacy fixed-width files pad with dead cells
pub const SHORT_BLOCK_PATTERNS: [&str; 7] =
    ["beacon", "glider", "bee_hive", "blinker", "block", "toad", "tub"];

/// Whether rows of this pattern are eligible for trimming
pub fn is_short_block(name: &str) -> bool {
    SHORT_BLOCK_PATTERNS.contains(&name)
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Pattern '{name}' not found at {}", path.display())]
    NotFound { name: String, path: PathBuf },

    #[error("Invalid pattern '{name}': {kind}")]
    Invalid { name: String, kind: InvalidPattern },

    #[error("Failed to read pattern '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl PatternError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PatternError::NotFound { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, PatternError::Invalid { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPattern {
    #[error("pattern must use only `.` and `X`, found {glyph:?} at row {row}, column {col}")]
    Glyph { row: usize, col: usize, glyph: char },

    #[error("row {row} has length {len}, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },

    #[error("pattern must use only `.` and `X`, found a non-UTF-8 byte at row {row}, column {col}")]
    Encoding { row: usize, col: usize },

    #[error("pattern has no cells")]
    Empty,
}

/// An immutable 2D array of dead (0) and alive (1) cells, without a border
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Pattern {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col]
        } else {
            0
        }
    }

    /// Coordinates of live cells, row-major
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == 1)
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }

    pub fn as_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols).map(|row| row.to_vec()).collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for &cell in row {
                write!(f, "{}", if cell == 1 { ALIVE_GLYPH } else { DEAD_GLYPH })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Reads named pattern files from a base directory
#[derive(Debug, Clone)]
pub struct PatternLoader {
    base_dir: PathBuf,
    trim_size: Option<usize>,
}

impl PatternLoader {
    pub fn new<P: Into<PathBuf>>(base_dir: P, trim_size: Option<usize>) -> Self {
        Self {
            base_dir: base_dir.into(),
            trim_size,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.pattern_directory.clone(), settings.trim_size)
    }

    /// Path of the file backing a pattern name
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.{PATTERN_EXTENSION}"))
    }

    /// Load and parse the named pattern
    pub fn load(&self, name: &str) -> Result<Pattern, PatternError> {
        let path = self.resolve(name);
        debug!(pattern = name, path = %path.display(), "loading pattern");

        if !is_valid_pattern_name(name) {
            return Err(PatternError::NotFound {
                name: name.to_string(),
                path,
            });
        }

        let bytes = std::fs::read(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                PatternError::NotFound {
                    name: name.to_string(),
                    path: path.clone(),
                }
            } else {
                PatternError::Io {
                    name: name.to_string(),
                    source,
                }
            }
        })?;

        let content = String::from_utf8(bytes).map_err(|err| {
            let valid = &err.as_bytes()[..err.utf8_error().valid_up_to()];
            // The prefix up to the first bad byte is valid UTF-8 by construction
            let prefix = String::from_utf8_lossy(valid);
            let row = prefix.matches('\n').count();
            let col = prefix.rsplit('\n').next().map_or(0, |line| line.chars().count());
            PatternError::Invalid {
                name: name.to_string(),
                kind: InvalidPattern::Encoding { row, col },
            }
        })?;

        let pattern = self.parse(name, &content)?;
        info!(
            pattern = name,
            rows = pattern.rows(),
            cols = pattern.cols(),
            "pattern loaded"
        );
        Ok(pattern)
    }

    /// Parse pattern text
    ///
    /// Rows wider than the trim size are trimmed symmetrically for
    /// short-block patterns, keeping exactly `trim_size` cells: `(len - trim_size) / 2`
    /// cells come off the front, the rest off the back.
    pub fn parse(&self, name: &str, content: &str) -> Result<Pattern, PatternError> {
        let invalid = |kind| PatternError::Invalid {
            name: name.to_string(),
            kind,
        };
        let trim_to = self.trim_size.filter(|_| is_short_block(name));

        let mut rows: Vec<Vec<u8>> = Vec::new();
        for (row_idx, line) in content.lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (col_idx, glyph) in line.chars().enumerate() {
                match glyph {
                    DEAD_GLYPH => row.push(0),
                    ALIVE_GLYPH => row.push(1),
                    _ => {
                        return Err(invalid(InvalidPattern::Glyph {
                            row: row_idx,
                            col: col_idx,
                            glyph,
                        }))
                    }
                }
            }

            if let Some(width) = trim_to {
                if row.len() > width {
                    let start = (row.len() - width) / 2;
                    debug!(pattern = name, row = row_idx, from = row.len(), to = width, "trimming row");
                    row = row[start..start + width].to_vec();
                }
            }

            rows.push(row);
        }

        let expected = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(invalid(InvalidPattern::Empty)),
        };

        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(invalid(InvalidPattern::Ragged {
                row,
                len: bad.len(),
                expected,
            }));
        }

        Ok(Pattern {
            name: name.to_string(),
            rows: rows.len(),
            cols: expected,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

/// Load a named pattern using the configured directory and trim size
pub fn load_pattern(name: &str, settings: &Settings) -> Result<Pattern, PatternError> {
    PatternLoader::from_settings(settings).load(name)
}

/// Text of the built-in short-block patterns
pub fn builtin_pattern(name: &str) -> Option<&'static str> {
    let text = match name {
        "beacon" => "XX..\nXX..\n..XX\n..XX\n",
        "glider" => ".X.\n..X\nXXX\n",
        "bee_hive" => ".XX.\nX..X\n.XX.\n",
        "blinker" => "...\nXXX\n...\n",
        "block" => "XX\nXX\n",
        "toad" => ".XXX\nXXX.\n",
        "tub" => ".X.\nX.X\n.X.\n",
        _ => return None,
    };
    Some(text)
}

/// Write every built-in pattern into `dir` as `<name>.txt`
///
/// Existing files are kept unless `force` is set. Returns the paths written.
pub fn write_builtin_patterns<P: AsRef<Path>>(dir: P, force: bool) -> anyhow::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let mut written = Vec::with_capacity(SHORT_BLOCK_PATTERNS.len());
    for name in SHORT_BLOCK_PATTERNS {
        if let Some(text) = builtin_pattern(name) {
            let path = dir.join(format!("{name}.{PATTERN_EXTENSION}"));
            if path.exists() && !force {
                debug!(path = %path.display(), "keeping existing pattern file");
                continue;
            }
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written.push(path);
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn loader(trim_size: Option<usize>) -> PatternLoader {
        PatternLoader::new("patterns", trim_size)
    }

    #[test]
    fn test_parse_glyphs() {
        let pattern = loader(None).parse("glider", ".X.\n..X\nXXX\n").unwrap();

        assert_eq!(pattern.rows(), 3);
        assert_eq!(pattern.cols(), 3);
        assert_eq!(
            pattern.as_rows(),
            vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]
        );
        assert_eq!(pattern.living_cells(), vec![(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let pattern = loader(None).parse("block", "XX\r\nXX\r\n").unwrap();
        assert_eq!(pattern.cols(), 2);
        assert_eq!(pattern.living_cells().len(), 4);
    }

    #[test]
    fn test_invalid_glyph() {
        let err = loader(None).parse("glider", ".X.\n.0X\nXXX\n").unwrap_err();
        assert!(err.is_invalid());
        match err {
            PatternError::Invalid { kind, .. } => assert_eq!(
                kind,
                InvalidPattern::Glyph {
                    row: 1,
                    col: 1,
                    glyph: '0'
                }
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lowercase_x_is_invalid() {
        assert!(loader(None).parse("tub", ".x.\nx.x\n.x.\n").unwrap_err().is_invalid());
    }

    #[test]
    fn test_ragged_rows() {
        let err = loader(None).parse("toad", ".XXX\nXXX\n").unwrap_err();
        match err {
            PatternError::Invalid { kind, .. } => assert_eq!(
                kind,
                InvalidPattern::Ragged {
                    row: 1,
                    len: 3,
                    expected: 4
                }
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_pattern() {
        assert!(loader(None).parse("block", "").unwrap_err().is_invalid());
        assert!(loader(None).parse("block", "\n\n").unwrap_err().is_invalid());
    }

    #[test]
    fn test_trim_short_block() {
        let pattern = loader(Some(4))
            .parse("block", "..XX....\n..XX....\n")
            .unwrap();

        assert_eq!(pattern.cols(), 4);
        assert_eq!(pattern.to_string(), "XX..\nXX..\n");
    }

    #[test]
    fn test_trim_odd_difference() {
        let pattern = loader(Some(4)).parse("blinker", ".......\n.XXX...\n.......\n").unwrap();

        assert_eq!(pattern.cols(), 4);
        assert_eq!(pattern.to_string(), "....\nXXX.\n....\n");
    }

    #[test]
    fn test_trim_ignores_other_patterns() {
        let pattern = loader(Some(4)).parse("gosper_gun", "..XX....\n").unwrap();
        assert_eq!(pattern.cols(), 8);
    }

    #[test]
    fn test_trim_leaves_narrow_rows() {
        let pattern = loader(Some(4)).parse("glider", ".X.\n..X\nXXX\n").unwrap();
        assert_eq!(pattern.cols(), 3);
    }

    #[test]
    fn test_load_from_directory() {
        let temp_dir = tempdir().unwrap();
        write_builtin_patterns(temp_dir.path(), false).unwrap();

        let loader = PatternLoader::new(temp_dir.path(), None);
        for name in SHORT_BLOCK_PATTERNS {
            let pattern = loader.load(name).unwrap();
            assert_eq!(pattern.name(), name);
            assert_eq!(Some(pattern.to_string().as_str()), builtin_pattern(name));
        }
    }

    #[test]
    fn test_builtin_patterns_keep_edits_unless_forced() {
        let temp_dir = tempdir().unwrap();
        let glider = temp_dir.path().join("glider.txt");
        std::fs::write(&glider, "XX\nXX\n").unwrap();

        let written = write_builtin_patterns(temp_dir.path(), false).unwrap();
        assert_eq!(written.len(), SHORT_BLOCK_PATTERNS.len() - 1);
        assert!(!written.contains(&glider));
        assert_eq!(std::fs::read_to_string(&glider).unwrap(), "XX\nXX\n");

        let written = write_builtin_patterns(temp_dir.path(), true).unwrap();
        assert_eq!(written.len(), SHORT_BLOCK_PATTERNS.len());
        assert_eq!(
            Some(std::fs::read_to_string(&glider).unwrap().as_str()),
            builtin_pattern("glider")
        );
    }

    #[test]
    fn test_load_non_utf8_pattern() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("glider.txt"), b".X.\n.\xffX\nXXX\n").unwrap();

        let err = PatternLoader::new(temp_dir.path(), None).load("glider").unwrap_err();
        assert!(err.is_invalid());
        match err {
            PatternError::Invalid { kind, .. } => {
                assert_eq!(kind, InvalidPattern::Encoding { row: 1, col: 1 })
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_pattern() {
        let temp_dir = tempdir().unwrap();
        let err = PatternLoader::new(temp_dir.path(), None).load("glider").unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("glider"));
    }

    #[test]
    fn test_load_rejects_path_like_names() {
        let temp_dir = tempdir().unwrap();
        let loader = PatternLoader::new(temp_dir.path().join("patterns"), None);
        std::fs::write(temp_dir.path().join("outside.txt"), "X\n").unwrap();

        assert!(loader.load("../outside").unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_pattern_uses_settings() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(temp_dir.path().join("tub.txt"), "...X.X...\n").unwrap();

        let settings = Settings {
            trim_size: Some(4),
            pattern_directory: temp_dir.path().to_path_buf(),
            ..Settings::default()
        };

        let pattern = load_pattern("tub", &settings).unwrap();
        assert_eq!(pattern.to_string(), ".X.X\n");
    }
}
