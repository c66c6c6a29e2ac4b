//! Pattern selection

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Asks the user which configured pattern to run
pub trait PatternPrompt {
    fn choose_pattern(&mut self, patterns: &[String]) -> Result<String>;
}

/// Always answers with the same pattern, skipping the question
#[derive(Debug, Clone)]
pub struct FixedPattern(pub String);

impl PatternPrompt for FixedPattern {
    fn choose_pattern(&mut self, _patterns: &[String]) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Line-oriented prompt over any reader/writer pair.
///
/// Lists the patterns numbered from 1 and accepts either a number or an
/// exact name. Unknown answers are reported and asked again.
pub struct StdinPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdinPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn pick<'a>(answer: &str, patterns: &'a [String]) -> Option<&'a String> {
        if let Ok(number) = answer.parse::<usize>() {
            return number.checked_sub(1).and_then(|i| patterns.get(i));
        }
        patterns.iter().find(|name| name.as_str() == answer)
    }
}

impl<R: BufRead, W: Write> PatternPrompt for StdinPrompt<R, W> {
    fn choose_pattern(&mut self, patterns: &[String]) -> Result<String> {
        if patterns.is_empty() {
            anyhow::bail!("No patterns are configured");
        }

        writeln!(self.output, "Available patterns:")?;
        for (i, name) in patterns.iter().enumerate() {
            writeln!(self.output, "  {:2}. {}", i + 1, name)?;
        }

        loop {
            write!(self.output, "Choose a pattern [1-{}]: ", patterns.len())?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read pattern choice")?;
            if read == 0 {
                anyhow::bail!("Input ended before a pattern was chosen");
            }

            let answer = line.trim();
            if answer.is_empty() {
                continue;
            }

            match Self::pick(answer, patterns) {
                Some(name) => return Ok(name.clone()),
                None => writeln!(self.output, "Unknown pattern: {}", answer)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn patterns() -> Vec<String> {
        ["glider", "block", "tub"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_choose_by_number() {
        let mut output = Vec::new();
        let mut prompt = StdinPrompt::new(Cursor::new("2\n"), &mut output);
        assert_eq!(prompt.choose_pattern(&patterns()).unwrap(), "block");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains(" 1. glider"));
        assert!(shown.contains(" 3. tub"));
    }

    #[test]
    fn test_choose_by_name_after_retries() {
        let mut output = Vec::new();
        let mut prompt = StdinPrompt::new(Cursor::new("0\nspaceship\n\n tub \n"), &mut output);
        assert_eq!(prompt.choose_pattern(&patterns()).unwrap(), "tub");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Unknown pattern: 0"));
        assert!(shown.contains("Unknown pattern: spaceship"));
    }

    #[test]
    fn test_end_of_input() {
        let mut prompt = StdinPrompt::new(Cursor::new("9\n"), Vec::new());
        assert!(prompt.choose_pattern(&patterns()).is_err());
    }

    #[test]
    fn test_fixed_pattern() {
        let mut prompt = FixedPattern("glider".to_string());
        assert_eq!(prompt.choose_pattern(&[]).unwrap(), "glider");
    }
}
