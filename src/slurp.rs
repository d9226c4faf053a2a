//! Whole-file reads

use crate::error::ConfigResult;
use crate::reader::ConfigReader;
use std::io::{BufRead, Read};
use tracing::debug;

/// Reads a file verbatim, comments and whitespace included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slurp;

impl Slurp {
    /// Creates a whole-file reader
    pub fn new() -> Self {
        Self
    }
}

impl ConfigReader for Slurp {
    type Output = String;

    fn name(&self) -> &'static str {
        "slurp"
    }

    fn from_reader<R: BufRead>(&self, mut reader: R) -> ConfigResult<String> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        debug!(bytes = content.len(), "Read whole file");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_is_unmodified() {
        let input = "# comment\n  key = value  \n\n";
        assert_eq!(Slurp::new().parse_str(input).unwrap(), input);
    }
}
