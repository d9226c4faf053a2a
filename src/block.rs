//! Brace-delimited block files
//!
//! ```text
//! verbose = true
//! debug   = false
//!
//! labas001.joedog.org {
//!   cmd1 = service puppet stop
//!   cmd2 = service puppet start
//! }
//!
//! mirrors {
//!   ftp.example.org
//!   www.example.org
//! }
//! ```
//!
//! Assignments outside any block land in the `default` mapping. Inside a
//! block, assignments build a mapping and bare lines build a list.

use crate::error::ConfigResult;
use crate::line::{COMMENT, normalize};
use crate::reader::{ConfigReader, numbered_lines};
use crate::section::{Config, DEFAULT_SECTION, Section};
use std::io::BufRead;
use tracing::{debug, trace};

const OPEN: char = '{';
const CLOSE: char = '}';

/// Reader for brace-delimited block files
///
/// Text on the same line as `{` or `}` belongs to that block, so
/// `host { cmd = uptime }` is a complete one-line block. Older block readers
/// closed the block before looking at such text and filed it under
/// `default`; this reader deliberately keeps it inside the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    separator: char,
}

impl Block {
    /// Separator used when none is configured
    pub const DEFAULT_SEPARATOR: char = '=';

    /// Creates a reader splitting assignments on `=`
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key/value separator
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Returns the key/value separator
    pub fn separator(&self) -> char {
        self.separator
    }

    fn entry(&self, config: &mut Config, block: Option<&str>, body: &str) {
        let assignment = body.split_once(self.separator);
        match (block, assignment) {
            (Some(block), Some((key, value))) => config
                .section_mut_or_insert_with(block, Section::map)
                .insert(key.trim().to_string(), value.trim().to_string(), body),
            (Some(block), None) => config
                .section_mut_or_insert_with(block, Section::list)
                .push(body.to_string()),
            (None, Some((key, value))) => config
                .section_mut_or_insert_with(DEFAULT_SECTION, Section::map)
                .insert(key.trim().to_string(), value.trim().to_string(), body),
            (None, None) => trace!(line = body, "Ignoring bare line outside a block"),
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self {
            separator: Self::DEFAULT_SEPARATOR,
        }
    }
}

impl ConfigReader for Block {
    type Output = Config;

    fn name(&self) -> &'static str {
        "block"
    }

    fn from_reader<R: BufRead>(&self, reader: R) -> ConfigResult<Config> {
        let mut config = Config::new();
        let mut current: Option<String> = None;

        for (line_number, line) in numbered_lines(reader) {
            let line = line?;
            if line.trim_start().starts_with(COMMENT) {
                continue;
            }
            let mut rest = normalize(&line);

            if let Some(open) = rest.find(OPEN) {
                let name = rest[..open].trim().to_string();
                trace!(block = %name, line_number, "Opening block");
                current = Some(name);
                rest = rest[open + OPEN.len_utf8()..].trim();
            }

            let close = rest.find(CLOSE);
            let body = match close {
                Some(close) => rest[..close].trim(),
                None => rest,
            };
            if !body.is_empty() {
                self.entry(&mut config, current.as_deref(), body);
            }

            if close.is_some() {
                trace!(line_number, "Closing block");
                current = None;
            }
        }

        debug!(blocks = config.len(), "Parsed block config");
        Ok(config)
    }
}
