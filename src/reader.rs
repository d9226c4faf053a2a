//! The interface shared by every reader
//!
//! A reader consumes a buffered source in one pass and returns fully
//! materialized data. File handles live only for the duration of [`read`].
//!
//! [`read`]: ConfigReader::read

use crate::error::{ConfigError, ConfigResult};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// A one-pass configuration reader
pub trait ConfigReader {
    /// What a successful read produces
    type Output;

    /// Short name used in log events
    fn name(&self) -> &'static str;

    /// Reads everything from `reader`
    fn from_reader<R: BufRead>(&self, reader: R) -> ConfigResult<Self::Output>;

    /// Reads from an in-memory string
    fn parse_str(&self, input: &str) -> ConfigResult<Self::Output> {
        self.from_reader(input.as_bytes())
    }

    /// Opens `path` and reads it
    ///
    /// The file is closed before this returns, on success and on error.
    fn read<P: AsRef<Path>>(&self, path: P) -> ConfigResult<Self::Output> {
        let path = path.as_ref();
        debug!(reader = self.name(), path = %path.display(), "Reading config file");

        let result = File::open(path)
            .map_err(ConfigError::from)
            .and_then(|file| self.from_reader(BufReader::new(file)))
            .map_err(|e| e.with_path(path));

        if let Err(e) = &result {
            warn!(reader = self.name(), path = %path.display(), error = %e, "Config read failed");
        }
        result
    }

    /// Returns true if `path` exists
    fn exists<P: AsRef<Path>>(path: P) -> bool
    where
        Self: Sized,
    {
        path.as_ref().exists()
    }
}

/// Iterates over the lines of `reader` with 1-based line numbers
pub(crate) fn numbered_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = (usize, std::io::Result<String>)> {
    reader.lines().enumerate().map(|(i, line)| (i + 1, line))
}
