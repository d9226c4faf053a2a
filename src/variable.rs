//! `$(section.key)` variable references
//!
//! A reference is resolved against the sections parsed so far, so it can
//! only point at data that appears earlier in the file. One distinct marker
//! is resolved per line.

use crate::error::VariableError;
use crate::section::{Config, DEFAULT_SECTION};
use std::borrow::Cow;

const OPEN: &str = "$(";
const CLOSE: char = ')';

/// Lookup side of variable resolution
pub trait VariableSource {
    /// Returns true if `section` exists
    fn has_section(&self, section: &str) -> bool;

    /// Returns the value stored under `section.key`
    fn lookup(&self, section: &str, key: &str) -> Option<&str>;
}

impl VariableSource for Config {
    fn has_section(&self, section: &str) -> bool {
        self.contains_section(section)
    }

    fn lookup(&self, section: &str, key: &str) -> Option<&str> {
        self.value(section, key)
    }
}

/// The first `$(...)` marker found on a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference<'a> {
    /// The marker exactly as written, `$(` through `)`
    pub marker: &'a str,
    /// Referenced section, `default` when the marker has no dot
    pub section: String,
    /// Referenced key
    pub key: String,
}

impl<'a> VariableReference<'a> {
    /// Finds the first reference on `line`
    ///
    /// Quotes inside the marker are ignored, and the section and key are
    /// trimmed. Returns `Ok(None)` when the line has no `$(`.
    pub fn find(line: &'a str) -> Result<Option<Self>, VariableError> {
        let Some(open) = line.find(OPEN) else {
            return Ok(None);
        };
        let body_start = open + OPEN.len();
        let Some(body_len) = line[body_start..].find(CLOSE) else {
            return Err(VariableError::Unterminated {
                line: line.to_string(),
            });
        };
        let body_end = body_start + body_len;

        let body: String = line[body_start..body_end]
            .chars()
            .filter(|c| !matches!(c, '\'' | '"'))
            .collect();
        let body = body.trim();
        if body.is_empty() {
            return Err(VariableError::Empty {
                line: line.to_string(),
            });
        }

        let (section, key) = match body.split_once('.') {
            Some((section, key)) => (section.trim(), key.trim()),
            None => (DEFAULT_SECTION, body),
        };

        Ok(Some(Self {
            marker: &line[open..=body_end],
            section: section.to_string(),
            key: key.to_string(),
        }))
    }

    /// Returns the referenced value, requiring the section to exist first
    pub fn lookup<'s, S: VariableSource + ?Sized>(
        &self,
        source: &'s S,
        line: &str,
    ) -> Result<&'s str, VariableError> {
        let undefined = || VariableError::Undefined {
            section: self.section.clone(),
            key: self.key.clone(),
            line: line.to_string(),
        };

        if !source.has_section(&self.section) {
            return Err(undefined());
        }
        source
            .lookup(&self.section, &self.key)
            .filter(|value| !value.is_empty())
            .ok_or_else(undefined)
    }
}

/// Substitutes the first variable reference on `line`
///
/// Every occurrence of that same marker is replaced by the resolved value.
/// Lines without a marker are returned borrowed.
pub fn resolve_line<'a, S: VariableSource + ?Sized>(
    source: &S,
    line: &'a str,
) -> Result<Cow<'a, str>, VariableError> {
    let Some(reference) = VariableReference::find(line)? else {
        return Ok(Cow::Borrowed(line));
    };
    let value = reference.lookup(source, line)?;
    Ok(Cow::Owned(line.replace(reference.marker, value)))
}
