//! INI-style sectioned files
//!
//! ```text
//! # Admin user account
//! username = 'alice'
//! password = PASSWORD('0KOacbUxehNxkRa8JKUrCQ')
//!
//! ['vcenters']
//!   haha.joedog.org
//!   papa.joedog.org   # primary
//!
//! ['pirates': the 2020 roster]
//!   pitcher = Joe Musgrove
//!   catcher = Jacob Stallings
//!
//! [commands]
//!   greet = echo Hello $(username)
//! ```
//!
//! Lines before the first header belong to the `default` section, which
//! always exists. A section whose first entry contains the separator becomes
//! a key/value mapping; otherwise it becomes a list. `$(section.key)`
//! references are substituted before a line is classified and may only refer
//! to keys defined above them.

use crate::error::{ConfigError, ConfigResult};
use crate::line::{dequote, is_comment, normalize};
use crate::reader::{ConfigReader, numbered_lines};
use crate::section::{Config, DEFAULT_SECTION, Section};
use crate::variable::resolve_line;
use regex::Regex;
use std::io::BufRead;
use std::sync::LazyLock;
use tracing::{debug, trace};

// A `[header]` with a non-empty interior, or any line not starting with '='
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]+)\]$|^[^=].*$").expect("line pattern is a valid regex")
});

/// Reader for INI-style files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ini {
    separator: char,
}

impl Ini {
    /// Separator used when none is configured
    pub const DEFAULT_SEPARATOR: char = '=';

    /// Creates a reader splitting entries on `=`
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
}

impl Default for Ini {
    fn default() -> Self {
        Self {
            separator: Self::DEFAULT_SEPARATOR,
        }
    }
}

impl ConfigReader for Ini {
    type Output = Config;

    fn name(&self) -> &'static str {
        "ini"
    }

    fn from_reader<R: BufRead>(&self, reader: R) -> ConfigResult<Config> {
        let mut state = IniState::new(self.separator);
        for (line_number, line) in numbered_lines(reader) {
            state.feed(line_number, &line?)?;
        }
        let config = state.finish();
        debug!(sections = config.len(), "Parsed INI config");
        Ok(config)
    }
}

/// How a normalized line is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    /// `[interior]`
    Header(&'a str),
    /// `key SEP value` or a bare list entry
    Entry,
}

fn classify(line: &str) -> Option<LineKind<'_>> {
    let captures = LINE_PATTERN.captures(line)?;
    match captures.get(1) {
        Some(interior) => Some(LineKind::Header(interior.as_str())),
        None => Some(LineKind::Entry),
    }
}

/// Extracts the section name from a header interior
///
/// `'name': descriptor` and `'name: descriptor'` both yield `name`.
fn section_name(interior: &str) -> &str {
    let name = dequote(interior.trim());
    let name = match name.find(':') {
        Some(colon) => &name[..colon],
        None => name,
    };
    dequote(name.trim())
}

/// Single-pass state: the current section and the result built so far
struct IniState {
    separator: char,
    current_section: String,
    config: Config,
}

impl IniState {
    fn new(separator: char) -> Self {
        Self {
            separator,
            current_section: DEFAULT_SECTION.to_string(),
            config: Config::with_default_section(),
        }
    }

    fn feed(&mut self, line_number: usize, raw: &str) -> ConfigResult<()> {
        let line = normalize(raw);
        if line.is_empty() {
            return Ok(());
        }

        let line = resolve_line(&self.config, line)
            .map_err(|source| ConfigError::MalformedVariable {
                line_number,
                source,
            })?;
        if is_comment(&line) {
            return Ok(());
        }

        match classify(&line) {
            Some(LineKind::Header(interior)) => {
                self.current_section = section_name(interior).to_string();
                trace!(section = %self.current_section, line_number, "Entering section");
            }
            Some(LineKind::Entry) => self.entry(&line),
            None => trace!(line_number, "Skipping unrecognized line"),
        }
        Ok(())
    }

    fn entry(&mut self, line: &str) {
        match line.split_once(self.separator) {
            Some((key, value)) => {
                let key = dequote(key.trim()).to_string();
                let value = dequote(value.trim()).to_string();
                self.config
                    .section_mut_or_insert_with(&self.current_section, Section::map)
                    .insert(key, value, line);
            }
            None => {
                self.config
                    .section_mut_or_insert_with(&self.current_section, Section::list)
                    .push(line.trim().to_string());
            }
        }
    }

    fn finish(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VariableError;

    fn parse(input: &str) -> Config {
        Ini::new().parse_str(input).unwrap()
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("[name]"), Some(LineKind::Header("name")));
        assert_eq!(classify("['name': text]"), Some(LineKind::Header("'name': text")));
        assert_eq!(classify("key = value"), Some(LineKind::Entry));
        assert_eq!(classify("[]"), Some(LineKind::Entry));
        assert_eq!(classify("[a]b]"), Some(LineKind::Entry));
        assert_eq!(classify("= value"), None);
    }

    #[test]
    fn test_section_name() {
        assert_eq!(section_name("vcenters"), "vcenters");
        assert_eq!(section_name("'vcenters'"), "vcenters");
        assert_eq!(section_name("\"pirates\""), "pirates");
        assert_eq!(section_name("'pirates': 2020 roster"), "pirates");
        assert_eq!(section_name("'pirates: 2020 roster'"), "pirates");
        assert_eq!(section_name(" web : front end "), "web");
    }

    #[test]
    fn test_default_section_always_present() {
        let config = parse("");
        assert_eq!(config.len(), 1);
        assert_eq!(config.default_section(), Some(&Section::map()));

        let config = parse("[only]\na = b\n");
        assert!(config.default_section().unwrap().is_empty());
    }

    #[test]
    fn test_unsectioned_key_values() {
        let config = parse("username = 'alice'\nhome = \"/home/alice\"\nshell=/bin/sh\n");
        let default = config.default_section().unwrap().as_map().unwrap();
        assert_eq!(default.len(), 3);
        assert_eq!(default["username"], "alice");
        assert_eq!(default["home"], "/home/alice");
        assert_eq!(default["shell"], "/bin/sh");
    }

    #[test]
    fn test_list_section() {
        let config = parse("['hosts']\n  a.example.org\n  b.example.org  # backup\n\n  c.example.org\n");
        assert_eq!(
            config.list("hosts").unwrap(),
            ["a.example.org", "b.example.org", "c.example.org"]
        );
    }

    #[test]
    fn test_split_on_first_separator_only() {
        let config = parse("url = http://h/?a=b&c=d\n");
        assert_eq!(config.value("default", "url"), Some("http://h/?a=b&c=d"));
    }

    #[test]
    fn test_custom_separator() {
        let config = Ini::new()
            .with_separator(':')
            .parse_str("[db]\nhost: localhost\nport : 5432\n")
            .unwrap();
        assert_eq!(config.value("db", "host"), Some("localhost"));
        assert_eq!(config.value("db", "port"), Some("5432"));
    }

    #[test]
    fn test_headers_switch_lazily() {
        let config = parse("[empty]\n[used]\nx\n");
        assert!(!config.contains_section("empty"));
        assert_eq!(config.list("used").unwrap(), ["x"]);
    }

    #[test]
    fn test_reopened_section_keeps_entries() {
        let config = parse("[a]\nk1 = 1\n[b]\nx\n[a]\nk2 = 2\n");
        assert_eq!(config.value("a", "k1"), Some("1"));
        assert_eq!(config.value("a", "k2"), Some("2"));
        assert_eq!(config.sections().collect::<Vec<_>>(), ["default", "a", "b"]);
    }

    #[test]
    fn test_semicolon_comment_lines_are_skipped() {
        let config = parse("; legacy comment\nkey = a;b\n");
        assert_eq!(config.default_section().unwrap().len(), 1);
        assert_eq!(config.value("default", "key"), Some("a;b"));
    }

    #[test]
    fn test_substituted_semicolon_line_is_skipped() {
        let config = parse("sep = ;\n$(sep) not a comment\n");
        let default = config.default_section().unwrap();
        assert_eq!(default.len(), 1);
        assert_eq!(default.get("sep"), Some(";"));
    }

    #[test]
    fn test_semicolon_line_with_unterminated_marker_fails() {
        let err = Ini::new().parse_str("; see $(nothing\n").unwrap_err();
        assert_eq!(err.line_number(), Some(1));
        assert!(matches!(
            err.variable_error(),
            Some(VariableError::Unterminated { .. })
        ));
    }

    #[test]
    fn test_line_starting_with_equals_is_skipped() {
        let config = parse("= orphan\nkey = value\n");
        assert_eq!(config.default_section().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_value() {
        let config = parse("key =\nother = ''\n");
        assert_eq!(config.value("default", "key"), Some(""));
        assert_eq!(config.value("default", "other"), Some(""));
    }

    #[test]
    fn test_mixed_kinds_are_coerced() {
        let config = parse("[list]\nalpha\nk = v\n[map]\nk = v\nstray\n");
        assert_eq!(config.list("list").unwrap(), ["alpha", "k = v"]);
        assert_eq!(config.value("map", "k"), Some("v"));
        assert_eq!(config.value("map", "stray"), Some(""));
    }

    #[test]
    fn test_variable_substitution() {
        let config = parse("username = 'alice'\ngreeting = Hello $(username)\n");
        assert_eq!(config.value("default", "greeting"), Some("Hello alice"));
    }

    #[test]
    fn test_variable_into_header() {
        let config = parse("env = prod\n[$(env)]\nhost = db1\n");
        assert_eq!(config.value("prod", "host"), Some("db1"));
    }

    #[test]
    fn test_forward_reference_fails() {
        let err = Ini::new()
            .parse_str("a = $(later.key)\n[later]\nkey = v\n")
            .unwrap_err();
        assert_eq!(err.line_number(), Some(1));
        assert!(matches!(
            err.variable_error(),
            Some(VariableError::Undefined { section, key, .. }) if section == "later" && key == "key"
        ));
    }

    #[test]
    fn test_unterminated_marker_fails() {
        let err = Ini::new().parse_str("ok = 1\n\nbad = $(foo\n").unwrap_err();
        assert!(err.is_malformed_variable());
        assert_eq!(err.line_number(), Some(3));
        assert_eq!(err.variable_error().unwrap().line(), "bad = $(foo");
    }

    #[test]
    fn test_marker_inside_comment_is_ignored() {
        let config = parse("key = value # see $(nothing\n");
        assert_eq!(config.value("default", "key"), Some("value"));
    }

    #[test]
    fn test_password_marker_passes_through() {
        let config = parse("password = PASSWORD('0KOacbUxehNxkRa8JKUrCQCJ6CqTBvuzXSpqzzPYu+')\n");
        assert_eq!(
            config.value("default", "password"),
            Some("PASSWORD('0KOacbUxehNxkRa8JKUrCQCJ6CqTBvuzXSpqzzPYu+')")
        );
    }
}
