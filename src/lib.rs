//! # Conf Toolkit
//!
//! Readers for the small configuration dialects found around operations
//! scripts: column lists, character-separated rows, INI-style sectioned files
//! with `$(section.key)` variables, and brace-delimited block files.
//!
//! ## Overview
//!
//! Every reader makes a single pass over its input and returns fully
//! materialized data. Comments start at `#` and run to the end of the line.
//! Nothing is cached and no state survives between reads.
//!
//! | Reader      | Output          | Default separator |
//! |-------------|-----------------|-------------------|
//! | [`Column`]  | `Vec<String>`   |                   |
//! | [`Columns`] | `Vec<Row>`      | `,`               |
//! | [`Slurp`]   | `String`        |                   |
//! | [`Ini`]     | [`Config`]      | `=`               |
//! | [`Block`]   | [`Config`]      | `=`               |
//!
//! ## INI Files
//!
//! ```rust
//! use conf_toolkit::{ConfigReader, Ini};
//!
//! let text = r#"
//! # Admin user account
//! username = 'alice'
//!
//! ['vcenters']
//!   haha.joedog.org
//!   papa.joedog.org   # primary
//!
//! [commands]
//!   greet = echo Hello $(username)
//! "#;
//!
//! let config = Ini::new().parse_str(text)?;
//! assert_eq!(config.value("default", "username"), Some("alice"));
//! assert_eq!(config.list("vcenters").unwrap().len(), 2);
//! assert_eq!(config.value("commands", "greet"), Some("echo Hello alice"));
//! # Ok::<(), conf_toolkit::ConfigError>(())
//! ```
//!
//! ## Block Files
//!
//! ```rust
//! use conf_toolkit::{Block, ConfigReader};
//!
//! let text = "verbose = true\nhost1.example.org {\n  cmd1 = echo hi\n}\n";
//! let config = Block::new().parse_str(text)?;
//! assert_eq!(config.value("host1.example.org", "cmd1"), Some("echo hi"));
//! # Ok::<(), conf_toolkit::ConfigError>(())
//! ```
//!
//! ## Error Handling
//!
//! A `$(...)` reference that is unterminated, empty, or points at something
//! not defined above it aborts the read:
//!
//! ```rust
//! use conf_toolkit::{ConfigError, ConfigReader, Ini, VariableError};
//!
//! match Ini::new().parse_str("path = $(later.dir)\n[later]\ndir = /tmp\n") {
//!     Err(ConfigError::MalformedVariable { line_number, source }) => {
//!         assert_eq!(line_number, 1);
//!         assert!(matches!(source, VariableError::Undefined { .. }));
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

pub mod block;
pub mod column;
pub mod error;
pub mod ini;
pub mod line;
pub mod password;
pub mod reader;
pub mod section;
pub mod slurp;
pub mod variable;


// Re-export main types
pub use block::Block;
pub use column::{Column, Columns, Row};
pub use error::{ConfigError, ConfigResult, VariableError};
pub use ini::Ini;
pub use password::{ObfuscatedPassword, PasswordDecoder};
pub use reader::ConfigReader;
pub use section::{Config, DEFAULT_SECTION, Section, SectionMap};
pub use slurp::Slurp;
pub use variable::{VariableReference, VariableSource, resolve_line};

use std::path::Path;

/// Reads a file holding one value per line
pub fn read_column<P: AsRef<Path>>(path: P) -> ConfigResult<Vec<String>> {
    Column::new().read(path)
}

/// Reads a file of rows split on `separator`
pub fn read_columns<P: AsRef<Path>>(path: P, separator: char) -> ConfigResult<Vec<Row>> {
    Columns::new().with_separator(separator).read(path)
}

/// Reads a whole file verbatim
pub fn read_all<P: AsRef<Path>>(path: P) -> ConfigResult<String> {
    Slurp::new().read(path)
}

/// Reads an INI-style file with entries split on `separator`
pub fn read_ini<P: AsRef<Path>>(path: P, separator: char) -> ConfigResult<Config> {
    Ini::new().with_separator(separator).read(path)
}

/// Reads a block file with assignments split on `separator`
pub fn read_block<P: AsRef<Path>>(path: P, separator: char) -> ConfigResult<Config> {
    Block::new().with_separator(separator).read(path)
}

/// Returns true if `path` exists
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}
