//! Obfuscated password values
//!
//! A value written as `PASSWORD('...')` carries cipher text produced by an
//! external tool. The readers pass it through untouched; decoding happens
//! only when a caller supplies a [`PasswordDecoder`].

const PREFIX: &str = "PASSWORD(";
const SUFFIX: &str = ")";

/// A value wrapped in the `PASSWORD('...')` marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObfuscatedPassword<'a> {
    ciphertext: &'a str,
}

impl<'a> ObfuscatedPassword<'a> {
    /// Recognizes `PASSWORD('...')` or `PASSWORD("...")`
    pub fn parse(value: &'a str) -> Option<Self> {
        let inner = value.trim().strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
        let inner = inner.trim();
        let ciphertext = ['\'', '"']
            .into_iter()
            .find_map(|quote| inner.strip_prefix(quote)?.strip_suffix(quote))?;
        Some(Self { ciphertext })
    }

    /// The cipher text between the quotes
    pub fn ciphertext(&self) -> &'a str {
        self.ciphertext
    }

    /// Decodes the cipher text
    pub fn reveal(&self, decoder: &dyn PasswordDecoder) -> Option<String> {
        decoder.decode(self.ciphertext)
    }
}

/// Returns true if `value` carries the password marker
pub fn is_obfuscated(value: &str) -> bool {
    ObfuscatedPassword::parse(value).is_some()
}

/// Decodes cipher text found inside a `PASSWORD('...')` marker
pub trait PasswordDecoder {
    /// Returns the plain text, or `None` if the cipher text is not valid
    fn decode(&self, ciphertext: &str) -> Option<String>;
}

impl<F> PasswordDecoder for F
where
    F: Fn(&str) -> Option<String>,
{
    fn decode(&self, ciphertext: &str) -> Option<String> {
        self(ciphertext)
    }
}
