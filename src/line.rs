//! Line normalization and quote stripping shared by every reader

/// Marker that starts a comment
pub const COMMENT: char = '#';

/// Normalizes a raw line
///
/// Removes the trailing line terminator, truncates at the first `#` and trims
/// surrounding whitespace. Comment removal is not quote-aware, so a `#` inside
/// a quoted value still ends the line.
pub fn normalize(raw: &str) -> &str {
    let line = raw.trim_end_matches(['\n', '\r']);
    strip_comment(line).trim()
}

/// Returns the part of `line` before the first `#`
pub fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT) {
        Some(at) => &line[..at],
        None => line,
    }
}

/// Returns true if a normalized line starts with `#` or `;`
pub fn is_comment(line: &str) -> bool {
    matches!(line.trim_start().chars().next(), Some('#' | ';'))
}

/// Removes one matching pair of enclosing quotes
///
/// A `'...'` pair is tried first; if what remains is `"..."` that pair goes
/// too. Tokens that are not symmetrically quoted come back unchanged.
pub fn dequote(token: &str) -> &str {
    match strip_pair(token, '\'') {
        Some(inner) => strip_pair(inner, '"').unwrap_or(inner),
        None => strip_pair(token, '"').unwrap_or(token),
    }
}

fn strip_pair(token: &str, quote: char) -> Option<&str> {
    token.strip_prefix(quote)?.strip_suffix(quote)
}
