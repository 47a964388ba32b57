//! Input sanitization for script interpolation.
//!
//! Every operator-supplied value that lands inside a quoted PowerShell
//! literal goes through this module first. Two entry points:
//!
//! - [`sanitize_text`] for free text (greeting prompts, descriptions):
//!   cleans, escapes quotes, and strips shell metacharacters.
//! - [`sanitize_identifier`] for names that become identifiers (customer
//!   codes, domains, targets): cleans, then validates against an allow-list
//!   and refuses rather than repairs.
//!
//! Both share the same cleaning pass: ASCII control characters are removed
//! (tab/LF/CR survive), the text is NFC-normalized, and known Unicode
//! homoglyphs of quoting/metacharacter punctuation are folded to their ASCII
//! forms so they cannot slip past the later checks.
//!
//! `sanitize_text` is idempotent. Single quotes are escaped by padding each
//! run to even length instead of blindly doubling, and NFC runs again after
//! stripping so removals cannot expose a new composition on a second pass.

use crate::error::{DialplanError, Result};
use unicode_normalization::UnicodeNormalization;

/// Characters stripped from free text after homoglyph folding.
///
/// These drive PowerShell expansion/chaining inside double-quoted or bare
/// contexts; removing them entirely is the defense-in-depth layer on top of
/// single-quote embedding.
const STRIPPED_METACHARACTERS: &[char] = &['`', '$', ';', '|', '&', '<', '>'];

/// Allow-list for identifiers: Unicode letters, Unicode digits, and `-_@. `.
fn is_allowed_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '@' | '.' | ' ')
}

/// Fold known Unicode homoglyphs to their canonical ASCII form.
///
/// Covers the quote family, backtick, semicolon, dollar, pipe, ampersand,
/// and angle brackets. Anything not in the table passes through unchanged.
fn fold_homoglyph(c: char) -> char {
    match c {
        // Single-quote lookalikes
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{02BC}'
        | '\u{FF07}' => '\'',
        // Double-quote lookalikes
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{FF02}' => '"',
        // Backtick lookalikes
        '\u{2035}' | '\u{FF40}' => '`',
        // Semicolon lookalikes (incl. the Greek question mark)
        '\u{037E}' | '\u{FF1B}' => ';',
        // Dollar
        '\u{FF04}' => '$',
        // Pipe lookalikes
        '\u{00A6}' | '\u{FF5C}' => '|',
        // Ampersand
        '\u{FF06}' => '&',
        // Angle-bracket lookalikes (incl. guillemets)
        '\u{2039}' | '\u{00AB}' | '\u{FF1C}' => '<',
        '\u{203A}' | '\u{00BB}' | '\u{FF1E}' => '>',
        _ => c,
    }
}

/// Shared cleaning pass: drop control characters (keep tab/LF/CR),
/// NFC-normalize, fold homoglyphs.
fn clean(input: &str) -> String {
    input
        .chars()
        .filter(|&c| !is_dropped_control(c))
        .collect::<String>()
        .nfc()
        .map(fold_homoglyph)
        .collect()
}

/// ASCII control characters 0-31 and 127, except tab, LF, and CR.
fn is_dropped_control(c: char) -> bool {
    c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r')
}

/// Sanitize free text for embedding in a single-quoted script literal.
///
/// Empty input yields an empty string, not an error. The result contains no
/// control characters (other than tab/LF/CR), no shell metacharacters, and
/// only even-length runs of single quotes, which PowerShell reads as escaped
/// quotes inside a single-quoted string.
pub fn sanitize_text(input: &str) -> String {
    let cleaned = clean(input);

    // Strip metacharacters, then renormalize: removing a character can bring
    // a base character and a combining mark together.
    let stripped: String = cleaned
        .chars()
        .filter(|c| !STRIPPED_METACHARACTERS.contains(c))
        .collect::<String>()
        .nfc()
        .collect();

    pad_quote_runs(&stripped)
}

/// Pad each run of single quotes to even length.
///
/// `'` becomes `''`, `''` stays `''`. This is what makes the transform
/// idempotent where a plain doubling pass would not be.
fn pad_quote_runs(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut run = 0usize;

    for c in input.chars() {
        if c == '\'' {
            run += 1;
            out.push(c);
        } else {
            if run % 2 == 1 {
                out.push('\'');
            }
            run = 0;
            out.push(c);
        }
    }
    if run % 2 == 1 {
        out.push('\'');
    }
    out
}

/// Sanitize a value that must be a well-formed identifier.
///
/// Applies the shared cleaning pass, trims surrounding whitespace, and then
/// validates the survivors against the allow-list (Unicode letters, Unicode
/// digits, `-`, `_`, `@`, `.`, space). Unlike [`sanitize_text`] this refuses
/// bad input instead of repairing it: a semicolon in a customer code is an
/// operator mistake, not something to silently delete.
///
/// # Errors
///
/// `DialplanError::Validation` when the cleaned value is empty or still
/// contains disallowed characters.
pub fn sanitize_identifier(input: &str) -> Result<String> {
    let cleaned = clean(input);
    let trimmed = cleaned.trim();

    if trimmed.is_empty() {
        return Err(DialplanError::Validation(
            "identifier is empty or whitespace-only".to_string(),
        ));
    }

    let offending: Vec<char> = trimmed
        .chars()
        .filter(|&c| !is_allowed_identifier_char(c))
        .collect();

    if !offending.is_empty() {
        let shown: String = offending
            .iter()
            .take(5)
            .map(|c| format!("{:?}", c))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(DialplanError::Validation(format!(
            "identifier '{}' contains disallowed characters: {}",
            trimmed, shown
        )));
    }

    Ok(trimmed.to_string())
}
