//! Identifier and number transforms backing the template filter set.
//!
//! Everything here is pure and does no I/O. The runtime type checking that
//! guards these transforms when they are called from a template lives at the
//! helper boundary in [`crate::context`].

/// Delimiter style for [`unicode_escape`] literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeStyle {
    /// Brace-delimited scalar escape as used by Swift and Rust: `\u{E001}`.
    #[default]
    Braced,
    /// Bare escape as used by Java and JavaScript: `\uE001`.
    Bare,
}

/// Convert a snake_case name to CamelCase.
///
/// A run of leading underscores is preserved verbatim; the remainder is split
/// on `_` and each component titlecased. `"icon_name"` becomes `"IconName"`,
/// `"__a_b"` becomes `"__AB"`.
pub fn snake_to_camel_case(s: &str) -> String {
    let underscores = s.chars().take_while(|&c| c == '_').count();
    let (prefix, rest) = s.split_at(underscores);
    let camel: String = rest.split('_').map(titlecase).collect();
    format!("{prefix}{camel}")
}

/// Uppercase only the first scalar, leaving the rest untouched.
///
/// Unlike full capitalization this never lowercases the tail, so
/// `"uRL"` becomes `"URL"` rather than `"Url"`.
pub fn titlecase(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the leading uppercase run of a name.
///
/// If the run is two or more letters and does not span the whole string, its
/// last letter is kept uppercase so acronym prefixes stay readable:
/// `"URLChooser"` gives `"urlChooser"`, `"PeoplePicker"` gives
/// `"peoplePicker"`. A string with no leading uppercase run is returned
/// unchanged, and an all-uppercase string is lowercased entirely.
pub fn lower_first_word(s: &str) -> String {
    let scalars: Vec<char> = s.chars().collect();
    let mut run = 0;
    while run < scalars.len() && scalars[run].is_uppercase() {
        run += 1;
    }
    if run >= 2 && run < scalars.len() {
        run -= 1;
    }

    let mut out = String::with_capacity(s.len());
    out.extend(scalars[..run].iter().flat_map(|c| c.to_lowercase()));
    out.extend(&scalars[run..]);
    out
}

/// Rewrite a string so it is safe to emit as a bare identifier.
///
/// Any scalar that is not alphanumeric or `_` is replaced with `_`, and a
/// leading digit is escaped by prefixing an underscore.
pub fn string_to_valid_identifier(s: &str) -> String {
    let mut out: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Wrap hex codepoint text as a unicode scalar escape literal.
///
/// Backslashes in the input are stripped first, so already-escaped input
/// does not double up: `"E001"` and `"\\E001"` both give `"\u{E001}"` in the
/// braced style.
pub fn unicode_escape(s: &str, style: EscapeStyle) -> String {
    let cleaned: String = s.chars().filter(|&c| c != '\\').collect();
    match style {
        EscapeStyle::Braced => format!("\\u{{{cleaned}}}"),
        EscapeStyle::Bare => format!("\\u{cleaned}"),
    }
}

/// Join strings with `", "`.
pub fn join_strings<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse hexadecimal text to an integer, `None` on non-hex input.
pub fn hex_to_int(s: &str) -> Option<u32> {
    u32::from_str_radix(s, 16).ok()
}

/// Render a scalar as uppercase hex with no `0x` prefix, the canonical
/// codepoint text used throughout the pipeline.
pub fn to_codepoint_hex(scalar: u32) -> String {
    format!("{scalar:X}")
}

/// Map an integer color channel in `0..=255` to a unit float.
pub fn int255_to_unit_float(n: i64) -> f64 {
    n as f64 / 255.0
}

/// Map a unit float to a percentage string, truncating toward zero.
pub fn to_percent_string(f: f64) -> String {
    format!("{}%", (f * 100.0) as i64)
}
