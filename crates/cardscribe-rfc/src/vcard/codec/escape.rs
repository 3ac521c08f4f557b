//! Version-aware escaping of property values and parameter values.
//!
//! 2.1 only knows `\;` and `\n`; 3.0 and 4.0 add `\,` and `\\`. Parameter
//! values use RFC 6868 caret encoding where the version and configuration
//! allow it.

use crate::vcard::core::{EscapeSet, ParamSyntax, VersionPolicy, WarningCode, Warnings};

/// Unescapes a property value.
///
/// Unknown backslash sequences are kept as written, backslash included.
#[must_use]
pub fn unescape_text(s: &str, policy: &VersionPolicy) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match (chars.peek().copied(), policy.escapes) {
            (Some('n' | 'N'), _) => {
                chars.next();
                result.push('\n');
            }
            (Some(';'), _) => {
                chars.next();
                result.push(';');
            }
            (Some(next @ (',' | '\\')), EscapeSet::Full) => {
                chars.next();
                result.push(next);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Escapes a property value; the inverse of [`unescape_text`].
///
/// `\r\n` and lone `\r` are written as a single `\n`.
#[must_use]
pub fn escape_text(s: &str, policy: &VersionPolicy) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                result.push_str("\\n");
            }
            ',' if policy.escapes == EscapeSet::Full => result.push_str("\\,"),
            '\\' if policy.escapes == EscapeSet::Full => result.push_str("\\\\"),
            _ => result.push(c),
        }
    }

    result
}

/// Splits on `delimiter` where it is not backslash-escaped.
///
/// Pieces are returned still escaped. Under [`EscapeSet::Minimal`] only `\;`
/// protects the following character.
#[must_use]
pub fn split_unescaped<'a>(s: &'a str, delimiter: char, policy: &VersionPolicy) -> Vec<&'a str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            let escapes_next = match chars.peek() {
                Some((_, ';')) => true,
                Some(_) => policy.escapes == EscapeSet::Full,
                None => false,
            };
            if escapes_next {
                chars.next();
            }
            continue;
        }
        if c == delimiter {
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }

    parts.push(&s[start..]);
    parts
}

/// Splits a structured value (N, ADR, ORG, GENDER) into unescaped components.
///
/// Components split on `;`. When the version allows multi-valued components
/// each one further splits on `,`. An empty component yields an empty list.
#[must_use]
pub fn split_structured(s: &str, policy: &VersionPolicy) -> Vec<Vec<String>> {
    split_unescaped(s, ';', policy)
        .into_iter()
        .map(|component| {
            if component.is_empty() {
                return Vec::new();
            }
            if policy.multi_valued_components {
                split_unescaped(component, ',', policy)
                    .into_iter()
                    .map(|item| unescape_text(item, policy))
                    .collect()
            } else {
                vec![unescape_text(component, policy)]
            }
        })
        .collect()
}

/// Joins structured components; the inverse of [`split_structured`].
///
/// Trailing empty components are kept, so the component count is stable.
#[must_use]
pub fn join_structured<C: AsRef<[String]>>(components: &[C], policy: &VersionPolicy) -> String {
    components
        .iter()
        .map(|component| {
            component
                .as_ref()
                .iter()
                .map(|item| escape_text(item, policy))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join(";")
}

/// Splits a comma-separated text list (CATEGORIES, NICKNAME) and unescapes it.
#[must_use]
pub fn split_list(s: &str, policy: &VersionPolicy) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    split_unescaped(s, ',', policy)
        .into_iter()
        .map(|item| unescape_text(item, policy))
        .collect()
}

/// Escapes and joins a text list; the inverse of [`split_list`].
#[must_use]
pub fn join_list(items: &[String], policy: &VersionPolicy) -> String {
    items
        .iter()
        .map(|item| escape_text(item, policy))
        .collect::<Vec<_>>()
        .join(",")
}

/// Decodes RFC 6868 caret escapes: `^^`, `^n` and `^'`.
///
/// Any other caret sequence is kept literally.
#[must_use]
pub fn decode_caret(s: &str) -> String {
    if !s.contains('^') {
        return s.to_string();
    }
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '^' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('^') => {
                chars.next();
                result.push('^');
            }
            Some('n') => {
                chars.next();
                result.push('\n');
            }
            Some('\'') => {
                chars.next();
                result.push('"');
            }
            _ => result.push(c),
        }
    }

    result
}

/// Prepares a parameter value for the wire.
///
/// For 3.0/4.0 the result is double-quoted when it contains `;`, `,` or `:`.
/// Characters the target cannot carry are replaced or dropped with a
/// [`WarningCode::ValueAltered`] warning.
pub fn encode_param_value(
    value: &str,
    policy: &VersionPolicy,
    caret_encoding: bool,
    warnings: &mut Warnings,
) -> String {
    let mut result = String::with_capacity(value.len());
    let mut altered = Vec::new();
    let mut chars = value.chars().peekable();

    match policy.param_syntax {
        ParamSyntax::Old => {
            while let Some(c) = chars.next() {
                match c {
                    ';' => result.push_str("\\;"),
                    ':' => altered.push("':' removed"),
                    '\r' | '\n' => altered.push("newline removed"),
                    _ => result.push(c),
                }
            }
        }
        ParamSyntax::New => {
            let caret = caret_encoding && policy.caret_encoding;
            let mut needs_quotes = false;
            while let Some(c) = chars.next() {
                let c = if c == '\r' {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    '\n'
                } else {
                    c
                };
                match c {
                    '^' if caret => result.push_str("^^"),
                    '\n' if caret => result.push_str("^n"),
                    '"' if caret => result.push_str("^'"),
                    '\n' => {
                        altered.push("newline replaced with a space");
                        result.push(' ');
                    }
                    '"' => {
                        altered.push("'\"' replaced with '\\''");
                        result.push('\'');
                    }
                    ';' | ',' | ':' => {
                        needs_quotes = true;
                        result.push(c);
                    }
                    _ => result.push(c),
                }
            }
            if needs_quotes {
                result.insert(0, '"');
                result.push('"');
            }
        }
    }

    if !altered.is_empty() {
        altered.dedup();
        warnings.warn(
            WarningCode::ValueAltered,
            format!(
                "parameter value altered for vCard {}: {}",
                policy.version,
                altered.join(", ")
            ),
        );
    }
    result
}

#[cfg(test)]
#[path = "escape_tests.rs"]
mod tests;
