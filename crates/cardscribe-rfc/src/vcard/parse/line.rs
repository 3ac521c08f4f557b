//! Content line structure: `[group.]name[;param]*:value`.

use super::error::{ParseError, ParseResult};
use crate::vcard::codec::decode_caret;
use crate::vcard::core::{ParamSyntax, VCardParameter, VCardParameters, VersionPolicy};

/// A content line split into its parts, value still wire-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name, case preserved.
    pub name: String,
    pub parameters: VCardParameters,
    /// Raw value, escaping left to the scribe.
    pub value: String,
}

impl RawLine {
    /// Returns whether the name matches, ignoring case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Parses one logical line.
///
/// Parameter tokenizing follows `policy`: 2.1 trims whitespace around `=`
/// and treats quotes literally; 3.0/4.0 split comma lists, strip double
/// quotes and optionally decode RFC 6868 carets. `\;` always yields `;`.
///
/// ## Errors
/// Returns an error if the line has no value delimiter or its group or
/// name is empty or holds characters other than ASCII alphanumerics, `-`
/// and `_`.
pub fn parse_line(
    text: &str,
    line_number: usize,
    policy: &VersionPolicy,
    caret_decoding: bool,
) -> ParseResult<RawLine> {
    let quotes = policy.quotes_parameters();
    let delimiter = find_value_delimiter(text, quotes)
        .ok_or_else(|| ParseError::missing_delimiter(line_number, text))?;
    let (head, value) = (&text[..delimiter], &text[delimiter + 1..]);

    let mut segments = split_parameters(head, quotes).into_iter();
    let name_part = segments.next().unwrap_or_default();

    let (group, name) = match name_part.split_once('.') {
        Some((group, name)) => (Some(group), name),
        None => (None, name_part),
    };
    if let Some(group) = group
        && !is_valid_name(group)
    {
        return Err(ParseError::invalid_name(line_number, name_part));
    }
    if !is_valid_name(name) {
        return Err(ParseError::invalid_name(line_number, name));
    }

    let caret = caret_decoding && policy.caret_encoding;
    let mut parameters = VCardParameters::new();
    for segment in segments {
        parse_parameter(segment, policy.param_syntax, caret, &mut parameters);
    }

    Ok(RawLine {
        group: group.map(str::to_string),
        name: name.to_string(),
        parameters,
        value: value.to_string(),
    })
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// First `:` outside double quotes (quotes only count in 3.0/4.0).
fn find_value_delimiter(line: &str, quotes: bool) -> Option<usize> {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' if quotes => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

/// Splits the name/parameter section on `;` outside quotes and not
/// preceded by a backslash.
fn split_parameters(head: &str, quotes: bool) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut chars = head.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some((_, ';'))) => {
                chars.next();
            }
            '"' if quotes => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                segments.push(&head[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&head[start..]);
    segments
}

fn parse_parameter(
    segment: &str,
    syntax: ParamSyntax,
    caret: bool,
    parameters: &mut VCardParameters,
) {
    let Some((key, value)) = segment.split_once('=') else {
        let flag = segment.trim();
        if !flag.is_empty() {
            parameters.push(VCardParameter::nameless(flag.replace("\\;", ";")));
        }
        return;
    };

    match syntax {
        ParamSyntax::Old => {
            parameters.put(key.trim(), value.trim().replace("\\;", ";"));
        }
        ParamSyntax::New => {
            for item in split_values(value) {
                let item = item.replace("\\;", ";");
                let item = match item.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
                    Some(unquoted) => unquoted.to_string(),
                    None => item,
                };
                let item = if caret { decode_caret(&item) } else { item };
                parameters.put(key, item);
            }
        }
    }
}

/// Splits a 3.0/4.0 parameter value on commas outside double quotes.
fn split_values(value: &str) -> Vec<&str> {
    let mut values = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    values.push(&value[start..]);
    values
}
