//! Parses the text inside a placeholder into a value key and a transform chain.
//!
//! Grammar, informally: `key [, name(arg, ...)]*`. Parsing is character by
//! character and lenient; the only rejected input is a `)` with no call open.

use super::error::TemplateError;

/// One transform invocation, e.g. `number(de-DE)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformCall {
    pub name: String,
    pub arguments: Vec<String>,
}

/// Parsed placeholder: which value to read and how to transform it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementInfo {
    /// Empty when the placeholder names no value; such spans are left as text.
    pub key: String,
    /// Applied left to right.
    pub replacement_functions: Vec<TransformCall>,
}

/// Parses placeholder text (without the braces).
///
/// - The first comma-separated token is the key.
/// - `name(a, b)` appends a transform call; arguments are trimmed and empty
///   ones dropped.
/// - Spaces outside argument lists are ignored.
/// - Without any transform call, the whole trimmed text is the key.
///
/// # Errors
/// [`TemplateError::UnexpectedCloseParen`] when `)` appears outside a call.
///
/// # Examples
/// ```
/// use interp_i18n::template::parse_placeholder;
///
/// let info = parse_placeholder("amount, currency(de-DE, USD)").unwrap();
/// assert_eq!(info.key, "amount");
/// assert_eq!(info.replacement_functions[0].name, "currency");
/// assert_eq!(info.replacement_functions[0].arguments, ["de-DE", "USD"]);
/// ```
pub fn parse_placeholder(text: &str) -> Result<ReplacementInfo, TemplateError> {
    let mut key = String::new();
    let mut replacement_functions = Vec::new();

    let mut buffer = String::new();
    let mut arguments = Vec::new();
    // `None` also covers a `(` preceded by nothing, which opens no call.
    let mut open_call: Option<String> = None;

    for (offset, c) in text.chars().enumerate() {
        match (c, open_call.is_some()) {
            (',', false) => {
                // Later bare tokens keep accumulating and are only used when no call follows.
                if !buffer.is_empty() && key.is_empty() {
                    key = buffer.trim().to_string();
                    buffer.clear();
                }
            }
            (',', true) => {
                if !buffer.is_empty() {
                    arguments.push(buffer.trim().to_string());
                }
                buffer.clear();
            }
            (' ', false) => {}
            ('(', false) => {
                let name = buffer.trim();
                open_call = (!name.is_empty()).then(|| name.to_string());
                buffer.clear();
            }
            (')', false) => {
                return Err(TemplateError::UnexpectedCloseParen {
                    placeholder: text.to_string(),
                    offset,
                });
            }
            (')', true) => {
                let last = buffer.trim();
                if !last.is_empty() {
                    arguments.push(last.to_string());
                }
                if let Some(name) = open_call.take() {
                    replacement_functions
                        .push(TransformCall { name, arguments: std::mem::take(&mut arguments) });
                }
                buffer.clear();
            }
            _ => buffer.push(c),
        }
    }

    if replacement_functions.is_empty() && key.is_empty() {
        key = buffer.trim().to_string();
    }

    Ok(ReplacementInfo { key, replacement_functions })
}
