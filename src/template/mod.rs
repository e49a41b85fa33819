//! Placeholder expansion.
//!
//! A template such as `"{count, number(de-DE)} items"` is scanned for
//! `{...}` spans, each span is parsed into a value key and a transform
//! chain, and the value (from the flattened substitution map) is piped
//! through the chain.

mod error;
mod parser;
mod scanner;
mod transforms;

use std::collections::HashMap;

pub use error::TemplateError;
pub use parser::{
    ReplacementInfo,
    TransformCall,
    parse_placeholder,
};
pub use scanner::{
    BraceSpan,
    scan_spans,
};
pub use transforms::{
    Transform,
    TransformRegistry,
    apply_transform,
};

use crate::values::{
    Values,
    flatten_values,
};

/// A placeholder that names a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSpan {
    pub span: BraceSpan,
    pub info: ReplacementInfo,
}

/// Finds and parses all placeholders in `template`.
///
/// Spans whose key is empty are not placeholders and are omitted.
///
/// # Errors
/// Fails on the first span containing a stray `)`, even if that span would
/// otherwise be dropped.
pub fn collect_placeholders(template: &str) -> Result<Vec<PlaceholderSpan>, TemplateError> {
    let mut placeholders = Vec::new();
    for span in scan_spans(template) {
        let info = parse_placeholder(span.inner(template))?;
        if !info.key.is_empty() {
            placeholders.push(PlaceholderSpan { span, info });
        }
    }
    Ok(placeholders)
}

/// Expands `template` using caller values.
///
/// # Errors
/// [`TemplateError`] when a placeholder is malformed.
///
/// # Examples
/// ```
/// use interp_i18n::template::expand;
/// use interp_i18n::values::Values;
///
/// let mut values = Values::new();
/// values.insert("price".into(), 1234.5.into());
///
/// let text = expand("Total: {price, currency(en-US, USD)}", &values, None).unwrap();
/// assert_eq!(text, "Total: $1,234.50");
/// ```
pub fn expand(
    template: &str,
    values: &Values,
    overrides: Option<&TransformRegistry>,
) -> Result<String, TemplateError> {
    expand_flat(template, &flatten_values(values), overrides)
}

/// Expands `template` against an already flattened value map.
///
/// Missing keys substitute the empty string before transforms run.
///
/// # Errors
/// [`TemplateError`] when a placeholder is malformed.
pub fn expand_flat(
    template: &str,
    values: &HashMap<String, String>,
    overrides: Option<&TransformRegistry>,
) -> Result<String, TemplateError> {
    let placeholders = collect_placeholders(template)?;
    if placeholders.is_empty() {
        return Ok(template.to_string());
    }

    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    for PlaceholderSpan { span, info } in placeholders {
        out.push_str(template.get(cursor..span.start).unwrap_or_default());

        let initial = values.get(&info.key).cloned().unwrap_or_default();
        let expanded = info.replacement_functions.iter().fold(initial, |current, call| {
            apply_transform(&call.name, &current, &call.arguments, overrides)
        });
        out.push_str(&expanded);

        cursor = span.end + 1;
    }
    out.push_str(template.get(cursor..).unwrap_or_default());

    Ok(out)
}
