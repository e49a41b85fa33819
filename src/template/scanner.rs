//! Locates `{...}` placeholder spans in a template.

/// Byte range of a placeholder, both ends pointing at the braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BraceSpan {
    /// Offset of `{`.
    pub start: usize,
    /// Offset of `}`.
    pub end: usize,
}

impl BraceSpan {
    /// Text between the braces.
    #[must_use]
    pub fn inner<'a>(&self, template: &'a str) -> &'a str {
        template.get(self.start + 1..self.end).unwrap_or_default()
    }
}

/// Scans `template` left to right for placeholder spans.
///
/// The scanner does not track nesting: each `}` closes the most recent
/// unmatched `{`, so in `{a{b}c}` only `{b}` is a span. A `}` with no
/// pending `{` is plain text.
#[must_use]
pub fn scan_spans(template: &str) -> Vec<BraceSpan> {
    let mut spans = Vec::new();
    let mut pending: Option<usize> = None;

    for (index, byte) in template.bytes().enumerate() {
        match byte {
            b'{' => pending = Some(index),
            b'}' => {
                if let Some(start) = pending.take() {
                    spans.push(BraceSpan { start, end: index });
                }
            }
            _ => {}
        }
    }

    spans
}
