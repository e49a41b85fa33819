use thiserror::Error;

/// Errors raised while parsing placeholders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `)` appeared in a placeholder with no function call open.
    #[error(
        "Expected a character or \"(\", found \")\" at offset {offset} in placeholder '{{{placeholder}}}'"
    )]
    UnexpectedCloseParen {
        /// Placeholder text between the braces.
        placeholder: String,
        /// Character offset of the `)` within `placeholder`.
        offset: usize,
    },
}
