use thiserror::Error;

/// Errors that can occur when parsing filter input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("Unknown filter type: '{0}'. Valid types are: status (s), text (t)")]
    UnknownFilterType(String),

    #[error("Empty filter value for type '{0}'")]
    EmptyValue(String),

    #[error("Unknown status '{value}'. Valid values are: all, {expected}")]
    UnknownStatus { value: String, expected: String },

    #[error("Status terms are not supported here: '{0}'")]
    StatusNotApplicable(String),

    #[error("Invalid filter expression: {0}")]
    InvalidExpression(String),
}
