use super::error::FilterParseError;
use super::parser::{FilterExpression, FilterType};
use crate::roster::{RosterQuery, StatusFilter};
use std::str::FromStr;

/// Overlay a parsed expression onto an existing filter state
///
/// Free text in the expression replaces the base query and a status term
/// replaces the base status. Anything the expression leaves out keeps the
/// base value.
pub fn to_roster_query<S>(
    expr: &FilterExpression,
    base: RosterQuery<S>,
) -> Result<RosterQuery<S>, FilterParseError>
where
    S: FromStr<Err = FilterParseError> + Copy + PartialEq,
{
    let mut query = base;

    let text = expr.query_text();
    if !text.is_empty() {
        query = query.with_query(text);
    }

    if let Some(status) = expr.status_value() {
        query = query.with_status(status.parse::<StatusFilter<S>>()?);
    }

    Ok(query)
}

/// Fail when the expression carries a status term
///
/// Used where records of different status enumerations are shown together.
pub fn reject_status_terms(expr: &FilterExpression) -> Result<(), FilterParseError> {
    match expr.status_value() {
        Some(status) => Err(FilterParseError::StatusNotApplicable(status.to_string())),
        None => Ok(()),
    }
}

/// Warnings about terms that parse but probably do not do what was meant
pub fn filter_warnings(expr: &FilterExpression) -> Vec<String> {
    let mut warnings = Vec::new();

    let statuses = expr.values(&FilterType::Status);
    if statuses.len() > 1 {
        warnings.push(format!(
            "Warning: {} status terms given ({}); only '{}' is applied",
            statuses.len(),
            statuses.join(", "),
            statuses[statuses.len() - 1]
        ));
    }

    warnings
}
