use super::error::FilterParseError;
use crate::roster::StatusFilter;
use std::str::FromStr;

/// Types of terms a filter expression can hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterType {
    /// Status choice (e.g., "charging", "in use", "all")
    Status,
    /// Free text matched against searchable fields
    Text,
}

impl FromStr for FilterType {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "status" | "st" | "s" => Ok(FilterType::Status),
            "text" | "t" => Ok(FilterType::Text),
            _ => Err(FilterParseError::UnknownFilterType(s.to_string())),
        }
    }
}

impl FilterType {
    /// Get the canonical name of this filter type
    pub fn canonical_name(&self) -> &'static str {
        match self {
            FilterType::Status => "status",
            FilterType::Text => "text",
        }
    }
}

/// A single filter term (e.g., "status:idle" or a bare word)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    pub filter_type: FilterType,
    /// The value with surrounding quotes removed
    pub value: String,
}

impl FilterTerm {
    /// Parse a single term. Words without a `type:` prefix are text terms.
    pub fn parse(s: &str) -> Result<Self, FilterParseError> {
        if s.starts_with('"') {
            return Ok(FilterTerm::text(unquote(s)));
        }

        let Some((kind, raw_value)) = s.split_once(':') else {
            return Ok(FilterTerm::text(s));
        };

        let filter_type: FilterType = kind.parse()?;
        let value = unquote(raw_value.trim());

        if value.is_empty() {
            return Err(FilterParseError::EmptyValue(
                filter_type.canonical_name().to_string(),
            ));
        }

        Ok(FilterTerm {
            filter_type,
            value: value.to_string(),
        })
    }

    fn text(value: &str) -> Self {
        FilterTerm {
            filter_type: FilterType::Text,
            value: value.to_string(),
        }
    }
}

/// A complete filter expression
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    /// Terms in the order they were typed
    pub terms: Vec<FilterTerm>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Parse a filter expression from a string
    pub fn parse(s: &str) -> Result<Self, FilterParseError> {
        if s.matches('"').count() % 2 != 0 {
            return Err(FilterParseError::InvalidExpression(format!(
                "unterminated quote in: {}",
                s
            )));
        }

        let mut terms = Vec::new();
        for part in split_preserving_quotes(s) {
            let term = FilterTerm::parse(part)?;
            if !term.value.is_empty() {
                terms.push(term);
            }
        }

        Ok(FilterExpression { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Get all values of a specific type, in order
    pub fn values(&self, filter_type: &FilterType) -> Vec<&str> {
        self.terms
            .iter()
            .filter(|t| &t.filter_type == filter_type)
            .map(|t| t.value.as_str())
            .collect()
    }

    /// Free-text terms joined into one query string
    pub fn query_text(&self) -> String {
        self.values(&FilterType::Text).join(" ")
    }

    /// The effective status term, if any
    pub fn status_value(&self) -> Option<&str> {
        self.values(&FilterType::Status).last().copied()
    }
}

impl<S> FromStr for StatusFilter<S>
where
    S: FromStr<Err = FilterParseError>,
{
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        trimmed.parse().map(StatusFilter::Only)
    }
}

/// Normalized lookup key for status names: lowercase, without whitespace,
/// dashes or underscores
pub fn status_key(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

/// Split a string by whitespace while preserving quoted segments
fn split_preserving_quotes(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if i > start {
                    let part = &s[start..i];
                    if !part.trim().is_empty() {
                        parts.push(part.trim());
                    }
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    if start < s.len() {
        let part = &s[start..];
        if !part.trim().is_empty() {
            parts.push(part.trim());
        }
    }

    parts
}
