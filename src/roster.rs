//! Roster filtering
//!
//! A roster is an ordered list of records an operator browses (vehicles,
//! charging stations). The filter state pairs a free-text query with a status
//! choice; [`filter_roster`] derives the matching view without touching the
//! source records.

use serde::Serialize;
use std::fmt;

/// A record that can be listed and filtered in a roster view
pub trait Rosterable {
    /// Closed status enumeration of the record
    type Status: Copy + PartialEq;

    /// Unique, stable identifier within a roster snapshot
    fn id(&self) -> &str;

    /// Text fields the free-text query is matched against
    fn searchable_fields(&self) -> Vec<&str>;

    fn status(&self) -> Self::Status;
}

/// Status predicate of the filter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter<S> {
    /// Sentinel that disables the status predicate
    #[default]
    All,
    /// Keep only records with exactly this status
    Only(S),
}

impl<S: PartialEq> StatusFilter<S> {
    pub fn is_all(&self) -> bool {
        matches!(self, StatusFilter::All)
    }

    pub fn accepts(&self, status: &S) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl<S: fmt::Display> fmt::Display for StatusFilter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Only(status) => write!(f, "{status}"),
        }
    }
}

impl<S: fmt::Display> Serialize for StatusFilter<S> {
    fn serialize<Se: serde::Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        serializer.collect_str(self)
    }
}

/// Filter state of a roster view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = "S: fmt::Display"))]
pub struct RosterQuery<S> {
    /// Case-insensitive substring, empty matches everything
    pub query: String,
    pub status: StatusFilter<S>,
}

impl<S> Default for RosterQuery<S> {
    fn default() -> Self {
        Self {
            query: String::new(),
            status: StatusFilter::All,
        }
    }
}

impl<S: Copy + PartialEq> RosterQuery<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_status(mut self, status: StatusFilter<S>) -> Self {
        self.status = status;
        self
    }

    /// True when neither predicate is active
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.status.is_all()
    }

    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Rosterable<Status = S>,
    {
        if !self.status.accepts(&record.status()) {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }

        let needle = self.query.to_lowercase();
        record
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Records matching every active predicate, in their original order
pub fn filter_roster<'a, T>(records: &'a [T], query: &RosterQuery<T::Status>) -> Vec<&'a T>
where
    T: Rosterable,
{
    records.iter().filter(|record| query.matches(*record)).collect()
}

/// Positions of the matching records within `records`
pub fn matching_indices<T>(records: &[T], query: &RosterQuery<T::Status>) -> Vec<usize>
where
    T: Rosterable,
{
    records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| query.matches(record).then_some(idx))
        .collect()
}
