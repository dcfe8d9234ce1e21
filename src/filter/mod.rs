//! Filter expression parsing
//!
//! Operators type filter state as a single search string. Bare words form the
//! free-text query; qualified terms set the status choice.
//!
//! # Syntax
//!
//! ```text
//! word                 Free text, matched against the searchable fields
//! "two words"          Quoted free text, kept together
//! type:value           Qualified term
//! ```
//!
//! # Filter Types
//!
//! - `status:` / `st:` / `s:` - Status choice, or `all` to disable it
//! - `text:` / `t:` - Free text, same as a bare word
//!
//! Free-text terms join with single spaces into one query. When several
//! status terms are given the last one wins.
//!
//! # Examples
//!
//! ```text
//! semi                          # Anything mentioning "semi"
//! status:charging               # Charging vehicles
//! s:"in use" depot              # Stations in use at a depot
//! text:"Depot A" status:all     # Everything at Depot A
//! ```

pub mod error;
pub mod matcher;
pub mod parser;

pub use error::FilterParseError;
pub use matcher::{filter_warnings, reject_status_terms, to_roster_query};
pub use parser::{FilterExpression, FilterTerm, FilterType, status_key};
