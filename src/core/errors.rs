//! Shared error types for the library

use thiserror::Error;

/// Failure modes of a planning-table parse.
///
/// Only structural failures surface here. Malformed individual cells are
/// recovered locally by the parser and never abort the call.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// No line in the scan window matched the header markers.
    #[error("no header line found: expected a line mentioning a week or requirements column")]
    HeaderNotFound,

    /// A header line was found but none of its cells identify a week.
    #[error("header line contains no week columns")]
    NoWeekColumns,
}
