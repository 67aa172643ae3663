//! Pagination errors.

use std::fmt::Debug;

use thiserror::Error;

use super::UkoError;

/// Caller-misuse guards and link failures raised by the pager.
#[derive(Debug, Error)]
pub enum PagerError {
    /// The options handed to the pager already carry a non-zero offset.
    #[error("pager must start at the first page, but options carry offset {offset}")]
    InvalidStartOffset {
        /// The offending offset.
        offset: i64,
    },

    /// `get_next` was called after the last page was returned.
    #[error("no more results available")]
    NoMoreResults,

    /// A `next` link exists but its `offset` parameter is unusable.
    #[error("malformed next link '{href}': {reason}")]
    MalformedNextLink {
        /// The raw `next.href` value.
        href: String,
        /// Why the offset could not be recovered.
        reason: String,
    },
}

impl PagerError {
    /// Returns `true` if this error was caused by the caller rather than
    /// by the server's response.
    pub fn is_misuse(&self) -> bool {
        matches!(self, Self::InvalidStartOffset { .. } | Self::NoMoreResults)
    }
}

/// A `get_all` walk that stopped before the last page.
///
/// Carries every item gathered from the pages fetched before the failing
/// one, in server order, alongside the error that ended the walk.
#[derive(Debug, Error)]
#[error("pagination stopped after {count} items: {error}", count = .items.len())]
pub struct IncompletePages<T: Debug> {
    /// Items from the pages fetched before the failure.
    pub items: Vec<T>,
    /// The error that stopped pagination.
    #[source]
    pub error: UkoError,
}

impl<T: Debug> IncompletePages<T> {
    /// Discards the partial items and keeps only the error.
    pub fn into_error(self) -> UkoError {
        self.error
    }
}
