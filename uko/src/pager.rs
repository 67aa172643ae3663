//! Offset pagination over list endpoints.
//!
//! The API signals further pages only through a `next` link whose query
//! string carries an `offset` parameter. [`Pager`] walks those links for any
//! list operation: it is generic over the options type, and
//! [`UkoClient`](crate::UkoClient) implements [`ListOperation`] once per list
//! endpoint.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use uko::UkoClient;
//! use uko::ops::ListManagedKeysOptions;
//!
//! # async fn run(client: UkoClient) -> Result<(), uko::UkoError> {
//! let options = ListManagedKeysOptions::default().with_limit(50);
//! let mut pager = client.managed_keys_pager(&options)?;
//! while pager.has_next() {
//!     for key in pager.get_next().await? {
//!         println!("{} {}", key.id, key.label);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt::Debug;
use std::future::Future;

use tracing::debug;
use url::Url;

use crate::error::{IncompletePages, PagerError, UkoError};

/// Base used to resolve relative `next` links.
const RELATIVE_BASE: &str = "http://relative.invalid/";

/// A list envelope: one page of items plus navigation links.
pub trait Paginated {
    type Item: Debug;

    /// The `next.href` link, absent on the last page.
    fn next_href(&self) -> Option<&str>;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Options of a list operation that accept a starting offset.
pub trait ListOptions: Clone {
    fn offset(&self) -> Option<i64>;

    fn set_offset(&mut self, offset: i64);
}

/// A list endpoint callable with options of type `O`.
pub trait ListOperation<O: ListOptions> {
    type Page: Paginated;

    /// Fetches one page. One request, no retries beyond the transport's.
    fn list_page(&self, options: &O) -> impl Future<Output = Result<Self::Page, UkoError>> + Send;
}

/// Item type produced by a pager over `C` with options `O`.
pub type PageItem<C, O> = <<C as ListOperation<O>>::Page as Paginated>::Item;

/// Walks a list endpoint page by page.
///
/// The pager owns a copy of the options taken at construction, so later
/// changes to the caller's value do not affect it. It is meant for a single
/// caller; start independent pagers for concurrent walks.
#[derive(Debug)]
pub struct Pager<'a, C, O>
where
    C: ListOperation<O>,
    O: ListOptions,
{
    client: &'a C,
    options: O,
    has_next: bool,
    next_offset: Option<i64>,
}

impl<'a, C, O> Pager<'a, C, O>
where
    C: ListOperation<O>,
    O: ListOptions,
{
    /// Creates a pager starting at the first page.
    ///
    /// ## Errors
    ///
    /// Returns [`PagerError::InvalidStartOffset`] if `options` already sets a
    /// non-zero offset.
    pub fn new(client: &'a C, options: &O) -> Result<Self, PagerError> {
        if let Some(offset) = options.offset().filter(|offset| *offset != 0) {
            return Err(PagerError::InvalidStartOffset { offset });
        }

        Ok(Self {
            client,
            options: options.clone(),
            has_next: true,
            next_offset: None,
        })
    }

    /// Returns `true` until a page without a `next` link has been fetched.
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Fetches the next page.
    ///
    /// ## Errors
    ///
    /// - [`PagerError::NoMoreResults`] once the last page has been returned;
    ///   no request is made.
    /// - [`PagerError::MalformedNextLink`] when the page's `next` link has no
    ///   usable `offset`. The pager state is left unchanged.
    /// - Any error of the underlying list operation.
    pub async fn get_next(&mut self) -> Result<Vec<PageItem<C, O>>, UkoError> {
        if !self.has_next {
            return Err(PagerError::NoMoreResults.into());
        }

        if let Some(offset) = self.next_offset {
            self.options.set_offset(offset);
        }

        let page = self.client.list_page(&self.options).await?;
        let next_offset = match page.next_href() {
            Some(href) => Some(extract_offset_from_href(href)?.ok_or_else(|| {
                PagerError::MalformedNextLink {
                    href: href.to_string(),
                    reason: "missing offset parameter".to_string(),
                }
            })?),
            None => None,
        };

        self.has_next = next_offset.is_some();
        self.next_offset = next_offset;

        let items = page.into_items();
        debug!(
            offset = self.options.offset().unwrap_or(0),
            items = items.len(),
            next_offset = ?self.next_offset,
            "fetched page"
        );
        Ok(items)
    }

    /// Fetches all remaining pages in order.
    ///
    /// ## Errors
    ///
    /// Stops at the first failing page and returns [`IncompletePages`],
    /// which holds every item fetched before the failure.
    pub async fn get_all(
        &mut self,
    ) -> Result<Vec<PageItem<C, O>>, IncompletePages<PageItem<C, O>>> {
        let mut items = Vec::new();
        while self.has_next {
            match self.get_next().await {
                Ok(page) => items.extend(page),
                Err(error) => return Err(IncompletePages { items, error }),
            }
        }
        Ok(items)
    }
}

/// Extracts the `offset` query parameter from an absolute or relative href.
///
/// Returns `Ok(None)` when the link has no `offset` parameter.
///
/// ## Errors
///
/// Returns [`PagerError::MalformedNextLink`] if the href is not a URL or
/// the offset is not a non-negative integer.
///
/// ## Examples
///
/// ```rust
/// use uko::pager::extract_offset_from_href;
///
/// let offset = extract_offset_from_href("https://host/api/v4/vaults?offset=42&limit=10")?;
/// assert_eq!(offset, Some(42));
/// assert_eq!(extract_offset_from_href("/api/v4/vaults?limit=10")?, None);
/// assert!(extract_offset_from_href("/api/v4/vaults?offset=abc").is_err());
/// # Ok::<(), uko::PagerError>(())
/// ```
pub fn extract_offset_from_href(href: &str) -> Result<Option<i64>, PagerError> {
    let malformed = |reason: String| PagerError::MalformedNextLink {
        href: href.to_string(),
        reason,
    };

    let url = match Url::parse(href) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(href))
            .map_err(|e| malformed(e.to_string()))?,
        Err(e) => return Err(malformed(e.to_string())),
    };

    let Some((_, value)) = url.query_pairs().find(|(name, _)| name == "offset") else {
        return Ok(None);
    };

    let offset: i64 = value
        .parse()
        .map_err(|e| malformed(format!("offset '{value}' is not an integer: {e}")))?;
    if offset < 0 {
        return Err(malformed(format!("offset {offset} is negative")));
    }
    Ok(Some(offset))
}
