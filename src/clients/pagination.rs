//! Cursor pagination parsed from the `Link` response header.
//!
//! Shopify paginates list endpoints with opaque `page_info` cursors:
//!
//! ```text
//! Link: <https://shop.myshopify.com/admin/products.json?page_info=abc&limit=50>; rel="next",
//!       <https://shop.myshopify.com/admin/products.json?page_info=xyz&limit=50>; rel="previous"
//! ```
//!
//! Each direction becomes a [`PageOptions`] that can be passed straight back
//! as the query options of the next list call.

use std::num::ParseIntError;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header carrying the pagination links.
pub const LINK_HEADER: &str = "link";

/// Errors raised while parsing a `Link` header.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    /// An entry did not have the `<url>; rel="next|previous"` shape.
    #[error("could not extract pagination link header: '{entry}'")]
    MalformedPaginationHeader {
        /// The offending entry.
        entry: String,
    },

    /// The link target was not a valid absolute URL.
    #[error("pagination does not contain a valid URL: '{url}'")]
    InvalidPaginationUrl {
        /// The offending URL.
        url: String,
    },

    /// The link target had no `page_info` cursor.
    #[error("page_info is missing")]
    MissingPageCursor,

    /// The `limit` parameter was not an integer.
    #[error("invalid pagination limit '{value}': {source}")]
    InvalidLimit {
        /// The offending value.
        value: String,
        /// The underlying parse failure.
        source: ParseIntError,
    },
}

/// A page selector: the cursor plus the page size it was issued for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    /// Opaque cursor identifying the page.
    pub page_info: String,
    /// Page size, if the link carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Forward and backward page selectors from one response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Selector for the next page, if any.
    pub next_page_options: Option<PageOptions>,
    /// Selector for the previous page, if any.
    pub previous_page_options: Option<PageOptions>,
}

impl Pagination {
    /// Returns `true` if a next page exists.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next_page_options.is_some()
    }

    /// Returns `true` if a previous page exists.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.previous_page_options.is_some()
    }
}

enum Rel {
    Next,
    Previous,
}

/// Parses a raw `Link` header value.
///
/// An empty value yields empty [`Pagination`]. Any malformed entry fails the
/// whole header. When a relation repeats, the last entry wins.
///
/// # Errors
///
/// Returns a [`PaginationError`] describing the first invalid entry.
///
/// # Example
///
/// ```rust
/// use shopify_rest::extract_pagination;
///
/// let header = r#"<https://a.myshopify.com/admin/products.json?page_info=abc&limit=5>; rel="next""#;
/// let pagination = extract_pagination(header).unwrap();
///
/// let next = pagination.next_page_options.unwrap();
/// assert_eq!(next.page_info, "abc");
/// assert_eq!(next.limit, Some(5));
/// assert!(pagination.previous_page_options.is_none());
/// ```
pub fn extract_pagination(link_header: &str) -> Result<Pagination, PaginationError> {
    let mut pagination = Pagination::default();
    if link_header.trim().is_empty() {
        return Ok(pagination);
    }

    for entry in link_header.split(',') {
        let (target, rel) = split_entry(entry).ok_or_else(|| {
            PaginationError::MalformedPaginationHeader {
                entry: entry.trim().to_string(),
            }
        })?;
        let options = page_options(target)?;
        match rel {
            Rel::Next => pagination.next_page_options = Some(options),
            Rel::Previous => pagination.previous_page_options = Some(options),
        }
    }

    Ok(pagination)
}

/// Splits `<url>; rel="next"` into its URL and relation.
fn split_entry(entry: &str) -> Option<(&str, Rel)> {
    let rest = entry.trim().strip_prefix('<')?;
    let (target, params) = rest.split_once('>')?;
    if target.is_empty() {
        return None;
    }

    let rel = params.trim_start().strip_prefix(';')?.trim();
    let rel = rel.strip_prefix("rel")?.trim_start().strip_prefix('=')?.trim_start();
    match rel {
        r#""next""# => Some((target, Rel::Next)),
        r#""previous""# => Some((target, Rel::Previous)),
        _ => None,
    }
}

fn page_options(target: &str) -> Result<PageOptions, PaginationError> {
    let url = Url::parse(target).map_err(|_| PaginationError::InvalidPaginationUrl {
        url: target.to_string(),
    })?;

    let mut page_info = None;
    let mut limit = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "page_info" => page_info = Some(value.into_owned()),
            "limit" => {
                let parsed = value
                    .parse::<u32>()
                    .map_err(|source| PaginationError::InvalidLimit {
                        value: value.to_string(),
                        source,
                    })?;
                limit = Some(parsed);
            }
            _ => {}
        }
    }

    match page_info {
        Some(page_info) if !page_info.is_empty() => Ok(PageOptions { page_info, limit }),
        _ => Err(PaginationError::MissingPageCursor),
    }
}
