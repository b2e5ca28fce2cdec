//! Shared pagination primitives for forum backend endpoints.
//!
//! Listing endpoints never return an unbounded set: callers supply a
//! [`PageRequest`] (zero-indexed page, bounded size, sort order) and receive a
//! [`Page`] envelope carrying the items plus the total element count.
//! Requesting a page beyond the last available one yields an empty envelope,
//! not an error; that contract belongs to the repositories and is only
//! represented here.

use serde::{Deserialize, Serialize};

/// Page size applied when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on the caller-supplied page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validation errors raised when building a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The requested page size was zero.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The requested page size exceeded [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}")]
    PageSizeTooLarge {
        /// The configured upper bound.
        max: u32,
    },
    /// The sort order token was neither `asc` nor `desc`.
    #[error("sort order must be \"asc\" or \"desc\"")]
    InvalidSortOrder,
}

/// Direction applied to the sort key of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest value first. The default for every listing.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Largest value first.
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// Wire token for the order, as accepted in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = PaginationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(PaginationError::InvalidSortOrder),
        }
    }
}

/// A validated request for one page of a listing.
///
/// ## Invariants
/// - `size` is between 1 and [`MAX_PAGE_SIZE`].
/// - `page` is zero-indexed; any page number is valid (pages past the end of
///   the data yield empty envelopes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
    order: SortOrder,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            order: SortOrder::Ascending,
        }
    }
}

impl PageRequest {
    /// Build a request, validating the page size bounds.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageSize`] or
    /// [`PaginationError::PageSizeTooLarge`] when `size` is out of bounds.
    pub const fn new(page: u32, size: u32, order: SortOrder) -> Result<Self, PaginationError> {
        if size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PaginationError::PageSizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, size, order })
    }

    /// Zero-indexed page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Direction applied to the caller-chosen sort key.
    #[must_use]
    pub const fn order(self) -> SortOrder {
        self.order
    }

    /// Row offset of the first item on this page.
    #[must_use]
    pub const fn offset(self) -> i64 {
        self.page as i64 * self.size as i64
    }

    /// Maximum number of rows to fetch.
    #[must_use]
    pub const fn limit(self) -> i64 {
        self.size as i64
    }
}

/// One page of a listing, together with the total element count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    size: u32,
    total: u64,
}

impl<T> Page<T> {
    /// Assemble an envelope from fetched items and the request that produced
    /// them. `total` counts all elements matching the listing filter, not
    /// just those on this page.
    #[must_use]
    pub fn from_request(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            size: request.size(),
            total,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the envelope, yielding the items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Zero-indexed page number this envelope answers.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size (the item count may be smaller on the last page).
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Total number of elements matching the listing filter.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Whether this page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform every item, keeping the envelope metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total: self.total,
        }
    }
}
