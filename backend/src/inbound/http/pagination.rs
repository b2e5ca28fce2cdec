//! Listing query parameters and the page envelope body.
//!
//! Every listing endpoint accepts the same `page`/`size`/`sort`/`order`
//! query parameters; the sort key vocabulary is entity specific and parsed
//! through the entity's `FromStr` implementation.

use std::str::FromStr;

use pagination::{DEFAULT_PAGE_SIZE, Page, PageRequest, SortOrder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, InvalidSortKey};

/// Common listing query parameters.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Zero-indexed page number. Defaults to the first page.
    pub page: Option<u32>,
    /// Page size between 1 and 100. Defaults to 10.
    pub size: Option<u32>,
    /// Entity-specific sort key. Each listing documents its default.
    pub sort: Option<String>,
    /// Sort direction, `asc` (default) or `desc`.
    pub order: Option<String>,
}

impl ListQuery {
    /// Validate the paging parameters.
    ///
    /// # Errors
    /// Returns an invalid-request error naming the offending parameter.
    pub fn page_request(&self) -> Result<PageRequest, Error> {
        let order = match self.order.as_deref() {
            Some(token) => SortOrder::from_str(token).map_err(|err| {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": "order",
                    "value": token,
                    "code": "invalid_sort_order",
                }))
            })?,
            None => SortOrder::default(),
        };

        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
            order,
        )
        .map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "size",
                "code": "invalid_page_size",
            }))
        })
    }

    /// Parse the sort key against the entity's vocabulary, falling back to
    /// the entity default when absent.
    ///
    /// # Errors
    /// Returns an invalid-request error naming the unrecognised key.
    pub fn sort_key<K>(&self) -> Result<K, Error>
    where
        K: FromStr<Err = InvalidSortKey> + Default,
    {
        match self.sort.as_deref() {
            Some(token) => K::from_str(token).map_err(|err| {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": "sort",
                    "value": token,
                    "code": "invalid_sort_key",
                }))
            }),
            None => Ok(K::default()),
        }
    }
}

/// Page envelope returned by every listing endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageBody<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Zero-indexed page number.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Total number of elements matching the listing filter.
    pub total: u64,
}

impl<T> PageBody<T> {
    /// Convert a domain page into the wire envelope.
    pub fn from_page<U>(page: Page<U>, f: impl FnMut(U) -> T) -> Self {
        let number = page.page();
        let size = page.size();
        let total = page.total();
        Self {
            items: page.into_items().into_iter().map(f).collect(),
            page: number,
            size,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::{ErrorCode, UserSortKey};

    #[rstest]
    fn defaults_apply_when_parameters_are_absent() {
        let query = ListQuery::default();

        let page = query.page_request().expect("valid defaults");
        assert_eq!(page.page(), 0);
        assert_eq!(page.size(), DEFAULT_PAGE_SIZE);
        assert_eq!(page.order(), SortOrder::Ascending);

        let sort: UserSortKey = query.sort_key().expect("default sort");
        assert_eq!(sort, UserSortKey::Name);
    }

    #[rstest]
    fn unknown_order_token_is_an_invalid_request() {
        let query = ListQuery {
            order: Some("sideways".to_owned()),
            ..ListQuery::default()
        };

        let err = query.page_request().expect_err("invalid order");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn oversized_page_is_an_invalid_request() {
        let query = ListQuery {
            size: Some(5000),
            ..ListQuery::default()
        };

        let err = query.page_request().expect_err("invalid size");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn unknown_sort_key_is_an_invalid_request() {
        let query = ListQuery {
            sort: Some("password".to_owned()),
            ..ListQuery::default()
        };

        let err = query.sort_key::<UserSortKey>().expect_err("invalid sort");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn envelope_keeps_the_page_metadata() {
        let request = PageRequest::new(1, 2, SortOrder::Descending).expect("valid request");
        let page = Page::from_request(vec![1_u8, 2], request, 5);

        let body = PageBody::from_page(page, |n| n * 2);

        assert_eq!(body.items, vec![2, 4]);
        assert_eq!(body.page, 1);
        assert_eq!(body.size, 2);
        assert_eq!(body.total, 5);
    }
}
