use url::Url;

use crate::Error;

use super::Query;

/// Page number used when none is given (pages are 1-indexed).
pub const DEFAULT_PAGE_NUMBER: u32 = 1;
/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

const PAGE_NUMBER_KEY: &str = "pageNumber";
const PAGE_SIZE_KEY: &str = "pageSize";

/// Pagination parameters for listing endpoints.
///
/// Each `with_*` method sets one field; calling it again overwrites the
/// previous value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagingRequest {
    /// Page number (1-indexed). Defaults to 1.
    pub page_number: u32,
    /// Results per page. Defaults to 50.
    pub page_size: u32,
}

impl Default for PagingRequest {
    fn default() -> PagingRequest {
        PagingRequest {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PagingRequest {
    /// Sets the page number (1-indexed).
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Sets the number of results per page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Rebuilds a paging request from query pairs. Missing keys take their
    /// defaults, unknown keys are ignored and the last occurrence of a key wins.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut paging = PagingRequest::default();
        for (key, value) in pairs {
            let field = match key.as_ref() {
                PAGE_NUMBER_KEY => &mut paging.page_number,
                PAGE_SIZE_KEY => &mut paging.page_size,
                _ => continue,
            };
            *field = value.as_ref().parse().map_err(|e| {
                Error::RequestConstruction(format!(
                    "invalid {} value {:?}: {}",
                    key.as_ref(),
                    value.as_ref(),
                    e
                ))
            })?;
        }
        Ok(paging)
    }

    /// Rebuilds a paging request from the query string of `url`.
    pub fn from_url(url: &Url) -> Result<Self, Error> {
        Self::from_query_pairs(url.query_pairs())
    }
}

impl Query for PagingRequest {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            (PAGE_NUMBER_KEY, self.page_number.to_string()),
            (PAGE_SIZE_KEY, self.page_size.to_string()),
        ]
    }

    /// Rejects a zero page number or page size.
    fn validate(&self) -> Result<(), Error> {
        if self.page_number == 0 {
            return Err(Error::RequestConstruction(format!(
                "{} must be a positive integer, got 0",
                PAGE_NUMBER_KEY
            )));
        }
        if self.page_size == 0 {
            return Err(Error::RequestConstruction(format!(
                "{} must be a positive integer, got 0",
                PAGE_SIZE_KEY
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use url::Url;

    use crate::query::{PagingRequest, Query, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
    use crate::Error;

    fn base_url() -> Url {
        Url::parse("https://example.com/apps").unwrap()
    }

    #[test]
    fn test_paging_query() {
        insta::assert_snapshot!(
            PagingRequest::default().add_to_url(&base_url()),
            @"https://example.com/apps?pageNumber=1&pageSize=50"
        );

        insta::assert_snapshot!(
            PagingRequest::default()
                .with_page_number(2)
                .with_page_size(1)
                .add_to_url(&base_url()),
            @"https://example.com/apps?pageNumber=2&pageSize=1"
        );
    }

    #[test]
    fn last_write_wins_per_field() {
        let paging = PagingRequest::default()
            .with_page_size(10)
            .with_page_number(3)
            .with_page_size(25)
            .with_page_number(7);
        assert_eq!(
            paging.query_pairs(),
            vec![("pageNumber", "7".to_string()), ("pageSize", "25".to_string())]
        );
    }

    #[test]
    fn options_commute() {
        let a = PagingRequest::default().with_page_number(4).with_page_size(9);
        let b = PagingRequest::default().with_page_size(9).with_page_number(4);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn round_trip_through_url(number in any::<u32>(), size in any::<u32>()) {
            let paging = PagingRequest::default()
                .with_page_number(number)
                .with_page_size(size);
            let url = paging.add_to_url(&base_url());
            prop_assert_eq!(PagingRequest::from_url(&url).unwrap(), paging);
        }

        #[test]
        fn last_write_wins_for_any_sequence(
            calls in proptest::collection::vec((any::<bool>(), any::<u32>()), 0..16),
        ) {
            let mut paging = PagingRequest::default();
            let mut expected_number = DEFAULT_PAGE_NUMBER;
            let mut expected_size = DEFAULT_PAGE_SIZE;
            for (sets_number, value) in calls {
                if sets_number {
                    paging = paging.with_page_number(value);
                    expected_number = value;
                } else {
                    paging = paging.with_page_size(value);
                    expected_size = value;
                }
            }
            prop_assert_eq!(
                paging.query_pairs(),
                vec![
                    ("pageNumber", expected_number.to_string()),
                    ("pageSize", expected_size.to_string()),
                ]
            );
        }
    }

    #[test]
    fn missing_keys_use_defaults() {
        let paging = PagingRequest::from_query_pairs([("pageSize", "5")]).unwrap();
        assert_eq!(paging.page_number, 1);
        assert_eq!(paging.page_size, 5);
    }

    #[test]
    fn unparseable_value_is_rejected() {
        let err = PagingRequest::from_query_pairs([("pageNumber", "-1")]).unwrap_err();
        assert!(matches!(err, Error::RequestConstruction(_)));
    }

    #[test]
    fn zero_values_fail_validation() {
        assert!(PagingRequest::default().validate().is_ok());

        let err = PagingRequest::default().with_page_number(0).validate().unwrap_err();
        assert!(err.to_string().contains("pageNumber"));

        let err = PagingRequest::default().with_page_size(0).validate().unwrap_err();
        assert!(err.to_string().contains("pageSize"));
    }
}
