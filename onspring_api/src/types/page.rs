use serde::{Deserialize, Serialize};

use crate::query::PagingRequest;

/// One page of a paginated listing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_records: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Whether the server reports pages after this one.
    pub fn has_next_page(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// Paging parameters for the following page, keeping this page's size.
    pub fn next_page_request(&self) -> Option<PagingRequest> {
        if !self.has_next_page() {
            return None;
        }
        Some(
            PagingRequest::default()
                .with_page_number(self.page_number + 1)
                .with_page_size(self.page_size),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
