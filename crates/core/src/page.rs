//! Pagination primitives.
//!
//! Page parameters are explicit values passed into each query call; there is
//! no request-scoped global state. Defaults: page 0, size 20.

use serde::{Deserialize, Serialize};

/// An explicit page request (zero-based page number + page size).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Default page number (first page).
    pub const DEFAULT_PAGE: u32 = 0;
    /// Default page size.
    pub const DEFAULT_SIZE: u32 = 20;

    /// Build a page request; a zero size falls back to the default size.
    pub fn of(page: u32, size: u32) -> Self {
        Self {
            page,
            size: if size == 0 { Self::DEFAULT_SIZE } else { size },
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Row offset for SQL paging (`page * size`).
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Row limit for SQL paging.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(Self::DEFAULT_PAGE, Self::DEFAULT_SIZE)
    }
}

/// One page of results together with the paging metadata callers asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub page_number: u32,
    pub page_size: u32,
    pub number_of_elements: usize,
    pub total_elements: usize,
    pub content: Vec<T>,
}

impl<T> Page<T> {
    /// Wrap a page of fetched content with its request metadata.
    pub fn from_content(request: PageRequest, content: Vec<T>) -> Self {
        Self {
            page_number: request.page(),
            page_size: request.size(),
            number_of_elements: content.len(),
            total_elements: content.len(),
            content,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page_number: self.page_number,
            page_size: self.page_size,
            number_of_elements: self.number_of_elements,
            total_elements: self.total_elements,
            content: self.content.into_iter().map(f).collect(),
        }
    }
}
