//! Pagination arithmetic.

use crate::constants::{DEFAULT_PAGE_INDEX, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{DomainError, DomainResult};

/// Largest row offset the store can bind
const MAX_ROW_OFFSET: u64 = i64::MAX as u64;

/// A request for one page of results (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_index: u64,
    page_size: u64,
}

impl PageRequest {
    /// Build a page request, rejecting zero values and capping the size at
    /// [`MAX_PAGE_SIZE`].
    ///
    /// The row offset of the page must fit in a signed 64-bit integer.
    pub fn new(page_index: u64, page_size: u64) -> DomainResult<Self> {
        if page_index < 1 {
            return Err(DomainError::invalid_page("pageIndex must be at least 1"));
        }
        if page_size < 1 {
            return Err(DomainError::invalid_page("pageSize must be at least 1"));
        }

        let page_size = page_size.min(MAX_PAGE_SIZE);
        match (page_index - 1).checked_mul(page_size) {
            Some(offset) if offset <= MAX_ROW_OFFSET => Ok(Self {
                page_index,
                page_size,
            }),
            _ => Err(DomainError::invalid_page("pageIndex is too large")),
        }
    }

    pub fn page_index(&self) -> u64 {
        self.page_index
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_index: DEFAULT_PAGE_INDEX,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_index: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        Self {
            items,
            total_count,
            page_index: request.page_index(),
            page_size: request.page_size(),
            total_pages: total_count.div_ceil(request.page_size()),
        }
    }
}
