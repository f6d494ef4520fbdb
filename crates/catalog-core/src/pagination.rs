//! Offset/limit paging types.
//!
//! A listing is addressed by a numeric start index and a page size. These
//! types know nothing about rendering or transport; the controller builds on
//! them to decide when the next page is needed.

use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

/// One page of a listing as returned by a content source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Index of the first item in `results`.
    pub offset: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total number of items in the listing.
    pub total: u32,
    /// Number of items actually returned.
    #[serde(default)]
    pub count: u32,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(offset: u32, limit: u32, total: u32, results: Vec<T>) -> Self {
        Self {
            offset,
            limit,
            total,
            count: results.len() as u32,
            results,
        }
    }
}

/// Arguments of a single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    /// Half-open range of item indices this request covers, clipped to `total`.
    pub fn range(&self, total: u32) -> std::ops::Range<u32> {
        let start = self.offset.min(total);
        let end = self.offset.saturating_add(self.limit).min(total);
        start..end
    }
}

/// Visibility of the sentinel element at the bottom of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VisibilitySignal {
    pub is_intersecting: bool,
    /// Fraction of the sentinel inside the viewport, within `[0, 1]`.
    pub intersection_ratio: f64,
}

impl VisibilitySignal {
    /// Out-of-range ratios are clamped and NaN counts as fully hidden.
    pub fn new(is_intersecting: bool, intersection_ratio: f64) -> Self {
        let intersection_ratio = if intersection_ratio.is_nan() {
            0.0
        } else {
            intersection_ratio.clamp(0.0, 1.0)
        };
        Self {
            is_intersecting,
            intersection_ratio,
        }
    }

    pub fn visible(intersection_ratio: f64) -> Self {
        Self::new(true, intersection_ratio)
    }

    pub fn hidden() -> Self {
        Self::new(false, 0.0)
    }

    /// Whether this signal should pull in the next page.
    pub fn crosses(&self, threshold: f64) -> bool {
        self.is_intersecting && self.intersection_ratio >= threshold
    }
}

/// Cursor and accumulated items for one listing view.
#[derive(Debug, Clone)]
pub struct PagingState<T> {
    offset: u32,
    limit: u32,
    total: u32,
    accumulated: Vec<T>,
}

impl<T> PagingState<T> {
    /// Seeds the state from the first page. `limit` and `total` stay fixed
    /// for the lifetime of the view.
    pub fn from_first_page(first_page: Page<T>) -> CatalogResult<Self> {
        if first_page.limit == 0 {
            return Err(CatalogError::Validation(
                "page limit must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            offset: first_page.offset,
            limit: first_page.limit,
            total: first_page.total,
            accumulated: first_page.results,
        })
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn items(&self) -> &[T] {
        &self.accumulated
    }

    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulated.is_empty()
    }

    /// No further pages can be fetched.
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.total
    }

    /// Offset one page further along, never past `total`.
    pub fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.limit).min(self.total)
    }

    /// Moves the cursor forward. Returns the previous offset, or `None` if
    /// `offset` would not increase.
    pub(crate) fn advance_to(&mut self, offset: u32) -> Option<u32> {
        if offset <= self.offset {
            return None;
        }
        let previous = self.offset;
        self.offset = offset;
        Some(previous)
    }

    pub(crate) fn append(&mut self, results: Vec<T>) {
        self.accumulated.extend(results);
    }
}
