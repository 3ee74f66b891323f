//! Page arithmetic and compact pager buttons.
//!
//! # Invariants
//! - Page numbers are 1-based.
//! - `total_pages` is at least 1, also for empty views.
//! - Out-of-range page requests are rejected, never wrapped or clamped.

use crate::model::patient::Patient;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Range;

/// Default number of page buttons in the compact pager.
pub const DEFAULT_PAGER_BUTTONS: usize = 5;

/// Paging-layer errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingError {
    /// Requested page is outside `[1, total_pages]`.
    OutOfRange { requested: usize, total_pages: usize },
    /// Page size is not one of the selectable sizes.
    UnsupportedPageSize(u32),
}

impl Display for PagingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange {
                requested,
                total_pages,
            } => write!(
                f,
                "page {requested} is out of range; expected 1..={total_pages}"
            ),
            Self::UnsupportedPageSize(value) => write!(
                f,
                "unsupported page size `{value}`; expected 5|10|25|50|100"
            ),
        }
    }
}

impl Error for PagingError {}

/// Selectable records-per-page values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    /// Every selectable size in display order.
    pub const ALL: [PageSize; 5] = [
        Self::Five,
        Self::Ten,
        Self::TwentyFive,
        Self::Fifty,
        Self::Hundred,
    ];

    pub fn get(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = PagingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            25 => Ok(Self::TwentyFive),
            50 => Ok(Self::Fifty),
            100 => Ok(Self::Hundred),
            other => Err(PagingError::UnsupportedPageSize(other)),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(value: PageSize) -> Self {
        match value {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// `ceil(len / page_size)`, never less than 1.
pub fn total_pages(len: usize, page_size: PageSize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Index range of `page` within a view of `len` items, clamped to bounds.
pub fn page_bounds(len: usize, page_size: PageSize, page: usize) -> Range<usize> {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

/// Contiguous slice of `items` shown on `page`.
pub fn page_slice<T>(items: &[T], page_size: PageSize, page: usize) -> &[T] {
    &items[page_bounds(items.len(), page_size, page)]
}

/// Accepts `requested` only when it is within `[1, total_pages]`.
pub fn check_page(requested: usize, total_pages: usize) -> Result<usize, PagingError> {
    if requested == 0 || requested > total_pages {
        return Err(PagingError::OutOfRange {
            requested,
            total_pages,
        });
    }
    Ok(requested)
}

/// Page numbers for a compact pager showing at most `window` buttons.
///
/// All pages are listed when they fit. Otherwise the window is centered on
/// `current`, pinned to the first pages near the start and to the last pages
/// near the end.
pub fn page_buttons(current: usize, total_pages: usize, window: usize) -> Vec<usize> {
    let window = window.max(1);
    if total_pages <= window {
        return (1..=total_pages).collect();
    }

    let half = window / 2;
    let first = if current <= half + 1 {
        1
    } else if current + half >= total_pages {
        total_pages - window + 1
    } else {
        current - half
    };
    (first..first + window).collect()
}

/// One displayed row with its 1-based serial number across all pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRow<'a> {
    pub serial: usize,
    pub patient: &'a Patient,
}

/// Snapshot of one rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    pub rows: Vec<PageRow<'a>>,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: PageSize,
    pub buttons: Vec<usize>,
    pub filtered_count: usize,
    pub total_count: usize,
    pub query_active: bool,
}

impl PageView<'_> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Pager controls are only shown for multi-page views.
    pub fn shows_pager(&self) -> bool {
        self.total_pages > 1
    }

    /// "Showing page X of Y", suffixed with the unfiltered total while a
    /// query is active.
    pub fn status_label(&self) -> String {
        let mut label = format!("Showing page {} of {}", self.page, self.total_pages);
        if self.query_active {
            label.push_str(&format!(" (filtered from {} total)", self.total_count));
        }
        label
    }

    /// Empty-state message, or `None` when the filtered view has records.
    pub fn empty_state_message(&self) -> Option<&'static str> {
        if self.filtered_count > 0 {
            None
        } else if self.query_active {
            Some("No patients found matching your search.")
        } else {
            Some("No patients found. Add your first patient to get started.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{check_page, page_bounds, page_buttons, total_pages, PageSize, PagingError};

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(total_pages(0, PageSize::Ten), 1);
        assert_eq!(total_pages(10, PageSize::Ten), 1);
        assert_eq!(total_pages(11, PageSize::Ten), 2);
    }

    #[test]
    fn page_bounds_clamps_to_len() {
        assert_eq!(page_bounds(12, PageSize::Five, 3), 10..12);
        assert_eq!(page_bounds(12, PageSize::Five, 4), 12..12);
    }

    #[test]
    fn check_page_rejects_zero_and_overflow() {
        assert_eq!(check_page(1, 1), Ok(1));
        assert_eq!(
            check_page(0, 3),
            Err(PagingError::OutOfRange {
                requested: 0,
                total_pages: 3
            })
        );
        assert!(check_page(4, 3).is_err());
    }

    #[test]
    fn page_buttons_slides_with_current_page() {
        assert_eq!(page_buttons(1, 3, 5), vec![1, 2, 3]);
        assert_eq!(page_buttons(2, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_buttons(3, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_buttons(4, 10, 5), vec![2, 3, 4, 5, 6]);
        assert_eq!(page_buttons(8, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_buttons(10, 10, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn page_size_rejects_unlisted_values() {
        assert_eq!(PageSize::try_from(25), Ok(PageSize::TwentyFive));
        assert_eq!(
            PageSize::try_from(20),
            Err(PagingError::UnsupportedPageSize(20))
        );
    }
}
