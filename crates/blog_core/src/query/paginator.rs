//! Fixed-size pagination with clamped page selection.
//!
//! # Invariants
//! - There is always at least one page, even for an empty result.
//! - A requested page outside `1..=num_pages` clamps to the nearest end
//!   instead of failing.

use crate::query::Window;
use serde::Serialize;

/// Items per listing page.
pub const PER_PAGE: u32 = 9;

/// Page selector as requested by a reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageCursor {
    #[default]
    First,
    /// 1-based page number, possibly out of range.
    Number(i64),
    Last,
}

impl PageCursor {
    /// Parses the raw `page` query parameter.
    ///
    /// Missing or non-numeric input selects the first page; the literal
    /// `last` selects the last page.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(value) = raw.map(str::trim) else {
            return Self::First;
        };

        if value.eq_ignore_ascii_case("last") {
            return Self::Last;
        }

        value.parse::<i64>().map_or(Self::First, Self::Number)
    }
}

/// Splits `total_count` rows into pages of `per_page`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total_count: u64,
    per_page: u32,
}

impl Paginator {
    /// `per_page` of zero is treated as one to keep page math defined.
    pub fn new(total_count: u64, per_page: u32) -> Self {
        Self {
            total_count,
            per_page: per_page.max(1),
        }
    }

    pub fn num_pages(&self) -> u32 {
        let pages = self.total_count.div_ceil(u64::from(self.per_page)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Resolves a cursor to a concrete page, clamping into range.
    pub fn page(&self, cursor: PageCursor) -> PageInfo {
        let num_pages = self.num_pages();
        let number = match cursor {
            PageCursor::First => 1,
            PageCursor::Last => num_pages,
            PageCursor::Number(requested) if requested < 1 => 1,
            PageCursor::Number(requested) => {
                u32::try_from(requested).map_or(num_pages, |value| value.min(num_pages))
            }
        };

        let offset = u64::from(number - 1) * u64::from(self.per_page);
        let on_page = self
            .total_count
            .saturating_sub(offset)
            .min(u64::from(self.per_page));
        let (start_index, end_index) = if on_page == 0 {
            (0, 0)
        } else {
            (offset + 1, offset + on_page)
        };

        PageInfo {
            number,
            num_pages,
            per_page: self.per_page,
            total_count: self.total_count,
            has_previous: number > 1,
            has_next: number < num_pages,
            previous_page_number: (number > 1).then(|| number - 1),
            next_page_number: (number < num_pages).then(|| number + 1),
            start_index,
            end_index,
        }
    }
}

/// Position of one rendered page within its listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub number: u32,
    pub num_pages: u32,
    pub per_page: u32,
    pub total_count: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u32>,
    pub next_page_number: Option<u32>,
    /// 1-based index of the first item on this page, 0 when empty.
    pub start_index: u64,
    /// 1-based index of the last item on this page, 0 when empty.
    pub end_index: u64,
}

impl PageInfo {
    /// Describes an unpaginated result of `len` items as a single page.
    pub fn single(len: usize, per_page: u32) -> Self {
        let count = len as u64;
        Self {
            number: 1,
            num_pages: 1,
            per_page,
            total_count: count,
            has_previous: false,
            has_next: false,
            previous_page_number: None,
            next_page_number: None,
            start_index: u64::from(count > 0),
            end_index: count,
        }
    }

    /// Storage window covering this page.
    pub fn window(&self) -> Window {
        Window {
            limit: self.per_page,
            offset: u64::from(self.number - 1) * u64::from(self.per_page),
        }
    }
}
