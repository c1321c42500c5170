//! Page arithmetic for proposal lists.
//!
//! `page_count = ceil(total / limit)`, `offset = page_index * limit`. The
//! previous control is disabled on the first page and the next control on the
//! last page; with zero pages both are disabled.

/// Default page size of the proposal list
pub const PAGE_LIMIT: u64 = 20;

/// Position within a paged list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_index: u64,
    limit: u64,
    total: u64,
}

impl Pagination {
    /// A limit of 0 is treated as 1.
    pub fn new(limit: u64) -> Self {
        Self {
            page_index: 0,
            limit: limit.max(1),
            total: 0,
        }
    }

    pub fn page_index(&self) -> u64 {
        self.page_index
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Offset of the current page's first item
    pub fn offset(&self) -> u64 {
        self.page_index.saturating_mul(self.limit)
    }

    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(self.limit)
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    /// Record the total reported by the latest fetch.
    ///
    /// The page index is left alone even if it is now out of range; the
    /// caller decides whether to jump back (see `clamp`).
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Move back onto the last page if the index ran past it.
    pub fn clamp(&mut self) -> bool {
        let last = self.page_count().saturating_sub(1);
        if self.page_index > last {
            self.page_index = last;
            true
        } else {
            false
        }
    }

    /// Advance one page. Returns false (and stays put) on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page_index += 1;
        true
    }

    /// Go back one page. Returns false (and stays put) on the first page.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page_index -= 1;
        true
    }

    /// Jump to `page_index` if it exists (page 0 always does).
    pub fn go_to(&mut self, page_index: u64) -> bool {
        if page_index == 0 || page_index < self.page_count() {
            self.page_index = page_index;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page_index = 0;
        self.total = 0;
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_LIMIT)
    }
}
