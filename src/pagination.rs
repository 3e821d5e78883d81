//! Page bookkeeping for a single search request.
//!
//! The page used to build the upstream query (`requested_page`) and the page
//! offered by the "next" link (`next_page`) are tracked separately. The
//! derived values (`current_page`, `previous_page`, `is_last_page`) are read
//! off `next_page`, so they describe the page being rendered once the cursor
//! has been advanced.

use crate::error::{AppError, AppResult};
use crate::news::ResultSet;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_MAX_ARTICLES: u32 = 100;

/// Page size and the ceiling on how many results are ever navigable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub page_size: u32,
    pub max_articles: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_articles: DEFAULT_MAX_ARTICLES,
        }
    }
}

impl PageLimits {
    /// `ceil(total_results / page_size)`, clamped to
    /// `ceil(max_articles / page_size)` when the uncapped pages would hold
    /// more than `max_articles` results.
    pub fn total_pages(&self, total_results: u64) -> u32 {
        let page_size = u64::from(self.page_size.max(1));
        let max_articles = u64::from(self.max_articles);

        let mut total_pages = total_results.div_ceil(page_size);
        if total_pages.saturating_mul(page_size) > max_articles {
            total_pages = max_articles.div_ceil(page_size);
        }

        u32::try_from(total_pages).unwrap_or(u32::MAX)
    }
}

/// Parse the `page` query parameter.
///
/// Absent or empty means page 1. Anything else must be a positive integer.
pub fn parse_requested_page(raw: Option<&str>) -> AppResult<u32> {
    let raw = match raw {
        None => return Ok(1),
        Some(raw) if raw.is_empty() => return Ok(1),
        Some(raw) => raw,
    };

    match raw.parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(AppError::InvalidPageNumber(raw.to_string())),
    }
}

/// Requested page, next-link page and the capped page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    requested_page: u32,
    next_page: u32,
    total_pages: u32,
}

impl PageCursor {
    /// Initial state: the next-link page starts out equal to the requested page.
    pub fn initial(requested_page: u32, total_pages: u32) -> Self {
        Self {
            requested_page,
            next_page: requested_page,
            total_pages,
        }
    }

    /// Move the next-link page forward unless it is already past the end.
    pub fn advance(self) -> Self {
        if self.is_last_page() {
            return self;
        }
        Self {
            next_page: self.next_page.saturating_add(1),
            ..self
        }
    }

    pub fn requested_page(&self) -> u32 {
        self.requested_page
    }

    pub fn next_page(&self) -> u32 {
        self.next_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn is_last_page(&self) -> bool {
        self.next_page > self.total_pages
    }

    pub fn current_page(&self) -> u32 {
        if self.next_page <= 1 {
            1
        } else {
            self.next_page - 1
        }
    }

    /// May be 0 on the first page; the renderer decides whether to link it.
    pub fn previous_page(&self) -> u32 {
        self.current_page() - 1
    }
}

/// Everything the renderer needs about one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub search_key: String,
    pub cursor: PageCursor,
    pub results: ResultSet,
}

impl SearchState {
    /// Derive the page bookkeeping for `results` and advance the next-link
    /// page once.
    pub fn new(
        search_key: impl Into<String>,
        requested_page: u32,
        results: ResultSet,
        limits: PageLimits,
    ) -> Self {
        let total_pages = limits.total_pages(results.total_results);
        let cursor = PageCursor::initial(requested_page, total_pages).advance();

        Self {
            search_key: search_key.into(),
            cursor,
            results,
        }
    }

    pub fn requested_page(&self) -> u32 {
        self.cursor.requested_page()
    }

    pub fn next_page(&self) -> u32 {
        self.cursor.next_page()
    }

    pub fn total_pages(&self) -> u32 {
        self.cursor.total_pages()
    }

    pub fn current_page(&self) -> u32 {
        self.cursor.current_page()
    }

    pub fn previous_page(&self) -> u32 {
        self.cursor.previous_page()
    }

    pub fn is_last_page(&self) -> bool {
        self.cursor.is_last_page()
    }
}
