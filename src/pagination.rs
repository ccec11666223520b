// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Page bookkeeping shared by the collectors.
//!
//! GitHub list endpoints do not say how many pages remain, so a loop stops at
//! the first page holding fewer items than requested, or once a collection
//! cap has been reached.

/// Decision taken after a page has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum PageStep
{
    /// Fetch the next page.
    Continue,
    /// The page was empty or short; no further pages exist.
    Exhausted,
    /// Enough items were collected.
    CapReached,
}

/// Cursor over 1-based page indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub struct PageCursor
{
    page:      u32,
    page_size: u32,
    cap:       Option<usize,>,
}

impl PageCursor
{
    /// Cursor without a collection cap.
    pub fn new(page_size: u32,) -> Self
    {
        Self {
            page: 1, page_size, cap: None,
        }
    }

    /// Cursor that stops once `cap` items have been collected.
    pub fn with_cap(page_size: u32, cap: usize,) -> Self
    {
        Self {
            page: 1, page_size, cap: Some(cap,),
        }
    }

    /// Index of the page to request next.
    pub fn page(&self,) -> u32
    {
        self.page
    }

    pub fn page_size(&self,) -> u32
    {
        self.page_size
    }

    /// Whether fewer than `cap` items have been collected so far.
    pub fn has_capacity(&self, collected: usize,) -> bool
    {
        self.cap.is_none_or(|cap| collected < cap,)
    }

    /// Records a consumed page and decides whether to continue.
    ///
    /// `items_on_page` is the size of the page just received and `collected`
    /// the running total after adding it.
    pub fn advance(&mut self, items_on_page: usize, collected: usize,) -> PageStep
    {
        if items_on_page == 0 || items_on_page < self.page_size as usize {
            return PageStep::Exhausted;
        }

        if !self.has_capacity(collected,) {
            return PageStep::CapReached;
        }

        self.page += 1;
        PageStep::Continue
    }
}
