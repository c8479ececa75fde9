//! Paginated list controller.
//!
//! Splits a list into pages of `page_size` items and tracks the current page.
//! Unlike [`Carousel`](crate::carousel::Carousel), a pager clamps at both ends
//! by default: "previous" on the first page and "next" on the last page do
//! nothing, and renderers disable those controls via [`Pager::has_previous`]
//! and [`Pager::has_next`].
//!
//! The page count is always derived as `ceil(len / page_size)` and never
//! stored, so it cannot drift from the item list.

use crate::cursor::{Boundary, Cursor};
use std::ops::{Range, RangeInclusive};

#[derive(Debug, Clone)]
pub struct Pager<T> {
    items: Vec<T>,
    page_size: usize,
    cursor: Cursor,
}

impl<T> Pager<T> {
    /// Clamped pager. A `page_size` of zero is treated as one.
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self::with_boundary(items, page_size, Boundary::Clamp)
    }

    pub fn with_boundary(items: Vec<T>, page_size: usize, boundary: Boundary) -> Self {
        let page_size = page_size.max(1);
        let pages = total_pages(items.len(), page_size);
        Self {
            items,
            page_size,
            cursor: Cursor::new(pages, boundary),
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.items.len(), self.page_size)
    }

    /// Zero-based current page.
    pub fn current_page(&self) -> usize {
        self.cursor.position()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn next_page(&mut self) -> usize {
        self.cursor.advance()
    }

    pub fn previous_page(&mut self) -> usize {
        self.cursor.retreat()
    }

    /// Jump to `page`, clamped to the last page. Returns the applied page.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.cursor.seek(page)
    }

    pub fn has_next(&self) -> bool {
        self.cursor.can_advance()
    }

    pub fn has_previous(&self) -> bool {
        self.cursor.can_retreat()
    }

    /// Item indices covered by the current page.
    pub fn item_range(&self) -> Range<usize> {
        page_range(self.items.len(), self.page_size, self.current_page())
    }

    pub fn page_items(&self) -> &[T] {
        &self.items[self.item_range()]
    }

    /// One-based page labels for number buttons, `1..=total_pages`.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Every page in order, each as `(page_index, items)`.
    ///
    /// Used by static generation, which writes one file per page instead of
    /// mutating a live pager.
    pub fn pages(&self) -> impl Iterator<Item = (usize, &[T])> {
        self.items.chunks(self.page_size).enumerate()
    }
}

/// `ceil(len / page_size)`, with zero items giving zero pages.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

fn page_range(len: usize, page_size: usize, page: usize) -> Range<usize> {
    let start = (page * page_size).min(len);
    let end = (start + page_size).min(len);
    start..end
}
