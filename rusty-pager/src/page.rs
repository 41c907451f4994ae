//! Ordered page storage and current-index tracking.

use crate::error::{PaginationError, Result};

/// One unit of paginated content plus optional accompanying text.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<C> {
    /// Primary rich content (an embed for Discord transports).
    pub content: C,
    /// Message text shown alongside the content.
    pub caption: Option<String>,
}

/// Insertion-ordered pages with a current index.
///
/// Once non-empty, `current_index < len()` always holds.
#[derive(Debug, Clone)]
pub struct PageStore<C> {
    pages: Vec<Page<C>>,
    current_index: usize,
}

impl<C> Default for PageStore<C> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            current_index: 0,
        }
    }
}

impl<C> PageStore<C> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page.
    ///
    /// An explicitly empty caption is rejected; pass `None` for no caption.
    pub fn add_page(&mut self, content: C, caption: Option<&str>) -> Result<()> {
        if caption.is_some_and(str::is_empty) {
            return Err(PaginationError::InvalidArgument(
                "caption cannot be empty".to_owned(),
            ));
        }

        self.pages.push(Page {
            content,
            caption: caption.map(ToOwned::to_owned),
        });

        Ok(())
    }

    /// Store a new current index without rendering anything.
    pub fn set_current_index(&mut self, index: usize) -> Result<()> {
        if index >= self.pages.len() {
            return Err(PaginationError::OutOfRange {
                index,
                page_count: self.pages.len(),
            });
        }

        self.current_index = index;
        Ok(())
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Page<C>> {
        self.pages.get(index)
    }

    /// Page at the current index, if any.
    pub fn current(&self) -> Option<&Page<C>> {
        self.pages.get(self.current_index)
    }

    /// Index of the last page, `0` when empty.
    pub fn last_index(&self) -> usize {
        self.pages.len().saturating_sub(1)
    }

    /// Index after the current one, wrapping to the first page.
    pub fn next_index(&self) -> usize {
        if self.current_index + 1 > self.last_index() {
            0
        } else {
            self.current_index + 1
        }
    }

    /// Index before the current one, wrapping to the last page.
    pub fn previous_index(&self) -> usize {
        match self.current_index.checked_sub(1) {
            Some(previous) => previous,
            None => self.last_index(),
        }
    }
}
