//! Outbound payload composition for the current page.

use crate::controls::{ControlSet, RenderedControls};
use crate::error::{PaginationError, Result};
use crate::page::PageStore;

/// Text used when a page has no caption; platforms reject empty content.
pub const BLANK_TEXT: &str = " ";

/// Everything a transport needs to display one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPayload<C> {
    pub text: String,
    pub content: C,
    pub controls: RenderedControls,
}

/// Render the page at the store's current index.
pub fn render<C: Clone>(
    store: &PageStore<C>,
    controls: &ControlSet,
    disabled: bool,
    include_controls: bool,
) -> Result<ContentPayload<C>> {
    let index = store.current_index();
    let page = store.get(index).ok_or(PaginationError::NotFound { index })?;

    Ok(ContentPayload {
        text: page
            .caption
            .clone()
            .unwrap_or_else(|| BLANK_TEXT.to_owned()),
        content: page.content.clone(),
        controls: if include_controls {
            controls.build(disabled)
        } else {
            Vec::new()
        },
    })
}
