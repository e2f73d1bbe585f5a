//! This module defines the common functionality for paging data: the paging
//! defaults and the item list backing the view's pager control.

/// The config for pagination
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The rows to display per page when not specified in a request.
    pub default_page_size: u64,
    /// The maximum number of page buttons to show in the pager control.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
            max_pages: 5,
        }
    }
}

/// One element of the pager control.
#[derive(Debug, PartialEq, Eq)]
pub enum PagerItem {
    /// A jump to the previous page.
    Previous(u64),
    /// A numbered page button.
    Page {
        /// The page the button jumps to.
        number: u64,
        /// Whether this is the page currently shown.
        current: bool,
    },
    /// A gap between page buttons.
    Ellipsis,
    /// A jump to the next page.
    Next(u64),
}

/// Build the pager items for `current_page` of `page_count` pages, showing
/// at most `max_pages` numbered buttons in a window around the current page.
///
/// The first and last pages stay reachable through ellipsis-separated
/// buttons when they fall outside the window.
pub fn pager_items(current_page: u64, page_count: u64, max_pages: u64) -> Vec<PagerItem> {
    let half_window = max_pages / 2;

    let (window_start, window_end) = if page_count <= max_pages {
        (1, page_count)
    } else if current_page <= half_window {
        (1, max_pages)
    } else if current_page > page_count - half_window {
        (page_count - max_pages + 1, page_count)
    } else {
        (current_page - half_window, current_page + half_window)
    };

    let mut items = Vec::new();

    if current_page > 1 {
        items.push(PagerItem::Previous(current_page - 1));
    }

    if window_start > 1 {
        items.push(PagerItem::Page {
            number: 1,
            current: false,
        });
        items.push(PagerItem::Ellipsis);
    }

    for number in window_start..=window_end {
        items.push(PagerItem::Page {
            number,
            current: number == current_page,
        });
    }

    if window_end < page_count {
        items.push(PagerItem::Ellipsis);
        items.push(PagerItem::Page {
            number: page_count,
            current: false,
        });
    }

    if current_page < page_count {
        items.push(PagerItem::Next(current_page + 1));
    }

    items
}
