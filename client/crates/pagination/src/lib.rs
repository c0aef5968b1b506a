//! Cursor and page envelope primitives for list endpoints.
//!
//! List endpoints page by the identifier of the last item the caller has
//! already seen. A [`PageRequest`] carries the page size, that cursor, and an
//! endpoint-specific filter; a [`Page`] carries the returned items in server
//! order together with the server's "has more" verdict.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque position marker naming the last item a caller has seen.
///
/// # Examples
/// ```
/// use pagination::Cursor;
///
/// let cursor = Cursor::new("evt-10");
/// assert_eq!(cursor.as_str(), "evt-10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Wrap a raw item identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the cursor, returning the raw identifier.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Cursor {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Items that can act as a pagination cursor for the page after them.
pub trait PageItem {
    /// Cursor naming this item.
    fn cursor(&self) -> Cursor;
}

/// Request for one page of a cursor-paginated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<F> {
    /// Maximum number of items to return.
    pub limit: u32,
    /// Last item already seen; `None` requests the first page.
    pub cursor: Option<Cursor>,
    /// Endpoint-specific filter applied server side.
    pub filter: F,
}

impl<F> PageRequest<F> {
    /// Request the first page.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::first(10, ());
    /// assert!(request.cursor.is_none());
    /// ```
    pub const fn first(limit: u32, filter: F) -> Self {
        Self {
            limit,
            cursor: None,
            filter,
        }
    }

    /// Request the page following `cursor`.
    pub const fn after(limit: u32, cursor: Option<Cursor>, filter: F) -> Self {
        Self {
            limit,
            cursor,
            filter,
        }
    }
}

/// One page of results as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Total number of matching items known to the server.
    pub total: u64,
    /// Whether the server holds further items past this page.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page from its parts.
    pub const fn new(items: Vec<T>, total: u64, has_more: bool) -> Self {
        Self {
            items,
            total,
            has_more,
        }
    }

    /// Cursor of the final item, used to request the next page.
    #[must_use]
    pub fn next_cursor(&self) -> Option<Cursor>
    where
        T: PageItem,
    {
        self.items.last().map(PageItem::cursor)
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::new(Vec::new(), 0, false)
    }
}
