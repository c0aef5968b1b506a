//! Driven port feeding a paginated list store.

use async_trait::async_trait;
use pagination::{Page, PageItem, PageRequest};

use crate::domain::ApiError;

/// Supplies pages for one list domain.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Element type of the list.
    type Item: PageItem + Clone + Send + Sync + 'static;
    /// Server-side filter accepted with each request.
    type Filter: Clone + Send + Sync + 'static;

    /// Fetch the page described by `request`.
    async fn fetch_page(
        &self,
        request: PageRequest<Self::Filter>,
    ) -> Result<Page<Self::Item>, ApiError>;
}
