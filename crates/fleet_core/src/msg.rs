use crate::{ErrorInfo, FilterSet, PageResult, RequestId, ScopeContext};

/// Explicit page request. Omitted `limit`/`filters` keep the current ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPageArgs {
    pub page: u32,
    pub limit: Option<u32>,
    pub filters: Option<FilterSet>,
}

impl FetchPageArgs {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            limit: None,
            filters: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = Some(filters);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg<V> {
    /// Presentation (re)rendered with these filters; fetches page 1 only if they changed.
    EnsureFetched { filters: FilterSet, limit: u32 },
    /// Always issues a request for the given page.
    FetchPage(FetchPageArgs),
    /// User clicked "next page".
    NextPageClicked,
    /// User clicked "previous page".
    PreviousPageClicked,
    /// User asked to retry after a failure.
    RetryClicked,
    /// User asked to reload page 1 with the current filters.
    RefreshClicked,
    /// Active tenant changed.
    ScopeChanged(ScopeContext),
    /// List API returned a page for a dispatched request.
    PageLoaded {
        request_id: RequestId,
        result: PageResult<V>,
    },
    /// List API call failed for a dispatched request.
    PageFailed {
        request_id: RequestId,
        error: ErrorInfo,
    },
    NoOp,
}
