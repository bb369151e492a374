use serde::Serialize;

use crate::{ApiFilterSet, RequestId};

/// Arguments handed to the list API for one page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FetchRequest {
    pub page: u32,
    pub limit: u32,
    pub filters: ApiFilterSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Execute a list API call; the outcome must come back tagged with `request_id`.
    FetchPage {
        request_id: RequestId,
        request: FetchRequest,
    },
}
