use std::fmt;

use fleet_logging::fleet_debug;
use serde::Serialize;

use crate::{Fingerprint, PageMeta, PageResult};

pub type RequestId = u64;

/// Page size used until a caller asks for something else.
pub const DEFAULT_LIMIT: u32 = 10;

/// Failure surfaced to presentation as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub message: String,
    pub code: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({code})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ListPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Canonical list state. Mutated only through the three request transitions,
/// plus fingerprint bookkeeping for request coalescing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<V> {
    items: Vec<V>,
    page: u32,
    limit: u32,
    has_next: bool,
    meta: Option<PageMeta>,
    loading: bool,
    error: Option<ErrorInfo>,
    last_fetch_fingerprint: Option<Fingerprint>,
    dropped_records: usize,
    settled: bool,
    latest_request: Option<RequestId>,
    next_request_id: RequestId,
}

impl<V> Default for ListState<V> {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl<V> ListState<V> {
    pub fn new(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            limit: limit.max(1),
            has_next: false,
            meta: None,
            loading: false,
            error: None,
            last_fetch_fingerprint: None,
            dropped_records: 0,
            settled: false,
            latest_request: None,
            next_request_id: 1,
        }
    }

    /// Enters `Loading` and returns the id the outcome must carry.
    ///
    /// Items stay visible while the refresh is in flight.
    pub fn request_started(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.latest_request = Some(request_id);
        self.loading = true;
        self.error = None;
        request_id
    }

    /// Applies a page if `request_id` is still the latest issued request.
    /// Returns `false` when the result was stale and discarded.
    pub fn request_succeeded(&mut self, request_id: RequestId, result: PageResult<V>) -> bool {
        if !self.is_current(request_id) {
            fleet_debug!(
                "Discarding stale page {} for request {} (latest {:?})",
                result.page,
                request_id,
                self.latest_request
            );
            return false;
        }

        self.has_next = result.has_next();
        self.items = result.items;
        self.page = result.page;
        self.limit = result.limit;
        self.meta = result.meta;
        self.dropped_records = result.dropped_records;
        self.loading = false;
        self.settled = true;
        true
    }

    /// Records a failure for the latest request, leaving items and paging untouched.
    pub fn request_failed(&mut self, request_id: RequestId, error: ErrorInfo) -> bool {
        if !self.is_current(request_id) {
            fleet_debug!(
                "Discarding stale failure for request {} (latest {:?}): {}",
                request_id,
                self.latest_request,
                error
            );
            return false;
        }

        self.loading = false;
        self.error = Some(error);
        self.settled = true;
        true
    }

    pub fn record_fingerprint(&mut self, fingerprint: Fingerprint) {
        self.last_fetch_fingerprint = Some(fingerprint);
    }

    pub fn last_fetch_fingerprint(&self) -> Option<&Fingerprint> {
        self.last_fetch_fingerprint.as_ref()
    }

    pub fn phase(&self) -> ListPhase {
        if self.loading {
            ListPhase::Loading
        } else if self.error.is_some() {
            ListPhase::Failed
        } else if self.settled {
            ListPhase::Loaded
        } else {
            ListPhase::Idle
        }
    }

    pub fn items(&self) -> &[V] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn meta(&self) -> Option<&PageMeta> {
        self.meta.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        self.error.as_ref()
    }

    pub fn dropped_records(&self) -> usize {
        self.dropped_records
    }

    fn is_current(&self, request_id: RequestId) -> bool {
        self.loading && self.latest_request == Some(request_id)
    }
}
