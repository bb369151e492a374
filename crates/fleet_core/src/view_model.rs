use serde::Serialize;

use crate::{ErrorInfo, ListPhase, ListState, PageMeta};

/// Read contract handed to presentation components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListViewModel<V> {
    pub items: Vec<V>,
    pub page: u32,
    pub limit: u32,
    pub has_next: bool,
    pub meta: Option<PageMeta>,
    pub loading: bool,
    pub error: Option<ErrorInfo>,
    pub phase: ListPhase,
    pub dropped_records: usize,
}

impl<V: Clone> ListViewModel<V> {
    pub(crate) fn from_state(list: &ListState<V>) -> Self {
        Self {
            items: list.items().to_vec(),
            page: list.page(),
            limit: list.limit(),
            has_next: list.has_next(),
            meta: list.meta().copied(),
            loading: list.is_loading(),
            error: list.error().cloned(),
            phase: list.phase(),
            dropped_records: list.dropped_records(),
        }
    }
}
