use crate::view_model::ListViewModel;
use crate::{FetchRequest, FilterSet, ListState, ScopeContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState<V> {
    list: ListState<V>,
    scope: ScopeContext,
    filters: FilterSet,
    last_request: Option<FetchRequest>,
    dirty: bool,
}

impl<V> Default for AppState<V> {
    fn default() -> Self {
        Self {
            list: ListState::default(),
            scope: ScopeContext::default(),
            filters: FilterSet::default(),
            last_request: None,
            dirty: false,
        }
    }
}

impl<V> AppState<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(scope: ScopeContext, limit: u32) -> Self {
        Self {
            list: ListState::new(limit),
            scope,
            ..Self::default()
        }
    }

    pub fn view(&self) -> ListViewModel<V>
    where
        V: Clone,
    {
        ListViewModel::from_state(&self.list)
    }

    pub fn list(&self) -> &ListState<V> {
        &self.list
    }

    pub fn scope(&self) -> &ScopeContext {
        &self.scope
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn last_request(&self) -> Option<&FetchRequest> {
        self.last_request.as_ref()
    }

    /// Returns whether the visible state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn list_mut(&mut self) -> &mut ListState<V> {
        &mut self.list
    }

    pub(crate) fn set_scope(&mut self, scope: ScopeContext) {
        self.scope = scope;
    }

    pub(crate) fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
    }

    pub(crate) fn set_last_request(&mut self, request: FetchRequest) {
        self.last_request = Some(request);
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
