use std::sync::mpsc;
use std::time::{Duration, Instant};

use fleet_core::{
    update, AppState, FetchPageArgs, FilterSet, ListViewModel, Msg, ScopeContext,
};

use crate::EngineHandle;

/// Single owner of the list state.
///
/// Every action runs the pure update synchronously and hands resulting fetches
/// to the engine. Completions are applied only from `pump`/`wait_for_event`, so
/// transitions never interleave.
pub struct FetchCoordinator<V> {
    state: AppState<V>,
    engine: EngineHandle<V>,
    subscribers: Vec<mpsc::Sender<ListViewModel<V>>>,
}

impl<V: Clone> FetchCoordinator<V> {
    pub fn new(engine: EngineHandle<V>, scope: ScopeContext, limit: u32) -> Self {
        Self {
            state: AppState::with_scope(scope, limit),
            engine,
            subscribers: Vec::new(),
        }
    }

    /// Idempotent: safe to call on every render.
    pub fn ensure_fetched(&mut self, filters: FilterSet, limit: u32) {
        self.dispatch(Msg::EnsureFetched { filters, limit });
    }

    pub fn fetch_page(&mut self, args: FetchPageArgs) {
        self.dispatch(Msg::FetchPage(args));
    }

    pub fn next_page(&mut self) {
        self.dispatch(Msg::NextPageClicked);
    }

    pub fn previous_page(&mut self) {
        self.dispatch(Msg::PreviousPageClicked);
    }

    pub fn retry(&mut self) {
        self.dispatch(Msg::RetryClicked);
    }

    pub fn refresh(&mut self) {
        self.dispatch(Msg::RefreshClicked);
    }

    pub fn set_scope(&mut self, scope: ScopeContext) {
        self.dispatch(Msg::ScopeChanged(scope));
    }

    /// Applies every completion that has already arrived. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.engine.try_recv() {
            self.dispatch(event.into_msg());
            applied += 1;
        }
        applied
    }

    /// Blocks for at most `timeout` waiting for one completion, then applies it.
    pub fn wait_for_event(&mut self, timeout: Duration) -> bool {
        match self.engine.recv_timeout(timeout) {
            Some(event) => {
                self.dispatch(event.into_msg());
                true
            }
            None => false,
        }
    }

    /// Applies completions until the latest request has resolved or `timeout` passes.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.state.list().is_loading() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.wait_for_event(remaining) {
                return false;
            }
        }
        true
    }

    pub fn view(&self) -> ListViewModel<V> {
        self.state.view()
    }

    /// Receives a fresh view after every visible state change.
    pub fn subscribe(&mut self) -> mpsc::Receiver<ListViewModel<V>> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn dispatch(&mut self, msg: Msg<V>) {
        let (mut next, effects) = update(std::mem::take(&mut self.state), msg);
        let changed = next.consume_dirty();
        self.state = next;

        for effect in effects {
            self.engine.enqueue(effect);
        }
        if changed {
            self.notify();
        }
    }

    fn notify(&mut self) {
        let view = self.state.view();
        self.subscribers
            .retain(|subscriber| subscriber.send(view.clone()).is_ok());
    }
}
