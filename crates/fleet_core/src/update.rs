use fleet_logging::{fleet_debug, fleet_info, fleet_warn};

use crate::{map_filters, AppState, Effect, FetchPageArgs, FetchRequest, Fingerprint, ListPhase, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update<V>(mut state: AppState<V>, msg: Msg<V>) -> (AppState<V>, Vec<Effect>) {
    let effects = match msg {
        Msg::EnsureFetched { filters, limit } => {
            let limit = limit.max(1);
            let api_filters = map_filters(&filters, state.scope());
            let fingerprint = Fingerprint::of(&api_filters, limit);
            if state.list().last_fetch_fingerprint() == Some(&fingerprint) {
                fleet_debug!("Coalesced list fetch {}", fingerprint);
                return (state, Vec::new());
            }

            // Recorded before the response so a burst of identical calls issues one request.
            state.list_mut().record_fingerprint(fingerprint);
            state.set_filters(filters);
            vec![dispatch(
                &mut state,
                FetchRequest {
                    page: 1,
                    limit,
                    filters: api_filters,
                },
            )]
        }
        Msg::FetchPage(args) => vec![fetch_page(&mut state, args)],
        Msg::NextPageClicked => {
            if state.list().has_next() {
                let next = state.list().page() + 1;
                vec![fetch_page(&mut state, FetchPageArgs::page(next))]
            } else {
                Vec::new()
            }
        }
        Msg::PreviousPageClicked => {
            if state.list().page() > 1 {
                let previous = state.list().page() - 1;
                vec![fetch_page(&mut state, FetchPageArgs::page(previous))]
            } else {
                Vec::new()
            }
        }
        Msg::RetryClicked => match (state.list().phase(), state.last_request().cloned()) {
            (ListPhase::Failed, Some(request)) => vec![dispatch(&mut state, request)],
            _ => Vec::new(),
        },
        Msg::RefreshClicked => vec![fetch_page(&mut state, FetchPageArgs::page(1))],
        Msg::ScopeChanged(scope) => {
            fleet_info!("Scope changed to tenant {:?}", scope.active_tenant);
            state.set_scope(scope);
            Vec::new()
        }
        Msg::PageLoaded { request_id, result } => {
            let dropped = result.dropped_records;
            if state.list_mut().request_succeeded(request_id, result) {
                if dropped > 0 {
                    fleet_warn!(
                        "Request {} dropped {} unmappable records",
                        request_id,
                        dropped
                    );
                }
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PageFailed { request_id, error } => {
            if state.list_mut().request_failed(request_id, error) {
                if let Some(error) = state.list().error() {
                    fleet_warn!("Request {} failed: {}", request_id, error);
                }
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn fetch_page<V>(state: &mut AppState<V>, args: FetchPageArgs) -> Effect {
    let page = args.page.max(1);
    let limit = args
        .limit
        .or_else(|| state.last_request().map(|request| request.limit))
        .unwrap_or_else(|| state.list().limit())
        .max(1);
    if let Some(filters) = args.filters {
        state.set_filters(filters);
    }
    let api_filters = map_filters(state.filters(), state.scope());

    // Only page 1 defines the coalescing key; paging must not mask a later filter change.
    if page == 1 {
        state
            .list_mut()
            .record_fingerprint(Fingerprint::of(&api_filters, limit));
    }

    dispatch(
        state,
        FetchRequest {
            page,
            limit,
            filters: api_filters,
        },
    )
}

fn dispatch<V>(state: &mut AppState<V>, request: FetchRequest) -> Effect {
    let request_id = state.list_mut().request_started();
    fleet_info!(
        "Dispatching request {} page={} limit={} filters={}",
        request_id,
        request.page,
        request.limit,
        request.filters.len()
    );
    state.set_last_request(request.clone());
    state.mark_dirty();
    Effect::FetchPage {
        request_id,
        request,
    }
}
