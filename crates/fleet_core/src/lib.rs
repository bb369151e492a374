//! Fleet list core: filter mapping, list store and the pure fetch state machine.
mod effect;
mod filter;
mod fingerprint;
mod msg;
mod page;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::{Effect, FetchRequest};
pub use filter::{map_filters, ApiFilterSet, FilterField, FilterSet, FilterValue, ScopeContext};
pub use fingerprint::Fingerprint;
pub use msg::{FetchPageArgs, Msg};
pub use page::{has_next, PageMeta, PageResult};
pub use state::AppState;
pub use store::{ErrorInfo, ListPhase, ListState, RequestId, DEFAULT_LIMIT};
pub use update::update;
pub use view_model::ListViewModel;
