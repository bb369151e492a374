//! Fleet list engine: list API access, view-model mapping and fetch coordination.
mod api;
mod coordinator;
mod engine;
mod mapper;
mod types;

pub use api::{FetchSettings, ListApi, ReqwestListApi};
pub use coordinator::FetchCoordinator;
pub use engine::{EngineHandle, ABORTED_MESSAGE};
pub use mapper::{build_page, ViewModelMapper};
pub use types::{
    ApiError, EngineError, EngineEvent, FailureKind, ListResponse, RawRecord, ResponseMeta,
};
