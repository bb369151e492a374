use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use fleet_core::{Effect, ErrorInfo, FetchRequest, PageResult, RequestId};
use fleet_logging::{fleet_debug, fleet_error};
use futures_util::FutureExt;

use crate::mapper::build_page;
use crate::{ApiError, EngineError, EngineEvent, ListApi, ViewModelMapper};

/// Reported when a list call or the mapper panics before producing an outcome.
pub const ABORTED_MESSAGE: &str = "list request aborted";

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        request: FetchRequest,
    },
}

/// Runs list API calls on a background runtime and reports completions.
///
/// Calls run concurrently; completions arrive in resolution order. Dropping the
/// handle stops the runtime and abandons outstanding calls.
pub struct EngineHandle<V> {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent<V>>,
}

impl<V: Send + 'static> EngineHandle<V> {
    pub fn new(
        api: Arc<dyn ListApi>,
        mapper: Arc<dyn ViewModelMapper<V>>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new().map_err(EngineError::Runtime)?;

        thread::Builder::new()
            .name("fleet-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let mapper = mapper.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), mapper.as_ref(), command, event_tx).await;
                    });
                }
                fleet_debug!("Engine command channel closed; shutting down runtime");
            })
            .map_err(EngineError::Thread)?;

        Ok(Self { cmd_tx, event_rx })
    }
}

impl<V> EngineHandle<V> {
    pub fn enqueue(&self, effect: Effect) {
        match effect {
            Effect::FetchPage {
                request_id,
                request,
            } => {
                let _ = self.cmd_tx.send(EngineCommand::Fetch {
                    request_id,
                    request,
                });
            }
        }
    }

    pub fn try_recv(&self) -> Option<EngineEvent<V>> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent<V>> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command<V>(
    api: &dyn ListApi,
    mapper: &dyn ViewModelMapper<V>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent<V>>,
) {
    match command {
        EngineCommand::Fetch {
            request_id,
            request,
        } => {
            // Every request resolves, even if the api or the mapper panics.
            let outcome = AssertUnwindSafe(fetch_page(api, mapper, &request))
                .catch_unwind()
                .await;
            let result = match outcome {
                Ok(Ok(page)) => Ok(page),
                Ok(Err(err)) => {
                    fleet_debug!(
                        "List request {} page={} failed: {}",
                        request_id,
                        request.page,
                        err
                    );
                    Err(ErrorInfo::from(err))
                }
                Err(_) => {
                    fleet_error!(
                        "List request {} page={} panicked",
                        request_id,
                        request.page
                    );
                    Err(ErrorInfo::new(ABORTED_MESSAGE))
                }
            };
            let _ = event_tx.send(EngineEvent::PageFetched { request_id, result });
        }
    }
}

async fn fetch_page<V>(
    api: &dyn ListApi,
    mapper: &dyn ViewModelMapper<V>,
    request: &FetchRequest,
) -> Result<PageResult<V>, ApiError> {
    let response = api.fetch(request).await?;
    Ok(build_page(request, response, mapper))
}
