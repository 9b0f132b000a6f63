use std::sync::Arc;

use filedeck_model::FileRecord;
use filedeck_query::{BackendError, SearchBackend, SearchRequest};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub enum SearchEvent {
    Done {
        generation: u64,
        result: Result<Vec<FileRecord>, BackendError>,
    },
}

/// Runs backend calls off the session and funnels the answers back in arrival order.
pub struct SearchGateway {
    backend: Arc<dyn SearchBackend>,
    runtime: Option<Handle>,
    event_tx: mpsc::UnboundedSender<SearchEvent>,
    event_rx: mpsc::UnboundedReceiver<SearchEvent>,
}

impl SearchGateway {
    /// Binds to the runtime current at construction, if any.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self::build(backend, Handle::try_current().ok())
    }

    pub fn with_runtime(backend: Arc<dyn SearchBackend>, runtime: Handle) -> Self {
        Self::build(backend, Some(runtime))
    }

    fn build(backend: Arc<dyn SearchBackend>, runtime: Option<Handle>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            backend,
            runtime,
            event_tx,
            event_rx,
        }
    }

    pub fn has_runtime(&self) -> bool {
        self.runtime.is_some()
    }

    /// Every dispatched generation gets exactly one `Done`, even when the backend panics.
    pub fn dispatch(&self, request: SearchRequest) -> Result<JoinHandle<()>, BackendError> {
        let Some(runtime) = self.runtime.clone() else {
            return Err(BackendError::Unavailable(
                "no async runtime to run the search on".to_string(),
            ));
        };

        let backend = Arc::clone(&self.backend);
        let event_tx = self.event_tx.clone();
        let generation = request.generation;
        let inner_runtime = runtime.clone();

        Ok(runtime.spawn(async move {
            let call = inner_runtime.spawn(async move { backend.search(&request).await });
            let result = match call.await {
                Ok(result) => result,
                Err(err) => {
                    tracing::warn!(generation, error = %err, "search task aborted");
                    Err(BackendError::Unavailable(format!("search task failed: {err}")))
                }
            };
            // The receiver is gone once the session closed.
            let _ = event_tx.send(SearchEvent::Done { generation, result });
        }))
    }

    pub async fn next_event(&mut self) -> Option<SearchEvent> {
        self.event_rx.recv().await
    }

    pub fn try_next_event(&mut self) -> Option<SearchEvent> {
        self.event_rx.try_recv().ok()
    }
}
