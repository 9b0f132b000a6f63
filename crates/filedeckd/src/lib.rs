mod actions;
mod details;
mod gateway;
pub mod logging;
mod rows;
mod selection;
mod session;

use std::sync::Arc;

use filedeck_config::Settings;
use filedeck_palette::{PaletteKey, PaletteOutcome};
use filedeck_query::SearchBackend;
use filedeck_shell::FileLauncher;

pub use actions::{HostAction, LaunchNotice};
pub use details::{format_modified, format_size, DetailsView};
pub use gateway::{SearchEvent, SearchGateway};
pub use rows::{FileIcon, ResultRow, EMPTY_RESULTS_HINT, EMPTY_RESULTS_MESSAGE};
pub use selection::Selection;
pub use session::{SearchApplied, Session};

/// Owns one window's session together with its collaborators.
pub struct AppService {
    pub settings: Settings,
    session: Session,
    gateway: SearchGateway,
    launcher: Arc<dyn FileLauncher>,
}

impl AppService {
    pub fn new(
        settings: Settings,
        backend: Arc<dyn SearchBackend>,
        launcher: Arc<dyn FileLauncher>,
    ) -> Self {
        let gateway = SearchGateway::new(backend);
        Self::assemble(settings, gateway, launcher)
    }

    /// Runs backend calls on `runtime` so the owner may live outside it.
    pub fn with_runtime(
        settings: Settings,
        backend: Arc<dyn SearchBackend>,
        launcher: Arc<dyn FileLauncher>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let gateway = SearchGateway::with_runtime(backend, runtime);
        Self::assemble(settings, gateway, launcher)
    }

    fn assemble(
        settings: Settings,
        gateway: SearchGateway,
        launcher: Arc<dyn FileLauncher>,
    ) -> Self {
        let session = Session::new(&settings);
        if !gateway.has_runtime() {
            tracing::warn!("session opened without an async runtime; searches will fail");
        }
        tracing::info!("session opened");
        Self {
            settings,
            session,
            gateway,
            launcher,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Sends the current query to the backend and returns its generation.
    pub fn start_search(&mut self) -> u64 {
        let request = self.session.begin_search();
        let generation = request.generation;
        if let Err(err) = self.gateway.dispatch(request) {
            tracing::warn!(generation, error = %err, "search not dispatched");
            self.session.apply_search_result(generation, Err(err));
        }
        generation
    }

    pub fn search(&mut self, query: &str) -> u64 {
        self.session.set_query(query);
        self.start_search()
    }

    /// Waits for the next backend answer and applies it.
    pub async fn pump(&mut self) -> Option<SearchApplied> {
        let SearchEvent::Done { generation, result } = self.gateway.next_event().await?;
        Some(self.session.apply_search_result(generation, result))
    }

    /// Pumps until the latest issued search has been applied.
    pub async fn settle(&mut self) {
        while self.session.is_searching() {
            if self.pump().await.is_none() {
                break;
            }
        }
    }

    /// Applies whatever answers already arrived without waiting.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Some(SearchEvent::Done { generation, result }) = self.gateway.try_next_event() {
            self.session.apply_search_result(generation, result);
            applied += 1;
        }
        applied
    }

    pub fn open_selected(&mut self) -> LaunchNotice {
        let Some(path) = self.session.selected().map(|record| record.path.clone()) else {
            return LaunchNotice::NothingSelected;
        };

        let notice = match self.launcher.open_path(&path) {
            Ok(()) => {
                tracing::info!(path = %path, "file opened");
                LaunchNotice::Opened(path)
            }
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "failed to open file");
                LaunchNotice::Failed {
                    path,
                    message: err.to_string(),
                }
            }
        };

        if matches!(notice, LaunchNotice::Failed { .. }) {
            self.session.set_notice(notice.message());
        }
        notice
    }

    pub fn open_palette(&mut self) {
        self.session.palette_mut().open();
    }

    pub fn palette_key(&mut self, key: PaletteKey) -> Option<HostAction> {
        let outcome = self.session.palette_mut().handle_key(key);
        self.host_action_for(outcome)
    }

    pub fn palette_click(&mut self, position: usize) -> Option<HostAction> {
        let outcome = self.session.palette_mut().activate(position);
        self.host_action_for(outcome)
    }

    fn host_action_for(&mut self, outcome: PaletteOutcome) -> Option<HostAction> {
        let PaletteOutcome::Fired(id) = outcome else {
            return None;
        };

        let action = HostAction::from_command_id(&id);
        match &action {
            HostAction::Search => {
                self.start_search();
            }
            HostAction::Custom(id) => {
                tracing::warn!(id = %id, "palette command has no built-in handler");
            }
            _ => {}
        }
        Some(action)
    }

    /// Tears the session down. Answers still in flight are dropped.
    pub fn close(self) {
        tracing::info!(
            pending = self.session.is_searching(),
            "session closed"
        );
    }
}
