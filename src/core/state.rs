// Application state (AppState)

use crate::api::client::ApiClient;
use crate::core::config::Config;
use crate::export::excel::ExportSettings;
use crate::session::store::SessionStore;
use crate::views::list::SiswaListView;
use crate::views::notify::Toasts;
use crate::views::ViewContext;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
///
/// The session is created once here and threaded into the API client and
/// every view; nothing looks it up ambiently.
#[derive(Clone)]
pub struct AppState {
    /// Bearer token of the signed-in operator
    pub session: Arc<SessionStore>,

    /// Client for the remote Siswa API
    pub api: Arc<ApiClient>,

    /// Notifications waiting for the next rendered page
    pub toasts: Arc<Toasts>,

    /// The Siswa table and its record collection
    pub list: Arc<SiswaListView>,

    pub export: ExportSettings,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let session = match &config.session.path {
            Some(path) => SessionStore::open(path)
                .context(format!("Failed to open session file: {}", path.display()))?,
            None => SessionStore::in_memory(),
        };

        Self::with_session(config, Arc::new(session))
    }

    pub fn with_session(config: Config, session: Arc<SessionStore>) -> Result<Self> {
        let api = Arc::new(ApiClient::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
            Arc::clone(&session),
        )?);

        let toasts = Arc::new(Toasts::new());
        let ctx = ViewContext::new(Arc::clone(&api), Arc::clone(&toasts));
        let list = Arc::new(SiswaListView::new(ctx, config.table.rows_per_page));

        Ok(Self {
            session,
            api,
            toasts,
            list,
            export: ExportSettings::from(&config.export),
            config: Arc::new(config),
        })
    }

    /// Collaborators for a freshly created view, bound to the current
    /// session's scope so signing out abandons its pending calls
    pub fn view_context(&self) -> ViewContext {
        ViewContext::new(Arc::clone(&self.api), Arc::clone(&self.toasts))
            .with_scope(self.list.scope())
    }
}
