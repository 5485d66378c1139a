use std::{collections::HashMap, sync::Arc};

use shared::domain::SessionId;
use tokio::sync::Mutex;
use tracing::{info, warn};
use viewstate::{
    BaseController, Controller, ControllerArgs, ControllerFactory, ControllerRegistry,
    ViewStateManager,
};

/// One manager per session; the mutex serializes every view state
/// operation within that session.
pub(crate) type SharedManager = Arc<Mutex<ViewStateManager>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) factory: Arc<ControllerRegistry>,
    pub(crate) root_controller_type: String,
    sessions: Arc<Mutex<HashMap<SessionId, SharedManager>>>,
}

impl AppState {
    pub(crate) fn new(
        factory: ControllerRegistry,
        root_controller_type: impl Into<String>,
    ) -> Self {
        Self {
            factory: Arc::new(factory),
            root_controller_type: root_controller_type.into(),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub(crate) async fn create_session(&self) -> SessionId {
        let session_id = SessionId::new();
        let manager = Arc::new(Mutex::new(self.new_manager()));
        self.sessions.lock().await.insert(session_id, manager);
        info!(%session_id, "session created");
        session_id
    }

    pub(crate) async fn session(&self, session_id: SessionId) -> Option<SharedManager> {
        self.sessions.lock().await.get(&session_id).cloned()
    }

    fn new_manager(&self) -> ViewStateManager {
        let factory = Arc::clone(&self.factory);
        let root_type = self.root_controller_type.clone();
        ViewStateManager::with_root_factory(move || -> Box<dyn Controller> {
            factory
                .init_controller(&root_type, ControllerArgs::new())
                .unwrap_or_else(|error| {
                    warn!(%root_type, %error, "falling back to base root controller");
                    Box::new(BaseController::new())
                })
        })
    }
}
