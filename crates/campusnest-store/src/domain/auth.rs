use std::sync::Arc;

use campusnest_client::{ApiClient, TokenSource};
use campusnest_core::AuthSession;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::cell::{LoadStatus, StoreCell, Tracked};
use crate::storage::{clear_persisted, load_persisted, save_persisted, Storage, AUTH_KEY};

const AUTH_VERSION: u32 = 0;

/// The persisted half of the auth state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedAuth {
    session: Option<AuthSession>,
}

fn load_session(storage: &dyn Storage) -> Option<AuthSession> {
    load_persisted::<PersistedAuth>(storage, AUTH_KEY, AUTH_VERSION).and_then(|a| a.session)
}

/// Reads the bearer token from the persisted auth blob on every call, so the
/// shared HTTP client always sends whatever the auth store last wrote.
pub struct PersistedToken {
    storage: Arc<dyn Storage>,
}

impl PersistedToken {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

impl TokenSource for PersistedToken {
    fn bearer_token(&self) -> Option<String> {
        load_session(self.storage.as_ref()).map(|s| s.token)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub session: Option<AuthSession>,
    pub status: LoadStatus,
}

impl Tracked for AuthState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

/// Signed-in session, persisted under the auth key.
pub struct AuthStore {
    api: Arc<ApiClient>,
    storage: Arc<dyn Storage>,
    cell: StoreCell<AuthState>,
}

impl AuthStore {
    /// Restores any session persisted by an earlier run.
    #[must_use]
    pub fn load(api: Arc<ApiClient>, storage: Arc<dyn Storage>) -> Self {
        let cell = StoreCell::new();
        let session = load_session(storage.as_ref());
        cell.update(|s: &mut AuthState| s.session = session);
        Self { api, storage, cell }
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.cell.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.cell.subscribe()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.cell.snapshot().is_authenticated()
    }

    /// Signs in and persists the returned session.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.cell.begin();
        let result = self.api.login(email, password).await;
        let persisted = result.as_ref().ok().cloned();
        let ok = self
            .cell
            .settle("auth.login", result, |s, session| s.session = Some(session));
        if let Some(session) = persisted {
            self.persist(Some(session));
        }
        ok
    }

    /// Stores a session obtained elsewhere (e.g. registration).
    pub fn set_session(&self, session: AuthSession) {
        self.persist(Some(session.clone()));
        self.cell.update(|s| s.session = Some(session));
    }

    /// Forgets the session and removes the persisted blob.
    pub fn logout(&self) {
        clear_persisted(self.storage.as_ref(), AUTH_KEY);
        self.cell.update(|s| {
            s.session = None;
            s.status = LoadStatus::default();
        });
    }

    fn persist(&self, session: Option<AuthSession>) {
        save_persisted(
            self.storage.as_ref(),
            AUTH_KEY,
            AUTH_VERSION,
            &PersistedAuth { session },
        );
    }
}
