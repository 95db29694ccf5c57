use std::sync::Arc;

use campusnest_client::ApiClient;
use campusnest_core::University;
use tokio::sync::watch;

use crate::cell::{Generation, LoadStatus, StoreCell, Tracked};

#[derive(Debug, Clone, Default)]
pub struct UniversityState {
    pub universities: Vec<University>,
    pub status: LoadStatus,
}

impl Tracked for UniversityState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

impl UniversityState {
    /// Looks a university up by id or, case-insensitively, by abbreviation.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&University> {
        self.universities.iter().find(|u| {
            u.id == key
                || u.abbreviation
                    .as_deref()
                    .is_some_and(|a| a.eq_ignore_ascii_case(key))
        })
    }
}

pub struct UniversityStore {
    api: Arc<ApiClient>,
    cell: StoreCell<UniversityState>,
    generation: Generation,
}

impl UniversityStore {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            cell: StoreCell::new(),
            generation: Generation::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> UniversityState {
        self.cell.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<UniversityState> {
        self.cell.subscribe()
    }

    pub async fn fetch(&self) {
        let ticket = self.generation.next();
        self.cell.begin();
        let result = self.api.list_universities().await;
        if !self.generation.is_current(ticket) {
            return;
        }
        self.cell
            .settle("universities.fetch", result, |s, list| s.universities = list);
    }
}
