use std::sync::Arc;

use campusnest_client::{ApiClient, PropertyDraft, PropertyQuery};
use campusnest_core::Property;
use tokio::sync::watch;

use crate::cell::{Generation, LoadStatus, StoreCell, Tracked};

#[derive(Debug, Clone, Default)]
pub struct PropertyState {
    /// Result of the most recent list fetch, replaced wholesale.
    pub properties: Vec<Property>,
    /// Detail record from [`PropertyStore::fetch_one`].
    pub selected: Option<Property>,
    /// Filters used by the most recent list fetch; reused to re-fetch after
    /// a create.
    pub last_query: PropertyQuery,
    pub status: LoadStatus,
}

impl Tracked for PropertyState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

impl PropertyState {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }
}

/// Public listing catalogue: search results plus one detail record.
pub struct PropertyStore {
    api: Arc<ApiClient>,
    cell: StoreCell<PropertyState>,
    list_generation: Generation,
    detail_generation: Generation,
}

impl PropertyStore {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            cell: StoreCell::new(),
            list_generation: Generation::default(),
            detail_generation: Generation::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> PropertyState {
        self.cell.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PropertyState> {
        self.cell.subscribe()
    }

    /// Replaces the listing collection with the results for `query`.
    pub async fn fetch(&self, query: PropertyQuery) {
        let ticket = self.list_generation.next();
        self.cell.begin();
        self.cell.update(|s| s.last_query = query.clone());

        let result = self.api.list_properties(&query).await;
        if !self.list_generation.is_current(ticket) {
            tracing::debug!(ticket, "dropping superseded property list response");
            return;
        }
        self.cell
            .settle("properties.fetch", result, |s, list| s.properties = list);
    }

    /// Loads one listing into `selected`.
    pub async fn fetch_one(&self, id: &str) {
        let ticket = self.detail_generation.next();
        self.cell.begin();

        let result = self.api.get_property(id).await;
        if !self.detail_generation.is_current(ticket) {
            tracing::debug!(ticket, id, "dropping superseded property detail response");
            return;
        }
        self.cell
            .settle("properties.fetch_one", result, |s, p| s.selected = Some(p));
    }

    /// Creates a listing, then re-fetches with the last query so the new
    /// record appears wherever the backend sorts it.
    pub async fn add(&self, draft: &PropertyDraft) -> bool {
        self.cell.begin();
        let result = self.api.create_property(draft).await;
        let created = self.cell.settle("properties.add", result, |_, p| {
            tracing::info!(id = %p.id, "property created");
        });
        if created {
            let query = self.cell.snapshot().last_query;
            self.fetch(query).await;
        }
        created
    }

    /// Updates a listing and splices the returned record into the list and
    /// the detail slot.
    pub async fn update(&self, id: &str, draft: &PropertyDraft) -> bool {
        self.cell.begin();
        let result = self.api.update_property(id, draft).await;
        self.cell
            .settle("properties.update", result, |s, updated| splice(s, updated))
    }

    /// Deletes a listing and drops it locally.
    pub async fn delete(&self, id: &str) -> bool {
        self.cell.begin();
        let result = self.api.delete_property(id).await;
        self.cell.settle("properties.delete", result, |s, ()| {
            s.properties.retain(|p| p.id != id);
            if s.selected.as_ref().is_some_and(|p| p.id == id) {
                s.selected = None;
            }
        })
    }
}

fn splice(state: &mut PropertyState, updated: Property) {
    if let Some(slot) = state.properties.iter_mut().find(|p| p.id == updated.id) {
        *slot = updated.clone();
    }
    if state
        .selected
        .as_ref()
        .is_some_and(|p| p.id == updated.id)
    {
        state.selected = Some(updated);
    }
}
