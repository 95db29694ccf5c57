use std::sync::Arc;

use campusnest_client::{ApiClient, PropertyDraft};
use campusnest_core::{DashboardStats, Property};
use tokio::sync::watch;

use crate::cell::{Generation, LoadStatus, StoreCell, Tracked};

#[derive(Debug, Clone, Default)]
pub struct AgentPropertyState {
    /// Listings owned by the signed-in agent.
    pub properties: Vec<Property>,
    pub stats: Option<DashboardStats>,
    pub status: LoadStatus,
}

impl Tracked for AgentPropertyState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

/// The agent dashboard's own listings and headline stats. Every mutation is
/// applied as a local splice; nothing is re-fetched.
pub struct AgentPropertyStore {
    api: Arc<ApiClient>,
    cell: StoreCell<AgentPropertyState>,
    list_generation: Generation,
    stats_generation: Generation,
}

impl AgentPropertyStore {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            cell: StoreCell::new(),
            list_generation: Generation::default(),
            stats_generation: Generation::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> AgentPropertyState {
        self.cell.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AgentPropertyState> {
        self.cell.subscribe()
    }

    pub async fn fetch_mine(&self) {
        let ticket = self.list_generation.next();
        self.cell.begin();
        let result = self.api.list_agent_properties().await;
        if !self.list_generation.is_current(ticket) {
            return;
        }
        self.cell
            .settle("agent_properties.fetch_mine", result, |s, list| {
                s.properties = list;
            });
    }

    pub async fn fetch_stats(&self) {
        let ticket = self.stats_generation.next();
        self.cell.begin();
        let result = self.api.dashboard_stats().await;
        if !self.stats_generation.is_current(ticket) {
            return;
        }
        self.cell
            .settle("agent_properties.fetch_stats", result, |s, stats| {
                s.stats = Some(stats);
            });
    }

    /// Creates a listing and puts it at the top of the dashboard list.
    pub async fn add(&self, draft: &PropertyDraft) -> bool {
        self.cell.begin();
        let result = self.api.create_property(draft).await;
        self.cell.settle("agent_properties.add", result, |s, created| {
            s.properties.retain(|p| p.id != created.id);
            s.properties.insert(0, created);
            if let Some(stats) = s.stats.as_mut() {
                stats.total_properties += 1;
            }
        })
    }

    pub async fn update(&self, id: &str, draft: &PropertyDraft) -> bool {
        self.cell.begin();
        let result = self.api.update_property(id, draft).await;
        self.cell
            .settle("agent_properties.update", result, |s, updated| {
                if let Some(slot) = s.properties.iter_mut().find(|p| p.id == updated.id) {
                    *slot = updated;
                }
            })
    }

    pub async fn delete(&self, id: &str) -> bool {
        self.cell.begin();
        let result = self.api.delete_property(id).await;
        self.cell.settle("agent_properties.delete", result, |s, ()| {
            let before = s.properties.len();
            s.properties.retain(|p| p.id != id);
            if s.properties.len() < before {
                if let Some(stats) = s.stats.as_mut() {
                    stats.total_properties = stats.total_properties.saturating_sub(1);
                }
            }
        })
    }
}
