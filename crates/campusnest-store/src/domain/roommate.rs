use std::sync::Arc;

use campusnest_client::ApiClient;
use campusnest_core::{NewRoommateRequest, RequestStatus, RoommateRequest};
use tokio::sync::watch;

use crate::cell::{Generation, LoadStatus, StoreCell, Tracked};

#[derive(Debug, Clone, Default)]
pub struct RoommateState {
    /// Open requests from other students.
    pub feed: Vec<RoommateRequest>,
    /// Requests sent by or addressed to the signed-in student.
    pub my_requests: Vec<RoommateRequest>,
    pub status: LoadStatus,
}

impl Tracked for RoommateState {
    fn status_mut(&mut self) -> &mut LoadStatus {
        &mut self.status
    }
}

pub struct RoommateStore {
    api: Arc<ApiClient>,
    cell: StoreCell<RoommateState>,
    feed_generation: Generation,
    mine_generation: Generation,
}

impl RoommateStore {
    #[must_use]
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            cell: StoreCell::new(),
            feed_generation: Generation::default(),
            mine_generation: Generation::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> RoommateState {
        self.cell.snapshot()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RoommateState> {
        self.cell.subscribe()
    }

    pub async fn fetch_feed(&self) {
        let ticket = self.feed_generation.next();
        self.cell.begin();
        let result = self.api.roommate_feed().await;
        if !self.feed_generation.is_current(ticket) {
            return;
        }
        self.cell
            .settle("roommates.fetch_feed", result, |s, feed| s.feed = feed);
    }

    pub async fn fetch_my_requests(&self) {
        let ticket = self.mine_generation.next();
        self.cell.begin();
        let result = self.api.my_roommate_requests().await;
        if !self.mine_generation.is_current(ticket) {
            return;
        }
        self.cell
            .settle("roommates.fetch_my_requests", result, |s, mine| {
                s.my_requests = mine;
            });
    }

    /// Sends a request; the created record goes to the front of `my_requests`.
    pub async fn send_request(&self, request: &NewRoommateRequest) -> bool {
        self.cell.begin();
        let result = self.api.send_roommate_request(request).await;
        self.cell
            .settle("roommates.send_request", result, |s, created| {
                s.my_requests.insert(0, created);
            })
    }

    /// Accepts or rejects a request and splices the answer back in.
    pub async fn respond(&self, id: &str, status: RequestStatus) -> bool {
        self.cell.begin();
        let result = self.api.respond_roommate_request(id, status).await;
        self.cell.settle("roommates.respond", result, |s, updated| {
            for list in [&mut s.feed, &mut s.my_requests] {
                if let Some(slot) = list.iter_mut().find(|r| r.id == updated.id) {
                    *slot = updated.clone();
                }
            }
        })
    }
}
