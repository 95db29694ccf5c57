//! Roommate feed and request commands.

use campusnest_core::{NewRoommateRequest, RequestStatus, RoommateRequest};
use campusnest_store::{RoommateFilterStore, RoommateStore};
use clap::{Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::{check, Context};

#[derive(Debug, Subcommand)]
pub enum RoommateCommands {
    /// Open requests from other students
    Feed {
        #[arg(long)]
        min_budget: Option<Decimal>,
        #[arg(long)]
        max_budget: Option<Decimal>,
        #[arg(long)]
        gender: Option<String>,
        /// University id
        #[arg(long)]
        university: Option<String>,
        /// PENDING, ACCEPTED or REJECTED
        #[arg(long)]
        status: Option<RequestStatus>,
    },
    /// Requests you have sent
    Mine,
    /// Post a roommate request
    Request {
        #[arg(long)]
        budget: Decimal,
        /// Listing the request is about
        #[arg(long)]
        property: Option<String>,
        /// Preference tag; repeat for several
        #[arg(long = "preference")]
        preferences: Vec<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Accept or reject a request
    Respond {
        id: String,
        #[arg(value_enum, ignore_case = true)]
        decision: Decision,
    },
}

/// The answers a recipient can give; a request cannot be moved back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPER")]
pub enum Decision {
    Accepted,
    Rejected,
}

impl From<Decision> for RequestStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accepted => RequestStatus::Accepted,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

fn print_request(request: &RoommateRequest) {
    let who = request
        .requester
        .as_ref()
        .map_or(request.requester_id.as_str(), |u| u.name.as_str());
    println!(
        "{}  {}  budget {}  [{}]",
        request.id, who, request.budget, request.status
    );
    if !request.preferences.is_empty() {
        println!("    prefers: {}", request.preferences.join(", "));
    }
    if let Some(message) = &request.message {
        println!("    \"{message}\"");
    }
}

pub(crate) async fn run(ctx: &Context, command: RoommateCommands) -> anyhow::Result<()> {
    let store = RoommateStore::new(ctx.api.clone());
    match command {
        RoommateCommands::Feed {
            min_budget,
            max_budget,
            gender,
            university,
            status,
        } => {
            let mut filters = RoommateFilterStore::new();
            filters.set_budget(min_budget, max_budget);
            filters.set_gender(gender.as_deref());
            filters.set_university(university.as_deref());
            filters.set_status(status);

            store.fetch_feed().await;
            let state = store.snapshot();
            check(state.status.error, "failed to load roommate feed")?;
            let shown = filters.apply(&state.feed);
            for request in &shown {
                print_request(request);
            }
            println!(
                "{} request(s), {} filter(s) active",
                shown.len(),
                filters.active_count()
            );
        }
        RoommateCommands::Mine => {
            store.fetch_my_requests().await;
            let state = store.snapshot();
            check(state.status.error, "failed to load your requests")?;
            for request in &state.my_requests {
                print_request(request);
            }
        }
        RoommateCommands::Request {
            budget,
            property,
            preferences,
            message,
        } => {
            let request = NewRoommateRequest {
                property_id: property,
                budget,
                preferences,
                message,
            };
            if !store.send_request(&request).await {
                check(store.snapshot().status.error, "failed to send request")?;
            }
            if let Some(created) = store.snapshot().my_requests.first() {
                print_request(created);
            }
        }
        RoommateCommands::Respond { id, decision } => {
            let status = RequestStatus::from(decision);
            if !store.respond(&id, status).await {
                check(store.snapshot().status.error, "failed to update request")?;
            }
            println!("{id} {status}");
        }
    }
    Ok(())
}
