//! Agent dashboard commands.

use std::path::PathBuf;

use campusnest_client::{ImageUpload, PropertyDraft};
use campusnest_store::{AgentPropertyStore, AuthStore};
use clap::Subcommand;
use rust_decimal::Decimal;

use crate::{check, Context};

#[derive(Debug, Subcommand)]
pub enum AgentCommands {
    /// Dashboard totals
    Stats,
    /// Your listings
    List,
    /// Publish a listing
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Monthly rent
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        location: String,
        /// University id
        #[arg(long)]
        university: Option<String>,
        #[arg(long)]
        room_type: Option<String>,
        /// Amenity; repeat for several
        #[arg(long = "amenity")]
        amenities: Vec<String>,
        #[arg(long)]
        furnished: Option<bool>,
        /// Image file to upload; repeat for several
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Remove one of your listings
    Delete { id: String },
}

pub(crate) async fn run(ctx: &Context, command: AgentCommands) -> anyhow::Result<()> {
    let auth = AuthStore::load(ctx.api.clone(), ctx.storage.clone());
    match auth.snapshot().session {
        None => anyhow::bail!("not signed in; run `campusnest login` first"),
        Some(session) if !session.is_agent() => {
            tracing::warn!(user = %session.user.id, "signed-in user is not an agent");
        }
        Some(_) => {}
    }

    let store = AgentPropertyStore::new(ctx.api.clone());
    match command {
        AgentCommands::Stats => {
            store.fetch_stats().await;
            let state = store.snapshot();
            check(state.status.error, "failed to load dashboard stats")?;
            let stats = state.stats.unwrap_or_default();
            println!("listings:         {}", stats.total_properties);
            println!("active listings:  {}", stats.active_listings);
            println!("total views:      {}", stats.total_views);
            println!("pending requests: {}", stats.pending_requests);
        }
        AgentCommands::List => {
            store.fetch_mine().await;
            let state = store.snapshot();
            check(state.status.error, "failed to load your listings")?;
            for property in &state.properties {
                println!(
                    "{}  {}  {}/month  [{}]  {} views",
                    property.id, property.title, property.price, property.status, property.views
                );
            }
        }
        AgentCommands::Create {
            title,
            description,
            price,
            location,
            university,
            room_type,
            amenities,
            furnished,
            images,
        } => {
            let mut uploads = Vec::with_capacity(images.len());
            for path in &images {
                uploads.push(ImageUpload::from_path(path).await?);
            }
            let draft = PropertyDraft {
                title,
                description,
                price,
                location,
                university_id: university,
                room_type,
                amenities,
                furnished,
                uploads,
                ..PropertyDraft::default()
            };
            if !store.add(&draft).await {
                check(store.snapshot().status.error, "failed to create listing")?;
            }
            if let Some(created) = store.snapshot().properties.first() {
                println!("created {}  {}", created.id, created.title);
            }
        }
        AgentCommands::Delete { id } => {
            if !store.delete(&id).await {
                check(store.snapshot().status.error, "failed to delete listing")?;
            }
            println!("deleted {id}");
        }
    }
    Ok(())
}
