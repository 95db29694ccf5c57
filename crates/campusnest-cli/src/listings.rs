//! Listing browse commands plus the local favorites and history stores.

use campusnest_client::PropertyQuery;
use campusnest_core::Property;
use campusnest_store::{
    FavoritesStore, FilterStore, Furnished, PriceRange, PropertyStore, UniversityStore,
    ViewHistoryStore,
};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use crate::{check, Context};

#[derive(Debug, Subcommand)]
pub enum PropertyCommands {
    /// Search listings
    List {
        /// Free-text search term
        #[arg(long)]
        search: Option<String>,
        /// Area or neighbourhood
        #[arg(long)]
        location: Option<String>,
        /// University id
        #[arg(long)]
        university: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show one listing and record it in view history
    Show { id: String },
}

#[derive(Debug, Subcommand)]
pub enum FilterCommands {
    /// Show how many filters the given flags activate
    Count {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Search filter flags shared by `properties list` and `filters count`.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    #[arg(long)]
    pub min_price: Option<Decimal>,
    #[arg(long)]
    pub max_price: Option<Decimal>,
    /// Room type; repeat for several
    #[arg(long = "room-type")]
    pub room_types: Vec<String>,
    /// Required amenity; repeat for several
    #[arg(long = "amenity")]
    pub amenities: Vec<String>,
    /// Maximum distance to campus in kilometres
    #[arg(long)]
    pub max_distance: Option<f64>,
    /// Minimum rating, 0-5
    #[arg(long)]
    pub min_rating: Option<f64>,
    /// Only furnished (true) or unfurnished (false) listings
    #[arg(long)]
    pub furnished: Option<bool>,
}

impl FilterArgs {
    #[must_use]
    pub fn to_store(&self) -> FilterStore {
        let mut store = FilterStore::new();
        if self.min_price.is_some() || self.max_price.is_some() {
            store.set_price_range(PriceRange::new(
                self.min_price.unwrap_or(PriceRange::DEFAULT.min),
                self.max_price.unwrap_or(PriceRange::DEFAULT.max),
            ));
        }
        store.set_room_types(self.room_types.clone());
        store.set_amenities(self.amenities.clone());
        store.set_max_distance_km(self.max_distance);
        if let Some(rating) = self.min_rating {
            store.set_min_rating(rating);
        }
        store.set_furnished(match self.furnished {
            None => Furnished::Any,
            Some(true) => Furnished::Yes,
            Some(false) => Furnished::No,
        });
        store
    }
}

#[derive(Debug, Subcommand)]
pub enum FavoriteCommands {
    /// List saved listings
    List,
    /// Save or unsave a listing
    Toggle { id: String },
    /// Remove every saved listing
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommands {
    /// Most recently viewed first
    List,
    Clear,
}

fn print_property(property: &Property, backend_url: &str) {
    println!(
        "{}  {}  {}/month  {}  [{}]",
        property.id, property.title, property.price, property.location, property.status
    );
    for url in property.image_urls(backend_url) {
        println!("    {url}");
    }
}

pub(crate) async fn run_properties(ctx: &Context, command: PropertyCommands) -> anyhow::Result<()> {
    let store = PropertyStore::new(ctx.api.clone());
    match command {
        PropertyCommands::List {
            search,
            location,
            university,
            filters,
        } => {
            let filters = filters.to_store();
            let query = PropertyQuery {
                search,
                location,
                university_id: university,
                ..filters.to_query()
            };
            store.fetch(query).await;
            let state = store.snapshot();
            check(state.status.error, "failed to load listings")?;

            let active = filters.active_count();
            if active > 0 {
                println!("{active} filter(s) active");
            }
            let favorites = FavoritesStore::load(ctx.storage.clone());
            let shown = filters.apply(&state.properties);
            for property in &shown {
                let marker = if favorites.is_favorite(&property.id) { "*" } else { " " };
                print!("{marker} ");
                print_property(property, &ctx.config.backend_url);
            }
            println!("{} listing(s)", shown.len());
        }
        PropertyCommands::Show { id } => {
            store.fetch_one(&id).await;
            let state = store.snapshot();
            check(state.status.error, "failed to load listing")?;
            let Some(property) = state.selected else {
                anyhow::bail!("listing {id} not found");
            };

            let mut history = ViewHistoryStore::load(ctx.storage.clone());
            history.record(&property.id);

            print_property(&property, &ctx.config.backend_url);
            if let Some(description) = &property.description {
                println!("\n{description}");
            }
            if !property.amenities.is_empty() {
                println!("amenities: {}", property.amenities.join(", "));
            }
            if let Some(agent) = &property.agent {
                println!("agent: {}", agent.name);
            }
            println!("views: {}", property.views);
        }
    }
    Ok(())
}

pub(crate) async fn run_favorites(ctx: &Context, command: FavoriteCommands) -> anyhow::Result<()> {
    let mut favorites = FavoritesStore::load(ctx.storage.clone());
    match command {
        FavoriteCommands::List => {
            if favorites.is_empty() {
                println!("no saved listings");
                return Ok(());
            }
            let store = PropertyStore::new(ctx.api.clone());
            for id in favorites.ids() {
                store.fetch_one(id).await;
                let state = store.snapshot();
                match (state.selected, state.status.error) {
                    (Some(property), None) if property.id == *id => {
                        print_property(&property, &ctx.config.backend_url);
                    }
                    (_, error) => {
                        tracing::warn!(id = %id, error = ?error, "saved listing unavailable");
                        println!("{id}  (unavailable)");
                    }
                }
            }
        }
        FavoriteCommands::Toggle { id } => {
            if favorites.toggle(&id) {
                println!("saved {id}");
            } else {
                println!("removed {id}");
            }
        }
        FavoriteCommands::Clear => {
            favorites.clear();
            println!("cleared saved listings");
        }
    }
    Ok(())
}

pub(crate) fn run_history(ctx: &Context, command: HistoryCommands) {
    let mut history = ViewHistoryStore::load(ctx.storage.clone());
    match command {
        HistoryCommands::List => {
            for (i, id) in history.entries().iter().enumerate() {
                println!("{:>2}. {id}", i + 1);
            }
            if history.is_empty() {
                println!("no viewed listings");
            }
        }
        HistoryCommands::Clear => {
            history.clear();
            println!("cleared view history");
        }
    }
}

pub(crate) fn run_filters(command: &FilterCommands) {
    match command {
        FilterCommands::Count { filters } => {
            let store = filters.to_store();
            println!("{} filter(s) active", store.active_count());
        }
    }
}

pub(crate) async fn run_universities(ctx: &Context) -> anyhow::Result<()> {
    let store = UniversityStore::new(ctx.api.clone());
    store.fetch().await;
    let state = store.snapshot();
    check(state.status.error, "failed to load universities")?;
    for university in &state.universities {
        println!("{}  {}  {}", university.id, university.short_name(), university.name);
    }
    Ok(())
}
