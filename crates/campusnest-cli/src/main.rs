mod account;
mod agent;
mod listings;
mod roommates;

use std::sync::Arc;

use anyhow::Context as _;
use campusnest_client::ApiClient;
use campusnest_core::AppConfig;
use campusnest_store::{FileStorage, PersistedToken, Storage};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::account::BookArgs;
use crate::agent::AgentCommands;
use crate::listings::{FavoriteCommands, FilterCommands, HistoryCommands, PropertyCommands};
use crate::roommates::RoommateCommands;

#[derive(Debug, Parser)]
#[command(name = "campusnest")]
#[command(about = "CampusNest student-housing marketplace client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse listings
    Properties {
        #[command(subcommand)]
        command: PropertyCommands,
    },
    /// Manage saved listings
    Favorites {
        #[command(subcommand)]
        command: FavoriteCommands,
    },
    /// Recently viewed listings
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Inspect search filters
    Filters {
        #[command(subcommand)]
        command: FilterCommands,
    },
    /// Roommate matching
    Roommates {
        #[command(subcommand)]
        command: RoommateCommands,
    },
    /// List universities
    Universities,
    /// Agent dashboard
    Agent {
        #[command(subcommand)]
        command: AgentCommands,
    },
    /// Book a listing through the simulated payment flow
    Book(BookArgs),
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
}

/// Process-wide handles shared by the command handlers.
pub(crate) struct Context {
    pub(crate) config: AppConfig,
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) api: Arc<ApiClient>,
}

impl Context {
    fn build(config: AppConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(
            FileStorage::open(&config.storage_dir)
                .with_context(|| format!("opening storage at {}", config.storage_dir.display()))?,
        );
        let api = Arc::new(
            ApiClient::new(
                &config.api_base_url,
                config.request_timeout_secs,
                Arc::new(PersistedToken::new(Arc::clone(&storage))),
            )
            .context("failed to build API client")?,
        );
        Ok(Self {
            config,
            storage,
            api,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config =
        campusnest_core::load_app_config_from_env().context("failed to load configuration")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("campusnest: pass --help to see available commands");
        return Ok(());
    };

    tracing::debug!(env = %config.env, api = %config.api_base_url, "starting");
    let ctx = Context::build(config)?;

    match command {
        Commands::Properties { command } => listings::run_properties(&ctx, command).await,
        Commands::Favorites { command } => listings::run_favorites(&ctx, command).await,
        Commands::History { command } => {
            listings::run_history(&ctx, command);
            Ok(())
        }
        Commands::Filters { command } => {
            listings::run_filters(&command);
            Ok(())
        }
        Commands::Roommates { command } => roommates::run(&ctx, command).await,
        Commands::Universities => listings::run_universities(&ctx).await,
        Commands::Agent { command } => agent::run(&ctx, command).await,
        Commands::Book(args) => account::run_book(&ctx, args).await,
        Commands::Login { email, password } => account::run_login(&ctx, &email, &password).await,
        Commands::Logout => {
            account::run_logout(&ctx);
            Ok(())
        }
    }
}

/// Turns a store's recorded error into a command failure.
pub(crate) fn check(error: Option<String>, what: &str) -> anyhow::Result<()> {
    match error {
        Some(message) => anyhow::bail!("{what}: {message}"),
        None => Ok(()),
    }
}
