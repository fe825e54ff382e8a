use clap::{Parser, Subcommand};
use mietradar::app::{AppSession, RemoteStatus};
use mietradar::config::{api_base_url, DbConfig, ServerConfig};
use mietradar::search::{FilterCriteria, DEFAULT_MAX_PRICE};
use mietradar::server::{self, AppState};
use mietradar::sources::districts::districts;
use mietradar::sources::{ApiListingSource, MockCatalog, PgRowStore};
use mietradar::view::ViewState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mietradar", version, about = "Rental search for Munich")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the backend API in front of the listings database
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Search the listing catalog
    Search {
        /// Text matched against title and district
        #[arg(short, long, default_value = "")]
        query: String,
        /// Maximum cold rent in euros
        #[arg(long, default_value_t = DEFAULT_MAX_PRICE)]
        max_price: u32,
        /// Minimum number of rooms
        #[arg(long, default_value_t = 0.0)]
        min_rooms: f32,
        /// Only listings in this district
        #[arg(long)]
        district: Option<String>,
        /// Backend base URL (overrides MIETRADAR_API)
        #[arg(long)]
        api: Option<String>,
        /// Skip the backend and search the built-in offers only
        #[arg(long)]
        offline: bool,
        /// Write the matches as JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the known districts
    Districts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Serve { port } => {
            let db = DbConfig::from_env()?;
            let mut config = ServerConfig::from_env()?;
            if let Some(port) = port {
                config.port = port;
            }

            let store = PgRowStore::connect_lazy(&db);
            server::serve(&config, Arc::new(AppState::new(Arc::new(store)))).await
        }
        Command::Search {
            query,
            max_price,
            min_rooms,
            district,
            api,
            offline,
            out,
        } => {
            let mut app = AppSession::new(MockCatalog::new().into_listings());

            if !offline {
                let source = ApiListingSource::new(api.unwrap_or_else(api_base_url))?;
                info!("Loading listings from {}", source.endpoint());
                if let RemoteStatus::Failed(message) = app.load_remote(&source).await {
                    warn!("{}", message);
                }
                let added = app.merge_remote();
                info!("Added {} backend listings to the catalog", added);
            }

            let mut criteria = FilterCriteria::default()
                .with_query(query)
                .with_max_price(max_price)
                .with_min_rooms(min_rooms);
            if let Some(district) = district {
                criteria = criteria.with_district(district);
            }
            *app.criteria_mut() = criteria;
            app.show(ViewState::Listings);

            let matches = app.visible_listings();
            info!("✅ {} of {} listings match\n", matches.len(), app.catalog().len());

            for (i, listing) in matches.iter().enumerate() {
                println!("{}. {} ({} € kalt, {} € warm)", i + 1, listing.title, listing.price, listing.warm_rent());
                println!("   {} Zimmer, {} m²", listing.rooms, listing.size);
                println!("   District: {}", listing.district);
                println!("   ID: {}", listing.id);
                if !listing.amenities.is_empty() {
                    let amenities: Vec<&str> = listing.amenities.iter().map(String::as_str).collect();
                    println!("   Amenities: {}", amenities.join(", "));
                }
                println!("   Contact: {}", listing.contact_name);
                println!();
            }

            if let Some(path) = out {
                let json = serde_json::to_string_pretty(&matches)?;
                tokio::fs::write(&path, json).await?;
                info!("💾 Saved {} listings to {}", matches.len(), path.display());
            }
            Ok(())
        }
        Command::Districts => {
            for name in districts() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}
