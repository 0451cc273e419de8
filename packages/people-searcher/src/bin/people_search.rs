//! CLI for resolving person names against Wikidata
//!
//! Prints one result per line so output can be pasted back next to the
//! input column of a catalogue export.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use people_searcher::{Config, EntityId, EntityLookup, PeopleSearcher};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "people-search")]
#[command(about = "Resolve person names to Wikidata identifiers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve labels like "Ada Lovelace (1815-1852)"; prints the Q-id or "-"
    Resolve {
        #[arg(required = true)]
        terms: Vec<String>,
    },

    /// Print the English Wikipedia URL for a Q-id
    Url { id: String },

    /// List full-text search titles for a query
    Search { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr keeps stdout clean for results)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,people_searcher=debug,wikidata_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let client = config.client();

    match cli.command {
        Commands::Resolve { terms } => {
            let searcher = PeopleSearcher::from_lookup(client);
            for term in terms {
                let outcome = searcher
                    .resolve(&term)
                    .await
                    .with_context(|| format!("Failed to resolve {:?}", term))?;
                match outcome {
                    Some(id) => println!("{}\t{}", term, id),
                    None => println!("{}\t-", term),
                }
            }
        }
        Commands::Url { id } => {
            let id = EntityId::parse(&id)?;
            let searcher = PeopleSearcher::from_lookup(client);
            match searcher.wikipedia_url(&id).await? {
                Some(url) => println!("{}", url),
                None => println!("-"),
            }
        }
        Commands::Search { query } => {
            let titles = client
                .search_titles(&query)
                .await
                .with_context(|| format!("Search failed for {:?}", query))?;
            for title in titles {
                println!("{}", title);
            }
        }
    }

    Ok(())
}
