//! Resolve free-text person references to Wikidata items.
//!
//! Names are folded to basic Latin, optional lifespan hints are split off,
//! and candidates are filtered by birth/death year. Disambiguation pages,
//! scientific articles and missing entities never resolve.
//!
//! # Usage
//!
//! ```rust,ignore
//! use people_searcher::{Config, PeopleSearcher};
//!
//! let config = Config::from_env()?;
//! let searcher = PeopleSearcher::from_lookup(config.client());
//!
//! if let Some(id) = searcher.resolve("Ada Lovelace (1815-1852)").await? {
//!     println!("{id} {:?}", searcher.wikipedia_url(&id).await?);
//! }
//! ```

pub mod config;
pub mod date_hint;
pub mod engine;
pub mod fold;

pub use config::Config;
pub use date_hint::{parse_date_hint, ResolutionRequest};
pub use engine::{dates_match, decide, Decision, PeopleSearcher};
pub use fold::fold;

pub use wikidata_client::{EntityId, EntityLookup, EntityView, Lookup, WikidataClient, WikidataError};
