//! The lookup seam between resolvers and the Wikidata API.

use async_trait::async_trait;

use crate::entity::EntityView;
use crate::error::{Result, WikidataError};
use crate::types::EntityId;

/// MediaWiki joins multiple values of one parameter with `|`.
const MULTI_VALUE_SEPARATOR: char = '|';

/// Read-only access to Wikidata entities.
///
/// Implemented by [`crate::WikidataClient`] for live queries and by
/// `testing::MockEntityLookup` for tests.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    /// Fetch one entity by its item identifier.
    async fn get_by_id(&self, id: &EntityId) -> Result<EntityView>;

    /// Fetch the entity linked from an English Wikipedia page title.
    async fn get_by_site_title(&self, title: &str) -> Result<EntityView>;

    /// Full-text search; returns candidate page titles in service order.
    async fn search_titles(&self, query: &str) -> Result<Vec<String>>;
}

/// Reject text that cannot be placed in a single request parameter.
pub fn validate_query(text: &str) -> Result<&str> {
    let unsafe_char = |c: char| c.is_control() || c == MULTI_VALUE_SEPARATOR;
    if text.trim().is_empty() || text.chars().any(unsafe_char) {
        return Err(WikidataError::MalformedQuery {
            query: text.to_string(),
        });
    }
    Ok(text)
}
