use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::WikidataError;

/// Root key Wikidata uses for an entity that does not exist.
pub const NOT_FOUND_SENTINEL: &str = "-1";

/// A validated Wikidata item identifier (`Q` followed by digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub fn parse(raw: &str) -> Result<Self, WikidataError> {
        let digits = raw
            .strip_prefix('Q')
            .ok_or_else(|| WikidataError::InvalidEntityId(raw.to_string()))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WikidataError::InvalidEntityId(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EntityId {
    type Err = WikidataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body returned by `action=wbgetentities`.
///
/// Entities are kept as raw JSON: per-entity schemas are not guaranteed,
/// so field paths are resolved lazily by [`crate::EntityView`].
#[derive(Debug, Clone, Deserialize)]
pub struct EntitiesResponse {
    #[serde(default)]
    pub entities: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Body returned by `action=query&list=search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<SearchQuery>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: Vec<SearchHit>,
}

/// A single full-text search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub title: String,
}

/// MediaWiki reports request errors in-band with a 200 status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

impl From<ApiErrorBody> for WikidataError {
    fn from(body: ApiErrorBody) -> Self {
        WikidataError::Api {
            status: 200,
            message: format!("{}: {}", body.code, body.info),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_parse() {
        assert_eq!(EntityId::parse("Q42").unwrap().as_str(), "Q42");
        assert!("Q".parse::<EntityId>().is_err());
        assert!("q42".parse::<EntityId>().is_err());
        assert!("Q42x".parse::<EntityId>().is_err());
        assert!("Ada Lovelace".parse::<EntityId>().is_err());
        assert!(EntityId::parse(NOT_FOUND_SENTINEL).is_err());
    }

    #[test]
    fn test_entities_response_keeps_key_order() {
        let body = r#"{"entities": {"Q2": {}, "Q1": {}}}"#;
        let resp: EntitiesResponse = serde_json::from_str(body).unwrap();
        let keys: Vec<&str> = resp.entities.keys().map(String::as_str).collect();
        assert_eq!(keys, ["Q2", "Q1"]);
    }

    #[test]
    fn test_search_response_tolerates_missing_query() {
        let resp: SearchResponse = serde_json::from_str(r#"{"batchcomplete": ""}"#).unwrap();
        assert!(resp.query.is_none());

        let resp: SearchResponse = serde_json::from_str(
            r#"{"query": {"search": [{"ns": 0, "title": "Q6138403", "pageid": 7}]}}"#,
        )
        .unwrap();
        let hits = resp.query.unwrap().search;
        assert_eq!(hits[0].title, "Q6138403");
    }
}
