//! In-memory [`EntityLookup`] for tests.
//!
//! Useful for exercising resolution logic without network calls.
//! Unknown titles and ids come back as the not-found sentinel; unknown
//! search queries return no titles.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::entity::EntityView;
use crate::error::{Result, WikidataError};
use crate::lookup::{validate_query, EntityLookup};
use crate::types::{EntitiesResponse, EntityId};

/// Record of a call made to the mock lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockLookupCall {
    ById(String),
    BySiteTitle(String),
    Search(String),
}

#[derive(Default, Clone)]
pub struct MockEntityLookup {
    by_id: Arc<RwLock<HashMap<String, Value>>>,
    by_title: Arc<RwLock<HashMap<String, Value>>>,
    searches: Arc<RwLock<HashMap<String, Vec<String>>>>,
    failing_titles: Arc<RwLock<HashMap<String, u16>>>,
    failing_ids: Arc<RwLock<HashMap<String, u16>>>,
    failing_searches: Arc<RwLock<HashMap<String, u16>>>,
    calls: Arc<RwLock<Vec<MockLookupCall>>>,
}

impl MockEntityLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity reachable by id and by each of `titles`.
    pub fn with_entity(self, entity: MockEntity, titles: &[&str]) -> Self {
        let body = entity.to_response();
        for title in titles {
            self.by_title
                .write()
                .unwrap()
                .insert(title.to_string(), body.clone());
        }
        self.by_id.write().unwrap().insert(entity.id, body);
        self
    }

    /// Register search results for a query, in service order.
    pub fn with_search(self, query: impl Into<String>, titles: &[&str]) -> Self {
        self.searches.write().unwrap().insert(
            query.into(),
            titles.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Make title lookups fail with an HTTP status.
    pub fn with_failing_title(self, title: impl Into<String>, status: u16) -> Self {
        self.failing_titles
            .write()
            .unwrap()
            .insert(title.into(), status);
        self
    }

    /// Make id lookups fail with an HTTP status.
    pub fn with_failing_id(self, id: impl Into<String>, status: u16) -> Self {
        self.failing_ids.write().unwrap().insert(id.into(), status);
        self
    }

    /// Make a search query fail with an HTTP status.
    pub fn with_failing_search(self, query: impl Into<String>, status: u16) -> Self {
        self.failing_searches
            .write()
            .unwrap()
            .insert(query.into(), status);
        self
    }

    pub fn calls(&self) -> Vec<MockLookupCall> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, call: MockLookupCall) {
        self.calls.write().unwrap().push(call);
    }
}

fn mock_failure(failures: &RwLock<HashMap<String, u16>>, key: &str) -> Result<()> {
    match failures.read().unwrap().get(key) {
        Some(status) => Err(WikidataError::Api {
            status: *status,
            message: "mock failure".into(),
        }),
        None => Ok(()),
    }
}

fn view_of(body: Option<&Value>) -> EntityView {
    body.cloned()
        .and_then(|b| serde_json::from_value::<EntitiesResponse>(b).ok())
        .map(EntityView::from_response)
        .unwrap_or_else(EntityView::not_found)
}

#[async_trait]
impl EntityLookup for MockEntityLookup {
    async fn get_by_id(&self, id: &EntityId) -> Result<EntityView> {
        self.record(MockLookupCall::ById(id.to_string()));
        mock_failure(&self.failing_ids, id.as_str())?;
        Ok(view_of(self.by_id.read().unwrap().get(id.as_str())))
    }

    async fn get_by_site_title(&self, title: &str) -> Result<EntityView> {
        self.record(MockLookupCall::BySiteTitle(title.to_string()));
        validate_query(title)?;
        mock_failure(&self.failing_titles, title)?;
        Ok(view_of(self.by_title.read().unwrap().get(title)))
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<String>> {
        self.record(MockLookupCall::Search(query.to_string()));
        validate_query(query)?;
        mock_failure(&self.failing_searches, query)?;
        Ok(self
            .searches
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}

/// Builder for a fake Wikidata entity.
#[derive(Debug, Clone)]
pub struct MockEntity {
    id: String,
    description: Option<String>,
    born: Option<String>,
    died: Option<String>,
    enwiki_title: Option<String>,
}

impl MockEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            born: None,
            died: None,
            enwiki_title: None,
        }
    }

    /// A person with an English description and enwiki sitelink.
    pub fn person(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(id)
            .with_description("human")
            .with_enwiki_title(title)
    }

    pub fn disambiguation(id: impl Into<String>) -> Self {
        Self::new(id).with_description("Wikimedia disambiguation page")
    }

    pub fn scientific_article(id: impl Into<String>) -> Self {
        Self::new(id).with_description("scientific article published in 2003")
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Raw Wikidata time value, e.g. `+1890-00-00T00:00:00Z`.
    pub fn with_birth_time(mut self, time: impl Into<String>) -> Self {
        self.born = Some(time.into());
        self
    }

    pub fn with_death_time(mut self, time: impl Into<String>) -> Self {
        self.died = Some(time.into());
        self
    }

    /// Year-precision birth date.
    pub fn born(self, year: u16) -> Self {
        self.with_birth_time(format!("+{year:04}-00-00T00:00:00Z"))
    }

    /// Year-precision death date.
    pub fn died(self, year: u16) -> Self {
        self.with_death_time(format!("+{year:04}-00-00T00:00:00Z"))
    }

    pub fn with_enwiki_title(mut self, title: impl Into<String>) -> Self {
        self.enwiki_title = Some(title.into());
        self
    }

    pub fn into_view(self) -> EntityView {
        view_of(Some(&self.to_response()))
    }

    fn to_response(&self) -> Value {
        let time_claim =
            |t: &str| json!([{ "mainsnak": { "datavalue": { "value": { "time": t } } } }]);

        let mut claims = serde_json::Map::new();
        if let Some(born) = &self.born {
            claims.insert("P569".into(), time_claim(born));
        }
        if let Some(died) = &self.died {
            claims.insert("P570".into(), time_claim(died));
        }

        let mut entity = json!({ "id": self.id, "claims": claims });
        if let Some(description) = &self.description {
            entity["descriptions"] = json!({ "en": { "language": "en", "value": description } });
        }
        if let Some(title) = &self.enwiki_title {
            entity["sitelinks"] = json!({ "enwiki": { "site": "enwiki", "title": title } });
        }

        let mut entities = serde_json::Map::new();
        entities.insert(self.id.clone(), entity);
        json!({ "entities": entities })
    }
}
