//! Staged person resolution.
//!
//! 1. Look the (folded) name up as an enwiki title, retrying once with the
//!    first letter capitalised when nothing is found.
//! 2. If that hit is ignorable but year hints were given, walk the full-text
//!    search results (item ids, or enwiki titles from other search backends)
//!    and take the first candidate whose dates agree.
//! 3. Otherwise accept the hit, re-checking its dates by id when hints exist.
//!
//! The branching lives in small pure functions over [`Lookup`] so it can be
//! tested without a lookup backend.

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};
use wikidata_client::{EntityId, EntityLookup, EntityView, Lookup, Result};

use crate::date_hint::{parse_date_hint, ResolutionRequest};
use crate::fold::fold;

/// What to do with the result of the title lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Reject,
    Accept(EntityId),
    /// Re-fetch by id and compare years before accepting.
    ConfirmDates(EntityId),
}

pub fn needs_case_retry(lookup: &Lookup) -> bool {
    matches!(lookup, Lookup::NotFound)
}

pub fn needs_search_fallback(lookup: &Lookup, request: &ResolutionRequest) -> bool {
    lookup.is_ignorable() && request.has_date_hint()
}

pub fn decide(lookup: &Lookup, request: &ResolutionRequest) -> Decision {
    let Lookup::Candidate(view) = lookup else {
        return Decision::Reject;
    };
    // Lexemes and properties share the entities map but are not items.
    let Some(id) = view.entity_id() else {
        return Decision::Reject;
    };
    if request.has_date_hint() {
        Decision::ConfirmDates(id)
    } else {
        Decision::Accept(id)
    }
}

/// Year comparison between a request and a fetched entity.
///
/// At least one side (born or died) must be known on both the request and
/// the entity; every side known on both must agree.
pub fn dates_match(view: &EntityView, request: &ResolutionRequest) -> bool {
    if view.is_ignorable() {
        return false;
    }

    let born = request.born.as_deref().zip(view.born_in());
    let died = request.died.as_deref().zip(view.died_in());
    if born.is_none() && died.is_none() {
        return false;
    }

    debug!(
        id = view.identifier(),
        requested_born = ?request.born,
        requested_died = ?request.died,
        born_in = ?view.born_in(),
        died_in = ?view.died_in(),
        "Comparing dates"
    );
    born.map_or(true, |(want, have)| want == have) && died.map_or(true, |(want, have)| want == have)
}

/// Titles are case-sensitive and normally start with a capital.
pub fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolves free-text person references to Wikidata items.
#[derive(Clone)]
pub struct PeopleSearcher {
    lookup: Arc<dyn EntityLookup>,
}

impl PeopleSearcher {
    pub fn new(lookup: Arc<dyn EntityLookup>) -> Self {
        Self { lookup }
    }

    pub fn from_lookup(lookup: impl EntityLookup + 'static) -> Self {
        Self::new(Arc::new(lookup))
    }

    /// Resolve a label such as `James Duffy (b.1890)` to an item id.
    ///
    /// Returns `Ok(None)` when nothing acceptable matched, including when the
    /// label cannot be embedded in a request. Transport failures are errors.
    #[instrument(skip(self))]
    pub async fn resolve(&self, term: &str) -> Result<Option<EntityId>> {
        let request = parse_date_hint(&fold(term));
        self.resolve_request(&request).await
    }

    /// Resolve an already-parsed request. The name is used as given.
    pub async fn resolve_request(&self, request: &ResolutionRequest) -> Result<Option<EntityId>> {
        let outcome = match self.run(request).await {
            Err(e) if e.is_malformed_query() => {
                error!(name = %request.name, error = %e, "Nasty character in name, no result");
                return Ok(None);
            }
            other => other?,
        };

        match &outcome {
            Some(id) => info!(name = %request.name, id = %id, "Resolved"),
            None => info!(name = %request.name, "No match"),
        }
        Ok(outcome)
    }

    /// English Wikipedia URL for a resolved item, unless it is ignorable or
    /// has no enwiki sitelink.
    pub async fn wikipedia_url(&self, id: &EntityId) -> Result<Option<String>> {
        let view = self.lookup.get_by_id(id).await?;
        Ok(view.en_wikipedia_url())
    }

    async fn run(&self, request: &ResolutionRequest) -> Result<Option<EntityId>> {
        let (lookup, name) = self.lookup_title(&request.name).await?;

        if needs_search_fallback(&lookup, request) {
            if let Some(id) = self.search_fallback(&name, request).await? {
                return Ok(Some(id));
            }
        }

        match decide(&lookup, request) {
            Decision::Reject => Ok(None),
            Decision::Accept(id) => Ok(Some(id)),
            Decision::ConfirmDates(id) => self.confirm_dates(&id, request).await,
        }
    }

    /// Title lookup with a single capitalised retry. Returns the name that
    /// produced the final lookup.
    async fn lookup_title(&self, name: &str) -> Result<(Lookup, String)> {
        let lookup = self.lookup.get_by_site_title(name).await?.classify();
        if !needs_case_retry(&lookup) {
            return Ok((lookup, name.to_string()));
        }

        let capitalized = capitalize_first(name);
        if capitalized == name {
            return Ok((lookup, capitalized));
        }

        debug!(name, retry = %capitalized, "Title not found, retrying capitalised");
        let retried = self.lookup.get_by_site_title(&capitalized).await?.classify();
        Ok((retried, capitalized))
    }

    async fn search_fallback(
        &self,
        name: &str,
        request: &ResolutionRequest,
    ) -> Result<Option<EntityId>> {
        let titles = self.lookup.search_titles(name).await?;
        debug!(name, candidates = titles.len(), "Searching for dated candidates");

        for title in titles {
            // Wikidata's own search returns item titles ("Q200"); those are
            // confirmed by id directly.
            if let Ok(id) = EntityId::parse(&title) {
                if let Some(id) = self.confirm_dates(&id, request).await? {
                    return Ok(Some(id));
                }
                continue;
            }

            let view = match self.lookup.get_by_site_title(&title).await {
                Ok(view) => view,
                Err(e) if e.is_malformed_query() => {
                    warn!(title = %title, error = %e, "Skipping search candidate");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Decision::ConfirmDates(id) = decide(&view.classify(), request) else {
                continue;
            };
            if let Some(id) = self.confirm_dates(&id, request).await? {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    async fn confirm_dates(
        &self,
        id: &EntityId,
        request: &ResolutionRequest,
    ) -> Result<Option<EntityId>> {
        let view = self.lookup.get_by_id(id).await?;
        if dates_match(&view, request) {
            Ok(view.entity_id())
        } else {
            Ok(None)
        }
    }
}
