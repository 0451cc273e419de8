//! Typed, read-only view over a `wbgetentities` response.
//!
//! Wikidata has the shape `{"entities": {"Q123": { ... }}}` where the key is
//! not known in advance. Every accessor walks a fixed field path and yields
//! `None` at the first missing hop.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::types::{EntitiesResponse, EntityId, NOT_FOUND_SENTINEL};

/// Date of birth.
const PROP_BORN: &str = "P569";
/// Date of death.
const PROP_DIED: &str = "P570";

const WIKIPEDIA_ARTICLE_BASE: &str = "https://en.wikipedia.org/wiki/";

/// Dates look like `+1815-12-10T00:00:00Z`; month and day may be zeroed
/// when the precision is only a year.
static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+([0-9]{4})").expect("year pattern is valid"));

#[derive(Debug, Clone)]
pub struct EntityView {
    identifier: String,
    entity: Value,
}

/// How a fetched entity can be used by a resolver.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// Wikidata returned the `-1` sentinel.
    NotFound,
    /// Exists, but is a disambiguation page or a scientific article.
    Ignorable(EntityView),
    /// A plausible person entity.
    Candidate(EntityView),
}

impl EntityView {
    pub fn from_response(response: EntitiesResponse) -> Self {
        match response.entities.into_iter().next() {
            Some((identifier, entity)) => Self { identifier, entity },
            None => Self::not_found(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            identifier: NOT_FOUND_SENTINEL.to_string(),
            entity: Value::Null,
        }
    }

    /// Root key of the entities map, or `"-1"`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The identifier as an [`EntityId`], if it is a real item.
    pub fn entity_id(&self) -> Option<EntityId> {
        EntityId::parse(&self.identifier).ok()
    }

    pub fn date_of_birth(&self) -> Option<&str> {
        self.first_time_claim(PROP_BORN)
    }

    pub fn date_of_death(&self) -> Option<&str> {
        self.first_time_claim(PROP_DIED)
    }

    /// Four-digit birth year, ignoring month and day.
    pub fn born_in(&self) -> Option<&str> {
        self.date_of_birth().and_then(year_of)
    }

    /// Four-digit death year, ignoring month and day.
    pub fn died_in(&self) -> Option<&str> {
        self.date_of_death().and_then(year_of)
    }

    pub fn english_description(&self) -> Option<&str> {
        self.entity.pointer("/descriptions/en/value")?.as_str()
    }

    pub fn english_sitelink_title(&self) -> Option<&str> {
        self.entity.pointer("/sitelinks/enwiki/title")?.as_str()
    }

    pub fn is_not_found(&self) -> bool {
        self.identifier == NOT_FOUND_SENTINEL
    }

    pub fn is_disambiguation_page(&self) -> bool {
        self.description_contains("disambiguation page")
    }

    pub fn is_scientific_article(&self) -> bool {
        self.description_contains("scientific article")
    }

    pub fn is_ignorable(&self) -> bool {
        self.is_not_found() || self.is_disambiguation_page() || self.is_scientific_article()
    }

    /// Canonical English Wikipedia URL, unless the entity is ignorable or
    /// has no enwiki sitelink.
    pub fn en_wikipedia_url(&self) -> Option<String> {
        if self.is_ignorable() {
            return None;
        }
        let title = self.english_sitelink_title()?;
        Some(format!("{}{}", WIKIPEDIA_ARTICLE_BASE, title.replace(' ', "_")))
    }

    pub fn classify(self) -> Lookup {
        if self.is_not_found() {
            Lookup::NotFound
        } else if self.is_ignorable() {
            Lookup::Ignorable(self)
        } else {
            Lookup::Candidate(self)
        }
    }

    fn description_contains(&self, needle: &str) -> bool {
        self.english_description()
            .is_some_and(|description| description.contains(needle))
    }

    fn first_time_claim(&self, property: &str) -> Option<&str> {
        self.entity
            .get("claims")?
            .get(property)?
            .get(0)?
            .pointer("/mainsnak/datavalue/value/time")?
            .as_str()
    }
}

impl Lookup {
    pub fn is_ignorable(&self) -> bool {
        !matches!(self, Lookup::Candidate(_))
    }
}

/// First four-digit run after a `+`. Anything else is treated as unknown.
pub fn year_of(time: &str) -> Option<&str> {
    YEAR.captures(time)
        .and_then(|captures| captures.get(1))
        .map(|year| year.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view(body: Value) -> EntityView {
        EntityView::from_response(serde_json::from_value(body).unwrap())
    }

    fn person(description: &str, born: Option<&str>, died: Option<&str>) -> EntityView {
        let time = |t: &str| json!([{ "mainsnak": { "datavalue": { "value": { "time": t } } } }]);
        let mut claims = serde_json::Map::new();
        if let Some(b) = born {
            claims.insert(PROP_BORN.into(), time(b));
        }
        if let Some(d) = died {
            claims.insert(PROP_DIED.into(), time(d));
        }
        view(json!({
            "entities": {
                "Q7259": {
                    "claims": claims,
                    "descriptions": { "en": { "language": "en", "value": description } },
                    "sitelinks": { "enwiki": { "site": "enwiki", "title": "Ada Lovelace" } }
                }
            }
        }))
    }

    #[test]
    fn test_person_accessors() {
        let ada = person(
            "English mathematician",
            Some("+1815-12-10T00:00:00Z"),
            Some("+1852-11-27T00:00:00Z"),
        );

        assert_eq!(ada.identifier(), "Q7259");
        assert_eq!(ada.entity_id().unwrap().as_str(), "Q7259");
        assert_eq!(ada.date_of_birth(), Some("+1815-12-10T00:00:00Z"));
        assert_eq!(ada.born_in(), Some("1815"));
        assert_eq!(ada.died_in(), Some("1852"));
        assert_eq!(ada.english_description(), Some("English mathematician"));
        assert_eq!(ada.english_sitelink_title(), Some("Ada Lovelace"));
        assert!(!ada.is_ignorable());
        assert_eq!(
            ada.en_wikipedia_url().as_deref(),
            Some("https://en.wikipedia.org/wiki/Ada_Lovelace")
        );
        assert!(matches!(ada.classify(), Lookup::Candidate(_)));
    }

    #[test]
    fn test_not_found_sentinel() {
        let missing = view(json!({
            "entities": { "-1": { "site": "enwiki", "title": "Xauytdfuy", "missing": "" } },
            "success": 1
        }));

        assert!(missing.is_not_found());
        assert!(missing.is_ignorable());
        assert!(missing.entity_id().is_none());
        assert_eq!(missing.born_in(), None);
        assert_eq!(missing.en_wikipedia_url(), None);
        assert!(matches!(missing.classify(), Lookup::NotFound));
    }

    #[test]
    fn test_empty_entities_is_not_found() {
        assert!(view(json!({})).is_not_found());
    }

    #[test]
    fn test_disambiguation_and_scientific_article_are_ignorable() {
        let disambiguation = person("Wikimedia disambiguation page", None, None);
        assert!(disambiguation.is_disambiguation_page());
        assert!(disambiguation.is_ignorable());
        assert!(matches!(disambiguation.clone().classify(), Lookup::Ignorable(_)));
        assert_eq!(disambiguation.en_wikipedia_url(), None);

        let article = person("scientific article published in 1998", None, None);
        assert!(article.is_scientific_article());
        assert!(article.is_ignorable());
    }

    #[test]
    fn test_missing_paths_degrade_to_none() {
        let bare = view(json!({ "entities": { "Q1": { "claims": [], "descriptions": [] } } }));
        assert_eq!(bare.date_of_birth(), None);
        assert_eq!(bare.english_description(), None);
        assert_eq!(bare.english_sitelink_title(), None);
        assert!(!bare.is_ignorable());

        // novalue snaks carry no datavalue
        let novalue = view(json!({
            "entities": { "Q1": { "claims": { "P569": [{ "mainsnak": { "snaktype": "novalue" } }] } } }
        }));
        assert_eq!(novalue.date_of_birth(), None);
    }

    #[test]
    fn test_year_of() {
        assert_eq!(year_of("+1600-00-00T00:00:00Z"), Some("1600"));
        assert_eq!(year_of("1600-01-01"), None);
        assert_eq!(year_of("-0500-00-00T00:00:00Z"), None);
        assert_eq!(year_of("+15"), None);
    }
}
