//! Birth/death year hints embedded in catalogue labels.
//!
//! Labels mix lifespan conventions: `Ada Lovelace (1815-1852)`,
//! `John Doe (d. 1920)`, `James Duffy (b.1890)`. Patterns are tried in that
//! order and only match a trailing parenthetical.

use std::sync::LazyLock;

use regex::Regex;

static LIFESPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*) \(([0-9]{4})\s*-*\s*([0-9]{4})\)\s*$").expect("lifespan pattern is valid")
});
static DIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*) \(d.\s*-*\s*([0-9]{4})\)\s*$").expect("died pattern is valid")
});
static BORN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*) \(b.\s*-*\s*([0-9]{4})\)\s*$").expect("born pattern is valid")
});

/// A name to resolve plus optional four-digit year hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub name: String,
    pub born: Option<String>,
    pub died: Option<String>,
}

impl ResolutionRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            born: None,
            died: None,
        }
    }

    pub fn with_born(mut self, year: impl Into<String>) -> Self {
        self.born = Some(year.into());
        self
    }

    pub fn with_died(mut self, year: impl Into<String>) -> Self {
        self.died = Some(year.into());
        self
    }

    pub fn has_date_hint(&self) -> bool {
        self.born.is_some() || self.died.is_some()
    }
}

/// Split a label into name and year hints. Without a recognised hint the
/// whole label is the name.
pub fn parse_date_hint(label: &str) -> ResolutionRequest {
    if let Some(caps) = LIFESPAN.captures(label) {
        return ResolutionRequest::new(&caps[1])
            .with_born(&caps[2])
            .with_died(&caps[3]);
    }
    if let Some(caps) = DIED.captures(label) {
        return ResolutionRequest::new(&caps[1]).with_died(&caps[2]);
    }
    if let Some(caps) = BORN.captures(label) {
        return ResolutionRequest::new(&caps[1]).with_born(&caps[2]);
    }
    ResolutionRequest::new(label)
}
