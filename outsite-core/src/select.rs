//! Choosing which documents become pages.

use crate::filename::page_name;
use crate::publication::PublicationConfig;
use crate::source::{DocumentSource, SourceError};
use std::collections::{BTreeMap, BTreeSet};

/// Documents that passed both filters, keyed by storage key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub pages: BTreeMap<String, String>,
}

impl Selection {
    /// Page names of every selected document
    pub fn catalogue(&self) -> Catalogue {
        Catalogue::from_names(self.pages.keys().map(|key| page_name(key)))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// `(page name, body)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pages
            .iter()
            .map(|(key, body)| (page_name(key), body.as_str()))
    }
}

/// The finished, sorted set of names that links may point at.
///
/// Built once from a complete [`Selection`] and never extended afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    names: BTreeSet<String>,
}

impl Catalogue {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Select the documents that pass the configuration's filters.
///
/// `config_key` names the configuration page, which is never published.
pub fn select(
    source: &dyn DocumentSource,
    config: &PublicationConfig,
    config_key: &str,
) -> Result<Selection, SourceError> {
    select_with(
        source,
        |title| config.title_filter.accepts(title),
        |body| config.content_filter.accepts(body),
        config_key,
    )
}

/// Select with arbitrary predicates.
///
/// The title predicate sees the page name. A body is only read, and only
/// handed to `content_filter`, once its title has been accepted.
pub fn select_with<T, C>(
    source: &dyn DocumentSource,
    title_filter: T,
    content_filter: C,
    config_key: &str,
) -> Result<Selection, SourceError>
where
    T: Fn(&str) -> bool,
    C: Fn(&str) -> bool,
{
    let mut pages = BTreeMap::new();

    for key in source.keys() {
        if key == config_key {
            continue;
        }
        if !title_filter(page_name(&key)) {
            tracing::debug!("Excluded by title: {}", key);
            continue;
        }

        let body = source.read(&key)?;
        if !content_filter(&body) {
            tracing::debug!("Excluded by content: {}", key);
            continue;
        }

        pages.insert(key, body);
    }

    tracing::info!("Selected {} page(s)", pages.len());
    Ok(Selection { pages })
}
