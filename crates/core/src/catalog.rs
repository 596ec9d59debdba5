//! Declarative status catalogs and the classifier.
//!
//! A catalog maps observed `(status, extras)` pairs to named states. Matching is by status
//! name plus an extras *subset*: an entry requiring `{"fraud": "1"}` matches a node whose
//! extras contain that pair and anything else. Because of that, the entries of a section
//! are tried in order and the first match wins; sections are authored most-specific-first
//! so that a broad entry never masks a narrower one declared after it.
//!
//! Entries without a status never match on their own. They describe sub-states of another
//! entry (named `PARENT.CHILD`), and are resolved with [`Catalog::classify_sub_state`] once
//! the parent entry has matched, or merged onto their parent with [`CatalogEntry::merge`].

use crate::constants::SUB_ENTRY_SEPARATOR;
use crate::node::Extras;
use crate::{Section, StatusCode, StatusNode, TabSet};

/// One named state of a catalog section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Unique within its section, e.g. `A_COMPLETER` or `AUTHENTIFICATION.VRAI`.
    pub identifier: String,

    /// Static display text.
    pub label: String,

    /// Status code represented by this entry; `None` for pure sub-state entries.
    pub status: Option<StatusCode>,

    /// Discriminators a node must carry to match this entry.
    pub extras: Extras,

    /// Identifier of the owning entry, for sub-state entries.
    pub parent_identifier: Option<String>,
}

impl CatalogEntry {
    pub fn new(
        identifier: impl Into<String>,
        label: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            label: label.into(),
            status: Some(status),
            extras: Extras::new(),
            parent_identifier: None,
        }
    }

    /// Creates a status-less sub-state entry named `parent.name`.
    pub fn sub_entry(parent: &str, name: &str, label: impl Into<String>) -> Self {
        Self {
            identifier: format!("{parent}{SUB_ENTRY_SEPARATOR}{name}"),
            label: label.into(),
            status: None,
            extras: Extras::new(),
            parent_identifier: Some(parent.to_owned()),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn is_sub_entry(&self) -> bool {
        self.parent_identifier.is_some()
    }

    /// Whether this entry's extras all appear, with equal values, in `extras`.
    pub fn extras_subset_of(&self, extras: &Extras) -> bool {
        self.extras
            .iter()
            .all(|(key, value)| extras.get(key) == Some(value))
    }

    /// Whether this entry represents the given status name and extras.
    ///
    /// The entry must carry a status, its name must equal `status_code`, and the entry's
    /// extras must be a subset of `extras`. Entries without a status never match.
    pub fn matches(&self, status_code: &str, extras: &Extras) -> bool {
        match self.status {
            Some(status) => status.name() == status_code && self.extras_subset_of(extras),
            None => false,
        }
    }

    /// [`CatalogEntry::matches`] applied to a node; an unset node has the empty status name.
    pub fn matches_node(&self, node: &StatusNode) -> bool {
        self.matches(node.status_name(), &node.extras)
    }

    /// Overlays this entry on `other`.
    ///
    /// The result keeps this entry's identifier, label and parent. Its status is this entry's
    /// status if set, otherwise `other`'s. Its extras are the union of both, this entry's
    /// values winning on shared keys.
    pub fn merge(&self, other: &CatalogEntry) -> CatalogEntry {
        let mut extras = other.extras.clone();
        extras.extend(
            self.extras
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        CatalogEntry {
            identifier: self.identifier.clone(),
            label: self.label.clone(),
            status: self.status.or(other.status),
            extras,
            parent_identifier: self.parent_identifier.clone(),
        }
    }
}

/// Ordered entries of one catalog section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabCatalog<T> {
    pub section: Section<T>,
    pub entries: Vec<CatalogEntry>,
}

impl<T: TabSet> TabCatalog<T> {
    pub fn new(section: Section<T>, entries: Vec<CatalogEntry>) -> Self {
        Self { section, entries }
    }

    /// First entry matching the status name and extras.
    pub fn get_status(&self, status_code: &str, extras: &Extras) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.matches(status_code, extras))
    }

    pub fn entry(&self, identifier: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.identifier == identifier)
    }

    pub fn sub_entries<'a>(
        &'a self,
        parent_identifier: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.parent_identifier.as_deref() == Some(parent_identifier))
    }

    /// Pairs `(earlier, later)` where `later` can never be returned by classification because
    /// `earlier` has the same status and requires a subset of its extras.
    pub fn masked_entries(&self) -> Vec<(&CatalogEntry, &CatalogEntry)> {
        let mut masked = Vec::new();
        for (position, later) in self.entries.iter().enumerate() {
            let Some(status) = later.status else {
                continue;
            };
            if let Some(earlier) = self.entries[..position]
                .iter()
                .find(|earlier| {
                    earlier.status == Some(status) && earlier.extras_subset_of(&later.extras)
                })
            {
                masked.push((earlier, later));
            }
        }
        masked
    }
}

/// The ordered sections of one admission family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog<T> {
    sections: Vec<TabCatalog<T>>,
}

impl<T: TabSet> Catalog<T> {
    pub fn new(sections: Vec<TabCatalog<T>>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[TabCatalog<T>] {
        &self.sections
    }

    pub fn section(&self, section: Section<T>) -> Option<&TabCatalog<T>> {
        self.sections.iter().find(|tab| tab.section == section)
    }

    /// Finds the named state of a `(status, extras)` pair observed in `section`.
    ///
    /// Returns the first entry, in catalog order, that [matches](CatalogEntry::matches).
    /// `None` means the combination has no declared name; callers usually fall back to the
    /// raw status code.
    pub fn classify(
        &self,
        section: Section<T>,
        status_code: &str,
        extras: &Extras,
    ) -> Option<&CatalogEntry> {
        let found = self
            .section(section)
            .and_then(|tab| tab.get_status(status_code, extras));

        if found.is_none() {
            tracing::debug!(
                family = T::FAMILY,
                section = section.name(),
                status = status_code,
                "no catalog entry matches"
            );
        }

        found
    }

    pub fn classify_tab(
        &self,
        tab: T,
        status_code: &str,
        extras: &Extras,
    ) -> Option<&CatalogEntry> {
        self.classify(Section::Tab(tab), status_code, extras)
    }

    pub fn classify_node(&self, section: Section<T>, node: &StatusNode) -> Option<&CatalogEntry> {
        self.classify(section, node.status_name(), &node.extras)
    }

    /// Sub-state entries of `parent_identifier` in `section`; empty for an unknown section.
    pub fn sub_entries<'a>(
        &'a self,
        section: Section<T>,
        parent_identifier: &'a str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        self.section(section)
            .into_iter()
            .flat_map(move |tab| tab.sub_entries(parent_identifier))
    }

    /// Resolves the sub-state of a matched entry.
    ///
    /// Sub-entries carry no status, so they are matched on extras alone: the first sub-entry
    /// of `parent` whose extras are a subset of `extras` wins.
    pub fn classify_sub_state<'a>(
        &'a self,
        section: Section<T>,
        parent: &CatalogEntry,
        extras: &Extras,
    ) -> Option<&'a CatalogEntry> {
        self.section(section)?.entries.iter().find(|entry| {
            entry.parent_identifier.as_deref() == Some(parent.identifier.as_str())
                && entry.extras_subset_of(extras)
        })
    }

    pub fn entry(&self, section: Section<T>, identifier: &str) -> Option<&CatalogEntry> {
        self.section(section)?.entry(identifier)
    }

    /// Projection used by listings: the sections of `tabs`, in their catalog order, without
    /// sub-state entries.
    pub fn for_listing(&self, tabs: &[T]) -> Catalog<T> {
        let sections = self
            .sections
            .iter()
            .filter(|tab| matches!(tab.section, Section::Tab(t) if tabs.contains(&t)))
            .map(|tab| TabCatalog {
                section: tab.section,
                entries: tab
                    .entries
                    .iter()
                    .filter(|entry| !entry.is_sub_entry())
                    .cloned()
                    .collect(),
            })
            .collect();

        Catalog { sections }
    }
}
