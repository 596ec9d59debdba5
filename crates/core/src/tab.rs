//! Tab sets: the closed, family-specific enumerations of checklist tabs.

use crate::Catalog;
use std::fmt::Debug;
use std::hash::Hash;

/// A closed enumeration of the tabs stored for one admission family.
///
/// Implementors are plain fieldless enums. `ALL` lists every variant in canonical order and
/// `index` must return the variant's position in `ALL`, which lets [`crate::StatusTree`] keep
/// one node per tab in a fixed-size slice.
pub trait TabSet: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Short family name, as accepted on the command line.
    const FAMILY: &'static str;

    /// Every tab of the family, in canonical order.
    const ALL: &'static [Self];

    /// Canonical tab name, used verbatim as the persisted key.
    fn name(self) -> &'static str;

    /// Position of this tab in [`TabSet::ALL`].
    fn index(self) -> usize;

    /// Name of the catalog section classifying this tab's children, if the family has one.
    fn children_section_name(self) -> Option<&'static str> {
        None
    }

    /// The process-wide status catalog of the family.
    fn catalog() -> &'static Catalog<Self>;

    /// The catalog projection offered as filter choices in application listings.
    fn listing_catalog() -> &'static Catalog<Self>;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|tab| tab.name() == name)
    }
}

/// Key of one ordered list of catalog entries.
///
/// Most sections classify the top-level node of a tab. Some tabs hold one child per
/// sub-item (e.g. one node per prior-curriculum experience); those children are classified
/// by a dedicated [`Section::Children`] section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section<T> {
    Tab(T),
    Children(T),
}

impl<T: TabSet> Section<T> {
    /// The tab whose node (or children) this section classifies.
    pub fn tab(self) -> T {
        match self {
            Self::Tab(tab) | Self::Children(tab) => tab,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Tab(tab) => tab.name(),
            Self::Children(tab) => tab.children_section_name().unwrap_or_else(|| tab.name()),
        }
    }

    /// Resolves a section from its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some(tab) = T::from_name(name) {
            return Some(Self::Tab(tab));
        }

        T::ALL
            .iter()
            .copied()
            .find(|tab| tab.children_section_name() == Some(name))
            .map(Self::Children)
    }
}
