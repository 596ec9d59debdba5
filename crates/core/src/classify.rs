//! Whole-tree classification.
//!
//! Turns every stored `(status, extras)` pair of a tree into its named catalog state, one row
//! per tab and one row per child of the tabs that have a children section.

use crate::{Catalog, Section, StatusNode, StatusTree, TabSet};
use serde::Serialize;
use std::fmt;

/// Classification of one node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassificationRow {
    /// Catalog section the node was classified in.
    pub section: &'static str,

    /// `identifiant` of the child, for child rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Option<String>,

    /// Raw status name, empty when unset.
    pub status: &'static str,

    /// Identifier of the matching entry.
    pub state: Option<String>,

    pub label: Option<String>,

    /// Identifier of the matching sub-entry, when the matching entry owns sub-entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_state: Option<String>,
}

impl ClassificationRow {
    pub fn is_matched(&self) -> bool {
        self.state.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClassificationReport {
    pub family: &'static str,
    pub rows: Vec<ClassificationRow>,
}

impl ClassificationReport {
    pub fn unmatched(&self) -> impl Iterator<Item = &ClassificationRow> {
        self.rows.iter().filter(|row| !row.is_matched())
    }

    /// Row of the top-level node of the section named `section`.
    pub fn tab_row(&self, section: &str) -> Option<&ClassificationRow> {
        self.rows
            .iter()
            .find(|row| row.child.is_none() && row.section == section)
    }

    pub fn child_row(&self, section: &str, child: &str) -> Option<&ClassificationRow> {
        self.rows
            .iter()
            .find(|row| row.section == section && row.child.as_deref() == Some(child))
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let section = match &row.child {
                Some(child) => format!("{}[{child}]", row.section),
                None => row.section.to_owned(),
            };
            let status = if row.status.is_empty() { "-" } else { row.status };
            let state = match (&row.state, &row.label) {
                (Some(state), Some(label)) => format!("{state} ({label})"),
                (Some(state), None) => state.clone(),
                _ => "?".to_owned(),
            };

            write!(f, "{section:<40} {status:<24} {state}")?;
            if let Some(sub_state) = &row.sub_state {
                write!(f, " / {sub_state}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Classifies every tab of `tree`, and every child of the tabs that have a children section.
pub fn classify_tree<T: TabSet>(
    catalog: &Catalog<T>,
    tree: &StatusTree<T>,
) -> ClassificationReport {
    let mut rows = Vec::new();

    for (tab, node) in tree.iter() {
        rows.push(classify_row(catalog, Section::Tab(tab), node, None));

        if tab.children_section_name().is_none() {
            continue;
        }
        let section = Section::Children(tab);
        for child in &node.children {
            let identifier = child.identifier().unwrap_or_default().to_owned();
            rows.push(classify_row(catalog, section, child, Some(identifier)));
        }
    }

    ClassificationReport {
        family: T::FAMILY,
        rows,
    }
}

fn classify_row<T: TabSet>(
    catalog: &Catalog<T>,
    section: Section<T>,
    node: &StatusNode,
    child: Option<String>,
) -> ClassificationRow {
    let entry = catalog.classify_node(section, node);

    if entry.is_none() {
        tracing::debug!(
            family = T::FAMILY,
            section = section.name(),
            child = child.as_deref().unwrap_or(""),
            status = node.status_name(),
            "unclassified checklist node"
        );
    }

    let sub_state = entry
        .and_then(|entry| catalog.classify_sub_state(section, entry, &node.extras))
        .map(|sub| sub.identifier.clone());

    ClassificationRow {
        section: section.name(),
        child,
        status: node.status_name(),
        state: entry.map(|entry| entry.identifier.clone()),
        label: entry.map(|entry| entry.label.clone()),
        sub_state,
    }
}
