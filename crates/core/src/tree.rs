//! Status trees and checklist records.
//!
//! A [`StatusTree`] holds one [`StatusNode`] per tab of an admission family. The tab set is
//! closed and known at compile time, so nodes live in a slice indexed by [`TabSet::index`]
//! and every tab lookup is total.
//!
//! A [`ChecklistRecord`] is the persisted pair of trees for one application: the `initial`
//! snapshot taken at submission time and the `current` live state.

use crate::constants::{CURRENT_KEY, INITIAL_KEY};
use crate::node::GenericMap;
use crate::{ChecklistError, ChecklistResult, StatusNode, TabSet};
use serde_json::Value;
use std::marker::PhantomData;

/// One status node per tab of the family `T`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusTree<T: TabSet> {
    nodes: Box<[StatusNode]>,
    tabs: PhantomData<T>,
}

impl<T: TabSet> Default for StatusTree<T> {
    fn default() -> Self {
        Self {
            nodes: vec![StatusNode::default(); T::ALL.len()].into_boxed_slice(),
            tabs: PhantomData,
        }
    }
}

impl<T: TabSet> StatusTree<T> {
    /// Creates a tree where every tab holds an unset node.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tab(&self, tab: T) -> &StatusNode {
        &self.nodes[tab.index()]
    }

    pub fn tab_mut(&mut self, tab: T) -> &mut StatusNode {
        &mut self.nodes[tab.index()]
    }

    pub fn set_tab(&mut self, tab: T, node: StatusNode) {
        self.nodes[tab.index()] = node;
    }

    /// Iterates over the tabs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &StatusNode)> + '_ {
        T::ALL.iter().map(move |tab| (*tab, self.tab(*tab)))
    }

    /// Addresses one sub-state of a tab by its `identifiant` extra.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::ChildNotFound`] if the tab has no such child.
    pub fn get_child(&self, tab: T, child_identifier: &str) -> ChecklistResult<&StatusNode> {
        self.tab(tab).find_child(child_identifier)
    }

    pub fn get_child_mut(
        &mut self,
        tab: T,
        child_identifier: &str,
    ) -> ChecklistResult<&mut StatusNode> {
        self.tab_mut(tab).find_child_mut(child_identifier)
    }

    /// Builds a tree from a generic record, one key per tab.
    ///
    /// Tabs absent from the record (or mapped to null) hold an unset node. Keys that are not
    /// tabs of the family are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError`] if a tab is not a mapping or its node fails to translate.
    pub fn from_generic(whole_record: &GenericMap) -> ChecklistResult<Self> {
        for key in whole_record.keys() {
            if T::from_name(key).is_none() {
                tracing::debug!(family = T::FAMILY, key = %key, "ignoring unknown checklist tab");
            }
        }

        let mut tree = Self::default();
        for tab in T::ALL {
            let node = match whole_record.get(tab.name()) {
                None | Some(Value::Null) => StatusNode::default(),
                Some(Value::Object(tab_data)) => StatusNode::from_generic(tab_data)
                    .map_err(|err| in_context(err, tab.name()))?,
                Some(other) => {
                    return Err(ChecklistError::Translation(format!(
                        "checklist tab {} must be a mapping, found {}",
                        tab.name(),
                        json_kind(other)
                    )));
                }
            };
            tree.set_tab(*tab, node);
        }

        Ok(tree)
    }

    /// Renders every tab of the tree under its canonical name.
    pub fn to_generic(&self) -> GenericMap {
        self.iter()
            .map(|(tab, node)| (tab.name().to_owned(), Value::Object(node.to_generic())))
            .collect()
    }
}

/// Which of the two persisted trees of a record to work on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generation {
    /// Snapshot taken when the application was submitted.
    Initial,
    /// Live state.
    Current,
}

impl Generation {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Initial => INITIAL_KEY,
            Self::Current => CURRENT_KEY,
        }
    }
}

/// The persisted checklist of one application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistRecord<T: TabSet> {
    pub initial: StatusTree<T>,
    pub current: StatusTree<T>,
}

impl<T: TabSet> Default for ChecklistRecord<T> {
    fn default() -> Self {
        Self {
            initial: StatusTree::default(),
            current: StatusTree::default(),
        }
    }
}

impl<T: TabSet> ChecklistRecord<T> {
    pub fn tree(&self, generation: Generation) -> &StatusTree<T> {
        match generation {
            Generation::Initial => &self.initial,
            Generation::Current => &self.current,
        }
    }

    pub fn tree_mut(&mut self, generation: Generation) -> &mut StatusTree<T> {
        match generation {
            Generation::Initial => &mut self.initial,
            Generation::Current => &mut self.current,
        }
    }

    /// Builds a record from its generic form, `{"initial": {...}, "current": {...}}`.
    ///
    /// A missing or null generation yields an empty tree.
    pub fn from_generic(record: &GenericMap) -> ChecklistResult<Self> {
        Ok(Self {
            initial: tree_from_record(record, Generation::Initial)?,
            current: tree_from_record(record, Generation::Current)?,
        })
    }

    pub fn to_generic(&self) -> GenericMap {
        let mut map = GenericMap::new();
        map.insert(
            INITIAL_KEY.to_owned(),
            Value::Object(self.initial.to_generic()),
        );
        map.insert(
            CURRENT_KEY.to_owned(),
            Value::Object(self.current.to_generic()),
        );
        map
    }

    /// Parses a record from JSON text.
    pub fn from_json_str(text: &str) -> ChecklistResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_generic(&expect_mapping(value)?)
    }

    /// Parses a record from YAML text.
    pub fn from_yaml_str(text: &str) -> ChecklistResult<Self> {
        let value: Value = serde_yaml::from_str(text)?;
        Self::from_generic(&expect_mapping(value)?)
    }

    pub fn to_json_string(&self) -> ChecklistResult<String> {
        Ok(serde_json::to_string_pretty(&Value::Object(
            self.to_generic(),
        ))?)
    }

    pub fn to_yaml_string(&self) -> ChecklistResult<String> {
        Ok(serde_yaml::to_string(&Value::Object(self.to_generic()))?)
    }
}

fn tree_from_record<T: TabSet>(
    record: &GenericMap,
    generation: Generation,
) -> ChecklistResult<StatusTree<T>> {
    match record.get(generation.key()) {
        None | Some(Value::Null) => Ok(StatusTree::default()),
        Some(Value::Object(tabs)) => {
            StatusTree::from_generic(tabs).map_err(|err| in_context(err, generation.key()))
        }
        Some(other) => Err(ChecklistError::Translation(format!(
            "checklist generation {} must be a mapping, found {}",
            generation.key(),
            json_kind(other)
        ))),
    }
}

fn expect_mapping(value: Value) -> ChecklistResult<GenericMap> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ChecklistError::Translation(format!(
            "checklist record must be a mapping, found {}",
            json_kind(&other)
        ))),
    }
}

// Prefixes translation messages with the enclosing key; other variants pass through.
fn in_context(err: ChecklistError, key: &str) -> ChecklistError {
    match err {
        ChecklistError::Translation(msg) => ChecklistError::Translation(format!("{key}: {msg}")),
        other => other,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
