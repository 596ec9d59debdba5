//! Checklist status nodes and their generic wire translation.
//!
//! Responsibilities:
//! - Define the domain-level [`StatusNode`] value held for one tab or one sub-item of a tab
//! - Define a strict wire model for the persisted generic representation
//! - Translate between the two, failing loudly on unknown status codes
//!
//! Notes:
//! - A node is a pure value: equality is structural and nodes hold no back-references
//! - Child order is kept for display but never takes part in matching

use crate::constants::{CHILDREN_KEY, CHILD_IDENTIFIER_KEY, EXTRAS_KEY, LABEL_KEY, STATUS_KEY};
use crate::{ChecklistError, ChecklistResult, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Generic nested key/value representation consumed and produced by the persistence layer.
pub type GenericMap = serde_json::Map<String, Value>;

/// Auxiliary discriminators refining a bare status code.
pub type Extras = BTreeMap<String, String>;

// ============================================================================
// Public domain-level types
// ============================================================================

/// State held for one tab, or for one sub-item within a tab.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusNode {
    /// Human-readable caption.
    pub label: String,

    /// Current status, `None` while the node is unset.
    pub status: Option<StatusCode>,

    /// Key/value discriminators, e.g. `{"decision": "CLOTURE"}`.
    pub extras: Extras,

    /// Nested sub-states, e.g. one node per prior-curriculum experience.
    pub children: Vec<StatusNode>,
}

impl StatusNode {
    /// Creates an unset node carrying only a caption.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: StatusNode) -> Self {
        self.children.push(child);
        self
    }

    /// Canonical name of the status, or the empty string when unset.
    pub fn status_name(&self) -> &'static str {
        self.status.map(StatusCode::name).unwrap_or("")
    }

    /// Identifier under which this node is addressed by its parent, if any.
    pub fn identifier(&self) -> Option<&str> {
        self.extras.get(CHILD_IDENTIFIER_KEY).map(String::as_str)
    }

    /// Returns the first child whose `identifiant` extra equals `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::ChildNotFound`] if no child carries that identifier. Callers
    /// address children with identifiers they obtained from the same record, so a miss is a
    /// contract violation rather than an expected outcome.
    pub fn find_child(&self, identifier: &str) -> ChecklistResult<&StatusNode> {
        self.children
            .iter()
            .find(|child| child.identifier() == Some(identifier))
            .ok_or_else(|| child_not_found(identifier))
    }

    /// Mutable variant of [`StatusNode::find_child`], for handlers overwriting a sub-state.
    pub fn find_child_mut(&mut self, identifier: &str) -> ChecklistResult<&mut StatusNode> {
        self.children
            .iter_mut()
            .find(|child| child.identifier() == Some(identifier))
            .ok_or_else(|| child_not_found(identifier))
    }

    /// Builds a node from its generic representation.
    ///
    /// Missing keys take their empty defaults: `libelle` becomes `""`, a missing, null or
    /// empty `statut` becomes `None`, `extra` and `enfants` become empty.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError`] if:
    /// - a `statut` (at any depth) is not a known status code name,
    /// - any field has an unexpected type, or an unknown key is present; the message carries
    ///   the path of the offending field (e.g. `enfants[1].extra.identifiant`).
    pub fn from_generic(tab_data: &GenericMap) -> ChecklistResult<Self> {
        let value = Value::Object(tab_data.clone());

        let wire = match serde_path_to_error::deserialize::<_, StatusNodeWire>(&value) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(ChecklistError::Translation(format!(
                    "Checklist node schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }

    /// Renders this node into its generic representation.
    ///
    /// `libelle`, `extra` and `enfants` are always written; `statut` is omitted when unset.
    /// The output is accepted by [`StatusNode::from_generic`] and yields an equal node.
    pub fn to_generic(&self) -> GenericMap {
        let mut map = GenericMap::new();
        map.insert(LABEL_KEY.to_owned(), Value::String(self.label.clone()));

        if let Some(status) = self.status {
            map.insert(STATUS_KEY.to_owned(), Value::String(status.name().to_owned()));
        }

        let extras = self
            .extras
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        map.insert(EXTRAS_KEY.to_owned(), Value::Object(extras));

        let children = self
            .children
            .iter()
            .map(|child| Value::Object(child.to_generic()))
            .collect();
        map.insert(CHILDREN_KEY.to_owned(), Value::Array(children));

        map
    }
}

fn child_not_found(identifier: &str) -> ChecklistError {
    ChecklistError::ChildNotFound {
        identifier: identifier.to_owned(),
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of a node, as persisted by the storage layer.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StatusNodeWire {
    #[serde(default, rename = "libelle")]
    label: String,

    #[serde(default, rename = "statut")]
    status: Option<String>,

    #[serde(default, rename = "extra")]
    extras: Extras,

    #[serde(default, rename = "enfants")]
    children: Vec<StatusNodeWire>,
}

fn wire_to_domain(wire: StatusNodeWire) -> ChecklistResult<StatusNode> {
    let status = match wire.status.as_deref() {
        None | Some("") => None,
        Some(name) => Some(name.parse::<StatusCode>()?),
    };

    let children = wire
        .children
        .into_iter()
        .map(wire_to_domain)
        .collect::<ChecklistResult<Vec<_>>>()?;

    Ok(StatusNode {
        label: wire.label,
        status,
        extras: wire.extras,
        children,
    })
}
