//! Constants used throughout the checklist core crate.
//!
//! Key names of the persisted checklist representation.

/// Key holding the human-readable caption of a node.
pub const LABEL_KEY: &str = "libelle";

/// Key holding the canonical status code name of a node.
pub const STATUS_KEY: &str = "statut";

/// Key holding the extra discriminators of a node.
pub const EXTRAS_KEY: &str = "extra";

/// Key holding the ordered child nodes of a node.
pub const CHILDREN_KEY: &str = "enfants";

/// Extra key addressing a child node within its parent.
pub const CHILD_IDENTIFIER_KEY: &str = "identifiant";

/// Record key of the snapshot taken when the application was submitted.
pub const INITIAL_KEY: &str = "initial";

/// Record key of the live checklist.
pub const CURRENT_KEY: &str = "current";

/// Separator between a parent identifier and a sub-entry name in catalog identifiers.
pub const SUB_ENTRY_SEPARATOR: char = '.';
