//! Checklist status codes.
//!
//! The vocabulary is shared by every tab of every admission family. Each code is persisted
//! verbatim by its canonical name, so renaming a variant's canonical name is a data migration.

use crate::{ChecklistError, ChecklistResult};
use std::fmt;
use std::str::FromStr;

/// Closed enumeration of the states a checklist node can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCode {
    /// The tab does not apply to this application.
    InitialNotConcerned,
    /// Initial state, as filled in by the candidate.
    InitialCandidate,
    /// A manager is working on the tab.
    ManagerInProgress,
    /// A manager blocked the tab.
    ManagerBlocked,
    /// A manager deferred the tab until after enrolment.
    ManagerBlockedLater,
    /// A manager approved the tab.
    ManagerSuccess,
    /// The system approved the tab without manager intervention.
    SystemSuccess,
}

impl StatusCode {
    pub const ALL: [Self; 7] = [
        Self::InitialNotConcerned,
        Self::InitialCandidate,
        Self::ManagerInProgress,
        Self::ManagerBlocked,
        Self::ManagerBlockedLater,
        Self::ManagerSuccess,
        Self::SystemSuccess,
    ];

    /// Returns the canonical name used in persisted checklists.
    pub const fn name(self) -> &'static str {
        match self {
            Self::InitialNotConcerned => "INITIAL_NON_CONCERNE",
            Self::InitialCandidate => "INITIAL_CANDIDAT",
            Self::ManagerInProgress => "GEST_EN_COURS",
            Self::ManagerBlocked => "GEST_BLOCAGE",
            Self::ManagerBlockedLater => "GEST_BLOCAGE_ULTERIEUR",
            Self::ManagerSuccess => "GEST_REUSSITE",
            Self::SystemSuccess => "SYST_REUSSITE",
        }
    }
}

impl FromStr for StatusCode {
    type Err = ChecklistError;

    /// Resolves a canonical name. Matching is exact: persisted names are never normalised.
    fn from_str(s: &str) -> ChecklistResult<Self> {
        Self::ALL
            .into_iter()
            .find(|code| code.name() == s)
            .ok_or_else(|| ChecklistError::UnknownStatusCode(s.to_owned()))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
