//! Vocabularies refining a catalog entry into sub-states.
//!
//! Each vocabulary generates one sub-entry per variant under its owning catalog entry, and
//! its variant names are stored verbatim in node extras.

/// Authentication state of a prior-curriculum experience.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthenticationState {
    NotConcerned,
    Requested,
    InstitutionContacted,
    Authentic,
    Forged,
}

impl AuthenticationState {
    pub const ALL: [Self; 5] = [
        Self::NotConcerned,
        Self::Requested,
        Self::InstitutionContacted,
        Self::Authentic,
        Self::Forged,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::NotConcerned => "NON_CONCERNE",
            Self::Requested => "AUTHENTIFICATION_DEMANDEE",
            Self::InstitutionContacted => "ETABLISSEMENT_CONTACTE",
            Self::Authentic => "VRAI",
            Self::Forged => "FAUX",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotConcerned => "Not concerned",
            Self::Requested => "Authentication requested",
            Self::InstitutionContacted => "Institution contacted",
            Self::Authentic => "Authentic",
            Self::Forged => "Forged",
        }
    }
}

/// Progress of a financing dispensation requested from the faculty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FinancingDispensation {
    NotConcerned,
    CandidateWithdrew,
    FacultyRefused,
    FacultyGranted,
    CandidateNotified,
}

impl FinancingDispensation {
    pub const ALL: [Self; 5] = [
        Self::NotConcerned,
        Self::CandidateWithdrew,
        Self::FacultyRefused,
        Self::FacultyGranted,
        Self::CandidateNotified,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::NotConcerned => "NON_CONCERNE",
            Self::CandidateWithdrew => "ABANDON_DU_CANDIDAT",
            Self::FacultyRefused => "REFUS_DE_DEROGATION_FACULTAIRE",
            Self::FacultyGranted => "ACCORD_DE_DEROGATION_FACULTAIRE",
            Self::CandidateNotified => "CANDIDAT_NOTIFIE",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotConcerned => "Not concerned",
            Self::CandidateWithdrew => "Candidate withdrawal",
            Self::FacultyRefused => "Faculty dispensation refusal",
            Self::FacultyGranted => "Faculty dispensation granted",
            Self::CandidateNotified => "Candidate notified",
        }
    }
}

/// Progress of a dispensation requested from the management board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispensationNeed {
    ComplementNeeded,
    OpinionRequested,
    BoardRefused,
    BoardGranted,
}

impl DispensationNeed {
    pub const ALL: [Self; 4] = [
        Self::ComplementNeeded,
        Self::OpinionRequested,
        Self::BoardRefused,
        Self::BoardGranted,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::ComplementNeeded => "BESOIN_DE_COMPLEMENT",
            Self::OpinionRequested => "AVIS_DIRECTION_DEMANDE",
            Self::BoardRefused => "REFUS_DIRECTION",
            Self::BoardGranted => "ACCORD_DIRECTION",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ComplementNeeded => "Additional information needed",
            Self::OpinionRequested => "Board opinion requested",
            Self::BoardRefused => "Board refusal",
            Self::BoardGranted => "Board approval",
        }
    }
}

/// Decision recorded by the doctoral committee (CDD) on a blocked application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CddDecision {
    InDecision,
    OutOfDecision,
    Closed,
}

impl CddDecision {
    pub const fn name(self) -> &'static str {
        match self {
            Self::InDecision => "EN_DECISION",
            Self::OutOfDecision => "HORS_DECISION",
            Self::Closed => "CLOTURE",
        }
    }
}

/// Decision recorded by the faculty on a blocked application.
///
/// Unlike [`CddDecision`], faculty decisions are stored by value rather than by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FacultyDecision {
    OutOfDecision,
    InDecision,
}

impl FacultyDecision {
    pub const fn value(self) -> &'static str {
        match self {
            Self::OutOfDecision => "0",
            Self::InDecision => "1",
        }
    }
}
