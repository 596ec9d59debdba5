//! Admission families and their static catalogs.
//!
//! The doctoral and general-education families store different tab sets, but several tabs
//! are reviewed identically in both. The shared sections are authored once here.

pub mod doctorate;
pub mod general_education;

use crate::substate::{AuthenticationState, DispensationNeed, FinancingDispensation};
use crate::{CatalogEntry, StatusCode};

const TO_BE_PROCESSED: &str = "To be processed";
const TO_BE_COMPLETED: &str = "To be completed";
const NOT_CONCERNED: &str = "Not concerned";

pub(crate) fn personal_data_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("A_TRAITER", TO_BE_PROCESSED, StatusCode::InitialCandidate),
        CatalogEntry::new("A_COMPLETER", TO_BE_COMPLETED, StatusCode::ManagerBlocked)
            .with_extra("fraud", "0"),
        CatalogEntry::new("FRAUDEUR", "Fraudster", StatusCode::ManagerBlocked)
            .with_extra("fraud", "1"),
        CatalogEntry::new("VALIDEES", "Validated", StatusCode::ManagerSuccess),
    ]
}

pub(crate) fn assimilation_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("NON_CONCERNE", NOT_CONCERNED, StatusCode::InitialNotConcerned),
        CatalogEntry::new(
            "DECLARE_ASSIMILE_OU_PAS",
            "Declared assimilated or not",
            StatusCode::InitialCandidate,
        ),
        CatalogEntry::new("A_COMPLETER", TO_BE_COMPLETED, StatusCode::ManagerBlocked),
        CatalogEntry::new("AVIS_EXPERT", "Expert opinion", StatusCode::ManagerInProgress),
        CatalogEntry::new(
            "A_COMPLETER_APRES_INSCRIPTION",
            "To be completed after application",
            StatusCode::ManagerBlockedLater,
        ),
        CatalogEntry::new("VALIDEE", "Validated", StatusCode::ManagerSuccess),
    ]
}

pub(crate) fn past_curriculum_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("A_TRAITER", TO_BE_PROCESSED, StatusCode::InitialCandidate),
        CatalogEntry::new("TOILETTE", "Cleaned", StatusCode::ManagerInProgress),
        CatalogEntry::new("INSUFFISANT", "Insufficient", StatusCode::ManagerBlocked),
        CatalogEntry::new("SUFFISANT", "Sufficient", StatusCode::ManagerSuccess),
    ]
}

/// Entries classifying each prior-curriculum experience (the children of the past
/// curriculum tab).
pub(crate) fn past_experience_entries() -> Vec<CatalogEntry> {
    let mut entries = vec![
        CatalogEntry::new("A_TRAITER", TO_BE_PROCESSED, StatusCode::InitialCandidate),
        CatalogEntry::new("A_COMPLETER", TO_BE_COMPLETED, StatusCode::ManagerBlocked),
        CatalogEntry::new("AUTHENTIFICATION", "Authentication", StatusCode::ManagerInProgress)
            .with_extra("authentification", "1"),
    ];

    entries.extend(AuthenticationState::ALL.into_iter().map(|state| {
        CatalogEntry::sub_entry("AUTHENTIFICATION", state.name(), state.label())
            .with_extra("etat_authentification", state.name())
    }));

    entries.extend([
        CatalogEntry::new("AVIS_EXPERT", "Expert advice", StatusCode::ManagerInProgress)
            .with_extra("authentification", "0"),
        CatalogEntry::new(
            "A_COMPLETER_APRES_INSCRIPTION",
            "To complete after enrolment",
            StatusCode::ManagerBlockedLater,
        ),
        CatalogEntry::new("VALIDEE", "Validated", StatusCode::ManagerSuccess),
    ]);

    entries
}

pub(crate) fn financeability_entries() -> Vec<CatalogEntry> {
    let mut entries = vec![
        CatalogEntry::new("NON_CONCERNE", NOT_CONCERNED, StatusCode::InitialNotConcerned),
        CatalogEntry::new("A_TRAITER", TO_BE_PROCESSED, StatusCode::InitialCandidate),
        CatalogEntry::new("AVIS_EXPERT", "Expert opinion", StatusCode::ManagerInProgress)
            .with_extra("en_cours", "expert"),
        CatalogEntry::new(
            "BESOIN_DEROGATION",
            "Dispensation needed",
            StatusCode::ManagerInProgress,
        )
        .with_extra("en_cours", "derogation"),
    ];

    entries.extend(FinancingDispensation::ALL.into_iter().map(|state| {
        CatalogEntry::sub_entry("BESOIN_DEROGATION", state.name(), state.label())
            .with_extra("etat_besoin_derogation", state.name())
    }));

    entries.extend([
        CatalogEntry::new("A_COMPLETER", TO_BE_COMPLETED, StatusCode::ManagerBlocked)
            .with_extra("to_be_completed", "1"),
        CatalogEntry::new("NON_FINANCABLE", "Not financeable", StatusCode::ManagerBlocked)
            .with_extra("to_be_completed", "0"),
        CatalogEntry::new(
            "DEROGATION_ACCORDEE",
            "Dispensation granted",
            StatusCode::ManagerSuccess,
        )
        .with_extra("reussite", "derogation"),
        CatalogEntry::new("FINANCABLE", "Financeable", StatusCode::ManagerSuccess)
            .with_extra("reussite", "financable"),
    ]);

    entries
}

pub(crate) fn training_choice_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("A_TRAITER", TO_BE_PROCESSED, StatusCode::InitialCandidate),
        CatalogEntry::new("VALIDE", "Validated", StatusCode::ManagerSuccess),
    ]
}

/// Entries of the central-office (SIC) decision tab.
pub(crate) fn sic_decision_entries() -> Vec<CatalogEntry> {
    let mut entries = vec![
        CatalogEntry::new("A_TRAITER", TO_BE_PROCESSED, StatusCode::InitialCandidate),
        CatalogEntry::new("A_COMPLETER", "Manager follow-up", StatusCode::ManagerBlocked)
            .with_extra("blocage", "to_be_completed"),
        CatalogEntry::new(
            "BESOIN_DEROGATION",
            "Dispensation needed",
            StatusCode::ManagerInProgress,
        )
        .with_extra("en_cours", "derogation"),
    ];

    entries.extend(DispensationNeed::ALL.into_iter().map(|need| {
        CatalogEntry::sub_entry("BESOIN_DEROGATION", need.name(), need.label())
            .with_extra("etat_besoin_derogation", need.name())
    }));

    entries.extend([
        CatalogEntry::new(
            "REFUS_A_VALIDER",
            "Refusal to validate",
            StatusCode::ManagerInProgress,
        )
        .with_extra("en_cours", "refusal"),
        CatalogEntry::new(
            "AUTORISATION_A_VALIDER",
            "Approval to validate",
            StatusCode::ManagerInProgress,
        )
        .with_extra("en_cours", "approval"),
        CatalogEntry::new("CLOTURE", "Closed", StatusCode::ManagerBlocked)
            .with_extra("blocage", "closed"),
        CatalogEntry::new("REFUSE", "Refused", StatusCode::ManagerBlocked)
            .with_extra("blocage", "refusal"),
        CatalogEntry::new("AUTORISE", "Approved", StatusCode::ManagerSuccess),
    ]);

    entries
}

#[cfg(test)]
mod tests {
    use crate::{Catalog, Section, TabSet};
    use std::collections::HashSet;

    use super::doctorate::DoctorateTab;
    use super::general_education::GeneralEducationTab;

    fn assert_consistent<T: TabSet>(catalog: &Catalog<T>) {
        let mut sections = HashSet::new();
        for tab in catalog.sections() {
            assert!(
                sections.insert(tab.section.name()),
                "section {} declared twice",
                tab.section.name()
            );
            assert_eq!(Section::<T>::from_name(tab.section.name()), Some(tab.section));

            let mut identifiers = HashSet::new();
            for entry in &tab.entries {
                assert!(
                    identifiers.insert(entry.identifier.as_str()),
                    "{} declared twice in {}",
                    entry.identifier,
                    tab.section.name()
                );

                match &entry.parent_identifier {
                    Some(parent) => {
                        assert!(entry.status.is_none(), "{} is a sub-entry", entry.identifier);
                        assert!(entry.identifier.starts_with(&format!("{parent}.")));
                        let parent_entry = tab.entry(parent).expect("parent is declared");
                        assert!(parent_entry.status.is_some());
                    }
                    None => assert!(entry.status.is_some(), "{} has a status", entry.identifier),
                }
            }

            let masked = tab.masked_entries();
            assert!(
                masked.is_empty(),
                "{} masks {} in {}",
                masked[0].0.identifier,
                masked[0].1.identifier,
                tab.section.name()
            );
        }
    }

    fn assert_tab_indices<T: TabSet>() {
        for (position, tab) in T::ALL.iter().enumerate() {
            assert_eq!(tab.index(), position, "{tab:?}");
            assert_eq!(T::from_name(tab.name()), Some(*tab));
        }
    }

    #[test]
    fn doctorate_catalog_is_consistent() {
        assert_tab_indices::<DoctorateTab>();
        assert_consistent(DoctorateTab::catalog());
        assert_consistent(DoctorateTab::listing_catalog());
    }

    #[test]
    fn general_education_catalog_is_consistent() {
        assert_tab_indices::<GeneralEducationTab>();
        assert_consistent(GeneralEducationTab::catalog());
        assert_consistent(GeneralEducationTab::listing_catalog());
    }

    #[test]
    fn every_stored_tab_has_a_section() {
        for tab in DoctorateTab::ALL {
            assert!(DoctorateTab::catalog().section(Section::Tab(*tab)).is_some(), "{tab:?}");
        }
        for tab in GeneralEducationTab::ALL {
            assert!(
                GeneralEducationTab::catalog().section(Section::Tab(*tab)).is_some(),
                "{tab:?}"
            );
        }
    }
}
