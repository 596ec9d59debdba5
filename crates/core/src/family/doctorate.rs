//! Doctoral admissions.

use super::{
    assimilation_entries, financeability_entries, past_curriculum_entries,
    past_experience_entries, personal_data_entries, sic_decision_entries,
    training_choice_entries, TO_BE_COMPLETED, TO_BE_PROCESSED,
};
use crate::substate::CddDecision;
use crate::{Catalog, CatalogEntry, Section, StatusCode, TabCatalog, TabSet};
use std::sync::OnceLock;

/// Tabs of a doctoral admission checklist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DoctorateTab {
    PersonalData,
    Assimilation,
    PastCurriculum,
    Financeability,
    TrainingChoice,
    ResearchProject,
    /// Decision of the doctoral committee.
    CddDecision,
    /// Decision of the central enrolment office.
    SicDecision,
}

static CATALOG: OnceLock<Catalog<DoctorateTab>> = OnceLock::new();
static LISTING_CATALOG: OnceLock<Catalog<DoctorateTab>> = OnceLock::new();

impl TabSet for DoctorateTab {
    const FAMILY: &'static str = "doctorate";

    const ALL: &'static [Self] = &[
        Self::PersonalData,
        Self::Assimilation,
        Self::PastCurriculum,
        Self::Financeability,
        Self::TrainingChoice,
        Self::ResearchProject,
        Self::CddDecision,
        Self::SicDecision,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::PersonalData => "donnees_personnelles",
            Self::Assimilation => "assimilation",
            Self::PastCurriculum => "parcours_anterieur",
            Self::Financeability => "financabilite",
            Self::TrainingChoice => "choix_formation",
            Self::ResearchProject => "projet_recherche",
            Self::CddDecision => "decision_cdd",
            Self::SicDecision => "decision_sic",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn children_section_name(self) -> Option<&'static str> {
        match self {
            Self::PastCurriculum => Some("experiences_parcours_anterieur"),
            _ => None,
        }
    }

    fn catalog() -> &'static Catalog<Self> {
        CATALOG.get_or_init(build_catalog)
    }

    fn listing_catalog() -> &'static Catalog<Self> {
        LISTING_CATALOG.get_or_init(|| {
            Self::catalog().for_listing(&[Self::CddDecision, Self::SicDecision])
        })
    }
}

fn build_catalog() -> Catalog<DoctorateTab> {
    use DoctorateTab::*;

    Catalog::new(vec![
        TabCatalog::new(Section::Tab(PersonalData), personal_data_entries()),
        TabCatalog::new(Section::Tab(Assimilation), assimilation_entries()),
        TabCatalog::new(Section::Tab(PastCurriculum), past_curriculum_entries()),
        TabCatalog::new(Section::Children(PastCurriculum), past_experience_entries()),
        TabCatalog::new(Section::Tab(Financeability), financeability_entries()),
        TabCatalog::new(Section::Tab(TrainingChoice), training_choice_entries()),
        TabCatalog::new(
            Section::Tab(ResearchProject),
            vec![
                CatalogEntry::new("A_TRAITER", TO_BE_PROCESSED, StatusCode::InitialCandidate),
                CatalogEntry::new("A_COMPLETER", TO_BE_COMPLETED, StatusCode::ManagerBlocked),
                CatalogEntry::new("VALIDE", "Validated", StatusCode::ManagerSuccess),
            ],
        ),
        TabCatalog::new(Section::Tab(CddDecision), cdd_decision_entries()),
        TabCatalog::new(Section::Tab(SicDecision), sic_decision_entries()),
    ])
}

fn cdd_decision_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("A_TRAITER", TO_BE_PROCESSED, StatusCode::InitialCandidate),
        CatalogEntry::new("PRIS_EN_CHARGE", "Taken in charge", StatusCode::ManagerInProgress),
        CatalogEntry::new(
            "A_COMPLETER_PAR_SIC",
            "To be completed by SIC",
            StatusCode::ManagerBlocked,
        )
        .with_extra("decision", CddDecision::OutOfDecision.name()),
        CatalogEntry::new("CLOTURE", "Closed", StatusCode::ManagerBlocked)
            .with_extra("decision", CddDecision::Closed.name()),
        CatalogEntry::new("REFUS", "Refusal", StatusCode::ManagerBlocked)
            .with_extra("decision", CddDecision::InDecision.name()),
        CatalogEntry::new("ACCORD", "Approval", StatusCode::ManagerSuccess),
    ]
}
