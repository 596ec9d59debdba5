//! General-education (bachelor and master) admissions.

use super::{
    assimilation_entries, financeability_entries, past_curriculum_entries,
    past_experience_entries, personal_data_entries, sic_decision_entries,
    training_choice_entries, NOT_CONCERNED, TO_BE_COMPLETED, TO_BE_PROCESSED,
};
use crate::substate::FacultyDecision as FacultyDecisionCode;
use crate::{Catalog, CatalogEntry, Section, StatusCode, TabCatalog, TabSet};
use std::sync::OnceLock;

/// Tabs of a general-education admission checklist.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeneralEducationTab {
    PersonalData,
    ApplicationFees,
    Assimilation,
    TrainingChoice,
    PastCurriculum,
    Financeability,
    TrainingSpecificities,
    FacultyDecision,
    /// Decision of the central enrolment office.
    SicDecision,
}

static CATALOG: OnceLock<Catalog<GeneralEducationTab>> = OnceLock::new();
static LISTING_CATALOG: OnceLock<Catalog<GeneralEducationTab>> = OnceLock::new();

impl TabSet for GeneralEducationTab {
    const FAMILY: &'static str = "general";

    const ALL: &'static [Self] = &[
        Self::PersonalData,
        Self::ApplicationFees,
        Self::Assimilation,
        Self::TrainingChoice,
        Self::PastCurriculum,
        Self::Financeability,
        Self::TrainingSpecificities,
        Self::FacultyDecision,
        Self::SicDecision,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::PersonalData => "donnees_personnelles",
            Self::ApplicationFees => "frais_dossier",
            Self::Assimilation => "assimilation",
            Self::TrainingChoice => "choix_formation",
            Self::PastCurriculum => "parcours_anterieur",
            Self::Financeability => "financabilite",
            Self::TrainingSpecificities => "specificites_formation",
            Self::FacultyDecision => "decision_facultaire",
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
            Self::catalog().for_listing(&[Self::FacultyDecision, Self::SicDecision])
        })
    }
}

fn build_catalog() -> Catalog<GeneralEducationTab> {
    use GeneralEducationTab::*;

    Catalog::new(vec![
        TabCatalog::new(Section::Tab(PersonalData), personal_data_entries()),
        TabCatalog::new(
            Section::Tab(ApplicationFees),
            vec![
                CatalogEntry::new("NON_CONCERNE", NOT_CONCERNED, StatusCode::InitialNotConcerned),
                CatalogEntry::new("PAYES", "Paid", StatusCode::SystemSuccess),
                CatalogEntry::new("DOIT_PAYER", "Must pay", StatusCode::ManagerBlocked),
                CatalogEntry::new("DISPENSE", "Dispensed", StatusCode::ManagerSuccess),
            ],
        ),
        TabCatalog::new(Section::Tab(Assimilation), assimilation_entries()),
        TabCatalog::new(Section::Tab(TrainingChoice), training_choice_entries()),
        TabCatalog::new(Section::Tab(PastCurriculum), past_curriculum_entries()),
        TabCatalog::new(Section::Children(PastCurriculum), past_experience_entries()),
        TabCatalog::new(Section::Tab(Financeability), financeability_entries()),
        TabCatalog::new(
            Section::Tab(TrainingSpecificities),
            vec![
                CatalogEntry::new("NON_CONCERNE", NOT_CONCERNED, StatusCode::InitialNotConcerned),
                CatalogEntry::new("A_TRAITER", TO_BE_PROCESSED, StatusCode::InitialCandidate),
                CatalogEntry::new("A_COMPLETER", TO_BE_COMPLETED, StatusCode::ManagerBlocked),
                CatalogEntry::new("VALIDE", "Validated", StatusCode::ManagerSuccess),
            ],
        ),
        TabCatalog::new(
            Section::Tab(FacultyDecision),
            vec![
                CatalogEntry::new("A_TRAITER", TO_BE_PROCESSED, StatusCode::InitialCandidate),
                CatalogEntry::new(
                    "PRIS_EN_CHARGE",
                    "Taken in charge",
                    StatusCode::ManagerInProgress,
                ),
                CatalogEntry::new(
                    "A_COMPLETER_PAR_SIC",
                    "To be completed by SIC",
                    StatusCode::ManagerBlocked,
                )
                .with_extra("decision", FacultyDecisionCode::OutOfDecision.value()),
                CatalogEntry::new("REFUS", "Refusal", StatusCode::ManagerBlocked)
                    .with_extra("decision", FacultyDecisionCode::InDecision.value()),
                CatalogEntry::new("ACCORD", "Approval", StatusCode::ManagerSuccess),
            ],
        ),
        TabCatalog::new(Section::Tab(SicDecision), sic_decision_entries()),
    ])
}
