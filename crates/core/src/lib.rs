//! # Checklist Core
//!
//! Admission checklist status model.
//!
//! This crate contains pure, synchronous data operations:
//! - Status trees holding one node per tab of an admission family, and their generic
//!   (JSON/YAML compatible) representation
//! - Declarative status catalogs and the first-match classifier
//! - Whole-tree classification reports and listing filters
//!
//! **No I/O**: reading record files, configuration and logging setup belong in `checklist-cli`.

pub mod catalog;
pub mod classify;
pub mod constants;
pub mod error;
pub mod family;
pub mod filter;
pub mod node;
pub mod status;
pub mod substate;
pub mod tab;
pub mod tree;

pub use catalog::{Catalog, CatalogEntry, TabCatalog};
pub use classify::{classify_tree, ClassificationReport, ClassificationRow};
pub use error::{ChecklistError, ChecklistResult};
pub use family::doctorate::DoctorateTab;
pub use family::general_education::GeneralEducationTab;
pub use filter::{ChecklistFilter, FilterMode};
pub use node::{Extras, GenericMap, StatusNode};
pub use status::StatusCode;
pub use tab::{Section, TabSet};
pub use tree::{ChecklistRecord, Generation, StatusTree};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Doctoral record exercising three levels: tab, experience, authentication sub-state.
    fn doctoral_record() -> serde_json::Value {
        json!({
            "initial": {
                "parcours_anterieur": {"libelle": "To be processed", "statut": "INITIAL_CANDIDAT"}
            },
            "current": {
                "parcours_anterieur": {
                    "libelle": "To be processed",
                    "statut": "INITIAL_CANDIDAT",
                    "extra": {},
                    "enfants": [
                        {
                            "libelle": "Master in physics",
                            "statut": "GEST_EN_COURS",
                            "extra": {
                                "identifiant": "3f1c",
                                "authentification": "1",
                                "etat_authentification": "AUTHENTIFICATION_DEMANDEE"
                            },
                            "enfants": []
                        }
                    ]
                },
                "decision_cdd": {
                    "libelle": "Closed",
                    "statut": "GEST_BLOCAGE",
                    "extra": {"decision": "CLOTURE"},
                    "enfants": []
                }
            }
        })
    }

    #[test]
    fn end_to_end_classification_of_a_persisted_record() {
        let record =
            ChecklistRecord::<DoctorateTab>::from_json_str(&doctoral_record().to_string())
                .expect("valid record");

        let experience = record
            .current
            .get_child(DoctorateTab::PastCurriculum, "3f1c")
            .expect("experience present");
        assert_eq!(experience.label, "Master in physics");

        let catalog = DoctorateTab::catalog();
        let section = Section::Children(DoctorateTab::PastCurriculum);
        let entry = catalog
            .classify_node(section, experience)
            .expect("experience classified");
        assert_eq!(entry.identifier, "AUTHENTIFICATION");
        let sub = catalog
            .classify_sub_state(section, entry, &experience.extras)
            .expect("sub-state classified");
        assert_eq!(sub.identifier, "AUTHENTIFICATION.AUTHENTIFICATION_DEMANDEE");

        let cdd = catalog
            .classify_node(
                Section::Tab(DoctorateTab::CddDecision),
                record.current.tab(DoctorateTab::CddDecision),
            )
            .expect("decision classified");
        assert_eq!(cdd.identifier, "CLOTURE");

        assert!(record.initial.tab(DoctorateTab::CddDecision).status.is_none());
    }

    #[test]
    fn record_round_trips_through_generic_form() {
        let record =
            ChecklistRecord::<DoctorateTab>::from_json_str(&doctoral_record().to_string())
                .expect("valid record");
        let again = ChecklistRecord::from_generic(&record.to_generic()).expect("round trip");
        assert_eq!(record, again);
    }
}
