//! Listing filter over checklist records.
//!
//! A filter selects catalog entries per section and keeps (inclusion) or drops (exclusion)
//! the records whose `current` tree matches any of them. Selecting a sub-state such as
//! `BESOIN_DEROGATION.ACCORD_DIRECTION` together with its parent narrows the parent: the bare
//! parent is dropped from the selection and the sub-entry is merged onto it, so a node must
//! carry both the parent's status and extras and the sub-entry's extras. A sub-state selected
//! without its parent has no status and matches on its extras alone.

use crate::{
    Catalog, CatalogEntry, ChecklistError, ChecklistRecord, ChecklistResult, Section,
    StatusNode, StatusTree, TabSet,
};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    /// Keep records matching at least one selected entry.
    Inclusion,
    /// Keep records matching none of the selected entries.
    Exclusion,
}

impl FromStr for FilterMode {
    type Err = ChecklistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inclusion" => Ok(Self::Inclusion),
            "exclusion" => Ok(Self::Exclusion),
            other => Err(ChecklistError::InvalidInput(format!(
                "unknown filter mode {other:?}, expected inclusion or exclusion"
            ))),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inclusion => "inclusion",
            Self::Exclusion => "exclusion",
        })
    }
}

/// Section name paired with the entry identifiers selected in it.
pub type Selection = Vec<(String, Vec<String>)>;

/// Resolved listing filter for the family `T`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChecklistFilter<T: TabSet> {
    mode: FilterMode,
    criteria: Vec<(Section<T>, CatalogEntry)>,
}

impl<T: TabSet> ChecklistFilter<T> {
    /// Resolves `selection` against the family catalog.
    pub fn new(mode: FilterMode, selection: &Selection) -> Self {
        Self::with_catalog(T::catalog(), mode, selection)
    }

    /// Resolves `selection` against `catalog`.
    ///
    /// Unknown sections and identifiers are skipped.
    pub fn with_catalog(catalog: &Catalog<T>, mode: FilterMode, selection: &Selection) -> Self {
        let mut criteria = Vec::new();

        for (section_name, identifiers) in selection {
            let Some(section) = Section::<T>::from_name(section_name) else {
                tracing::debug!(
                    family = T::FAMILY,
                    section = %section_name,
                    "ignoring unknown filter section"
                );
                continue;
            };
            let Some(tab_catalog) = catalog.section(section) else {
                tracing::debug!(
                    family = T::FAMILY,
                    section = %section_name,
                    "filter section has no catalog"
                );
                continue;
            };

            let selected: Vec<&CatalogEntry> = identifiers
                .iter()
                .filter_map(|identifier| {
                    let entry = tab_catalog.entry(identifier);
                    if entry.is_none() {
                        tracing::debug!(
                            family = T::FAMILY,
                            section = %section_name,
                            identifier = %identifier,
                            "ignoring unknown filter entry"
                        );
                    }
                    entry
                })
                .collect();

            // Parents selected together with one of their sub-entries.
            let narrowed: BTreeSet<&str> = selected
                .iter()
                .copied()
                .filter_map(|entry| entry.parent_identifier.as_deref())
                .filter(|parent| selected.iter().any(|entry| entry.identifier == *parent))
                .collect();

            for entry in selected.iter().copied() {
                let criterion = match entry.parent_identifier.as_deref() {
                    Some(parent) if narrowed.contains(parent) => match tab_catalog.entry(parent) {
                        Some(parent) => entry.merge(parent),
                        None => continue,
                    },
                    Some(_) => entry.clone(),
                    None if narrowed.contains(entry.identifier.as_str()) => continue,
                    None => entry.clone(),
                };
                if !criteria.contains(&(section, criterion.clone())) {
                    criteria.push((section, criterion));
                }
            }
        }

        Self { mode, criteria }
    }

    /// Parses a query of the form `section=ID1,ID2;section2=ID3`.
    ///
    /// # Errors
    ///
    /// Returns [`ChecklistError::InvalidInput`] if a clause has no `=` or an empty section
    /// name.
    pub fn from_query(mode: FilterMode, query: &str) -> ChecklistResult<Self> {
        Ok(Self::new(mode, &parse_query(query)?))
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Resolved criteria, sub-states merged onto their parents when both were selected.
    pub fn criteria(&self) -> &[(Section<T>, CatalogEntry)] {
        &self.criteria
    }

    /// Whether any criterion matches `tree`.
    pub fn matches_tree(&self, tree: &StatusTree<T>) -> bool {
        self.criteria
            .iter()
            .any(|(section, entry)| section_matches(*section, entry, tree))
    }

    /// Whether `record` is kept. An empty selection keeps every record.
    pub fn accepts(&self, record: &ChecklistRecord<T>) -> bool {
        if self.criteria.is_empty() {
            return true;
        }

        let matched = self.matches_tree(&record.current);
        match self.mode {
            FilterMode::Inclusion => matched,
            FilterMode::Exclusion => !matched,
        }
    }

    pub fn retain(&self, records: &mut Vec<ChecklistRecord<T>>) {
        records.retain(|record| self.accepts(record));
    }
}

fn section_matches<T: TabSet>(
    section: Section<T>,
    entry: &CatalogEntry,
    tree: &StatusTree<T>,
) -> bool {
    let node = tree.tab(section.tab());
    match section {
        Section::Tab(_) => node_matches(entry, node),
        Section::Children(_) => node.children.iter().any(|child| node_matches(entry, child)),
    }
}

fn node_matches(entry: &CatalogEntry, node: &StatusNode) -> bool {
    let status_matches = match entry.status {
        Some(status) => node.status == Some(status),
        None => true,
    };
    status_matches && entry.extras_subset_of(&node.extras)
}

fn parse_query(query: &str) -> ChecklistResult<Selection> {
    let mut selection = Selection::new();

    for clause in query.split(';').map(str::trim).filter(|clause| !clause.is_empty()) {
        let Some((section, identifiers)) = clause.split_once('=') else {
            return Err(ChecklistError::InvalidInput(format!(
                "filter clause {clause:?} must be of the form section=ID1,ID2"
            )));
        };
        let section = section.trim();
        if section.is_empty() {
            return Err(ChecklistError::InvalidInput(format!(
                "filter clause {clause:?} has no section"
            )));
        }

        let identifiers = identifiers
            .split(',')
            .map(str::trim)
            .filter(|identifier| !identifier.is_empty())
            .map(str::to_owned)
            .collect();
        selection.push((section.to_owned(), identifiers));
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::doctorate::DoctorateTab;
    use crate::family::general_education::GeneralEducationTab;
    use crate::StatusCode;

    fn record_with_sic(node: StatusNode) -> ChecklistRecord<GeneralEducationTab> {
        let mut record = ChecklistRecord::default();
        record.current.set_tab(GeneralEducationTab::SicDecision, node);
        record
    }

    fn dispensation(state: &str) -> StatusNode {
        StatusNode::new("Dispensation needed")
            .with_status(StatusCode::ManagerInProgress)
            .with_extra("en_cours", "derogation")
            .with_extra("etat_besoin_derogation", state)
    }

    #[test]
    fn parses_queries() {
        let selection = parse_query(" decision_sic=A_COMPLETER, AUTORISE ;frais_dossier=PAYES;")
            .expect("valid query");
        assert_eq!(
            selection,
            vec![
                (
                    "decision_sic".to_owned(),
                    vec!["A_COMPLETER".to_owned(), "AUTORISE".to_owned()]
                ),
                ("frais_dossier".to_owned(), vec!["PAYES".to_owned()]),
            ]
        );
    }

    #[test]
    fn rejects_malformed_queries() {
        assert!(matches!(
            parse_query("decision_sic"),
            Err(ChecklistError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_query("=A_TRAITER"),
            Err(ChecklistError::InvalidInput(_))
        ));
        assert!(matches!(
            "both".parse::<FilterMode>(),
            Err(ChecklistError::InvalidInput(_))
        ));
    }

    #[test]
    fn sub_entry_replaces_its_parent() {
        let filter = ChecklistFilter::<GeneralEducationTab>::from_query(
            FilterMode::Inclusion,
            "decision_sic=BESOIN_DEROGATION,BESOIN_DEROGATION.ACCORD_DIRECTION",
        )
        .expect("valid query");

        let criteria = filter.criteria();
        assert_eq!(criteria.len(), 1);
        let (section, entry) = &criteria[0];
        assert_eq!(*section, Section::Tab(GeneralEducationTab::SicDecision));
        assert_eq!(entry.identifier, "BESOIN_DEROGATION.ACCORD_DIRECTION");
        assert_eq!(entry.status, Some(StatusCode::ManagerInProgress));
        assert_eq!(entry.extras.get("en_cours").map(String::as_str), Some("derogation"));

        assert!(filter.accepts(&record_with_sic(dispensation("ACCORD_DIRECTION"))));
        assert!(!filter.accepts(&record_with_sic(dispensation("REFUS_DIRECTION"))));
    }

    #[test]
    fn bare_parent_matches_every_sub_state() {
        let filter = ChecklistFilter::<GeneralEducationTab>::from_query(
            FilterMode::Inclusion,
            "decision_sic=BESOIN_DEROGATION",
        )
        .expect("valid query");

        assert!(filter.accepts(&record_with_sic(dispensation("ACCORD_DIRECTION"))));
        assert!(filter.accepts(&record_with_sic(dispensation("REFUS_DIRECTION"))));
        assert!(!filter.accepts(&record_with_sic(
            StatusNode::new("Approved").with_status(StatusCode::ManagerSuccess)
        )));
    }

    #[test]
    fn exclusion_drops_matching_records() {
        let filter = ChecklistFilter::<GeneralEducationTab>::from_query(
            FilterMode::Exclusion,
            "decision_sic=AUTORISE",
        )
        .expect("valid query");

        let approved =
            record_with_sic(StatusNode::new("Approved").with_status(StatusCode::ManagerSuccess));
        let pending = record_with_sic(dispensation("ACCORD_DIRECTION"));

        let mut records = vec![approved, pending.clone()];
        filter.retain(&mut records);
        assert_eq!(records, vec![pending]);
    }

    #[test]
    fn children_section_matches_any_child() {
        let filter = ChecklistFilter::<DoctorateTab>::from_query(
            FilterMode::Inclusion,
            "experiences_parcours_anterieur=AUTHENTIFICATION.FAUX",
        )
        .expect("valid query");

        let mut forged = ChecklistRecord::<DoctorateTab>::default();
        forged.current.set_tab(
            DoctorateTab::PastCurriculum,
            StatusNode::new("Past curriculum")
                .with_child(StatusNode::new("e1").with_status(StatusCode::ManagerSuccess))
                .with_child(
                    StatusNode::new("e2")
                        .with_status(StatusCode::ManagerInProgress)
                        .with_extra("authentification", "1")
                        .with_extra("etat_authentification", "FAUX"),
                ),
        );
        assert!(filter.accepts(&forged));

        let mut authentic = forged.clone();
        authentic
            .current
            .tab_mut(DoctorateTab::PastCurriculum)
            .children[1]
            .extras
            .insert("etat_authentification".to_owned(), "VRAI".to_owned());
        assert!(!filter.accepts(&authentic));
    }

    fn past_experience(
        status: StatusCode,
        authentication_state: &str,
    ) -> ChecklistRecord<DoctorateTab> {
        let mut record = ChecklistRecord::<DoctorateTab>::default();
        record.current.set_tab(
            DoctorateTab::PastCurriculum,
            StatusNode::new("Past curriculum").with_child(
                StatusNode::new("e1")
                    .with_status(status)
                    .with_extra("authentification", "1")
                    .with_extra("etat_authentification", authentication_state),
            ),
        );
        record
    }

    #[test]
    fn sub_entry_selected_alone_matches_on_extras() {
        let filter = ChecklistFilter::<DoctorateTab>::from_query(
            FilterMode::Inclusion,
            "experiences_parcours_anterieur=AUTHENTIFICATION.FAUX",
        )
        .expect("valid query");

        let criteria = filter.criteria();
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].1.identifier, "AUTHENTIFICATION.FAUX");
        assert_eq!(criteria[0].1.status, None);

        assert!(filter.accepts(&past_experience(StatusCode::ManagerSuccess, "FAUX")));
        assert!(filter.accepts(&past_experience(StatusCode::ManagerInProgress, "FAUX")));
        assert!(!filter.accepts(&past_experience(StatusCode::ManagerSuccess, "VRAI")));
    }

    #[test]
    fn sub_entry_selected_with_its_parent_requires_both() {
        let filter = ChecklistFilter::<DoctorateTab>::from_query(
            FilterMode::Inclusion,
            "experiences_parcours_anterieur=AUTHENTIFICATION,AUTHENTIFICATION.FAUX",
        )
        .expect("valid query");

        let criteria = filter.criteria();
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].1.identifier, "AUTHENTIFICATION.FAUX");
        assert_eq!(criteria[0].1.status, Some(StatusCode::ManagerInProgress));

        assert!(filter.accepts(&past_experience(StatusCode::ManagerInProgress, "FAUX")));
        assert!(!filter.accepts(&past_experience(StatusCode::ManagerSuccess, "FAUX")));
        assert!(!filter.accepts(&past_experience(StatusCode::ManagerInProgress, "VRAI")));
    }

    #[test]
    fn only_the_current_tree_is_filtered() {
        let filter = ChecklistFilter::<GeneralEducationTab>::from_query(
            FilterMode::Inclusion,
            "frais_dossier=PAYES",
        )
        .expect("valid query");

        let mut record = ChecklistRecord::<GeneralEducationTab>::default();
        record.initial.set_tab(
            GeneralEducationTab::ApplicationFees,
            StatusNode::new("Paid").with_status(StatusCode::SystemSuccess),
        );
        assert!(!filter.accepts(&record));
    }

    #[test]
    fn unknown_names_are_skipped() {
        let filter = ChecklistFilter::<DoctorateTab>::from_query(
            FilterMode::Inclusion,
            "frais_dossier=PAYES;decision_cdd=INCONNU,ACCORD",
        )
        .expect("valid query");

        let criteria = filter.criteria();
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].1.identifier, "ACCORD");
    }

    #[test]
    fn empty_selection_keeps_everything() {
        let record = ChecklistRecord::<DoctorateTab>::default();
        for mode in [FilterMode::Inclusion, FilterMode::Exclusion] {
            let filter =
                ChecklistFilter::<DoctorateTab>::from_query(mode, "").expect("empty query");
            assert!(filter.criteria().is_empty());
            assert!(filter.accepts(&record));
        }
    }
}
