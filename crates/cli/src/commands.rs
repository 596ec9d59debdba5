//! Command handlers.
//!
//! Each handler is generic over the admission family and returns the text to print, so that
//! `main` only has to pick the family and write the output.

use anyhow::{bail, Context};
use checklist_core::{
    classify_tree, Catalog, ChecklistFilter, ChecklistRecord, FilterMode, Generation, TabSet,
};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a record file, as YAML for `.yaml`/`.yml` files and as JSON otherwise.
pub fn read_record<T: TabSet>(path: &Path) -> anyhow::Result<ChecklistRecord<T>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let parsed = if is_yaml(path) {
        ChecklistRecord::from_yaml_str(&text)
    } else {
        ChecklistRecord::from_json_str(&text)
    };

    parsed.with_context(|| {
        format!(
            "failed to load {} checklist record from {}",
            T::FAMILY,
            path.display()
        )
    })
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}

pub fn classify<T: TabSet>(
    path: &Path,
    generation: Generation,
    json: bool,
) -> anyhow::Result<String> {
    let record = read_record::<T>(path)?;
    let report = classify_tree(T::catalog(), record.tree(generation));
    tracing::info!(
        family = T::FAMILY,
        generation = generation.key(),
        unmatched = report.unmatched().count(),
        "classified checklist"
    );

    if json {
        let mut text = serde_json::to_string_pretty(&report)?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(report.to_string())
    }
}

/// Renders the family catalog, or its listing projection.
pub fn catalog<T: TabSet>(listing: bool) -> String {
    let catalog = if listing {
        T::listing_catalog()
    } else {
        T::catalog()
    };
    render_catalog(catalog)
}

fn render_catalog<T: TabSet>(catalog: &Catalog<T>) -> String {
    let mut out = String::new();

    for tab in catalog.sections() {
        let _ = writeln!(out, "{}", tab.section.name());
        for entry in &tab.entries {
            let status = entry.status.map(|status| status.name()).unwrap_or("-");
            let extras = entry
                .extras
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(
                out,
                "  {:<48} {:<24} {:<40} {}",
                entry.identifier, status, entry.label, extras
            );
        }
    }

    out
}

/// Checks that the record survives a generic round trip unchanged.
pub fn check<T: TabSet>(path: &Path) -> anyhow::Result<String> {
    let record = read_record::<T>(path)?;
    let generic = record.to_generic();
    let reparsed = ChecklistRecord::<T>::from_generic(&generic)
        .with_context(|| format!("failed to re-read rendered record of {}", path.display()))?;

    if reparsed != record || reparsed.to_generic() != generic {
        bail!("{} does not round-trip", path.display());
    }

    let children: usize = [Generation::Initial, Generation::Current]
        .into_iter()
        .flat_map(|generation| record.tree(generation).iter())
        .map(|(_, node)| node.children.len())
        .sum();

    Ok(format!(
        "{}: ok ({} tabs per generation, {children} children)\n",
        path.display(),
        T::ALL.len()
    ))
}

/// Prints the files whose record is kept by the filter.
pub fn filter<T: TabSet>(
    paths: &[PathBuf],
    mode: FilterMode,
    select: &str,
) -> anyhow::Result<String> {
    let filter = ChecklistFilter::<T>::from_query(mode, select)
        .with_context(|| format!("invalid selection {select:?}"))?;
    tracing::debug!(mode = %mode, criteria = filter.criteria().len(), "resolved listing filter");

    let mut out = String::new();
    for path in paths {
        let record = read_record::<T>(path)?;
        if filter.accepts(&record) {
            let _ = writeln!(out, "{}", path.display());
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklist_core::{DoctorateTab, GeneralEducationTab};
    use std::fs;
    use tempfile::TempDir;

    const GENERAL_JSON: &str = r#"{
        "initial": {},
        "current": {
            "frais_dossier": {"libelle": "Paid", "statut": "SYST_REUSSITE", "extra": {}, "enfants": []},
            "decision_sic": {
                "libelle": "Dispensation needed",
                "statut": "GEST_EN_COURS",
                "extra": {"en_cours": "derogation", "etat_besoin_derogation": "ACCORD_DIRECTION"},
                "enfants": []
            }
        }
    }"#;

    const DOCTORATE_YAML: &str = "\
initial: {}
current:
  decision_cdd:
    libelle: Closed
    statut: GEST_BLOCAGE
    extra:
      decision: CLOTURE
  parcours_anterieur:
    libelle: Past curriculum
    statut: INITIAL_CANDIDAT
    enfants:
      - libelle: Master
        statut: GEST_EN_COURS
        extra:
          identifiant: x1
          authentification: '1'
          etat_authentification: VRAI
";

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn classifies_json_record() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, "general.json", GENERAL_JSON);

        let text = classify::<GeneralEducationTab>(&path, Generation::Current, false)
            .expect("classified");
        assert!(text.contains("PAYES (Paid)"));
        assert!(text.contains("BESOIN_DEROGATION.ACCORD_DIRECTION"));
    }

    #[test]
    fn classifies_yaml_record_as_json() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, "doctorate.yml", DOCTORATE_YAML);

        let text = classify::<DoctorateTab>(&path, Generation::Current, true).expect("classified");
        let report: serde_json::Value = serde_json::from_str(&text).expect("json output");
        assert_eq!(report["family"], "doctorate");

        let rows = report["rows"].as_array().expect("rows");
        let child = rows
            .iter()
            .find(|row| row["child"] == "x1")
            .expect("child row");
        assert_eq!(child["state"], "AUTHENTIFICATION");
        assert_eq!(child["sub_state"], "AUTHENTIFICATION.VRAI");
    }

    #[test]
    fn initial_generation_is_selectable() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, "doctorate.yaml", DOCTORATE_YAML);

        let text = classify::<DoctorateTab>(&path, Generation::Initial, false).expect("classified");
        assert!(!text.contains("CLOTURE"));
    }

    #[test]
    fn unknown_status_fails_with_file_context() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(
            &dir,
            "broken.json",
            r#"{"current": {"decision_cdd": {"statut": "GEST_PERDU"}}}"#,
        );

        let err = read_record::<DoctorateTab>(&path).expect_err("unknown status");
        let message = format!("{err:#}");
        assert!(message.contains("broken.json"));
        assert!(message.contains("GEST_PERDU"));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        let err = read_record::<DoctorateTab>(&dir.path().join("absent.json"))
            .expect_err("missing file");
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn check_accepts_sparse_records() {
        let dir = TempDir::new().expect("temp dir");
        let path = write(&dir, "doctorate.yaml", DOCTORATE_YAML);

        let text = check::<DoctorateTab>(&path).expect("round trip");
        assert!(text.contains("ok (8 tabs per generation, 1 children)"));
    }

    #[test]
    fn catalog_lists_sections_and_entries() {
        let full = catalog::<GeneralEducationTab>(false);
        assert!(full.contains("frais_dossier"));
        assert!(full.contains("experiences_parcours_anterieur"));
        assert!(full.contains("AUTHENTIFICATION.FAUX"));

        let listing = catalog::<GeneralEducationTab>(true);
        assert!(!listing.contains("frais_dossier"));
        assert!(listing.contains("decision_facultaire"));
        assert!(!listing.contains("BESOIN_DEROGATION.ACCORD_DIRECTION"));
    }

    #[test]
    fn filter_prints_kept_files() {
        let dir = TempDir::new().expect("temp dir");
        let kept = write(&dir, "kept.json", GENERAL_JSON);
        let dropped = write(&dir, "dropped.json", r#"{"current": {}}"#);
        let paths = vec![kept.clone(), dropped.clone()];

        let included = filter::<GeneralEducationTab>(
            &paths,
            FilterMode::Inclusion,
            "decision_sic=BESOIN_DEROGATION.ACCORD_DIRECTION",
        )
        .expect("filtered");
        assert_eq!(included, format!("{}\n", kept.display()));

        let excluded =
            filter::<GeneralEducationTab>(&paths, FilterMode::Exclusion, "frais_dossier=PAYES")
                .expect("filtered");
        assert_eq!(excluded, format!("{}\n", dropped.display()));
    }

    #[test]
    fn filter_rejects_malformed_selection() {
        let err = filter::<DoctorateTab>(&[], FilterMode::Inclusion, "decision_cdd")
            .expect_err("malformed");
        assert!(format!("{err:#}").contains("invalid selection"));
    }
}
