//! Applicator label clean-up.
//!
//! The catalog's `applicator` column is free text. Classification matches
//! it literally, so known variants are folded onto one label (or cleared)
//! before a matrix rebuild.

use std::collections::BTreeMap;

use bbcat_core::{Catalog, ComponentCategory, ProductRecord};

/// Histogram key for records with no applicator.
pub const NO_APPLICATOR: &str = "(none)";

/// Records carrying one roller label, split by whether the roller ships
/// fitted to a bottle or on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollerCounts {
    pub bundles: usize,
    pub standalone: usize,
}

impl RollerCounts {
    #[must_use]
    pub fn total(self) -> usize {
        self.bundles + self.standalone
    }
}

/// What one normalization pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicatorReport {
    pub records: usize,
    /// Records whose applicator was replaced by another label.
    pub changed: usize,
    /// Records whose applicator was removed.
    pub cleared: usize,
    pub before: BTreeMap<String, usize>,
    pub after: BTreeMap<String, usize>,
    /// Counted after normalization.
    pub plastic_rollers: RollerCounts,
    pub metal_rollers: RollerCounts,
}

impl ApplicatorReport {
    #[must_use]
    pub fn touched(&self) -> usize {
        self.changed + self.cleared
    }

    /// No metal roller is sold as a component of its own; bottles needing
    /// one can only be served by a bundle.
    #[must_use]
    pub fn missing_standalone_metal_roller(&self) -> bool {
        self.metal_rollers.standalone == 0
    }
}

/// Rewrites every record's applicator through `aliases`: a mapped label
/// replaces the value, `None` clears it, anything else is left alone.
///
/// Lookup is on the trimmed label. Records of `bottle_category` count as
/// bundles in the roller tallies.
#[must_use]
pub fn normalize_applicators(
    catalog: &Catalog,
    aliases: &BTreeMap<String, Option<String>>,
    bottle_category: &str,
) -> (Catalog, ApplicatorReport) {
    let mut report = ApplicatorReport {
        records: catalog.len(),
        ..ApplicatorReport::default()
    };

    let records: Vec<ProductRecord> = catalog
        .iter()
        .map(|record| {
            count(&mut report.before, record.applicator());

            let mut updated = record.clone();
            if let Some(replacement) = record
                .applicator()
                .and_then(|label| aliases.get(label.trim()))
            {
                if replacement.is_some() {
                    report.changed += 1;
                } else {
                    report.cleared += 1;
                }
                updated.set_applicator(replacement.clone());
            }

            count(&mut report.after, updated.applicator());
            let rollers = match updated.applicator() {
                Some(label) if label == ComponentCategory::PlasticRoller.label() => {
                    Some(&mut report.plastic_rollers)
                }
                Some(label) if label == ComponentCategory::MetalRoller.label() => {
                    Some(&mut report.metal_rollers)
                }
                _ => None,
            };
            if let Some(rollers) = rollers {
                if updated.category() == bottle_category {
                    rollers.bundles += 1;
                } else {
                    rollers.standalone += 1;
                }
            }
            updated
        })
        .collect();

    tracing::info!(
        records = report.records,
        changed = report.changed,
        cleared = report.cleared,
        plastic_rollers = report.plastic_rollers.total(),
        metal_rollers = report.metal_rollers.total(),
        "applicator labels normalized"
    );
    if report.missing_standalone_metal_roller() {
        tracing::warn!(
            metal_roller_bundles = report.metal_rollers.bundles,
            "no standalone metal roller component in catalog"
        );
    }

    (Catalog::from_records(records), report)
}

fn count(histogram: &mut BTreeMap<String, usize>, applicator: Option<&str>) {
    let key = applicator
        .filter(|a| !a.trim().is_empty())
        .unwrap_or(NO_APPLICATOR);
    *histogram.entry(key.to_string()).or_default() += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases() -> BTreeMap<String, Option<String>> {
        BTreeMap::from([
            ("Roller Ball".to_string(), Some("Plastic Roller".to_string())),
            ("Metal Roll-On".to_string(), Some("Metal Roller".to_string())),
            ("Cap/Closure".to_string(), None),
        ])
    }

    fn with_applicator(sku: &str, applicator: Option<&str>) -> ProductRecord {
        let mut record = ProductRecord::new(sku, "Component");
        record.set("applicator", applicator);
        record
    }

    fn bottle_with_applicator(sku: &str, applicator: &str) -> ProductRecord {
        let mut record = ProductRecord::new(sku, "Glass Bottle");
        record.set("applicator", applicator);
        record
    }

    fn normalize(catalog: &Catalog) -> (Catalog, ApplicatorReport) {
        normalize_applicators(catalog, &aliases(), "Glass Bottle")
    }

    #[test]
    fn aliases_replace_clear_and_ignore() {
        let catalog = Catalog::from_records(vec![
            with_applicator("A", Some("Roller Ball")),
            with_applicator("B", Some(" Metal Roll-On ")),
            with_applicator("C", Some("Cap/Closure")),
            with_applicator("D", Some("Dropper")),
            with_applicator("E", None),
        ]);

        let (normalized, report) = normalize(&catalog);

        let labels: Vec<Option<&str>> = normalized
            .iter()
            .map(ProductRecord::applicator)
            .collect();
        assert_eq!(
            labels,
            vec![
                Some("Plastic Roller"),
                Some("Metal Roller"),
                None,
                Some("Dropper"),
                None,
            ]
        );
        assert_eq!(report.changed, 2);
        assert_eq!(report.cleared, 1);
        assert_eq!(report.touched(), 3);
    }

    #[test]
    fn histograms_count_before_and_after() {
        let catalog = Catalog::from_records(vec![
            with_applicator("A", Some("Roller Ball")),
            with_applicator("B", Some("Cap/Closure")),
            with_applicator("C", None),
        ]);

        let (_, report) = normalize(&catalog);

        assert_eq!(report.before.get("Roller Ball"), Some(&1));
        assert_eq!(report.before.get(NO_APPLICATOR), Some(&1));
        assert_eq!(report.after.get("Plastic Roller"), Some(&1));
        assert_eq!(report.after.get(NO_APPLICATOR), Some(&2));
        assert_eq!(report.records, 3);
    }

    #[test]
    fn second_pass_changes_nothing() {
        let catalog = Catalog::from_records(vec![
            with_applicator("A", Some("Roller Ball")),
            with_applicator("B", Some("Cap/Closure")),
        ]);

        let (once, _) = normalize(&catalog);
        let (twice, report) = normalize(&once);

        assert_eq!(once, twice);
        assert_eq!(report.touched(), 0);
    }

    #[test]
    fn cleared_applicator_stays_as_explicit_null() {
        let catalog = Catalog::from_records(vec![with_applicator("C", Some("Cap/Closure"))]);
        let (normalized, _) = normalize(&catalog);
        assert_eq!(
            normalized.records()[0].get("applicator"),
            Some(&serde_json::Value::Null)
        );
    }

    #[test]
    fn rollers_split_into_bundles_and_standalone() {
        let catalog = Catalog::from_records(vec![
            bottle_with_applicator("GB1", "Roller Ball"),
            with_applicator("RB1", Some("Roller Ball")),
            with_applicator("RB2", Some("Plastic Roller")),
            bottle_with_applicator("GB2", "Metal Roll-On"),
        ]);

        let (_, report) = normalize(&catalog);

        assert_eq!(
            report.plastic_rollers,
            RollerCounts {
                bundles: 1,
                standalone: 2
            }
        );
        assert_eq!(
            report.metal_rollers,
            RollerCounts {
                bundles: 1,
                standalone: 0
            }
        );
        assert!(report.missing_standalone_metal_roller());
    }

    #[test]
    fn standalone_metal_roller_clears_the_flag() {
        let catalog = Catalog::from_records(vec![with_applicator("MR1", Some("Metal Roll-On"))]);
        let (_, report) = normalize(&catalog);
        assert_eq!(report.metal_rollers.standalone, 1);
        assert!(!report.missing_standalone_metal_roller());
    }
}
