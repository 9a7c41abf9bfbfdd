//! Fitment matrix construction.
//!
//! For every bottle the builder decides which component categories fit it
//! (a longest-prefix rule code match on the SKU, else the thread-size
//! default), then resolves each category to the classified components that
//! share the bottle's exact thread size. The result is written back as the
//! bottle's `components` / `fitmentStatus` / `catalogGaps`, replacing
//! whatever a previous build left there.

use std::collections::{BTreeMap, HashMap};

use bbcat_core::{
    Catalog, ComponentCategory, ComponentMap, ComponentSummary, FitmentConfig, FitmentFields,
    FitmentStatus, ProductRecord,
};

use crate::classify::{classify_component, is_component_record};
use crate::rules::RuleSet;

/// Classified components bucketed by (thread, category), each bucket in
/// catalog order.
#[derive(Debug, Clone, Default)]
pub struct ComponentIndex {
    buckets: HashMap<String, BTreeMap<ComponentCategory, Vec<ComponentSummary>>>,
}

impl ComponentIndex {
    /// Classifies every component record of `catalog` and buckets it by
    /// its own thread size.
    #[must_use]
    pub fn build(catalog: &Catalog, config: &FitmentConfig) -> Self {
        let mut buckets: HashMap<String, BTreeMap<ComponentCategory, Vec<ComponentSummary>>> =
            HashMap::new();

        for record in catalog.iter().filter(|r| is_component_record(r, config)) {
            let (Some(thread), Some(category)) = (
                record.thread(),
                classify_component(record, &config.roll_on_cap_exception),
            ) else {
                continue;
            };
            buckets
                .entry(thread.to_string())
                .or_default()
                .entry(category)
                .or_default()
                .push(record.summary());
        }

        Self { buckets }
    }

    /// Components of `category` at exactly `thread`.
    #[must_use]
    pub fn components(&self, thread: &str, category: ComponentCategory) -> &[ComponentSummary] {
        self.buckets
            .get(thread)
            .and_then(|by_category| by_category.get(&category))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total indexed components per category, across all threads.
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<ComponentCategory, usize> {
        let mut counts = BTreeMap::new();
        for by_category in self.buckets.values() {
            for (category, components) in by_category {
                *counts.entry(*category).or_default() += components.len();
            }
        }
        counts
    }
}

/// Rule codes eligible for prefix matching, longest first.
///
/// Only rules with a non-empty key and a non-empty category set take part.
/// Codes of equal length are ordered lexicographically so the scan order,
/// and therefore the winner, never depends on workbook order.
#[derive(Debug, Clone, Default)]
pub struct CodeRules<'a> {
    codes: Vec<(&'a str, &'a [ComponentCategory])>,
}

impl<'a> CodeRules<'a> {
    #[must_use]
    pub fn from_rules(rules: &'a RuleSet) -> Self {
        let mut codes: Vec<(&str, &[ComponentCategory])> = rules
            .iter()
            .filter(|rule| !rule.key().is_empty() && !rule.compatible.is_empty())
            .map(|rule| (rule.key(), rule.compatible.as_slice()))
            .collect();
        codes.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { codes }
    }

    /// The longest code that prefixes `sku`, with its categories.
    #[must_use]
    pub fn longest_prefix(&self, sku: &str) -> Option<(&'a str, &'a [ComponentCategory])> {
        self.codes
            .iter()
            .find(|(code, _)| sku.starts_with(code))
            .copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Where a bottle's compatible categories came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatSource<'a> {
    RuleCode(&'a str),
    ThreadDefault,
}

/// The computed fitment of one bottle, before it is written to the record.
#[derive(Debug, Clone, PartialEq)]
pub struct BottleFitment<'a> {
    pub status: FitmentStatus,
    pub source: Option<CompatSource<'a>>,
    /// The full compatible set, in rule order.
    pub compatible: &'a [ComponentCategory],
    pub components: ComponentMap,
    pub gaps: Vec<ComponentCategory>,
}

impl BottleFitment<'_> {
    /// The record fields this result overwrites. `components` is null when
    /// nothing resolved.
    #[must_use]
    pub fn to_fields(&self) -> FitmentFields {
        FitmentFields {
            components: if self.components.is_empty() {
                None
            } else {
                Some(self.components.clone())
            },
            fitment_status: self.status,
            catalog_gaps: self.gaps.clone(),
        }
    }

    fn unresolved(status: FitmentStatus) -> Self {
        Self {
            status,
            source: None,
            compatible: &[],
            components: ComponentMap::new(),
            gaps: Vec::new(),
        }
    }
}

/// The three lookup tables a build joins, prepared once per run.
pub struct MatrixBuilder<'a> {
    index: ComponentIndex,
    codes: CodeRules<'a>,
    config: &'a FitmentConfig,
}

impl<'a> MatrixBuilder<'a> {
    #[must_use]
    pub fn new(catalog: &Catalog, rules: &'a RuleSet, config: &'a FitmentConfig) -> Self {
        let index = ComponentIndex::build(catalog, config);
        let codes = CodeRules::from_rules(rules);
        tracing::debug!(
            code_rules = codes.len(),
            thread_defaults = config.thread_defaults.len(),
            "matrix lookup tables prepared"
        );
        Self {
            index,
            codes,
            config,
        }
    }

    #[must_use]
    pub fn index(&self) -> &ComponentIndex {
        &self.index
    }

    /// The compatible categories for a bottle SKU at `thread`: the longest
    /// prefixing rule code, else the thread's default set.
    #[must_use]
    pub fn compatible_categories(
        &self,
        sku: &str,
        thread: &str,
    ) -> Option<(CompatSource<'a>, &'a [ComponentCategory])> {
        if let Some((code, categories)) = self.codes.longest_prefix(sku) {
            return Some((CompatSource::RuleCode(code), categories));
        }
        self.config
            .thread_default(thread)
            .map(|categories| (CompatSource::ThreadDefault, categories))
    }

    /// Computes the fitment of one bottle.
    #[must_use]
    pub fn fitment_for(&self, bottle: &ProductRecord) -> BottleFitment<'a> {
        let Some(thread) = bottle.thread() else {
            return BottleFitment::unresolved(FitmentStatus::MissingThread);
        };
        let Some((source, compatible)) = self.compatible_categories(bottle.website_sku(), thread)
        else {
            return BottleFitment::unresolved(FitmentStatus::UnknownThread);
        };

        let mut components = ComponentMap::new();
        let mut gaps = Vec::new();
        for &category in compatible {
            let found = self.index.components(thread, category);
            if found.is_empty() {
                gaps.push(category);
            } else {
                components.insert(category, found.to_vec());
            }
        }

        let status = if components.is_empty() {
            FitmentStatus::MappedNoComponents
        } else if gaps.is_empty() {
            FitmentStatus::Mapped
        } else {
            FitmentStatus::MappedPartial
        };

        BottleFitment {
            status,
            source: Some(source),
            compatible,
            components,
            gaps,
        }
    }
}

/// Counts over one matrix build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatrixSummary {
    pub bottles: usize,
    pub by_status: BTreeMap<FitmentStatus, usize>,
    /// Bottles missing each category.
    pub gaps_by_category: BTreeMap<ComponentCategory, usize>,
    /// Indexed component records per category.
    pub components_by_category: BTreeMap<ComponentCategory, usize>,
    pub via_rule_code: usize,
    pub via_thread_default: usize,
}

impl MatrixSummary {
    #[must_use]
    pub fn count(&self, status: FitmentStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or_default()
    }

    fn record(&mut self, fitment: &BottleFitment<'_>) {
        self.bottles += 1;
        *self.by_status.entry(fitment.status).or_default() += 1;
        for category in &fitment.gaps {
            *self.gaps_by_category.entry(*category).or_default() += 1;
        }
        match fitment.source {
            Some(CompatSource::RuleCode(_)) => self.via_rule_code += 1,
            Some(CompatSource::ThreadDefault) => self.via_thread_default += 1,
            None => {}
        }
    }
}

/// Rebuilds fitment for every bottle of `catalog`, returning the new
/// catalog and a summary. Records outside `config.bottle_category` are
/// copied unchanged, including any fitment keys they carry.
#[must_use]
pub fn build_matrix(
    catalog: &Catalog,
    rules: &RuleSet,
    config: &FitmentConfig,
) -> (Catalog, MatrixSummary) {
    let builder = MatrixBuilder::new(catalog, rules, config);
    let mut summary = MatrixSummary {
        components_by_category: builder.index().category_counts(),
        ..MatrixSummary::default()
    };

    let records: Vec<ProductRecord> = catalog
        .iter()
        .map(|record| {
            if record.category() != config.bottle_category {
                return record.clone();
            }
            let fitment = builder.fitment_for(record);
            tracing::debug!(
                sku = record.website_sku(),
                status = %fitment.status,
                gaps = fitment.gaps.len(),
                "bottle fitment resolved"
            );
            summary.record(&fitment);

            let mut updated = record.clone();
            updated.set_fitment(&fitment.to_fields());
            updated
        })
        .collect();

    tracing::info!(
        bottles = summary.bottles,
        mapped = summary.count(FitmentStatus::Mapped),
        partial = summary.count(FitmentStatus::MappedPartial),
        no_components = summary.count(FitmentStatus::MappedNoComponents),
        unknown_thread = summary.count(FitmentStatus::UnknownThread),
        missing_thread = summary.count(FitmentStatus::MissingThread),
        "fitment matrix built"
    );

    (Catalog::from_records(records), summary)
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod tests;
