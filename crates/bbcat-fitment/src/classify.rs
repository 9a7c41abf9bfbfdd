//! Component classification.
//!
//! A component record gets at most one [`ComponentCategory`], decided by
//! [`CLASSIFIER_RULES`]: an ordered table of predicates over the record's
//! applicator, family, category, name, and thread. The first predicate
//! that matches decides. Predicates overlap (a `Sprayer` applicator on a
//! `Cap/Closure` record is a cap), so the table order is the classification.

use std::collections::BTreeMap;

use bbcat_core::{Catalog, ComponentCategory, FitmentConfig, ProductRecord, RollOnCapException};

/// The attributes classification reads, normalized once per record:
/// missing strings are empty, the name is lowercased, the thread trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentFacts<'a> {
    pub sku: &'a str,
    pub applicator: &'a str,
    pub family: &'a str,
    pub category: &'a str,
    pub name: String,
    pub thread: &'a str,
}

impl<'a> ComponentFacts<'a> {
    #[must_use]
    pub fn from_record(record: &'a ProductRecord) -> Self {
        Self {
            sku: record.website_sku(),
            applicator: record.applicator().unwrap_or_default(),
            family: record.family().unwrap_or_default(),
            category: record.category(),
            name: record.item_name().unwrap_or_default().to_lowercase(),
            thread: record.thread().unwrap_or_default(),
        }
    }

    fn no_applicator(&self) -> bool {
        self.applicator.is_empty()
    }
}

/// One row of the classification table.
#[derive(Clone, Copy)]
pub struct ClassifierRule {
    pub category: ComponentCategory,
    pub matches: fn(&ComponentFacts<'_>) -> bool,
}

/// Classification precedence, highest first.
pub static CLASSIFIER_RULES: [ClassifierRule; 9] = [
    ClassifierRule {
        category: ComponentCategory::RollOnCap,
        matches: is_roll_on_cap,
    },
    ClassifierRule {
        category: ComponentCategory::PlasticRoller,
        matches: is_plastic_roller,
    },
    ClassifierRule {
        category: ComponentCategory::MetalRoller,
        matches: is_metal_roller,
    },
    ClassifierRule {
        category: ComponentCategory::ShortCap,
        matches: is_short_cap,
    },
    ClassifierRule {
        category: ComponentCategory::Reducer,
        matches: is_reducer,
    },
    ClassifierRule {
        category: ComponentCategory::Sprayer,
        matches: is_sprayer,
    },
    ClassifierRule {
        category: ComponentCategory::AntiqueBulbSprayer,
        matches: is_antique_bulb_sprayer,
    },
    ClassifierRule {
        category: ComponentCategory::Dropper,
        matches: is_dropper,
    },
    ClassifierRule {
        category: ComponentCategory::LotionPump,
        matches: is_lotion_pump,
    },
];

fn is_roll_on_cap(f: &ComponentFacts<'_>) -> bool {
    f.category == "Roll-On Cap" || (f.applicator == "Roller Ball" && f.family == "Roll-On Cap")
}

fn is_plastic_roller(f: &ComponentFacts<'_>) -> bool {
    f.applicator == "Plastic Roller" || (f.applicator == "Roller Ball" && f.name.contains("plastic"))
}

fn is_metal_roller(f: &ComponentFacts<'_>) -> bool {
    f.applicator == "Metal Roller" || (f.applicator == "Roller Ball" && f.name.contains("metal"))
}

fn is_short_cap(f: &ComponentFacts<'_>) -> bool {
    f.applicator == "Cap/Closure"
        || f.category == "Cap/Closure"
        || (f.no_applicator()
            && matches!(f.family, "Cap" | "Cap/Closure")
            && matches!(f.category, "Component" | "Cap/Closure"))
}

fn is_reducer(f: &ComponentFacts<'_>) -> bool {
    f.applicator == "Reducer" || f.family == "Reducer"
}

fn is_sprayer(f: &ComponentFacts<'_>) -> bool {
    f.applicator == "Sprayer"
        && matches!(f.family, "Sprayer" | "Component")
        && f.category != "Lotion Bottle"
}

fn is_antique_bulb_sprayer(f: &ComponentFacts<'_>) -> bool {
    (f.no_applicator() && f.family == "Sprayer" && f.category == "Component")
        || (f.applicator == "Sprayer" && f.category == "Cap/Closure" && f.name.contains("tassel"))
}

fn is_dropper(f: &ComponentFacts<'_>) -> bool {
    f.applicator == "Dropper" || f.family == "Dropper"
}

fn is_lotion_pump(f: &ComponentFacts<'_>) -> bool {
    f.category == "Component"
        && (matches!(f.applicator, "Lotion Pump" | "Pump")
            || (f.no_applicator() && f.family == "Lotion Pump"))
}

/// How one record fared against the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Classified(ComponentCategory),
    /// Matched the roll-on-cap predicate at the exception thread without a
    /// verified SKU. Not offered to any later predicate.
    UnverifiedRollOnCap,
    Unclassified,
}

impl Classification {
    #[must_use]
    pub fn category(self) -> Option<ComponentCategory> {
        match self {
            Classification::Classified(category) => Some(category),
            Classification::UnverifiedRollOnCap | Classification::Unclassified => None,
        }
    }
}

/// Runs `record` through the classification table.
#[must_use]
pub fn classify(record: &ProductRecord, exception: &RollOnCapException) -> Classification {
    let facts = ComponentFacts::from_record(record);
    let Some(rule) = CLASSIFIER_RULES.iter().find(|rule| (rule.matches)(&facts)) else {
        return Classification::Unclassified;
    };

    if rule.category == ComponentCategory::RollOnCap && !exception.admits(facts.sku, facts.thread) {
        return Classification::UnverifiedRollOnCap;
    }
    Classification::Classified(rule.category)
}

/// The component category of `record`, if any.
#[must_use]
pub fn classify_component(
    record: &ProductRecord,
    exception: &RollOnCapException,
) -> Option<ComponentCategory> {
    classify(record, exception).category()
}

/// Whether `record` belongs to the component inventory at all: not a
/// bottle-type category, and carrying a thread size to join on.
#[must_use]
pub fn is_component_record(record: &ProductRecord, config: &FitmentConfig) -> bool {
    record.category() != config.bottle_category
        && !config.is_bottle_category(record.category())
        && record.thread().is_some()
}

/// Per-category counts over the component inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationCensus {
    /// Records that passed [`is_component_record`].
    pub components: usize,
    pub by_category: BTreeMap<ComponentCategory, usize>,
    pub unclassified: usize,
    /// SKUs turned away by the roll-on-cap exception, in catalog order.
    pub unverified_roll_on_caps: Vec<String>,
}

/// Classifies every component record of `catalog`.
#[must_use]
pub fn classify_inventory(catalog: &Catalog, config: &FitmentConfig) -> ClassificationCensus {
    let mut census = ClassificationCensus::default();

    for record in catalog
        .iter()
        .filter(|r| is_component_record(r, config))
    {
        census.components += 1;
        match classify(record, &config.roll_on_cap_exception) {
            Classification::Classified(category) => {
                *census.by_category.entry(category).or_default() += 1;
            }
            Classification::UnverifiedRollOnCap => {
                census.unclassified += 1;
                census
                    .unverified_roll_on_caps
                    .push(record.website_sku().to_string());
            }
            Classification::Unclassified => census.unclassified += 1,
        }
    }

    tracing::info!(
        components = census.components,
        categories = census.by_category.len(),
        unclassified = census.unclassified,
        unverified_roll_on_caps = census.unverified_roll_on_caps.len(),
        "component inventory classified"
    );
    census
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod tests;
