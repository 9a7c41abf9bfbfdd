//! The fitment engine: rule extraction, component classification, and the
//! matrix build that joins them. Everything here is a pure function over
//! already-loaded data; loading and saving live in `bbcat-store`.

pub mod applicators;
pub mod classify;
pub mod matrix;
pub mod rules;

pub use applicators::{normalize_applicators, ApplicatorReport, RollerCounts, NO_APPLICATOR};
pub use classify::{
    classify, classify_component, classify_inventory, is_component_record, Classification,
    ClassificationCensus, ClassifierRule, ComponentFacts, CLASSIFIER_RULES,
};
pub use matrix::{
    build_matrix, BottleFitment, CodeRules, CompatSource, ComponentIndex, MatrixBuilder,
    MatrixSummary,
};
pub use rules::{extract_rules, FitmentRule, RuleExtraction, RuleSet, UnmappedHeader};
