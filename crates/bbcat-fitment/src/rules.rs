//! Rule extraction from the fitment-rules workbook.
//!
//! Each data row becomes one [`FitmentRule`]: the bottle's identifiers plus
//! the component categories marked with an `X`. Column headers are folded
//! through the configured synonym table; headers that fold to nothing are
//! reported rather than guessed at.

use std::collections::HashMap;
use std::sync::LazyLock;

use bbcat_core::{ComponentCategory, FitmentConfig, HeaderTarget, RulesWorkbook, Sheet};
use regex::Regex;

/// A leading thread-size literal such as `18/415` or `13-415` marks a
/// section-header row, not a bottle.
static THREAD_LITERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\s*[/-]\s*\d{3}\b").expect("valid thread regex"));

/// The compatible component categories of one bottle variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitmentRule {
    pub bottle_name: String,
    pub bottle_code: String,
    pub sheet_name: String,
    /// Sorted by label, without repeats. Empty when the row marks nothing.
    pub compatible: Vec<ComponentCategory>,
}

impl FitmentRule {
    /// The identifier this rule is keyed by: the structural code, or the
    /// display name when the row has no code.
    #[must_use]
    pub fn key(&self) -> &str {
        if self.bottle_code.is_empty() {
            &self.bottle_name
        } else {
            &self.bottle_code
        }
    }
}

/// Rules keyed by [`FitmentRule::key`], in first-seen order.
///
/// A later row with the same key replaces the earlier rule's content but
/// keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<FitmentRule>,
    by_key: HashMap<String, usize>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `rule`, returning the rule it replaced if the key was
    /// already present.
    pub fn insert(&mut self, rule: FitmentRule) -> Option<FitmentRule> {
        if let Some(&idx) = self.by_key.get(rule.key()) {
            return Some(std::mem::replace(&mut self.rules[idx], rule));
        }
        self.by_key.insert(rule.key().to_string(), self.rules.len());
        self.rules.push(rule);
        None
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FitmentRule> {
        self.by_key.get(key).map(|&idx| &self.rules[idx])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FitmentRule> {
        self.rules.iter()
    }
}

impl FromIterator<FitmentRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = FitmentRule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a FitmentRule;
    type IntoIter = std::slice::Iter<'a, FitmentRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// A non-blank header cell (past the name and code columns) that no
/// synonym covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmappedHeader {
    pub sheet_name: String,
    pub column: usize,
    pub text: String,
}

/// Everything one extraction pass produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleExtraction {
    pub rules: RuleSet,
    pub unmapped_headers: Vec<UnmappedHeader>,
    /// Data rows dropped as boilerplate or for lacking an identifier.
    pub skipped_rows: usize,
    /// Rows whose key repeated an earlier row's key.
    pub replaced_rules: usize,
}

/// Extracts one rule per bottle row across every sheet of `workbook`.
///
/// Sheets are processed in order. Rows that repeat the header, start with a
/// boilerplate token, or carry neither a name nor a code are skipped. A row
/// that marks no column still yields a rule with an empty category set.
#[must_use]
pub fn extract_rules(workbook: &RulesWorkbook, config: &FitmentConfig) -> RuleExtraction {
    let mut extraction = RuleExtraction::default();

    for sheet in &workbook.sheets {
        let Some(header) = sheet.header() else {
            tracing::debug!(sheet = %sheet.name, "sheet has no header row; skipped");
            continue;
        };

        let columns = map_columns(sheet, header, config, &mut extraction.unmapped_headers);

        for row in sheet.data_rows() {
            if row.as_slice() == header {
                extraction.skipped_rows += 1;
                continue;
            }
            let Some(rule) = rule_from_row(sheet, row, &columns, config) else {
                extraction.skipped_rows += 1;
                continue;
            };
            if let Some(previous) = extraction.rules.insert(rule) {
                extraction.replaced_rules += 1;
                tracing::debug!(
                    key = previous.key(),
                    sheet = %sheet.name,
                    previous_sheet = %previous.sheet_name,
                    "rule key repeated; later row wins"
                );
            }
        }
    }

    for unmapped in &extraction.unmapped_headers {
        tracing::warn!(
            sheet = %unmapped.sheet_name,
            column = unmapped.column,
            header = %unmapped.text,
            "rules header maps to no component category"
        );
    }
    tracing::info!(
        rules = extraction.rules.len(),
        skipped_rows = extraction.skipped_rows,
        replaced = extraction.replaced_rules,
        "fitment rules extracted"
    );

    extraction
}

/// Column index to header target for every header cell the synonym table
/// covers. Columns 0 and 1 hold the bottle name and code.
fn map_columns(
    sheet: &Sheet,
    header: &[String],
    config: &FitmentConfig,
    unmapped: &mut Vec<UnmappedHeader>,
) -> Vec<(usize, HeaderTarget)> {
    let mut columns = Vec::new();
    for (column, text) in header.iter().enumerate() {
        match config.header_target(text) {
            Some(target) => columns.push((column, target)),
            None if column >= 2 && !text.trim().is_empty() => unmapped.push(UnmappedHeader {
                sheet_name: sheet.name.clone(),
                column,
                text: text.trim().to_string(),
            }),
            None => {}
        }
    }
    columns
}

fn rule_from_row(
    sheet: &Sheet,
    row: &[String],
    columns: &[(usize, HeaderTarget)],
    config: &FitmentConfig,
) -> Option<FitmentRule> {
    let bottle_name = row.first().map_or("", |s| s.trim());
    let bottle_code = row.get(1).map_or("", |s| s.trim());

    if bottle_name.is_empty() && bottle_code.is_empty() {
        return None;
    }
    if is_boilerplate(bottle_name, config) {
        tracing::debug!(sheet = %sheet.name, row = bottle_name, "boilerplate rule row skipped");
        return None;
    }

    let mut compatible: Vec<ComponentCategory> = columns
        .iter()
        .filter(|(column, _)| row.get(*column).is_some_and(|cell| is_marked(cell)))
        .flat_map(|(_, target)| target.categories().iter().copied())
        .collect();
    compatible.sort_by_key(|c| c.label());
    compatible.dedup();

    Some(FitmentRule {
        bottle_name: bottle_name.to_string(),
        bottle_code: bottle_code.to_string(),
        sheet_name: sheet.name.clone(),
        compatible,
    })
}

fn is_boilerplate(bottle_name: &str, config: &FitmentConfig) -> bool {
    let lowered = bottle_name.to_lowercase();
    THREAD_LITERAL_RE.is_match(&lowered)
        || config
            .rule_row_skip_prefixes
            .iter()
            .any(|prefix| lowered.starts_with(prefix.as_str()))
}

fn is_marked(cell: &str) -> bool {
    cell.trim().eq_ignore_ascii_case("x")
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
