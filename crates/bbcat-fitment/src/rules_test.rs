use bbcat_core::{ComponentCategory, FitmentConfig, RulesWorkbook, Sheet};

use super::*;

fn config() -> FitmentConfig {
    FitmentConfig::builtin().unwrap()
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| (*c).to_string()).collect()
}

fn sheet(name: &str, header: &[&str], data: &[&[&str]]) -> Sheet {
    let mut rows = vec![row(&[name]), row(header)];
    rows.extend(data.iter().map(|cells| row(cells)));
    Sheet {
        name: name.to_string(),
        rows,
    }
}

fn workbook(sheets: Vec<Sheet>) -> RulesWorkbook {
    RulesWorkbook { sheets }
}

// -----------------------------------------------------------------------
// extract_rules: category collection
// -----------------------------------------------------------------------

#[test]
fn marked_columns_become_sorted_categories() {
    let wb = workbook(vec![sheet(
        "Cylinder",
        &["Bottle", "Code", "Sprayers", "Droppers", "Reducers"],
        &[&["Cylinder 9ml", "GBCyl9", "X", "x", " X "]],
    )]);
    let extraction = extract_rules(&wb, &config());
    let rule = extraction.rules.get("GBCyl9").unwrap();
    assert_eq!(
        rule.compatible,
        vec![
            ComponentCategory::Dropper,
            ComponentCategory::Reducer,
            ComponentCategory::Sprayer,
        ]
    );
    assert_eq!(rule.sheet_name, "Cylinder");
}

#[test]
fn header_synonyms_fold_case_and_whitespace() {
    let wb = workbook(vec![sheet(
        "Boston",
        &["Bottle", "Code", "  SHORT CAPS WITH LINER ", "Caps With Liners"],
        &[&["Round 15ml", "GBRnd15", "X", "X"]],
    )]);
    let extraction = extract_rules(&wb, &config());
    assert_eq!(
        extraction.rules.get("GBRnd15").unwrap().compatible,
        vec![ComponentCategory::ShortCap]
    );
    assert!(extraction.unmapped_headers.is_empty());
}

#[test]
fn roller_system_header_expands_to_three_categories() {
    let wb = workbook(vec![sheet(
        "Roll-On",
        &["Bottle", "Code", "Roller Plug Metal"],
        &[&["Cylinder 9ml Roll-On", "GBCylRoll9", "X"]],
    )]);
    let extraction = extract_rules(&wb, &config());
    let rule = extraction.rules.get("GBCylRoll9").unwrap();
    assert_eq!(
        rule.compatible,
        vec![
            ComponentCategory::MetalRoller,
            ComponentCategory::PlasticRoller,
            ComponentCategory::RollOnCap,
        ]
    );
}

#[test]
fn roller_system_overlap_is_deduplicated() {
    let wb = workbook(vec![sheet(
        "Roll-On",
        &["Bottle", "Code", "Roller Plug Plastic", "Roll-On Cap Options"],
        &[&["Cylinder 9ml Roll-On", "GBCylRoll9", "X", "X"]],
    )]);
    let extraction = extract_rules(&wb, &config());
    assert_eq!(extraction.rules.get("GBCylRoll9").unwrap().compatible.len(), 3);
}

#[test]
fn row_without_marks_yields_empty_rule() {
    let wb = workbook(vec![sheet(
        "Cylinder",
        &["Bottle", "Code", "Sprayers"],
        &[&["Cylinder 100ml", "GBCyl100", ""]],
    )]);
    let extraction = extract_rules(&wb, &config());
    let rule = extraction.rules.get("GBCyl100").unwrap();
    assert!(rule.compatible.is_empty());
}

#[test]
fn short_rows_are_treated_as_unmarked() {
    let wb = workbook(vec![sheet(
        "Cylinder",
        &["Bottle", "Code", "Sprayers", "Droppers"],
        &[&["Cylinder 5ml", "GBCyl5", "X"]],
    )]);
    let extraction = extract_rules(&wb, &config());
    assert_eq!(
        extraction.rules.get("GBCyl5").unwrap().compatible,
        vec![ComponentCategory::Sprayer]
    );
}

// -----------------------------------------------------------------------
// extract_rules: keys and row filtering
// -----------------------------------------------------------------------

#[test]
fn rule_without_code_is_keyed_by_name() {
    let wb = workbook(vec![sheet(
        "Diva",
        &["Bottle", "Code", "Sprayers"],
        &[&["Diva 46ml", "", "X"]],
    )]);
    let extraction = extract_rules(&wb, &config());
    let rule = extraction.rules.get("Diva 46ml").unwrap();
    assert_eq!(rule.key(), "Diva 46ml");
    assert!(rule.bottle_code.is_empty());
}

#[test]
fn boilerplate_rows_are_skipped() {
    let wb = workbook(vec![sheet(
        "Mixed",
        &["Bottle", "Code", "Sprayers"],
        &[
            &["Bottle Name", "Code", ""],
            &["18/415 Thread", "", ""],
            &["13-415 Section", "", ""],
            &["Boston Round Family", "", ""],
            &["SPECIAL ORDER", "", ""],
            &["", "", "X"],
            &[],
            &["Tulip 6ml", "GBTul6", "X"],
        ],
    )]);
    let extraction = extract_rules(&wb, &config());
    assert_eq!(extraction.rules.len(), 1);
    assert!(extraction.rules.get("GBTul6").is_some());
    assert_eq!(extraction.skipped_rows, 7);
}

#[test]
fn repeated_header_row_is_skipped() {
    let wb = workbook(vec![sheet(
        "Cylinder",
        &["Name", "Code", "Sprayers"],
        &[
            &["Name", "Code", "Sprayers"],
            &["Cylinder 9ml", "GBCyl9", "X"],
        ],
    )]);
    let extraction = extract_rules(&wb, &config());
    assert_eq!(extraction.rules.len(), 1);
    assert_eq!(extraction.skipped_rows, 1);
}

#[test]
fn name_with_only_code_is_kept() {
    let wb = workbook(vec![sheet(
        "Cylinder",
        &["Bottle", "Code", "Sprayers"],
        &[&["", "GBCyl30", "X"]],
    )]);
    let extraction = extract_rules(&wb, &config());
    assert!(extraction.rules.get("GBCyl30").is_some());
}

#[test]
fn later_duplicate_key_replaces_in_place() {
    let wb = workbook(vec![
        sheet(
            "First",
            &["Bottle", "Code", "Sprayers"],
            &[&["Cylinder 9ml", "GBCyl9", "X"], &["Tulip 6ml", "GBTul6", "X"]],
        ),
        sheet(
            "Second",
            &["Bottle", "Code", "Droppers"],
            &[&["Cylinder 9ml", "GBCyl9", "X"]],
        ),
    ]);
    let extraction = extract_rules(&wb, &config());
    let keys: Vec<&str> = extraction.rules.iter().map(FitmentRule::key).collect();
    assert_eq!(keys, vec!["GBCyl9", "GBTul6"]);

    let rule = extraction.rules.get("GBCyl9").unwrap();
    assert_eq!(rule.compatible, vec![ComponentCategory::Dropper]);
    assert_eq!(rule.sheet_name, "Second");
    assert_eq!(extraction.replaced_rules, 1);
}

// -----------------------------------------------------------------------
// extract_rules: sheets and headers
// -----------------------------------------------------------------------

#[test]
fn unmapped_headers_are_reported_once_per_sheet_column() {
    let wb = workbook(vec![sheet(
        "Cylinder",
        &["Bottle", "Code", "Sprayers", "Funnels", "", "Notes"],
        &[&["Cylinder 9ml", "GBCyl9", "X", "X", "", "X"]],
    )]);
    let extraction = extract_rules(&wb, &config());
    let texts: Vec<&str> = extraction
        .unmapped_headers
        .iter()
        .map(|h| h.text.as_str())
        .collect();
    assert_eq!(texts, vec!["Funnels", "Notes"]);
    assert_eq!(extraction.unmapped_headers[0].column, 3);
    assert_eq!(
        extraction.rules.get("GBCyl9").unwrap().compatible,
        vec![ComponentCategory::Sprayer]
    );
}

#[test]
fn sheet_without_header_contributes_nothing() {
    let wb = workbook(vec![Sheet {
        name: "Notes".to_string(),
        rows: vec![row(&["Notes"])],
    }]);
    let extraction = extract_rules(&wb, &config());
    assert!(extraction.rules.is_empty());
    assert_eq!(extraction.skipped_rows, 0);
}

// -----------------------------------------------------------------------
// RuleSet
// -----------------------------------------------------------------------

#[test]
fn rule_set_collects_from_iterator() {
    let set: RuleSet = vec![
        FitmentRule {
            bottle_name: "A".to_string(),
            bottle_code: "CODE".to_string(),
            sheet_name: "S".to_string(),
            compatible: vec![ComponentCategory::Dropper],
        },
        FitmentRule {
            bottle_name: "B".to_string(),
            bottle_code: "CODE".to_string(),
            sheet_name: "S".to_string(),
            compatible: vec![],
        },
    ]
    .into_iter()
    .collect();
    assert_eq!(set.len(), 1);
    assert_eq!(set.get("CODE").unwrap().bottle_name, "B");
}
