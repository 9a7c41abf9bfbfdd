use super::*;

/// Smallest document that passes validation.
const MINIMAL: &str = r#"
header_synonyms:
  Droppers: Dropper
roll_on_cap_exception:
  thread: "17-415"
  verified_skus: [CpRoll17-415Cu]
thread_defaults:
  "18-415": [Dropper, Sprayer]
"#;

#[test]
fn minimal_config_applies_defaults() {
    let config = parse_fitment_config(MINIMAL).unwrap();
    assert_eq!(config.bottle_category, "Glass Bottle");
    assert!(config.bottle_categories.is_empty());
    assert!(config.rule_row_skip_prefixes.is_empty());
    assert!(config.applicator_aliases.is_empty());
}

#[test]
fn header_synonyms_are_folded_on_load() {
    let config = parse_fitment_config(MINIMAL).unwrap();
    assert!(config.header_synonyms.contains_key("droppers"));
    assert_eq!(
        config.header_target("  DROPPERS "),
        Some(HeaderTarget::Category(ComponentCategory::Dropper))
    );
    assert_eq!(config.header_target("Sprayers"), None);
}

#[test]
fn rejects_synonyms_that_collide_after_folding() {
    let doc = r#"
header_synonyms:
  Droppers: Dropper
  droppers: Dropper
roll_on_cap_exception:
  thread: "17-415"
thread_defaults:
  "18-415": [Dropper]
"#;
    let err = parse_fitment_config(doc).unwrap_err();
    assert!(err.to_string().contains("duplicate header synonym"));
}

#[test]
fn rejects_empty_thread_default_list() {
    let doc = r#"
header_synonyms: {}
roll_on_cap_exception:
  thread: "17-415"
thread_defaults:
  "18-415": []
"#;
    let err = parse_fitment_config(doc).unwrap_err();
    assert!(err.to_string().contains("has no categories"));
}

#[test]
fn rejects_repeated_category_in_thread_default() {
    let doc = r#"
header_synonyms: {}
roll_on_cap_exception:
  thread: "17-415"
thread_defaults:
  "18-415": [Dropper, Dropper]
"#;
    let err = parse_fitment_config(doc).unwrap_err();
    assert!(err.to_string().contains("lists a category twice"));
}

#[test]
fn rejects_blank_exception_thread() {
    let doc = r#"
header_synonyms: {}
roll_on_cap_exception:
  thread: "  "
thread_defaults:
  "18-415": [Dropper]
"#;
    let err = parse_fitment_config(doc).unwrap_err();
    assert!(err.to_string().contains("roll_on_cap_exception.thread"));
}

#[test]
fn rejects_unknown_category_label() {
    let doc = r#"
header_synonyms: {}
roll_on_cap_exception:
  thread: "17-415"
thread_defaults:
  "18-415": [Funnel]
"#;
    let err = parse_fitment_config(doc).unwrap_err();
    assert!(matches!(err, ConfigError::FitmentConfigParse(_)), "got: {err:?}");
}

#[test]
fn roller_system_is_a_valid_header_target_but_not_a_thread_default() {
    let doc = r#"
header_synonyms:
  roller plug metal: Roller System
roll_on_cap_exception:
  thread: "17-415"
thread_defaults:
  "17-415": [Roller System]
"#;
    let err = parse_fitment_config(doc).unwrap_err();
    assert!(matches!(err, ConfigError::FitmentConfigParse(_)));
}

#[test]
fn exception_admits_any_sku_off_the_exception_thread() {
    let exception = RollOnCapException {
        thread: "17-415".to_string(),
        verified_skus: ["CpRoll17-415Cu".to_string()].into_iter().collect(),
    };
    assert!(exception.admits("CpRoll17-415Cu", "17-415"));
    assert!(!exception.admits("CpRoll17-415Fake", "17-415"));
    assert!(exception.admits("CpRoll13-415Fake", "13-415"));
}

#[test]
fn thread_default_lookup_trims_input() {
    let config = parse_fitment_config(MINIMAL).unwrap();
    assert_eq!(
        config.thread_default(" 18-415 "),
        Some(&[ComponentCategory::Dropper, ComponentCategory::Sprayer][..])
    );
    assert_eq!(config.thread_default("24-410"), None);
}

#[test]
fn builtin_config_is_valid() {
    let config = FitmentConfig::builtin().unwrap();
    assert_eq!(config.bottle_category, "Glass Bottle");
    assert!(config.is_bottle_category("Glass Jar"));
    assert!(!config.is_bottle_category("Component"));
    assert_eq!(config.roll_on_cap_exception.thread, "17-415");
    assert_eq!(config.roll_on_cap_exception.verified_skus.len(), 14);
    assert_eq!(
        config.header_target("Short Caps With Liner"),
        config.header_target("Caps With Liners")
    );
    assert_eq!(
        config.header_target("Roller Plug Plastic"),
        Some(HeaderTarget::RollerSystem)
    );
    assert_eq!(
        config.thread_default("17-415"),
        Some(
            &[
                ComponentCategory::PlasticRoller,
                ComponentCategory::MetalRoller,
                ComponentCategory::RollOnCap,
                ComponentCategory::Sprayer,
                ComponentCategory::LotionPump,
            ][..]
        )
    );
    assert_eq!(config.applicator_aliases.get("Cap/Closure"), Some(&None));
}

#[test]
fn load_fitment_config_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("fitment.yaml");
    let result = load_fitment_config(&path);
    assert!(result.is_ok(), "failed to load fitment.yaml: {result:?}");
    assert_eq!(result.unwrap(), FitmentConfig::builtin().unwrap());
}

#[test]
fn load_fitment_config_reports_missing_file() {
    let err = load_fitment_config(Path::new("/nonexistent/fitment.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::FitmentConfigIo { ref path, .. } if path.contains("nonexistent")));
}
