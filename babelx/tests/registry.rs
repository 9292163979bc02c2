//! Plugin registry tests

use std::io::Write;

use pretty_assertions::assert_eq;
use serde_json::json;

use babelx::registry::{OrderRule, PresetEntry, Registry, ValueType};
use babelx::{exit, Error};

#[test]
fn builtin_plugins() {
    let registry = Registry::builtin();

    assert!(registry.is_plugin("transform-es2015-arrow-functions"));
    assert!(registry.is_plugin("external-helpers"));
    assert!(!registry.is_plugin("es2015"));

    let names = registry.plugin_names();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn canonical_plugin_names() {
    let registry = Registry::builtin();

    assert_eq!(
        registry.canonical_plugin("es2015-classes"),
        Some("transform-es2015-classes")
    );
    assert_eq!(
        registry.canonical_plugin("transform-es2015-classes"),
        Some("transform-es2015-classes")
    );
    assert_eq!(registry.canonical_plugin("syntax-jsx"), Some("syntax-jsx"));
    assert_eq!(registry.canonical_plugin("jsx"), None);
}

#[test]
fn es2015_preset() {
    let registry = Registry::builtin();
    let es2015 = registry.preset("es2015").expect("missing es2015 preset");

    assert_eq!(
        es2015.first().map(PresetEntry::name),
        Some("transform-es2015-template-literals")
    );
    assert!(es2015
        .iter()
        .any(|entry| entry.name() == "transform-es2015-arrow-functions"));

    let regenerator = es2015
        .iter()
        .find(|entry| entry.name() == "transform-regenerator")
        .expect("missing regenerator");

    assert_eq!(
        regenerator.config(),
        json!({ "async": false, "asyncGenerators": false }).as_object()
    );
}

#[test]
fn preset_names() {
    let registry = Registry::builtin();
    let names = registry.preset_names();

    for preset in &["es2015", "es2015-rollup", "latest", "react", "stage-0", "babili"] {
        assert!(names.contains(preset), "missing preset {}", preset);
    }

    assert!(registry
        .preset("es2015-rollup")
        .expect("missing es2015-rollup")
        .iter()
        .any(|entry| entry.name() == "external-helpers"));
}

#[test]
fn option_schemas() {
    let registry = Registry::builtin();

    let classes = registry
        .plugin_options("transform-es2015-classes")
        .expect("missing option schema");
    assert_eq!(classes.get("loose"), Some(&ValueType::Boolean));

    let lodash = registry.plugin_options("lodash").expect("missing option schema");
    assert_eq!(lodash.get("id"), Some(&ValueType::StringArray));

    assert_eq!(registry.plugin_options("external-helpers"), None);
}

#[test]
fn decorators_before_class_properties() {
    assert_eq!(
        Registry::builtin().order_rules(),
        &[OrderRule {
            plugin: "transform-class-properties".to_owned(),
            after: "transform-decorators".to_owned(),
        }]
    );
}

const CUSTOM: &str = r#"{
    "plugins": ["a", "transform-b"],
    "presets": {
        "p": ["a", ["transform-b", { "loose": true }]]
    },
    "options": {
        "transform-b": { "loose": "boolean", "names": "string[]", "rest": "splat" }
    },
    "order": [{ "plugin": "a", "after": "transform-b" }]
}"#;

#[test]
fn load_json() {
    let registry = Registry::from_reader(CUSTOM.as_bytes()).expect("failed to load registry");

    assert_eq!(registry.plugin_names(), vec!["a", "transform-b"]);
    assert_eq!(registry.canonical_plugin("b"), Some("transform-b"));
    assert_eq!(
        registry.preset("p"),
        Some(
            &[
                PresetEntry::Plugin("a".to_owned()),
                PresetEntry::Configured(
                    "transform-b".to_owned(),
                    json!({ "loose": true })
                        .as_object()
                        .cloned()
                        .expect("object")
                ),
            ][..]
        )
    );

    let options = registry.plugin_options("transform-b").expect("missing schema");
    assert_eq!(
        options.iter().map(|(k, t)| (k.as_str(), *t)).collect::<Vec<_>>(),
        vec![
            ("loose", ValueType::Boolean),
            ("names", ValueType::StringArray),
            ("rest", ValueType::Object),
        ]
    );

    assert_eq!(registry.order_rules().len(), 1);
}

#[test]
fn missing_sections_default_to_empty() {
    let registry = Registry::from_reader(r#"{ "plugins": ["a"] }"#.as_bytes())
        .expect("failed to load registry");

    assert_eq!(registry.plugin_names(), vec!["a"]);
    assert!(registry.preset_names().is_empty());
    assert!(registry.order_rules().is_empty());
}

#[test]
fn load_file() {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create registry file");
    file.write_all(CUSTOM.as_bytes()).expect("failed to write registry");

    let registry = Registry::from_path(file.path()).expect("failed to load registry");
    assert!(registry.is_plugin("transform-b"));
}

#[test]
fn invalid_file() {
    let mut file = tempfile::NamedTempFile::new().expect("failed to create registry file");
    file.write_all(br#"{ "plugins": 12 }"#)
        .expect("failed to write registry");

    let error = Registry::from_path(file.path()).expect_err("registry should not load");
    assert!(matches!(error, Error::Registry { .. }), "{:?}", error);
    assert_eq!(error.exit_code(), exit::CONFIG);
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().expect("failed to create directory");

    let error = Registry::from_path(&dir.path().join("registry.json"))
        .expect_err("registry should not load");
    assert_eq!(error.exit_code(), exit::NOINPUT);
}

#[test]
fn builder() {
    let mut registry = Registry::new();
    registry
        .add_plugin("transform-x")
        .add_preset("xs", vec![PresetEntry::Plugin("transform-x".to_owned())])
        .add_plugin_options("transform-x", vec![("level", ValueType::Number)])
        .add_order_rule("transform-x", "transform-y");

    assert_eq!(registry.preset_names(), vec!["xs"]);
    assert_eq!(
        registry.presets().map(|(name, _)| name).collect::<Vec<_>>(),
        vec!["xs"]
    );
    assert_eq!(
        registry
            .plugin_options("transform-x")
            .and_then(|o| o.get("level")),
        Some(&ValueType::Number)
    );
}
