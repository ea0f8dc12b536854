//! Integration tests for the behaviors loader transform.
//!
//! These tests verify:
//! - behavior names are derived from file names
//! - export openings are rewritten to the global behaviors object
//! - HMR glue is appended only when enabled
//! - bad options fail before any output is produced

use behaviors_core::{hmr_bootstrap, module_name, transform, ConfigError, LoaderOptions};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

const MENU_SOURCE: &str = "export default {\n  attach() {}\n}";

#[test]
fn test_name_from_behavior_file_names() {
    for name in ["menu", "tabs", "mainNav", "search_form", "a1"] {
        for ext in ["js", "mjs", "ts"] {
            let file = format!("themes/custom/js/{name}.behavior.{ext}");
            assert_eq!(module_name(&file), name, "file: {file}");
        }
    }
}

#[test]
fn test_single_export_default_is_rewritten() {
    let out = transform(MENU_SOURCE, "menu.behavior.js", None).unwrap();
    assert_eq!(out, "window.Drupal.behaviors.menu = {\n  attach() {}\n}");
}

#[test]
fn test_single_module_exports_is_rewritten() {
    let source = "const helper = () => {}\n\nmodule.exports = {\n  attach(context) {\n    helper()\n  }\n}\n";
    let out = transform(source, "helper.behavior.js", None).unwrap();
    assert_eq!(
        out,
        "const helper = () => {}\n\nwindow.Drupal.behaviors.helper = {\n  attach(context) {\n    helper()\n  }\n}\n"
    );
}

#[test]
fn test_no_match_is_identity() {
    let source = "(function ($) {\n  $('.menu').toggle()\n})(jQuery)\n";
    let out = transform(source, "legacy.behavior.js", Some(&json!({}))).unwrap();
    assert_eq!(out, source);
}

#[test]
fn test_multiple_exports_collide_on_one_target() {
    let source = "export default {\n  attach() {}\n}\nexport default {\n  detach() {}\n}\n";
    let out = transform(source, "twice.behavior.js", None).unwrap();
    assert_eq!(out.matches("window.Drupal.behaviors.twice = {").count(), 2);
    assert!(!out.contains("export default"));
}

#[test]
fn test_hmr_off_has_no_footer() {
    let off = transform(MENU_SOURCE, "menu.behavior.js", Some(&json!({ "enableHmr": false })))
        .unwrap();
    let omitted = transform(MENU_SOURCE, "menu.behavior.js", Some(&json!({}))).unwrap();
    assert_eq!(off, omitted);
    assert!(!off.contains("module.hot"));
}

#[test]
fn test_hmr_on_appends_footer() {
    let out = transform(MENU_SOURCE, "js/menu.behavior.js", Some(&json!({ "enableHmr": true })))
        .unwrap();

    let rewritten = "window.Drupal.behaviors.menu = {\n  attach() {}\n}";
    assert!(out.starts_with(rewritten));
    assert_eq!(
        &out[rewritten.len()..],
        hmr_bootstrap("window.Drupal.behaviors.menu", "menu", "Drupal")
    );
    assert!(out.contains("typeof window.Drupal.behaviors.menu.attach === 'function'"));
    assert!(out.contains("typeof window.Drupal.behaviors.menu.detach === 'function'"));
    assert!(out.contains("console.log('Drupal Behaviors - attaching: menu')"));
    assert!(out.contains("console.log('Drupal Behaviors - detaching: menu')"));
}

#[test]
fn test_wrong_type_is_configuration_error() {
    let err = transform(MENU_SOURCE, "menu.behavior.js", Some(&json!({ "enableHmr": "yes" })))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidType { .. }));
    assert!(err.to_string().contains("enableHmr"));
}

#[test]
fn test_unknown_key_is_configuration_error() {
    let err = transform(MENU_SOURCE, "menu.behavior.js", Some(&json!({ "foo": true }))).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownProperty { .. }));
    assert!(err.to_string().contains("foo"));
}

#[test]
fn test_transform_file_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("accordion.behavior.js");
    fs::write(&path, "export default {\n  attach(context, settings) {}\n}\n").unwrap();

    let source = fs::read_to_string(&path).unwrap();
    let options = LoaderOptions::from_json_str(r#"{"enableHmr": true}"#).unwrap();
    let out = behaviors_core::BehaviorsLoader::new().transform_with(
        &source,
        &path.display().to_string(),
        &options,
    );

    assert!(out.starts_with("window.Drupal.behaviors.accordion = {\n"));
    assert!(out.ends_with("  }"));
}
