mod helpers;

use std::env;
use std::path::PathBuf;

use matir::settings::SchemaSettings;
use matir::{Ability, Condition, Current, MatirError, Settings};
use tempfile::TempDir;

use helpers::{write_schema, CONFIG_KDL};

fn settings_for(path: PathBuf, validate: bool) -> Settings {
    Settings {
        schema: SchemaSettings {
            path: Some(path),
            validate,
        },
    }
}

#[test]
fn test_settings_env_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_schema(
        temp_dir.path(),
        "matir.toml",
        "[schema]\npath = \"/srv/file.kdl\"\nvalidate = true\n",
    );

    env::set_var("MATIR__SCHEMA__PATH", "/srv/env.kdl");
    env::set_var("MATIR__SCHEMA__VALIDATE", "false");

    let settings = Settings::load(config_path.to_str().unwrap()).expect("Failed to load settings");

    env::remove_var("MATIR__SCHEMA__PATH");
    env::remove_var("MATIR__SCHEMA__VALIDATE");

    assert_eq!(settings.schema.path, Some(PathBuf::from("/srv/env.kdl")));
    assert!(!settings.schema.validate);
}

#[test]
fn test_ability_from_kdl_settings() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_schema(temp_dir.path(), "schema.kdl", CONFIG_KDL);

    let ability = Ability::from_settings(&settings_for(path, true)).unwrap();
    assert_eq!(ability.cache().len(), 5);

    let mut current = Current::new();
    current
        .role("admin")
        .permissions([("order", ["read"]), ("report", ["read"])]);

    assert!(ability.can(&current, "order", Some("read"), None, None));
    assert!(ability.can(&current, "config.user.security", None, None, None));

    let ti = Condition::attributes([("departament", "ti")]);
    assert!(ability.can(&current, "report", Some("read"), Some(&ti), None));
    assert!(!ability.can(&current, "report", Some("read"), None, None));
}

#[test]
fn test_ability_from_json_settings() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_schema(
        temp_dir.path(),
        "schema.json",
        r#"{ "order": { "roles": ["admin"], "sub": { "export": { "actions": ["run"] } } } }"#,
    );

    let ability = Ability::from_settings(&settings_for(path, true)).unwrap();
    assert_eq!(ability.cache().paths(), vec!["order", "order.export"]);
}

#[test]
fn test_validation_toggle() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_schema(
        temp_dir.path(),
        "schema.json",
        r#"{ "order.export": { "roles": ["admin"] } }"#,
    );

    let err = Ability::from_settings(&settings_for(path.clone(), true)).unwrap_err();
    assert!(matches!(err, MatirError::InvalidSubjectKey(_)));

    let ability = Ability::from_settings(&settings_for(path, false)).unwrap();
    assert!(ability.cache().get("order.export").is_some());
}

#[test]
fn test_missing_schema_path() {
    let err = Ability::from_settings(&Settings::default()).unwrap_err();
    assert!(matches!(err, MatirError::InvalidSchema(_)));
}
