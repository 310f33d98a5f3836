use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::authz::errors::MatirError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub schema: SchemaSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaSettings {
    /// Path to the permission schema (`.kdl` or `.json`)
    pub path: Option<PathBuf>,
    /// Reject structurally invalid schemas at load time
    #[serde(default = "default_validate")]
    pub validate: bool,
}

fn default_validate() -> bool {
    true
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            path: None,
            validate: default_validate(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self, MatirError> {
        let mut builder = config::Config::builder()
            .set_default("schema.validate", SchemaSettings::default().validate)?;

        // Optional file
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment overrides: MATIR__SCHEMA__PATH=policies/schema.kdl, etc.
        builder = builder.add_source(config::Environment::with_prefix("MATIR").separator("__"));

        let cfg = builder.build()?;
        let mut s: Settings = cfg.try_deserialize()?;

        // Normalize schema path to be relative to current dir
        if let Some(schema_path) = &s.schema.path {
            if schema_path.is_relative() {
                s.schema.path = Some(std::env::current_dir()?.join(schema_path));
            }
        }

        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_settings_load_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("nonexistent.toml");

        let settings = Settings::load(config_path.to_str().unwrap())
            .expect("Failed to load settings");

        assert!(settings.schema.path.is_none());
        assert!(settings.schema.validate);
    }

    #[test]
    fn test_settings_load_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("matir.toml");

        let config_content = r#"
[schema]
path = "/etc/matir/schema.kdl"
validate = false
"#;
        fs::write(&config_path, config_content).expect("Failed to write config");

        let settings = Settings::load(config_path.to_str().unwrap())
            .expect("Failed to load settings");

        assert_eq!(
            settings.schema.path,
            Some(PathBuf::from("/etc/matir/schema.kdl"))
        );
        assert!(!settings.schema.validate);
    }

    #[test]
    fn test_settings_relative_path_resolved() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("matir.toml");
        fs::write(&config_path, "[schema]\npath = \"policies/schema.kdl\"\n")
            .expect("Failed to write config");

        let settings = Settings::load(config_path.to_str().unwrap())
            .expect("Failed to load settings");

        let path = settings.schema.path.unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("policies/schema.kdl"));
    }
}
