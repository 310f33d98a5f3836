use std::path::Path;

use crate::authz::errors::MatirError;
use crate::authz::policy::parse_kdl_schema;
use crate::authz::types::PermissionSchema;

/// Parse a JSON permission schema.
pub fn parse_json_schema(source: &str) -> Result<PermissionSchema, MatirError> {
    Ok(serde_json::from_str(source)?)
}

/// Load a permission schema from a `.kdl` or `.json` file.
///
/// The schema is returned as parsed; structural validation is left to
/// `Ability::try_new`.
pub fn load_schema(path: &Path) -> Result<PermissionSchema, MatirError> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| MatirError::SchemaLoadError {
            path: path.display().to_string(),
            source,
        })?;

    let schema = match path.extension().and_then(|ext| ext.to_str()) {
        Some("kdl") => parse_kdl_schema(&contents)?,
        Some("json") => parse_json_schema(&contents)?,
        _ => {
            return Err(MatirError::InvalidSchema(format!(
                "unsupported schema file `{}` (expected a `.kdl` or `.json` extension)",
                path.display()
            )))
        }
    };

    tracing::info!(
        file = %path.display(),
        subjects = count_subjects(&schema),
        "Loaded permission schema"
    );

    Ok(schema)
}

fn count_subjects(schema: &PermissionSchema) -> usize {
    schema
        .values()
        .map(|def| 1 + def.sub.as_ref().map_or(0, count_subjects))
        .sum()
}
