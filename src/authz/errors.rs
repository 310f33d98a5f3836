use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building or loading a permission schema.
///
/// Permission checks themselves never fail: `Ability::can` degrades every
/// unknown or unsatisfied request to `false`.
#[derive(Debug, Error, Diagnostic)]
pub enum MatirError {
    #[error("Failed to load schema file `{path}`")]
    #[diagnostic(
        code(matir::schema_load),
        help("Check that the file exists and is readable")
    )]
    SchemaLoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schema: {0}")]
    #[diagnostic(
        code(matir::invalid_schema),
        help("Each subject may declare `roles`, `actions`, `conditions`, `name`, `reasons` and a nested `sub` schema")
    )]
    InvalidSchema(String),

    #[error("Invalid subject key `{0}`")]
    #[diagnostic(
        code(matir::invalid_subject_key),
        help("Subject keys must be non-empty and must not contain `.`, which separates nested subjects")
    )]
    InvalidSubjectKey(String),

    #[error("Duplicate subject `{0}`")]
    #[diagnostic(
        code(matir::duplicate_subject),
        help("Every flattened subject path must be unique; rename one of the colliding subjects")
    )]
    DuplicateSubject(String),

    #[error("KDL parse error: {0}")]
    #[diagnostic(
        code(matir::kdl_parse),
        help("Check your KDL file syntax (https://kdl.dev)")
    )]
    KdlParse(String),

    #[error("JSON error: {0}")]
    #[diagnostic(code(matir::json))]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    #[diagnostic(code(matir::config))]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    #[diagnostic(code(matir::io))]
    Io(#[from] std::io::Error),
}
