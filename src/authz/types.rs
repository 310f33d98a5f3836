use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::authz::errors::MatirError;

/// Separator between nested subject keys in a flattened path.
pub const PATH_SEPARATOR: char = '.';

/// A nested permission schema: subject key -> subject definition.
pub type PermissionSchema = BTreeMap<String, SubjectDef>;

/// Attribute values a schema condition may hold.
///
/// Comparison is strict: `Number(1.0)` never equals `String("1")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    Bool(bool),
    Number(f64),
    String(String),
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Primitive::Bool(b) => write!(f, "{b}"),
            Primitive::Number(n) => write!(f, "{n}"),
            Primitive::String(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Bool(value)
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Primitive::Number(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Primitive::Number(f64::from(value))
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::String(value)
    }
}

/// One subject's own rule set, without its nested subjects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionNode {
    /// Human-readable label, carried through flattening but never evaluated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form explanation of why the subject is guarded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasons: Option<String>,
    /// Roles of which the actor must hold at least one; empty = unrestricted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    /// Actions the actor must be granted; empty = any action
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    /// Attribute constraints; once declared, a condition argument is mandatory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<BTreeMap<String, Primitive>>,
}

impl PermissionNode {
    pub fn requires_roles(&self) -> bool {
        !self.roles.is_empty()
    }

    pub fn restricts_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    pub fn has_conditions(&self) -> bool {
        self.conditions.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// A schema entry: the subject's permission node plus an optional nested schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectDef {
    #[serde(flatten)]
    pub permission: PermissionNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<PermissionSchema>,
}

impl SubjectDef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.permission.name = Some(name.into());
        self
    }

    pub fn reasons(mut self, reasons: impl Into<String>) -> Self {
        self.permission.reasons = Some(reasons.into());
        self
    }

    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permission.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permission.actions = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn condition(mut self, attribute: impl Into<String>, value: impl Into<Primitive>) -> Self {
        self.permission
            .conditions
            .get_or_insert_with(BTreeMap::new)
            .insert(attribute.into(), value.into());
        self
    }

    pub fn sub<I, K>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = (K, SubjectDef)>,
        K: Into<String>,
    {
        self.sub = Some(
            subjects
                .into_iter()
                .map(|(key, def)| (key.into(), def))
                .collect(),
        );
        self
    }
}

/// Build a schema from `(key, definition)` pairs.
pub fn schema<I, K>(subjects: I) -> PermissionSchema
where
    I: IntoIterator<Item = (K, SubjectDef)>,
    K: Into<String>,
{
    subjects
        .into_iter()
        .map(|(key, def)| (key.into(), def))
        .collect()
}

/// Join a parent path and a subject key into a flattened path.
pub fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{PATH_SEPARATOR}{key}")
    }
}

/// Reject structurally invalid schemas: empty keys, keys containing the path
/// separator and empty `conditions` maps.
///
/// Keys are unique per level, so once no key contains the separator no two
/// flattened paths can collide.
pub fn validate(schema: &PermissionSchema) -> Result<(), MatirError> {
    validate_level(schema, "")
}

fn validate_level(schema: &PermissionSchema, prefix: &str) -> Result<(), MatirError> {
    for (key, def) in schema {
        if key.is_empty() || key.contains(PATH_SEPARATOR) {
            return Err(MatirError::InvalidSubjectKey(join_path(prefix, key)));
        }

        let path = join_path(prefix, key);

        if def.permission.conditions.as_ref().is_some_and(|c| c.is_empty()) {
            return Err(MatirError::InvalidSchema(format!(
                "subject `{path}` declares an empty `conditions` map"
            )));
        }

        if let Some(sub) = &def.sub {
            validate_level(sub, &path)?;
        }
    }
    Ok(())
}
