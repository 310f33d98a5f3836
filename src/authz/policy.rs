use std::collections::BTreeMap;

use kdl::{KdlDocument, KdlNode, KdlValue};

use crate::authz::errors::MatirError;
use crate::authz::types::*;

/// Parse a KDL document into a nested permission schema.
///
/// ```kdl
/// subject "order" {
///     roles {
///         - "admin"
///     }
///     actions {
///         - "read"
///         - "delete"
///     }
///     conditions {
///         departament "ti"
///     }
///     sub {
///         subject "export" {
///             roles {
///                 - "admin"
///             }
///         }
///     }
/// }
/// ```
pub fn parse_kdl_schema(source: &str) -> Result<PermissionSchema, MatirError> {
    let doc: KdlDocument = source
        .parse()
        .map_err(|e: kdl::KdlError| MatirError::KdlParse(e.to_string()))?;

    parse_subjects(&doc, "")
}

fn parse_subjects(doc: &KdlDocument, prefix: &str) -> Result<PermissionSchema, MatirError> {
    let mut schema = PermissionSchema::new();

    for node in doc.nodes() {
        match node.name().value() {
            "subject" => {
                let key = first_string_arg(node).ok_or_else(|| {
                    MatirError::InvalidSchema(
                        "subject node requires a string argument (e.g. subject \"order\")".into(),
                    )
                })?;
                let path = join_path(prefix, &key);
                let def = parse_subject(node, &path)?;

                if schema.insert(key, def).is_some() {
                    return Err(MatirError::DuplicateSubject(path));
                }
            }
            other => {
                tracing::warn!("ignoring unknown KDL node `{other}`");
            }
        }
    }

    Ok(schema)
}

fn parse_subject(node: &KdlNode, path: &str) -> Result<SubjectDef, MatirError> {
    let mut def = SubjectDef::new();

    let Some(children) = node.children() else {
        return Ok(def);
    };

    for child in children.nodes() {
        match child.name().value() {
            "roles" => {
                def.permission.roles = dash_list(child);
            }
            "actions" => {
                def.permission.actions = dash_list(child);
            }
            "conditions" => {
                def.permission.conditions = Some(parse_conditions(child, path)?);
            }
            "name" => {
                def.permission.name = first_string_arg(child);
            }
            "reasons" => {
                def.permission.reasons = first_string_arg(child);
            }
            "sub" => {
                let nested = match child.children() {
                    Some(doc) => parse_subjects(doc, path)?,
                    None => PermissionSchema::new(),
                };
                def.sub = Some(nested);
            }
            other => {
                return Err(MatirError::InvalidSchema(format!(
                    "unexpected child `{other}` in subject `{path}` (expected `roles`, `actions`, `conditions`, `name`, `reasons` or `sub`)"
                )));
            }
        }
    }

    Ok(def)
}

/// Each child of a `conditions` block is `attribute <value>`.
fn parse_conditions(
    node: &KdlNode,
    path: &str,
) -> Result<BTreeMap<String, Primitive>, MatirError> {
    let mut conditions = BTreeMap::new();

    let Some(children) = node.children() else {
        return Ok(conditions);
    };

    for child in children.nodes() {
        let attribute = child.name().value();
        let value = child
            .entries()
            .iter()
            .find(|e| e.name().is_none())
            .and_then(|e| to_primitive(e.value()))
            .ok_or_else(|| {
                MatirError::InvalidSchema(format!(
                    "condition `{attribute}` in subject `{path}` needs a string, number or boolean value"
                ))
            })?;
        conditions.insert(attribute.to_string(), value);
    }

    Ok(conditions)
}

fn to_primitive(value: &KdlValue) -> Option<Primitive> {
    if let Some(s) = value.as_string() {
        Some(Primitive::String(s.to_string()))
    } else if let Some(b) = value.as_bool() {
        Some(Primitive::Bool(b))
    } else if let Some(i) = value.as_integer() {
        Some(Primitive::Number(i as f64))
    } else {
        value.as_float().map(Primitive::Number)
    }
}

/// Extract the first string argument from a KDL node.
fn first_string_arg(node: &KdlNode) -> Option<String> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}

/// Extract dash-list children: nodes named "-" whose first argument is a string.
fn dash_list(node: &KdlNode) -> Vec<String> {
    let Some(children) = node.children() else {
        return Vec::new();
    };
    children
        .nodes()
        .iter()
        .filter(|n| n.name().value() == "-")
        .filter_map(first_string_arg)
        .collect()
}
