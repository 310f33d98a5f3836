//! Condition arguments for permission checks.
//!
//! A condition is either a predicate over the runtime JSON context or a static
//! attribute map compared against the subject's schema `conditions`:
//!
//! - `Predicate`: the predicate's result decides the stage, whatever the schema
//!   declares. A missing context is passed as `Value::Null`.
//! - `Attributes`: every supplied pair must equal the schema entry with the
//!   same key (same type, same value). An empty map checks nothing.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::authz::types::{PermissionNode, Primitive};

/// Boxed predicate over the runtime context.
pub type Predicate<'a> = Box<dyn Fn(&Value) -> bool + Send + Sync + 'a>;

pub enum Condition<'a> {
    Predicate(Predicate<'a>),
    Attributes(BTreeMap<String, Primitive>),
}

impl<'a> Condition<'a> {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'a,
    {
        Condition::Predicate(Box::new(f))
    }

    pub fn attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Primitive>,
    {
        Condition::Attributes(
            attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Evaluate this condition for `node`, given the optional runtime context.
    pub fn evaluate(&self, node: &PermissionNode, context: Option<&Value>) -> bool {
        match self {
            Condition::Predicate(f) => f(context.unwrap_or(&Value::Null)),
            Condition::Attributes(attributes) => attributes_match(attributes, node),
        }
    }
}

impl std::fmt::Debug for Condition<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Predicate(_) => f.write_str("Predicate(..)"),
            Condition::Attributes(attributes) => {
                f.debug_tuple("Attributes").field(attributes).finish()
            }
        }
    }
}

fn attributes_match(attributes: &BTreeMap<String, Primitive>, node: &PermissionNode) -> bool {
    if attributes.is_empty() {
        return true;
    }

    let Some(declared) = &node.conditions else {
        return false;
    };

    attributes
        .iter()
        .all(|(key, value)| declared.get(key) == Some(value))
}
