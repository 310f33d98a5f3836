use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of the actor being authorized: the roles it holds and the actions
/// granted to it per subject path.
///
/// Owned by the caller (typically one per request) and passed by reference to
/// `Ability::can`. Reusing a value across actors requires `clear` in between.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Current {
    roles: Vec<String>,
    permissions: HashMap<String, Vec<String>>,
}

/// Owned copy of an actor's state, as returned by `Current::get`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSnapshot {
    pub roles: Vec<String>,
    pub permissions: HashMap<String, Vec<String>>,
}

impl Current {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one role. Duplicates are kept.
    pub fn role(&mut self, role: impl Into<String>) -> &mut Self {
        self.roles.push(role.into());
        self
    }

    /// Append several roles, preserving order.
    pub fn roles<I, S>(&mut self, roles: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Replace the whole per-subject grant map. Previous grants are dropped,
    /// not merged.
    pub fn permissions<I, K, A, S>(&mut self, permissions: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, A)>,
        K: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions
            .into_iter()
            .map(|(subject, actions)| {
                (
                    subject.into(),
                    actions.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        self
    }

    /// Reset to no roles and no grants.
    pub fn clear(&mut self) {
        self.roles.clear();
        self.permissions.clear();
    }

    pub fn get(&self) -> CurrentSnapshot {
        CurrentSnapshot {
            roles: self.roles.clone(),
            permissions: self.permissions.clone(),
        }
    }

    pub fn current_roles(&self) -> &[String] {
        &self.roles
    }

    /// Actions granted on exactly `subject`, if any entry exists.
    pub fn granted_actions(&self, subject: &str) -> Option<&[String]> {
        self.permissions.get(subject).map(Vec::as_slice)
    }

    pub fn has_any_role(&self, required: &[String]) -> bool {
        self.roles.iter().any(|role| required.contains(role))
    }
}
