use serde_json::Value;

use crate::authz::cache::SchemaCache;
use crate::authz::condition::Condition;
use crate::authz::current::Current;
use crate::authz::errors::MatirError;
use crate::authz::loader;
use crate::authz::types::{validate, PermissionSchema};
use crate::settings::Settings;

/// Permission evaluator over a flattened schema.
///
/// Immutable after construction and safe to share between threads; the actor
/// state is supplied per call.
#[derive(Debug, Clone, Default)]
pub struct Ability {
    schema: SchemaCache,
}

/// Build an evaluator for `schema` together with a fresh, empty actor state.
pub fn create_schema(schema: &PermissionSchema) -> (Ability, Current) {
    (Ability::new(schema), Current::new())
}

impl Ability {
    /// Flatten `schema` without structural validation.
    pub fn new(schema: &PermissionSchema) -> Self {
        Self::from_cache(SchemaCache::create(schema))
    }

    /// Validate `schema` and flatten it. Structural errors surface here so that
    /// `can` stays total.
    pub fn try_new(schema: &PermissionSchema) -> Result<Self, MatirError> {
        validate(schema)?;
        Ok(Self::new(schema))
    }

    pub fn from_cache(schema: SchemaCache) -> Self {
        Self { schema }
    }

    /// Load the schema file named by `settings`, validating it when enabled.
    pub fn from_settings(settings: &Settings) -> Result<Self, MatirError> {
        let path = settings.schema.path.as_deref().ok_or_else(|| {
            MatirError::InvalidSchema("no schema path configured (set `schema.path`)".into())
        })?;

        let schema = loader::load_schema(path)?;
        if settings.schema.validate {
            Self::try_new(&schema)
        } else {
            Ok(Self::new(&schema))
        }
    }

    pub fn cache(&self) -> &SchemaCache {
        &self.schema
    }

    /// Check whether `current` may perform `action` on `subject`.
    ///
    /// Stages run in order and the first failure denies:
    /// 1. the subject path must exist in the schema
    /// 2. if the subject requires roles, the actor holds at least one of them
    /// 3. if an action is given and the subject restricts actions, the actor is
    ///    granted that action on exactly this path
    /// 4. if the subject declares conditions a condition is required; a given
    ///    condition must hold (see [`Condition`])
    pub fn can(
        &self,
        current: &Current,
        subject: &str,
        action: Option<&str>,
        condition: Option<&Condition<'_>>,
        context: Option<&Value>,
    ) -> bool {
        // 1. Resolve the subject
        let Some(permission) = self.schema.get(subject) else {
            tracing::trace!(subject, "denied: unknown subject");
            return false;
        };

        // 2. Roles (any one of the required roles is enough)
        if permission.requires_roles() && !current.has_any_role(&permission.roles) {
            tracing::trace!(subject, "denied: missing required role");
            return false;
        }

        // 3. Actions, only when one is requested
        if let Some(action) = action {
            if permission.restricts_actions() {
                let granted = current
                    .granted_actions(subject)
                    .is_some_and(|actions| actions.iter().any(|a| a == action));
                if !granted {
                    tracing::trace!(subject, action, "denied: action not granted");
                    return false;
                }
            }
        }

        // 4. Conditions
        match condition {
            None if permission.has_conditions() => {
                tracing::trace!(subject, "denied: condition required");
                false
            }
            None => true,
            Some(condition) => {
                let satisfied = condition.evaluate(permission, context);
                if !satisfied {
                    tracing::trace!(subject, "denied: condition not satisfied");
                }
                satisfied
            }
        }
    }

    /// Exact negation of [`Ability::can`].
    pub fn cannot(
        &self,
        current: &Current,
        subject: &str,
        action: Option<&str>,
        condition: Option<&Condition<'_>>,
        context: Option<&Value>,
    ) -> bool {
        !self.can(current, subject, action, condition, context)
    }
}
