use std::collections::HashMap;

use crate::authz::types::{join_path, PermissionNode, PermissionSchema};

/// Flattened, dot-path addressable view of a nested permission schema.
///
/// `config: { sub: { user: { ... } } }` is stored under both `config` and
/// `config.user`, each holding only its own node. The input schema is not
/// retained.
#[derive(Debug, Clone, Default)]
pub struct SchemaCache {
    /// flattened path -> node without its `sub` schema
    entries: HashMap<String, PermissionNode>,
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cache populated from `schema` in one traversal.
    pub fn create(schema: &PermissionSchema) -> Self {
        let mut cache = Self::new();
        cache.populate(schema, "");
        tracing::debug!(subjects = cache.len(), "Populated schema cache");
        cache
    }

    /// Insert every subject of `schema` under `prefix`, recursing into nested
    /// `sub` schemas with the subject's own path as the new prefix.
    pub fn populate(&mut self, schema: &PermissionSchema, prefix: &str) {
        for (key, def) in schema {
            let cache_key = join_path(prefix, key);

            self.entries
                .insert(cache_key.clone(), def.permission.clone());

            if let Some(sub) = &def.sub {
                self.populate(sub, &cache_key);
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<&PermissionNode> {
        self.entries.get(path)
    }

    /// Drop every entry. Lookups miss until the cache is populated again.
    pub fn clear(&mut self) {
        self.entries.clear();
        tracing::debug!("Cleared schema cache");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All flattened paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }
}
