pub mod cache;
pub mod condition;
pub mod current;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod policy;
pub mod types;

pub use cache::SchemaCache;
pub use condition::Condition;
pub use current::{Current, CurrentSnapshot};
pub use engine::{create_schema, Ability};
pub use errors::MatirError;
pub use types::{schema, PermissionNode, PermissionSchema, Primitive, SubjectDef};
