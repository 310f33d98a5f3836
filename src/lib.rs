//! Matir - embeddable authorization engine
//!
//! A permission schema nests subjects (each with required roles, allowed
//! actions and optional attribute conditions) under `sub` keys. The schema is
//! flattened once into a dot-path lookup table, and [`Ability::can`] answers
//! whether an actor ([`Current`]) may act on a subject by checking roles, then
//! actions, then conditions.
//!
//! ```
//! use matir::{create_schema, schema, Condition, SubjectDef};
//!
//! let (ability, mut current) = create_schema(&schema([(
//!     "order",
//!     SubjectDef::new()
//!         .roles(["admin"])
//!         .actions(["read", "delete"])
//!         .condition("departament", "ti"),
//! )]));
//!
//! current.role("admin").permissions([("order", ["read"])]);
//!
//! let ti = Condition::attributes([("departament", "ti")]);
//! assert!(ability.can(&current, "order", Some("read"), Some(&ti), None));
//! assert!(ability.cannot(&current, "order", Some("delete"), Some(&ti), None));
//! ```

pub mod authz;
pub mod settings;

pub use authz::{
    create_schema, schema, Ability, Condition, Current, CurrentSnapshot, MatirError,
    PermissionNode, PermissionSchema, Primitive, SchemaCache, SubjectDef,
};
pub use settings::Settings;
