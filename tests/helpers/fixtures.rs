#![allow(dead_code)]

use std::path::{Path, PathBuf};

use matir::{schema, PermissionSchema, SubjectDef};

/// Same shape as `order_schema` plus the nested `config` tree, in KDL.
pub const CONFIG_KDL: &str = r#"
subject "order" {
    roles {
        - "admin"
    }
    actions {
        - "read"
        - "delete"
    }
}

subject "report" {
    actions {
        - "read"
    }
    conditions {
        departament "ti"
    }
}

subject "config" {
    roles {
        - "super_admin"
        - "admin"
    }
    sub {
        subject "user" {
            actions {
                - "read"
                - "update"
                - "delete"
            }
            roles {
                - "admin"
            }
            sub {
                subject "security" {
                    roles {
                        - "admin"
                    }
                }
            }
        }
    }
}
"#;

/// `order` requires the admin role and restricts actions to read/delete;
/// `report` declares a `departament` condition; `public` is unrestricted.
pub fn order_schema() -> PermissionSchema {
    schema([
        (
            "order",
            SubjectDef::new().roles(["admin"]).actions(["read", "delete"]),
        ),
        (
            "report",
            SubjectDef::new()
                .actions(["read"])
                .condition("departament", "ti"),
        ),
        ("public", SubjectDef::new()),
    ])
}

/// `config -> user -> security`, each level carrying its own rules.
pub fn config_schema() -> PermissionSchema {
    schema([(
        "config",
        SubjectDef::new().roles(["super_admin", "admin"]).sub([(
            "user",
            SubjectDef::new()
                .actions(["read", "update", "delete"])
                .roles(["admin"])
                .sub([("security", SubjectDef::new().roles(["admin"]))]),
        )]),
    )])
}

/// Write `contents` to `dir/name` and return the full path.
pub fn write_schema(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write schema file");
    path
}
