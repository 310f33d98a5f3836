pub mod fixtures;

pub use fixtures::{config_schema, order_schema, write_schema, CONFIG_KDL};
