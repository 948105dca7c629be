//! CLI command handlers.

mod migrate;

pub use migrate::{run_migrate, MigrateArgs};
