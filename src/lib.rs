//! Renamex: batch renaming of numbered files with rollback
//!
//! Renames files that follow a `prefix + number` pattern in bulk, resolves
//! name collisions with a chosen strategy, and records every step so the
//! whole pass can be undone later.

pub mod backup;
pub mod config;
pub mod conflict;
pub mod context;
pub mod error;
pub mod executor;
pub mod logging;
pub mod naming;
pub mod permissions;
pub mod prompt;
pub mod record;
pub mod rollback;
pub mod state;
pub mod tooling;
pub mod types;

pub use error::ApiError;
pub use executor::{PassReport, RenameExecutor};
pub use rollback::{RollbackEngine, RollbackOutcome};
