//! Integration tests for renamex: full passes against real folders, driven
//! through the library with scripted answers.

mod cli_contract;
mod conflicts;
mod interactive_all;
mod range_rename;
mod rollback_flow;
mod support;
