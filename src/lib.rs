// Library root: re-exports all modules so integration tests and the report
// pipeline binary can access the crate's public API.

pub mod analytics;
pub mod config;
pub mod history;
pub mod report;
pub mod roster;
