//! mealprep-import: CSV to database migration pipeline
//!
//! Exposes the ordered import steps and the runner so tests can drive the
//! pipeline directly; `main.rs` only adds CLI argument handling on top.

pub mod csv_import;
