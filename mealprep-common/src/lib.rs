//! # MealPrep Common Library
//!
//! Shared code for the mealprep binaries:
//! - Error types
//! - Root folder and configuration resolution
//! - Database schema initialization

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
