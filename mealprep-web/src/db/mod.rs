//! Parameterized queries behind the HTTP routes
//!
//! Route handlers stay thin; every SQL template lives here, one module per
//! table family.

pub mod analytics;
pub mod favorites;
pub mod filter_options;
pub mod meal_plan;
pub mod recipes;
