//! HTTP route handlers

pub mod dashboard;
pub mod favorites;
pub mod filters;
pub mod health;
pub mod meal_planner;
pub mod search;
pub mod ui;
