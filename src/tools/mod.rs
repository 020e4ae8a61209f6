//! DrinkNow Tools module
//!
//! MCP tool implementations for the hydration planner.

pub mod hydration;
pub mod pricing;
pub mod settings;
pub mod status;
