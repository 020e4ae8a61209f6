//! DrinkNow Library
//!
//! Hydration planning: unit conversion, daily drink amounts, sip sizes and
//! reminder intervals, with a settings store and pricing lookup around them.

pub mod build_info;
pub mod config;
pub mod db;
pub mod hydration;
pub mod mcp;
pub mod models;
pub mod pricing;
pub mod tools;
