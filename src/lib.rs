//! MacroMate Library
//!
//! Daily macro targets, AI-assisted meal logging and workout plans,
//! served over MCP.

pub mod ai;
pub mod analytics;
pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
pub mod workouts;
