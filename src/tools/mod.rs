//! MCP Tools module
//!
//! Contains all tool implementations for the MacroMate MCP server.

pub mod insights;
pub mod meals;
pub mod profile;
pub mod status;
pub mod workouts;

#[cfg(test)]
pub(crate) mod test_support;
