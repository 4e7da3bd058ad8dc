//! MacroMate Status Tool
//!
//! Runtime status of the service, plus usage notes for assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::AiConfig;

/// How assistants should drive the MacroMate tools
pub const USAGE_INSTRUCTIONS: &str = r#"
# MacroMate Usage

## First run
1. Call `get_profile`. If `onboarding_completed` is false, ask for height (cm),
   weight (kg), goal (lose, maintain, gain, recomp) and activity level
   (sedentary, light, moderate, active, very_active).
2. Call `complete_onboarding` with the answers. Daily targets are computed
   automatically and returned.

## Logging food
- `log_meal` takes a free-text description ("2 eggs and toast") and a meal
  type (breakfast, lunch, dinner, snack). Nutrition is estimated by the AI
  gateway and stored as returned; the `servings` field is informational.
- Use `parse_nutrition` to preview an estimate without saving it.
- `delete_meal` removes a logged entry by id.
- `get_day` shows meals, totals and progress against targets for a date
  (YYYY-MM-DD, default today).

## Reviewing progress
- `weekly_insights` summarises the 7 days ending on a date: averages,
  logging streak, macro calorie split and calorie trend.

## Workouts
- `generate_workout` asks the AI gateway for a plan and stores it.
- `list_workouts`, `complete_workout` and `delete_workout` manage history.

## Profile edits
- `update_profile` with new body stats or goal recomputes targets unless
  explicit targets are passed. `calculate_targets` previews without saving.
"#;

/// Service status information
#[derive(Debug, Clone, Serialize)]
pub struct MacroMateStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub ai_configured: bool,
    pub ai_model: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Tracks service runtime state
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
    ai_configured: bool,
    ai_model: String,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf, ai: &AiConfig) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
            ai_configured: ai.api_key.is_some(),
            ai_model: ai.model.clone(),
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> MacroMateStatus {
        let build_info = BuildInfo::current();

        // Missing for in-memory databases
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        MacroMateStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            ai_configured: self.ai_configured,
            ai_model: self.ai_model.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_ai_configuration() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/macromate.db"), &AiConfig::default());
        let status = tracker.get_status();
        assert!(!status.ai_configured);
        assert_eq!(status.ai_model, AiConfig::default().model);
        assert!(status.database_size_bytes.is_none());
        assert_eq!(status.process_id, std::process::id());
    }

    #[test]
    fn test_instructions_name_every_tool() {
        for tool in [
            "get_profile",
            "complete_onboarding",
            "update_profile",
            "calculate_targets",
            "parse_nutrition",
            "log_meal",
            "get_day",
            "weekly_insights",
            "generate_workout",
            "list_workouts",
            "complete_workout",
            "delete_workout",
        ] {
            assert!(USAGE_INSTRUCTIONS.contains(tool), "missing {}", tool);
        }

        for goal in ["lose", "maintain", "gain", "recomp"] {
            assert!(USAGE_INSTRUCTIONS.contains(goal), "missing goal {}", goal);
        }
    }
}
