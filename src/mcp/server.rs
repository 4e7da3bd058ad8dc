//! MacroMate MCP Server Implementation
//!
//! Exposes the profile, meal, insight and workout tools over MCP.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::ai::CompletionClient;
use crate::config::AiConfig;
use crate::db::Database;
use crate::models::{MealType, OnboardingData, ProfileUpdate};
use crate::nutrition::{ActivityLevel, BodyProfile, DailyTargets, Goal};
use crate::tools::status::StatusTracker;
use crate::tools::{insights, meals, profile, workouts};
use crate::workouts::{FitnessLevel, WorkoutRequest};

/// MacroMate MCP Service
#[derive(Clone)]
pub struct MacroMateService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    ai: Arc<dyn CompletionClient>,
    tool_router: ToolRouter<MacroMateService>,
}

impl MacroMateService {
    pub fn new(
        database_path: PathBuf,
        database: Database,
        ai: Arc<dyn CompletionClient>,
        ai_config: &AiConfig,
    ) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(
                database_path,
                ai_config,
            ))),
            database,
            ai,
            tool_router: Self::tool_router(),
        }
    }
}

/// Pretty JSON text content, as every tool returns
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_goal(value: Option<&str>) -> Result<Option<Goal>, McpError> {
    value
        .map(|s| {
            Goal::parse(s).ok_or_else(|| {
                McpError::invalid_params(
                    format!(
                        "Unknown goal '{}', expected lose, maintain, gain or recomp",
                        s
                    ),
                    None,
                )
            })
        })
        .transpose()
}

fn parse_activity(value: Option<&str>) -> Result<Option<ActivityLevel>, McpError> {
    value
        .map(|s| {
            ActivityLevel::parse(s).ok_or_else(|| {
                McpError::invalid_params(
                    format!(
                        "Unknown activity level '{}', expected sedentary, light, moderate, \
                         active or very_active",
                        s
                    ),
                    None,
                )
            })
        })
        .transpose()
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct BodyStatsParams {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    /// lose, maintain, gain or recomp
    pub goal: Option<String>,
    /// sedentary, light, moderate, active or very_active
    pub activity_level: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompleteOnboardingParams {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<String>,
    pub activity_level: Option<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProfileParams {
    /// Empty string clears the name
    pub display_name: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<String>,
    pub activity_level: Option<String>,
    pub dietary_preferences: Option<Vec<String>>,
    /// Manual target overrides; unset values keep the stored target
    pub daily_calories: Option<i64>,
    pub daily_protein: Option<i64>,
    pub daily_carbs: Option<i64>,
    pub daily_fat: Option<i64>,
}

// ============================================================================
// Meal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseNutritionParams {
    /// Free-text food description, e.g. "2 eggs and toast"
    pub text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    pub text: String,
    /// breakfast, lunch, dinner or snack (default snack)
    pub meal_type: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DateParams {
    /// YYYY-MM-DD, default today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IdParams {
    pub id: i64,
}

// ============================================================================
// Workout Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GenerateWorkoutParams {
    #[serde(default = "default_workout_goal")]
    pub goal: String,
    #[serde(default = "default_workout_duration")]
    pub duration_minutes: u32,
    /// beginner, intermediate or advanced
    #[serde(default = "default_fitness_level")]
    pub fitness_level: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Omit for a full body session
    pub focus_area: Option<String>,
}

fn default_workout_goal() -> String {
    "build muscle".to_string()
}

fn default_workout_duration() -> u32 {
    30
}

fn default_fitness_level() -> String {
    "intermediate".to_string()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListWorkoutsParams {
    /// Default 10, max 50
    pub limit: Option<i64>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MacroMateService {
    // --- Status ---

    #[tool(description = "Get the current status of the MacroMate service including build info, database status, AI gateway configuration and process information")]
    async fn macromate_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for using the MacroMate tools. Call this when starting a session or when unsure how to log meals or workouts.")]
    fn macromate_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::USAGE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    // --- Profile ---

    #[tool(description = "Get the user's profile: body stats, goal, dietary preferences, daily targets and whether onboarding is complete")]
    fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let result =
            profile::get_profile(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Finish onboarding: store height, weight, goal, activity level and dietary preferences, and compute daily calorie and macro targets")]
    fn complete_onboarding(
        &self,
        Parameters(p): Parameters<CompleteOnboardingParams>,
    ) -> Result<CallToolResult, McpError> {
        let data = OnboardingData {
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            goal: parse_goal(p.goal.as_deref())?,
            activity_level: parse_activity(p.activity_level.as_deref())?,
            dietary_preferences: p.dietary_preferences,
        };
        let result = profile::complete_onboarding(&self.database, data)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Update the profile. Changing height, weight, goal or activity level recomputes daily targets unless manual targets are given.")]
    fn update_profile(
        &self,
        Parameters(p): Parameters<UpdateProfileParams>,
    ) -> Result<CallToolResult, McpError> {
        let has_override = p.daily_calories.is_some()
            || p.daily_protein.is_some()
            || p.daily_carbs.is_some()
            || p.daily_fat.is_some();

        let targets = if has_override {
            let current = profile::get_profile(&self.database)
                .map_err(|e| McpError::internal_error(e, None))?
                .targets;
            Some(DailyTargets {
                calories: p.daily_calories.unwrap_or(current.calories),
                protein: p.daily_protein.unwrap_or(current.protein),
                carbs: p.daily_carbs.unwrap_or(current.carbs),
                fat: p.daily_fat.unwrap_or(current.fat),
            })
        } else {
            None
        };

        let data = ProfileUpdate {
            display_name: p.display_name,
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            goal: parse_goal(p.goal.as_deref())?,
            activity_level: parse_activity(p.activity_level.as_deref())?,
            dietary_preferences: p.dietary_preferences,
            targets,
        };
        let result = profile::update_profile(&self.database, data)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Preview daily calorie and macro targets for the given body stats without saving anything. Missing values use defaults (170 cm, 70 kg, moderate, maintain).")]
    fn calculate_targets(
        &self,
        Parameters(p): Parameters<BodyStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        let body = BodyProfile {
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            goal: parse_goal(p.goal.as_deref())?,
            activity_level: parse_activity(p.activity_level.as_deref())?,
        };
        json_result(&profile::calculate_targets(&body))
    }

    // --- Meals ---

    #[tool(description = "Estimate nutrition for a free-text food description using the AI gateway, without logging it")]
    async fn parse_nutrition(
        &self,
        Parameters(p): Parameters<ParseNutritionParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = meals::parse_nutrition(self.ai.as_ref(), &p.text)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Log a meal from a free-text description. Nutrition is estimated by the AI gateway and stored for today.")]
    async fn log_meal(
        &self,
        Parameters(p): Parameters<LogMealParams>,
    ) -> Result<CallToolResult, McpError> {
        let meal_type = p
            .meal_type
            .as_deref()
            .map(MealType::parse)
            .unwrap_or_default();
        let result = meals::log_meal(
            &self.database,
            self.ai.as_ref(),
            &p.text,
            meal_type,
            Local::now(),
        )
        .await
        .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get meals, nutrition totals and progress against daily targets for a date (default today)")]
    fn get_day(&self, Parameters(p): Parameters<DateParams>) -> Result<CallToolResult, McpError> {
        let date = meals::parse_date(p.date.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        let result =
            meals::get_day(&self.database, date).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete a logged meal by id")]
    fn delete_meal(&self, Parameters(p): Parameters<IdParams>) -> Result<CallToolResult, McpError> {
        let result = meals::delete_meal(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Insights ---

    #[tool(description = "Weekly insights for the 7 days ending on a date (default today): daily totals, averages, logging streak, macro calorie split and calorie trend")]
    fn weekly_insights(
        &self,
        Parameters(p): Parameters<DateParams>,
    ) -> Result<CallToolResult, McpError> {
        let end_date = meals::parse_date(p.date.as_deref())
            .map_err(|e| McpError::invalid_params(e, None))?;
        let result = insights::weekly_insights(&self.database, end_date)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Workouts ---

    #[tool(description = "Generate a workout plan with the AI gateway and save it. Defaults: goal 'build muscle', 30 minutes, intermediate, bodyweight only, full body.")]
    async fn generate_workout(
        &self,
        Parameters(p): Parameters<GenerateWorkoutParams>,
    ) -> Result<CallToolResult, McpError> {
        let fitness_level = FitnessLevel::parse(&p.fitness_level).ok_or_else(|| {
            McpError::invalid_params(
                format!(
                    "Unknown fitness level '{}', expected beginner, intermediate or advanced",
                    p.fitness_level
                ),
                None,
            )
        })?;
        let request = WorkoutRequest {
            goal: p.goal,
            duration_minutes: p.duration_minutes,
            fitness_level,
            equipment: p.equipment,
            focus_area: p
                .focus_area
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        };
        let result = workouts::generate_workout(&self.database, self.ai.as_ref(), request)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "List saved workout plans, most recent first")]
    fn list_workouts(
        &self,
        Parameters(p): Parameters<ListWorkoutsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = workouts::list_workouts(&self.database, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Mark a saved workout plan as completed")]
    fn complete_workout(
        &self,
        Parameters(p): Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = workouts::complete_workout(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Delete a saved workout plan by id")]
    fn delete_workout(
        &self,
        Parameters(p): Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = workouts::delete_workout(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MacroMateService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "macromate".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("MacroMate".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "MacroMate - AI-assisted meal logging, macro targets and workout plans. \
                 Call macromate_instructions first. \
                 Profile: get_profile, complete_onboarding, update_profile, calculate_targets. \
                 Meals: parse_nutrition, log_meal, get_day, delete_meal. \
                 Insights: weekly_insights. \
                 Workouts: generate_workout, list_workouts, complete_workout, delete_workout. \
                 Dates are YYYY-MM-DD and default to today."
                    .into(),
            ),
        }
    }
}
