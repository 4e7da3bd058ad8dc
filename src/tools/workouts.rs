//! Workout MCP Tools
//!
//! AI-generated workout plans and their history.

use serde::Serialize;
use tracing::{info, warn};

use crate::ai::{workout_request, CompletionClient};
use crate::db::Database;
use crate::models::WorkoutPlanRecord;
use crate::workouts::{normalize_workout_plan, WorkoutRequest};

pub const DEFAULT_LIST_LIMIT: i64 = 10;
pub const MAX_LIST_LIMIT: i64 = 50;

/// Response for list_workouts
#[derive(Debug, Serialize)]
pub struct ListWorkoutsResponse {
    pub workouts: Vec<WorkoutPlanRecord>,
    pub total: i64,
}

/// Response for delete_workout
#[derive(Debug, Serialize)]
pub struct DeleteWorkoutResponse {
    pub id: i64,
    pub deleted: bool,
}

/// Generate a plan through the AI gateway and store it
pub async fn generate_workout(
    db: &Database,
    ai: &dyn CompletionClient,
    request: WorkoutRequest,
) -> Result<WorkoutPlanRecord, String> {
    if request.duration_minutes == 0 {
        return Err("Duration must be greater than zero".to_string());
    }
    if request.goal.trim().is_empty() {
        return Err("Goal is required".to_string());
    }

    let reply = ai.complete(&workout_request(&request)).await.map_err(|e| {
        warn!(error = %e, "Workout request failed");
        e.to_string()
    })?;

    let plan = normalize_workout_plan(&reply, &request).map_err(|e| {
        warn!(error = %e, "Unusable workout reply");
        format!("Failed to parse workout plan: {}", e)
    })?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let record = WorkoutPlanRecord::create(&conn, &plan).map_err(|e| format!("Failed to store workout: {}", e))?;

    info!(id = record.id, exercises = record.plan.exercises.len(), "Stored workout plan");

    Ok(record)
}

/// Most recent plans first
pub fn list_workouts(db: &Database, limit: Option<i64>) -> Result<ListWorkoutsResponse, String> {
    let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let workouts = WorkoutPlanRecord::list_recent(&conn, limit).map_err(|e| format!("Failed to list workouts: {}", e))?;
    let total = WorkoutPlanRecord::count(&conn).map_err(|e| format!("Failed to count workouts: {}", e))?;

    Ok(ListWorkoutsResponse { workouts, total })
}

/// Mark a plan as done; completing twice keeps the first timestamp
pub fn complete_workout(db: &Database, id: i64) -> Result<WorkoutPlanRecord, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    WorkoutPlanRecord::mark_completed(&conn, id)
        .map_err(|e| format!("Failed to complete workout: {}", e))?
        .ok_or_else(|| format!("Workout {} not found", id))
}

pub fn delete_workout(db: &Database, id: i64) -> Result<DeleteWorkoutResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let deleted = WorkoutPlanRecord::delete(&conn, id).map_err(|e| format!("Failed to delete workout: {}", e))?;
    if !deleted {
        return Err(format!("Workout {} not found", id));
    }
    Ok(DeleteWorkoutResponse { id, deleted })
}
