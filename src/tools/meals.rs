//! Meal MCP Tools
//!
//! Free-text meal logging through the AI gateway, plus daily views.

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use crate::ai::{nutrition_request, CompletionClient};
use crate::analytics::DailyProgress;
use crate::db::Database;
use crate::models::{Meal, MealCreate, MealType, Nutrition, Profile};
use crate::nutrition::{normalize_nutrition, round_half_up, DailyTargets, NutritionRecord};

/// Parse a `YYYY-MM-DD` date, defaulting to today
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate, String> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", d)),
        None => Ok(Local::now().date_naive()),
    }
}

// ============================================================================
// Response types
// ============================================================================

/// Response for log_meal
#[derive(Debug, Serialize)]
pub struct LogMealResponse {
    pub meal: Meal,
    pub message: String,
}

/// Response for get_day
#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: String,
    pub meals: Vec<Meal>,
    pub totals: Nutrition,
    pub targets: DailyTargets,
    pub progress: DailyProgress,
}

/// Response for delete_meal
#[derive(Debug, Serialize)]
pub struct DeleteMealResponse {
    pub id: i64,
    pub deleted: bool,
}

// ============================================================================
// Tools
// ============================================================================

/// Estimate nutrition for a description without storing it
pub async fn parse_nutrition(ai: &dyn CompletionClient, text: &str) -> Result<NutritionRecord, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("Text is required".to_string());
    }

    let reply = ai.complete(&nutrition_request(text)).await.map_err(|e| {
        warn!(error = %e, "Nutrition request failed");
        e.to_string()
    })?;

    let record = normalize_nutrition(&reply, text).map_err(|e| {
        warn!(error = %e, "Unusable nutrition reply");
        format!("Failed to parse nutrition data: {}", e)
    })?;

    info!(name = %record.name, calories = record.nutrition.calories, "Parsed nutrition");

    Ok(record)
}

/// Estimate nutrition and store the meal at `logged_at`
///
/// Nothing is written when the estimate fails.
pub async fn log_meal(
    db: &Database,
    ai: &dyn CompletionClient,
    text: &str,
    meal_type: MealType,
    logged_at: DateTime<Local>,
) -> Result<LogMealResponse, String> {
    let record = parse_nutrition(ai, text).await?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let meal = Meal::create(
        &conn,
        &MealCreate {
            name: record.name,
            description: Some(text.trim().to_string()),
            nutrition: record.nutrition,
            servings: record.servings,
            meal_type,
            logged_at: logged_at.to_rfc3339(),
            logged_date: logged_at.date_naive().format("%Y-%m-%d").to_string(),
        },
    )
    .map_err(|e| format!("Failed to log meal: {}", e))?;

    info!(id = meal.id, meal_type = meal.meal_type.as_str(), "Logged meal");

    Ok(LogMealResponse {
        message: format!(
            "{}: {} calories added",
            meal.name,
            round_half_up(meal.nutrition.calories) as i64
        ),
        meal,
    })
}

/// Meals, totals and target progress for one date
pub fn get_day(db: &Database, date: NaiveDate) -> Result<DayResponse, String> {
    let date = date.format("%Y-%m-%d").to_string();
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let meals = Meal::list_for_date(&conn, &date).map_err(|e| format!("Failed to list meals: {}", e))?;
    let targets = Profile::get_or_create(&conn)
        .map_err(|e| format!("Failed to get profile: {}", e))?
        .targets;

    let totals: Nutrition = meals.iter().map(|m| m.nutrition).sum();

    Ok(DayResponse {
        progress: DailyProgress::new(&totals, &targets),
        date,
        meals,
        totals,
        targets,
    })
}

/// Delete a logged meal
pub fn delete_meal(db: &Database, id: i64) -> Result<DeleteMealResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let deleted = Meal::delete(&conn, id).map_err(|e| format!("Failed to delete meal: {}", e))?;
    if !deleted {
        return Err(format!("Meal {} not found", id));
    }
    Ok(DeleteMealResponse { id, deleted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::ScriptedClient;
    use chrono::TimeZone;

    const OATMEAL: &str = r#"Sure! {"name":"Oatmeal","calories":310,"protein":"11","carbs":54,"fat":6,"fiber":8,"sugar":12,"servings":1}"#;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn breakfast_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 14, 8, 30, 0).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(Some("2026-10-14")).unwrap(), day("2026-10-14"));
        assert_eq!(parse_date(None).unwrap(), Local::now().date_naive());
        assert_eq!(parse_date(Some("  ")).unwrap(), Local::now().date_naive());
        assert!(parse_date(Some("14/10/2026")).is_err());
    }

    #[tokio::test]
    async fn test_parse_nutrition_sends_description() {
        let ai = ScriptedClient::replying(OATMEAL);
        let record = parse_nutrition(&ai, "  bowl of oatmeal ").await.unwrap();

        assert_eq!(record.name, "Oatmeal");
        assert_eq!(record.nutrition.protein, 11.0);
        let requests = ai.requests.lock().unwrap();
        assert_eq!(requests[0].user_prompt, "Parse this food description: \"bowl of oatmeal\"");
    }

    #[tokio::test]
    async fn test_parse_nutrition_rejects_blank_text_without_calling_ai() {
        let ai = ScriptedClient::replying(OATMEAL);
        assert!(parse_nutrition(&ai, "   ").await.is_err());
        assert_eq!(ai.request_count(), 0);
    }

    #[tokio::test]
    async fn test_log_meal_stores_estimate() {
        let db = db();
        let ai = ScriptedClient::replying(OATMEAL);

        let response = log_meal(&db, &ai, "bowl of oatmeal", MealType::Breakfast, breakfast_time())
            .await
            .unwrap();

        assert_eq!(response.meal.logged_date, "2026-10-14");
        assert_eq!(response.meal.description.as_deref(), Some("bowl of oatmeal"));
        assert_eq!(response.message, "Oatmeal: 310 calories added");

        let view = get_day(&db, day("2026-10-14")).unwrap();
        assert_eq!(view.meals.len(), 1);
        assert_eq!(view.totals.calories, 310.0);
        assert_eq!(view.targets, DailyTargets::default());
    }

    #[tokio::test]
    async fn test_log_meal_message_rounds_calories() {
        let db = db();
        let ai = ScriptedClient::replying(r#"{"name":"Bagel","calories":310.5}"#);
        let response = log_meal(&db, &ai, "bagel", MealType::Snack, breakfast_time()).await.unwrap();
        assert_eq!(response.message, "Bagel: 311 calories added");
        assert_eq!(response.meal.nutrition.calories, 310.5);
    }

    #[tokio::test]
    async fn test_failed_estimate_stores_nothing() {
        let db = db();

        let limited = ScriptedClient::rate_limited();
        assert!(log_meal(&db, &limited, "toast", MealType::Snack, breakfast_time()).await.is_err());

        let garbled = ScriptedClient::replying("I can't help with that");
        let err = log_meal(&db, &garbled, "toast", MealType::Snack, breakfast_time())
            .await
            .unwrap_err();
        assert!(err.contains("Failed to parse nutrition data"));

        assert!(get_day(&db, day("2026-10-14")).unwrap().meals.is_empty());
    }

    #[tokio::test]
    async fn test_get_day_progress() {
        let db = db();
        let ai = ScriptedClient::replying(r#"{"name":"Feast","calories":2100,"protein":160,"carbs":150,"fat":70}"#);
        log_meal(&db, &ai, "feast", MealType::Dinner, breakfast_time()).await.unwrap();

        let view = get_day(&db, day("2026-10-14")).unwrap();
        assert!(view.progress.goal_reached);
        assert_eq!(view.progress.calories.percent, 100.0);
        assert_eq!(view.progress.carbs.remaining, 50.0);
        assert_eq!(view.progress.fat.remaining, 0.0);

        assert!(get_day(&db, day("2026-10-15")).unwrap().meals.is_empty());
    }

    #[tokio::test]
    async fn test_delete_meal() {
        let db = db();
        let ai = ScriptedClient::replying(OATMEAL);
        let meal = log_meal(&db, &ai, "oatmeal", MealType::Breakfast, breakfast_time())
            .await
            .unwrap()
            .meal;

        assert!(delete_meal(&db, meal.id).unwrap().deleted);
        assert!(delete_meal(&db, meal.id).is_err());
    }
}
