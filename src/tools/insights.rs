//! Insights MCP Tools

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::analytics::{self, DayTotals, WeeklyInsights};
use crate::db::Database;
use crate::models::{Meal, Nutrition, Profile};

/// Length of the insights window, ending on and including the end date
pub const WINDOW_DAYS: i64 = 7;

/// Weekly insights for the seven days ending on `end_date`
pub fn weekly_insights(db: &Database, end_date: NaiveDate) -> Result<WeeklyInsights, String> {
    let start_date = end_date
        .checked_sub_signed(Duration::days(WINDOW_DAYS - 1))
        .ok_or_else(|| format!("Date out of range: {}", end_date))?;
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let targets = Profile::get_or_create(&conn)
        .map_err(|e| format!("Failed to get profile: {}", e))?
        .targets;

    let stored: HashMap<String, _> = Meal::totals_by_date(
        &conn,
        &start_date.format("%Y-%m-%d").to_string(),
        &end_date.format("%Y-%m-%d").to_string(),
    )
    .map_err(|e| format!("Failed to load meal totals: {}", e))?
    .into_iter()
    .map(|t| (t.date.clone(), t))
    .collect();

    debug!(logged_days = stored.len(), %start_date, %end_date, "Building weekly insights");

    // Days without meals still appear, with zero totals
    let days = start_date
        .iter_days()
        .take(WINDOW_DAYS as usize)
        .map(|date| match stored.get(&date.format("%Y-%m-%d").to_string()) {
            Some(t) => DayTotals {
                date,
                totals: t.nutrition,
                meal_count: t.meal_count as usize,
            },
            None => DayTotals {
                date,
                totals: Nutrition::zero(),
                meal_count: 0,
            },
        })
        .collect();

    Ok(analytics::weekly_insights(days, &targets))
}
