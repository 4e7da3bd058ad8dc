//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;
use tracing::info;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        info!("Migrated database schema to version 1");
    }

    debug_assert_eq!(get_schema_version(conn)?, SCHEMA_VERSION);

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- PROFILE
        -- Single user: body stats and daily targets
        -- ============================================
        CREATE TABLE profile (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            display_name TEXT,
            height_cm REAL,
            weight_kg REAL,
            goal TEXT CHECK(goal IN ('lose', 'maintain', 'gain', 'recomp')),
            activity_level TEXT CHECK(activity_level IN ('sedentary', 'light', 'moderate', 'active', 'very_active')),
            dietary_preferences TEXT NOT NULL DEFAULT '[]',   -- JSON array

            daily_calories INTEGER NOT NULL DEFAULT 2000,
            daily_protein INTEGER NOT NULL DEFAULT 150,      -- grams
            daily_carbs INTEGER NOT NULL DEFAULT 200,        -- grams
            daily_fat INTEGER NOT NULL DEFAULT 65,           -- grams

            onboarding_completed INTEGER NOT NULL DEFAULT 0, -- boolean
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- MEALS
        -- AI-parsed meal log
        -- ============================================
        CREATE TABLE meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,                     -- the user's own words

            calories REAL NOT NULL DEFAULT 0,
            protein REAL NOT NULL DEFAULT 0,      -- grams
            carbs REAL NOT NULL DEFAULT 0,        -- grams
            fat REAL NOT NULL DEFAULT 0,          -- grams
            fiber REAL NOT NULL DEFAULT 0,        -- grams
            sugar REAL NOT NULL DEFAULT 0,        -- grams
            servings REAL NOT NULL DEFAULT 1,

            meal_type TEXT NOT NULL CHECK(meal_type IN ('breakfast', 'lunch', 'dinner', 'snack')) DEFAULT 'snack',
            logged_at TEXT NOT NULL,              -- RFC 3339
            logged_date TEXT NOT NULL,            -- ISO date: "2026-10-16"
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meals_logged_date ON meals(logged_date);

        -- ============================================
        -- WORKOUT PLANS
        -- AI-generated plans; arrays stored as JSON
        -- ============================================
        CREATE TABLE workout_plans (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            duration_minutes INTEGER,
            difficulty TEXT CHECK(difficulty IN ('beginner', 'intermediate', 'advanced')),
            equipment TEXT NOT NULL DEFAULT '[]',
            exercises TEXT NOT NULL DEFAULT '[]',
            safety_notes TEXT NOT NULL DEFAULT '[]',
            generated_at TEXT NOT NULL DEFAULT (datetime('now')),
            completed_at TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_workout_plans_created ON workout_plans(created_at);
        "#,
    )?;

    Ok(())
}
