//! Workout plan model
//!
//! Stored AI-generated plans. List-valued fields live in JSON columns.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::workouts::{FitnessLevel, WorkoutPlan};

use super::columns::json_column;

/// A stored workout plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutPlanRecord {
    pub id: i64,
    #[serde(flatten)]
    pub plan: WorkoutPlan,
    pub generated_at: String,
    pub completed_at: Option<String>,
    pub created_at: String,
}

impl WorkoutPlanRecord {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let difficulty: Option<String> = row.get("difficulty")?;
        let duration: Option<i64> = row.get("duration_minutes")?;
        Ok(Self {
            id: row.get("id")?,
            plan: WorkoutPlan {
                title: row.get("title")?,
                description: row.get("description")?,
                duration_minutes: duration.and_then(|d| u32::try_from(d).ok()),
                difficulty: difficulty.as_deref().and_then(FitnessLevel::parse),
                equipment: json_column(row, "equipment")?,
                exercises: json_column(row, "exercises")?,
                safety_notes: json_column(row, "safety_notes")?,
            },
            generated_at: row.get("generated_at")?,
            completed_at: row.get("completed_at")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Store a generated plan
    pub fn create(conn: &Connection, plan: &WorkoutPlan) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO workout_plans (
                title, description, duration_minutes, difficulty,
                equipment, exercises, safety_notes
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                plan.title,
                plan.description,
                plan.duration_minutes,
                plan.difficulty.map(|d| d.as_str()),
                serde_json::to_string(&plan.equipment)?,
                serde_json::to_string(&plan.exercises)?,
                serde_json::to_string(&plan.safety_notes)?,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a plan by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM workout_plans WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(plan) => Ok(Some(plan)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Most recent plans first
    pub fn list_recent(conn: &Connection, limit: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM workout_plans ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;

        let plans = stmt
            .query_map([limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(plans)
    }

    /// Count all stored plans
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM workout_plans", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Mark a plan as done; the first completion time is kept
    pub fn mark_completed(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        conn.execute(
            "UPDATE workout_plans SET completed_at = COALESCE(completed_at, datetime('now')) WHERE id = ?1",
            [id],
        )?;
        Self::get_by_id(conn, id)
    }

    /// Delete a plan
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM workout_plans WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::workouts::Exercise;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn plan(title: &str) -> WorkoutPlan {
        WorkoutPlan {
            title: title.to_string(),
            description: Some("Legs and core".to_string()),
            duration_minutes: Some(40),
            difficulty: Some(FitnessLevel::Beginner),
            equipment: vec!["Kettlebell".to_string()],
            exercises: vec![Exercise {
                name: "Goblet Squat".to_string(),
                sets: 3,
                reps: "10".to_string(),
                rest: "60 seconds".to_string(),
                notes: Some("Chest up".to_string()),
            }],
            safety_notes: vec!["Stop if you feel pain".to_string()],
        }
    }

    #[test]
    fn test_create_round_trips_json_columns() {
        let conn = conn();
        let created = WorkoutPlanRecord::create(&conn, &plan("Leg Day")).unwrap();
        assert_eq!(created.plan, plan("Leg Day"));
        assert!(created.completed_at.is_none());
    }

    #[test]
    fn test_list_recent_newest_first_with_limit() {
        let conn = conn();
        for title in ["First", "Second", "Third"] {
            WorkoutPlanRecord::create(&conn, &plan(title)).unwrap();
        }
        let plans = WorkoutPlanRecord::list_recent(&conn, 2).unwrap();
        let titles: Vec<&str> = plans.iter().map(|p| p.plan.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "Second"]);
        assert_eq!(WorkoutPlanRecord::count(&conn).unwrap(), 3);
    }

    #[test]
    fn test_mark_completed_and_delete() {
        let conn = conn();
        let created = WorkoutPlanRecord::create(&conn, &plan("Leg Day")).unwrap();
        let completed = WorkoutPlanRecord::mark_completed(&conn, created.id).unwrap().unwrap();
        assert!(completed.completed_at.is_some());
        assert!(WorkoutPlanRecord::mark_completed(&conn, 999).unwrap().is_none());
        assert!(WorkoutPlanRecord::delete(&conn, created.id).unwrap());
        assert!(WorkoutPlanRecord::get_by_id(&conn, created.id).unwrap().is_none());
    }
}
