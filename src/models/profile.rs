//! Profile model
//!
//! Single-user profile: body stats, goal and the stored daily targets.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::nutrition::{ActivityLevel, BodyProfile, DailyTargets, Goal};

use super::columns::json_column;

/// The user's profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<Goal>,
    pub activity_level: Option<ActivityLevel>,
    pub dietary_preferences: Vec<String>,
    pub targets: DailyTargets,
    pub onboarding_completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Data collected by onboarding
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingData {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<Goal>,
    pub activity_level: Option<ActivityLevel>,
    pub dietary_preferences: Vec<String>,
}

/// Data for updating a profile; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// Empty string clears the name
    pub display_name: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<Goal>,
    pub activity_level: Option<ActivityLevel>,
    pub dietary_preferences: Option<Vec<String>>,
    pub targets: Option<DailyTargets>,
}

impl ProfileUpdate {
    /// Whether any input of the target calculation changes
    pub fn touches_body_stats(&self) -> bool {
        self.height_cm.is_some()
            || self.weight_kg.is_some()
            || self.goal.is_some()
            || self.activity_level.is_some()
    }
}

impl Profile {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let goal: Option<String> = row.get("goal")?;
        let activity_level: Option<String> = row.get("activity_level")?;
        Ok(Self {
            display_name: row.get("display_name")?,
            height_cm: row.get("height_cm")?,
            weight_kg: row.get("weight_kg")?,
            goal: goal.as_deref().and_then(Goal::parse),
            activity_level: activity_level.as_deref().and_then(ActivityLevel::parse),
            dietary_preferences: json_column(row, "dietary_preferences")?,
            targets: DailyTargets {
                calories: row.get("daily_calories")?,
                protein: row.get("daily_protein")?,
                carbs: row.get("daily_carbs")?,
                fat: row.get("daily_fat")?,
            },
            onboarding_completed: row.get("onboarding_completed")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Inputs for the target calculator
    pub fn body_profile(&self) -> BodyProfile {
        BodyProfile {
            height_cm: self.height_cm,
            weight_kg: self.weight_kg,
            activity_level: self.activity_level,
            goal: self.goal,
        }
    }

    /// Get the profile (single row table)
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM profile WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the profile, creating it with default targets if missing
    pub fn get_or_create(conn: &Connection) -> DbResult<Self> {
        conn.execute("INSERT OR IGNORE INTO profile (id) VALUES (1)", [])?;
        Self::get(conn)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Store onboarding answers and the computed targets
    pub fn complete_onboarding(
        conn: &Connection,
        data: &OnboardingData,
        targets: &DailyTargets,
    ) -> DbResult<Self> {
        let preferences = serde_json::to_string(&data.dietary_preferences)?;
        conn.execute(
            r#"
            INSERT INTO profile (
                id, height_cm, weight_kg, goal, activity_level, dietary_preferences,
                daily_calories, daily_protein, daily_carbs, daily_fat, onboarding_completed
            )
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1)
            ON CONFLICT(id) DO UPDATE SET
                height_cm = excluded.height_cm,
                weight_kg = excluded.weight_kg,
                goal = excluded.goal,
                activity_level = excluded.activity_level,
                dietary_preferences = excluded.dietary_preferences,
                daily_calories = excluded.daily_calories,
                daily_protein = excluded.daily_protein,
                daily_carbs = excluded.daily_carbs,
                daily_fat = excluded.daily_fat,
                onboarding_completed = 1,
                updated_at = datetime('now')
            "#,
            params![
                data.height_cm,
                data.weight_kg,
                data.goal.map(|g| g.as_str()),
                data.activity_level.map(|a| a.as_str()),
                preferences,
                targets.calories,
                targets.protein,
                targets.carbs,
                targets.fat,
            ],
        )?;

        Self::get_or_create(conn)
    }

    /// Apply a partial update
    pub fn update(conn: &Connection, data: &ProfileUpdate) -> DbResult<Self> {
        Self::get_or_create(conn)?;

        let mut sets: Vec<&str> = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref name) = data.display_name {
            let name = Some(name.trim().to_string()).filter(|n| !n.is_empty());
            params_vec.push(Box::new(name));
            sets.push("display_name");
        }
        if let Some(height) = data.height_cm {
            params_vec.push(Box::new(height));
            sets.push("height_cm");
        }
        if let Some(weight) = data.weight_kg {
            params_vec.push(Box::new(weight));
            sets.push("weight_kg");
        }
        if let Some(goal) = data.goal {
            params_vec.push(Box::new(goal.as_str()));
            sets.push("goal");
        }
        if let Some(level) = data.activity_level {
            params_vec.push(Box::new(level.as_str()));
            sets.push("activity_level");
        }
        if let Some(ref preferences) = data.dietary_preferences {
            params_vec.push(Box::new(serde_json::to_string(preferences)?));
            sets.push("dietary_preferences");
        }
        if let Some(targets) = data.targets {
            for (column, value) in [
                ("daily_calories", targets.calories),
                ("daily_protein", targets.protein),
                ("daily_carbs", targets.carbs),
                ("daily_fat", targets.fat),
            ] {
                params_vec.push(Box::new(value));
                sets.push(column);
            }
        }

        if !sets.is_empty() {
            let assignments: Vec<String> = sets
                .iter()
                .enumerate()
                .map(|(i, column)| format!("{} = ?{}", column, i + 1))
                .collect();
            let sql = format!(
                "UPDATE profile SET {}, updated_at = datetime('now') WHERE id = 1",
                assignments.join(", ")
            );
            let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
            conn.execute(&sql, params_refs.as_slice())?;
        }

        Self::get_or_create(conn)
    }

    /// Replace the stored targets
    pub fn set_targets(conn: &Connection, targets: &DailyTargets) -> DbResult<Self> {
        Self::update(
            conn,
            &ProfileUpdate {
                targets: Some(*targets),
                ..ProfileUpdate::default()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_get_or_create_has_default_targets() {
        let conn = conn();
        assert!(Profile::get(&conn).unwrap().is_none());
        let profile = Profile::get_or_create(&conn).unwrap();
        assert_eq!(profile.targets, DailyTargets::default());
        assert!(!profile.onboarding_completed);
        assert!(profile.dietary_preferences.is_empty());
    }

    #[test]
    fn test_complete_onboarding() {
        let conn = conn();
        let data = OnboardingData {
            height_cm: Some(180.0),
            weight_kg: Some(80.0),
            goal: Some(Goal::Gain),
            activity_level: Some(ActivityLevel::Sedentary),
            dietary_preferences: vec!["Vegetarian".to_string()],
        };
        let targets = DailyTargets { calories: 2436, protein: 160, carbs: 296, fat: 68 };
        let profile = Profile::complete_onboarding(&conn, &data, &targets).unwrap();
        assert!(profile.onboarding_completed);
        assert_eq!(profile.targets, targets);
        assert_eq!(profile.goal, Some(Goal::Gain));
        assert_eq!(profile.activity_level, Some(ActivityLevel::Sedentary));
        assert_eq!(profile.dietary_preferences, vec!["Vegetarian"]);
        assert_eq!(profile.body_profile().height_cm, Some(180.0));
    }

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let conn = conn();
        Profile::update(&conn, &ProfileUpdate {
            display_name: Some("Sam".to_string()),
            weight_kg: Some(72.5),
            ..ProfileUpdate::default()
        })
        .unwrap();
        let profile = Profile::update(&conn, &ProfileUpdate {
            goal: Some(Goal::Lose),
            ..ProfileUpdate::default()
        })
        .unwrap();
        assert_eq!(profile.display_name.as_deref(), Some("Sam"));
        assert_eq!(profile.weight_kg, Some(72.5));
        assert_eq!(profile.goal, Some(Goal::Lose));
    }

    #[test]
    fn test_empty_display_name_clears() {
        let conn = conn();
        Profile::update(&conn, &ProfileUpdate { display_name: Some("Sam".into()), ..Default::default() }).unwrap();
        let profile =
            Profile::update(&conn, &ProfileUpdate { display_name: Some("  ".into()), ..Default::default() }).unwrap();
        assert_eq!(profile.display_name, None);
    }

    #[test]
    fn test_set_targets_allows_negative_carbs() {
        let conn = conn();
        let targets = DailyTargets { calories: 181, protein: 80, carbs: -46, fat: 5 };
        let profile = Profile::set_targets(&conn, &targets).unwrap();
        assert_eq!(profile.targets, targets);
    }

    #[test]
    fn test_touches_body_stats() {
        assert!(!ProfileUpdate::default().touches_body_stats());
        assert!(ProfileUpdate { goal: Some(Goal::Maintain), ..Default::default() }.touches_body_stats());
        assert!(!ProfileUpdate { display_name: Some("x".into()), ..Default::default() }.touches_body_stats());
    }
}
