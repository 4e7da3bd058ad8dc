//! Meal model
//!
//! A logged meal with its AI-estimated nutrition.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use super::Nutrition;

/// Meal type enum
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    #[default]
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    /// Unknown values log as a snack
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            _ => MealType::Snack,
        }
    }
}

/// A logged meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub nutrition: Nutrition,
    pub servings: f64,
    pub meal_type: MealType,
    pub logged_at: String,   // RFC 3339
    pub logged_date: String, // ISO date: "2026-10-16"
    pub created_at: String,
}

/// Data for creating a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealCreate {
    pub name: String,
    pub description: Option<String>,
    pub nutrition: Nutrition,
    pub servings: f64,
    pub meal_type: MealType,
    pub logged_at: String,
    pub logged_date: String,
}

/// Aggregated meals for one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateTotals {
    pub date: String,
    pub nutrition: Nutrition,
    pub meal_count: i64,
}

impl Meal {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let meal_type_str: String = row.get("meal_type")?;
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            description: row.get("description")?,
            nutrition: Nutrition {
                calories: row.get("calories")?,
                protein: row.get("protein")?,
                carbs: row.get("carbs")?,
                fat: row.get("fat")?,
                fiber: row.get("fiber")?,
                sugar: row.get("sugar")?,
            },
            servings: row.get("servings")?,
            meal_type: MealType::parse(&meal_type_str),
            logged_at: row.get("logged_at")?,
            logged_date: row.get("logged_date")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Create a new meal
    pub fn create(conn: &Connection, data: &MealCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO meals (
                name, description, calories, protein, carbs, fat, fiber, sugar,
                servings, meal_type, logged_at, logged_date
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                data.name,
                data.description,
                data.nutrition.calories,
                data.nutrition.protein,
                data.nutrition.carbs,
                data.nutrition.fat,
                data.nutrition.fiber,
                data.nutrition.sugar,
                data.servings,
                data.meal_type.as_str(),
                data.logged_at,
                data.logged_date,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Get a meal by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meals WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(meal) => Ok(Some(meal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Meals logged on a date, newest first
    pub fn list_for_date(conn: &Connection, date: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM meals WHERE logged_date = ?1 ORDER BY logged_at DESC, id DESC",
        )?;

        let meals = stmt
            .query_map([date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(meals)
    }

    /// Per-date totals for dates in `[start_date, end_date]`; dates without meals are absent
    pub fn totals_by_date(conn: &Connection, start_date: &str, end_date: &str) -> DbResult<Vec<DateTotals>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT logged_date,
                   SUM(calories), SUM(protein), SUM(carbs), SUM(fat), SUM(fiber), SUM(sugar),
                   COUNT(*)
            FROM meals
            WHERE logged_date >= ?1 AND logged_date <= ?2
            GROUP BY logged_date
            ORDER BY logged_date ASC
            "#,
        )?;

        let totals = stmt
            .query_map(params![start_date, end_date], |row| {
                Ok(DateTotals {
                    date: row.get(0)?,
                    nutrition: Nutrition {
                        calories: row.get(1)?,
                        protein: row.get(2)?,
                        carbs: row.get(3)?,
                        fat: row.get(4)?,
                        fiber: row.get(5)?,
                        sugar: row.get(6)?,
                    },
                    meal_count: row.get(7)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(totals)
    }

    /// Delete a meal
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM meals WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}
