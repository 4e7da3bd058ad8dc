//! Data models
//!
//! Rust structs representing database entities.

mod columns;
mod meal;
mod nutrition;
mod profile;
mod workout_plan;

pub use meal::{DateTotals, Meal, MealCreate, MealType};
pub use nutrition::Nutrition;
pub use profile::{OnboardingData, Profile, ProfileUpdate};
pub use workout_plan::WorkoutPlanRecord;
