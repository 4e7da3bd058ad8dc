//! Workout plan module
//!
//! Request/plan types and normalization of AI-generated plans.

pub mod normalizer;
pub mod plan;

pub use normalizer::{normalize_workout_plan, RawWorkoutPlan};
pub use plan::{Exercise, FitnessLevel, WorkoutPlan, WorkoutRequest};
