//! Nutrition calculation module
//!
//! Daily target estimation and normalization of AI nutrition replies.

pub mod math;
pub mod normalizer;
pub mod targets;

pub use math::round_half_up;
pub use normalizer::{normalize_nutrition, NutritionRecord, RawNutrition};
pub use targets::{compute_daily_targets, ActivityLevel, BodyProfile, DailyTargets, Goal};
