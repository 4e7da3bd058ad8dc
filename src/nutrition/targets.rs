//! Daily target calculator
//!
//! Simplified Mifflin-St Jeor estimate. Age and sex are not collected, so
//! the formula is pinned to age 30 with the male constant; changing that
//! would shift every stored target.

use serde::{Deserialize, Serialize};

use super::math::{round_half_up, KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};

const DEFAULT_HEIGHT_CM: f64 = 170.0;
const DEFAULT_WEIGHT_KG: f64 = 70.0;
const ASSUMED_AGE_YEARS: f64 = 30.0;
const MALE_CONSTANT: f64 = 5.0;
const DEFAULT_ACTIVITY_MULTIPLIER: f64 = 1.55;
const LOSE_ADJUSTMENT_KCAL: f64 = -500.0;
const GAIN_ADJUSTMENT_KCAL: f64 = 300.0;
const PROTEIN_GRAMS_PER_KG: f64 = 2.0;
const FAT_SHARE_OF_CALORIES: f64 = 0.25;

/// Activity level enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Parse a stored or user-supplied level; unknown text is `None`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "light" => Some(ActivityLevel::Light),
            "moderate" => Some(ActivityLevel::Moderate),
            "active" => Some(ActivityLevel::Active),
            "very_active" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

/// Body composition goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
    Recomp,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Lose => "lose",
            Goal::Maintain => "maintain",
            Goal::Gain => "gain",
            Goal::Recomp => "recomp",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "lose" => Some(Goal::Lose),
            "maintain" => Some(Goal::Maintain),
            "gain" => Some(Goal::Gain),
            "recomp" => Some(Goal::Recomp),
            _ => None,
        }
    }

    /// Calorie adjustment applied to TDEE
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            Goal::Lose => LOSE_ADJUSTMENT_KCAL,
            Goal::Gain => GAIN_ADJUSTMENT_KCAL,
            Goal::Maintain | Goal::Recomp => 0.0,
        }
    }
}

/// Inputs for a target calculation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub goal: Option<Goal>,
}

/// Daily calorie and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTargets {
    pub calories: i64,
    pub protein: i64, // grams
    pub carbs: i64,   // grams, negative for pathological inputs
    pub fat: i64,     // grams
}

impl Default for DailyTargets {
    /// Targets a profile starts with before onboarding
    fn default() -> Self {
        Self {
            calories: 2000,
            protein: 150,
            carbs: 200,
            fat: 65,
        }
    }
}

/// Absent, non-finite and non-positive measurements fall back to the default
fn measurement_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default)
}

/// Basal metabolic rate for the pinned age and sex
pub fn basal_metabolic_rate(height_cm: f64, weight_kg: f64) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * ASSUMED_AGE_YEARS + MALE_CONSTANT
}

/// Compute daily targets; never fails
pub fn compute_daily_targets(profile: &BodyProfile) -> DailyTargets {
    let height = measurement_or(profile.height_cm, DEFAULT_HEIGHT_CM);
    let weight = measurement_or(profile.weight_kg, DEFAULT_WEIGHT_KG);

    let multiplier = profile
        .activity_level
        .map(|level| level.multiplier())
        .unwrap_or(DEFAULT_ACTIVITY_MULTIPLIER);
    let adjustment = profile.goal.map(|goal| goal.calorie_adjustment()).unwrap_or(0.0);

    let tdee = basal_metabolic_rate(height, weight) * multiplier + adjustment;

    let calories = round_half_up(tdee);
    let protein = round_half_up(weight * PROTEIN_GRAMS_PER_KG);
    let fat = round_half_up(calories * FAT_SHARE_OF_CALORIES / KCAL_PER_GRAM_FAT);
    let carbs = round_half_up(
        (calories - protein * KCAL_PER_GRAM_PROTEIN - fat * KCAL_PER_GRAM_FAT) / KCAL_PER_GRAM_CARBS,
    );

    DailyTargets {
        calories: calories as i64,
        protein: protein as i64,
        carbs: carbs as i64,
        fat: fat as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(height: f64, weight: f64, activity: ActivityLevel, goal: Goal) -> BodyProfile {
        BodyProfile {
            height_cm: Some(height),
            weight_kg: Some(weight),
            activity_level: Some(activity),
            goal: Some(goal),
        }
    }

    #[test]
    fn test_moderate_maintain_reference_profile() {
        let targets = compute_daily_targets(&profile(170.0, 70.0, ActivityLevel::Moderate, Goal::Maintain));
        assert_eq!(
            targets,
            DailyTargets { calories: 2507, protein: 140, carbs: 329, fat: 70 }
        );
    }

    #[test]
    fn test_lose_subtracts_500_before_rounding() {
        let maintain = compute_daily_targets(&profile(170.0, 70.0, ActivityLevel::Moderate, Goal::Maintain));
        let lose = compute_daily_targets(&profile(170.0, 70.0, ActivityLevel::Moderate, Goal::Lose));
        assert_eq!(maintain.calories - lose.calories, 500);
        assert_eq!(lose, DailyTargets { calories: 2007, protein: 140, carbs: 236, fat: 56 });
    }

    #[test]
    fn test_gain_adds_300() {
        let gain = compute_daily_targets(&profile(170.0, 70.0, ActivityLevel::Moderate, Goal::Gain));
        assert_eq!(gain, DailyTargets { calories: 2807, protein: 140, carbs: 386, fat: 78 });
    }

    #[test]
    fn test_recomp_matches_maintain() {
        let maintain = compute_daily_targets(&profile(182.0, 81.5, ActivityLevel::Active, Goal::Maintain));
        let recomp = compute_daily_targets(&profile(182.0, 81.5, ActivityLevel::Active, Goal::Recomp));
        assert_eq!(maintain, recomp);
    }

    #[test]
    fn test_sedentary_gain() {
        let targets = compute_daily_targets(&profile(180.0, 80.0, ActivityLevel::Sedentary, Goal::Gain));
        assert_eq!(targets, DailyTargets { calories: 2436, protein: 160, carbs: 296, fat: 68 });
    }

    #[test]
    fn test_empty_profile_uses_defaults() {
        let defaults = compute_daily_targets(&BodyProfile::default());
        let explicit = compute_daily_targets(&profile(170.0, 70.0, ActivityLevel::Moderate, Goal::Maintain));
        assert_eq!(defaults, explicit);
    }

    #[test]
    fn test_invalid_measurements_fall_back() {
        let odd = BodyProfile {
            height_cm: Some(f64::NAN),
            weight_kg: Some(0.0),
            activity_level: None,
            goal: None,
        };
        assert_eq!(compute_daily_targets(&odd), compute_daily_targets(&BodyProfile::default()));
    }

    #[test]
    fn test_pathological_profile_keeps_negative_carbs() {
        let targets = compute_daily_targets(&profile(50.0, 40.0, ActivityLevel::Sedentary, Goal::Lose));
        assert_eq!(targets, DailyTargets { calories: 181, protein: 80, carbs: -46, fat: 5 });
    }

    #[test]
    fn test_deterministic() {
        let p = profile(165.5, 62.3, ActivityLevel::Light, Goal::Lose);
        assert_eq!(compute_daily_targets(&p), compute_daily_targets(&p));
    }

    #[test]
    fn test_parse_levels_and_goals() {
        assert_eq!(ActivityLevel::parse(" Very_Active "), Some(ActivityLevel::VeryActive));
        assert_eq!(ActivityLevel::parse("couch"), None);
        assert_eq!(Goal::parse("RECOMP"), Some(Goal::Recomp));
        assert_eq!(Goal::parse(""), None);
        assert_eq!(ActivityLevel::VeryActive.as_str(), "very_active");
    }

    #[test]
    fn test_serde_wire_names() {
        let json = serde_json::to_string(&ActivityLevel::VeryActive).unwrap();
        assert_eq!(json, "\"very_active\"");
        let goal: Goal = serde_json::from_str("\"gain\"").unwrap();
        assert_eq!(goal, Goal::Gain);
    }
}
