//! Progress toward daily targets

use serde::Serialize;

use crate::models::Nutrition;
use crate::nutrition::DailyTargets;

/// Progress for a single macro
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroProgress {
    pub current: f64,
    pub target: i64,
    /// Capped at 100
    pub percent: f64,
    /// Never negative
    pub remaining: f64,
}

impl MacroProgress {
    pub fn new(current: f64, target: i64) -> Self {
        let target_f = target as f64;
        let percent = if target > 0 {
            (current / target_f * 100.0).min(100.0)
        } else {
            0.0
        };
        Self {
            current,
            target,
            percent,
            remaining: (target_f - current).max(0.0),
        }
    }
}

/// Progress for all tracked macros in a day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyProgress {
    pub calories: MacroProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fat: MacroProgress,
    pub goal_reached: bool,
}

impl DailyProgress {
    pub fn new(totals: &Nutrition, targets: &DailyTargets) -> Self {
        let calories = MacroProgress::new(totals.calories, targets.calories);
        Self {
            goal_reached: targets.calories > 0 && calories.percent >= 100.0,
            calories,
            protein: MacroProgress::new(totals.protein, targets.protein),
            carbs: MacroProgress::new(totals.carbs, targets.carbs),
            fat: MacroProgress::new(totals.fat, targets.fat),
        }
    }
}
