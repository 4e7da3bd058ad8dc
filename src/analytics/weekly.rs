//! Weekly insights
//!
//! Seven-day averages, logging streak and calorie trend against target.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Nutrition;
use crate::nutrition::math::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};
use crate::nutrition::{round_half_up, DailyTargets};

/// Averages further than this from the calorie target count as a trend
pub const TREND_THRESHOLD_KCAL: i64 = 100;

/// Totals for one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub totals: Nutrition,
    pub meal_count: usize,
}

/// Per-day row in the weekly view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: String,
    pub label: String, // "Mon"
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub meal_count: usize,
}

/// Rounded daily averages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MacroAverages {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

/// Calories contributed by each macro
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacroDistribution {
    pub protein_kcal: i64,
    pub carbs_kcal: i64,
    pub fat_kcal: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieTrend {
    Over,
    Under,
    OnTrack,
}

impl CalorieTrend {
    pub fn from_delta(delta: i64) -> Self {
        if delta > TREND_THRESHOLD_KCAL {
            CalorieTrend::Over
        } else if delta < -TREND_THRESHOLD_KCAL {
            CalorieTrend::Under
        } else {
            CalorieTrend::OnTrack
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyInsights {
    pub days: Vec<DaySummary>,
    pub averages: MacroAverages,
    /// Consecutive logged days ending on the last day
    pub streak: u32,
    pub macro_distribution: MacroDistribution,
    pub calorie_target: i64,
    pub calorie_delta: i64,
    pub trend: CalorieTrend,
}

/// Build insights from consecutive days, oldest first
pub fn weekly_insights(days: Vec<DayTotals>, targets: &DailyTargets) -> WeeklyInsights {
    let mut streak = 0u32;
    for day in &days {
        if day.meal_count > 0 {
            streak += 1;
        } else {
            streak = 0;
        }
    }

    // Days without calories don't dilute the averages
    let logged_days = days.iter().filter(|d| d.totals.calories > 0.0).count().max(1) as f64;
    let sum: Nutrition = days.iter().map(|d| d.totals).sum();
    let average = |total: f64| round_half_up(total / logged_days) as i64;

    let averages = MacroAverages {
        calories: average(sum.calories),
        protein: average(sum.protein),
        carbs: average(sum.carbs),
        fat: average(sum.fat),
    };

    let macro_distribution = MacroDistribution {
        protein_kcal: averages.protein * KCAL_PER_GRAM_PROTEIN as i64,
        carbs_kcal: averages.carbs * KCAL_PER_GRAM_CARBS as i64,
        fat_kcal: averages.fat * KCAL_PER_GRAM_FAT as i64,
    };

    let calorie_delta = averages.calories - targets.calories;

    WeeklyInsights {
        days: days
            .into_iter()
            .map(|d| DaySummary {
                date: d.date.format("%Y-%m-%d").to_string(),
                label: d.date.format("%a").to_string(),
                calories: d.totals.calories,
                protein: d.totals.protein,
                carbs: d.totals.carbs,
                fat: d.totals.fat,
                meal_count: d.meal_count,
            })
            .collect(),
        averages,
        streak,
        macro_distribution,
        calorie_target: targets.calories,
        calorie_delta,
        trend: CalorieTrend::from_delta(calorie_delta),
    }
}
