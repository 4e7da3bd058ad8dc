//! Analytics module
//!
//! Pure aggregation over stored meals: goal progress and weekly insights.

pub mod progress;
pub mod weekly;

pub use progress::{DailyProgress, MacroProgress};
pub use weekly::{weekly_insights, CalorieTrend, DayTotals, WeeklyInsights};
