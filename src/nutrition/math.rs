//! Shared nutrition arithmetic

/// Calories per gram of protein
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
/// Calories per gram of carbohydrate
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// Calories per gram of fat
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Round half toward positive infinity
///
/// Stored targets were produced with this rule, so negative halves round up
/// (-2.5 -> -2), unlike `f64::round`.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
