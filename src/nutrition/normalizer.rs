//! Nutrition response normalizer
//!
//! Turns an untrusted AI reply into a `NutritionRecord`. Only locating and
//! parsing the JSON object can fail; individual fields degrade to defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::ai::response::{coerce_number, parse_embedded, ParseError};
use crate::models::Nutrition;

/// Longest fallback name taken from the user's description
pub const FALLBACK_NAME_MAX_CHARS: usize = 50;

/// Sanitized nutrition estimate for one meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    pub name: String,
    #[serde(flatten)]
    pub nutrition: Nutrition,
    pub servings: f64,
}

/// Nutrition object as the model sent it, before any validation
#[derive(Debug, Default, Deserialize)]
pub struct RawNutrition {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    calories: Option<Value>,
    #[serde(default)]
    protein: Option<Value>,
    #[serde(default)]
    carbs: Option<Value>,
    #[serde(default)]
    fat: Option<Value>,
    #[serde(default)]
    fiber: Option<Value>,
    #[serde(default)]
    sugar: Option<Value>,
    #[serde(default)]
    servings: Option<Value>,
}

impl RawNutrition {
    /// Coerce and clamp every field
    pub fn sanitize(self, fallback_name: &str) -> NutritionRecord {
        // Names are kept verbatim; only an empty or missing name falls back
        let name = match self.name {
            Some(Value::String(s)) if !s.is_empty() => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                debug!("AI reply had no meal name, using description");
                fallback_name.chars().take(FALLBACK_NAME_MAX_CHARS).collect()
            }
        };

        NutritionRecord {
            name,
            nutrition: Nutrition {
                calories: at_least(self.calories.as_ref(), 0.0),
                protein: at_least(self.protein.as_ref(), 0.0),
                carbs: at_least(self.carbs.as_ref(), 0.0),
                fat: at_least(self.fat.as_ref(), 0.0),
                fiber: at_least(self.fiber.as_ref(), 0.0),
                sugar: at_least(self.sugar.as_ref(), 0.0),
            },
            servings: at_least(self.servings.as_ref(), 1.0),
        }
    }
}

/// Coerced value clamped to `floor`; unusable values become `floor`
fn at_least(value: Option<&Value>, floor: f64) -> f64 {
    match coerce_number(value) {
        Some(n) if n > floor => n,
        _ => floor,
    }
}

/// Extract and sanitize a nutrition record from free-form AI text
pub fn normalize_nutrition(raw_text: &str, fallback_name: &str) -> Result<NutritionRecord, ParseError> {
    let raw: RawNutrition = parse_embedded(raw_text)?;
    Ok(raw.sanitize(fallback_name))
}
