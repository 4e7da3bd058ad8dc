//! Prompt contracts for the AI collaborator
//!
//! Both prompts ask for JSON only; the normalizers still tolerate prose.

use crate::workouts::WorkoutRequest;

use super::client::CompletionRequest;

const NUTRITION_TEMPERATURE: f32 = 0.3;
const WORKOUT_TEMPERATURE: f32 = 0.7;

const NUTRITION_SYSTEM_PROMPT: &str = r#"You are a nutrition expert. Parse the food description and estimate accurate nutritional values.

IMPORTANT: Return ONLY valid JSON with this exact structure:
{
  "name": "Brief descriptive name of the food/meal",
  "calories": <number>,
  "protein": <number in grams>,
  "carbs": <number in grams>,
  "fat": <number in grams>,
  "fiber": <number in grams>,
  "sugar": <number in grams>,
  "servings": <number, default 1>
}

Be accurate with common foods. For example:
- 1 large egg: ~70 cal, 6g protein, 0g carbs, 5g fat
- 1 slice white bread: ~75 cal, 2g protein, 14g carbs, 1g fat
- 1 cup orange juice: ~110 cal, 2g protein, 26g carbs, 0g fat

Sum up all items mentioned. Round to whole numbers."#;

/// Request to estimate nutrition for a free-text meal description
pub fn nutrition_request(text: &str) -> CompletionRequest {
    CompletionRequest {
        system_prompt: NUTRITION_SYSTEM_PROMPT.to_string(),
        user_prompt: format!("Parse this food description: \"{}\"", text),
        temperature: NUTRITION_TEMPERATURE,
    }
}

fn workout_system_prompt(difficulty: &str) -> String {
    format!(
        r#"You are a certified personal trainer. Create safe, effective workout plans.

IMPORTANT: Return ONLY valid JSON with this exact structure:
{{
  "title": "Workout title",
  "description": "Brief description",
  "duration_minutes": <number>,
  "difficulty": "{difficulty}",
  "equipment": [<array of equipment needed>],
  "exercises": [
    {{
      "name": "Exercise name",
      "sets": <number>,
      "reps": "8-12" or "30 seconds",
      "rest": "60 seconds",
      "notes": "Optional form tips"
    }}
  ],
  "safety_notes": ["Important safety considerations"]
}}

Guidelines:
- Include warm-up and cool-down
- Provide beginner modifications in notes when appropriate
- Prioritize compound movements
- Balance push/pull/legs
- Include rest periods"#
    )
}

/// Request to generate a workout plan
pub fn workout_request(request: &WorkoutRequest) -> CompletionRequest {
    let level = request.fitness_level.as_str();

    let equipment = if request.equipment.is_empty() {
        "no equipment (bodyweight only)".to_string()
    } else {
        request.equipment.join(", ")
    };

    let focus = match request.focus_area.as_deref() {
        Some(area) => format!("Focus area: {}", area),
        None => "Full body workout".to_string(),
    };

    CompletionRequest {
        system_prompt: workout_system_prompt(level),
        user_prompt: format!(
            "Create a {}-minute {} workout for someone whose goal is to {}.\nAvailable equipment: {}.\n{}",
            request.duration_minutes, level, request.goal, equipment, focus
        ),
        temperature: WORKOUT_TEMPERATURE,
    }
}
