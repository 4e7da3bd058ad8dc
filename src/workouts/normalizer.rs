//! Workout plan normalizer
//!
//! Same extract-then-sanitize shape as the nutrition normalizer. Missing
//! arrays become empty and gaps are filled from the request.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::ai::response::{coerce_number, coerce_text, coerce_text_list, parse_embedded, ParseError};
use crate::nutrition::round_half_up;

use super::plan::{Exercise, FitnessLevel, WorkoutPlan, WorkoutRequest};

/// Workout object as the model sent it
#[derive(Debug, Default, Deserialize)]
pub struct RawWorkoutPlan {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    duration_minutes: Option<Value>,
    #[serde(default)]
    difficulty: Option<Value>,
    #[serde(default)]
    equipment: Option<Value>,
    #[serde(default)]
    exercises: Option<Value>,
    #[serde(default)]
    safety_notes: Option<Value>,
}

impl RawWorkoutPlan {
    pub fn sanitize(self, request: &WorkoutRequest) -> WorkoutPlan {
        let title = coerce_text(self.title.as_ref()).unwrap_or_else(|| {
            format!(
                "{}-Minute {} Workout",
                request.duration_minutes,
                request.fitness_level.label()
            )
        });

        let duration_minutes = positive_count(self.duration_minutes.as_ref())
            .or(Some(request.duration_minutes).filter(|d| *d > 0));

        let difficulty = coerce_text(self.difficulty.as_ref())
            .and_then(|s| FitnessLevel::parse(&s))
            .or(Some(request.fitness_level));

        let exercises: Vec<Exercise> = match self.exercises {
            Some(Value::Array(items)) => items.iter().filter_map(sanitize_exercise).collect(),
            _ => Vec::new(),
        };

        WorkoutPlan {
            title,
            description: coerce_text(self.description.as_ref()),
            duration_minutes,
            difficulty,
            equipment: coerce_text_list(self.equipment.as_ref()),
            exercises,
            safety_notes: coerce_text_list(self.safety_notes.as_ref()),
        }
    }
}

/// Rounded whole number of at least 1
fn positive_count(value: Option<&Value>) -> Option<u32> {
    coerce_number(value)
        .map(round_half_up)
        .filter(|n| *n >= 1.0)
        .map(|n| n.min(u32::MAX as f64) as u32)
}

/// Objects without a usable name are dropped
fn sanitize_exercise(value: &Value) -> Option<Exercise> {
    let Value::Object(fields) = value else {
        debug!("Dropping non-object exercise entry");
        return None;
    };
    let Some(name) = coerce_text(fields.get("name")) else {
        debug!("Dropping exercise without a name");
        return None;
    };

    Some(Exercise {
        name,
        sets: positive_count(fields.get("sets")).unwrap_or(1),
        reps: coerce_text(fields.get("reps")).unwrap_or_default(),
        rest: coerce_text(fields.get("rest")).unwrap_or_default(),
        notes: coerce_text(fields.get("notes")),
    })
}

/// Extract and sanitize a workout plan from free-form AI text
pub fn normalize_workout_plan(raw_text: &str, request: &WorkoutRequest) -> Result<WorkoutPlan, ParseError> {
    let raw: RawWorkoutPlan = parse_embedded(raw_text)?;
    Ok(raw.sanitize(request))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> WorkoutRequest {
        WorkoutRequest {
            goal: "build muscle".to_string(),
            duration_minutes: 30,
            fitness_level: FitnessLevel::Intermediate,
            equipment: vec!["Dumbbells".to_string()],
            focus_area: None,
        }
    }

    #[test]
    fn test_full_plan_passes_through() {
        let raw = r#"Here is your plan:
{
  "title": "Upper Body Blast",
  "description": "Push and pull supersets",
  "duration_minutes": 35,
  "difficulty": "advanced",
  "equipment": ["Dumbbells", "Bench"],
  "exercises": [
    {"name": "Bench Press", "sets": 4, "reps": "8-10", "rest": "90 seconds", "notes": "Control the descent"},
    {"name": "Bent-over Row", "sets": 3, "reps": 12, "rest": "60 seconds"}
  ],
  "safety_notes": ["Warm up first"]
}
Stay strong!"#;
        let plan = normalize_workout_plan(raw, &request()).unwrap();
        assert_eq!(plan.title, "Upper Body Blast");
        assert_eq!(plan.description.as_deref(), Some("Push and pull supersets"));
        assert_eq!(plan.duration_minutes, Some(35));
        assert_eq!(plan.difficulty, Some(FitnessLevel::Advanced));
        assert_eq!(plan.equipment, vec!["Dumbbells", "Bench"]);
        assert_eq!(plan.exercises.len(), 2);
        assert_eq!(plan.exercises[0].notes.as_deref(), Some("Control the descent"));
        assert_eq!(plan.exercises[1].reps, "12");
        assert_eq!(plan.exercises[1].notes, None);
        assert_eq!(plan.safety_notes, vec!["Warm up first"]);
    }

    #[test]
    fn test_missing_fields_default_from_request() {
        let plan = normalize_workout_plan("{}", &request()).unwrap();
        assert_eq!(plan.title, "30-Minute Intermediate Workout");
        assert_eq!(plan.description, None);
        assert_eq!(plan.duration_minutes, Some(30));
        assert_eq!(plan.difficulty, Some(FitnessLevel::Intermediate));
        assert!(plan.equipment.is_empty());
        assert!(plan.exercises.is_empty());
        assert!(plan.safety_notes.is_empty());
    }

    #[test]
    fn test_bad_exercises_are_dropped_and_sets_clamped() {
        let raw = r#"{"exercises": ["Squat", {"sets": 3}, {"name": "Lunge", "sets": 0}, {"name": "Push-up", "sets": "2.6"}], "equipment": "none", "difficulty": "godlike", "duration_minutes": "-5"}"#;
        let plan = normalize_workout_plan(raw, &request()).unwrap();
        assert_eq!(plan.exercises.len(), 2);
        assert_eq!(plan.exercises[0].name, "Lunge");
        assert_eq!(plan.exercises[0].sets, 1);
        assert_eq!(plan.exercises[0].reps, "");
        assert_eq!(plan.exercises[1].sets, 3);
        assert!(plan.equipment.is_empty());
        assert_eq!(plan.difficulty, Some(FitnessLevel::Intermediate));
        assert_eq!(plan.duration_minutes, Some(30));
    }

    #[test]
    fn test_parse_errors_propagate() {
        assert!(matches!(
            normalize_workout_plan("I cannot help with that.", &request()),
            Err(ParseError::NoJsonObject)
        ));
        assert!(matches!(
            normalize_workout_plan("{\"title\": }", &request()),
            Err(ParseError::MalformedJson(_))
        ));
    }
}
