//! Workout plan types

use serde::{Deserialize, Serialize};

/// Fitness level enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(FitnessLevel::Beginner),
            "intermediate" => Some(FitnessLevel::Intermediate),
            "advanced" => Some(FitnessLevel::Advanced),
            _ => None,
        }
    }
}

/// What the user asked the trainer prompt for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRequest {
    pub goal: String,
    pub duration_minutes: u32,
    pub fitness_level: FitnessLevel,
    pub equipment: Vec<String>,
    /// `None` means a full body session
    pub focus_area: Option<String>,
}

/// A single exercise in a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    pub reps: String, // "8-12" or "30 seconds"
    pub rest: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Sanitized workout plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<u32>,
    pub difficulty: Option<FitnessLevel>,
    pub equipment: Vec<String>,
    pub exercises: Vec<Exercise>,
    pub safety_notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_level_parse() {
        assert_eq!(FitnessLevel::parse("Intermediate"), Some(FitnessLevel::Intermediate));
        assert_eq!(FitnessLevel::parse("expert"), None);
        assert_eq!(FitnessLevel::Advanced.label(), "Advanced");
    }

    #[test]
    fn test_exercise_without_notes_omits_key() {
        let exercise = Exercise {
            name: "Plank".to_string(),
            sets: 3,
            reps: "30 seconds".to_string(),
            rest: "45 seconds".to_string(),
            notes: None,
        };
        let value = serde_json::to_value(&exercise).unwrap();
        assert!(value.get("notes").is_none());
    }
}
