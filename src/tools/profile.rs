//! Profile MCP Tools
//!
//! Onboarding, profile edits and daily target calculation.

use serde::Serialize;
use tracing::info;

use crate::db::Database;
use crate::models::{OnboardingData, Profile, ProfileUpdate};
use crate::nutrition::{compute_daily_targets, BodyProfile, DailyTargets};

/// Response for complete_onboarding
#[derive(Debug, Serialize)]
pub struct OnboardingResponse {
    pub profile: Profile,
    pub message: String,
}

/// Response for update_profile
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub profile: Profile,
    /// True when body stats changed and targets were recomputed
    pub targets_recalculated: bool,
}

/// Response for recalculate_targets
#[derive(Debug, Serialize)]
pub struct RecalculateTargetsResponse {
    pub previous: DailyTargets,
    pub targets: DailyTargets,
}

/// Get the profile, creating a default one on first use
pub fn get_profile(db: &Database) -> Result<Profile, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    Profile::get_or_create(&conn).map_err(|e| format!("Failed to get profile: {}", e))
}

/// Preview targets without storing anything
pub fn calculate_targets(profile: &BodyProfile) -> DailyTargets {
    compute_daily_targets(profile)
}

/// Store onboarding answers with freshly computed targets
pub fn complete_onboarding(db: &Database, data: OnboardingData) -> Result<OnboardingResponse, String> {
    let targets = compute_daily_targets(&BodyProfile {
        height_cm: data.height_cm,
        weight_kg: data.weight_kg,
        activity_level: data.activity_level,
        goal: data.goal,
    });

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let profile = Profile::complete_onboarding(&conn, &data, &targets)
        .map_err(|e| format!("Failed to save onboarding: {}", e))?;

    info!(calories = targets.calories, "Onboarding completed");

    Ok(OnboardingResponse {
        message: format!(
            "Your plan is ready: {} cal, {}g protein, {}g carbs, {}g fat per day",
            targets.calories, targets.protein, targets.carbs, targets.fat
        ),
        profile,
    })
}

/// Update the profile
///
/// Changing height, weight, goal or activity level replaces the stored
/// targets with a fresh calculation unless explicit targets are supplied.
pub fn update_profile(db: &Database, mut data: ProfileUpdate) -> Result<UpdateProfileResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let current = Profile::get_or_create(&conn).map_err(|e| format!("Failed to get profile: {}", e))?;

    let targets_recalculated = data.targets.is_none() && data.touches_body_stats();
    if targets_recalculated {
        let merged = BodyProfile {
            height_cm: data.height_cm.or(current.height_cm),
            weight_kg: data.weight_kg.or(current.weight_kg),
            activity_level: data.activity_level.or(current.activity_level),
            goal: data.goal.or(current.goal),
        };
        data.targets = Some(compute_daily_targets(&merged));
    }

    let profile = Profile::update(&conn, &data).map_err(|e| format!("Failed to update profile: {}", e))?;

    if targets_recalculated {
        info!(calories = profile.targets.calories, "Recalculated daily targets");
    }

    Ok(UpdateProfileResponse {
        profile,
        targets_recalculated,
    })
}

/// Recompute and store targets from the stored body stats
pub fn recalculate_targets(db: &Database) -> Result<RecalculateTargetsResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let profile = Profile::get_or_create(&conn).map_err(|e| format!("Failed to get profile: {}", e))?;
    let targets = compute_daily_targets(&profile.body_profile());

    Profile::set_targets(&conn, &targets).map_err(|e| format!("Failed to store targets: {}", e))?;

    Ok(RecalculateTargetsResponse {
        previous: profile.targets,
        targets,
    })
}
