//! Sanity checks for loaded tuning and level data.

use std::collections::HashSet;

use super::data::{BoxDef, LEVEL_SCHEMA_VERSION, LevelDef};
use crate::movement::{HitboxSize, MovementTuning};

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} field '{}': {}", self.source_type, self.field, self.message)
    }
}

/// Helper macro for pushing an error when a condition fails
macro_rules! check {
    ($errors:expr, $cond:expr, $source_type:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                field: $field.to_string(),
                message: format!($($msg)+),
            });
        }
    };
}

/// Validate movement tuning. Returns an empty list when everything is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let durations = [
        ("coyote_time", tuning.coyote_time),
        ("jump_buffer_time", tuning.jump_buffer_time),
        ("attack_duration", tuning.attack_duration),
        ("attack_hitbox_delay", tuning.attack_hitbox_delay),
        ("wall_jump_action_delay", tuning.wall_jump_action_delay),
        ("wall_jump_ground_check_delay", tuning.wall_jump_ground_check_delay),
        ("wall_contact_grace", tuning.wall_contact_grace),
        ("explicit_detach_grace", tuning.explicit_detach_grace),
        ("wall_reattach_grace", tuning.wall_reattach_grace),
        ("dash_duration", tuning.dash_duration),
        ("dash_cooldown", tuning.dash_cooldown),
        ("dash_settle_delay", tuning.dash_settle_delay),
        ("crouch_slide_duration_from_idle", tuning.crouch_slide_duration_from_idle),
        ("drop_through_duration", tuning.drop_through_duration),
        ("drop_blocked_down_grace", tuning.drop_blocked_down_grace),
    ];
    for (field, value) in durations {
        check!(errors, value >= 0.0, "MovementTuning", field, "duration {} is negative", value);
    }

    let speeds = [
        ("run_speed", tuning.run_speed),
        ("air_speed", tuning.air_speed),
        ("jump_velocity", tuning.jump_velocity),
        ("dash_speed", tuning.dash_speed),
        ("air_dash_speed", tuning.air_dash_speed),
        ("max_velocity_x", tuning.max_velocity_x),
        ("max_velocity_y", tuning.max_velocity_y),
        ("gravity", tuning.gravity),
    ];
    for (field, value) in speeds {
        check!(errors, value > 0.0, "MovementTuning", field, "must be positive, got {}", value);
    }

    check!(
        errors,
        (0.0..=1.0).contains(&tuning.jump_cut_multiplier),
        "MovementTuning",
        "jump_cut_multiplier",
        "must be within [0, 1], got {}",
        tuning.jump_cut_multiplier
    );
    check!(
        errors,
        (0.0..=1.0).contains(&tuning.run_to_crouch_slide_damping),
        "MovementTuning",
        "run_to_crouch_slide_damping",
        "must be within [0, 1], got {}",
        tuning.run_to_crouch_slide_damping
    );

    let hitboxes: [(&str, HitboxSize); 3] = [
        ("normal_hitbox", tuning.normal_hitbox),
        ("crouch_hitbox", tuning.crouch_hitbox),
        ("dash_hitbox", tuning.dash_hitbox),
    ];
    for (field, size) in hitboxes {
        check!(
            errors,
            size.width > 0.0 && size.height > 0.0,
            "MovementTuning",
            field,
            "size {}x{} must be positive",
            size.width,
            size.height
        );
    }
    check!(
        errors,
        tuning.crouch_hitbox.height <= tuning.dash_hitbox.height
            && tuning.dash_hitbox.height <= tuning.normal_hitbox.height,
        "MovementTuning",
        "crouch_hitbox",
        "hitbox heights must satisfy crouch <= dash <= normal"
    );

    errors
}

fn check_box(errors: &mut Vec<ValidationError>, field: String, area: &BoxDef) {
    check!(
        errors,
        area.width > 0.0 && area.height > 0.0,
        "LevelDef",
        field,
        "box size {}x{} must be positive",
        area.width,
        area.height
    );
}

/// Validate a level definition. Returns an empty list when it can be spawned.
pub fn validate_level(level: &LevelDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check!(
        errors,
        level.schema_version == LEVEL_SCHEMA_VERSION,
        "LevelDef",
        "schema_version",
        "expected {}, got {}",
        LEVEL_SCHEMA_VERSION,
        level.schema_version
    );

    let bounds = level.bounds;
    check!(
        errors,
        bounds.min_x < bounds.max_x,
        "LevelDef",
        "bounds",
        "min_x {} must be below max_x {}",
        bounds.min_x,
        bounds.max_x
    );
    let (x, y) = level.spawn;
    check!(
        errors,
        x > bounds.min_x && x < bounds.max_x && y > bounds.kill_y,
        "LevelDef",
        "spawn",
        "spawn ({}, {}) lies outside the level bounds",
        x,
        y
    );

    for (i, block) in level.blocks.iter().enumerate() {
        check_box(&mut errors, format!("blocks[{}]", i), &block.area);
    }
    for (i, platform) in level.platforms.iter().enumerate() {
        check_box(&mut errors, format!("platforms[{}]", i), platform);
    }
    for (i, hazard) in level.hazards.iter().enumerate() {
        check_box(&mut errors, format!("hazards[{}]", i), &hazard.area);
    }
    for (i, crystal) in level.crystals.iter().enumerate() {
        check!(
            errors,
            crystal.respawn_secs >= 0.0,
            "LevelDef",
            format!("crystals[{}].respawn_secs", i),
            "duration {} is negative",
            crystal.respawn_secs
        );
    }

    let mut seen = HashSet::new();
    for (i, checkpoint) in level.checkpoints.iter().enumerate() {
        check_box(&mut errors, format!("checkpoints[{}]", i), &checkpoint.area);
        check!(
            errors,
            seen.insert(checkpoint.id.as_str()),
            "LevelDef",
            format!("checkpoints[{}].id", i),
            "duplicate checkpoint id '{}'",
            checkpoint.id
        );
    }

    errors
}
