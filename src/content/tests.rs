//! Content domain: tests for parsing and validating tuning and level data.

use super::*;
use crate::movement::{HitboxSize, MovementTuning};

// -----------------------------------------------------------------------------
// Tuning parsing tests
// -----------------------------------------------------------------------------

#[test]
fn test_partial_tuning_keeps_defaults() {
    let tuning: MovementTuning = parse_ron("(run_speed: 400.0, coyote_time: 0.2)", "movement.ron")
        .expect("partial tuning parses");

    assert_eq!(tuning.run_speed, 400.0);
    assert_eq!(tuning.coyote_time, 0.2);
    assert_eq!(tuning.jump_velocity, MovementTuning::default().jump_velocity);
}

#[test]
fn test_tuning_hitbox_override() {
    let tuning: MovementTuning = parse_ron(
        "(crouch_hitbox: (width: 20.0, height: 24.0))",
        "movement.ron",
    )
    .expect("hitbox override parses");

    assert_eq!(tuning.crouch_hitbox, HitboxSize::new(20.0, 24.0));
    assert_eq!(tuning.normal_hitbox, MovementTuning::default().normal_hitbox);
}

#[test]
fn test_parse_error_names_the_file() {
    let result: Result<MovementTuning, _> = parse_ron("(run_speed: fast)", "movement.ron");
    let error = result.expect_err("invalid value must fail");

    assert_eq!(error.file, "movement.ron");
    assert!(error.to_string().starts_with("Failed to load movement.ron"));
}

#[test]
fn test_missing_file_is_io_error() {
    let result: Result<MovementTuning, _> =
        load_single_file(std::path::Path::new("assets/data/does_not_exist.ron"));
    let error = result.expect_err("missing file must fail");

    assert!(error.message.starts_with("IO error"));
}

// -----------------------------------------------------------------------------
// Tuning validation tests
// -----------------------------------------------------------------------------

#[test]
fn test_default_tuning_is_valid() {
    assert!(validate_tuning(&MovementTuning::default()).is_empty());
}

#[test]
fn test_negative_duration_is_rejected() {
    let tuning = MovementTuning {
        coyote_time: -0.1,
        ..MovementTuning::default()
    };
    let errors = validate_tuning(&tuning);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "coyote_time");
}

#[test]
fn test_hitbox_height_order_is_enforced() {
    let tuning = MovementTuning {
        crouch_hitbox: HitboxSize::new(25.0, 60.0),
        ..MovementTuning::default()
    };
    let errors = validate_tuning(&tuning);

    assert!(errors.iter().any(|e| e.field == "crouch_hitbox"));
}

#[test]
fn test_jump_cut_multiplier_range() {
    let tuning = MovementTuning {
        jump_cut_multiplier: 1.5,
        ..MovementTuning::default()
    };
    let errors = validate_tuning(&tuning);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "jump_cut_multiplier");
}

// -----------------------------------------------------------------------------
// Level tests
// -----------------------------------------------------------------------------

const MINIMAL_LEVEL: &str = r#"(
    schema_version: 1,
    name: "Shaft",
    spawn: (0.0, 0.0),
    bounds: (min_x: -100.0, max_x: 100.0, kill_y: -300.0),
    blocks: [
        (kind: Ground, area: (x: 0.0, y: -10.0, width: 200.0, height: 20.0)),
    ],
    crystals: [
        (x: 0.0, y: 80.0),
    ],
    hazards: [
        (area: (x: 50.0, y: 4.0, width: 20.0, height: 8.0)),
    ],
)"#;

#[test]
fn test_minimal_level_parses_with_defaults() {
    let level: LevelDef = parse_ron(MINIMAL_LEVEL, "level.ron").expect("minimal level parses");

    assert_eq!(level.name, "Shaft");
    assert_eq!(level.blocks.len(), 1);
    assert_eq!(level.blocks[0].kind, BlockKind::Ground);
    assert!(level.platforms.is_empty());
    assert!(level.checkpoints.is_empty());
    assert_eq!(level.crystals[0].respawn_secs, 2.0);
    assert!(!level.hazards[0].pogoable);
    assert!(validate_level(&level).is_empty());
}

#[test]
fn test_playground_is_valid() {
    let level = LevelDef::playground();
    assert!(validate_level(&level).is_empty());
    assert!(!level.platforms.is_empty());
    assert!(level.hazards.iter().any(|h| h.pogoable));
}

#[test]
fn test_spawn_outside_bounds_is_rejected() {
    let mut level = LevelDef::playground();
    level.spawn = (level.bounds.max_x + 10.0, 0.0);

    let errors = validate_level(&level);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "spawn");
}

#[test]
fn test_schema_version_mismatch_is_rejected() {
    let mut level = LevelDef::playground();
    level.schema_version = LEVEL_SCHEMA_VERSION + 1;

    let errors = validate_level(&level);
    assert!(errors.iter().any(|e| e.field == "schema_version"));
}

#[test]
fn test_duplicate_checkpoint_ids_are_rejected() {
    let mut level = LevelDef::playground();
    let duplicate = level.checkpoints[0].clone();
    level.checkpoints.push(duplicate);

    let errors = validate_level(&level);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].field.ends_with(".id"));
}

#[test]
fn test_zero_sized_box_is_rejected() {
    let mut level = LevelDef::playground();
    level.platforms.push(BoxDef::new(0.0, 0.0, 0.0, 10.0));

    let errors = validate_level(&level);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].field.starts_with("platforms["));
}

#[test]
fn test_box_rect_is_centered() {
    let area = BoxDef::new(10.0, 20.0, 40.0, 10.0);
    let rect = area.rect();

    assert_eq!(rect.min, bevy::prelude::Vec2::new(-10.0, 15.0));
    assert_eq!(rect.max, bevy::prelude::Vec2::new(30.0, 25.0));
}

// -----------------------------------------------------------------------------
// Shipped data tests
// -----------------------------------------------------------------------------

#[test]
fn test_shipped_tuning_matches_defaults() {
    let tuning: MovementTuning =
        load_single_file(&std::path::Path::new(DATA_DIR).join("movement.ron"))
            .expect("shipped movement.ron parses");

    assert!(validate_tuning(&tuning).is_empty());
    assert_eq!(tuning.dash_cooldown, MovementTuning::default().dash_cooldown);
    assert_eq!(tuning.normal_hitbox, MovementTuning::default().normal_hitbox);
}

#[test]
fn test_shipped_level_is_valid() {
    let level: LevelDef = load_single_file(&std::path::Path::new(DATA_DIR).join("level.ron"))
        .expect("shipped level.ron parses");

    assert!(validate_level(&level).is_empty());
    assert_eq!(level.checkpoints.len(), 2);
    assert!(level.crystals.iter().any(|c| c.respawn_secs == 3.0));
}
