//! UI domain: tests for HUD readouts.

use super::*;
use crate::movement::AbilityState;

// -----------------------------------------------------------------------------
// Ability HUD tests
// -----------------------------------------------------------------------------

#[test]
fn test_dash_pip_tracks_air_dash() {
    let mut ability = AbilityState::default();
    assert!(AbilityPip::Dash.ready(&ability));

    ability.has_air_dashed = true;
    assert!(!AbilityPip::Dash.ready(&ability));

    ability.refresh_from_crystal();
    assert!(AbilityPip::Dash.ready(&ability));
    assert!(AbilityPip::AirJump.ready(&ability));
}

#[test]
fn test_spent_pips_share_a_color() {
    assert_eq!(
        AbilityPip::Dash.color(false),
        AbilityPip::AirJump.color(false)
    );
    assert_ne!(AbilityPip::Dash.color(true), AbilityPip::AirJump.color(true));
}

// -----------------------------------------------------------------------------
// Debug HUD tests
// -----------------------------------------------------------------------------

#[cfg(feature = "dev-tools")]
#[test]
fn test_debug_text_names_state_and_flags() {
    use super::debug_hud::describe;
    use crate::movement::{MovementTuning, PlayerController};
    use bevy::prelude::Vec2;

    let tuning = MovementTuning::default();
    let mut controller = PlayerController::new(Vec2::new(10.0, 20.0), &tuning);
    controller.ability.can_dash = false;

    let text = describe(&controller);

    assert!(text.starts_with("State: idle (from none)"));
    assert!(text.contains("Pos: (10, 20)"));
    assert!(text.contains("Dash -"));
}
