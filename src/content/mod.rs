//! Content domain: tuning and level data loaded from `assets/data`.

mod data;
mod loader;
mod validation;

use bevy::prelude::*;
use std::path::Path;

pub use data::{
    BlockDef, BlockKind, BoundsDef, BoxDef, CheckpointDef, CrystalDef, HazardDef,
    LEVEL_SCHEMA_VERSION, LevelDef,
};
pub use loader::{ContentLoadError, load_single_file, parse_ron};
pub use validation::{ValidationError, validate_level, validate_tuning};

use crate::movement::MovementTuning;

const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_content);
    }
}

/// Loads `path` and validates it, falling back to `fallback` on any error.
fn load_or_default<T>(
    path: &Path,
    validate: fn(&T) -> Vec<ValidationError>,
    fallback: impl FnOnce() -> T,
) -> T
where
    T: for<'de> serde::Deserialize<'de>,
{
    match load_single_file::<T>(path) {
        Ok(value) => {
            let errors = validate(&value);
            if errors.is_empty() {
                return value;
            }
            for error in &errors {
                warn!("Content validation error: {}", error);
            }
            warn!("{} failed validation, using built-in defaults", path.display());
            fallback()
        }
        Err(error) => {
            warn!("{}; using built-in defaults", error);
            fallback()
        }
    }
}

/// Reads `movement.ron`, falling back to defaults.
pub fn load_tuning() -> MovementTuning {
    load_or_default(
        &Path::new(DATA_DIR).join("movement.ron"),
        validate_tuning,
        MovementTuning::default,
    )
}

/// Reads `level.ron`, falling back to the built-in playground.
pub fn load_level() -> LevelDef {
    load_or_default(
        &Path::new(DATA_DIR).join("level.ron"),
        validate_level,
        LevelDef::playground,
    )
}

pub(crate) fn load_content(mut commands: Commands) {
    let tuning = load_tuning();
    let level = load_level();

    info!(
        "Content loaded: level '{}' ({} blocks, {} platforms, {} hazards, {} crystals, {} checkpoints), jump height {:.0}",
        level.name,
        level.blocks.len(),
        level.platforms.len(),
        level.hazards.len(),
        level.crystals.len(),
        level.checkpoints.len(),
        tuning.single_jump_height()
    );

    commands.insert_resource(tuning);
    commands.insert_resource(level);
}

#[cfg(test)]
mod tests;
