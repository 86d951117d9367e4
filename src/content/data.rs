//! Data definitions for the RON content files.
//!
//! These structs mirror `assets/data/level.ron`. Positions are world units
//! with y up; boxes are described by their centre and size.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Bumped whenever the level file layout changes incompatibly.
pub const LEVEL_SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Shared shapes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoxDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoxDef {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center(), self.size())
    }
}

// ============================================================================
// Level (level.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BlockKind {
    /// Floors and ceilings
    Ground,
    /// Wall-slide surfaces
    Wall,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BlockDef {
    pub kind: BlockKind,
    pub area: BoxDef,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HazardDef {
    pub area: BoxDef,
    /// An armed air attack bounces off instead of dying.
    #[serde(default)]
    pub pogoable: bool,
}

fn default_crystal_respawn() -> f32 {
    2.0
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CrystalDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_crystal_respawn")]
    pub respawn_secs: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CheckpointDef {
    pub id: String,
    pub area: BoxDef,
    /// Feet position used when respawning here.
    pub respawn: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct BoundsDef {
    pub min_x: f32,
    pub max_x: f32,
    /// Falling below this line counts as death.
    pub kill_y: f32,
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LevelDef {
    pub schema_version: u32,
    pub name: String,
    pub spawn: (f32, f32),
    pub bounds: BoundsDef,
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    #[serde(default)]
    pub platforms: Vec<BoxDef>,
    #[serde(default)]
    pub hazards: Vec<HazardDef>,
    #[serde(default)]
    pub crystals: Vec<CrystalDef>,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointDef>,
}

impl LevelDef {
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.spawn.0, self.spawn.1)
    }

    /// Built-in practice room used when no level file can be loaded.
    pub fn playground() -> Self {
        Self {
            schema_version: LEVEL_SCHEMA_VERSION,
            name: "Playground".to_string(),
            spawn: (-330.0, -180.0),
            bounds: BoundsDef {
                min_x: -400.0,
                max_x: 400.0,
                kill_y: -400.0,
            },
            blocks: vec![
                BlockDef {
                    kind: BlockKind::Ground,
                    area: BoxDef::new(0.0, -200.0, 800.0, 40.0),
                },
                // Pillar for wall jumps
                BlockDef {
                    kind: BlockKind::Wall,
                    area: BoxDef::new(-100.0, -80.0, 30.0, 200.0),
                },
                // Crawlspace: crouch fits underneath, standing does not
                BlockDef {
                    kind: BlockKind::Ground,
                    area: BoxDef::new(250.0, -138.0, 160.0, 20.0),
                },
            ],
            platforms: vec![
                BoxDef::new(-250.0, -60.0, 150.0, 12.0),
                BoxDef::new(250.0, 40.0, 150.0, 12.0),
                BoxDef::new(0.0, 150.0, 120.0, 12.0),
            ],
            hazards: vec![
                HazardDef {
                    area: BoxDef::new(-250.0, -172.0, 100.0, 16.0),
                    pogoable: true,
                },
                HazardDef {
                    area: BoxDef::new(100.0, -172.0, 80.0, 16.0),
                    pogoable: false,
                },
            ],
            crystals: vec![
                CrystalDef {
                    x: 0.0,
                    y: 40.0,
                    respawn_secs: default_crystal_respawn(),
                },
                CrystalDef {
                    x: -250.0,
                    y: 60.0,
                    respawn_secs: default_crystal_respawn(),
                },
            ],
            checkpoints: vec![
                CheckpointDef {
                    id: "start".to_string(),
                    area: BoxDef::new(-350.0, -150.0, 40.0, 60.0),
                    respawn: (-350.0, -180.0),
                },
                CheckpointDef {
                    id: "ledge".to_string(),
                    area: BoxDef::new(250.0, 76.0, 40.0, 60.0),
                    respawn: (250.0, 46.0),
                },
            ],
        }
    }
}

impl Default for LevelDef {
    fn default() -> Self {
        Self::playground()
    }
}
