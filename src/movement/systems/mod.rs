//! Movement domain: system modules that connect the locomotion core to
//! input and physics.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::{
    PhysicsLevel, detect_contacts, resolve_semi_solid_platforms, sync_body_from_physics,
};
pub(crate) use input::read_input;
pub use movement::feet_to_center;
pub(crate) use movement::{apply_body_to_physics, step_player_controllers};
