//! Movement domain: the nine locomotion states.

mod air_attack;
mod air_dash;
mod crouch;
mod ground_dash;
mod idle;
mod jump;
mod run;
mod wall_jump;
mod wall_slide;

pub use air_attack::AirAttack;
pub use air_dash::AirDash;
pub use crouch::Crouch;
pub use ground_dash::GroundDash;
pub use idle::Idle;
pub use jump::Jump;
pub use run::Run;
pub use wall_jump::WallJump;
pub use wall_slide::WallSlide;
