//! Combat simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Mission clock passed in, never read from the platform
//! - Seeded RNG only (spawn placement)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod combat;
pub mod state;
pub mod tick;

pub use autopilot::demo_input;
pub use combat::{projectile_hits, resolve_hits};
pub use state::{Enemy, Explosion, Message, MissionState, Projectile, Ship};
pub use tick::{PLAYFIELD, TickInput, enemy_velocity, step, tick};
