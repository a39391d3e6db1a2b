//! Nova Strike - A single-player arcade space shooter
//!
//! Core modules:
//! - `sim`: Combat simulation (kinematics, weapons, collisions, lifecycle)
//! - `session`: Fixed-step mission driver and win/loss observation
//! - `renderer`: Scene building and WebGPU rendering pipeline
//! - `input`: Control bindings and input state tracking
//! - `campaign`: Screen flow and level progression
//! - `briefing`: Mission briefing uplink with offline fallback
//! - `tuning`: Data-driven enemy profiles and level table

pub mod briefing;
pub mod campaign;
pub mod geom;
pub mod input;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use campaign::{Campaign, Screen};
pub use session::{MissionOutcome, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical playfield resolution; all positions and bounds live in this space
    pub const GAME_WIDTH: f32 = 1280.0;
    pub const GAME_HEIGHT: f32 = 720.0;

    /// Fixed simulation rate (velocities are expressed in units per tick)
    pub const TICK_RATE_HZ: f64 = 60.0;
    pub const TICK_MS: f64 = 1000.0 / TICK_RATE_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed into the accumulator (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_MAX_SPEED: f32 = 4.0;
    pub const PLAYER_ACCELERATION: f32 = 0.1;
    /// Per-tick velocity decay
    pub const PLAYER_FRICTION: f32 = 0.98;
    pub const PLAYER_MAX_SHIELD: f32 = 100.0;
    pub const PLAYER_MAX_HULL: f32 = 50.0;
    pub const PLAYER_START_X: f32 = GAME_WIDTH / 2.0;
    pub const PLAYER_START_Y: f32 = GAME_HEIGHT - 100.0;

    /// Player weapon
    pub const PLAYER_FIRE_RATE_MS: f64 = 200.0;
    pub const PLAYER_PROJECTILE_SPEED: f32 = 8.0;
    pub const PLAYER_PROJECTILE_DAMAGE: f32 = 10.0;
    pub const PLAYER_PROJECTILE_RADIUS: f32 = 4.0;

    /// Enemies close distance beyond this range and circle inside it
    pub const ENEMY_CHASE_DISTANCE: f32 = 200.0;
    /// Enemies only fire at targets closer than this
    pub const ENEMY_FIRING_RANGE: f32 = 500.0;

    /// Explosion lifetime in ticks
    pub const EXPLOSION_LIFE: u32 = 30;
    /// Projectiles survive this far outside the playfield
    pub const PROJECTILE_CULL_MARGIN: f32 = 100.0;

    /// Banner shown when a mission begins
    pub const START_MESSAGE: &str = "MISSION START";
    pub const START_MESSAGE_MS: f64 = 3000.0;

    /// Delays between the terminal condition and the outcome signal
    pub const DEFEAT_SIGNAL_DELAY_MS: f64 = 1000.0;
    pub const VICTORY_SIGNAL_DELAY_MS: f64 = 500.0;
}
