//! Hoop Arena - a two-player basketball court simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, policies, match clock)
//! - `arena`: Fixed-rate driver that owns a match and notifies observers
//! - `session`: Session gate, game modes and final match results
//! - `settings`: JSON configuration and data-driven tuning
//! - `platform`: Host key mapping and the browser adapter

pub mod arena;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use arena::{Arena, SnapshotObserver};
pub use session::{AccessError, GameMode, MatchOutcome, MatchResult, SessionHandle};
pub use settings::{Settings, SettingsError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f64 = 1.0 / SIM_HZ as f64;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Inset of the court lines from the canvas edge
    pub const COURT_MARGIN: f32 = 50.0;

    /// Hoop markers sit on the baselines at mid-height
    pub const HOOP_WIDTH: f32 = 20.0;
    pub const HOOP_HEIGHT: f32 = 60.0;

    /// Drawn radii, used to inset each entity's playable rectangle
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const BALL_RADIUS: f32 = 8.0;

    /// Starting positions
    pub const PLAYER_ONE_START: (f32, f32) = (100.0, 300.0);
    pub const PLAYER_TWO_START: (f32, f32) = (700.0, 300.0);
    pub const BALL_START: (f32, f32) = (400.0, 300.0);

    /// Per-tick displacement for each held direction (human)
    pub const HUMAN_STEP: f32 = 5.0;
    /// Per-tick displacement per axis (bot)
    pub const BOT_STEP: f32 = 2.0;

    /// Fraction of velocity kept after a boundary bounce
    pub const RESTITUTION: f32 = 0.8;
    /// Velocity damping applied every tick
    pub const FRICTION: f32 = 0.99;
    /// Shooter must be closer than this to the ball
    pub const CONTACT_RADIUS: f32 = 30.0;
    /// Shot velocity per unit of ball offset from the shooter
    pub const SHOT_GAIN: f32 = 0.3;

    /// Match length in seconds
    pub const MATCH_SECONDS: u32 = 180;
}
