//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable seat order (player one, then player two)
//! - No rendering or platform dependencies

pub mod clock;
pub mod input;
pub mod physics;
pub mod policy;
pub mod state;
pub mod tick;

pub use clock::{MatchClock, MatchStatus};
pub use input::{Control, HeldSet, InputSampler};
pub use physics::{apply_friction, apply_shot, integrate, physics_step, reflect_axis, reflect_bounds};
pub use policy::{AutonomousPolicy, ControlPolicy, HumanPolicy};
pub use state::{Axis, Ball, Court, GameEvent, Hoop, MatchState, Player, Rect, Seat, Snapshot};
pub use tick::{Seats, tick};
