//! Match state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::MatchClock;
use crate::consts::*;
use crate::settings::Tuning;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(amount),
            max: self.max - Vec2::splat(amount),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Which seat a player occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    PlayerOne,
    PlayerTwo,
}

/// Hoop marker on one baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hoop {
    /// Seat defending this hoop
    pub defended_by: Seat,
    pub rect: Rect,
}

/// The immutable court
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Court {
    /// Outer canvas bounds
    pub canvas: Rect,
    /// Court lines, inset from the canvas by the margin
    pub lines: Rect,
    pub hoops: [Hoop; 2],
    player_radius: f32,
    ball_radius: f32,
}

impl Default for Court {
    fn default() -> Self {
        Self::new(
            Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            COURT_MARGIN,
            PLAYER_RADIUS,
            BALL_RADIUS,
        )
    }
}

impl Court {
    pub fn new(canvas_size: Vec2, margin: f32, player_radius: f32, ball_radius: f32) -> Self {
        let canvas = Rect::new(Vec2::ZERO, canvas_size);
        let lines = canvas.inset(margin);
        let hoop_size = Vec2::new(HOOP_WIDTH, HOOP_HEIGHT);
        let hoop_y = canvas_size.y / 2.0 - HOOP_HEIGHT / 2.0;
        let hoops = [
            Hoop {
                defended_by: Seat::PlayerOne,
                rect: Rect::from_origin_size(Vec2::new(lines.min.x, hoop_y), hoop_size),
            },
            Hoop {
                defended_by: Seat::PlayerTwo,
                rect: Rect::from_origin_size(
                    Vec2::new(lines.max.x - HOOP_WIDTH, hoop_y),
                    hoop_size,
                ),
            },
        ];
        Self {
            canvas,
            lines,
            hoops,
            player_radius,
            ball_radius,
        }
    }

    /// Rectangle a player center must stay inside
    pub fn player_bounds(&self) -> Rect {
        self.lines.inset(self.player_radius)
    }

    /// Rectangle the ball center is reflected back into
    pub fn ball_bounds(&self) -> Rect {
        self.lines.inset(self.ball_radius)
    }

    pub fn hoop(&self, defended_by: Seat) -> &Hoop {
        match defended_by {
            Seat::PlayerOne => &self.hoops[0],
            Seat::PlayerTwo => &self.hoops[1],
        }
    }
}

/// A player on the court
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub score: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, score: 0 }
    }

    /// Apply a displacement, clamped to `bounds`
    pub fn translate(&mut self, delta: Vec2, bounds: &Rect) {
        self.pos = bounds.clamp(self.pos + delta);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Things that happened during a tick (for audio/visual feedback)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off a court edge
    Bounce { axis: Axis },
    /// A seat put a shot impulse on the ball
    Shot { seat: Seat, vel: Vec2 },
    /// Clock ran out this tick
    Finished,
}

/// Complete match state, owned by the driver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    pub court: Court,
    pub tuning: Tuning,
    pub player_one: Player,
    pub player_two: Player,
    pub ball: Ball,
    pub clock: MatchClock,
    /// Playing ticks since the last reset
    pub tick: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl MatchState {
    pub fn new(court: Court, tuning: Tuning) -> Self {
        Self {
            court,
            tuning,
            player_one: Player::new(Vec2::from(PLAYER_ONE_START)),
            player_two: Player::new(Vec2::from(PLAYER_TWO_START)),
            ball: Ball::new(Vec2::from(BALL_START)),
            clock: MatchClock::new(tuning.match_seconds),
            tick: 0,
            events: Vec::new(),
        }
    }

    /// Put every entity back on its starting spot and wait for Start
    pub fn reset(&mut self) {
        self.player_one = Player::new(Vec2::from(PLAYER_ONE_START));
        self.player_two = Player::new(Vec2::from(PLAYER_TWO_START));
        self.ball = Ball::new(Vec2::from(BALL_START));
        self.clock.reset();
        self.tick = 0;
        self.events.clear();
    }

    pub fn player(&self, seat: Seat) -> &Player {
        match seat {
            Seat::PlayerOne => &self.player_one,
            Seat::PlayerTwo => &self.player_two,
        }
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        match seat {
            Seat::PlayerOne => &mut self.player_one,
            Seat::PlayerTwo => &mut self.player_two,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            player_one: self.player_one.clone(),
            player_two: self.player_two.clone(),
            ball: self.ball.clone(),
            clock: self.clock.clone(),
            tick: self.tick,
            events: self.events.clone(),
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(Court::default(), Tuning::default())
    }
}

/// Read-only view handed to renderers after every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player_one: Player,
    pub player_two: Player,
    pub ball: Ball,
    pub clock: MatchClock,
    pub tick: u64,
    pub events: Vec<GameEvent>,
}
