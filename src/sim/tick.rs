//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match deterministically.

use glam::Vec2;

use super::input::HeldSet;
use super::physics::physics_step;
use super::policy::{AutonomousPolicy, ControlPolicy, HumanPolicy};
use super::state::{GameEvent, MatchState, Seat};
use crate::settings::Tuning;

/// The policy controlling each seat
pub struct Seats {
    pub player_one: Box<dyn ControlPolicy>,
    pub player_two: Box<dyn ControlPolicy>,
}

impl Seats {
    /// Human in seat one, bot in seat two
    pub fn human_vs_bot(tuning: &Tuning) -> Self {
        Self {
            player_one: Box::new(HumanPolicy::new(tuning.human_step)),
            player_two: Box::new(AutonomousPolicy::new(tuning.bot_step)),
        }
    }

    pub fn bot_vs_bot(tuning: &Tuning) -> Self {
        Self {
            player_one: Box::new(AutonomousPolicy::new(tuning.bot_step)),
            player_two: Box::new(AutonomousPolicy::new(tuning.bot_step)),
        }
    }

    pub fn get_mut(&mut self, seat: Seat) -> &mut Box<dyn ControlPolicy> {
        match seat {
            Seat::PlayerOne => &mut self.player_one,
            Seat::PlayerTwo => &mut self.player_two,
        }
    }

    pub fn get(&self, seat: Seat) -> &dyn ControlPolicy {
        match seat {
            Seat::PlayerOne => self.player_one.as_ref(),
            Seat::PlayerTwo => self.player_two.as_ref(),
        }
    }
}

impl std::fmt::Debug for Seats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Seats")
            .field("player_one", &self.player_one.name())
            .field("player_two", &self.player_two.name())
            .finish()
    }
}

const SEAT_ORDER: [Seat; 2] = [Seat::PlayerOne, Seat::PlayerTwo];

/// Advance the match by one fixed timestep
///
/// Outside `Playing` this is a no-op that leaves every entity frozen.
pub fn tick(state: &mut MatchState, seats: &mut Seats, input: HeldSet) {
    state.events.clear();

    if !state.clock.is_playing() {
        return;
    }

    state.tick += 1;

    // Policies see the ball where it was at the start of the tick
    let bounds = state.court.player_bounds();
    for seat in SEAT_ORDER {
        let ball = state.ball.clone();
        let player = state.player_mut(seat);
        let delta = seats.get_mut(seat).compute_motion(player, &ball, input);
        player.translate(delta, &bounds);
    }

    let shooters: Vec<(Seat, Vec2)> = SEAT_ORDER
        .into_iter()
        .filter(|seat| seats.get(*seat).wants_shot(input))
        .map(|seat| (seat, state.player(seat).pos))
        .collect();

    physics_step(
        &mut state.ball,
        &state.court,
        &state.tuning,
        &shooters,
        &mut state.events,
    );

    if state.clock.advance() {
        state.events.push(GameEvent::Finished);
    }
}
