//! Control policies
//!
//! A policy turns intent into a per-tick displacement for the player in its
//! seat. The driver never branches on which policy a seat holds, so a remote
//! peer only needs another `ControlPolicy` impl.

use glam::Vec2;

use super::input::{Control, HeldSet};
use super::state::{Ball, Player};

pub trait ControlPolicy {
    /// Displacement to apply to `player` this tick (clamped by the caller)
    fn compute_motion(&mut self, player: &Player, ball: &Ball, input: HeldSet) -> Vec2;

    /// Whether this seat is trying to shoot this tick
    fn wants_shot(&self, _input: HeldSet) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}

/// Keyboard-driven player
#[derive(Debug, Clone, Copy)]
pub struct HumanPolicy {
    pub step: f32,
}

impl HumanPolicy {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

impl ControlPolicy for HumanPolicy {
    fn compute_motion(&mut self, _player: &Player, _ball: &Ball, input: HeldSet) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if input.contains(Control::Up) {
            delta.y -= self.step;
        }
        if input.contains(Control::Down) {
            delta.y += self.step;
        }
        if input.contains(Control::Left) {
            delta.x -= self.step;
        }
        if input.contains(Control::Right) {
            delta.x += self.step;
        }
        // Diagonals stay un-normalized: holding two directions is faster
        delta
    }

    fn wants_shot(&self, input: HeldSet) -> bool {
        input.contains(Control::Shoot)
    }

    fn name(&self) -> &'static str {
        "human"
    }
}

/// Greedy bot that walks straight at the ball
#[derive(Debug, Clone, Copy)]
pub struct AutonomousPolicy {
    pub step: f32,
}

impl AutonomousPolicy {
    pub fn new(step: f32) -> Self {
        Self { step }
    }
}

/// Sign that maps zero to zero
#[inline]
fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl ControlPolicy for AutonomousPolicy {
    fn compute_motion(&mut self, player: &Player, ball: &Ball, _input: HeldSet) -> Vec2 {
        let to_ball = ball.pos - player.pos;
        Vec2::new(sign(to_ball.x), sign(to_ball.y)) * self.step
    }

    fn name(&self) -> &'static str {
        "autonomous"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(controls: &[Control]) -> HeldSet {
        controls.iter().copied().collect()
    }

    #[test]
    fn test_human_single_directions() {
        let mut policy = HumanPolicy::new(5.0);
        let player = Player::new(Vec2::new(400.0, 300.0));
        let ball = Ball::new(Vec2::new(0.0, 0.0));

        assert_eq!(
            policy.compute_motion(&player, &ball, held(&[Control::Up])),
            Vec2::new(0.0, -5.0)
        );
        assert_eq!(
            policy.compute_motion(&player, &ball, held(&[Control::Right])),
            Vec2::new(5.0, 0.0)
        );
        assert_eq!(
            policy.compute_motion(&player, &ball, HeldSet::EMPTY),
            Vec2::ZERO
        );
    }

    #[test]
    fn test_human_diagonal_not_normalized() {
        let mut policy = HumanPolicy::new(5.0);
        let player = Player::new(Vec2::new(400.0, 300.0));
        let ball = Ball::new(Vec2::ZERO);
        let delta = policy.compute_motion(&player, &ball, held(&[Control::Down, Control::Left]));
        assert_eq!(delta, Vec2::new(-5.0, 5.0));
        assert!(delta.length() > 5.0);
    }

    #[test]
    fn test_human_opposing_keys_cancel() {
        let mut policy = HumanPolicy::new(5.0);
        let player = Player::new(Vec2::new(400.0, 300.0));
        let ball = Ball::new(Vec2::ZERO);
        let delta = policy.compute_motion(&player, &ball, held(&[Control::Up, Control::Down]));
        assert_eq!(delta, Vec2::ZERO);
    }

    #[test]
    fn test_only_human_shoots() {
        let shoot = held(&[Control::Shoot]);
        assert!(HumanPolicy::new(5.0).wants_shot(shoot));
        assert!(!HumanPolicy::new(5.0).wants_shot(HeldSet::EMPTY));
        assert!(!AutonomousPolicy::new(2.0).wants_shot(shoot));
    }

    #[test]
    fn test_autonomous_steps_toward_ball() {
        let mut policy = AutonomousPolicy::new(2.0);
        let player = Player::new(Vec2::new(700.0, 300.0));
        let ball = Ball::new(Vec2::new(500.0, 300.0));
        let delta = policy.compute_motion(&player, &ball, HeldSet::EMPTY);
        // Same row: no vertical motion
        assert_eq!(delta, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn test_autonomous_moves_both_axes() {
        let mut policy = AutonomousPolicy::new(2.0);
        let player = Player::new(Vec2::new(100.0, 100.0));
        let ball = Ball::new(Vec2::new(300.0, 50.0));
        let delta = policy.compute_motion(&player, &ball, HeldSet::EMPTY);
        assert_eq!(delta, Vec2::new(2.0, -2.0));
    }

    #[test]
    fn test_autonomous_overshoot_bounded_by_step() {
        let mut policy = AutonomousPolicy::new(2.0);
        let ball = Ball::new(Vec2::new(500.0, 300.0));
        let mut player = Player::new(Vec2::new(509.0, 300.0));
        for _ in 0..20 {
            let delta = policy.compute_motion(&player, &ball, HeldSet::EMPTY);
            player.pos += delta;
            assert!(player.pos.x >= ball.pos.x - 2.0, "overshot to {}", player.pos.x);
        }
        // Ends up oscillating within one step of the ball
        assert!((player.pos.x - ball.pos.x).abs() <= 2.0);
    }
}
