//! Fixed-rate match driver
//!
//! The host calls `advance` from its periodic timer (or `step` once per tick
//! when it already runs at the simulation rate). Key events go straight into
//! the shared `InputSampler`, which the arena reads once per tick.

use std::sync::Arc;

use crate::consts::*;
use crate::session::{AccessError, GameMode, MatchResult, SessionHandle};
use crate::settings::{Settings, Tuning};
use crate::sim::{
    ControlPolicy, Court, GameEvent, InputSampler, MatchState, MatchStatus, Seat, Seats, Snapshot,
    tick,
};

/// Receives the full snapshot after every tick, playing or not
pub trait SnapshotObserver {
    fn on_snapshot(&mut self, snapshot: &Snapshot);
}

impl<F> SnapshotObserver for F
where
    F: FnMut(&Snapshot),
{
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self(snapshot)
    }
}

/// One match session: owned state, seat policies and observers
pub struct Arena {
    session: SessionHandle,
    settings: Settings,
    state: MatchState,
    seats: Seats,
    input: Arc<InputSampler>,
    observers: Vec<Box<dyn SnapshotObserver>>,
    accumulator: f64,
}

impl Arena {
    /// Open a match for an authenticated session
    ///
    /// Seat one is driven by the human policy reading `input`, seat two by the
    /// autonomous policy.
    pub fn open(
        session: Option<SessionHandle>,
        mut settings: Settings,
        input: Arc<InputSampler>,
    ) -> Result<Self, AccessError> {
        let session = session.ok_or(AccessError::LoginRequired)?;

        if let Err(e) = settings.validate() {
            log::warn!("Ignoring invalid tuning ({e}), using defaults");
            settings.tuning = Tuning::default();
        }

        let state = MatchState::new(Court::default(), settings.tuning);
        let seats = Seats::human_vs_bot(&settings.tuning);
        log::info!(
            "Arena opened for {} (mode {}, {}s match)",
            session.user_id,
            settings.mode,
            settings.tuning.match_seconds
        );

        Ok(Self {
            session,
            settings,
            state,
            seats,
            input,
            observers: Vec::new(),
            accumulator: 0.0,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> GameMode {
        self.settings.mode
    }

    /// Handle for the host's key event callbacks
    pub fn input(&self) -> Arc<InputSampler> {
        Arc::clone(&self.input)
    }

    pub fn status(&self) -> MatchStatus {
        self.state.clock.status()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.state.tuning
    }

    /// Replace the policy for a seat (e.g. a remote peer)
    pub fn set_policy(&mut self, seat: Seat, policy: Box<dyn ControlPolicy>) {
        log::info!("Seat {:?} now controlled by {}", seat, policy.name());
        *self.seats.get_mut(seat) = policy;
    }

    /// Replace both seat policies at once
    pub fn set_seats(&mut self, seats: Seats) {
        log::info!(
            "Seats now controlled by {} and {}",
            seats.player_one.name(),
            seats.player_two.name()
        );
        self.seats = seats;
    }

    pub fn subscribe(&mut self, observer: impl SnapshotObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Waiting -> Playing. Returns false if the match was not waiting.
    pub fn start(&mut self) -> bool {
        let started = self.state.clock.start();
        if started {
            self.accumulator = 0.0;
            log::info!("Match started ({})", self.state.clock.display());
        }
        started
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.state.clock.pause();
        if paused {
            log::info!("Match paused at {}", self.state.clock.display());
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        let resumed = self.state.clock.resume();
        if resumed {
            log::info!("Match resumed");
        }
        resumed
    }

    /// Back to the starting layout, waiting for Start
    pub fn reset(&mut self) {
        self.state.reset();
        self.accumulator = 0.0;
        log::info!("Match reset");
    }

    /// Add to a seat's score. Only accepted while playing.
    pub fn award_points(&mut self, seat: Seat, points: u32) -> bool {
        if !self.state.clock.is_playing() {
            return false;
        }
        let player = self.state.player_mut(seat);
        player.score = player.score.saturating_add(points);
        log::debug!("{:?} awarded {} (now {})", seat, points, player.score);
        true
    }

    /// Run exactly one fixed tick and notify observers
    pub fn step(&mut self) {
        let held = self.input.snapshot();
        tick(&mut self.state, &mut self.seats, held);

        for event in &self.state.events {
            match event {
                GameEvent::Finished => log::info!(
                    "Match finished {} - {} after {} ticks",
                    self.state.player_one.score,
                    self.state.player_two.score,
                    self.state.tick
                ),
                other => log::debug!("tick {}: {:?}", self.state.tick, other),
            }
        }

        let snapshot = self.state.snapshot();
        for observer in &mut self.observers {
            observer.on_snapshot(&snapshot);
        }
    }

    /// Feed a host frame delta; runs as many fixed ticks as it covers
    ///
    /// Large deltas are clamped and substeps capped so a stalled host cannot
    /// trigger a burst of catch-up ticks. Returns the number of ticks run.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        // NaN or infinite deltas from the host count as no time passing
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than carrying it into the next frame
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Final result, once the clock has run out
    pub fn result(&self) -> Option<MatchResult> {
        MatchResult::from_snapshot(&self.session, self.settings.mode, &self.state.snapshot())
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("session", &self.session)
            .field("mode", &self.settings.mode)
            .field("status", &self.status())
            .field("tick", &self.state.tick)
            .field("seats", &self.seats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MatchOutcome;
    use crate::sim::{Ball, Control, HeldSet, Player};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn open() -> (Arena, Arc<InputSampler>) {
        let input = Arc::new(InputSampler::new());
        let arena = Arena::open(
            Some(SessionHandle::new("player-1")),
            Settings::default(),
            Arc::clone(&input),
        )
        .unwrap();
        (arena, input)
    }

    #[test]
    fn test_login_required() {
        let err = Arena::open(None, Settings::default(), Arc::new(InputSampler::new())).unwrap_err();
        assert_eq!(err, AccessError::LoginRequired);
    }

    #[test]
    fn test_invalid_tuning_falls_back() {
        let mut settings = Settings::default();
        settings.tuning.friction = 2.0;
        let arena = Arena::open(
            Some(SessionHandle::new("u")),
            settings,
            Arc::new(InputSampler::new()),
        )
        .unwrap();
        assert_eq!(*arena.tuning(), Tuning::default());
    }

    #[test]
    fn test_start_and_out_of_order_commands() {
        let (mut arena, _) = open();
        assert!(!arena.resume());
        assert!(!arena.pause());
        assert!(arena.start());
        assert!(!arena.start());
        assert_eq!(arena.status(), MatchStatus::Playing);
        assert_eq!(arena.snapshot().clock.remaining_seconds(), 180);
    }

    #[test]
    fn test_input_handle_drives_player_one() {
        let (mut arena, input) = open();
        arena.start();
        input.press(Control::Down);
        arena.step();
        input.release(Control::Down);
        arena.step();
        assert_eq!(arena.snapshot().player_one.pos, Vec2::new(100.0, 305.0));
    }

    #[test]
    fn test_observers_see_waiting_frames() {
        let (mut arena, _) = open();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        arena.subscribe(move |snap: &Snapshot| sink.borrow_mut().push(snap.clone()));

        arena.step();
        arena.step();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|s| s.clock.status() == MatchStatus::Waiting));
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn test_pause_freezes_entities() {
        let (mut arena, input) = open();
        arena.start();
        input.press(Control::Right);
        arena.step();
        assert!(arena.pause());
        let frozen = arena.snapshot();
        arena.step();
        arena.step();
        assert_eq!(arena.snapshot(), frozen);
        assert!(arena.resume());
        arena.step();
        assert_eq!(arena.snapshot().player_one.pos.x, 110.0);
    }

    #[test]
    fn test_reset_twice_matches_once() {
        let (mut arena, input) = open();
        arena.start();
        input.press(Control::Up);
        for _ in 0..30 {
            arena.step();
        }
        arena.award_points(Seat::PlayerTwo, 2);

        arena.reset();
        let once = arena.snapshot();
        arena.reset();
        assert_eq!(arena.snapshot(), once);
        assert_eq!(arena.status(), MatchStatus::Waiting);
        assert_eq!(once.player_two.score, 0);
        assert_eq!(once.player_one.pos, Vec2::new(100.0, 300.0));
        // Reset does not release keys; only key-up does
        assert!(input.is_held(Control::Up));
    }

    #[test]
    fn test_advance_caps_substeps() {
        let (mut arena, _) = open();
        arena.start();
        let ran = arena.advance(5.0);
        assert!((1..=MAX_SUBSTEPS).contains(&ran));
        assert_eq!(arena.snapshot().tick, ran as u64);

        // A sub-tick frame may run nothing
        let (mut arena, _) = open();
        assert_eq!(arena.advance(SIM_DT / 4.0), 0);
    }

    #[test]
    fn test_advance_tracks_wall_time() {
        let (mut arena, _) = open();
        arena.start();
        let mut ticks = 0;
        // One simulated second at a 120 fps host
        for _ in 0..120 {
            ticks += arena.advance(1.0 / 120.0);
        }
        assert!((59..=61).contains(&ticks), "ran {ticks} ticks");
    }

    #[test]
    fn test_full_match_produces_result() {
        let (mut arena, _) = open();
        assert!(arena.result().is_none());
        arena.start();
        arena.award_points(Seat::PlayerOne, 3);
        arena.award_points(Seat::PlayerTwo, 1);

        for _ in 0..180 * SIM_HZ {
            arena.step();
        }
        assert_eq!(arena.status(), MatchStatus::Finished);
        assert!(!arena.award_points(Seat::PlayerOne, 1));

        let result = arena.result().unwrap();
        assert_eq!(result.user_id, "player-1");
        assert_eq!(result.mode, GameMode::OneVsOne);
        assert_eq!(result.outcome, MatchOutcome::PlayerOneWins);
        assert_eq!(result.ticks_played, (180 * SIM_HZ) as u64);

        arena.step();
        let after = arena.snapshot();
        arena.step();
        assert_eq!(arena.snapshot(), after);
    }

    /// Stand-in for a remote peer: replays a fixed displacement
    struct Scripted(Vec2);

    impl ControlPolicy for Scripted {
        fn compute_motion(&mut self, _player: &Player, _ball: &Ball, _input: HeldSet) -> Vec2 {
            self.0
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    #[test]
    fn test_custom_policy_is_pure_addition() {
        let (mut arena, _) = open();
        arena.set_policy(Seat::PlayerTwo, Box::new(Scripted(Vec2::new(0.0, 10.0))));
        arena.start();
        arena.step();
        assert_eq!(arena.snapshot().player_two.pos, Vec2::new(700.0, 310.0));
        for _ in 0..100 {
            arena.step();
        }
        // Still clamped like every other seat
        assert_eq!(arena.snapshot().player_two.pos.y, 535.0);
    }

    #[test]
    fn test_mode_does_not_change_simulation() {
        let run = |mode: GameMode| {
            let input = Arc::new(InputSampler::new());
            let mut arena = Arena::open(
                Some(SessionHandle::new("u")),
                Settings::for_mode(mode),
                Arc::clone(&input),
            )
            .unwrap();
            arena.start();
            input.press(Control::Right);
            input.press(Control::Shoot);
            for _ in 0..600 {
                arena.step();
            }
            arena.snapshot()
        };
        let one = run(GameMode::OneVsOne);
        assert_eq!(run(GameMode::ThreeVsThree), one);
        assert_eq!(run(GameMode::Online), one);
    }

    #[test]
    fn test_non_finite_frame_delta_is_ignored() {
        let (mut arena, _) = open();
        arena.start();
        assert_eq!(arena.advance(f64::NAN), 0);
        assert_eq!(arena.advance(f64::INFINITY), 0);

        let ran: u32 = (0..SIM_HZ).map(|_| arena.advance(SIM_DT)).sum();
        assert!((59..=61).contains(&ran), "ran {ran} ticks");
    }

    #[test]
    fn test_oversized_match_length_falls_back() {
        let mut settings = Settings::default();
        settings.tuning.match_seconds = 100_000_000;
        let arena = Arena::open(
            Some(SessionHandle::new("u")),
            settings,
            Arc::new(InputSampler::new()),
        )
        .unwrap();
        assert_eq!(arena.tuning().match_seconds, MATCH_SECONDS);
    }

    #[test]
    fn test_bot_vs_bot_ignores_keys() {
        let (mut arena, input) = open();
        let seats = Seats::bot_vs_bot(arena.tuning());
        arena.set_seats(seats);
        arena.start();
        input.press(Control::Up);
        arena.step();
        // Seat one tracks the ball (400, 300) instead of moving up
        assert_eq!(arena.snapshot().player_one.pos, Vec2::new(102.0, 300.0));
        assert_eq!(arena.snapshot().player_two.pos, Vec2::new(698.0, 300.0));
    }
}
