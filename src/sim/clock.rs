//! Match clock and lifecycle state machine
//!
//! Time is counted in whole ticks so a match always lasts exactly
//! `match_seconds * SIM_HZ` playing ticks regardless of float drift.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::consts::SIM_HZ;

/// Lifecycle of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Entities at their starting spots, waiting for Start
    Waiting,
    /// Clock running, simulation live
    Playing,
    /// Clock and simulation frozen mid-match
    Paused,
    /// Clock ran out
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MatchClock {
    status: MatchStatus,
    match_seconds: u32,
    remaining_ticks: u32,
}

impl MatchClock {
    pub fn new(match_seconds: u32) -> Self {
        Self {
            status: MatchStatus::Waiting,
            match_seconds,
            remaining_ticks: match_seconds.saturating_mul(SIM_HZ),
        }
    }

    fn full_ticks(&self) -> u32 {
        self.match_seconds.saturating_mul(SIM_HZ)
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == MatchStatus::Playing
    }

    pub fn match_seconds(&self) -> u32 {
        self.match_seconds
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    /// Whole seconds left, rounded up so the display reads 3:00 until the
    /// first full second has elapsed
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_ticks.div_ceil(SIM_HZ)
    }

    /// `m:ss` countdown text
    pub fn display(&self) -> String {
        let secs = self.remaining_seconds();
        format!("{}:{:02}", secs / 60, secs % 60)
    }

    /// Waiting -> Playing with a full clock. Returns false (no-op) otherwise.
    pub fn start(&mut self) -> bool {
        if self.status != MatchStatus::Waiting {
            return false;
        }
        self.status = MatchStatus::Playing;
        self.remaining_ticks = self.full_ticks();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != MatchStatus::Playing {
            return false;
        }
        self.status = MatchStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != MatchStatus::Paused {
            return false;
        }
        self.status = MatchStatus::Playing;
        true
    }

    /// Any state -> Waiting with a full clock
    pub fn reset(&mut self) {
        self.status = MatchStatus::Waiting;
        self.remaining_ticks = self.full_ticks();
    }

    /// Consume one tick of play. Returns true on the tick that finishes the match.
    pub fn advance(&mut self) -> bool {
        if self.status != MatchStatus::Playing {
            return false;
        }
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            self.status = MatchStatus::Finished;
            return true;
        }
        false
    }
}

// Renderers get the rounded countdown alongside the raw tick count
impl Serialize for MatchClock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut clock = serializer.serialize_struct("MatchClock", 4)?;
        clock.serialize_field("status", &self.status)?;
        clock.serialize_field("match_seconds", &self.match_seconds)?;
        clock.serialize_field("remaining_ticks", &self.remaining_ticks)?;
        clock.serialize_field("remaining_seconds", &self.remaining_seconds())?;
        clock.end()
    }
}
