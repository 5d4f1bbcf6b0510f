//! Session boundary
//!
//! The surrounding application authenticates users and records results. The
//! core only needs an opaque user handle to open a match and hands back a
//! `MatchResult` once the clock runs out.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::SettingsError;
use crate::sim::{MatchStatus, Snapshot};

/// Authenticated session supplied by the host application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHandle {
    pub user_id: String,
}

impl SessionHandle {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Reasons a match cannot be opened
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("login required")]
    LoginRequired,
}

/// Match format chosen by the player
///
/// Accepted as configuration only: every mode currently runs the same
/// one-on-one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    #[serde(rename = "1v1")]
    OneVsOne,
    #[serde(rename = "3v3")]
    ThreeVsThree,
    #[serde(rename = "online")]
    Online,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::OneVsOne => "1v1",
            GameMode::ThreeVsThree => "3v3",
            GameMode::Online => "online",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1v1" => Ok(GameMode::OneVsOne),
            "3v3" => Ok(GameMode::ThreeVsThree),
            "online" => Ok(GameMode::Online),
            _ => Err(SettingsError::UnknownMode(s.to_string())),
        }
    }
}

/// Who won a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    PlayerOneWins,
    PlayerTwoWins,
    Draw,
}

impl MatchOutcome {
    pub fn from_scores(player_one: u32, player_two: u32) -> Self {
        match player_one.cmp(&player_two) {
            std::cmp::Ordering::Greater => MatchOutcome::PlayerOneWins,
            std::cmp::Ordering::Less => MatchOutcome::PlayerTwoWins,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

/// Final record handed to the stats/profile collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub user_id: String,
    pub mode: GameMode,
    pub player_one_score: u32,
    pub player_two_score: u32,
    pub outcome: MatchOutcome,
    pub ticks_played: u64,
}

impl MatchResult {
    /// Build a result from a snapshot; `None` until the match has finished
    pub fn from_snapshot(session: &SessionHandle, mode: GameMode, snapshot: &Snapshot) -> Option<Self> {
        if snapshot.clock.status() != MatchStatus::Finished {
            return None;
        }
        let player_one_score = snapshot.player_one.score;
        let player_two_score = snapshot.player_two.score;
        Some(Self {
            user_id: session.user_id.clone(),
            mode,
            player_one_score,
            player_two_score,
            outcome: MatchOutcome::from_scores(player_one_score, player_two_score),
            ticks_played: snapshot.tick,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("1v1".parse::<GameMode>().unwrap(), GameMode::OneVsOne);
        assert_eq!("3V3".parse::<GameMode>().unwrap(), GameMode::ThreeVsThree);
        assert_eq!("Online".parse::<GameMode>().unwrap(), GameMode::Online);
        assert!(matches!(
            "team".parse::<GameMode>(),
            Err(SettingsError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&GameMode::OneVsOne).unwrap(), "\"1v1\"");
        assert_eq!(
            serde_json::from_str::<GameMode>("\"online\"").unwrap(),
            GameMode::Online
        );
        assert_eq!(GameMode::ThreeVsThree.to_string(), "3v3");
    }

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(MatchOutcome::from_scores(3, 1), MatchOutcome::PlayerOneWins);
        assert_eq!(MatchOutcome::from_scores(0, 2), MatchOutcome::PlayerTwoWins);
        assert_eq!(MatchOutcome::from_scores(4, 4), MatchOutcome::Draw);
    }

    #[test]
    fn test_access_error_message() {
        assert_eq!(AccessError::LoginRequired.to_string(), "login required");
    }
}
