//! RoundState, Outcome and the score table.

use crate::models::player::PlayerRecord;
use serde::{Serialize, Serializer};
use std::fmt;

/// Points for a correct guess, indexed by clues revealed before it.
pub const SCORE_TABLE: [u32; 4] = [10, 5, 3, 1];

/// Highest clue index; a wrong guess here ends the round.
pub const MAX_CLUE_INDEX: usize = SCORE_TABLE.len() - 1;

/// Result of the current round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Pending,
    Won {
        #[serde(rename = "pointsAwarded")]
        points_awarded: u32,
    },
    Lost,
}

impl Outcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }

    /// Points this outcome contributed (0 for pending or lost).
    pub fn points_awarded(&self) -> u32 {
        match self {
            Outcome::Won { points_awarded } => *points_awarded,
            Outcome::Pending | Outcome::Lost => 0,
        }
    }
}

/// Per-round state plus the session counters.
///
/// `target`, `guess_text`, `clue_index`, `outcome` and `wrong_guesses` are reset
/// on every new round; `total_points` and `rounds_played` are not.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundState {
    /// `None` only before the first round has been drawn.
    pub target: Option<PlayerRecord>,
    pub guess_text: String,
    /// Clues revealed beyond the base stats (0..=MAX_CLUE_INDEX).
    pub clue_index: usize,
    pub outcome: Outcome,
    /// Wrong guesses submitted this round, in order.
    pub wrong_guesses: Vec<String>,
    pub total_points: u32,
    pub rounds_played: u32,
}

impl RoundState {
    /// Clear the per-round fields for a new target. Session counters are kept.
    pub fn reset_for(&mut self, target: Option<PlayerRecord>) {
        self.target = target;
        self.guess_text.clear();
        self.clue_index = 0;
        self.outcome = Outcome::Pending;
        self.wrong_guesses.clear();
    }

    /// Points a correct guess would earn right now.
    pub fn points_available(&self) -> u32 {
        SCORE_TABLE[self.clue_index.min(MAX_CLUE_INDEX)]
    }

    pub fn average_score(&self) -> AverageScore {
        AverageScore::from_totals(self.total_points, self.rounds_played)
    }
}

/// Average points per completed round, or no data before the first one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AverageScore {
    NoData,
    Points(f64),
}

impl AverageScore {
    /// `total / rounds` rounded to two decimals.
    pub fn from_totals(total_points: u32, rounds_played: u32) -> Self {
        if rounds_played == 0 {
            return AverageScore::NoData;
        }
        let avg = f64::from(total_points) / f64::from(rounds_played);
        AverageScore::Points((avg * 100.0).round() / 100.0)
    }
}

impl fmt::Display for AverageScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageScore::NoData => write!(f, "-"),
            AverageScore::Points(avg) => write!(f, "{:.2}", avg),
        }
    }
}

impl Serialize for AverageScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AverageScore::NoData => serializer.serialize_str("-"),
            AverageScore::Points(avg) => serializer.serialize_f64(*avg),
        }
    }
}
