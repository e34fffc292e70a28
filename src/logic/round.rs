//! Round engine: target selection, guesses, clue reveals and scoring.

use crate::logic::pool::PoolChange;
use crate::models::{
    AverageScore, GameError, Outcome, PlayerRecord, RoundState, MAX_CLUE_INDEX, SCORE_TABLE,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Round state machine: `Pending` -> `Won` | `Lost` -> (next round) `Pending`.
///
/// The random source is injected so callers can seed it and replay target draws.
#[derive(Clone, Debug)]
pub struct RoundEngine<R = StdRng> {
    state: RoundState,
    rng: R,
}

impl RoundEngine<StdRng> {
    /// Engine with a deterministic random source.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RoundEngine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            state: RoundState::default(),
            rng,
        }
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn target(&self) -> Option<&PlayerRecord> {
        self.state.target.as_ref()
    }

    /// Draw a target uniformly from `pool` and reset the per-round state.
    ///
    /// On an empty pool nothing changes and `EmptyPool` is returned.
    pub fn start_round(&mut self, pool: &[PlayerRecord]) -> Result<&PlayerRecord, GameError> {
        let target = pool
            .choose(&mut self.rng)
            .cloned()
            .ok_or(GameError::EmptyPool)?;
        log::debug!("New round: target drawn from pool of {}", pool.len());
        self.state.reset_for(Some(target));
        self.state.target.as_ref().ok_or(GameError::EmptyPool)
    }

    /// Same as [`RoundEngine::start_round`]; the previous target may be drawn again.
    pub fn next_round(&mut self, pool: &[PlayerRecord]) -> Result<&PlayerRecord, GameError> {
        self.start_round(pool)
    }

    /// Update the input buffer without submitting it.
    pub fn set_guess_text(&mut self, text: impl Into<String>) {
        if self.state.outcome.is_pending() {
            self.state.guess_text = text.into();
        }
    }

    /// Submit whatever is in the input buffer.
    pub fn submit_current_guess(&mut self) -> Outcome {
        let text = std::mem::take(&mut self.state.guess_text);
        self.submit_guess(&text)
    }

    /// Process a guess and return the outcome afterwards.
    ///
    /// A correct guess wins `SCORE_TABLE[clue_index]`. A wrong guess reveals the
    /// next clue, or ends the round as lost once all clues are out. Ignored when the
    /// round is over or no target has been drawn.
    pub fn submit_guess(&mut self, text: &str) -> Outcome {
        let correct = match (&self.state.target, self.state.outcome) {
            (Some(target), Outcome::Pending) => target.matches_guess(text),
            _ => return self.state.outcome,
        };

        if correct {
            let points_awarded = SCORE_TABLE[self.state.clue_index];
            self.state.outcome = Outcome::Won { points_awarded };
            self.state.total_points += points_awarded;
            self.state.rounds_played += 1;
            log::info!(
                "Round won with {} clue(s) revealed: +{} (total {})",
                self.state.clue_index,
                points_awarded,
                self.state.total_points
            );
        } else {
            self.state.wrong_guesses.push(text.trim().to_string());
            if self.state.clue_index < MAX_CLUE_INDEX {
                self.state.clue_index += 1;
            } else {
                self.state.outcome = Outcome::Lost;
                self.state.rounds_played += 1;
                log::info!("Round lost after {} wrong guesses", self.state.wrong_guesses.len());
            }
        }

        self.state.guess_text.clear();
        self.state.outcome
    }

    /// Reveal the next clue without guessing. Returns false when nothing changed.
    pub fn reveal_clue(&mut self) -> bool {
        if self.state.target.is_none()
            || !self.state.outcome.is_pending()
            || self.state.clue_index >= MAX_CLUE_INDEX
        {
            return false;
        }
        self.state.clue_index += 1;
        true
    }

    pub fn average_score(&self) -> AverageScore {
        self.state.average_score()
    }

    /// React to a recomputed active pool.
    ///
    /// Redraws on a reload, when there is no target yet, or when the current target
    /// is no longer in `pool`. A round in progress is abandoned without being
    /// counted. An empty pool clears the target and returns `EmptyPool`.
    pub fn on_pool_changed(
        &mut self,
        pool: &[PlayerRecord],
        change: PoolChange,
    ) -> Result<(), GameError> {
        if pool.is_empty() {
            self.clear_target();
            return Err(GameError::EmptyPool);
        }
        let stale = match &self.state.target {
            Some(target) => change == PoolChange::Reloaded || !pool.contains(target),
            None => true,
        };
        if stale {
            if self.state.outcome.is_pending() && self.state.target.is_some() {
                log::debug!("Abandoning round in progress: target left the active pool");
            }
            self.start_round(pool)?;
        }
        Ok(())
    }

    /// Drop the current target and reset the round; session counters are kept.
    pub fn clear_target(&mut self) {
        if self.state.target.is_some() {
            log::debug!("Clearing target: its pool is gone");
        }
        self.state.reset_for(None);
    }

    /// Zero the session counters and start over with a fresh target.
    pub fn restart(&mut self, pool: &[PlayerRecord]) -> Result<(), GameError> {
        self.state.total_points = 0;
        self.state.rounds_played = 0;
        self.start_round(pool).map(|_| ())
    }
}
