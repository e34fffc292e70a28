//! Game: pool manager + round engine + dataset load status, and the view the UI renders.

use crate::logic::pool::{PoolChange, PoolManager};
use crate::logic::round::RoundEngine;
use crate::models::{
    format_stat, AverageScore, GameError, Outcome, PlayerRecord, PoolFilterConfig, RoundState,
};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

/// Where the one-shot dataset load stands.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    /// Load finished but returned no players.
    Empty,
    Failed(String),
}

/// One game session. Pool changes are forwarded to the round engine here.
#[derive(Clone, Debug)]
pub struct Game<R = StdRng> {
    status: LoadStatus,
    pool: PoolManager,
    engine: RoundEngine<R>,
}

impl Game<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(RoundEngine::seeded(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(RoundEngine::from_entropy())
    }
}

impl<R: Rng> Game<R> {
    pub fn new(engine: RoundEngine<R>) -> Self {
        Self {
            status: LoadStatus::Loading,
            pool: PoolManager::new(),
            engine,
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn pool(&self) -> &PoolManager {
        &self.pool
    }

    pub fn round(&self) -> &RoundState {
        self.engine.state()
    }

    /// Deliver the dataset. Draws the first target when the filtered pool allows it.
    pub fn load_players(&mut self, players: Vec<PlayerRecord>) -> Result<(), GameError> {
        if players.is_empty() {
            log::warn!("Player dataset is empty");
            self.status = LoadStatus::Empty;
            self.pool.set_players(players);
            self.engine.clear_target();
            return Err(GameError::NoDataAvailable);
        }
        log::info!("Loaded {} players", players.len());
        self.status = LoadStatus::Ready;
        let change = self.pool.set_players(players);
        self.notify(change)
    }

    /// Record a failed dataset load. Any earlier dataset and its target are
    /// dropped; round operations stay unavailable until a good load arrives.
    pub fn load_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::error!("Player dataset failed to load: {}", reason);
        self.status = LoadStatus::Failed(reason);
        self.pool.set_players(Vec::new());
        self.engine.clear_target();
    }

    /// Change the filters. The new config is kept even when the resulting pool is
    /// empty; that case returns `EmptyPool` so the caller can ask to relax them.
    pub fn set_filter(&mut self, config: PoolFilterConfig) -> Result<(), GameError> {
        let change = self.pool.set_filter(config)?;
        if self.has_data() {
            self.notify(change)
        } else {
            Ok(())
        }
    }

    /// Ignored (current outcome returned) while there is no data.
    pub fn submit_guess(&mut self, text: &str) -> Outcome {
        if !self.has_data() {
            return self.engine.state().outcome;
        }
        self.engine.submit_guess(text)
    }

    pub fn set_guess_text(&mut self, text: impl Into<String>) {
        self.engine.set_guess_text(text);
    }

    pub fn reveal_clue(&mut self) -> bool {
        self.has_data() && self.engine.reveal_clue()
    }

    pub fn next_round(&mut self) -> Result<(), GameError> {
        self.ensure_data()?;
        self.engine.next_round(self.pool.active_pool()).map(|_| ())
    }

    /// Full restart: counters back to zero and a fresh target.
    pub fn restart(&mut self) -> Result<(), GameError> {
        self.ensure_data()?;
        self.engine.restart(self.pool.active_pool())
    }

    pub fn average_score(&self) -> AverageScore {
        self.engine.average_score()
    }

    pub fn has_data(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    fn ensure_data(&self) -> Result<(), GameError> {
        if self.has_data() {
            Ok(())
        } else {
            Err(GameError::NoDataAvailable)
        }
    }

    fn notify(&mut self, change: PoolChange) -> Result<(), GameError> {
        self.engine.on_pool_changed(self.pool.active_pool(), change)
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> GameView {
        let round = self.engine.state();
        GameView {
            status: self.status.clone(),
            pool_size: self.pool.active_pool().len(),
            total_players: self.pool.players().len(),
            filter: self.pool.filter().clone(),
            target: round.target.as_ref().map(|t| TargetView::new(t, round)),
            guess_text: round.guess_text.clone(),
            clue_index: round.clue_index,
            points_available: round.points_available(),
            outcome: round.outcome,
            wrong_guesses: round.wrong_guesses.clone(),
            total_points: round.total_points,
            rounds_played: round.rounds_played,
            average_score: self.average_score(),
        }
    }
}

/// A label with its display value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

/// What the player may see of the target.
///
/// Stats are always shown. While the round is pending only the first
/// `clue_index` clues are unlocked and the name is hidden; once it is over every
/// clue and the full name are revealed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetView {
    pub name: Option<String>,
    pub stats: Vec<Fact>,
    pub clues: Vec<Fact>,
    pub clues_total: usize,
}

impl TargetView {
    fn new(target: &PlayerRecord, round: &RoundState) -> Self {
        let finished = !round.outcome.is_pending();
        let unlocked = if finished {
            target.clues.len()
        } else {
            round.clue_index
        };
        let stats = target
            .stats
            .iter()
            .flat_map(|s| s.iter())
            .map(|(label, value)| Fact {
                label: label.to_string(),
                value: format_stat(*value),
            })
            .collect();
        let clues = target
            .clues
            .iter()
            .take(unlocked)
            .map(|(label, value)| Fact {
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect();
        Self {
            name: finished.then(|| target.name.clone()),
            stats,
            clues,
            clues_total: target.clues.len(),
        }
    }
}

/// Serializable snapshot of a game session.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub status: LoadStatus,
    pub pool_size: usize,
    pub total_players: usize,
    pub filter: PoolFilterConfig,
    pub target: Option<TargetView>,
    pub guess_text: String,
    pub clue_index: usize,
    pub points_available: u32,
    pub outcome: Outcome,
    pub wrong_guesses: Vec<String>,
    pub total_points: u32,
    pub rounds_played: u32,
    pub average_score: AverageScore,
}
