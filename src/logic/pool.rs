//! Pool manager: full player list -> active candidate pool.

use crate::models::{GameError, PlayerRecord, PoolFilterConfig};

/// Why the active pool was recomputed. Returned by every [`PoolManager`] mutation
/// so the owner can notify the round engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolChange {
    /// A fresh dataset replaced the previous one.
    Reloaded,
    /// Same dataset, new filter settings.
    Refiltered,
}

/// Owns the full dataset and the filtered active pool derived from it.
#[derive(Clone, Debug, Default)]
pub struct PoolManager {
    players: Vec<PlayerRecord>,
    filter: PoolFilterConfig,
    active: Vec<PlayerRecord>,
}

impl PoolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the dataset. An empty list leaves an empty pool.
    pub fn set_players(&mut self, players: Vec<PlayerRecord>) -> PoolChange {
        self.players = players;
        self.recompute();
        PoolChange::Reloaded
    }

    /// Replace the filter settings. Invalid settings are rejected and the pool is left as is.
    pub fn set_filter(&mut self, config: PoolFilterConfig) -> Result<PoolChange, GameError> {
        config.validate()?;
        self.filter = config;
        self.recompute();
        Ok(PoolChange::Refiltered)
    }

    pub fn active_pool(&self) -> &[PlayerRecord] {
        &self.active
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn filter(&self) -> &PoolFilterConfig {
        &self.filter
    }

    fn recompute(&mut self) {
        self.active = apply_filter(&self.players, &self.filter);
        log::debug!(
            "Active pool recomputed: {} of {} players ({:?})",
            self.active.len(),
            self.players.len(),
            self.filter
        );
    }
}

/// Derive the active pool from `players` under `config`.
///
/// 1. Drop malformed records (blank last name or no stats).
/// 2. Draft-year cutoff: keep records with `draftYear >= cutoff`; records without one are dropped.
/// 3. Top-X: stable sort by PTS+REB+AST descending, keep the first `top_x`.
pub fn apply_filter(players: &[PlayerRecord], config: &PoolFilterConfig) -> Vec<PlayerRecord> {
    let mut pool: Vec<PlayerRecord> = players
        .iter()
        .filter(|p| p.is_well_formed())
        .filter(|p| match config.draft_year_cutoff {
            Some(cutoff) => p.draft_year().is_some_and(|year| year >= cutoff),
            None => true,
        })
        .cloned()
        .collect();

    if config.top_x_enabled {
        // sort_by is stable: ties keep dataset order
        pool.sort_by(|a, b| b.combined_score().total_cmp(&a.combined_score()));
        pool.truncate(config.top_x);
    }

    pool
}
