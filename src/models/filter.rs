//! PoolFilterConfig: which players are eligible to be a round's target.

use crate::models::error::GameError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Draft-year cutoffs offered to the user (plus "no cutoff").
pub const DRAFT_YEAR_CUTOFFS: [i64; 4] = [1980, 2000, 2010, 2020];

/// Allowed values for the top-X bound.
pub const TOP_X_RANGE: RangeInclusive<usize> = 1..=2000;

pub const DEFAULT_TOP_X: usize = 100;

/// Filter settings for the active pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolFilterConfig {
    /// Keep players drafted in or after this year. `None` disables the filter.
    #[serde(default)]
    pub draft_year_cutoff: Option<i64>,
    #[serde(default)]
    pub top_x_enabled: bool,
    /// Keep only the first `top_x` players by PTS+REB+AST (when enabled).
    #[serde(default = "default_top_x")]
    pub top_x: usize,
}

fn default_top_x() -> usize {
    DEFAULT_TOP_X
}

impl Default for PoolFilterConfig {
    fn default() -> Self {
        Self {
            draft_year_cutoff: None,
            top_x_enabled: false,
            top_x: DEFAULT_TOP_X,
        }
    }
}

impl PoolFilterConfig {
    /// Check the config against the selectable cutoffs and the top-X range.
    pub fn validate(&self) -> Result<(), GameError> {
        if let Some(cutoff) = self.draft_year_cutoff {
            if !DRAFT_YEAR_CUTOFFS.contains(&cutoff) {
                return Err(GameError::InvalidFilter {
                    field: "draftYearCutoff",
                    message: format!("{} is not one of {:?}", cutoff, DRAFT_YEAR_CUTOFFS),
                });
            }
        }
        if !TOP_X_RANGE.contains(&self.top_x) {
            return Err(GameError::InvalidFilter {
                field: "topX",
                message: format!(
                    "{} is outside {}..={}",
                    self.top_x,
                    TOP_X_RANGE.start(),
                    TOP_X_RANGE.end()
                ),
            });
        }
        Ok(())
    }
}
