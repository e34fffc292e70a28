//! Data structures for the guessing game: player records, filters, round state.

mod error;
mod filter;
mod player;
mod round;

pub use error::GameError;
pub use filter::{PoolFilterConfig, DEFAULT_TOP_X, DRAFT_YEAR_CUTOFFS, TOP_X_RANGE};
pub use player::{
    format_stat, normalize_answer, ClueValue, OrderedMap, PlayerRecord, StatValue,
    COMBINED_STAT_LABELS, DRAFT_YEAR_CLUE,
};
pub use round::{AverageScore, Outcome, RoundState, MAX_CLUE_INDEX, SCORE_TABLE};
