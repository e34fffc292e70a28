//! Guess-the-player trivia: library with models and game logic.

pub mod logic;
pub mod models;

pub use logic::{
    apply_filter, parse_players, Fact, Game, GameView, LoadStatus, PoolChange, PoolManager,
    RoundEngine, TargetView,
};
pub use models::{
    format_stat, normalize_answer, AverageScore, ClueValue, GameError, OrderedMap, Outcome,
    PlayerRecord, PoolFilterConfig, RoundState, StatValue, DRAFT_YEAR_CUTOFFS, MAX_CLUE_INDEX,
    SCORE_TABLE, TOP_X_RANGE,
};
