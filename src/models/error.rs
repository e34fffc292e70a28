//! GameError.

/// Errors reported by the pool and round operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GameError {
    /// No player data yet: still loading, the load failed, or it returned nothing.
    NoDataAvailable,
    /// The current filters leave no eligible players.
    EmptyPool,
    /// A filter setting is outside the allowed values.
    InvalidFilter { field: &'static str, message: String },
    /// The dataset document is not a JSON array of players.
    MalformedData(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::NoDataAvailable => write!(f, "No player data available"),
            GameError::EmptyPool => write!(f, "No players match the current filters"),
            GameError::InvalidFilter { field, message } => {
                write!(f, "Invalid filter `{}`: {}", field, message)
            }
            GameError::MalformedData(reason) => write!(f, "Malformed player data: {}", reason),
        }
    }
}

impl std::error::Error for GameError {}
