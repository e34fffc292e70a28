//! Dataset loading: JSON array of player records.

use crate::models::{GameError, PlayerRecord};
use serde_json::value::RawValue;

/// Parse a JSON array of players.
///
/// The document must be an array; individual elements that do not decode as a
/// player (wrong field types, not an object) are skipped with a warning so one
/// bad entry does not sink the whole load.
pub fn parse_players(json: &str) -> Result<Vec<PlayerRecord>, GameError> {
    // Elements stay raw until decoded one by one; going through `Value` would
    // reorder object keys.
    let items: Vec<Box<RawValue>> =
        serde_json::from_str(json).map_err(|e| GameError::MalformedData(e.to_string()))?;

    let total = items.len();
    let players: Vec<PlayerRecord> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_str::<PlayerRecord>(item.get()) {
            Ok(p) => Some(p),
            Err(e) => {
                log::warn!("skipping malformed player record #{}: {}", i, e);
                None
            }
        })
        .collect();

    log::info!("Parsed {} of {} player records", players.len(), total);
    Ok(players)
}
