//! PlayerRecord and the ordered label/value maps used for stats and clues.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A career statistic value; `None` when the source has no number for it.
pub type StatValue = Option<f64>;

/// Stat labels summed for the top-X ranking.
pub const COMBINED_STAT_LABELS: [&str; 3] = ["PTS", "REB", "AST"];

/// Clue label holding the draft year (used by the draft-year filter).
pub const DRAFT_YEAR_CLUE: &str = "draftYear";

/// Label -> value pairs kept in declaration order.
///
/// Reveal order of clues and display order of stats both come from the order
/// the labels appear in the source document, so this is a plain list rather
/// than a hash map.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced label keeps its original position.
    pub fn insert(&mut self, label: impl Into<String>, value: V) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (label, value) in iter {
            map.insert(label, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedMap<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of labels to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap {
                    entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
                };
                while let Some((label, value)) = access.next_entry::<String, V>()? {
                    map.insert(label, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// One clue fact: a number (years, picks), text (teams, colleges), a flag, or nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClueValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Missing,
}

impl ClueValue {
    /// Integer view of the clue; numeric strings such as `"2003"` count.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ClueValue::Number(n) if n.fract() == 0.0 => Some(*n as i64),
            ClueValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for ClueValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClueValue::Number(n) => write!(f, "{}", format_number(*n)),
            ClueValue::Text(s) => write!(f, "{}", s),
            ClueValue::Flag(b) => write!(f, "{}", if *b { "Yes" } else { "No" }),
            ClueValue::Missing => write!(f, "N/A"),
        }
    }
}

impl From<i32> for ClueValue {
    fn from(n: i32) -> Self {
        ClueValue::Number(f64::from(n))
    }
}

impl From<f64> for ClueValue {
    fn from(n: f64) -> Self {
        ClueValue::Number(n)
    }
}

impl From<&str> for ClueValue {
    fn from(s: &str) -> Self {
        ClueValue::Text(s.to_string())
    }
}

impl From<String> for ClueValue {
    fn from(s: String) -> Self {
        ClueValue::Text(s)
    }
}

impl From<bool> for ClueValue {
    fn from(b: bool) -> Self {
        ClueValue::Flag(b)
    }
}

/// Display form of a stat: `N/A` when missing.
pub fn format_stat(value: StatValue) -> String {
    match value {
        Some(n) => format_number(n),
        None => "N/A".to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Case-fold and trim for answer comparison.
pub fn normalize_answer(text: &str) -> String {
    text.trim().to_lowercase()
}

/// One player in the dataset.
///
/// `last_name` and `stats` default when absent so that a broken record still
/// decodes; such records are dropped by the pool filter (see [`PlayerRecord::is_well_formed`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    #[serde(default)]
    pub name: String,
    /// Answer key, compared case-insensitively after trimming.
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub stats: Option<OrderedMap<StatValue>>,
    #[serde(default)]
    pub clues: OrderedMap<ClueValue>,
}

impl PlayerRecord {
    /// Create a record with no stats table yet. Add stats with [`PlayerRecord::with_stat`].
    pub fn new(name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_name: last_name.into(),
            stats: None,
            clues: OrderedMap::new(),
        }
    }

    pub fn with_stat(mut self, label: impl Into<String>, value: StatValue) -> Self {
        self.stats
            .get_or_insert_with(OrderedMap::new)
            .insert(label, value);
        self
    }

    pub fn with_clue(mut self, label: impl Into<String>, value: impl Into<ClueValue>) -> Self {
        self.clues.insert(label, value.into());
        self
    }

    /// A usable record has a non-blank answer key and a stats table.
    pub fn is_well_formed(&self) -> bool {
        !self.last_name.trim().is_empty() && self.stats.is_some()
    }

    /// Stat value by label; `None` if the label or the stats table is missing, or the value is null.
    pub fn stat(&self, label: &str) -> StatValue {
        self.stats.as_ref().and_then(|s| s.get(label).copied().flatten())
    }

    /// PTS + REB + AST with missing values counted as 0.
    pub fn combined_score(&self) -> f64 {
        COMBINED_STAT_LABELS
            .iter()
            .map(|label| self.stat(label).unwrap_or(0.0))
            .sum()
    }

    pub fn draft_year(&self) -> Option<i64> {
        self.clues.get(DRAFT_YEAR_CLUE).and_then(ClueValue::as_integer)
    }

    /// True when `guess` names this player (trimmed, case-insensitive last name).
    pub fn matches_guess(&self, guess: &str) -> bool {
        normalize_answer(guess) == normalize_answer(&self.last_name)
    }
}
