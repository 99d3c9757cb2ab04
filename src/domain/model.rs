use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One mapping-file entry. Every field is optional; an absent field leaves the
/// card untouched while `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Kept as raw JSON so a malformed value only skips its own record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,
    /// Older mapping files call the position `index`; `position` wins when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<Value>,
    #[serde(
        default,
        rename = "title_match",
        alias = "titleKey",
        skip_serializing_if = "Option::is_none"
    )]
    pub title_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A record's position after parsing the raw JSON value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionKey {
    Number(i64),
    Invalid(String),
}

impl UpdateRecord {
    /// `position`, else `index`. Integers, integral floats and integer strings
    /// (`"2"`) parse; anything else is `Invalid` with the raw JSON text.
    pub fn resolved_position(&self) -> Option<PositionKey> {
        let raw = self.position.as_ref().or(self.index.as_ref())?;
        Some(parse_position(raw))
    }

    /// Lookup key for title mode: `title_match` first, then `title`.
    /// Empty strings do not count as a key.
    pub fn match_key(&self) -> Option<&str> {
        self.title_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.title.as_deref().filter(|k| !k.trim().is_empty()))
    }
}

fn parse_position(raw: &Value) -> PositionKey {
    let parsed = match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f))
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match parsed {
        Some(position) => PositionKey::Number(position),
        None => PositionKey::Invalid(raw.to_string()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingFile {
    #[serde(default)]
    pub items: Vec<UpdateRecord>,
}

impl MappingFile {
    pub fn from_json_str(content: &str) -> crate::utils::error::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Resolve records by 1-based gallery order.
    #[default]
    #[value(alias = "index")]
    Position,
    /// Resolve records by the card's current title text.
    Title,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Position => write!(f, "position"),
            MatchMode::Title => write!(f, "title"),
        }
    }
}

/// A record that could not be resolved to a card and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyWarning {
    PositionOutOfBounds { position: i64, card_count: usize },
    InvalidPosition { raw: String },
    MissingPosition,
    MissingTitleKey,
    UnmatchedTitle { key: String },
}

impl fmt::Display for ApplyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyWarning::PositionOutOfBounds {
                position,
                card_count,
            } => write!(
                f,
                "position {} is out of bounds (1..{}) - skipping",
                position, card_count
            ),
            ApplyWarning::InvalidPosition { raw } => {
                write!(f, "position {} is not a positive integer - skipping", raw)
            }
            ApplyWarning::MissingPosition => write!(f, "record has no position - skipping"),
            ApplyWarning::MissingTitleKey => write!(
                f,
                "skipping record without title/title_match for title matching mode"
            ),
            ApplyWarning::UnmatchedTitle { key } => {
                write!(f, "no gallery card matched title \"{}\"", key)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub cards_found: usize,
    pub applied: usize,
    pub warnings: Vec<ApplyWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub backup_path: Option<String>,
    pub written: bool,
    pub report: ApplyReport,
}
