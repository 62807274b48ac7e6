//! Input rows as exported per league (one row per on-pitch action).
//!
//! Column names follow the export: `team_id, player_id, player_name,
//! type_name, minute, start_x, start_y, end_x, end_y, outcome, qualifiers,
//! score, date, game, league`. Exports written by dataframe tools store
//! integer ids as floats (`368435.0`) and booleans as `True`/`False`, so those
//! columns go through tolerant deserializers.

use serde::{Deserialize, Deserializer, Serialize};

/// One unprocessed event row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(deserialize_with = "de_team_id")]
    pub team_id: u32,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub player_id: Option<u64>,
    #[serde(default)]
    pub player_name: Option<String>,
    pub type_name: String,
    #[serde(deserialize_with = "de_minute")]
    pub minute: u32,
    pub start_x: f64,
    pub start_y: f64,
    #[serde(default)]
    pub end_x: Option<f64>,
    #[serde(default)]
    pub end_y: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_flag")]
    pub outcome: Option<bool>,
    /// Serialized qualifier list, parsed by the preprocessor.
    #[serde(default)]
    pub qualifiers: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub game: String,
    #[serde(default)]
    pub league: Option<String>,
}

impl RawEvent {
    /// Minimal row used by builders and tests; remaining columns empty.
    pub fn new(team_id: u32, type_name: &str, minute: u32, start_x: f64, start_y: f64) -> Self {
        Self {
            team_id,
            player_id: None,
            player_name: None,
            type_name: type_name.to_string(),
            minute,
            start_x,
            start_y,
            end_x: None,
            end_y: None,
            outcome: None,
            qualifiers: String::new(),
            score: String::new(),
            date: String::new(),
            game: String::new(),
            league: None,
        }
    }

    pub fn with_player(mut self, player_id: u64, player_name: &str) -> Self {
        self.player_id = Some(player_id);
        self.player_name = Some(player_name.to_string());
        self
    }

    pub fn with_outcome(mut self, outcome: bool) -> Self {
        self.outcome = Some(outcome);
        self
    }

    pub fn with_end(mut self, end_x: f64, end_y: f64) -> Self {
        self.end_x = Some(end_x);
        self.end_y = Some(end_y);
        self
    }

    pub fn with_qualifiers(mut self, qualifiers: &str) -> Self {
        self.qualifiers = qualifiers.to_string();
        self
    }

    pub fn with_match_info(mut self, game: &str, score: &str, date: &str) -> Self {
        self.game = game.to_string();
        self.score = score.to_string();
        self.date = date.to_string();
        self
    }
}

/// A single cell as any self-describing format presents it.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Bool(bool),
    Int(u64),
    Float(f64),
    Text(String),
}

impl Cell {
    fn as_integral(&self) -> Option<u64> {
        match self {
            Cell::Int(v) => Some(*v),
            Cell::Float(v) => float_integral(*v),
            Cell::Text(t) => parse_integral(t),
            Cell::Bool(_) => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            Cell::Bool(v) => v.to_string(),
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) => v.to_string(),
            Cell::Text(t) => t.clone(),
        }
    }
}

fn float_integral(v: f64) -> Option<u64> {
    if v.is_finite() && v >= 0.0 && v.fract() == 0.0 {
        Some(v as u64)
    } else {
        None
    }
}

fn parse_integral(text: &str) -> Option<u64> {
    let text = text.trim();
    if let Ok(v) = text.parse::<u64>() {
        return Some(v);
    }
    text.parse::<f64>().ok().and_then(float_integral)
}

fn de_u32<'de, D>(deserializer: D, column: &str) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Cell::deserialize(deserializer)?;
    cell.as_integral()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid {} '{}'", column, cell.describe())))
}

fn de_team_id<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    de_u32(deserializer, "team_id")
}

fn de_minute<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    de_u32(deserializer, "minute")
}

fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(cell) = Option::<Cell>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match &cell {
        Cell::Text(t) if t.trim().is_empty() || t.trim().eq_ignore_ascii_case("nan") => Ok(None),
        Cell::Float(v) if v.is_nan() => Ok(None),
        _ => cell.as_integral().map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid player_id '{}'", cell.describe()))
        }),
    }
}

fn de_opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(cell) = Option::<Cell>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let text = match cell {
        Cell::Bool(v) => return Ok(Some(v)),
        other => other.describe(),
    };
    match text.trim().to_ascii_lowercase().as_str() {
        "" | "nan" | "none" => Ok(None),
        "true" | "1" | "1.0" | "successful" => Ok(Some(true)),
        "false" | "0" | "0.0" | "unsuccessful" => Ok(Some(false)),
        other => Err(serde::de::Error::custom(format!("invalid outcome '{}'", other))),
    }
}
