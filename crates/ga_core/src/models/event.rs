use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::pitch::PitchPoint;
use super::qualifier::Qualifier;

/// Team identifier from the event provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Home/away side, serialized as the `h`/`a` codes of the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Venue {
    #[serde(rename = "h")]
    Home,
    #[serde(rename = "a")]
    Away,
}

impl Venue {
    pub fn code(self) -> char {
        match self {
            Venue::Home => 'h',
            Venue::Away => 'a',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Venue::Home => "home",
            Venue::Away => "away",
        }
    }
}

/// Event kind (`type_name` column).
///
/// Kinds the pipelines branch on get their own variant; everything else is
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Pass,
    TakeOn,
    Card,
    SubstitutionOn,
    SubstitutionOff,
    Tackle,
    Interception,
    BlockedPass,
    Clearance,
    Aerial,
    Goal,
    SavedShot,
    MissedShots,
    ShotOnPost,
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Pass => "Pass",
            EventType::TakeOn => "TakeOn",
            EventType::Card => "Card",
            EventType::SubstitutionOn => "SubstitutionOn",
            EventType::SubstitutionOff => "SubstitutionOff",
            EventType::Tackle => "Tackle",
            EventType::Interception => "Interception",
            EventType::BlockedPass => "BlockedPass",
            EventType::Clearance => "Clearance",
            EventType::Aerial => "Aerial",
            EventType::Goal => "Goal",
            EventType::SavedShot => "SavedShot",
            EventType::MissedShots => "MissedShots",
            EventType::ShotOnPost => "ShotOnPost",
            EventType::Other(name) => name,
        }
    }

}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        match name.trim() {
            "Pass" => EventType::Pass,
            "TakeOn" => EventType::TakeOn,
            "Card" => EventType::Card,
            "SubstitutionOn" => EventType::SubstitutionOn,
            "SubstitutionOff" => EventType::SubstitutionOff,
            "Tackle" => EventType::Tackle,
            "Interception" => EventType::Interception,
            "BlockedPass" => EventType::BlockedPass,
            "Clearance" => EventType::Clearance,
            "Aerial" => EventType::Aerial,
            "Goal" => EventType::Goal,
            "SavedShot" => EventType::SavedShot,
            "MissedShots" => EventType::MissedShots,
            "ShotOnPost" => EventType::ShotOnPost,
            other => EventType::Other(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        EventType::from(name.as_str())
    }
}

impl From<EventType> for String {
    fn from(kind: EventType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card severity derived from a `Card` event's qualifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Yellow,
    SecondYellow,
    Red,
}

impl CardType {
    /// Red or second yellow: the player leaves the pitch.
    pub fn is_dismissal(self) -> bool {
        matches!(self, CardType::Red | CardType::SecondYellow)
    }
}

/// A preprocessed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub team_id: TeamId,
    pub team_name: String,
    pub venue: Venue,
    pub player_id: Option<u64>,
    pub player_name: Option<String>,
    pub event_type: EventType,
    pub minute: u32,
    pub x: f64,
    pub y: f64,
    pub end_x: Option<f64>,
    pub end_y: Option<f64>,
    pub outcome: Option<bool>,
    pub qualifiers: Vec<Qualifier>,
    pub card_type: Option<CardType>,
    /// Heuristic possession value; 0 for anything but passes
    pub xt_added: f64,
}

impl Event {
    pub fn location(&self) -> PitchPoint {
        PitchPoint::new(self.x, self.y)
    }

    pub fn end_location(&self) -> Option<PitchPoint> {
        match (self.end_x, self.end_y) {
            (Some(x), Some(y)) => Some(PitchPoint::new(x, y)),
            _ => None,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.outcome == Some(true)
    }

    pub fn is_pass(&self) -> bool {
        self.event_type == EventType::Pass
    }
}

/// A participating club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub team_id: TeamId,
    pub name: String,
}

/// Match-level metadata handed to the presentation layer with every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchContext {
    pub league: Option<String>,
    /// Free-text match title from the source data
    pub game: String,
    /// Score with `:` replaced by `-`
    pub score: String,
    pub date: Option<NaiveDate>,
    pub home: TeamRef,
    pub away: TeamRef,
    /// Last minute on the match clock (stoppage time included)
    pub max_minute: u32,
}

impl MatchContext {
    pub fn team(&self, team_id: TeamId) -> Option<&TeamRef> {
        if self.home.team_id == team_id {
            Some(&self.home)
        } else if self.away.team_id == team_id {
            Some(&self.away)
        } else {
            None
        }
    }

    pub fn venue_of(&self, team_id: TeamId) -> Option<Venue> {
        if self.home.team_id == team_id {
            Some(Venue::Home)
        } else if self.away.team_id == team_id {
            Some(Venue::Away)
        } else {
            None
        }
    }

    /// "Home 2-1 Away" headline.
    pub fn headline(&self) -> String {
        format!("{} {} {}", self.home.name, self.score, self.away.name)
    }
}
