//! # Models
//!
//! Event-log data model shared by every pipeline.
//!
//! - `raw` - input rows as they arrive from a league export
//! - `event` - normalized events produced by the preprocessor
//! - `qualifier` - structured qualifier tags and their parser
//! - `pitch` - coordinates on the 0-100 normalized pitch
//! - `window` - minute window selected by the user

pub mod event;
pub mod pitch;
pub mod qualifier;
pub mod raw;
pub mod window;

pub use event::{CardType, Event, EventType, MatchContext, TeamId, TeamRef, Venue};
pub use pitch::{PitchPoint, PITCH_EXTENT};
pub use qualifier::{parse_qualifiers, Qualifier};
pub use raw::RawEvent;
pub use window::MinuteWindow;
