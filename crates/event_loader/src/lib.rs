//! Event Loader Library
//!
//! League CSV → `RawEvent` rows, cached per league
//! LeagueEvents → MessagePack → LZ4 snapshot with SHA256 checksum
//! Club logo lookup for the presentation layer

pub mod assets;
pub mod league_events;
pub mod snapshot;
pub mod store;

pub use assets::{league_logo_code, ClubAssetResolver, FuzzyLogoResolver};
pub use league_events::{league_csv_path, load_league_csv, LeagueEvents, ParseStats};
pub use snapshot::{build_snapshot, load_snapshot, verify_snapshot, SnapshotMetadata, SNAPSHOT_SCHEMA};
pub use store::LeagueStore;
