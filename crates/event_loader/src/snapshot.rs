//! League snapshots
//!
//! LeagueEvents → MessagePack → LZ4 (size prepended), with a SHA256 checksum
//! of the compressed bytes. Loading a snapshot skips CSV parsing entirely.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use ga_core::RawEvent;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::league_events::LeagueEvents;

/// Snapshot layout version; bumped when `RawEvent` changes shape.
pub const SNAPSHOT_SCHEMA: &str = "v1";

/// Snapshot metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub schema_version: String,
    pub league: String,
    pub events: usize,
    /// SHA256 of the compressed file (hex)
    pub checksum: String,
    /// RFC3339
    pub created_at: String,
    /// MessagePack size before compression (bytes)
    pub original_size: u64,
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
}

#[derive(Serialize, Deserialize)]
struct SnapshotPayload {
    schema_version: String,
    league: String,
    events: Vec<RawEvent>,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Write `league` to `output` as a compressed snapshot.
pub fn build_snapshot(league: &LeagueEvents, output: &Path) -> Result<SnapshotMetadata> {
    let payload = SnapshotPayload {
        schema_version: SNAPSHOT_SCHEMA.to_string(),
        league: league.league.clone(),
        events: league.events.clone(),
    };

    let msgpack_bytes =
        rmp_serde::to_vec_named(&payload).context("Failed to serialize to MessagePack")?;
    let original_size = msgpack_bytes.len() as u64;

    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);
    let compressed_size = compressed.len() as u64;
    let checksum = sha256_hex(&compressed);

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(output, &compressed)
        .with_context(|| format!("Failed to write snapshot: {}", output.display()))?;

    info!(
        league = %league.league,
        events = league.len(),
        compressed_size,
        "snapshot written"
    );

    Ok(SnapshotMetadata {
        schema_version: SNAPSHOT_SCHEMA.to_string(),
        league: league.league.clone(),
        events: league.len(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio: compressed_size as f64 / original_size.max(1) as f64,
    })
}

/// Whether the file's SHA256 matches `expected_checksum`.
pub fn verify_snapshot(path: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    Ok(sha256_hex(&bytes).eq_ignore_ascii_case(expected_checksum.trim()))
}

pub fn load_snapshot(path: &Path) -> Result<LeagueEvents> {
    let compressed =
        fs::read(path).with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let msgpack_bytes =
        lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;
    let payload: SnapshotPayload =
        rmp_serde::from_slice(&msgpack_bytes).context("Failed to deserialize MessagePack")?;

    if payload.schema_version != SNAPSHOT_SCHEMA {
        bail!(
            "Snapshot schema {} is not supported (expected {})",
            payload.schema_version,
            SNAPSHOT_SCHEMA
        );
    }
    Ok(LeagueEvents::new(&payload.league, payload.events))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_league() -> LeagueEvents {
        let events = (0..200)
            .map(|i| {
                RawEvent::new(if i % 2 == 0 { 26 } else { 32 }, "Pass", i / 3, 50.0, 50.0)
                    .with_player(i as u64 % 11, "Player")
                    .with_outcome(i % 4 != 0)
                    .with_qualifiers("[]")
                    .with_match_info("Home FC-Away FC", "1 - 0", "2024-02-28T20:00:00")
            })
            .collect();
        LeagueEvents::new("Eredivisie", events)
    }

    #[test]
    fn test_build_verify_and_load() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("snapshots/eredivisie.msgpack.lz4");
        let league = sample_league();

        let meta = build_snapshot(&league, &path)?;
        assert_eq!(meta.schema_version, SNAPSHOT_SCHEMA);
        assert_eq!(meta.events, 200);
        assert!(meta.compressed_size < meta.original_size);
        assert!(verify_snapshot(&path, &meta.checksum)?);
        assert!(!verify_snapshot(&path, "deadbeef")?);

        let loaded = load_snapshot(&path)?;
        assert_eq!(loaded.league, "Eredivisie");
        assert_eq!(loaded.events, league.events);
        Ok(())
    }

    #[test]
    fn test_corrupt_snapshot_is_rejected() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.lz4");
        fs::write(&path, b"\x10\x00\x00\x00garbage")?;
        assert!(load_snapshot(&path).is_err());
        Ok(())
    }
}
