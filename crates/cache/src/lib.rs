//! Disk cache for the enriched game library.
//!
//! One JSON document per library, stored as `library_cache.json` in the
//! data directory: `{ "fetchedAt": ..., "games": [...] }`. A read returns
//! `None` once the entry is older than the TTL (24 hours by default), so a
//! refresh can short-circuit the upstream calls while the cache is fresh.
//!
//! Reads and writes are not synchronized against each other; two
//! concurrent refreshes can race on the file. Last writer wins.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use gamestringer_types::LibraryGame;

/// Cache file name inside the data directory.
const CACHE_FILE: &str = "library_cache.json";

/// Default freshness window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Errors from cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The cached library together with its fetch timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedLibrary {
    pub fetched_at: DateTime<Utc>,
    pub games: Vec<LibraryGame>,
}

/// Reads the cached library, honoring the TTL.
///
/// Returns `None` when the file is missing, unparsable (logged and treated
/// as a miss), or older than `ttl`.
pub fn read_cache(data_dir: &Path, ttl: Duration) -> Result<Option<CachedLibrary>, CacheError> {
    read_cache_at(data_dir, ttl, Utc::now())
}

/// Writes the library to the cache, stamping the current time.
pub fn write_cache(data_dir: &Path, games: &[LibraryGame]) -> Result<(), CacheError> {
    write_cache_at(data_dir, games, Utc::now())
}

/// Removes the cache file if present.
pub fn clear_cache(data_dir: &Path) -> Result<(), CacheError> {
    match std::fs::remove_file(cache_path(data_dir)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn cache_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CACHE_FILE)
}

// ---------------------------------------------------------------------------
// Internal functions taking an explicit "now" (testable).
// ---------------------------------------------------------------------------

fn read_cache_at(
    data_dir: &Path,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<Option<CachedLibrary>, CacheError> {
    let path = cache_path(data_dir);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let cached: CachedLibrary = match serde_json::from_str(&content) {
        Ok(cached) => cached,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "discarding unparsable cache file");
            return Ok(None);
        }
    };

    let age = now.signed_duration_since(cached.fetched_at);
    if age.num_seconds() < 0 || age.to_std().map(|a| a > ttl).unwrap_or(true) {
        return Ok(None);
    }

    Ok(Some(cached))
}

fn write_cache_at(
    data_dir: &Path,
    games: &[LibraryGame],
    now: DateTime<Utc>,
) -> Result<(), CacheError> {
    std::fs::create_dir_all(data_dir)?;
    let cached = CachedLibrary {
        fetched_at: now,
        games: games.to_vec(),
    };
    let json = serde_json::to_string_pretty(&cached)?;
    std::fs::write(cache_path(data_dir), json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn sample_games() -> Vec<LibraryGame> {
        vec![
            LibraryGame::minimal(620, "Portal 2"),
            LibraryGame::minimal(440, "Team Fortress 2"),
        ]
    }

    #[test]
    fn missing_file_is_a_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let cached = read_cache(tmp.path(), DEFAULT_TTL).unwrap();
        assert!(cached.is_none());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        write_cache(tmp.path(), &sample_games()).unwrap();

        let cached = read_cache(tmp.path(), DEFAULT_TTL).unwrap().unwrap();
        assert_eq!(cached.games.len(), 2);
        assert_eq!(cached.games[0].app_id, 620);
    }

    #[test]
    fn stale_entry_is_a_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let now = Utc::now();
        write_cache_at(tmp.path(), &sample_games(), now).unwrap();

        let later = now + TimeDelta::hours(25);
        let cached = read_cache_at(tmp.path(), DEFAULT_TTL, later).unwrap();
        assert!(cached.is_none());
    }

    #[test]
    fn entry_just_inside_ttl_is_a_hit() {
        let tmp = tempfile::tempdir().unwrap();
        let now = Utc::now();
        write_cache_at(tmp.path(), &sample_games(), now).unwrap();

        let later = now + TimeDelta::hours(23);
        let cached = read_cache_at(tmp.path(), DEFAULT_TTL, later).unwrap();
        assert!(cached.is_some());
    }

    #[test]
    fn rewrite_refreshes_the_stamp() {
        let tmp = tempfile::tempdir().unwrap();
        let old = Utc::now() - TimeDelta::hours(30);
        write_cache_at(tmp.path(), &sample_games(), old).unwrap();
        assert!(read_cache(tmp.path(), DEFAULT_TTL).unwrap().is_none());

        write_cache(tmp.path(), &sample_games()).unwrap();
        assert!(read_cache(tmp.path(), DEFAULT_TTL).unwrap().is_some());
    }

    #[test]
    fn unparsable_file_is_a_miss() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(CACHE_FILE), "{ not json").unwrap();
        let cached = read_cache(tmp.path(), DEFAULT_TTL).unwrap();
        assert!(cached.is_none());
    }

    #[test]
    fn future_stamp_is_a_miss() {
        let tmp = tempfile::tempdir().unwrap();
        let future = Utc::now() + TimeDelta::hours(1);
        write_cache_at(tmp.path(), &sample_games(), future).unwrap();
        let cached = read_cache(tmp.path(), DEFAULT_TTL).unwrap();
        assert!(cached.is_none());
    }

    #[test]
    fn clear_removes_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        write_cache(tmp.path(), &sample_games()).unwrap();
        clear_cache(tmp.path()).unwrap();
        assert!(read_cache(tmp.path(), DEFAULT_TTL).unwrap().is_none());
        // Clearing twice is fine.
        clear_cache(tmp.path()).unwrap();
    }
}
