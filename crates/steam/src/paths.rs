use std::path::{Path, PathBuf};

use crate::SteamError;

/// Provides access to Steam directory paths.
pub struct SteamPaths {
    base_dir: PathBuf,
}

impl SteamPaths {
    /// Creates a new `SteamPaths` with an auto-detected Steam directory.
    ///
    /// The `STEAM_DIR` environment variable overrides detection; otherwise
    /// platform-default locations are probed.
    pub fn new() -> Result<Self, SteamError> {
        let base_dir = detect_base_dir().ok_or(SteamError::NotFound)?;
        Ok(Self { base_dir })
    }

    /// Creates a new `SteamPaths` with a custom base directory.
    pub fn with_base(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the Steam base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the primary `steamapps` directory.
    pub fn steamapps_dir(&self) -> PathBuf {
        self.base_dir.join("steamapps")
    }

    /// Returns the path to `libraryfolders.vdf`.
    pub fn library_folders_path(&self) -> PathBuf {
        self.steamapps_dir().join("libraryfolders.vdf")
    }
}

/// Probes for the Steam base directory.
fn detect_base_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("STEAM_DIR") {
        let path = PathBuf::from(dir);
        if path.is_dir() {
            return Some(path);
        }
    }

    for candidate in default_candidates() {
        if candidate.join("steamapps").is_dir() {
            return Some(candidate);
        }
    }

    None
}

#[cfg(target_os = "linux")]
fn default_candidates() -> Vec<PathBuf> {
    let Ok(home) = std::env::var("HOME") else {
        return Vec::new();
    };
    let home = PathBuf::from(home);
    vec![
        home.join(".steam").join("steam"),
        home.join(".local").join("share").join("Steam"),
        home.join(".var")
            .join("app")
            .join("com.valvesoftware.Steam")
            .join(".local")
            .join("share")
            .join("Steam"),
    ]
}

#[cfg(target_os = "windows")]
fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(pf) = std::env::var("ProgramFiles(x86)") {
        candidates.push(PathBuf::from(pf).join("Steam"));
    }
    if let Ok(pf) = std::env::var("ProgramFiles") {
        candidates.push(PathBuf::from(pf).join("Steam"));
    }
    candidates
}

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
fn default_candidates() -> Vec<PathBuf> {
    let Ok(home) = std::env::var("HOME") else {
        return Vec::new();
    };
    vec![
        PathBuf::from(home)
            .join("Library")
            .join("Application Support")
            .join("Steam"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_with_base() {
        let paths = SteamPaths::with_base("/opt/steam");
        assert_eq!(paths.base_dir(), Path::new("/opt/steam"));
        assert_eq!(paths.steamapps_dir(), PathBuf::from("/opt/steam/steamapps"));
        assert_eq!(
            paths.library_folders_path(),
            PathBuf::from("/opt/steam/steamapps/libraryfolders.vdf")
        );
    }
}
