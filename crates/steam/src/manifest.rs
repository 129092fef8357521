//! Installed-app discovery from Steam's on-disk manifests.
//!
//! Steam writes one `appmanifest_<appid>.acf` per installed title into each
//! library's `steamapps` directory; `libraryfolders.vdf` lists the extra
//! library roots beyond the primary installation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::SteamError;
use crate::keyvalues;
use crate::paths::SteamPaths;

/// A locally installed app, as read from its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApp {
    pub app_id: u32,
    pub name: String,
    pub install_dir: PathBuf,
}

/// Scans all Steam libraries for installed apps.
///
/// Unreadable or malformed manifests are skipped with a warning; missing
/// library directories are ignored. The result is sorted by app id with
/// duplicates (the same app listed in two libraries) removed.
pub fn scan_installed() -> Result<Vec<InstalledApp>, SteamError> {
    let paths = SteamPaths::new()?;
    Ok(scan_installed_in(&paths))
}

/// Scans using the provided `SteamPaths` instance.
pub fn scan_installed_in(paths: &SteamPaths) -> Vec<InstalledApp> {
    let mut apps: BTreeMap<u32, InstalledApp> = BTreeMap::new();

    for library in library_steamapps_dirs(paths) {
        let entries = match fs::read_dir(&library) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %library.display(), error = %e, "skipping unreadable library");
                continue;
            }
        };

        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if !file_name.starts_with("appmanifest_") || !file_name.ends_with(".acf") {
                continue;
            }

            match parse_app_manifest_file(&entry.path(), &library) {
                Ok(app) => {
                    apps.entry(app.app_id).or_insert(app);
                }
                Err(e) => {
                    warn!(file = %entry.path().display(), error = %e, "skipping malformed manifest");
                }
            }
        }
    }

    apps.into_values().collect()
}

/// Returns the `steamapps` directory of every known library.
///
/// Always includes the primary library; extra roots come from
/// `libraryfolders.vdf` when present.
fn library_steamapps_dirs(paths: &SteamPaths) -> Vec<PathBuf> {
    let mut dirs = vec![paths.steamapps_dir()];

    let folders_path = paths.library_folders_path();
    let content = match fs::read_to_string(&folders_path) {
        Ok(content) => content,
        Err(_) => return dirs,
    };

    match parse_library_folders(&content) {
        Ok(roots) => {
            for root in roots {
                let steamapps = root.join("steamapps");
                if !dirs.contains(&steamapps) {
                    dirs.push(steamapps);
                }
            }
        }
        Err(e) => {
            warn!(file = %folders_path.display(), error = %e, "ignoring malformed libraryfolders.vdf");
        }
    }

    dirs
}

/// Extracts library root paths from a `libraryfolders.vdf` document.
pub fn parse_library_folders(content: &str) -> Result<Vec<PathBuf>, SteamError> {
    let kv = keyvalues::parse(content)?;
    let folders = kv
        .get_obj("libraryfolders")
        .ok_or_else(|| SteamError::Vdf("missing 'libraryfolders' root".into()))?;

    let mut roots = Vec::new();
    for (key, value) in folders.entries() {
        // Entries are keyed by index ("0", "1", ...).
        if key.parse::<u32>().is_err() {
            continue;
        }
        if let Some(folder) = value.as_obj()
            && let Some(path) = folder.get_str("path")
        {
            roots.push(PathBuf::from(path));
        }
    }

    Ok(roots)
}

/// Parses a single `appmanifest_*.acf` document.
pub fn parse_app_manifest(content: &str, steamapps_dir: &Path) -> Result<InstalledApp, SteamError> {
    let kv = keyvalues::parse(content)?;
    let state = kv
        .get_obj("AppState")
        .ok_or_else(|| SteamError::Vdf("missing 'AppState' root".into()))?;

    let app_id = state
        .get_str("appid")
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| SteamError::Vdf("missing or invalid 'appid'".into()))?;

    let name = state
        .get_str("name")
        .unwrap_or_default()
        .to_string();

    let install_dir = state
        .get_str("installdir")
        .map(|dir| steamapps_dir.join("common").join(dir))
        .ok_or_else(|| SteamError::Vdf("missing 'installdir'".into()))?;

    Ok(InstalledApp {
        app_id,
        name,
        install_dir,
    })
}

fn parse_app_manifest_file(path: &Path, steamapps_dir: &Path) -> Result<InstalledApp, SteamError> {
    let content = fs::read_to_string(path).map_err(|e| SteamError::Io(e.to_string()))?;
    parse_app_manifest(&content, steamapps_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(app_id: u32, name: &str, installdir: &str) -> String {
        format!(
            "\"AppState\"\n{{\n\t\"appid\"\t\"{app_id}\"\n\t\"name\"\t\"{name}\"\n\t\"installdir\"\t\"{installdir}\"\n\t\"StateFlags\"\t\"4\"\n}}\n"
        )
    }

    #[test]
    fn parse_manifest_basic() {
        let app =
            parse_app_manifest(&manifest(620, "Portal 2", "Portal 2"), Path::new("/s/steamapps"))
                .unwrap();
        assert_eq!(app.app_id, 620);
        assert_eq!(app.name, "Portal 2");
        assert_eq!(
            app.install_dir,
            PathBuf::from("/s/steamapps/common/Portal 2")
        );
    }

    #[test]
    fn parse_manifest_missing_appid() {
        let content = "\"AppState\"\n{\n\t\"name\"\t\"x\"\n\t\"installdir\"\t\"x\"\n}\n";
        assert!(parse_app_manifest(content, Path::new("/s")).is_err());
    }

    #[test]
    fn parse_manifest_wrong_root() {
        let content = "\"NotAppState\"\n{\n\t\"appid\"\t\"1\"\n}\n";
        assert!(parse_app_manifest(content, Path::new("/s")).is_err());
    }

    #[test]
    fn parse_library_folders_paths() {
        let content = r#"
"libraryfolders"
{
    "0"
    {
        "path"  "/home/user/.steam/steam"
        "label" ""
    }
    "1"
    {
        "path"  "/mnt/games/SteamLibrary"
    }
    "contentstatsid"  "123"
}
"#;
        let roots = parse_library_folders(content).unwrap();
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/home/user/.steam/steam"),
                PathBuf::from("/mnt/games/SteamLibrary"),
            ]
        );
    }

    #[test]
    fn scan_reads_manifests_across_libraries() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();

        let primary = base.join("steamapps");
        let extra_root = base.join("extra");
        let extra = extra_root.join("steamapps");
        fs::create_dir_all(&primary).unwrap();
        fs::create_dir_all(&extra).unwrap();

        fs::write(
            primary.join("appmanifest_620.acf"),
            manifest(620, "Portal 2", "Portal 2"),
        )
        .unwrap();
        fs::write(
            extra.join("appmanifest_440.acf"),
            manifest(440, "Team Fortress 2", "Team Fortress 2"),
        )
        .unwrap();
        // Not a manifest; must be ignored.
        fs::write(primary.join("libraryfolders.vdf"), format!(
            "\"libraryfolders\"\n{{\n\t\"0\"\n\t{{\n\t\t\"path\"\t\"{}\"\n\t}}\n}}\n",
            extra_root.display()
        ))
        .unwrap();

        let paths = SteamPaths::with_base(base);
        let apps = scan_installed_in(&paths);

        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].app_id, 440);
        assert_eq!(apps[1].app_id, 620);
        assert_eq!(apps[1].name, "Portal 2");
    }

    #[test]
    fn scan_skips_malformed_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let primary = tmp.path().join("steamapps");
        fs::create_dir_all(&primary).unwrap();

        fs::write(primary.join("appmanifest_1.acf"), "not vdf {").unwrap();
        fs::write(
            primary.join("appmanifest_620.acf"),
            manifest(620, "Portal 2", "Portal 2"),
        )
        .unwrap();

        let apps = scan_installed_in(&SteamPaths::with_base(tmp.path()));
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].app_id, 620);
    }

    #[test]
    fn scan_missing_steamapps_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let apps = scan_installed_in(&SteamPaths::with_base(tmp.path()));
        assert!(apps.is_empty());
    }
}
