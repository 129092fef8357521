//! Local Steam data access.
//!
//! Reads what Steam already keeps on disk: the installation directory,
//! additional library folders from `libraryfolders.vdf`, installed app
//! manifests (`appmanifest_*.acf`), and the community XML export of a
//! shared library. Nothing here talks to the network.

pub mod keyvalues;
pub mod manifest;
pub mod paths;
pub mod shared;

pub use manifest::{InstalledApp, scan_installed, scan_installed_in};
pub use paths::SteamPaths;
pub use shared::{SharedApp, parse_shared_games_xml};

/// Errors for local Steam data operations.
#[derive(Debug, thiserror::Error)]
pub enum SteamError {
    #[error("steam installation not found")]
    NotFound,

    #[error("VDF parse error: {0}")]
    Vdf(String),

    #[error("XML parse error: {0}")]
    Xml(String),

    #[error("I/O error: {0}")]
    Io(String),
}
