//! Refresh pipeline — owned/shared merge, enrichment, install matching.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use futures::future::join_all;
use tracing::{debug, warn};

use gamestringer_steam::{InstalledApp, parse_shared_games_xml};
use gamestringer_steam_api::{ApiError, Client, FamilyApp, OwnedGame, StoreDetails};
use gamestringer_types::LibraryGame;

use crate::LibraryError;
use crate::engine::{detect_engine, detect_vr};

/// Abstract view of the Steam upstream.
///
/// The server wires in the real [`Client`]; tests provide canned data.
pub trait SteamSource: Send + Sync {
    /// Fetches the account's owned games.
    fn owned_games<'a>(
        &'a self,
        steam_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<OwnedGame>, ApiError>> + Send + 'a>>;

    /// Fetches titles shared with the account through family sharing.
    fn family_shared<'a>(
        &'a self,
        steam_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FamilyApp>, ApiError>> + Send + 'a>>;

    /// Fetches storefront metadata for one title.
    fn app_details(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoreDetails>, ApiError>> + Send + '_>>;
}

impl SteamSource for Client {
    fn owned_games<'a>(
        &'a self,
        steam_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<OwnedGame>, ApiError>> + Send + 'a>> {
        Box::pin(self.get_owned_games(steam_id))
    }

    fn family_shared<'a>(
        &'a self,
        steam_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<FamilyApp>, ApiError>> + Send + 'a>> {
        Box::pin(self.get_family_shared_apps(steam_id))
    }

    fn app_details(
        &self,
        app_id: u32,
    ) -> Pin<Box<dyn Future<Output = Result<Option<StoreDetails>, ApiError>> + Send + '_>> {
        Box::pin(self.get_app_details(app_id))
    }
}

/// Inputs gathered by the caller before a refresh.
pub struct RefreshInput<'a> {
    /// 64-bit Steam ID of the account.
    pub steam_id: &'a str,
    /// Content of the shared-library XML export, when the file exists.
    pub shared_xml: Option<&'a str>,
    /// Locally installed apps from the manifest scan.
    pub installed: &'a [InstalledApp],
}

/// Runs the refresh pipeline.
pub struct LibraryManager {
    enrich_chunk_size: usize,
}

impl Default for LibraryManager {
    fn default() -> Self {
        Self {
            enrich_chunk_size: 10,
        }
    }
}

impl LibraryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the enrichment fan-out width.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.enrich_chunk_size = size.max(1);
        self
    }

    /// Produces the enriched library for one account.
    ///
    /// The owned-games fetch is load-bearing and its failure aborts the
    /// refresh. Everything downstream degrades per item: shared-library
    /// sources fall back to each other and then to nothing, and a failed
    /// enrichment leaves the minimal record in place.
    pub async fn refresh(
        &self,
        source: &dyn SteamSource,
        input: RefreshInput<'_>,
    ) -> Result<Vec<LibraryGame>, LibraryError> {
        let owned = source.owned_games(input.steam_id).await?;
        debug!(count = owned.len(), "fetched owned games");

        let mut games: BTreeMap<u32, LibraryGame> = BTreeMap::new();
        for game in owned {
            games.insert(
                game.app_id,
                LibraryGame {
                    last_played: game.rtime_last_played,
                    ..LibraryGame::minimal(game.app_id, game.name)
                },
            );
        }

        // Shared titles the account also owns keep the owned record.
        for shared in self.shared_apps(source, &input).await {
            games.entry(shared.0).or_insert_with(|| LibraryGame {
                shared: true,
                ..LibraryGame::minimal(shared.0, shared.1)
            });
        }

        self.enrich(source, &mut games).await;
        apply_installed(&mut games, input.installed);

        Ok(games.into_values().collect())
    }

    /// Resolves the shared library: XML export first, family API second.
    async fn shared_apps(
        &self,
        source: &dyn SteamSource,
        input: &RefreshInput<'_>,
    ) -> Vec<(u32, String)> {
        if let Some(xml) = input.shared_xml {
            match parse_shared_games_xml(xml) {
                Ok(apps) => {
                    debug!(count = apps.len(), "shared library from XML export");
                    return apps.into_iter().map(|a| (a.app_id, a.name)).collect();
                }
                Err(e) => {
                    warn!(error = %e, "shared XML unreadable, falling back to family API");
                }
            }
        }

        match source.family_shared(input.steam_id).await {
            Ok(apps) => {
                debug!(count = apps.len(), "shared library from family API");
                apps.into_iter().map(|a| (a.app_id, a.name)).collect()
            }
            Err(ApiError::MissingCookie) => {
                debug!("no family cookie configured, skipping shared library");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "family API failed, continuing without shared library");
                Vec::new()
            }
        }
    }

    /// Enriches every title from the storefront, a chunk at a time.
    ///
    /// Failures are per item: the minimal record stays and the refresh
    /// continues.
    async fn enrich(&self, source: &dyn SteamSource, games: &mut BTreeMap<u32, LibraryGame>) {
        let app_ids: Vec<u32> = games.keys().copied().collect();

        for chunk in app_ids.chunks(self.enrich_chunk_size) {
            let lookups = chunk.iter().map(|&app_id| source.app_details(app_id));
            let results = join_all(lookups).await;

            for (&app_id, result) in chunk.iter().zip(results) {
                let details = match result {
                    Ok(Some(details)) => details,
                    Ok(None) => {
                        debug!(app_id, "no store entry, keeping minimal record");
                        continue;
                    }
                    Err(e) => {
                        warn!(app_id, error = %e, "enrichment failed, keeping minimal record");
                        continue;
                    }
                };

                if let Some(game) = games.get_mut(&app_id) {
                    apply_details(game, &details);
                }
            }
        }
    }
}

/// Merges storefront metadata into a library record.
fn apply_details(game: &mut LibraryGame, details: &StoreDetails) {
    if !details.name.is_empty() {
        game.title = details.name.clone();
    }
    game.short_description = details.short_description.clone();
    game.genres = details
        .genres
        .iter()
        .map(|g| g.description.clone())
        .collect();
    game.categories = details
        .categories
        .iter()
        .map(|c| c.description.clone())
        .collect();
    game.vr = detect_vr(&game.categories);
    game.engine = detect_engine(&details.classification_text()).map(str::to_string);
}

/// Flags locally installed titles and records their install path.
fn apply_installed(games: &mut BTreeMap<u32, LibraryGame>, installed: &[InstalledApp]) {
    for app in installed {
        if let Some(game) = games.get_mut(&app.app_id) {
            game.installed = true;
            game.install_path = Some(app.install_dir.to_string_lossy().into_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use gamestringer_steam_api::types::{DescribedTag, Requirements};

    /// Mock source with canned responses and call counters.
    struct MockSource {
        owned: Result<Vec<OwnedGame>, ApiError>,
        family: Result<Vec<FamilyApp>, ApiError>,
        details: Mutex<std::collections::HashMap<u32, StoreDetails>>,
        fail_details_for: Vec<u32>,
        family_calls: AtomicUsize,
        detail_calls: AtomicUsize,
    }

    impl MockSource {
        fn new(owned: Vec<OwnedGame>) -> Self {
            Self {
                owned: Ok(owned),
                family: Ok(Vec::new()),
                details: Mutex::new(std::collections::HashMap::new()),
                fail_details_for: Vec::new(),
                family_calls: AtomicUsize::new(0),
                detail_calls: AtomicUsize::new(0),
            }
        }

        fn with_details(self, app_id: u32, details: StoreDetails) -> Self {
            self.details.lock().unwrap().insert(app_id, details);
            self
        }
    }

    impl SteamSource for MockSource {
        fn owned_games<'a>(
            &'a self,
            _steam_id: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<OwnedGame>, ApiError>> + Send + 'a>> {
            let result = clone_result(&self.owned);
            Box::pin(async move { result })
        }

        fn family_shared<'a>(
            &'a self,
            _steam_id: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<FamilyApp>, ApiError>> + Send + 'a>> {
            self.family_calls.fetch_add(1, Ordering::SeqCst);
            let result = clone_result(&self.family);
            Box::pin(async move { result })
        }

        fn app_details(
            &self,
            app_id: u32,
        ) -> Pin<Box<dyn Future<Output = Result<Option<StoreDetails>, ApiError>> + Send + '_>>
        {
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            let result = if self.fail_details_for.contains(&app_id) {
                Err(ApiError::Api {
                    status: 500,
                    body: "boom".into(),
                })
            } else {
                Ok(self.details.lock().unwrap().get(&app_id).cloned())
            };
            Box::pin(async move { result })
        }
    }

    fn clone_result<T: Clone>(r: &Result<T, ApiError>) -> Result<T, ApiError> {
        match r {
            Ok(v) => Ok(v.clone()),
            Err(ApiError::MissingCookie) => Err(ApiError::MissingCookie),
            Err(_) => Err(ApiError::Api {
                status: 500,
                body: "mock error".into(),
            }),
        }
    }

    fn owned(app_id: u32, name: &str) -> OwnedGame {
        OwnedGame {
            app_id,
            name: name.into(),
            playtime_forever: 0,
            rtime_last_played: 0,
        }
    }

    fn details(name: &str, description: &str) -> StoreDetails {
        StoreDetails {
            name: name.into(),
            short_description: description.into(),
            ..Default::default()
        }
    }

    const SHARED_XML: &str = "<gamesList><games><game><appID>570</appID><name><![CDATA[Dota 2]]></name></game></games></gamesList>";

    #[tokio::test]
    async fn owned_games_become_library_records() {
        let source = MockSource::new(vec![owned(620, "Portal 2"), owned(440, "TF2")]);
        let mgr = LibraryManager::new();

        let games = mgr
            .refresh(
                &source,
                RefreshInput {
                    steam_id: "765",
                    shared_xml: None,
                    installed: &[],
                },
            )
            .await
            .unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].app_id, 440);
        assert_eq!(games[1].app_id, 620);
        assert!(!games[0].shared);
    }

    #[tokio::test]
    async fn owned_fetch_failure_aborts() {
        let mut source = MockSource::new(vec![]);
        source.owned = Err(ApiError::Api {
            status: 429,
            body: "rate limited".into(),
        });

        let result = LibraryManager::new()
            .refresh(
                &source,
                RefreshInput {
                    steam_id: "765",
                    shared_xml: None,
                    installed: &[],
                },
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn shared_xml_merges_without_family_call() {
        let source = MockSource::new(vec![owned(620, "Portal 2")]);
        let mgr = LibraryManager::new();

        let games = mgr
            .refresh(
                &source,
                RefreshInput {
                    steam_id: "765",
                    shared_xml: Some(SHARED_XML),
                    installed: &[],
                },
            )
            .await
            .unwrap();

        assert_eq!(games.len(), 2);
        let dota = games.iter().find(|g| g.app_id == 570).unwrap();
        assert!(dota.shared);
        assert_eq!(dota.title, "Dota 2");
        assert_eq!(source.family_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_xml_falls_back_to_family_api() {
        let mut source = MockSource::new(vec![]);
        source.family = Ok(vec![FamilyApp {
            app_id: 570,
            name: "Dota 2".into(),
            owner_steamids: vec![],
        }]);

        let games = LibraryManager::new()
            .refresh(
                &source,
                RefreshInput {
                    steam_id: "765",
                    shared_xml: Some("<html>not a games list</html>"),
                    installed: &[],
                },
            )
            .await
            .unwrap();

        assert_eq!(source.family_calls.load(Ordering::SeqCst), 1);
        assert_eq!(games.len(), 1);
        assert!(games[0].shared);
    }

    #[tokio::test]
    async fn missing_cookie_skips_shared_quietly() {
        let mut source = MockSource::new(vec![owned(620, "Portal 2")]);
        source.family = Err(ApiError::MissingCookie);

        let games = LibraryManager::new()
            .refresh(
                &source,
                RefreshInput {
                    steam_id: "765",
                    shared_xml: None,
                    installed: &[],
                },
            )
            .await
            .unwrap();
        assert_eq!(games.len(), 1);
    }

    #[tokio::test]
    async fn owned_record_wins_over_shared() {
        let source = MockSource::new(vec![owned(570, "Dota 2")]);

        let games = LibraryManager::new()
            .refresh(
                &source,
                RefreshInput {
                    steam_id: "765",
                    shared_xml: Some(SHARED_XML),
                    installed: &[],
                },
            )
            .await
            .unwrap();

        assert_eq!(games.len(), 1);
        assert!(!games[0].shared, "owned copy must not be flagged shared");
    }

    #[tokio::test]
    async fn enrichment_applies_metadata_and_classification() {
        let store = StoreDetails {
            name: "Portal 2".into(),
            short_description: "Built with Source Engine tech.".into(),
            genres: vec![DescribedTag {
                description: "Puzzle".into(),
            }],
            categories: vec![
                DescribedTag {
                    description: "Single-player".into(),
                },
                DescribedTag {
                    description: "VR Supported".into(),
                },
            ],
            pc_requirements: Requirements::default(),
            ..Default::default()
        };
        let source = MockSource::new(vec![owned(620, "portal2")]).with_details(620, store);

        let games = LibraryManager::new()
            .refresh(
                &source,
                RefreshInput {
                    steam_id: "765",
                    shared_xml: None,
                    installed: &[],
                },
            )
            .await
            .unwrap();

        let game = &games[0];
        assert_eq!(game.title, "Portal 2");
        assert_eq!(game.genres, vec!["Puzzle"]);
        assert!(game.vr);
        assert_eq!(game.engine.as_deref(), Some("Source Engine"));
    }

    #[tokio::test]
    async fn failed_enrichment_keeps_minimal_record() {
        let mut source = MockSource::new(vec![owned(620, "Portal 2"), owned(440, "TF2")])
            .with_details(440, details("Team Fortress 2", ""));
        source.fail_details_for = vec![620];

        let games = LibraryManager::new()
            .refresh(
                &source,
                RefreshInput {
                    steam_id: "765",
                    shared_xml: None,
                    installed: &[],
                },
            )
            .await
            .unwrap();

        let portal = games.iter().find(|g| g.app_id == 620).unwrap();
        let tf2 = games.iter().find(|g| g.app_id == 440).unwrap();
        assert_eq!(portal.title, "Portal 2");
        assert!(portal.short_description.is_empty());
        assert_eq!(tf2.title, "Team Fortress 2");
    }

    #[tokio::test]
    async fn installed_matching_sets_flag_and_path() {
        let source = MockSource::new(vec![owned(620, "Portal 2"), owned(440, "TF2")]);
        let installed = vec![InstalledApp {
            app_id: 620,
            name: "Portal 2".into(),
            install_dir: PathBuf::from("/steam/steamapps/common/Portal 2"),
        }];

        let games = LibraryManager::new()
            .refresh(
                &source,
                RefreshInput {
                    steam_id: "765",
                    shared_xml: None,
                    installed: &installed,
                },
            )
            .await
            .unwrap();

        let portal = games.iter().find(|g| g.app_id == 620).unwrap();
        assert!(portal.installed);
        assert_eq!(
            portal.install_path.as_deref(),
            Some("/steam/steamapps/common/Portal 2")
        );
        assert!(!games.iter().find(|g| g.app_id == 440).unwrap().installed);
    }

    #[tokio::test]
    async fn enrichment_covers_every_title_across_chunks() {
        let owned_games: Vec<OwnedGame> =
            (1..=25).map(|i| owned(i, &format!("Game {i}"))).collect();
        let source = MockSource::new(owned_games);

        let mgr = LibraryManager::new().with_chunk_size(10);
        let games = mgr
            .refresh(
                &source,
                RefreshInput {
                    steam_id: "765",
                    shared_xml: None,
                    installed: &[],
                },
            )
            .await
            .unwrap();

        assert_eq!(games.len(), 25);
        assert_eq!(source.detail_calls.load(Ordering::SeqCst), 25);
    }
}
