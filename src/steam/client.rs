use std::collections::{HashMap, HashSet};
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::steam::types::{
    App, AppId, AppListEnvelope, NameResolution, PlayerCountEnvelope, PlayerCountResult,
};
use crate::utils::error::{Result, StatsError};

/// `GetAppList` returns the entire catalog; there are no query parameters.
pub const DEFAULT_CATALOG_URL: &str = "https://api.steampowered.com/ISteamApps/GetAppList/v2/";

/// `GetNumberOfCurrentPlayers` takes a single `appid` query parameter.
pub const DEFAULT_PLAYER_COUNT_URL: &str =
    "https://api.steampowered.com/ISteamUserStats/GetNumberOfCurrentPlayers/v1/";

/// Id behind the default `"elden ring"` override entry. The name resolves
/// to this id no matter what the live catalog says.
pub const ELDEN_RING_APP_ID: AppId = 1_245_620;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("steam-stats/", env!("CARGO_PKG_VERSION"));

/// Client for the two Steam Web API endpoints this crate consumes: the
/// full app catalog and the per-app current player count.
///
/// The underlying `reqwest::Client` pools connections, so one value can be
/// reused across calls. Nothing is cached: every resolution call fetches
/// the catalog fresh.
pub struct SteamClient {
    client: Client,
    catalog_url: String,
    player_count_url: String,
    overrides: HashMap<String, AppId>,
}

/// Builder for [`SteamClient`].
///
/// Starts with the real endpoints, 10 s connect / 30 s request timeouts,
/// and a one-entry override map (`"elden ring"` → [`ELDEN_RING_APP_ID`]).
/// Overrides are a configuration concern: replace the map to drop or
/// extend the default entry.
pub struct SteamClientBuilder {
    catalog_url: String,
    player_count_url: String,
    overrides: HashMap<String, AppId>,
    timeout: Duration,
    connect_timeout: Duration,
}

impl Default for SteamClientBuilder {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            player_count_url: DEFAULT_PLAYER_COUNT_URL.to_string(),
            overrides: HashMap::from([("elden ring".to_string(), ELDEN_RING_APP_ID)]),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl SteamClientBuilder {
    pub fn catalog_url(mut self, url: impl Into<String>) -> Self {
        self.catalog_url = url.into();
        self
    }

    pub fn player_count_url(mut self, url: impl Into<String>) -> Self {
        self.player_count_url = url.into();
        self
    }

    /// Replace the name→id override map wholesale. Keys are lowercased so
    /// lookups stay case-insensitive. An empty map disables overrides.
    pub fn overrides(mut self, overrides: HashMap<String, AppId>) -> Self {
        self.overrides = overrides
            .into_iter()
            .map(|(name, id)| (name.to_lowercase(), id))
            .collect();
        self
    }

    /// Add a single override entry on top of whatever the map holds.
    pub fn override_app_id(mut self, name: impl Into<String>, id: AppId) -> Self {
        self.overrides.insert(name.into().to_lowercase(), id);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<SteamClient> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()?;

        Ok(SteamClient {
            client,
            catalog_url: self.catalog_url,
            player_count_url: self.player_count_url,
            overrides: self.overrides,
        })
    }
}

impl SteamClient {
    /// Client with the default configuration (real endpoints, default
    /// override map).
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> SteamClientBuilder {
        SteamClientBuilder::default()
    }

    /// Fetch the full app catalog, in upstream order, no dedup, no sort.
    pub async fn all_apps(&self) -> Result<Vec<App>> {
        tracing::debug!("fetching app catalog from {}", self.catalog_url);
        let envelope: AppListEnvelope = self.fetch_json(self.client.get(&self.catalog_url)).await?;
        let apps = envelope.applist.apps;
        tracing::debug!("catalog contains {} apps", apps.len());
        Ok(apps)
    }

    /// Find one app id by case-insensitive exact name match. The first
    /// catalog occurrence wins; `Ok(None)` when nothing matches.
    pub async fn find_app_id(&self, name: &str) -> Result<Option<AppId>> {
        let target = name.to_lowercase();
        let apps = self.all_apps().await?;
        Ok(apps
            .iter()
            .find(|app| !app.name.is_empty() && app.name.to_lowercase() == target)
            .map(|app| app.id))
    }

    /// Resolve a batch of names to app ids.
    ///
    /// Names are lowercased and de-duplicated, so the output has one entry
    /// per distinct name, in first-occurrence input order. Override hits
    /// skip the catalog entirely; everything else is matched in a single
    /// catalog fetch and one linear scan, first occurrence winning ties.
    pub async fn resolve_names(&self, names: &[String]) -> Result<Vec<NameResolution>> {
        let ordered = dedup_lowercase(names);

        let mut resolved: HashMap<String, AppId> = HashMap::new();
        let mut pending: HashSet<&str> = HashSet::new();
        for name in &ordered {
            match self.overrides.get(name) {
                Some(&id) => {
                    tracing::debug!("'{}' resolved via override to {}", name, id);
                    resolved.insert(name.clone(), id);
                }
                None => {
                    pending.insert(name);
                }
            }
        }

        // One catalog fetch per call, even when every name hit an override.
        let apps = self.all_apps().await?;
        for app in &apps {
            if app.name.is_empty() {
                continue;
            }
            let lowered = app.name.to_lowercase();
            if pending.remove(lowered.as_str()) {
                resolved.insert(lowered, app.id);
            }
        }

        let results: Vec<NameResolution> = ordered
            .into_iter()
            .map(|requested| {
                let app_id = resolved.get(&requested).copied();
                if app_id.is_none() {
                    tracing::warn!("no catalog match for '{}'", requested);
                }
                NameResolution { requested, app_id }
            })
            .collect();

        Ok(results)
    }

    /// Current player count for a single app.
    pub async fn current_players(&self, app_id: AppId) -> Result<u64> {
        tracing::debug!("fetching player count for app {}", app_id);
        let request = self
            .client
            .get(&self.player_count_url)
            .query(&[("appid", app_id)]);
        let envelope: PlayerCountEnvelope = self.fetch_json(request).await?;
        Ok(envelope.response.player_count)
    }

    /// Player counts for a batch of ids, one fetch per id, input order
    /// preserved. A failure on one id is reported in that element and does
    /// not abort the rest.
    pub async fn player_counts_by_id(&self, ids: &[AppId]) -> Vec<PlayerCountResult> {
        let mut results = Vec::with_capacity(ids.len());
        for &app_id in ids {
            let count = self.current_players(app_id).await;
            if let Err(e) = &count {
                tracing::warn!("player count for app {} failed: {}", app_id, e);
            }
            results.push(PlayerCountResult { app_id, count });
        }
        results
    }

    /// Resolve names, then fetch one player count per resolved id,
    /// resolution order preserved. Names that resolve to nothing are
    /// logged by the resolution step and skipped here.
    pub async fn player_counts_by_name(&self, names: &[String]) -> Result<Vec<PlayerCountResult>> {
        let resolutions = self.resolve_names(names).await?;
        let ids: Vec<AppId> = resolutions.iter().filter_map(|r| r.app_id).collect();
        Ok(self.player_counts_by_id(&ids).await)
    }

    /// Send the request, require a 2xx status, then decode the body as
    /// JSON. Transport and status failures surface as `NetworkError`;
    /// decode failures as `MalformedResponseError` with the final URL.
    async fn fetch_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?.error_for_status()?;
        let url = response.url().to_string();
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|source| StatsError::MalformedResponseError { url, source })
    }
}

/// Lowercase the requested names and drop case-insensitive duplicates,
/// keeping first-occurrence order.
fn dedup_lowercase(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for name in names {
        let lowered = name.to_lowercase();
        if seen.insert(lowered.clone()) {
            ordered.push(lowered);
        }
    }
    ordered
}
