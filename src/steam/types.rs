use serde::{Deserialize, Serialize};

use crate::utils::error::StatsError;

/// Numeric Steam application identifier, as used by the Web API.
pub type AppId = u32;

/// One entry of the full app catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    #[serde(rename = "appid")]
    pub id: AppId,
    /// The catalog contains entries with an empty name; those never match
    /// any lookup.
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppListEnvelope {
    pub applist: AppList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AppList {
    pub apps: Vec<App>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayerCountEnvelope {
    pub response: PlayerCountBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayerCountBody {
    pub player_count: u64,
}

/// Outcome of resolving one requested name against the override map and
/// the catalog.
///
/// `requested` holds the lowercased form the lookup de-duplicates on.
/// `app_id` is `None` when nothing matched; a missing name is an absent
/// value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameResolution {
    pub requested: String,
    pub app_id: Option<AppId>,
}

/// Per-app outcome of a batch player-count lookup. A failed fetch for one
/// app does not abort the batch; the error is carried here instead.
#[derive(Debug)]
pub struct PlayerCountResult {
    pub app_id: AppId,
    pub count: Result<u64, StatsError>,
}
