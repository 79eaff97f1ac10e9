pub mod client;
pub mod types;

pub use client::{
    SteamClient, SteamClientBuilder, DEFAULT_CATALOG_URL, DEFAULT_PLAYER_COUNT_URL,
    ELDEN_RING_APP_ID,
};
pub use types::{App, AppId, NameResolution, PlayerCountResult};
