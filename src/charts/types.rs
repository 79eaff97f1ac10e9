use serde::{Deserialize, Serialize};

/// Header row written by the CSV exporter, matching the fields of
/// [`GameEntry`] in order.
pub const CSV_HEADER: [&str; 3] = ["name", "current_players", "peak_players"];

/// One row of the steamcharts top-games table.
///
/// Player numbers stay display strings exactly as the site renders them,
/// thousands separators included. Parsing them into integers is left to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    pub name: String,
    pub current_players: String,
    pub peak_players: String,
}
