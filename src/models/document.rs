//! Document types of the open-data layout

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five document shapes the loader reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    /// `competitions.json`: one row per competition season
    Competitions,
    /// `matches/<competition>/<season>.json`
    Matches,
    /// `lineups/<match>.json`: one record per team, each with a player list
    Lineups,
    /// `events/<match>.json`
    Events,
    /// `three-sixty/<match>.json`: one frame per event
    ThreeSixty,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Competitions,
        DocumentType::Matches,
        DocumentType::Lineups,
        DocumentType::Events,
        DocumentType::ThreeSixty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Competitions => "competitions",
            DocumentType::Matches => "matches",
            DocumentType::Lineups => "lineups",
            DocumentType::Events => "events",
            DocumentType::ThreeSixty => "three-sixty",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "competitions" => Ok(DocumentType::Competitions),
            "matches" => Ok(DocumentType::Matches),
            "lineups" => Ok(DocumentType::Lineups),
            "events" => Ok(DocumentType::Events),
            "three-sixty" | "three_sixty" | "360" => Ok(DocumentType::ThreeSixty),
            _ => Err(format!(
                "Invalid document type: {}. Expected: competitions, matches, lineups, events, three-sixty",
                s
            )),
        }
    }
}
