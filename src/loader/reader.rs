//! Per-document readers: load, normalize, expand
//!
//! Each reader returns the tables of one document type as a typed bundle.

use serde::Serialize;

use super::error::LoadError;
use super::source::{DataSource, DocumentRequest};
use crate::models::Table;
use crate::normalize::NormalizedDocument;

/// Tables read from `competitions.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitionTables {
    pub competitions: Table,
}

/// Tables read from one matches document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchTables {
    pub matches: Table,
    pub home_managers: Table,
    pub away_managers: Table,
}

/// Tables read from one lineups document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupTables {
    /// One row per player, carrying `team_id` and `team_name`
    pub lineups: Table,
    pub cards: Table,
    pub positions: Table,
}

/// Tables read from one events document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventTables {
    pub events: Table,
    pub tactics_lineup: Table,
    /// `(id, related_events)` pairs
    pub related_events: Table,
    pub shot_freeze_frame: Table,
}

/// Tables read from one 360 document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreeSixtyTables {
    pub visible_area: Table,
    pub freeze_frame: Table,
}

impl DataSource {
    /// Load a document and run it through its plan
    ///
    /// Explosions run first, on the flattened document; coordinate
    /// expansion runs on the resulting tables.
    pub fn read(&self, request: &DocumentRequest) -> Result<NormalizedDocument, LoadError> {
        let document = self.load(request)?;
        let plan = self.plans().get(request.document_type());
        let normalized = self.normalizer.normalize(&document, plan)?.expand_with(plan);

        tracing::debug!(
            document = %plan.document,
            tables = normalized.table_count(),
            "Read document"
        );
        Ok(normalized)
    }

    pub fn read_competitions(&self) -> Result<CompetitionTables, LoadError> {
        let mut doc = self.read(&DocumentRequest::Competitions)?;
        Ok(CompetitionTables {
            competitions: take(&mut doc, "competitions")?,
        })
    }

    pub fn read_matches(
        &self,
        competition_id: u64,
        season_id: u64,
    ) -> Result<MatchTables, LoadError> {
        let mut doc = self.read(&DocumentRequest::Matches {
            competition_id,
            season_id,
        })?;
        Ok(MatchTables {
            matches: take(&mut doc, "matches")?,
            home_managers: take(&mut doc, "home_managers")?,
            away_managers: take(&mut doc, "away_managers")?,
        })
    }

    pub fn read_lineups(&self, match_id: u64) -> Result<LineupTables, LoadError> {
        let mut doc = self.read(&DocumentRequest::Lineups { match_id })?;
        Ok(LineupTables {
            lineups: take(&mut doc, "lineups")?,
            cards: take(&mut doc, "cards")?,
            positions: take(&mut doc, "positions")?,
        })
    }

    pub fn read_events(&self, match_id: u64) -> Result<EventTables, LoadError> {
        let mut doc = self.read(&DocumentRequest::Events { match_id })?;
        Ok(EventTables {
            events: take(&mut doc, "events")?,
            tactics_lineup: take(&mut doc, "tactics_lineup")?,
            related_events: take(&mut doc, "related_events")?,
            shot_freeze_frame: take(&mut doc, "shot_freeze_frame")?,
        })
    }

    pub fn read_three_sixty(&self, match_id: u64) -> Result<ThreeSixtyTables, LoadError> {
        let mut doc = self.read(&DocumentRequest::ThreeSixty { match_id })?;
        Ok(ThreeSixtyTables {
            visible_area: take(&mut doc, "visible_area")?,
            freeze_frame: take(&mut doc, "freeze_frame")?,
        })
    }
}

#[cfg(feature = "parallel")]
impl DataSource {
    /// Read the lineups of many matches on the rayon pool, results in input order
    pub fn read_lineups_many(&self, match_ids: &[u64]) -> Vec<Result<LineupTables, LoadError>> {
        use rayon::prelude::*;
        match_ids.par_iter().map(|&id| self.read_lineups(id)).collect()
    }

    /// Read the events of many matches on the rayon pool, results in input order
    pub fn read_events_many(&self, match_ids: &[u64]) -> Vec<Result<EventTables, LoadError>> {
        use rayon::prelude::*;
        match_ids.par_iter().map(|&id| self.read_events(id)).collect()
    }

    /// Read the 360 frames of many matches on the rayon pool, results in input order
    pub fn read_three_sixty_many(
        &self,
        match_ids: &[u64],
    ) -> Vec<Result<ThreeSixtyTables, LoadError>> {
        use rayon::prelude::*;
        match_ids
            .par_iter()
            .map(|&id| self.read_three_sixty(id))
            .collect()
    }
}

fn take(doc: &mut NormalizedDocument, name: &str) -> Result<Table, LoadError> {
    doc.take_table(name).ok_or_else(|| LoadError::MissingTable {
        document: doc.document,
        table: name.to_string(),
    })
}
