//! Built-in plans for the open-data layout

use once_cell::sync::Lazy;

use super::types::{ExplodeOp, ExtractionPlan};
use crate::expand::CoordinateKind;
use crate::models::DocumentType;

pub static COMPETITIONS: Lazy<ExtractionPlan> =
    Lazy::new(|| ExtractionPlan::new(DocumentType::Competitions, "competitions"));

pub static MATCHES: Lazy<ExtractionPlan> = Lazy::new(|| {
    ExtractionPlan::new(DocumentType::Matches, "matches")
        .explode(ExplodeOp::records(
            "home_team.managers",
            "home_managers",
            &["match_id"],
        ))
        .explode(ExplodeOp::records(
            "away_team.managers",
            "away_managers",
            &["match_id"],
        ))
});

/// Lineup documents hold one record per team; players are lifted out first
/// and become the primary table.
pub static LINEUPS: Lazy<ExtractionPlan> = Lazy::new(|| {
    ExtractionPlan::new(DocumentType::Lineups, "lineups")
        .root(ExplodeOp::records(
            "lineup",
            "lineups",
            &["team_id", "team_name"],
        ))
        .explode(ExplodeOp::records(
            "cards",
            "cards",
            &["player_id", "player_name"],
        ))
        .explode(ExplodeOp::records(
            "positions",
            "positions",
            &["player_id", "player_name"],
        ))
});

pub static EVENTS: Lazy<ExtractionPlan> = Lazy::new(|| {
    ExtractionPlan::new(DocumentType::Events, "events")
        .explode(ExplodeOp::records("tactics.lineup", "tactics_lineup", &["id"]))
        .explode(ExplodeOp::pairwise("related_events", "related_events", &["id"]))
        .explode(ExplodeOp::records(
            "shot.freeze_frame",
            "shot_freeze_frame",
            &["id"],
        ))
        .expand("events", "location", CoordinateKind::Pair)
        .expand("events", "pass.end_location", CoordinateKind::Pair)
        .expand("events", "carry.end_location", CoordinateKind::Pair)
        .expand("events", "shot.end_location", CoordinateKind::TripleOptionalZ)
        .expand("events", "goalkeeper.end_location", CoordinateKind::Pair)
        .expand("shot_freeze_frame", "location", CoordinateKind::Pair)
});

pub static THREE_SIXTY: Lazy<ExtractionPlan> = Lazy::new(|| {
    ExtractionPlan::new(DocumentType::ThreeSixty, "visible_area")
        .explode(ExplodeOp::records(
            "freeze_frame",
            "freeze_frame",
            &["event_uuid"],
        ))
        .expand(
            "visible_area",
            "visible_area",
            CoordinateKind::InterleavedPairList,
        )
        .expand("freeze_frame", "location", CoordinateKind::Pair)
});

/// Built-in plan for a document type
pub fn builtin_plan(document: DocumentType) -> &'static ExtractionPlan {
    match document {
        DocumentType::Competitions => &*COMPETITIONS,
        DocumentType::Matches => &*MATCHES,
        DocumentType::Lineups => &*LINEUPS,
        DocumentType::Events => &*EVENTS,
        DocumentType::ThreeSixty => &*THREE_SIXTY,
    }
}
