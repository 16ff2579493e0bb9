use crate::geo::Coordinate;
use crate::model::MemoryId;
use serde::Serialize;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Waiting for the caller to supply records.
    Loading,
    /// A memory is shown and the player is placing a guess.
    Playing,
    /// The guess has been scored and the answer revealed.
    Result,
    Finished,
    NoEligibleRecords,
    /// Fetching records failed; nothing to play until a restart.
    LoadFailed,
}

/// Outcome of one scored round.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub record_id: MemoryId,
    pub guess: Coordinate,
    pub actual: Coordinate,
    pub place: String,
    pub distance_km: f64,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub rounds: usize,
    pub total_score: u32,
    /// Per-memory average, rounded to the nearest point.
    pub average_score: u32,
    pub results: Vec<RoundResult>,
}
