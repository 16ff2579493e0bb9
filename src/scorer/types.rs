use serde::{Deserialize, Serialize};

/// Distance and points for one guess.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessScore {
    pub distance_km: f64,
    pub points: u32,
}
