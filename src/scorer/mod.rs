pub mod haversine;
pub mod tiers;
pub mod types;

pub use self::haversine::{distance_km, distance_on_sphere};
pub use self::tiers::{score_for_distance, Tier, TierPreset, TierTable};
pub use self::types::GuessScore;

use crate::config::ScoringConfig;
use crate::consts::EARTH_RADIUS_KM;
use crate::error::{MindstampsError, MsResult};
use crate::geo::Coordinate;
use tracing::debug;

/// Scores guesses against a configured tier table.
#[derive(Debug, Clone, PartialEq)]
pub struct Scorer {
    pub tiers: TierTable,
    pub earth_radius_km: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self {
            tiers: TierTable::default(),
            earth_radius_km: EARTH_RADIUS_KM,
        }
    }
}

impl Scorer {
    pub fn new(config: &ScoringConfig) -> MsResult<Self> {
        if !config.earth_radius_km.is_finite() || config.earth_radius_km <= 0.0 {
            return Err(MindstampsError::Config(format!(
                "Earth radius must be positive, got {}",
                config.earth_radius_km
            )));
        }

        let tiers = if config.tiers.trim().is_empty() {
            TierTable::preset(config.preset)
        } else {
            TierTable::parse(&config.tiers)?
        };
        debug!(
            "Scorer: {} bands, floor {}, radius {} km",
            tiers.tiers().len(),
            tiers.floor(),
            config.earth_radius_km
        );

        Ok(Self {
            tiers,
            earth_radius_km: config.earth_radius_km,
        })
    }

    pub fn distance_km(&self, a: Coordinate, b: Coordinate) -> f64 {
        distance_on_sphere(a, b, self.earth_radius_km)
    }

    pub fn points_for(&self, distance_km: f64) -> u32 {
        self.tiers.points_for(distance_km)
    }

    pub fn score_guess(&self, guess: Coordinate, actual: Coordinate) -> GuessScore {
        let distance_km = self.distance_km(guess, actual);
        GuessScore {
            distance_km,
            points: self.points_for(distance_km),
        }
    }
}
