use crate::error::{MindstampsError, MsResult};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One band of the table: any distance strictly below `below_km` earns `points`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub below_km: f64,
    pub points: u32,
}

// [low, high) bands, checked smallest first.
const STANDARD_TIERS: [(f64, u32); 9] = [
    (1.0, 1000),
    (5.0, 900),
    (25.0, 800),
    (100.0, 650),
    (250.0, 500),
    (500.0, 350),
    (1000.0, 200),
    (1500.0, 100),
    (2000.0, 50),
];
const STANDARD_FLOOR: u32 = 0;

const CLASSIC_TIERS: [(f64, u32); 5] = [
    (1.0, 1000),
    (10.0, 800),
    (50.0, 600),
    (100.0, 400),
    (500.0, 200),
];
const CLASSIC_FLOOR: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TierPreset {
    /// Generous table, zero points from 2000 km.
    #[default]
    Standard,
    /// Older strict table that never drops below 100 points.
    Classic,
}

/// Ordered distance-to-points mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierTable {
    tiers: Vec<Tier>,
    floor: u32,
}

impl Default for TierTable {
    fn default() -> Self {
        Self::preset(TierPreset::Standard)
    }
}

impl TierTable {
    pub fn preset(preset: TierPreset) -> Self {
        let (bands, floor): (&[(f64, u32)], u32) = match preset {
            TierPreset::Standard => (&STANDARD_TIERS, STANDARD_FLOOR),
            TierPreset::Classic => (&CLASSIC_TIERS, CLASSIC_FLOOR),
        };
        Self {
            tiers: bands
                .iter()
                .map(|&(below_km, points)| Tier { below_km, points })
                .collect(),
            floor,
        }
    }

    pub fn new(tiers: Vec<Tier>, floor: u32) -> MsResult<Self> {
        let table = Self { tiers, floor };
        table.validate()?;
        Ok(table)
    }

    /// Parses `upper_km:points` pairs, e.g. `1:1000,5:900,*:0`.
    /// The `*` entry sets the floor; without one the floor is 0.
    pub fn parse(s: &str) -> MsResult<Self> {
        let mut tiers = Vec::new();
        let mut floor = None;

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (km, pts) = part.split_once(':').ok_or_else(|| {
                MindstampsError::Config(format!("Tier '{}' is not in 'km:points' form", part))
            })?;
            let points: u32 = pts.trim().parse().map_err(|_| {
                MindstampsError::Config(format!("Invalid points '{}' in tier '{}'", pts, part))
            })?;

            if km.trim() == "*" {
                if floor.replace(points).is_some() {
                    return Err(MindstampsError::Config(
                        "Tier table has more than one '*' entry".to_string(),
                    ));
                }
                continue;
            }

            let below_km: f64 = km.trim().parse().map_err(|_| {
                MindstampsError::Config(format!("Invalid distance '{}' in tier '{}'", km, part))
            })?;
            tiers.push(Tier { below_km, points });
        }

        Self::new(tiers, floor.unwrap_or(0))
    }

    fn validate(&self) -> MsResult<()> {
        if self.tiers.is_empty() {
            return Err(MindstampsError::Config(
                "Tier table needs at least one band".to_string(),
            ));
        }

        let mut prev: Option<Tier> = None;
        for tier in &self.tiers {
            if !tier.below_km.is_finite() || tier.below_km <= 0.0 {
                return Err(MindstampsError::Config(format!(
                    "Tier threshold {} must be finite and positive",
                    tier.below_km
                )));
            }
            if let Some(p) = prev {
                if tier.below_km <= p.below_km {
                    return Err(MindstampsError::Config(format!(
                        "Tier thresholds must increase ({} after {})",
                        tier.below_km, p.below_km
                    )));
                }
                if tier.points > p.points {
                    return Err(MindstampsError::Config(format!(
                        "Tier points must not increase with distance ({} after {})",
                        tier.points, p.points
                    )));
                }
            }
            prev = Some(*tier);
        }

        if let Some(last) = prev {
            if self.floor > last.points {
                return Err(MindstampsError::Config(format!(
                    "Floor {} is above the last band's {} points",
                    self.floor, last.points
                )));
            }
        }
        Ok(())
    }

    /// First band whose upper bound is above `distance_km` wins; past the last band the
    /// floor applies. A NaN distance fails every comparison and lands on the floor.
    pub fn points_for(&self, distance_km: f64) -> u32 {
        self.tiers
            .iter()
            .find(|t| distance_km < t.below_km)
            .map_or(self.floor, |t| t.points)
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn max_points(&self) -> u32 {
        self.tiers.first().map_or(self.floor, |t| t.points)
    }
}

/// Points on the standard table.
pub fn score_for_distance(distance_km: f64) -> u32 {
    STANDARD_TIERS
        .iter()
        .find(|&&(below, _)| distance_km < below)
        .map_or(STANDARD_FLOOR, |&(_, pts)| pts)
}
