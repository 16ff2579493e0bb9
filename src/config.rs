use crate::consts::{DEFAULT_SWIPE_THRESHOLD_PX, EARTH_RADIUS_KM};
use crate::error::{MindstampsError, MsResult};
use crate::model::SortOrder;
use crate::scorer::TierPreset;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub scoring: ScoringConfig,
    #[command(flatten)]
    pub journal: JournalParams,
    #[command(flatten)]
    pub game: GameParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Custom tier table, e.g. "1:1000,5:900,25:800,*:0". Empty uses the preset.
    #[arg(long, default_value = "")]
    pub tiers: String,

    #[arg(long = "tier-preset", default_value_t = TierPreset::Standard)]
    pub preset: TierPreset,

    #[arg(long, default_value_t = EARTH_RADIUS_KM)]
    pub earth_radius_km: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tiers: String::new(),
            preset: TierPreset::Standard,
            earth_radius_km: EARTH_RADIUS_KM,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JournalParams {
    #[arg(long, default_value_t = SortOrder::Newest)]
    pub sort: SortOrder,

    #[arg(long, default_value_t = DEFAULT_SWIPE_THRESHOLD_PX)]
    pub swipe_threshold_px: f32,
}

impl Default for JournalParams {
    fn default() -> Self {
        Self {
            sort: SortOrder::Newest,
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GameParams {
    /// Fixes the round order.
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> MsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MindstampsError::Config(format!("Could not read config '{}': {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Cheap checks that need no scorer; tier tables are checked when the scorer is built.
    pub fn validate(&self) -> MsResult<()> {
        if !self.journal.swipe_threshold_px.is_finite() || self.journal.swipe_threshold_px < 0.0 {
            return Err(MindstampsError::Config(format!(
                "swipe_threshold_px must be a non-negative number, got {}",
                self.journal.swipe_threshold_px
            )));
        }
        Ok(())
    }

    /// Copies over only the values typed on the command line, so file settings survive
    /// clap's defaults.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(scoring.tiers, "tiers");
        update_if_present!(scoring.preset, "preset");
        update_if_present!(scoring.earth_radius_km, "earth_radius_km");

        update_if_present!(journal.sort, "sort");
        update_if_present!(journal.swipe_threshold_px, "swipe_threshold_px");

        update_if_present!(game.seed, "seed");
    }
}
