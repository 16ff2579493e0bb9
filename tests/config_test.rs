use clap::{CommandFactory, FromArgMatches, Parser};
use mindstamps::config::{Config, JournalParams, ScoringConfig};
use mindstamps::consts::{DEFAULT_SWIPE_THRESHOLD_PX, EARTH_RADIUS_KM};
use mindstamps::model::SortOrder;
use mindstamps::scorer::{Scorer, TierPreset};
use std::fs;

// Minimal stand-in for the binary's parser
#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let argv = std::iter::once("test").chain(args.iter().copied());
    let matches = TestCli::command().get_matches_from(argv);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.config, matches)
}

fn write_config(json: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, json).unwrap();
    (dir, path)
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.scoring.preset, TierPreset::Standard);
    assert!(config.scoring.tiers.is_empty());
    assert_eq!(config.scoring.earth_radius_km, EARTH_RADIUS_KM);
    assert_eq!(config.journal.sort, SortOrder::Newest);
    assert_eq!(config.journal.swipe_threshold_px, DEFAULT_SWIPE_THRESHOLD_PX);
    assert_eq!(config.game.seed, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_clap_defaults_match_default_impl() {
    let (config, _) = parse(&[]);
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let (_dir, path) = write_config(r#"{ "journal": { "sort": "title" } }"#);
    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.journal.sort, SortOrder::Title);
    assert_eq!(config.journal.swipe_threshold_px, DEFAULT_SWIPE_THRESHOLD_PX);
    assert_eq!(config.scoring, ScoringConfig::default());
}

#[test]
fn test_full_file() {
    let (_dir, path) = write_config(
        r#"{
            "scoring": { "tiers": "10:100,*:1", "preset": "classic", "earth_radius_km": 6378.1 },
            "journal": { "sort": "oldest", "swipe_threshold_px": 30.0 },
            "game": { "seed": 99 }
        }"#,
    );
    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.scoring.tiers, "10:100,*:1");
    assert_eq!(config.scoring.preset, TierPreset::Classic);
    assert_eq!(config.scoring.earth_radius_km, 6378.1);
    assert_eq!(
        config.journal,
        JournalParams {
            sort: SortOrder::Oldest,
            swipe_threshold_px: 30.0,
        }
    );
    assert_eq!(config.game.seed, Some(99));

    // Custom tiers beat the preset
    let scorer = Scorer::new(&config.scoring).unwrap();
    assert_eq!(scorer.points_for(5.0), 100);
    assert_eq!(scorer.points_for(50.0), 1);
}

#[test]
fn test_missing_file() {
    assert!(Config::load_from_file("/definitely/not/here.json").is_err());
}

#[test]
fn test_malformed_file() {
    let (_dir, path) = write_config("{ scoring: ");
    assert!(Config::load_from_file(&path).is_err());

    let (_dir, path) = write_config(r#"{ "journal": { "sort": "sideways" } }"#);
    assert!(Config::load_from_file(&path).is_err());
}

#[test]
fn test_negative_swipe_threshold_is_invalid() {
    let (_dir, path) = write_config(r#"{ "journal": { "swipe_threshold_px": -5.0 } }"#);
    assert!(Config::load_from_file(&path).is_err());
}

#[test]
fn test_cli_overrides_only_typed_values() {
    let (_dir, path) = write_config(
        r#"{ "scoring": { "preset": "classic" }, "journal": { "sort": "title" }, "game": { "seed": 1 } }"#,
    );
    let mut config = Config::load_from_file(&path).unwrap();
    let (cli, matches) = parse(&["--sort", "oldest", "--seed", "7"]);

    config.merge_from_cli(&cli, &matches);

    // Typed on the command line
    assert_eq!(config.journal.sort, SortOrder::Oldest);
    assert_eq!(config.game.seed, Some(7));
    // Only defaulted by clap, so the file wins
    assert_eq!(config.scoring.preset, TierPreset::Classic);
    assert_eq!(config.journal.swipe_threshold_px, DEFAULT_SWIPE_THRESHOLD_PX);
}

#[test]
fn test_cli_flags_parse() {
    let (config, _) = parse(&[
        "--tier-preset",
        "CLASSIC",
        "--tiers",
        "1:10,*:0",
        "--earth-radius-km",
        "1",
        "--swipe-threshold-px",
        "12.5",
    ]);
    assert_eq!(config.scoring.preset, TierPreset::Classic);
    assert_eq!(config.scoring.tiers, "1:10,*:0");
    assert_eq!(config.scoring.earth_radius_km, 1.0);
    assert_eq!(config.journal.swipe_threshold_px, 12.5);
}
