use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use unhappy_reptiles::config::{Cli, GameConfig};

#[test]
fn defaults_match_game_config_default() {
    let cli = Cli::try_parse_from(["unhappy_reptiles"]).unwrap();
    assert_eq!(GameConfig::from(cli), GameConfig::default());
}

#[test]
fn flags_are_carried_over() {
    let cli = Cli::try_parse_from([
        "unhappy_reptiles",
        "--assets",
        "art",
        "--frame-ms",
        "16",
        "--score-tick-limit",
        "5",
        "--scale",
        "3",
        "--seed",
        "99",
        "--log-file",
        "game.log",
    ])
    .unwrap();
    let config = GameConfig::from(cli);

    assert_eq!(config.asset_dir, PathBuf::from("art"));
    assert_eq!(config.frame, Duration::from_millis(16));
    assert_eq!(config.score_tick_limit, 5);
    assert_eq!(config.scale, 3);
    assert_eq!(config.seed, Some(99));
    assert_eq!(config.log_file, Some(PathBuf::from("game.log")));
}

#[test]
fn zero_scale_is_rejected() {
    assert!(Cli::try_parse_from(["unhappy_reptiles", "--scale", "0"]).is_err());
}

#[test]
fn zero_timings_are_raised_to_one() {
    let cli =
        Cli::try_parse_from(["unhappy_reptiles", "--frame-ms", "0", "--score-tick-limit", "0"])
            .unwrap();
    let config = GameConfig::from(cli);
    assert_eq!(config.frame, Duration::from_millis(1));
    assert_eq!(config.score_tick_limit, 1);
}
