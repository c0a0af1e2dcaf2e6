//! Config file loading tests.

use std::io::Write;
use strictly_connect4::{Mode, OpponentId};
use strictly_connect4_server::{AppConfig, SessionController};

#[test]
fn test_load_full_file() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let path = dir.path().join("connect4.toml");
    let mut file = std::fs::File::create(&path).expect("Create config");
    writeln!(
        file,
        r#"
opponents = ["minimaxAI", "stupidAI"]
default_opponent = "stupidAI"

[server]
host = "0.0.0.0"
port = 6001

[engine]
minimax_depth = 3
seed = 17
"#
    )
    .expect("Write config");

    let config = AppConfig::load(&path).expect("Valid config");
    assert_eq!(config.server().host(), "0.0.0.0");
    assert_eq!(*config.server().port(), 6001);
    assert_eq!(*config.engine().minimax_depth(), 3);
    assert_eq!(*config.engine().seed(), 17);
    assert_eq!(config.initial_mode(), Mode::HumanVsAutomated(OpponentId::FixedOrder));

    let controller = SessionController::from_config(&config).expect("Default opponent enabled");
    assert_eq!(controller.registry().len(), 2);
    assert_eq!(controller.describe_opponents().current, "stupidAI");
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let config = AppConfig::load(dir.path().join("absent.toml")).expect("Defaults");
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[engine]\nmonte_carlo_playouts = 0\n").expect("Write config");
    let err = AppConfig::load(&path).expect_err("Zero playouts");
    assert!(err.message.contains("monte_carlo_playouts"));
}

#[test]
fn test_cli_host_and_port_override_file() {
    let config = AppConfig::default().with_overrides(Some("0.0.0.0".to_string()), Some(7000));
    assert_eq!(config.server().host(), "0.0.0.0");
    assert_eq!(*config.server().port(), 7000);
}
