//! High score persistence across sessions, using the file store in a
//! temporary data directory the way the binary does.

use billy_run::config::GameConfig;
use billy_run::game::{Game, GameStatus, ObstacleKind};
use billy_run::storage::{load_high_score, save_high_score, FileStore, KeyValueStore};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn open_game(path: &Path) -> Game {
    Game::new(
        GameConfig::default(),
        1000.0,
        500.0,
        Box::new(FileStore::open(path)),
        0,
    )
    .with_seed(7)
}

/// Play one run that ends on a priest with `score` points.
fn play_to_game_over(game: &mut Game, score: u32) {
    game.start(0);
    game.score = score;
    game.place_obstacle(ObstacleKind::Priest, 5.0);
    assert!(game.update(16).hit);
    assert!(game.update(216).game_over);
    assert_eq!(game.status(), GameStatus::GameOver);
}

#[test]
fn test_high_score_survives_new_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let mut store = FileStore::open(&path);
    save_high_score(&mut store, 10, 365).unwrap();

    let mut game = open_game(&path);
    assert_eq!(game.high_score, 10);
    play_to_game_over(&mut game, 42);
    assert_eq!(game.high_score, 42);

    let reopened = open_game(&path);
    assert_eq!(reopened.high_score, 42);
}

#[test]
fn test_lower_score_never_lowers_stored_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let mut game = open_game(&path);
    play_to_game_over(&mut game, 42);

    let mut game = open_game(&path);
    play_to_game_over(&mut game, 5);
    assert_eq!(game.high_score, 42);

    let store = FileStore::open(&path);
    assert_eq!(load_high_score(&store), 42);
}

#[test]
fn test_zero_score_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let mut game = open_game(&path);
    play_to_game_over(&mut game, 0);
    assert!(!path.exists());
}

#[test]
fn test_tampered_store_starts_from_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let mut game = open_game(&path);
    play_to_game_over(&mut game, 42);

    let json = fs::read_to_string(&path).unwrap();
    fs::write(&path, json.replace("\"42\"", "\"9999\"")).unwrap();

    let game = open_game(&path);
    assert_eq!(game.high_score, 0);
}

#[test]
fn test_expired_high_score_reads_as_zero() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let mut store = FileStore::open(&path);
    save_high_score(&mut store, 30, -1).unwrap();
    assert_eq!(store.get("billyHighScore"), None);

    let game = open_game(&path);
    assert_eq!(game.high_score, 0);
}

#[test]
fn test_reset_high_score_clears_file_entry() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let mut game = open_game(&path);
    play_to_game_over(&mut game, 12);
    game.reset_high_score().unwrap();
    assert_eq!(game.high_score, 0);

    let game = open_game(&path);
    assert_eq!(game.high_score, 0);
}

#[test]
fn test_extreme_ttl_from_config_still_saves() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let config = GameConfig {
        high_score_ttl_days: i64::MAX,
        ..GameConfig::default()
    };

    let mut game = Game::new(config, 1000.0, 500.0, Box::new(FileStore::open(&path)), 0);
    play_to_game_over(&mut game, 8);

    let game = open_game(&path);
    assert_eq!(game.high_score, 8);
}
