//! Frame production from game state to terminal cells: asset loading,
//! canvas rasterization with and without sprites, and the full screen
//! drawn into a ratatui test backend.

use billy_run::assets::{self, AssetSource, AssetStore, ImageId, Rgb};
use billy_run::config::GameConfig;
use billy_run::game::Game;
use billy_run::render::{PixelCanvas, Renderer, Surface, WORLD_HEIGHT};
use billy_run::storage::MemoryStore;
use billy_run::ui;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::fs;
use tempfile::TempDir;

const SKY_TOP: Rgb = Rgb(0x87, 0xce, 0xeb);
const PLAYER_TINT: Rgb = Rgb(230, 140, 50);

fn game_for(canvas: &PixelCanvas) -> Game {
    Game::new(
        GameConfig::default(),
        canvas.width(),
        canvas.height(),
        Box::new(MemoryStore::new()),
        0,
    )
    .with_seed(3)
}

fn all_pixels(canvas: &PixelCanvas) -> Vec<Rgb> {
    let (w, h) = canvas.pixel_size();
    (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .map(|(x, y)| canvas.pixel(x, y))
        .collect()
}

fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer.get(x, y).symbol().to_string())
        .collect()
}

#[test]
fn test_builtin_assets_cover_every_pixel() {
    let store = AssetStore::new();
    let loaded = assets::spawn_loader(&store, AssetSource::Builtin)
        .join()
        .unwrap();
    assert_eq!(loaded, ImageId::all().len());
    assert_eq!(store.ready_count(), store.len());

    let mut canvas = PixelCanvas::new(125, 32);
    let mut game = game_for(&canvas);
    game.start(0);
    game.score = 12;
    game.update(16);

    Renderer::new(false).draw(&mut canvas, &game, &store);
    // The background is opaque, so nothing is left at the clear colour
    assert!(all_pixels(&canvas).iter().all(|&p| p != Rgb(0, 0, 0)));
}

#[test]
fn test_missing_assets_fall_back_to_flat_shapes() {
    let dir = TempDir::new().unwrap();
    let store = AssetStore::new();
    let loaded = assets::spawn_loader(&store, AssetSource::Directory(dir.path().to_path_buf()))
        .join()
        .unwrap();
    assert_eq!(loaded, 0);

    let mut canvas = PixelCanvas::new(125, 32);
    let game = game_for(&canvas);
    Renderer::new(false).draw(&mut canvas, &game, &store);

    assert_eq!(canvas.pixel(0, 0), SKY_TOP);
    assert!(all_pixels(&canvas).contains(&PLAYER_TINT));
}

#[test]
fn test_asset_directory_loads_only_present_sheets() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("base.txt"),
        "g #40a040\n---\ngggg\ngggg\n",
    )
    .unwrap();

    let store = AssetStore::new();
    let loaded = assets::spawn_loader(&store, AssetSource::Directory(dir.path().to_path_buf()))
        .join()
        .unwrap();
    assert_eq!(loaded, 1);
    assert!(store.is_ready(ImageId::Base));
    assert!(!store.is_ready(ImageId::Player));

    let mut canvas = PixelCanvas::new(125, 32);
    let game = game_for(&canvas);
    Renderer::new(true).draw(&mut canvas, &game, &store);

    let (_, h) = canvas.pixel_size();
    assert_eq!(canvas.pixel(0, h - 1), Rgb(0x40, 0xa0, 0x40));
}

#[test]
fn test_full_screen_draws_canvas_and_start_prompt() {
    let store = AssetStore::new();
    assets::spawn_loader(&store, AssetSource::Builtin)
        .join()
        .unwrap();

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    let field = ui::game_layout(terminal.size().unwrap()).field;
    let mut canvas = PixelCanvas::new(field.width, field.height);
    let game = game_for(&canvas);
    Renderer::new(false).draw(&mut canvas, &game, &store);

    terminal
        .draw(|frame| ui::render_game(frame, &game, &canvas))
        .unwrap();

    assert!(row_text(&terminal, 0).contains("Billy Run"));
    assert_eq!(
        terminal.backend().buffer().get(field.x, field.y).symbol(),
        "▀"
    );
    let screen: String = (0..24).map(|y| row_text(&terminal, y)).collect();
    assert!(screen.contains("BILLY RUN"));
    assert!(screen.contains("High score 0"));
}

#[test]
fn test_jump_apex_stays_on_a_small_terminal() {
    let field = ui::game_layout(ratatui::layout::Rect::new(0, 0, 80, 24)).field;
    let canvas = PixelCanvas::new(field.width, field.height);
    assert_eq!(canvas.height(), WORLD_HEIGHT);

    let mut game = game_for(&canvas);
    assert_eq!(game.layout.ground_level, 290.0);
    game.start(0);
    assert!(game.jump());

    let mut highest = game.player.y;
    for tick in 1..=100 {
        game.update(tick * 16);
        highest = highest.min(game.player.draw_rect().y);
    }
    assert!(!game.player.is_jumping, "landed again");
    assert!(highest >= 0.0, "sprite top reached {}", highest);
    assert!(highest < game.layout.ground_level - 200.0);
}
