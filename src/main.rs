use billy_run::assets::{self, AssetSource, AssetStore};
use billy_run::audio::{AudioCues, BellBackend, CueBackend};
use billy_run::build_info;
use billy_run::clock::{Clock, FramePacer, SystemClock};
use billy_run::config::GameConfig;
use billy_run::game::Game;
use billy_run::input;
use billy_run::render::{PixelCanvas, Renderer, Surface};
use billy_run::storage::{self, FileStore};
use billy_run::ui;
use chrono::{Local, Timelike};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "billy-run")]
#[command(about = "Billy Run - catch birds and mice, dodge priests", disable_version_flag = true)]
struct Cli {
    /// Game config file (JSON, any subset of fields)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for the high score store, config and log [default: ~/.billy-run]
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Directory of text pixel-art sheets replacing the built-in ones
    #[arg(long)]
    assets: Option<PathBuf>,
    /// Fixed seed for obstacle spawning
    #[arg(long)]
    seed: Option<u64>,
    /// Start with sound muted
    #[arg(long)]
    muted: bool,
    /// Forget the stored high score before playing
    #[arg(long)]
    reset_high_score: bool,
    /// Show version information
    #[arg(short = 'V', long)]
    version: bool,
}

type Term = Terminal<CrosstermBackend<Stdout>>;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", build_info::version_line());
        return Ok(());
    }

    let data_dir = match &cli.data_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            dir.clone()
        }
        None => storage::data_dir()?,
    };
    init_logging(&data_dir)?;
    tracing::info!(version = %build_info::version_line(), data_dir = %data_dir.display(), "starting");

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| data_dir.join("config.json"));
    let config = GameConfig::load_or_default(&config_path);
    let store = FileStore::open(data_dir.join("store.json"));

    // Sheets stream in while the first frames draw with fallbacks
    let asset_store = AssetStore::new();
    let source = match &cli.assets {
        Some(dir) => AssetSource::Directory(dir.clone()),
        None => AssetSource::Builtin,
    };
    let _loader = assets::spawn_loader(&asset_store, source);

    let renderer = Renderer::for_hour(Local::now().hour());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let clock = SystemClock::new();
    let field = ui::game_layout(terminal.size()?).field;
    let canvas = PixelCanvas::new(field.width, field.height);
    let mut game = Game::new(
        config,
        canvas.width(),
        canvas.height(),
        Box::new(store),
        clock.now_ms(),
    )
    .with_audio(AudioCues::new(audio_backend()));
    if let Some(seed) = cli.seed {
        game = game.with_seed(seed);
    }
    if cli.muted {
        game.toggle_mute();
    }

    let result = if cli.reset_high_score {
        game.reset_high_score()
    } else {
        Ok(())
    };
    let result =
        result.and_then(|_| run(&mut terminal, &mut game, canvas, &asset_store, renderer, &clock));

    restore_terminal(&mut terminal)?;
    tracing::info!(high_score = game.high_score, "exiting");
    result
}

/// Main loop: input, then one update and draw per frame interval.
fn run(
    terminal: &mut Term,
    game: &mut Game,
    mut canvas: PixelCanvas,
    asset_store: &AssetStore,
    renderer: Renderer,
    clock: &SystemClock,
) -> io::Result<()> {
    let mut pacer = FramePacer::default();

    loop {
        if event::poll(pacer.time_to_next_frame())? {
            let event = event::read()?;
            if let Some(control) = input::map_event(&event) {
                if !input::apply(game, control, clock.now_ms()) {
                    return Ok(());
                }
            }
        }

        if !pacer.frame_due() {
            continue;
        }

        let field = ui::game_layout(terminal.size()?).field;
        if canvas.pixel_size() != (field.width as usize, field.height as usize * 2) {
            canvas.resize(field.width, field.height);
            game.resize(canvas.width(), canvas.height());
        }

        game.update(clock.now_ms());
        renderer.draw(&mut canvas, game, asset_store);
        terminal.draw(|frame| ui::render_game(frame, game, &canvas))?;
    }
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Log to `<data dir>/billy-run.log`; the terminal belongs to the game.
/// `BILLY_RUN_LOG` takes the usual env-filter syntax.
fn init_logging(data_dir: &Path) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("billy-run.log"))?;
    let filter = EnvFilter::try_from_env("BILLY_RUN_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[cfg(feature = "audio")]
fn audio_backend() -> Box<dyn CueBackend> {
    match billy_run::audio::tones::ToneBackend::new() {
        Ok(backend) => Box::new(backend),
        Err(e) => {
            tracing::warn!(error = %e, "no audio device, using the terminal bell");
            Box::new(BellBackend::new(io::stdout()))
        }
    }
}

#[cfg(not(feature = "audio"))]
fn audio_backend() -> Box<dyn CueBackend> {
    Box::new(BellBackend::new(io::stdout()))
}
