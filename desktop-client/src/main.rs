mod app;
mod config;
mod surface;

use std::sync::{Arc, Mutex};

use clap::Parser;
use common::game::{GameState, SessionRng, SnakeSession};
use common::highscore::HighScoreStore;
use common::log;
use common::logger::init_logger;
use eframe::egui;
use tokio::sync::mpsc;

use app::SnakeApp;

#[derive(Parser, Debug)]
#[command(name = "snake_desktop_client", about = "Single-player grid snake")]
struct Args {
    /// Path to the YAML config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: String,

    /// Fixed RNG seed, random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logger(None);

    let config_manager = config::get_config_manager(&args.config);
    let config = config_manager.get_config()?;

    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Session seed: {}", rng.seed());

    let high_score_store = HighScoreStore::new(config.high_score_file.clone());
    let high_score = high_score_store.load();
    log!("Loaded high score: {}", high_score);

    let state = Arc::new(Mutex::new(GameState::new(&config.game, high_score, &mut rng)));
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let session = SnakeSession::new(state.clone(), rng, high_score_store);
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(session.run(command_rx));
    });

    let canvas = config.game.canvas_px() as f32;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([canvas + 20.0, canvas + 140.0])
            .with_title("Snake"),
        ..Default::default()
    };

    let settings = config.game;
    eframe::run_native(
        "Snake",
        options,
        Box::new(move |_cc| Ok(Box::new(SnakeApp::new(settings, state, command_tx)))),
    )?;

    Ok(())
}
