use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::highscore::HighScoreStore;
use crate::log;

use super::session_rng::SessionRng;
use super::state::GameState;
use super::types::{Direction, RunState};

/// The host input surface: four turns plus the two game actions, and an
/// explicit shutdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Turn(Direction),
    TogglePause,
    StartOrRestart,
    Quit,
}

/// Drives the game: sleeps for the score-dependent tick interval,
/// advances the state, and applies host commands in between. Commands
/// and ticks both run under the state mutex, so a turn always lands
/// fully before the tick that follows it.
pub struct SnakeSession {
    state: Arc<Mutex<GameState>>,
    rng: SessionRng,
    high_score_store: HighScoreStore,
    persisted_high_score: u32,
}

impl SnakeSession {
    pub fn new(
        state: Arc<Mutex<GameState>>,
        rng: SessionRng,
        high_score_store: HighScoreStore,
    ) -> Self {
        let persisted_high_score = state.lock().unwrap().high_score();
        Self {
            state,
            rng,
            high_score_store,
            persisted_high_score,
        }
    }

    pub async fn run(mut self, mut command_rx: mpsc::UnboundedReceiver<GameCommand>) {
        let mut next_tick = Instant::now() + self.state.lock().unwrap().tick_interval();

        loop {
            tokio::select! {
                _ = sleep_until(next_tick) => {
                    self.tick();
                    next_tick = Instant::now() + self.state.lock().unwrap().tick_interval();
                }
                command = command_rx.recv() => {
                    match command {
                        Some(GameCommand::Turn(direction)) => {
                            self.state.lock().unwrap().set_direction(direction);
                        }
                        Some(GameCommand::TogglePause) => {
                            self.state.lock().unwrap().toggle_pause();
                        }
                        Some(GameCommand::StartOrRestart) => {
                            self.state.lock().unwrap().start(&mut self.rng);
                        }
                        Some(GameCommand::Quit) | None => break,
                    }
                }
            }
        }

        log!("Game loop stopped");
    }

    fn tick(&mut self) {
        let high_score = {
            let mut state = self.state.lock().unwrap();
            state.advance(&mut self.rng);
            if state.run_state() != RunState::GameOver {
                return;
            }
            state.high_score()
        };

        if high_score > self.persisted_high_score {
            self.high_score_store.save(high_score);
            self.persisted_high_score = high_score;
        }
    }
}
