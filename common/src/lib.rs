pub mod config;
pub mod game;
pub mod highscore;
pub mod logger;
pub mod render;

pub use game::{
    Direction, GameCommand, GameOverReason, GameSettings, GameState, Point, RunState, SessionRng,
    Snake, SnakeSession,
};
