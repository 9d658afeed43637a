mod session;
mod session_rng;
mod settings;
mod snake;
mod state;
mod types;

pub use session::{GameCommand, SnakeSession};
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use snake::Snake;
pub use state::GameState;
pub use types::{Direction, GameOverReason, Point, RunState};
