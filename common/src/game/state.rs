use std::time::Duration;

use crate::log;

use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snake::Snake;
use super::types::{Direction, GameOverReason, Point, RunState};

pub const FOOD_SCORE: u32 = 10;
pub const BASE_TICK_MS: u64 = 200;
pub const MIN_TICK_MS: u64 = 100;
pub const SPEEDUP_STEP_MS: u64 = 10;
pub const SPEEDUP_SCORE_STEP: u32 = 50;

const FOOD_SAMPLE_ATTEMPTS: u32 = 100;

/// Single-player snake state machine. All mutation goes through
/// `start`/`set_direction`/`toggle_pause`/`advance`; the renderer and UI
/// only read.
#[derive(Clone, Debug)]
pub struct GameState {
    grid_size: usize,
    snake: Snake,
    food: Point,
    direction: Direction,
    pending_direction: Option<Direction>,
    run_state: RunState,
    score: u32,
    high_score: u32,
    last_final_score: Option<u32>,
    game_over_reason: Option<GameOverReason>,
}

impl GameState {
    pub fn new(settings: &GameSettings, high_score: u32, rng: &mut SessionRng) -> Self {
        let grid_size = settings.grid_size;
        let snake = Snake::new(Point::new(grid_size / 2, grid_size / 2));
        let head = snake.head();
        let mut state = Self {
            grid_size,
            snake,
            food: head,
            direction: Direction::Right,
            pending_direction: None,
            run_state: RunState::Idle,
            score: 0,
            high_score,
            last_final_score: None,
            game_over_reason: None,
        };
        // A board with no free cell for food is already over
        state.respawn_food(rng);
        state
    }

    /// Begins a fresh game from any state.
    pub fn start(&mut self, rng: &mut SessionRng) {
        self.snake = Snake::new(Point::new(self.grid_size / 2, self.grid_size / 2));
        self.direction = Direction::Right;
        self.pending_direction = None;
        self.score = 0;
        self.game_over_reason = None;
        self.run_state = RunState::Running;
        self.respawn_food(rng);
        log!("Game started on a {0}x{0} grid", self.grid_size);
    }

    /// Requests a turn for the next tick. Ignored outside Running/Paused
    /// and for reversals into the snake's own neck.
    pub fn set_direction(&mut self, direction: Direction) {
        if !matches!(self.run_state, RunState::Running | RunState::Paused) {
            return;
        }
        if direction.is_opposite(&self.direction) {
            return;
        }
        self.pending_direction = Some(direction);
    }

    pub fn toggle_pause(&mut self) {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
            other => other,
        };
    }

    /// One tick: commit the pending turn, move the head, resolve
    /// collisions, food and growth.
    pub fn advance(&mut self, rng: &mut SessionRng) {
        if self.run_state != RunState::Running {
            return;
        }
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }

        let next_head = match self.next_head() {
            Ok(cell) => cell,
            Err(reason) => {
                self.finish_game(reason);
                return;
            }
        };

        if next_head == self.food {
            self.snake.push_head(next_head);
            self.score += FOOD_SCORE;
            log!(
                "Ate food at ({}, {}). Score: {}",
                next_head.x,
                next_head.y,
                self.score
            );
            self.respawn_food(rng);
        } else {
            self.snake.pop_tail();
            self.snake.push_head(next_head);
        }
    }

    /// Delay before the next tick: starts at 200ms and drops by 10ms for
    /// every 50 points, floored at 100ms.
    pub fn tick_interval(&self) -> Duration {
        let steps = u64::from(self.score / SPEEDUP_SCORE_STEP);
        let ms = BASE_TICK_MS
            .saturating_sub(SPEEDUP_STEP_MS * steps)
            .max(MIN_TICK_MS);
        Duration::from_millis(ms)
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn last_final_score(&self) -> Option<u32> {
        self.last_final_score
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    fn next_head(&self) -> Result<Point, GameOverReason> {
        let head = self.snake.head();
        let (dx, dy) = self.direction.offset();
        let x = head.x as i32 + dx;
        let y = head.y as i32 + dy;
        let size = self.grid_size as i32;
        if x < 0 || x >= size || y < 0 || y >= size {
            return Err(GameOverReason::WallCollision);
        }

        let next = Point::new(x as usize, y as usize);
        // Any body cell kills, the tail included: it only vacates after
        // the head has already landed
        if self.snake.contains(&next) {
            return Err(GameOverReason::SelfCollision);
        }
        Ok(next)
    }

    /// Places fresh food on an empty cell, ending the game when the
    /// snake covers the whole board.
    fn respawn_food(&mut self, rng: &mut SessionRng) {
        match sample_food(self.grid_size, &self.snake, rng) {
            Some(food) => self.food = food,
            None => self.finish_game(GameOverReason::BoardFull),
        }
    }

    fn finish_game(&mut self, reason: GameOverReason) {
        self.run_state = RunState::GameOver;
        self.game_over_reason = Some(reason);
        self.last_final_score = Some(self.score);
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        log!("Game over ({:?}). Final score: {}", reason, self.score);
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Point) {
        self.food = food;
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, cells: Vec<Point>) {
        self.snake = Snake::from_cells(cells);
    }
}

fn sample_food(grid_size: usize, snake: &Snake, rng: &mut SessionRng) -> Option<Point> {
    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let cell = Point::new(
            rng.random_range(0..grid_size),
            rng.random_range(0..grid_size),
        );
        if !snake.contains(&cell) {
            return Some(cell);
        }
    }

    // The board is crowded (or full), fall back to an exhaustive scan
    let mut empty_cells = Vec::new();
    for y in 0..grid_size {
        for x in 0..grid_size {
            let cell = Point::new(x, y);
            if !snake.contains(&cell) {
                empty_cells.push(cell);
            }
        }
    }
    if empty_cells.is_empty() {
        return None;
    }
    Some(empty_cells[rng.random_range(0..empty_cells.len())])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_state() -> (GameState, SessionRng) {
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(&GameSettings::default(), 0, &mut rng);
        state.start(&mut rng);
        (state, rng)
    }

    fn eat_n_foods_moving_right(state: &mut GameState, rng: &mut SessionRng, count: usize) {
        for i in 1..=count {
            let head = Point::new(10 + i, 10);
            state.set_food(head);
            state.advance(rng);
            assert_eq!(state.snake().head(), head);
        }
        // Park the food out of the way of subsequent moves
        state.set_food(Point::new(0, 0));
    }

    #[test]
    fn test_start_resets_state() {
        let (state, _) = started_state();
        assert_eq!(state.run_state(), RunState::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.snake().head(), Point::new(10, 10));
        assert_eq!(state.direction(), Direction::Right);
        assert!(!state.snake().contains(&state.food()));
    }

    #[test]
    fn test_advance_is_noop_before_start() {
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(&GameSettings::default(), 0, &mut rng);
        state.advance(&mut rng);
        assert_eq!(state.run_state(), RunState::Idle);
        assert_eq!(state.snake().head(), Point::new(10, 10));
    }

    #[test]
    fn test_three_ticks_translate_without_food() {
        let (mut state, mut rng) = started_state();
        state.set_food(Point::new(0, 0));
        for _ in 0..3 {
            state.advance(&mut rng);
        }
        assert_eq!(state.snake().head(), Point::new(13, 10));
        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.run_state(), RunState::Running);
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let (mut state, mut rng) = started_state();
        state.set_food(Point::new(11, 10));
        state.advance(&mut rng);
        assert_eq!(state.snake().len(), 2);
        assert_eq!(state.score(), FOOD_SCORE);
        assert_eq!(state.run_state(), RunState::Running);
        assert!(!state.snake().contains(&state.food()));
    }

    #[test]
    fn test_food_stays_off_body_while_growing() {
        let (mut state, mut rng) = started_state();
        for i in 1..=4 {
            state.set_food(Point::new(10 + i, 10));
            state.advance(&mut rng);
            assert!(!state.snake().contains(&state.food()));
        }
        assert_eq!(state.snake().len(), 5);
    }

    #[test]
    fn test_reversal_is_ignored() {
        let (mut state, mut rng) = started_state();
        state.set_food(Point::new(0, 0));
        state.set_direction(Direction::Left);
        state.advance(&mut rng);
        assert_eq!(state.snake().head(), Point::new(11, 10));
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn test_turn_applies_on_next_tick() {
        let (mut state, mut rng) = started_state();
        state.set_food(Point::new(0, 0));
        state.set_direction(Direction::Up);
        state.advance(&mut rng);
        assert_eq!(state.snake().head(), Point::new(10, 9));
        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn test_second_turn_checked_against_committed_direction() {
        let (mut state, mut rng) = started_state();
        state.set_food(Point::new(0, 0));
        // Moving right; Up is stored, then Left is still a reversal of the
        // committed direction and must be dropped
        state.set_direction(Direction::Up);
        state.set_direction(Direction::Left);
        state.advance(&mut rng);
        assert_eq!(state.snake().head(), Point::new(10, 9));
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let (mut state, mut rng) = started_state();
        state.set_food(Point::new(0, 0));
        state.set_direction(Direction::Up);
        for _ in 0..11 {
            state.advance(&mut rng);
        }
        assert_eq!(state.run_state(), RunState::GameOver);
        assert_eq!(state.game_over_reason(), Some(GameOverReason::WallCollision));
        assert_eq!(state.last_final_score(), Some(0));
    }

    #[test]
    fn test_self_collision_ends_game() {
        let (mut state, mut rng) = started_state();
        eat_n_foods_moving_right(&mut state, &mut rng, 4);
        assert_eq!(state.snake().len(), 5);

        state.set_direction(Direction::Up);
        state.advance(&mut rng);
        state.set_direction(Direction::Left);
        state.advance(&mut rng);
        state.set_direction(Direction::Down);
        state.advance(&mut rng);

        assert_eq!(state.run_state(), RunState::GameOver);
        assert_eq!(state.game_over_reason(), Some(GameOverReason::SelfCollision));
        assert_eq!(state.last_final_score(), Some(40));
    }

    #[test]
    fn test_moving_into_tail_cell_collides() {
        let (mut state, mut rng) = started_state();
        eat_n_foods_moving_right(&mut state, &mut rng, 3);
        assert_eq!(state.snake().len(), 4);

        state.set_direction(Direction::Up);
        state.advance(&mut rng);
        state.set_direction(Direction::Left);
        state.advance(&mut rng);
        // Head turns down into the current tail cell; the tail is still
        // a body cell when the head arrives, so the game ends
        state.set_direction(Direction::Down);
        state.advance(&mut rng);

        assert_eq!(state.run_state(), RunState::GameOver);
        assert_eq!(state.game_over_reason(), Some(GameOverReason::SelfCollision));
        assert_eq!(state.last_final_score(), Some(30));
        assert_eq!(state.snake().len(), 4);
    }

    #[test]
    fn test_pause_blocks_ticks_but_keeps_turns() {
        let (mut state, mut rng) = started_state();
        state.set_food(Point::new(0, 0));
        state.toggle_pause();
        assert_eq!(state.run_state(), RunState::Paused);

        for _ in 0..3 {
            state.advance(&mut rng);
        }
        assert_eq!(state.snake().head(), Point::new(10, 10));

        state.set_direction(Direction::Down);
        state.toggle_pause();
        state.advance(&mut rng);
        assert_eq!(state.snake().head(), Point::new(10, 11));
    }

    #[test]
    fn test_toggle_pause_ignored_outside_running_and_paused() {
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(&GameSettings::default(), 0, &mut rng);
        state.toggle_pause();
        assert_eq!(state.run_state(), RunState::Idle);

        state.start(&mut rng);
        state.set_food(Point::new(0, 0));
        state.set_direction(Direction::Up);
        for _ in 0..11 {
            state.advance(&mut rng);
        }
        assert_eq!(state.run_state(), RunState::GameOver);
        state.toggle_pause();
        assert_eq!(state.run_state(), RunState::GameOver);
    }

    #[test]
    fn test_high_score_tracks_best_final_score() {
        let (mut state, mut rng) = started_state();
        eat_n_foods_moving_right(&mut state, &mut rng, 1);
        state.set_direction(Direction::Up);
        for _ in 0..11 {
            state.advance(&mut rng);
        }
        assert_eq!(state.run_state(), RunState::GameOver);
        assert_eq!(state.last_final_score(), Some(10));
        assert_eq!(state.high_score(), 10);

        // A worse follow-up game must not lower the high score
        state.start(&mut rng);
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 10);
        state.set_food(Point::new(0, 0));
        state.set_direction(Direction::Up);
        for _ in 0..11 {
            state.advance(&mut rng);
        }
        assert_eq!(state.last_final_score(), Some(0));
        assert_eq!(state.high_score(), 10);
    }

    #[test]
    fn test_high_score_seeded_from_store_value() {
        let mut rng = SessionRng::new(42);
        let state = GameState::new(&GameSettings::default(), 120, &mut rng);
        assert_eq!(state.high_score(), 120);
    }

    #[test]
    fn test_restart_after_game_over() {
        let (mut state, mut rng) = started_state();
        state.set_food(Point::new(0, 0));
        state.set_direction(Direction::Up);
        for _ in 0..11 {
            state.advance(&mut rng);
        }
        assert_eq!(state.run_state(), RunState::GameOver);

        state.start(&mut rng);
        assert_eq!(state.run_state(), RunState::Running);
        assert_eq!(state.snake().len(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.game_over_reason(), None);
    }

    #[test]
    fn test_tick_interval_speed_policy() {
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(&GameSettings::default(), 0, &mut rng);

        let cases = [(0, 200), (49, 200), (50, 190), (500, 100), (1000, 100)];
        for (score, expected_ms) in cases {
            state.set_score(score);
            assert_eq!(
                state.tick_interval(),
                Duration::from_millis(expected_ms),
                "score {}",
                score
            );
        }
    }

    #[test]
    fn test_food_spawns_on_the_only_empty_cell() {
        let tiny = GameSettings {
            grid_size: 2,
            cell_px: 20,
        };
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(&tiny, 0, &mut rng);
        state.start(&mut rng);
        state.set_snake(vec![Point::new(0, 0), Point::new(0, 1)]);
        state.set_food(Point::new(1, 0));

        state.advance(&mut rng);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.food(), Point::new(1, 1));
        assert_eq!(state.run_state(), RunState::Running);
    }

    #[test]
    fn test_single_cell_grid_is_over_from_the_start() {
        let degenerate = GameSettings {
            grid_size: 1,
            cell_px: 20,
        };
        let mut rng = SessionRng::new(42);
        let state = GameState::new(&degenerate, 0, &mut rng);
        assert_eq!(state.run_state(), RunState::GameOver);
        assert_eq!(state.game_over_reason(), Some(GameOverReason::BoardFull));
    }

    #[test]
    fn test_filling_the_board_ends_game() {
        let tiny = GameSettings {
            grid_size: 2,
            cell_px: 20,
        };
        let mut rng = SessionRng::new(42);
        let mut state = GameState::new(&tiny, 0, &mut rng);
        state.start(&mut rng);
        state.set_snake(vec![Point::new(0, 1), Point::new(0, 0), Point::new(1, 0)]);
        state.set_food(Point::new(1, 1));

        state.advance(&mut rng);
        assert_eq!(state.snake().len(), 4);
        assert_eq!(state.run_state(), RunState::GameOver);
        assert_eq!(state.game_over_reason(), Some(GameOverReason::BoardFull));
        assert_eq!(state.last_final_score(), Some(FOOD_SCORE));
    }
}
