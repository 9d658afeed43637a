use crate::game::{Direction, GameSettings, GameState, RunState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const BACKGROUND: Rgb = Rgb::new(0x00, 0x00, 0x00);
pub const SNAKE_HEAD: Rgb = Rgb::new(0x00, 0xAA, 0x00);
pub const SNAKE_BODY: Rgb = Rgb::new(0x00, 0xFF, 0x00);
pub const SNAKE_EYES: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
pub const FOOD: Rgb = Rgb::new(0xFF, 0x00, 0x00);
pub const FOOD_HIGHLIGHT: Rgb = Rgb::new(0xFF, 0x66, 0x66);
pub const OVERLAY_TEXT: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

const CELL_INSET: f32 = 1.0;
const EYE_SIZE: f32 = 3.0;
const EYE_OFFSET: f32 = 5.0;
const EYE_EDGE_INSET: f32 = 2.0;
const FOOD_HIGHLIGHT_OFFSET: f32 = 3.0;
const OVERLAY_TITLE_SIZE: f32 = 24.0;
const OVERLAY_HINT_SIZE: f32 = 16.0;
const OVERLAY_LINE_SPACING: f32 = 30.0;

/// Minimal pixel surface the renderer draws on. Coordinates are pixels
/// with the origin in the top-left corner of the canvas.
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb);
    fn draw_text(&mut self, center_x: f32, center_y: f32, size: f32, text: &str, color: Rgb);
}

/// Paints one frame. Reads the state, never mutates it.
pub fn render(state: &GameState, settings: &GameSettings, surface: &mut impl Surface) {
    let cell = settings.cell_px as f32;
    let canvas = settings.canvas_px() as f32;

    surface.fill_rect(0.0, 0.0, canvas, canvas, BACKGROUND);

    for (index, segment) in state.snake().cells().enumerate() {
        let color = if index == 0 { SNAKE_HEAD } else { SNAKE_BODY };
        let x = segment.x as f32 * cell;
        let y = segment.y as f32 * cell;
        surface.fill_rect(
            x + CELL_INSET,
            y + CELL_INSET,
            cell - 2.0 * CELL_INSET,
            cell - 2.0 * CELL_INSET,
            color,
        );
    }
    draw_eyes(state, cell, surface);

    let food_x = state.food().x as f32 * cell;
    let food_y = state.food().y as f32 * cell;
    surface.fill_rect(
        food_x + CELL_INSET,
        food_y + CELL_INSET,
        cell - 2.0 * CELL_INSET,
        cell - 2.0 * CELL_INSET,
        FOOD,
    );
    surface.fill_rect(
        food_x + FOOD_HIGHLIGHT_OFFSET,
        food_y + FOOD_HIGHLIGHT_OFFSET,
        cell / 3.0,
        cell / 3.0,
        FOOD_HIGHLIGHT,
    );

    if state.run_state() == RunState::Idle {
        surface.draw_text(
            canvas / 2.0,
            canvas / 2.0,
            OVERLAY_TITLE_SIZE,
            "Click or press Enter to start",
            OVERLAY_TEXT,
        );
        surface.draw_text(
            canvas / 2.0,
            canvas / 2.0 + OVERLAY_LINE_SPACING,
            OVERLAY_HINT_SIZE,
            "Arrow keys steer, Space pauses",
            OVERLAY_TEXT,
        );
    }
}

/// Two eyes pushed toward the edge of the head cell the snake is
/// travelling into.
fn draw_eyes(state: &GameState, cell: f32, surface: &mut impl Surface) {
    let head = state.snake().head();
    let hx = head.x as f32 * cell;
    let hy = head.y as f32 * cell;

    let near = EYE_OFFSET;
    let far = cell - EYE_OFFSET - EYE_SIZE;
    let ((x1, y1), (x2, y2)) = match state.direction() {
        Direction::Right => ((cell - near, near), (cell - near, far)),
        Direction::Left => ((EYE_EDGE_INSET, near), (EYE_EDGE_INSET, far)),
        Direction::Down => ((near, cell - near), (far, cell - near)),
        Direction::Up => ((near, EYE_EDGE_INSET), (far, EYE_EDGE_INSET)),
    };

    surface.fill_rect(hx + x1, hy + y1, EYE_SIZE, EYE_SIZE, SNAKE_EYES);
    surface.fill_rect(hx + x2, hy + y2, EYE_SIZE, EYE_SIZE, SNAKE_EYES);
}
