use std::sync::{Arc, Mutex};

use common::game::{Direction, GameCommand, GameSettings, GameState, RunState};
use common::render;
use eframe::egui;
use tokio::sync::mpsc;

use crate::surface::PainterSurface;

pub struct SnakeApp {
    settings: GameSettings,
    state: Arc<Mutex<GameState>>,
    command_tx: mpsc::UnboundedSender<GameCommand>,
}

impl SnakeApp {
    pub fn new(
        settings: GameSettings,
        state: Arc<Mutex<GameState>>,
        command_tx: mpsc::UnboundedSender<GameCommand>,
    ) -> Self {
        Self {
            settings,
            state,
            command_tx,
        }
    }

    fn send(&self, command: GameCommand) {
        let _ = self.command_tx.send(command);
    }

    fn handle_input(&self, ctx: &egui::Context) {
        ctx.input(|i| {
            let mut direction = None;
            if i.key_pressed(egui::Key::ArrowUp) || i.key_pressed(egui::Key::W) {
                direction = Some(Direction::Up);
            } else if i.key_pressed(egui::Key::ArrowDown) || i.key_pressed(egui::Key::S) {
                direction = Some(Direction::Down);
            } else if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::A) {
                direction = Some(Direction::Left);
            } else if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::D) {
                direction = Some(Direction::Right);
            }

            if let Some(direction) = direction {
                self.send(GameCommand::Turn(direction));
            }
            if i.key_pressed(egui::Key::Space) {
                self.send(GameCommand::TogglePause);
            }
            if i.key_pressed(egui::Key::Enter) {
                self.send(GameCommand::StartOrRestart);
            }
        });
    }

    fn status_line(snapshot: &GameState) -> String {
        match snapshot.run_state() {
            RunState::Idle => "Ready".to_string(),
            RunState::Running => "Running".to_string(),
            RunState::Paused => "Paused".to_string(),
            RunState::GameOver => "Game over".to_string(),
        }
    }
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        let snapshot = self.state.lock().unwrap().clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Score: {}", snapshot.score()));
                ui.separator();
                ui.label(format!("High score: {}", snapshot.high_score()));
                ui.separator();
                ui.label(Self::status_line(&snapshot));
            });
            ui.separator();

            let canvas = self.settings.canvas_px() as f32;
            let (response, painter) =
                ui.allocate_painter(egui::Vec2::new(canvas, canvas), egui::Sense::click());
            if response.clicked() && snapshot.run_state() == RunState::Idle {
                self.send(GameCommand::StartOrRestart);
            }

            let mut surface = PainterSurface::new(&painter, response.rect.min);
            render::render(&snapshot, &self.settings, &mut surface);

            ui.separator();
            ui.horizontal(|ui| {
                let pause_label = if snapshot.run_state() == RunState::Paused {
                    "▶ Resume"
                } else {
                    "⏸ Pause"
                };
                if ui.button(pause_label).clicked() {
                    self.send(GameCommand::TogglePause);
                }
                if ui.button("🔄 Restart").clicked() {
                    self.send(GameCommand::StartOrRestart);
                }
            });

            // Touch-friendly turn buttons, same commands as the arrow keys
            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    self.send(GameCommand::Turn(Direction::Left));
                }
                if ui.button("▲").clicked() {
                    self.send(GameCommand::Turn(Direction::Up));
                }
                if ui.button("▼").clicked() {
                    self.send(GameCommand::Turn(Direction::Down));
                }
                if ui.button("▶").clicked() {
                    self.send(GameCommand::Turn(Direction::Right));
                }
            });

            if snapshot.run_state() == RunState::GameOver
                && let Some(final_score) = snapshot.last_final_score()
            {
                ui.separator();
                ui.label(format!(
                    "Game over! Final score: {}. Press Enter to play again.",
                    final_score
                ));
            }
        });

        ctx.request_repaint();
    }
}
