use common::render::{Rgb, Surface};
use eframe::egui;

/// Adapts an egui painter to the engine's pixel surface, offsetting by
/// the canvas origin inside the window.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self { painter, origin }
    }

    fn color32(color: Rgb) -> egui::Color32 {
        egui::Color32::from_rgb(color.r, color.g, color.b)
    }
}

impl Surface for PainterSurface<'_> {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        let rect = egui::Rect::from_min_size(
            egui::pos2(self.origin.x + x, self.origin.y + y),
            egui::vec2(width, height),
        );
        self.painter.rect_filled(rect, 0.0, Self::color32(color));
    }

    fn draw_text(&mut self, center_x: f32, center_y: f32, size: f32, text: &str, color: Rgb) {
        self.painter.text(
            egui::pos2(self.origin.x + center_x, self.origin.y + center_y),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(size),
            Self::color32(color),
        );
    }
}
