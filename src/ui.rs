use egui::Context;
use glam::Vec3;

use crate::controller::OrbitState;

/// Everything the overlay needs, snapshotted once per frame.
pub struct DebugInfo {
    pub fps: f32,
    pub avatar_pos: Vec3,
    pub avatar_vel: Vec3,
    pub orbit: OrbitState,
    pub captured: bool,
}

pub fn draw_overlay(ctx: &Context, info: &DebugInfo) {
    draw_debug_window(ctx, info);
    if !info.captured {
        draw_capture_hint(ctx);
    }
}

fn draw_debug_window(ctx: &Context, info: &DebugInfo) {
    egui::Window::new("Debug")
        .default_pos([8.0, 8.0])
        .default_size([160.0, 110.0])
        .show(ctx, |ui| {
            ui.label(egui::RichText::new(format!("FPS: {:.0}", info.fps)).small());
            let p = info.avatar_pos;
            ui.label(egui::RichText::new(format!("Pos: {:.1}, {:.1}, {:.1}", p.x, p.y, p.z)).small());
            let v = info.avatar_vel;
            ui.label(egui::RichText::new(format!("Vel: {:.1}, {:.1}, {:.1}", v.x, v.y, v.z)).small());
            ui.label(
                egui::RichText::new(format!(
                    "Orbit: yaw {:.0}°, pitch {:.0}°",
                    info.orbit.yaw.to_degrees(),
                    info.orbit.pitch.to_degrees()
                ))
                .small(),
            );
        });
}

fn draw_capture_hint(ctx: &Context) {
    let painter = ctx.layer_painter(egui::LayerId::new(egui::Order::TOP, egui::Id::new("capture_hint")));
    let rect = ctx.available_rect();
    painter.text(
        egui::Pos2::new(rect.center().x, rect.bottom() - 32.0),
        egui::Align2::CENTER_CENTER,
        "Click to capture the mouse — Esc releases it",
        egui::FontId::proportional(16.0),
        egui::Color32::WHITE,
    );
}
