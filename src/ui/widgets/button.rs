use super::clip_centered;
use crate::screen::LoginScreen;
use crate::screen::entrance::EntranceFrame;
use crate::ui::{Layout, layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use std::time::Instant;

const LABEL: &str = "Log In";
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAME_MS: u128 = 80;

pub fn draw_button(
    frame: &mut Frame,
    layout: &Layout,
    screen: &LoginScreen,
    entrance: &EntranceFrame,
    now: Instant,
) {
    if entrance.button_alpha < 0.25 {
        return;
    }

    let visual = screen.sequencer().button(now);
    let rest = layout.button;
    let width = f64::from(rest.width) + visual.extra_width;
    // Grows about its centre
    let x = f64::from(rest.x) - visual.extra_width / 2.0;
    let y = f64::from(rest.y) + visual.drop + entrance.button_dy;

    let Some(placed) = layout::place(x, y, width, f64::from(rest.height), layout.sky) else {
        return;
    };

    let style = screen.theme.button_style(visual.color, entrance.button_alpha);
    let full = width.round().max(0.0) as usize;
    let label = clip_centered(LABEL, full, placed.clip_left, placed.area.width);
    let middle = placed.area.height / 2;
    let lines: Vec<Line> = (0..placed.area.height)
        .map(|row| {
            if row == middle {
                Line::from(label.clone())
            } else {
                Line::from("")
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).style(style), placed.area);

    if visual.spinner_visible() {
        let column = x.round() + visual.spinner_x.round();
        let spinner = layout::place(column, y.round() + f64::from(middle), 1.0, 1.0, placed.area);
        if let Some(spot) = spinner {
            let elapsed = screen
                .presented_at()
                .map(|at| now.saturating_duration_since(at).as_millis())
                .unwrap_or(0);
            let glyph = SPINNER_FRAMES[(elapsed / SPINNER_FRAME_MS) as usize % SPINNER_FRAMES.len()];
            frame.render_widget(Paragraph::new(glyph).style(style), spot.area);
        }
    }
}
