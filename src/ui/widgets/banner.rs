use super::clip_centered;
use crate::screen::LoginScreen;
use crate::screen::view::STATUS_TEXT_COLOR;
use crate::ui::{Layout, layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use std::time::Instant;

const BANNER_HEIGHT: f64 = 3.0;

/// Status banner. The flip transition is drawn as the banner unfolding
/// from its middle row outwards.
pub fn draw_banner(frame: &mut Frame, layout: &Layout, screen: &LoginScreen, now: Instant) {
    let sequencer = screen.sequencer();
    let visual = sequencer.banner(now);
    if visual.is_hidden() {
        return;
    }
    let Some(text) = sequencer.banner_text() else {
        return;
    };

    let width = f64::from(layout.banner_width);
    let height = (visual.reveal * BANNER_HEIGHT).ceil().clamp(1.0, BANNER_HEIGHT);
    let x = visual.center.x - width / 2.0;
    let y = visual.center.y - height / 2.0;

    let Some(placed) = layout::place(x, y, width, height, layout.sky) else {
        return;
    };

    let style = screen.theme.banner_style(STATUS_TEXT_COLOR, visual.alpha);
    let label = clip_centered(text, layout.banner_width.into(), placed.clip_left, placed.area.width);
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
}
