use super::clip_centered;
use crate::ui::{Layout, Theme, layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

const TITLE: &str = "Bahama Air";
const SUBTITLE: &str = "Sign in to book your flight";

pub fn draw_heading(frame: &mut Frame, layout: &Layout, theme: &Theme, dx: f64) {
    let Some(placed) = layout::shifted(layout.heading, dx, 0.0, layout.sky) else {
        return;
    };

    let full = usize::from(layout.heading.width);
    let visible = placed.area.width;
    let lines = vec![
        Line::from(Span::styled(
            clip_centered(TITLE, full, placed.clip_left, visible),
            theme.heading_style(),
        )),
        Line::from(Span::styled(
            clip_centered(SUBTITLE, full, placed.clip_left, visible),
            theme.muted_style(),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), placed.area);
}
