use crate::screen::LoginScreen;
use crate::screen::entrance::EntranceFrame;
use crate::ui::layout;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use std::time::Instant;

const SPRITE: [&str; 3] = [
    "    .--.    ",
    " .-(    ).  ",
    "(___.__)__) ",
];

pub fn draw_clouds(
    frame: &mut Frame,
    sky: Rect,
    screen: &LoginScreen,
    entrance: &EntranceFrame,
    now: Instant,
) {
    for (i, cloud) in screen.clouds().iter().enumerate() {
        let alpha = entrance.cloud_alpha.get(i).copied().unwrap_or(1.0);
        let Some(style) = screen.theme.cloud_style(alpha) else {
            continue;
        };

        let x = cloud.x_at(now);
        let Some(placed) = layout::place(x, cloud.y, cloud.width, SPRITE.len() as f64, sky) else {
            continue;
        };

        let clip_top = usize::from(placed.area.y).saturating_sub(cloud.y.round().max(0.0) as usize);
        let lines: Vec<Line> = SPRITE
            .iter()
            .skip(clip_top)
            .take(usize::from(placed.area.height))
            .map(|row| {
                let visible: String = row
                    .chars()
                    .skip(usize::from(placed.clip_left))
                    .take(usize::from(placed.area.width))
                    .collect();
                Line::from(Span::styled(visible, style))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), placed.area);
    }
}
