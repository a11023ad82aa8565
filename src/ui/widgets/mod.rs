mod banner;
mod button;
mod clouds;
mod fields;
mod heading;
mod status_bar;

pub use banner::draw_banner;
pub use button::draw_button;
pub use clouds::draw_clouds;
pub use fields::draw_fields;
pub use heading::draw_heading;
pub use status_bar::draw_status_bar;

use crate::ui::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Block;

pub fn draw_background(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default().style(theme.style());
    frame.render_widget(block, area);
}

/// Pad `text` to `full_width` centred, then cut what falls outside the
/// visible window.
fn clip_centered(text: &str, full_width: usize, clip_left: u16, visible: u16) -> String {
    let padded = format!("{:^width$}", text, width = full_width);
    padded
        .chars()
        .skip(usize::from(clip_left))
        .take(usize::from(visible))
        .collect()
}
