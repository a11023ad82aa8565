use crate::screen::LoginScreen;
use crate::screen::entrance::EntranceFrame;
use crate::screen::form::{Field, TextField};
use crate::ui::{Layout, Theme, layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn draw_fields(frame: &mut Frame, layout: &Layout, screen: &LoginScreen, entrance: &EntranceFrame) {
    draw_field(
        frame,
        layout,
        layout.username,
        entrance.username_dx,
        "Username",
        &screen.username,
        screen.focus == Some(Field::Username),
        &screen.theme,
    );
    draw_field(
        frame,
        layout,
        layout.password,
        entrance.password_dx,
        "Password",
        &screen.password,
        screen.focus == Some(Field::Password),
        &screen.theme,
    );
}

#[allow(clippy::too_many_arguments)]
fn draw_field(
    frame: &mut Frame,
    layout: &Layout,
    rest: Rect,
    dx: f64,
    title: &str,
    field: &TextField,
    focused: bool,
    theme: &Theme,
) {
    let Some(placed) = layout::shifted(rest, dx, 0.0, layout.sky) else {
        return;
    };

    let border = theme.border_style(focused);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(theme.style())
        .title(format!(" {} ", title))
        .title_style(border.add_modifier(Modifier::BOLD));

    frame.render_widget(
        Paragraph::new(input_line(field, focused, theme)).block(block),
        placed.area,
    );
}

fn input_line(field: &TextField, focused: bool, theme: &Theme) -> Line<'static> {
    let shown = field.display();
    if !focused {
        return Line::from(Span::styled(shown, theme.muted_style()));
    }

    let before: String = shown.chars().take(field.cursor()).collect();
    let after: String = shown.chars().skip(field.cursor()).collect();
    let cursor = Style::default().fg(theme.focused).bg(theme.sky);
    Line::from(vec![
        Span::styled(before, theme.style()),
        Span::styled("│", cursor),
        Span::styled(after, theme.style()),
    ])
}
