use crate::screen::LoginScreen;
use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn draw_status_bar(frame: &mut Frame, area: Rect, screen: &LoginScreen) {
    let theme = &screen.theme;
    let sequencer = screen.sequencer();
    let phase = sequencer.state().display_name();

    let mut left_spans = vec![
        Span::raw(" "),
        Span::styled(format!(" {} ", phase), theme.phase_style(phase)),
        Span::raw(" "),
    ];

    if let Some(index) = sequencer.cursor() {
        left_spans.push(Span::styled(
            format!("step {}/{}", index + 1, sequencer.messages().len()),
            theme.muted_style(),
        ));
    }

    let left = Line::from(left_spans);

    let time = Local::now().format("%H:%M").to_string();
    let right = Line::from(vec![
        Span::styled("Tab", theme.heading_style()),
        Span::styled(":next ", theme.muted_style()),
        Span::styled("Ctrl+L", theme.heading_style()),
        Span::styled(":login ", theme.muted_style()),
        Span::styled("Esc", theme.heading_style()),
        Span::styled(":quit ", theme.muted_style()),
        Span::styled(time, theme.heading_style()),
        Span::raw(" "),
    ]);

    frame.render_widget(Paragraph::new(left).style(theme.style()), area);

    let right_width = right.width() as u16;
    if area.width > right_width {
        let right_area = Rect {
            x: area.x + area.width - right_width - 1,
            y: area.y,
            width: right_width + 1,
            height: 1,
        };
        frame.render_widget(Paragraph::new(right).alignment(Alignment::Right), right_area);
    }
}
