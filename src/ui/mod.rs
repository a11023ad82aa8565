pub mod layout;
mod theme;
pub mod widgets;

pub use layout::Layout;
pub use theme::Theme;

use crate::screen::LoginScreen;
use ratatui::Frame;
use std::time::Instant;

pub fn draw(frame: &mut Frame, screen: &LoginScreen, now: Instant) {
    let layout = screen.layout();
    let entrance = screen.entrance_frame(now);

    widgets::draw_background(frame, layout.full, &screen.theme);
    widgets::draw_clouds(frame, layout.sky, screen, &entrance, now);
    widgets::draw_heading(frame, layout, &screen.theme, entrance.heading_dx);
    widgets::draw_fields(frame, layout, screen, &entrance);
    widgets::draw_button(frame, layout, screen, &entrance, now);

    // Banner sits on top of the button it replaces
    widgets::draw_banner(frame, layout, screen, now);

    widgets::draw_status_bar(frame, layout.status, screen);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoginConfig;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn render(screen: &LoginScreen, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, screen, now)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[tokio::test(start_paused = true)]
    async fn test_form_visible_after_entrance() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let t0 = Instant::now();
        let mut screen =
            LoginScreen::new(LoginConfig::default(), ratatui::layout::Rect::new(0, 0, 80, 24), tx, t0)
                .unwrap();
        screen.present(t0);

        let at_start = render(&screen, t0);
        assert!(!at_start.contains("Bahama Air"));
        assert!(!at_start.contains("Log In"));

        let settled = render(&screen, t0 + Duration::from_secs(2));
        assert!(settled.contains("Bahama Air"));
        assert!(settled.contains("Username"));
        assert!(settled.contains("Password"));
        assert!(settled.contains("Log In"));
        assert!(settled.contains("IDLE"));

        screen.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_message_rendered_during_sequence() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let t0 = Instant::now();
        let mut screen =
            LoginScreen::new(LoginConfig::default(), ratatui::layout::Rect::new(0, 0, 80, 24), tx, t0)
                .unwrap();
        screen.present(t0);

        let t1 = t0 + Duration::from_secs(2);
        screen.login(t1);
        let shown = t1 + Duration::from_secs(1);
        screen.tick(shown);

        let text = render(&screen, shown);
        assert!(text.contains("Connecting..."));
        assert!(text.contains("STATUS"));

        let done = t1 + Duration::from_secs(12);
        screen.tick(done);
        let text = render(&screen, done);
        assert!(!text.contains("Failed"));
        assert!(text.contains("Log In"));

        screen.shutdown().await;
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let t0 = Instant::now();
        let screen =
            LoginScreen::new(LoginConfig::default(), ratatui::layout::Rect::new(0, 0, 6, 3), tx, t0)
                .unwrap();
        let mut terminal = Terminal::new(TestBackend::new(6, 3)).unwrap();
        terminal.draw(|frame| draw(frame, &screen, t0)).unwrap();
    }
}
