use crate::anim::Rgb;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub sky: Color,
    pub foreground: Color,
    pub heading: Color,
    pub field: Color,
    pub focused: Color,
    pub muted: Color,
    pub cloud: Color,
    pub banner: Color,
    pub button_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            sky: Color::Rgb(64, 152, 214),
            foreground: Color::White,
            heading: Color::White,
            field: Color::Gray,
            focused: Color::Yellow,
            muted: Color::Rgb(190, 215, 235),
            cloud: Color::White,
            banner: Color::Rgb(250, 240, 205),
            button_text: Color::Black,
        }
    }
}

impl Theme {
    pub fn style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.sky)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .bg(self.sky)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let fg = if focused { self.focused } else { self.field };
        Style::default().fg(fg).bg(self.sky)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted).bg(self.sky)
    }

    /// Clouds fade in by stepping through progressively brighter colours.
    pub fn cloud_style(&self, alpha: f64) -> Option<Style> {
        let fg = if alpha < 0.25 {
            return None;
        } else if alpha < 0.6 {
            self.muted
        } else {
            self.cloud
        };
        Some(Style::default().fg(fg).bg(self.sky))
    }

    pub fn button_style(&self, color: Rgb, alpha: f64) -> Style {
        let (r, g, b) = color.to_u8();
        let style = Style::default().fg(self.button_text).bg(Color::Rgb(r, g, b));
        if alpha < 0.6 {
            style.add_modifier(Modifier::DIM)
        } else {
            style.add_modifier(Modifier::BOLD)
        }
    }

    pub fn banner_style(&self, text: Rgb, alpha: f64) -> Style {
        let (r, g, b) = text.to_u8();
        let style = Style::default().fg(Color::Rgb(r, g, b)).bg(self.banner);
        if alpha < 0.5 {
            style.add_modifier(Modifier::DIM)
        } else {
            style.add_modifier(Modifier::BOLD)
        }
    }

    pub fn phase_style(&self, phase: &str) -> Style {
        let color = match phase {
            "IDLE" => Color::Green,
            "SUBMITTING" => Color::Yellow,
            "STATUS" => Color::Cyan,
            "RESET" => Color::Magenta,
            _ => self.foreground,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_invisible_until_quarter_alpha() {
        let theme = Theme::default();
        assert_eq!(theme.cloud_style(0.0), None);
        assert_eq!(theme.cloud_style(0.4).and_then(|s| s.fg), Some(theme.muted));
        assert_eq!(theme.cloud_style(1.0).and_then(|s| s.fg), Some(theme.cloud));
    }

    #[test]
    fn test_button_colour_follows_rgb() {
        let theme = Theme::default();
        let style = theme.button_style(Rgb::new(1.0, 0.0, 0.0), 1.0);
        assert_eq!(style.bg, Some(Color::Rgb(255, 0, 0)));
    }
}
