use crate::anim::Point;
use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

const FORM_WIDTH: u16 = 36;
const FIELD_HEIGHT: u16 = 3;
const BUTTON_WIDTH: u16 = 20;

/// Resting positions of every element, before any animation offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub full: Rect,
    pub sky: Rect,
    pub status: Rect,
    pub heading: Rect,
    pub username: Rect,
    pub password: Rect,
    pub button: Rect,
    pub banner_width: u16,
}

impl Layout {
    pub fn new(area: Rect) -> Self {
        let rows = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Sky and form
                Constraint::Length(1), // Status bar
            ])
            .split(area);
        let sky = rows[0];

        let form_width = FORM_WIDTH.min(sky.width.saturating_sub(2)).max(1);
        let column = Self::centered_box(sky, form_width, 15);

        let form = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),            // Heading
                Constraint::Length(1),            // Spacer
                Constraint::Length(FIELD_HEIGHT), // Username
                Constraint::Length(1),            // Spacer
                Constraint::Length(FIELD_HEIGHT), // Password
                Constraint::Length(2),            // Spacer
                Constraint::Length(FIELD_HEIGHT), // Button
            ])
            .split(column);

        let button_width = BUTTON_WIDTH.min(form_width);
        let button = Self::centered_box(form[6], button_width, FIELD_HEIGHT);

        Self {
            full: area,
            sky,
            status: rows[1],
            heading: form[0],
            username: form[2],
            password: form[4],
            button,
            banner_width: form_width,
        }
    }

    pub fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
        let horizontal = RatatuiLayout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(width),
                Constraint::Fill(1),
            ])
            .split(area);

        let vertical = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(height),
                Constraint::Fill(1),
            ])
            .split(horizontal[1]);

        vertical[1]
    }

    /// The status banner rests where the button rests.
    pub fn banner_anchor(&self) -> Point {
        center(self.button)
    }

    pub fn width(&self) -> f64 {
        f64::from(self.full.width)
    }
}

pub fn center(rect: Rect) -> Point {
    Point::new(
        f64::from(rect.x) + f64::from(rect.width) / 2.0,
        f64::from(rect.y) + f64::from(rect.height) / 2.0,
    )
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// A box at a fractional position, clipped to what is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed {
    pub area: Rect,
    /// Columns cut off the left edge
    pub clip_left: u16,
}

/// Round a floating box to cells and clip it to `bounds`.
pub fn place(x: f64, y: f64, width: f64, height: f64, bounds: Rect) -> Option<Placed> {
    let left = x.round() as i64;
    let top = y.round() as i64;
    let right = left + width.round().max(0.0) as i64;
    let bottom = top + height.round().max(0.0) as i64;

    let min_x = i64::from(bounds.x);
    let min_y = i64::from(bounds.y);
    let max_x = min_x + i64::from(bounds.width);
    let max_y = min_y + i64::from(bounds.height);

    let vis_left = left.max(min_x);
    let vis_top = top.max(min_y);
    let vis_right = right.min(max_x);
    let vis_bottom = bottom.min(max_y);

    if vis_left >= vis_right || vis_top >= vis_bottom {
        return None;
    }

    Some(Placed {
        area: Rect::new(
            vis_left as u16,
            vis_top as u16,
            (vis_right - vis_left) as u16,
            (vis_bottom - vis_top) as u16,
        ),
        clip_left: (vis_left - left) as u16,
    })
}

/// `rect` moved by fractional offsets, clipped to `bounds`.
pub fn shifted(rect: Rect, dx: f64, dy: f64, bounds: Rect) -> Option<Placed> {
    place(
        f64::from(rect.x) + dx,
        f64::from(rect.y) + dy,
        f64::from(rect.width),
        f64::from(rect.height),
        bounds,
    )
}
