//! The login screen controller.
//!
//! Owns the form, the entrance animation, the cloud drift loops and the
//! login sequencer. All state lives here and is only touched from the UI
//! loop; drift tasks talk back through the event channel.

pub mod clouds;
pub mod entrance;
pub mod form;
pub mod sequencer;
pub mod view;

use crate::config::LoginConfig;
use crate::error::Result;
use crate::event::Event;
use crate::ui::{Layout, Theme, layout};
use clouds::{CloudDrift, DriftTask, spawn_drift, speed_factor};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use entrance::{Entrance, EntranceFrame};
use form::{Field, TextField};
use futures::future::join_all;
use ratatui::layout::Rect;
use sequencer::{SequenceEvent, Sequencer};
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    Login,
    Quit,
}

pub struct LoginScreen {
    pub focus: Option<Field>,
    pub username: TextField,
    pub password: TextField,
    pub theme: Theme,
    pub should_exit: bool,
    config: LoginConfig,
    layout: Layout,
    sequencer: Sequencer,
    entrance: Option<Entrance>,
    clouds: Vec<CloudDrift>,
    drift_tasks: Vec<DriftTask>,
    drift_generation: u64,
    events_tx: UnboundedSender<Event>,
}

impl LoginScreen {
    pub fn new(
        config: LoginConfig,
        area: Rect,
        events_tx: UnboundedSender<Event>,
        now: Instant,
    ) -> Result<Self> {
        config.validate()?;

        let layout = Layout::new(area);
        let sequencer =
            Sequencer::new(&config.sequence, layout.banner_anchor(), layout.width(), now)?;

        info!(
            "Login screen {}x{} with {} status messages",
            area.width,
            area.height,
            config.sequence.messages.len()
        );

        Ok(Self {
            focus: Some(Field::Username),
            username: TextField::plain(),
            password: TextField::secure(),
            theme: Theme::default(),
            should_exit: false,
            config,
            layout,
            sequencer,
            entrance: None,
            clouds: Vec::new(),
            drift_tasks: Vec::new(),
            drift_generation: 0,
            events_tx,
        })
    }

    /// First appearance: play the entrance and start the clouds. Later
    /// calls do nothing.
    pub fn present(&mut self, now: Instant) {
        if self.entrance.is_some() {
            return;
        }

        let delays: Vec<f64> = self
            .config
            .clouds
            .positions
            .iter()
            .map(|p| p.fade_delay)
            .collect();
        self.entrance = Some(Entrance::new(
            now,
            self.layout.width(),
            &self.config.entrance,
            &delays,
        ));

        let width = self.layout.width();
        let k = speed_factor(width, self.config.clouds.crossing_secs);
        let sky = self.layout.sky;
        self.clouds = self
            .config
            .clouds
            .positions
            .iter()
            .map(|p| {
                CloudDrift::new(p.x * width, cloud_row(sky, p.y), width, k, now)
            })
            .collect();

        self.spawn_drifts();
        info!("Screen presented with {} clouds", self.clouds.len());
    }

    pub fn is_presented(&self) -> bool {
        self.entrance.is_some()
    }

    pub fn presented_at(&self) -> Option<Instant> {
        self.entrance.as_ref().map(Entrance::started_at)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn clouds(&self) -> &[CloudDrift] {
        &self.clouds
    }

    pub fn entrance_frame(&self, now: Instant) -> EntranceFrame {
        match &self.entrance {
            Some(entrance) => entrance.frame(now),
            None => EntranceFrame::settled(self.clouds.len()),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => return Some(ScreenAction::Quit),
            KeyCode::Char('c') if ctrl => return Some(ScreenAction::Quit),
            KeyCode::Char('l') if ctrl => return Some(ScreenAction::Login),
            KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab => {
                self.focus = Some(self.focus.map_or(Field::Username, Field::other));
            }
            _ => {
                if let Some(field) = self.focused_field_mut() {
                    edit(field, key.code, ctrl);
                }
            }
        }
        None
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<ScreenAction> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }

        let (column, row) = (mouse.column, mouse.row);
        if layout::contains(self.layout.button, column, row) {
            return Some(ScreenAction::Login);
        }

        self.focus = if layout::contains(self.layout.username, column, row) {
            Some(Field::Username)
        } else if layout::contains(self.layout.password, column, row) {
            Some(Field::Password)
        } else {
            None
        };
        None
    }

    /// The login action: drop focus and start the status sequence.
    pub fn login(&mut self, now: Instant) -> bool {
        if !self.sequencer.trigger(now) {
            debug!("Login pressed while a sequence is running, ignoring");
            return false;
        }
        self.focus = None;
        info!("Login started");
        true
    }

    pub fn tick(&mut self, now: Instant) -> Vec<SequenceEvent> {
        let events = self.sequencer.poll(now);
        for event in &events {
            debug!("Sequence event: {:?}", event);
        }
        events
    }

    pub fn cloud_wrapped(&mut self, index: usize, generation: u64, now: Instant) {
        if generation != self.drift_generation {
            debug!("Dropping wrap of cloud {} from stale loop {}", index, generation);
            return;
        }
        if let Some(cloud) = self.clouds.get_mut(index) {
            cloud.wrap(now);
        }
    }

    pub fn resize(&mut self, area: Rect, now: Instant) {
        self.layout = Layout::new(area);
        let width = self.layout.width();
        self.sequencer
            .relayout(self.layout.banner_anchor(), width, now);

        if !self.is_presented() {
            return;
        }

        let k = speed_factor(width, self.config.clouds.crossing_secs);
        let sky = self.layout.sky;
        for (cloud, position) in self.clouds.iter_mut().zip(&self.config.clouds.positions) {
            cloud.retarget(width, k, cloud_row(sky, position.y), now);
        }

        self.cancel_drifts();
        self.spawn_drifts();
        debug!("Resized to {}x{}, cloud loops restarted", area.width, area.height);
    }

    /// Stop every drift loop and wait for the tasks to finish.
    pub async fn shutdown(&mut self) {
        let tasks: Vec<DriftTask> = self.drift_tasks.drain(..).collect();
        for task in &tasks {
            task.cancel.cancel();
        }
        let count = tasks.len();
        join_all(tasks.into_iter().map(|t| t.handle)).await;
        info!("Stopped {} cloud loops", count);
    }

    pub fn drift_task_count(&self) -> usize {
        self.drift_tasks.len()
    }

    fn spawn_drifts(&mut self) {
        self.drift_generation += 1;
        let generation = self.drift_generation;
        // No width means zero-length traversals that would wrap back to back.
        if self.layout.width() <= 0.0 {
            debug!("Screen has no width, cloud loops paused");
            self.drift_tasks.clear();
            return;
        }
        self.drift_tasks = self
            .clouds
            .iter()
            .enumerate()
            .map(|(i, cloud)| {
                spawn_drift(
                    i,
                    generation,
                    cloud.duration(),
                    cloud.full_duration(),
                    self.events_tx.clone(),
                    CancellationToken::new(),
                )
            })
            .collect();
    }

    fn cancel_drifts(&mut self) {
        for task in self.drift_tasks.drain(..) {
            task.cancel.cancel();
        }
    }

    fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus? {
            Field::Username => Some(&mut self.username),
            Field::Password => Some(&mut self.password),
        }
    }
}

impl Drop for LoginScreen {
    fn drop(&mut self) {
        self.cancel_drifts();
    }
}

fn edit(field: &mut TextField, code: KeyCode, ctrl: bool) {
    match code {
        KeyCode::Char('u') if ctrl => field.clear(),
        KeyCode::Char('a') if ctrl => field.home(),
        KeyCode::Char('e') if ctrl => field.end(),
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Char(c) => field.insert(c),
        KeyCode::Backspace => field.backspace(),
        KeyCode::Delete => field.delete(),
        KeyCode::Left => field.left(),
        KeyCode::Right => field.right(),
        KeyCode::Home => field.home(),
        KeyCode::End => field.end(),
        _ => {}
    }
}

fn cloud_row(sky: Rect, fraction: f64) -> f64 {
    f64::from(sky.y) + fraction * f64::from(sky.height.saturating_sub(3))
}
