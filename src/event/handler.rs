use crossterm::event::{self, KeyEvent, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    /// A cloud finished crossing the screen
    CloudWrapped { index: usize, generation: u64 },
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        std::thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    let sent = match event::read() {
                        Ok(event::Event::Key(key)) => event_tx.send(Event::Key(key)),
                        Ok(event::Event::Mouse(mouse)) => event_tx.send(Event::Mouse(mouse)),
                        Ok(event::Event::Resize(w, h)) => event_tx.send(Event::Resize(w, h)),
                        _ => Ok(()),
                    };
                    if sent.is_err() {
                        break;
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Sender for producers other than the terminal, such as cloud drift tasks.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
