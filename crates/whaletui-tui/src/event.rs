//! Terminal input, delivered on a channel

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Event {
    /// No input for a whole tick; drives the periodic refresh
    Tick,
    Key(KeyEvent),
    Resize(u16, u16),
}

impl Event {
    /// Events the app cares about; key releases and mouse input are dropped
    fn from_terminal(event: CrosstermEvent) -> Option<Self> {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CrosstermEvent::Resize(w, h) => Some(Self::Resize(w, h)),
            _ => None,
        }
    }
}

/// Reads the terminal on a dedicated thread
///
/// The thread exits once the handler is dropped and its next send fails.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || pump(&tx, tick_rate));
        Self { rx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

fn pump(tx: &mpsc::UnboundedSender<Event>, tick_rate: Duration) {
    loop {
        let event = match event::poll(tick_rate) {
            Ok(false) => Event::Tick,
            Ok(true) => match event::read().map(Event::from_terminal) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(error = %e, "terminal read failed");
                    return;
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "terminal poll failed");
                return;
            }
        };

        if tx.send(event).is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers, MouseEvent, MouseEventKind};

    fn key(kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_only_presses_pass() {
        assert!(matches!(
            Event::from_terminal(key(KeyEventKind::Press)),
            Some(Event::Key(_))
        ));
        assert!(Event::from_terminal(key(KeyEventKind::Release)).is_none());
    }

    #[test]
    fn test_resize_and_mouse() {
        assert!(matches!(
            Event::from_terminal(CrosstermEvent::Resize(80, 24)),
            Some(Event::Resize(80, 24))
        ));
        let mouse = CrosstermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert!(Event::from_terminal(mouse).is_none());
    }
}
