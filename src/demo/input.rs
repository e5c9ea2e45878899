//! Keyboard input for the demo, read on a dedicated thread.

use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

/// How often the reader checks whether the UI has gone away.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKey {
    Fetch,
    Refetch,
    Cancel,
    Quit,
}

pub fn spawn_key_reader() -> mpsc::UnboundedReceiver<DemoKey> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(mapped) = map_key(key) {
                        if tx.send(mapped).is_err() {
                            break;
                        }
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "terminal read failed");
                    break;
                }
            },
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(error = %err, "terminal poll failed");
                break;
            }
        }
    });

    rx
}

fn map_key(key: KeyEvent) -> Option<DemoKey> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(DemoKey::Quit);
    }
    match key.code {
        KeyCode::Char('f') => Some(DemoKey::Fetch),
        KeyCode::Char('r') => Some(DemoKey::Refetch),
        KeyCode::Char('c') => Some(DemoKey::Cancel),
        KeyCode::Char('q') | KeyCode::Esc => Some(DemoKey::Quit),
        _ => None,
    }
}
