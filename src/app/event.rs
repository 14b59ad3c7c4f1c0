//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a blocking reader on
//! tokio's blocking pool that forwards them over a channel, so the main loop
//! stays non-blocking.  The reader only produces events; every state change
//! happens on the main loop.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Spawns a reader that polls the terminal for events and sends them through
/// the returned channel.  It stops once the receiver is dropped.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        // Poll with the tick rate so Tick events flow even when idle.
        let app_event = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(error = %err, "terminal read failed");
                    continue;
                }
            },
            Ok(false) => AppEvent::Tick,
            Err(err) => {
                tracing::warn!(error = %err, "terminal poll failed, stopping event reader");
                break;
            }
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
