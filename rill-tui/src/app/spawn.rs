use rill_core::{EntrySource, event::AppEvent};
use std::{
    sync::{Arc, atomic::Ordering},
    thread,
    time::{Duration, Instant},
};

use super::EventSender;

/// How often the refresh timer wakes to check for cancellation
const TICK: Duration = Duration::from_millis(200);

fn load_and_send(source: &dyn EntrySource, sender: &EventSender) {
    match source.load() {
        Ok(entries) => sender.send(AppEvent::Refreshed { entries }),
        Err(e) => sender.send(AppEvent::SourceFailed(format!("{e:#}"))),
    }
}

pub(super) fn spawn_refresh(source: &Arc<dyn EntrySource>, sender: &EventSender) {
    let source = Arc::clone(source);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        log::debug!("refreshing from {}", source.describe());
        load_and_send(source.as_ref(), &sender);
    });
}

/// Reload the source every `every` until cancelled. A zero interval disables the timer.
pub(super) fn spawn_refresh_timer(
    source: &Arc<dyn EntrySource>,
    sender: &EventSender,
    every: Duration,
) {
    if every.is_zero() {
        return;
    }
    let source = Arc::clone(source);
    let sender = sender.clone();
    thread::spawn(move || {
        loop {
            let deadline = Instant::now() + every;
            while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
                if sender.cancel.load(Ordering::Relaxed) {
                    return;
                }
                if remaining.is_zero() {
                    break;
                }
                thread::sleep(remaining.min(TICK));
            }
            if sender.cancel.load(Ordering::Relaxed) {
                return;
            }
            log::debug!("timed refresh from {}", source.describe());
            load_and_send(source.as_ref(), &sender);
        }
    });
}
