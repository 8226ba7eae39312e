//! Shared helpers for tests that observe reporter events.

use std::sync::{Arc, Mutex};

use crate::report::{self, ParserEvent};

/// Serializes tests that swap the process-wide reporter.
static GUARD: Mutex<()> = Mutex::new(());

/// Run `f` with a capturing reporter installed and return every event it
/// emitted. Callers holding the guard run one at a time.
pub(crate) fn capture_events(f: impl FnOnce()) -> Vec<ParserEvent> {
    let _guard = GUARD.lock().unwrap_or_else(|e| e.into_inner());
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    report::set_reporter(move |event| sink.lock().unwrap().push(event.clone()));
    f();
    report::reset_reporter();
    Arc::try_unwrap(events)
        .expect("reporter should have released the sink")
        .into_inner()
        .unwrap()
}
