//! Structured parser diagnostics.
//!
//! The parser never fails a response over an unknown class or a broken
//! constructor; it routes a categorized event through the process-wide
//! reporter and leaves the slot empty. The reporter is fire-and-forget and
//! never influences control flow.

use std::sync::{LazyLock, RwLock};

use serde_json::Value;

use crate::stub::{KeyChange, KeyInfo};

/// One categorized parser event.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserEvent {
    /// A constructor threw; the raw body is attached for triage.
    Parse {
        classname: String,
        error: String,
        raw: Value,
    },

    /// A dispatched class was not in the caller's allowed set.
    TypeCheck {
        classname: String,
        expected: Vec<String>,
    },

    /// The memo holds affected nodes but the document carried no mutations.
    MutationDataMissing { classname: String },

    /// Aggregate over one mutation pass: how many nodes were affected, how
    /// many could not be patched, and their titles.
    MutationDataInvalid {
        classname: String,
        total: usize,
        failed: usize,
        titles: Vec<String>,
    },

    /// An unknown class was synthesized; carries the introspected shape and
    /// a human-readable class sketch.
    ClassNotFound {
        classname: String,
        key_info: Vec<KeyInfo>,
        sketch: String,
    },

    /// A synthesized class resurfaced with differently-shaped keys.
    ClassChanged {
        classname: String,
        changes: Vec<KeyChange>,
    },
}

impl ParserEvent {
    pub fn classname(&self) -> &str {
        match self {
            ParserEvent::Parse { classname, .. }
            | ParserEvent::TypeCheck { classname, .. }
            | ParserEvent::MutationDataMissing { classname }
            | ParserEvent::MutationDataInvalid { classname, .. }
            | ParserEvent::ClassNotFound { classname, .. }
            | ParserEvent::ClassChanged { classname, .. } => classname,
        }
    }
}

pub type ReporterFn = Box<dyn Fn(&ParserEvent) + Send + Sync>;

static REPORTER: LazyLock<RwLock<ReporterFn>> =
    LazyLock::new(|| RwLock::new(Box::new(default_reporter)));

/// Replace the process-wide reporter. Expected to happen at startup.
pub fn set_reporter(reporter: impl Fn(&ParserEvent) + Send + Sync + 'static) {
    *REPORTER.write().expect("reporter lock poisoned") = Box::new(reporter);
}

/// Restore the default `tracing` sink.
pub fn reset_reporter() {
    *REPORTER.write().expect("reporter lock poisoned") = Box::new(default_reporter);
}

pub(crate) fn report(event: ParserEvent) {
    REPORTER.read().expect("reporter lock poisoned")(&event);
}

fn default_reporter(event: &ParserEvent) {
    match event {
        ParserEvent::Parse {
            classname, error, ..
        } => {
            tracing::error!(class = %classname, %error, "constructor failed");
        }
        ParserEvent::TypeCheck {
            classname,
            expected,
        } => {
            tracing::warn!(
                class = %classname,
                expected = %expected.join(", "),
                "type check failed"
            );
        }
        ParserEvent::MutationDataMissing { classname } => {
            tracing::warn!(class = %classname, "mutation data missing");
        }
        ParserEvent::MutationDataInvalid {
            classname,
            total,
            failed,
            titles,
        } => {
            tracing::warn!(
                class = %classname,
                total,
                failed,
                titles = %titles.join(", "),
                "mutation data invalid"
            );
        }
        ParserEvent::ClassNotFound {
            classname, sketch, ..
        } => {
            tracing::warn!(class = %classname, sketch = %sketch, "unknown class, stub registered");
        }
        ParserEvent::ClassChanged { classname, changes } => {
            let summary: Vec<String> = changes
                .iter()
                .map(|c| format!("{}: {} -> {}", c.key, c.previous, c.current))
                .collect();
            tracing::warn!(class = %classname, changes = %summary.join(", "), "class shape changed");
        }
    }
}
