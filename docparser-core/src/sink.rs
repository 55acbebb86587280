//! Operator-facing event sink
//!
//! The parse handler reports progress and failures through an injected
//! [`EventSink`] instead of a process-wide logger. Production code uses
//! [`TracingSink`]; tests swap in [`CapturingSink`] and inspect what was
//! reported.

use std::sync::Mutex;

/// Thread-safe logging interface shared by concurrent parse requests
pub trait EventSink: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards events to the global `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: EventLevel,
    pub message: String,
}

/// Records every event in memory, in emission order
#[derive(Debug, Default)]
pub struct CapturingSink {
    events: Mutex<Vec<CapturedEvent>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().clone()
    }

    pub fn messages(&self, level: EventLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|event| event.level == level)
            .map(|event| event.message.clone())
            .collect()
    }

    fn record(&self, level: EventLevel, message: &str) {
        self.lock().push(CapturedEvent {
            level,
            message: message.to_string(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CapturedEvent>> {
        // A panicking writer can't leave a Vec half-pushed
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for CapturingSink {
    fn info(&self, message: &str) {
        self.record(EventLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(EventLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(EventLevel::Error, message);
    }
}
