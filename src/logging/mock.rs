//! Mock log configurator for testing
//!
//! Records every `configure` call into a [`LogJournal`]. Pair it with a
//! [`JournalLayer`] on a scoped subscriber to assert that configuration
//! happens before the first diagnostic line.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use super::traits::{LogConfigurator, LogSettings};
use crate::Result;

/// One entry in a [`LogJournal`]
#[derive(Debug, Clone, PartialEq)]
pub enum JournalEntry {
    /// `configure` was called
    Configured(LogSettings),
    /// A tracing event was emitted
    Event {
        level: Level,
        target: String,
        message: String,
    },
}

/// Shared, ordered record of configuration calls and log events
#[derive(Debug, Clone, Default)]
pub struct LogJournal {
    entries: Arc<Mutex<Vec<JournalEntry>>>,
}

impl LogJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<JournalEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, entry: JournalEntry) {
        self.lock().push(entry);
    }

    pub fn entries(&self) -> Vec<JournalEntry> {
        self.lock().clone()
    }

    /// Settings of every `configure` call, in order
    pub fn configured(&self) -> Vec<LogSettings> {
        self.lock()
            .iter()
            .filter_map(|entry| match entry {
                JournalEntry::Configured(settings) => Some(settings.clone()),
                JournalEntry::Event { .. } => None,
            })
            .collect()
    }

    /// Messages of every recorded event, in order
    pub fn messages(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|entry| match entry {
                JournalEntry::Event { message, .. } => Some(message.clone()),
                JournalEntry::Configured(_) => None,
            })
            .collect()
    }

    /// Level and message of every recorded event, in order
    pub fn events(&self) -> Vec<(Level, String)> {
        self.lock()
            .iter()
            .filter_map(|entry| match entry {
                JournalEntry::Event { level, message, .. } => Some((*level, message.clone())),
                JournalEntry::Configured(_) => None,
            })
            .collect()
    }
}

/// Log configurator that only records what it is asked to do
#[derive(Debug, Default)]
pub struct RecordingLogConfigurator {
    output_path: Mutex<Option<PathBuf>>,
    journal: LogJournal,
}

impl RecordingLogConfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an output path already established
    pub fn with_output_path(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: Mutex::new(Some(path.into())),
            journal: LogJournal::default(),
        }
    }

    /// Record into an existing journal
    pub fn with_journal(mut self, journal: LogJournal) -> Self {
        self.journal = journal;
        self
    }

    pub fn journal(&self) -> &LogJournal {
        &self.journal
    }
}

impl LogConfigurator for RecordingLogConfigurator {
    fn output_path(&self) -> Option<PathBuf> {
        self.output_path
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn configure(&self, settings: &LogSettings) -> Result<()> {
        if let Some(path) = &settings.output_path {
            *self
                .output_path
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = Some(path.clone());
        }
        self.journal.push(JournalEntry::Configured(settings.clone()));
        Ok(())
    }
}

/// Layer appending every event to a [`LogJournal`]
#[derive(Debug, Clone)]
pub struct JournalLayer {
    journal: LogJournal,
}

impl JournalLayer {
    pub fn new(journal: LogJournal) -> Self {
        Self { journal }
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

impl<S: Subscriber> Layer<S> for JournalLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.journal.push(JournalEntry::Event {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_recording_configurator_keeps_order() {
        let journal = LogJournal::new();
        let configurator = RecordingLogConfigurator::new().with_journal(journal.clone());
        let subscriber = tracing_subscriber::registry().with(JournalLayer::new(journal.clone()));

        tracing::subscriber::with_default(subscriber, || {
            configurator
                .configure(&LogSettings {
                    output_path: Some(PathBuf::from("/tmp/logs")),
                    ..Default::default()
                })
                .unwrap();
            tracing::info!("after configure");
        });

        let entries = journal.entries();
        assert!(matches!(entries[0], JournalEntry::Configured(_)));
        assert_eq!(journal.messages(), vec!["after configure".to_string()]);
        assert_eq!(configurator.output_path(), Some(PathBuf::from("/tmp/logs")));
    }
}
