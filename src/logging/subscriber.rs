//! `tracing-subscriber` backed log configurator
//!
//! Levels live in a reloadable `EnvFilter`; output goes to
//! `<output_path>/webdriver.log` once an output path is known, stderr before
//! that.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::Dispatch;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{reload, EnvFilter, Registry};

use super::traits::{LogConfigurator, LogSettings};
use crate::{Error, Result};

/// File name used inside the output directory
pub const LOG_FILE_NAME: &str = "webdriver.log";

/// Writer that can be pointed at a file after the subscriber is built
#[derive(Debug, Clone, Default)]
pub struct OutputWriter {
    file: Arc<Mutex<Option<File>>>,
}

impl OutputWriter {
    fn set_file(&self, file: File) -> Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| Error::internal(format!("Lock error: {}", e)))?;
        *guard = Some(file);
        Ok(())
    }
}

impl Write for OutputWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        match guard.as_mut() {
            Some(file) => file.write(buf),
            None => io::stderr().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        match guard.as_mut() {
            Some(file) => file.flush(),
            None => io::stderr().flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for OutputWriter {
    type Writer = OutputWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Log configurator driving a `tracing-subscriber` registry
#[derive(Debug)]
pub struct TracingLogConfigurator {
    filter: reload::Handle<EnvFilter, Registry>,
    writer: OutputWriter,
    output_path: RwLock<Option<PathBuf>>,
}

impl TracingLogConfigurator {
    /// Build the configurator and the dispatcher it controls.
    ///
    /// `prior_output_path` is an output path established before any session
    /// was created, e.g. from `WEBDRIVER_LOG_PATH`.
    pub fn new(prior_output_path: Option<PathBuf>) -> Result<(Self, Dispatch)> {
        let (filter, handle) = reload::Layer::new(EnvFilter::new("info"));
        let writer = OutputWriter::default();

        let subscriber = tracing_subscriber::registry().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer.clone()),
        );

        let configurator = Self {
            filter: handle,
            writer,
            output_path: RwLock::new(None),
        };
        if let Some(path) = prior_output_path {
            configurator.open_output(&path)?;
        }

        Ok((configurator, Dispatch::new(subscriber)))
    }

    /// Build the configurator and install its dispatcher globally
    pub fn install(prior_output_path: Option<PathBuf>) -> Result<Self> {
        let (configurator, dispatch) = Self::new(prior_output_path)?;
        tracing::dispatcher::set_global_default(dispatch)
            .map_err(|e| Error::logging(format!("Failed to install subscriber: {}", e)))?;
        Ok(configurator)
    }

    fn open_output(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE_NAME))?;
        self.writer.set_file(file)?;

        *self
            .output_path
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(dir.to_path_buf());
        Ok(())
    }
}

impl LogConfigurator for TracingLogConfigurator {
    fn output_path(&self) -> Option<PathBuf> {
        self.output_path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn configure(&self, settings: &LogSettings) -> Result<()> {
        if let Some(path) = &settings.output_path {
            if self.output_path().as_ref() != Some(path) {
                self.open_output(path)?;
            }
        }

        let filter = EnvFilter::try_new(settings.directives())
            .map_err(|e| Error::logging(format!("Invalid log directives: {}", e)))?;
        self.filter
            .reload(filter)
            .map_err(|e| Error::logging(format!("Failed to reload log filter: {}", e)))?;
        Ok(())
    }
}
