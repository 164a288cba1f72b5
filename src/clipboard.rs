//! Copy-to-clipboard support.
//!
//! The platform clipboard lives behind [`ClipboardSink`]. Copy operations
//! never fail outright: sink errors are folded into a [`CopyResult`].

use crate::text_generator::LoremText;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyType {
    All,
    Selection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub copy_type: CopyType,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

#[derive(Debug)]
pub struct ClipboardManager<S> {
    sink: S,
}

impl<S: ClipboardSink> ClipboardManager<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Copy every paragraph, separated by blank lines.
    pub fn copy_all(&mut self, texts: &[LoremText]) -> CopyResult {
        let joined = join_texts(texts);
        self.copy(&joined, CopyType::All)
    }

    pub fn copy_selection(&mut self, selected: &str) -> CopyResult {
        self.copy(selected, CopyType::Selection)
    }

    fn copy(&mut self, text: &str, copy_type: CopyType) -> CopyResult {
        let timestamp = unix_millis();
        match self.sink.write_text(text) {
            Ok(()) => {
                info!(?copy_type, chars = text.len(), "Copied text");
                CopyResult {
                    success: true,
                    error: None,
                    copy_type,
                    timestamp,
                }
            }
            Err(err) => {
                warn!(?copy_type, "Copy failed: {err:#}");
                CopyResult {
                    success: false,
                    error: Some(format!("{err:#}")),
                    copy_type,
                    timestamp,
                }
            }
        }
    }
}

pub fn join_texts(texts: &[LoremText]) -> String {
    texts
        .iter()
        .map(|text| text.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// Writes copied text to a file, replacing previous contents.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ClipboardSink for FileSink {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        fs::write(&self.path, text)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ClipboardSink for StdoutSink {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}").context("Failed to write to stdout")
    }
}

/// Keeps the last copied text in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub contents: Option<String>,
}

impl ClipboardSink for MemorySink {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
