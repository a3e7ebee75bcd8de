//! Template Library - imported HTML snippets kept in memory
//!
//! Each import is wrapped in a `<template data-name="…">` element so the
//! client can clone it straight into the page.

use crate::storage::error::{validate_name, StorageResult};
use crate::storage::html::escape;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;

/// In-memory store of imported templates, keyed by file name
#[derive(Debug, Default)]
pub struct TemplateLibrary {
    templates: RwLock<HashMap<String, String>>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap and store `html` under `filename`, replacing any previous import
    pub fn import(&self, filename: &str, html: &str) -> StorageResult<()> {
        validate_name(filename)?;

        let wrapped = format!(
            "<template data-name=\"{}\">\n{}\n</template>",
            escape(filename),
            html
        );
        let replaced = self
            .templates
            .write()
            .insert(filename.to_string(), wrapped)
            .is_some();

        tracing::info!(template = %filename, bytes = html.len(), replaced, "Imported template");
        Ok(())
    }

    /// Import every `*.html` file in `dir`; a missing directory imports nothing
    pub async fn load_dir(&self, dir: &Path) -> StorageResult<usize> {
        if !tokio::fs::try_exists(dir).await? {
            return Ok(0);
        }

        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut loaded = 0;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let html = tokio::fs::read_to_string(&path).await?;
            self.import(filename, &html)?;
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Wrapped markup of one template
    pub fn get(&self, filename: &str) -> Option<String> {
        self.templates.read().get(filename).cloned()
    }

    /// All template names, sorted
    pub fn manifest(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }
}
