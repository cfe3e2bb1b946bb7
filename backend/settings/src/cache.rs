//! In-memory copy of the last settings document read from disk.

use crate::SettingsDocument;

/// Holds the most recently read document until the next write.
#[derive(Debug, Default)]
pub struct SettingsCache {
    document: Option<SettingsDocument>,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&SettingsDocument> {
        self.document.as_ref()
    }

    pub fn set(&mut self, doc: SettingsDocument) {
        self.document = Some(doc);
    }

    /// Drop the cached document; the next read goes to storage.
    pub fn invalidate(&mut self) {
        self.document = None;
    }

    pub fn is_populated(&self) -> bool {
        self.document.is_some()
    }

    /// Return the cached document, loading it with `load` if empty.
    ///
    /// A failed load leaves the cache empty.
    pub fn get_or_load<E>(
        &mut self,
        load: impl FnOnce() -> Result<SettingsDocument, E>,
    ) -> Result<&SettingsDocument, E> {
        if self.document.is_none() {
            self.document = Some(load()?);
        }
        Ok(self.document.get_or_insert_with(SettingsDocument::new))
    }
}
