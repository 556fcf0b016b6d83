//! File-backed schema document with staged edits.
//!
//! An invocation loads the document once with [`SchemaDocument::begin`],
//! applies every change to the returned [`DocumentEdit`] in memory, and
//! writes the result with [`SchemaDocument::commit`]. Nothing touches the
//! file until commit, and commit replaces it through a temp file rename.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use genql_core::types::{Field, Model};
use tempfile::NamedTempFile;

use crate::error::DslError;
use crate::writer;

/// In-memory document text plus the content it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEdit {
    original: String,
    text: String,
}

impl DocumentEdit {
    pub fn new(text: String) -> Self {
        Self {
            original: text.clone(),
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_modified(&self) -> bool {
        self.text != self.original
    }

    /// Appends the rendered block of `model`.
    pub fn append_model(&mut self, model: &Model) {
        self.text = writer::append_model(&self.text, model);
    }

    /// Inserts `field` at the end of the block of `model_name`.
    ///
    /// On error the staged text is left as it was.
    pub fn patch_field(&mut self, field: &Field, model_name: &str) -> Result<(), DslError> {
        self.text = writer::patch_field(&self.text, field, model_name)?;
        Ok(())
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// A schema document at a caller-resolved path.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    path: PathBuf,
}

impl SchemaDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole document.
    ///
    /// # Errors
    ///
    /// `DocumentUnreadable` if the file is missing or not UTF-8.
    pub fn load(&self) -> Result<String, DslError> {
        fs::read_to_string(&self.path).map_err(|e| DslError::DocumentUnreadable {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Loads the document into a fresh edit.
    pub fn begin(&self) -> Result<DocumentEdit, DslError> {
        let text = self.load()?;
        tracing::debug!(path = %self.path.display(), bytes = text.len(), "document loaded");
        Ok(DocumentEdit::new(text))
    }

    /// Writes the staged text of `edit` over the document.
    ///
    /// An unmodified edit is a no-op. The file is re-read first and the
    /// commit is refused with `DocumentChanged` if it no longer matches
    /// what `edit` was loaded from.
    ///
    /// # Errors
    ///
    /// `DocumentUnreadable`, `DocumentChanged` or `DocumentUnwritable`. On
    /// any error the file on disk is unchanged.
    pub fn commit(&self, edit: DocumentEdit) -> Result<(), DslError> {
        if !edit.is_modified() {
            tracing::debug!(path = %self.path.display(), "nothing to commit");
            return Ok(());
        }

        let current = self.load()?;
        if current != edit.original {
            return Err(DslError::DocumentChanged {
                path: self.path.display().to_string(),
            });
        }

        self.replace(edit.text.as_bytes())?;
        tracing::debug!(path = %self.path.display(), bytes = edit.text.len(), "document committed");
        Ok(())
    }

    /// Loads, appends `model` and commits in one step.
    ///
    /// # Errors
    ///
    /// `DocumentUnwritable` if the document cannot be opened.
    pub fn append_model(&self, model: &Model) -> Result<(), DslError> {
        let mut edit = self.begin().map_err(|e| match e {
            DslError::DocumentUnreadable { path, reason } => {
                DslError::DocumentUnwritable { path, reason }
            }
            other => other,
        })?;
        edit.append_model(model);
        self.commit(edit)
    }

    /// Loads, patches `field` into `model_name` and commits in one step.
    pub fn patch_field(&self, field: &Field, model_name: &str) -> Result<(), DslError> {
        let mut edit = self.begin()?;
        edit.patch_field(field, model_name)?;
        self.commit(edit)
    }

    fn replace(&self, contents: &[u8]) -> Result<(), DslError> {
        let unwritable = |reason: String| DslError::DocumentUnwritable {
            path: self.path.display().to_string(),
            reason,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| unwritable(e.to_string()))?;
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| unwritable(e.to_string()))?;
        }
        tmp.write_all(contents).map_err(|e| unwritable(e.to_string()))?;
        tmp.as_file().sync_all().map_err(|e| unwritable(e.to_string()))?;
        tmp.persist(&self.path)
            .map_err(|e| unwritable(e.error.to_string()))?;
        Ok(())
    }
}
