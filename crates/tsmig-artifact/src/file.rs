//! Source files: a path, its syntax tree, and the hash it was loaded with

use crate::error::{EditError, ParseError, WriteError};
use crate::hash::ContentHash;
use crate::kind::SourceKind;
use crate::tree::{SourceTree, TextEdit};
use std::path::{Path, PathBuf};

/// A parsed source file
///
/// Remembers the hash of the text it was loaded from so that callers can
/// tell whether any mutation actually changed the content.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    tree: SourceTree,
    original_hash: ContentHash,
}

impl SourceFile {
    /// Parse `text` as the content of `path`
    ///
    /// # Errors
    /// - `ParseError::UnsupportedExtension` if the extension is not recognized
    /// - `ParseError::Tree` if no tree could be produced
    /// - `ParseError::Syntax` if the text contains a syntax error
    pub fn parse(path: impl Into<PathBuf>, text: String) -> Result<Self, ParseError> {
        let path = path.into();
        let kind = SourceKind::from_path(&path)
            .ok_or_else(|| ParseError::UnsupportedExtension(path.clone()))?;

        let original_hash = ContentHash::compute(text.as_bytes());
        let tree = SourceTree::parse(text, kind).map_err(|source| ParseError::Tree {
            path: path.clone(),
            source,
        })?;

        if let Some(site) = tree.syntax_error() {
            return Err(ParseError::Syntax { path, site });
        }

        Ok(Self {
            path,
            tree,
            original_hash,
        })
    }

    /// Read and parse the file at `path`
    ///
    /// # Errors
    /// `ParseError::Io` if the file cannot be read as UTF-8 text, otherwise as
    /// [`SourceFile::parse`]
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, ParseError> {
        let path = path.into();
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ParseError::io_error(&path, e))?;
        tracing::debug!("Loaded {} ({} bytes)", path.display(), text.len());
        Self::parse(path, text)
    }

    /// File path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.tree.kind()
    }

    /// Syntax tree
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &SourceTree {
        &self.tree
    }

    /// Current text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        self.tree.text()
    }

    /// Apply edits to the tree in place
    ///
    /// # Errors
    /// See [`SourceTree::apply_edits`]
    pub fn apply_edits(&mut self, edits: Vec<TextEdit>) -> Result<usize, EditError> {
        self.tree.apply_edits(edits)
    }

    /// Hash of the text the file was loaded with
    #[inline]
    #[must_use]
    pub fn original_hash(&self) -> ContentHash {
        self.original_hash
    }

    /// Hash of the current text
    #[inline]
    #[must_use]
    pub fn current_hash(&self) -> ContentHash {
        ContentHash::compute(self.text().as_bytes())
    }

    /// Whether the current text differs from the loaded text
    #[inline]
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.current_hash() != self.original_hash
    }

    /// Write the current text back to the original path
    ///
    /// A single write; nothing is retried and no backup is made.
    ///
    /// # Errors
    /// Returns `WriteError` if the filesystem write fails
    pub async fn save(&self) -> Result<(), WriteError> {
        tokio::fs::write(&self.path, self.text().as_bytes())
            .await
            .map_err(|source| WriteError {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!("Wrote {} ({} bytes)", self.path.display(), self.text().len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_detects_kind_from_path() {
        let file = SourceFile::parse("/p/view.tsx", "export const v = <b>x</b>;\n".into()).unwrap();
        assert_eq!(file.kind(), SourceKind::Tsx);
        assert!(!file.is_modified());
    }

    #[test]
    fn plain_js_file_may_contain_jsx() {
        let file = SourceFile::parse(
            "/p/App.js",
            "export const App = () => <div>hi</div>;\n".into(),
        )
        .unwrap();
        assert_eq!(file.kind(), SourceKind::JavaScript);
    }

    #[test]
    fn parse_rejects_unknown_extension() {
        let result = SourceFile::parse("/p/notes.md", "# hi\n".into());
        assert!(matches!(result, Err(ParseError::UnsupportedExtension(_))));
    }

    #[test]
    fn parse_reports_syntax_error_with_path() {
        let result = SourceFile::parse("/p/a.ts", "let = ;\n".into());
        match result {
            Err(ParseError::Syntax { path, site }) => {
                assert_eq!(path, PathBuf::from("/p/a.ts"));
                assert_eq!(site.line, 1);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn edits_mark_file_modified() {
        let mut file = SourceFile::parse("/p/a.ts", "let a = 1;\n".into()).unwrap();
        let before = file.original_hash();
        file.apply_edits(vec![TextEdit::replace(8..9, "2")]).unwrap();
        assert!(file.is_modified());
        assert_eq!(file.original_hash(), before);
        assert_ne!(file.current_hash(), before);
    }

    #[test]
    fn edit_round_trip_is_not_a_modification() {
        let mut file = SourceFile::parse("/p/a.ts", "let a = 1;\n".into()).unwrap();
        file.apply_edits(vec![TextEdit::replace(8..9, "2")]).unwrap();
        file.apply_edits(vec![TextEdit::replace(8..9, "1")]).unwrap();
        assert!(!file.is_modified());
    }

    #[tokio::test]
    async fn load_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.ts");
        std::fs::write(&path, "export let n = 1;\n").unwrap();

        let mut file = SourceFile::load(&path).await.unwrap();
        file.apply_edits(vec![TextEdit::replace(15..16, "42")]).unwrap();
        file.save().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "export let n = 42;\n");
    }

    #[tokio::test]
    async fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = SourceFile::load(dir.path().join("gone.ts")).await;
        assert!(matches!(result, Err(ParseError::Io { .. })));
    }

    #[tokio::test]
    async fn save_into_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = SourceFile::parse(dir.path().join("nested/a.ts"), "let a;\n".into()).unwrap();
        let err = file.save().await.unwrap_err();
        assert_eq!(err.path, dir.path().join("nested/a.ts"));
    }
}
