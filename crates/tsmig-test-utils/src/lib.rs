//! Testing utilities for tsmig workspace
//!
//! Project fixtures on disk and transforms with scripted behavior.

#![allow(missing_docs)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tsmig_artifact::{SourceFile, TextEdit};
use tsmig_transform::{MigrationOptions, Transform, TransformError};

/// Minimal `tsconfig.json`
pub const MINIMAL_TSCONFIG: &str = "{ \"compilerOptions\": {} }\n";

/// A throwaway project directory
#[derive(Debug)]
pub struct ProjectFixture {
    dir: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Project with a minimal `tsconfig.json` at its root
    pub fn with_config() -> Self {
        let fixture = Self::new();
        fixture.write("tsconfig.json", MINIMAL_TSCONFIG);
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Leaves the file alone
#[derive(Debug, Default)]
pub struct NoopTransform;

impl Transform for NoopTransform {
    fn name(&self) -> &str {
        "noop"
    }

    fn transform(&self, _: &mut SourceFile, _: &MigrationOptions) -> Result<(), TransformError> {
        Ok(())
    }
}

/// Edits the file, then returns an error
#[derive(Debug)]
pub struct FailingTransform(pub &'static str);

impl Transform for FailingTransform {
    fn name(&self) -> &str {
        "failing"
    }

    fn transform(&self, file: &mut SourceFile, _: &MigrationOptions) -> Result<(), TransformError> {
        file.apply_edits(vec![TextEdit::replace(0..0, "// touched\n")])?;
        Err(TransformError::transform(self.0))
    }
}

/// Edits the file, then panics with its message
#[derive(Debug)]
pub struct PanickingTransform(pub &'static str);

impl Transform for PanickingTransform {
    fn name(&self) -> &str {
        "panicking"
    }

    fn transform(&self, file: &mut SourceFile, _: &MigrationOptions) -> Result<(), TransformError> {
        file.apply_edits(vec![TextEdit::replace(0..0, "// touched\n")])?;
        panic!("{}", self.0)
    }
}

/// Appends text that does not parse
#[derive(Debug, Default)]
pub struct BreakingTransform;

impl Transform for BreakingTransform {
    fn name(&self) -> &str {
        "breaking"
    }

    fn transform(&self, file: &mut SourceFile, _: &MigrationOptions) -> Result<(), TransformError> {
        let end = file.text().len();
        file.apply_edits(vec![TextEdit::replace(end..end, "const = ;\n")])?;
        Ok(())
    }
}
