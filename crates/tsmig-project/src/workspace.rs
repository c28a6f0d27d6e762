//! Project workspaces
//!
//! [`Workspace`] is the general project context: opened from a
//! [`ProjectConfig`], it loads the configured `files` and follows relative
//! imports transitively, the way a whole-program loader does.
//!
//! [`ScopedWorkspace`] is what the migration pipeline uses. It is built from
//! a `Workspace` opened with every automatic load switched off, purges
//! whatever got loaded anyway, adds the target, and only then hands out the
//! single remaining member.

use crate::config::ProjectConfig;
use crate::error::ProjectError;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tsmig_artifact::{CompilerSettings, ParseError, SourceFile, SourceKind};

/// Controls what a [`Workspace`] loads on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Do not load the configuration's `files` list on open
    pub skip_adding_files_from_config: bool,
    /// Do not follow relative imports of added files
    pub skip_file_dependency_resolution: bool,
}

impl LoadOptions {
    /// Load nothing beyond what is added explicitly
    #[inline]
    #[must_use]
    pub const fn isolated() -> Self {
        Self {
            skip_adding_files_from_config: true,
            skip_file_dependency_resolution: true,
        }
    }
}

/// In-memory project context
#[derive(Debug)]
pub struct Workspace {
    config_path: PathBuf,
    settings: CompilerSettings,
    options: LoadOptions,
    files: IndexMap<PathBuf, SourceFile>,
}

impl Workspace {
    /// Open a workspace for `config`
    ///
    /// # Errors
    /// Returns `ProjectError::Parse` if an automatically loaded file cannot
    /// be read or parsed
    pub async fn open(config: &ProjectConfig, options: LoadOptions) -> Result<Self, ProjectError> {
        let mut workspace = Self {
            config_path: config.path().to_path_buf(),
            settings: config.settings().clone(),
            options,
            files: IndexMap::new(),
        };

        if !options.skip_adding_files_from_config {
            for path in config.files() {
                if !path.is_file() {
                    tracing::warn!(
                        "{} lists {}, which does not exist",
                        config.path().display(),
                        path.display()
                    );
                    continue;
                }
                workspace.add_file(path).await?;
            }
        }

        tracing::debug!(
            "Opened workspace for {} with {} file(s)",
            workspace.config_path.display(),
            workspace.len()
        );
        Ok(workspace)
    }

    /// Load `path` into the workspace
    ///
    /// Unless dependency resolution is skipped, relative imports of the file
    /// are followed and loaded too. Adding a file that is already a member is
    /// a no-op.
    ///
    /// # Errors
    /// Returns `ProjectError::Parse` if the file, or a followed dependency,
    /// cannot be read or parsed
    pub async fn add_file(&mut self, path: impl AsRef<Path>) -> Result<&SourceFile, ProjectError> {
        let path = tokio::fs::canonicalize(path.as_ref())
            .await
            .map_err(|e| ParseError::io_error(path.as_ref(), e))?;

        let mut pending = vec![path.clone()];
        while let Some(next) = pending.pop() {
            if self.files.contains_key(&next) {
                continue;
            }
            let file = SourceFile::load(next.clone()).await?;
            if !self.options.skip_file_dependency_resolution {
                pending.extend(self.resolve_dependencies(&file));
            }
            tracing::trace!("Added {} to workspace", next.display());
            self.files.insert(next, file);
        }

        self.files
            .get(&path)
            .ok_or_else(|| ProjectError::ScopeViolation {
                target: path.clone(),
                members: self.files.len(),
            })
    }

    /// Remove a member, returning it if it was present
    pub fn remove_file(&mut self, path: &Path) -> Option<SourceFile> {
        self.files.shift_remove(path)
    }

    /// Remove every member
    ///
    /// # Returns
    /// Number of files removed
    pub fn purge(&mut self) -> usize {
        let paths: Vec<PathBuf> = self.files.keys().cloned().collect();
        for path in &paths {
            self.remove_file(path);
        }
        paths.len()
    }

    /// Member count
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the workspace has no members
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Member paths in load order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Effective compiler settings
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Existing files that relative imports of `file` point at
    fn resolve_dependencies(&self, file: &SourceFile) -> Vec<PathBuf> {
        let Some(dir) = file.path().parent() else {
            return Vec::new();
        };
        file.tree()
            .module_specifiers()
            .into_iter()
            .filter(|spec| spec.value.starts_with("./") || spec.value.starts_with("../"))
            .filter_map(|spec| self.resolve_relative(&dir.join(&spec.value)))
            .filter_map(|path| std::fs::canonicalize(path).ok())
            .collect()
    }

    fn resolve_relative(&self, base: &Path) -> Option<PathBuf> {
        let admissible = |path: &PathBuf| {
            SourceKind::from_path(path)
                .is_some_and(|kind| !kind.is_javascript() || self.settings.allows_js())
                && path.is_file()
        };

        let mut candidates = vec![base.to_path_buf()];
        // `./util.js` in ESM-style TypeScript refers to `./util.ts`
        if let Some(stem) = base.to_str().and_then(|s| s.strip_suffix(".js")) {
            candidates.push(PathBuf::from(format!("{stem}.ts")));
            candidates.push(PathBuf::from(format!("{stem}.tsx")));
        }
        for kind in SourceKind::ALL {
            let mut with_ext = base.as_os_str().to_owned();
            with_ext.push(".");
            with_ext.push(kind.extension());
            candidates.push(PathBuf::from(with_ext));
        }
        for kind in SourceKind::ALL {
            candidates.push(base.join(format!("index.{}", kind.extension())));
        }

        candidates.into_iter().find(admissible)
    }
}

/// A workspace that owns exactly one file
///
/// The single-member property is structural: construction fails unless the
/// underlying workspace holds exactly the target, and the target is then
/// moved out of it.
#[derive(Debug)]
pub struct ScopedWorkspace {
    config_path: PathBuf,
    settings: CompilerSettings,
    file: SourceFile,
}

impl ScopedWorkspace {
    /// Build a workspace holding only `target`
    ///
    /// # Arguments
    /// * `config` - Located configuration, `None` if lookup failed
    /// * `target` - Absolute path of the file to load
    ///
    /// # Errors
    /// - `ProjectError::ConfigurationMissing` if `config` is `None`
    /// - `ProjectError::Parse` if the target cannot be read or parsed
    /// - `ProjectError::ScopeViolation` if anything besides the target is loaded
    pub async fn build(config: Option<&ProjectConfig>, target: &Path) -> Result<Self, ProjectError> {
        let config = config.ok_or_else(|| ProjectError::ConfigurationMissing {
            target: target.to_path_buf(),
        })?;

        let mut workspace = Workspace::open(config, LoadOptions::isolated()).await?;
        let purged = workspace.purge();
        if purged > 0 {
            tracing::debug!("Purged {} auto-loaded file(s)", purged);
        }

        let target = workspace.add_file(target).await?.path().to_path_buf();

        let members = workspace.len();
        match (members, workspace.files.pop()) {
            (1, Some((path, file))) if path == target => Ok(Self {
                config_path: workspace.config_path,
                settings: workspace.settings,
                file,
            }),
            _ => Err(ProjectError::ScopeViolation { target, members }),
        }
    }

    /// Member count; the type admits exactly one
    #[inline]
    #[must_use]
    pub const fn member_count(&self) -> usize {
        1
    }

    /// The single member
    #[inline]
    #[must_use]
    pub fn target(&self) -> &SourceFile {
        &self.file
    }

    /// The single member, mutably
    #[inline]
    pub fn target_mut(&mut self) -> &mut SourceFile {
        &mut self.file
    }

    /// Configuration the workspace was built from
    #[inline]
    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Effective compiler settings
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }
}
