//! Project configuration loading
//!
//! Reads a `tsconfig.json` (JSONC), follows its `extends` chain and produces
//! the effective [`CompilerSettings`] plus the configured `files` list.

use crate::error::ConfigError;
use crate::jsonc;
use serde::Deserialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tsmig_artifact::CompilerSettings;

type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// `extends` is a single path or, since TypeScript 5.0, a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    fn into_vec(self) -> Vec<String> {
        match self {
            Extends::One(spec) => vec![spec],
            Extends::Many(specs) => specs,
        }
    }
}

/// The parts of a `tsconfig.json` this tool reads
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    extends: Option<Extends>,
    compiler_options: Option<CompilerSettings>,
    files: Option<Vec<String>>,
}

/// Settings contributed by one configuration file and everything it extends
#[derive(Debug, Default)]
struct Layer {
    settings: CompilerSettings,
    files: Option<Vec<PathBuf>>,
}

impl Layer {
    fn layered_over(self, base: Layer) -> Layer {
        Layer {
            settings: self.settings.layered_over(base.settings),
            files: self.files.or(base.files),
        }
    }
}

/// A loaded project configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    path: PathBuf,
    settings: CompilerSettings,
    files: Vec<PathBuf>,
}

impl ProjectConfig {
    /// Load the configuration at `path`, resolving `extends`
    ///
    /// # Errors
    /// - `ConfigError::Io` if a file in the chain cannot be read
    /// - `ConfigError::Syntax` if a file in the chain is not valid JSONC
    /// - `ConfigError::ExtendsNotFound` if an `extends` target does not exist
    /// - `ConfigError::Cycle` if the chain extends itself
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let mut visiting = Vec::new();
        let mut chain = Vec::new();
        let layer = load_layer(path.clone(), &mut visiting, &mut chain).await?;

        // The last entry is the configuration itself
        chain.pop();

        tracing::debug!(
            "Loaded {} (extends {} file(s)): {:?}",
            path.display(),
            chain.len(),
            layer.settings
        );

        Ok(Self {
            path,
            settings: layer.settings,
            files: layer.files.unwrap_or_default(),
        })
    }

    /// Build a configuration directly from parts
    #[must_use]
    pub fn from_parts(path: impl Into<PathBuf>, settings: CompilerSettings, files: Vec<PathBuf>) -> Self {
        Self {
            path: path.into(),
            settings,
            files,
        }
    }

    /// Path of the configuration file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Effective compiler settings
    #[inline]
    #[must_use]
    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Files listed by the configuration, as absolute paths
    #[inline]
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

fn load_layer<'a>(
    path: PathBuf,
    visiting: &'a mut Vec<PathBuf>,
    chain: &'a mut Vec<PathBuf>,
) -> LocalBoxFuture<'a, Result<Layer, ConfigError>> {
    Box::pin(async move {
        if visiting.contains(&path) {
            return Err(ConfigError::Cycle(path));
        }

        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
        let raw: RawConfig =
            serde_json::from_str(&jsonc::normalize(&text)).map_err(|source| ConfigError::Syntax {
                path: path.clone(),
                source,
            })?;
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        visiting.push(path.clone());
        let mut base = Layer::default();
        for spec in raw.extends.map(Extends::into_vec).unwrap_or_default() {
            let target = resolve_extends(&dir, &spec).ok_or_else(|| ConfigError::ExtendsNotFound {
                path: path.clone(),
                spec: spec.clone(),
            })?;
            let layer = load_layer(target, visiting, chain).await?;
            base = layer.layered_over(base);
        }
        visiting.pop();
        chain.push(path);

        let own = Layer {
            settings: raw.compiler_options.unwrap_or_default(),
            files: raw
                .files
                .map(|files| files.into_iter().map(|f| dir.join(f)).collect()),
        };
        Ok(own.layered_over(base))
    })
}

/// Resolve an `extends` specifier declared in `dir`
///
/// Relative and absolute specifiers are resolved against `dir`; anything
/// else is looked up in `node_modules` directories from `dir` upwards.
fn resolve_extends(dir: &Path, spec: &str) -> Option<PathBuf> {
    let is_path = spec.starts_with("./")
        || spec.starts_with("../")
        || spec == "."
        || spec == ".."
        || Path::new(spec).is_absolute();

    if is_path {
        return config_candidates(&dir.join(spec)).into_iter().find(|p| p.is_file());
    }

    dir.ancestors()
        .map(|ancestor| ancestor.join("node_modules").join(spec))
        .flat_map(|base| config_candidates(&base))
        .find(|p| p.is_file())
}

fn config_candidates(base: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![base.to_path_buf()];
    if base.extension().and_then(|e| e.to_str()) != Some("json") {
        let mut with_json = base.as_os_str().to_owned();
        with_json.push(".json");
        candidates.push(PathBuf::from(with_json));
    }
    candidates.push(base.join(crate::locate::CONFIG_FILE_NAME));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tsmig_artifact::JsxEmit;

    fn write(path: &Path, text: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, text).unwrap();
    }

    #[tokio::test]
    async fn loads_plain_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        write(
            &path,
            r#"{
                // editor settings
                "compilerOptions": { "jsx": "react", "newLine": "crlf", },
                "files": ["src/a.ts", "src/b.ts"],
            }"#,
        );

        let config = ProjectConfig::load(&path).await.unwrap();
        assert_eq!(config.settings().jsx, Some(JsxEmit::React));
        assert_eq!(
            config.files(),
            &[dir.path().join("src/a.ts"), dir.path().join("src/b.ts")]
        );
    }

    #[tokio::test]
    async fn follows_relative_extends_without_suffix() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("configs/base.json"),
            r#"{"compilerOptions": {"target": "es5", "module": "commonjs"}, "files": ["../shared.ts"]}"#,
        );
        let path = dir.path().join("app/tsconfig.json");
        write(
            &path,
            r#"{"extends": "../configs/base", "compilerOptions": {"target": "esnext"}}"#,
        );

        let config = ProjectConfig::load(&path).await.unwrap();
        assert_eq!(config.settings().target.as_deref(), Some("esnext"));
        assert_eq!(config.settings().module.as_deref(), Some("commonjs"));
        assert_eq!(config.files(), &[dir.path().join("app/../configs/../shared.ts")]);
    }

    #[tokio::test]
    async fn later_extends_entries_win() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("a.json"), r#"{"compilerOptions": {"target": "es5", "jsx": "preserve"}}"#);
        write(&dir.path().join("b.json"), r#"{"compilerOptions": {"target": "es2022"}}"#);
        let path = dir.path().join("tsconfig.json");
        write(&path, r#"{"extends": ["./a.json", "./b.json"]}"#);

        let config = ProjectConfig::load(&path).await.unwrap();
        assert_eq!(config.settings().target.as_deref(), Some("es2022"));
        assert_eq!(config.settings().jsx, Some(JsxEmit::Preserve));
    }

    #[tokio::test]
    async fn extends_from_node_modules() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("node_modules/@tsconfig/strictest/tsconfig.json"),
            r#"{"compilerOptions": {"allowJs": true}}"#,
        );
        let path = dir.path().join("pkg/tsconfig.json");
        write(&path, r#"{"extends": "@tsconfig/strictest"}"#);

        let config = ProjectConfig::load(&path).await.unwrap();
        assert!(config.settings().allows_js());
    }

    #[tokio::test]
    async fn missing_extends_target_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        write(&path, r#"{"extends": "./nope.json"}"#);

        let err = ProjectConfig::load(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::ExtendsNotFound { ref spec, .. } if spec == "./nope.json"));
    }

    #[tokio::test]
    async fn extends_cycle_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("a.json"), r#"{"extends": "./b.json"}"#);
        write(&dir.path().join("b.json"), r#"{"extends": "./a.json"}"#);

        let err = ProjectConfig::load(dir.path().join("a.json")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Cycle(_)));
    }

    #[tokio::test]
    async fn malformed_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        write(&path, r#"{"compilerOptions": "#);

        let err = ProjectConfig::load(&path).await.unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[tokio::test]
    async fn empty_object_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tsconfig.json");
        write(&path, "{}");

        let config = ProjectConfig::load(&path).await.unwrap();
        assert_eq!(config.settings(), &CompilerSettings::default());
        assert!(config.files().is_empty());
    }
}
