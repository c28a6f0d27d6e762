//! Recognized source kinds
//!
//! The pipeline accepts exactly four extensions. Everything else is rejected
//! before any filesystem access happens.

use std::path::Path;

/// Source file kind, derived from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// `.ts`
    TypeScript,
    /// `.tsx`
    Tsx,
    /// `.js`
    JavaScript,
    /// `.jsx`
    Jsx,
}

impl SourceKind {
    /// Every recognized kind
    pub const ALL: [SourceKind; 4] = [
        SourceKind::TypeScript,
        SourceKind::Tsx,
        SourceKind::JavaScript,
        SourceKind::Jsx,
    ];

    /// File extension for this kind (without dot)
    #[inline]
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            SourceKind::TypeScript => "ts",
            SourceKind::Tsx => "tsx",
            SourceKind::JavaScript => "js",
            SourceKind::Jsx => "jsx",
        }
    }

    /// Detect kind from file extension
    ///
    /// Matching is exact: `.TS` or `.d.ts.map` are not recognized.
    #[inline]
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.') {
            "ts" => Some(SourceKind::TypeScript),
            "tsx" => Some(SourceKind::Tsx),
            "js" => Some(SourceKind::JavaScript),
            "jsx" => Some(SourceKind::Jsx),
            _ => None,
        }
    }

    /// Detect kind from a path's extension
    #[inline]
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether this kind is a JavaScript dialect
    #[inline]
    #[must_use]
    pub fn is_javascript(self) -> bool {
        matches!(self, SourceKind::JavaScript | SourceKind::Jsx)
    }

    /// Select the tree-sitter grammar for this kind
    ///
    /// Only `.ts` forbids JSX (its `<T>expr` casts clash with markup). Both
    /// JavaScript kinds always admit JSX, whatever `compilerOptions.jsx` says.
    #[must_use]
    pub fn grammar(self) -> tree_sitter::Language {
        match self {
            SourceKind::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceKind::Tsx | SourceKind::JavaScript | SourceKind::Jsx => {
                tree_sitter_typescript::LANGUAGE_TSX.into()
            }
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceKind::TypeScript => "TypeScript",
            SourceKind::Tsx => "TSX",
            SourceKind::JavaScript => "JavaScript",
            SourceKind::Jsx => "JSX",
        };
        write!(f, "{name}")
    }
}
