//! Compiler settings a project is loaded with
//!
//! Deserialized straight out of a `tsconfig.json` `compilerOptions` block.
//! Options that do not affect a single-file rewrite are ignored.

use serde::{Deserialize, Serialize};

/// `compilerOptions.jsx`
///
/// Matched case-insensitively, with or without hyphens, so `React-JSX`,
/// `ReactJSX` and `react-jsx` all name [`JsxEmit::ReactJsx`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum JsxEmit {
    /// `preserve`
    Preserve,
    /// `react`
    React,
    /// `react-jsx`
    ReactJsx,
    /// `react-jsxdev`
    ReactJsxdev,
    /// `react-native`
    ReactNative,
}

impl TryFrom<String> for JsxEmit {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let folded: String = value
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "preserve" => Ok(Self::Preserve),
            "react" => Ok(Self::React),
            "reactjsx" => Ok(Self::ReactJsx),
            "reactjsxdev" => Ok(Self::ReactJsxdev),
            "reactnative" => Ok(Self::ReactNative),
            _ => Err(format!(
                "unknown jsx mode `{value}`, expected one of preserve, react, react-jsx, react-jsxdev, react-native"
            )),
        }
    }
}

/// Effective compiler settings for one project
///
/// Every field is optional so that settings from an `extends` chain can be
/// layered with [`CompilerSettings::layered_over`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerSettings {
    /// JSX emit mode; parsing admits JSX in `.js` files regardless
    pub jsx: Option<JsxEmit>,
    /// Whether JavaScript files take part in the program
    pub allow_js: Option<bool>,
    /// Language level (`es2020`, `esnext`, ...)
    pub target: Option<String>,
    /// Module system (`commonjs`, `esnext`, ...)
    pub module: Option<String>,
}

impl CompilerSettings {
    /// Layer `self` over `base`: every option set here wins
    #[must_use]
    pub fn layered_over(self, base: CompilerSettings) -> Self {
        Self {
            jsx: self.jsx.or(base.jsx),
            allow_js: self.allow_js.or(base.allow_js),
            target: self.target.or(base.target),
            module: self.module.or(base.module),
        }
    }

    /// Whether `.js`/`.jsx` files are part of the program
    #[inline]
    #[must_use]
    pub fn allows_js(&self) -> bool {
        self.allow_js.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_compiler_options() {
        let settings: CompilerSettings = serde_json::from_str(
            r#"{
                "jsx": "react-jsx",
                "allowJs": true,
                "target": "es2020",
                "newLine": "crlf",
                "strict": true
            }"#,
        )
        .unwrap();

        assert_eq!(settings.jsx, Some(JsxEmit::ReactJsx));
        assert!(settings.allows_js());
        assert_eq!(settings.target.as_deref(), Some("es2020"));
        assert_eq!(settings.module, None);
    }

    #[test]
    fn empty_object_is_default() {
        let settings: CompilerSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, CompilerSettings::default());
        assert!(!settings.allows_js());
    }

    #[test]
    fn layering_prefers_child() {
        let base = CompilerSettings {
            jsx: Some(JsxEmit::React),
            target: Some("es5".into()),
            module: Some("commonjs".into()),
            ..CompilerSettings::default()
        };
        let child = CompilerSettings {
            target: Some("esnext".into()),
            ..CompilerSettings::default()
        };

        let merged = child.layered_over(base);
        assert_eq!(merged.jsx, Some(JsxEmit::React));
        assert_eq!(merged.target.as_deref(), Some("esnext"));
        assert_eq!(merged.module.as_deref(), Some("commonjs"));
    }

    #[test]
    fn rejects_unknown_jsx_mode() {
        let result: Result<CompilerSettings, _> = serde_json::from_str(r#"{"jsx": "vue"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn jsx_mode_ignores_case_and_hyphens() {
        for (raw, expected) in [
            ("React-JSX", JsxEmit::ReactJsx),
            ("ReactJSX", JsxEmit::ReactJsx),
            ("react-jsxdev", JsxEmit::ReactJsxdev),
            ("PRESERVE", JsxEmit::Preserve),
            ("ReactNative", JsxEmit::ReactNative),
            ("React", JsxEmit::React),
        ] {
            let settings: CompilerSettings =
                serde_json::from_str(&format!(r#"{{"jsx": "{raw}"}}"#)).unwrap();
            assert_eq!(settings.jsx, Some(expected), "{raw}");
        }
    }

    #[test]
    fn jsx_mode_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&JsxEmit::ReactJsxdev).unwrap(), r#""react-jsxdev""#);
    }
}
