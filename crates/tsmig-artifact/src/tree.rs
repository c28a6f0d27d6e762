//! Syntax trees backed by tree-sitter
//!
//! [`SourceTree`] owns the source text together with its parsed tree. The
//! text is the printer: untouched regions are emitted byte for byte, and
//! mutations go through [`SourceTree::apply_edits`], which patches the text
//! and reparses incrementally.

use crate::error::{EditError, SyntaxErrorSite, TreeError};
use crate::kind::SourceKind;
use std::ops::Range;
use tree_sitter::{InputEdit, Node, Parser, Point, Tree};

/// Longest snippet quoted in a syntax error
const SNIPPET_LIMIT: usize = 40;

/// Replacement of a byte range of the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte range being replaced
    pub range: Range<usize>,
    /// New text for the range
    pub replacement: String,
}

impl TextEdit {
    /// Replace `range` with `replacement`
    #[inline]
    #[must_use]
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}

/// Module specifier of an `import ... from` or `export ... from` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpecifier {
    /// Specifier text without quotes
    pub value: String,
    /// Byte range of the text between the quotes
    pub range: Range<usize>,
}

/// Parsed source text
#[derive(Clone)]
pub struct SourceTree {
    kind: SourceKind,
    language: tree_sitter::Language,
    text: String,
    tree: Tree,
}

impl std::fmt::Debug for SourceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceTree")
            .field("kind", &self.kind)
            .field("len", &self.text.len())
            .field("has_error", &self.tree.root_node().has_error())
            .finish()
    }
}

impl SourceTree {
    /// Parse `text` with the grammar selected by `kind`
    ///
    /// A tree is returned even when the text contains syntax errors; use
    /// [`SourceTree::syntax_error`] to check.
    ///
    /// # Errors
    /// Returns error if the grammar cannot be loaded or no tree is produced
    pub fn parse(text: impl Into<String>, kind: SourceKind) -> Result<Self, TreeError> {
        let text = text.into();
        let language = kind.grammar();
        let tree = run_parser(&language, &text, None)?;
        Ok(Self {
            kind,
            language,
            text,
            tree,
        })
    }

    /// Source kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Current source text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text covered by `node`
    #[inline]
    #[must_use]
    pub fn node_text(&self, node: Node<'_>) -> &str {
        self.text.get(node.byte_range()).unwrap_or_default()
    }

    /// Visit every node in pre-order
    pub fn walk<'t>(&'t self, mut visit: impl FnMut(Node<'t>)) {
        let mut cursor = self.tree.walk();
        loop {
            visit(cursor.node());
            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return;
                }
            }
        }
    }

    /// First syntax error in the tree, if any
    #[must_use]
    pub fn syntax_error(&self) -> Option<SyntaxErrorSite> {
        let root = self.tree.root_node();
        if !root.has_error() {
            return None;
        }

        let node = first_error_node(root).unwrap_or(root);
        let position = node.start_position();
        let detail = if node.is_missing() {
            format!("missing `{}`", node.kind())
        } else {
            let snippet: String = self
                .node_text(node)
                .lines()
                .next()
                .unwrap_or_default()
                .chars()
                .take(SNIPPET_LIMIT)
                .collect();
            if snippet.is_empty() {
                "unexpected end of input".to_string()
            } else {
                format!("unexpected `{snippet}`")
            }
        };

        Some(SyntaxErrorSite {
            line: position.row + 1,
            column: position.column + 1,
            detail,
        })
    }

    /// Module specifiers of all import/export declarations, in source order
    #[must_use]
    pub fn module_specifiers(&self) -> Vec<ModuleSpecifier> {
        let mut specifiers = Vec::new();
        self.walk(|node| {
            if !matches!(node.kind(), "import_statement" | "export_statement") {
                return;
            }
            let Some(source) = node.child_by_field_name("source") else {
                return;
            };
            let outer = source.byte_range();
            if source.kind() != "string" || outer.len() < 2 {
                return;
            }
            let range = outer.start + 1..outer.end - 1;
            if let Some(value) = self.text.get(range.clone()) {
                specifiers.push(ModuleSpecifier {
                    value: value.to_string(),
                    range,
                });
            }
        });
        specifiers
    }

    /// Apply non-overlapping edits and reparse
    ///
    /// Edits may be given in any order; all ranges refer to the current
    /// text. On error the tree is left unchanged.
    ///
    /// # Returns
    /// Number of edits applied
    ///
    /// # Errors
    /// - `EditError::InvalidRange` if a range is out of bounds or splits a character
    /// - `EditError::Overlap` if two edits touch the same bytes
    /// - `EditError::Reparse` if the patched text cannot be reparsed
    pub fn apply_edits(&mut self, mut edits: Vec<TextEdit>) -> Result<usize, EditError> {
        if edits.is_empty() {
            return Ok(0);
        }
        edits.sort_by_key(|e| (e.range.start, e.range.end));

        let mut previous_end = 0;
        for edit in &edits {
            let Range { start, end } = edit.range;
            if start > end
                || end > self.text.len()
                || !self.text.is_char_boundary(start)
                || !self.text.is_char_boundary(end)
            {
                return Err(EditError::InvalidRange {
                    start,
                    end,
                    len: self.text.len(),
                });
            }
            if start < previous_end {
                return Err(EditError::Overlap(start));
            }
            previous_end = end;
        }

        let mut text = self.text.clone();
        let mut tree = self.tree.clone();
        for edit in edits.iter().rev() {
            let start_position = point_at(&text, edit.range.start);
            let old_end_position = point_at(&text, edit.range.end);
            text.replace_range(edit.range.clone(), &edit.replacement);
            let new_end_byte = edit.range.start + edit.replacement.len();
            tree.edit(&InputEdit {
                start_byte: edit.range.start,
                old_end_byte: edit.range.end,
                new_end_byte,
                start_position,
                old_end_position,
                new_end_position: point_at(&text, new_end_byte),
            });
        }

        self.tree = run_parser(&self.language, &text, Some(&tree))?;
        self.text = text;
        Ok(edits.len())
    }
}

fn run_parser(
    language: &tree_sitter::Language,
    text: &str,
    old_tree: Option<&Tree>,
) -> Result<Tree, TreeError> {
    let mut parser = Parser::new();
    parser
        .set_language(language)
        .map_err(|e| TreeError::ParserInit(e.to_string()))?;
    parser.parse(text, old_tree).ok_or(TreeError::NoTree)
}

/// Depth-first search restricted to subtrees that contain errors
fn first_error_node(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

fn point_at(text: &str, byte: usize) -> Point {
    let prefix = &text.as_bytes()[..byte];
    let row = prefix.iter().filter(|&&b| b == b'\n').count();
    let column = prefix
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(byte, |newline| byte - newline - 1);
    Point { row, column }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_ts(text: &str) -> SourceTree {
        SourceTree::parse(text, SourceKind::TypeScript).unwrap()
    }

    #[test]
    fn clean_source_has_no_syntax_error() {
        let tree = parse_ts("import { a } from './a';\nexport const b: number = a + 1;\n");
        assert_eq!(tree.syntax_error(), None);
    }

    #[test]
    fn syntax_error_reports_one_based_line() {
        let tree = parse_ts("const ok = 1;\nconst = ;\n");
        let site = tree.syntax_error().expect("syntax error expected");
        assert_eq!(site.line, 2);
        assert!(site.column >= 1);
    }

    #[test]
    fn type_assertions_parse_as_typescript() {
        let tree = parse_ts("declare const y: unknown;\nconst x = <number>y;\n");
        assert_eq!(tree.syntax_error(), None);
    }

    #[test]
    fn jsx_parses_in_jsx_files() {
        let tree = SourceTree::parse(
            "export const el = <div className=\"a\">hi</div>;\n",
            SourceKind::Jsx,
        )
        .unwrap();
        assert_eq!(tree.syntax_error(), None);
    }

    #[test]
    fn jsx_parses_in_plain_js_files() {
        let tree = SourceTree::parse(
            "export const App = () => <div>hi</div>;\n",
            SourceKind::JavaScript,
        )
        .unwrap();
        assert_eq!(tree.syntax_error(), None);
    }

    #[test]
    fn jsx_is_a_syntax_error_in_ts_files() {
        let tree = parse_ts("export const App = () => <div>hi</div>;\n");
        assert!(tree.syntax_error().is_some());
    }

    #[test]
    fn module_specifiers_cover_imports_and_reexports() {
        let tree = parse_ts(
            "import a from 'alpha';\nimport { b } from \"beta/sub\";\nexport { c } from './gamma';\nexport const d = 1;\n",
        );
        let values: Vec<_> = tree
            .module_specifiers()
            .into_iter()
            .map(|s| s.value)
            .collect();
        assert_eq!(values, vec!["alpha", "beta/sub", "./gamma"]);
    }

    #[test]
    fn module_specifier_range_excludes_quotes() {
        let text = "import x from 'pkg';\n";
        let tree = parse_ts(text);
        let spec = &tree.module_specifiers()[0];
        assert_eq!(&text[spec.range.clone()], "pkg");
    }

    #[test]
    fn apply_edits_patches_text_and_reparses() {
        let text = "import { fade } from 'old';\nfade(1);\n";
        let mut tree = parse_ts(text);
        let spec = tree.module_specifiers()[0].range.clone();
        let call = text.rfind("fade").unwrap();

        let applied = tree
            .apply_edits(vec![
                TextEdit::replace(call..call + 4, "alpha"),
                TextEdit::replace(spec, "new"),
            ])
            .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(tree.text(), "import { fade } from 'new';\nalpha(1);\n");
        assert_eq!(tree.syntax_error(), None);
        assert_eq!(tree.module_specifiers()[0].value, "new");
    }

    #[test]
    fn apply_edits_across_lines() {
        let mut tree = parse_ts("const a = 1;\nconst b = 2;\n");
        tree.apply_edits(vec![TextEdit::replace(0..12, "const a = [\n  1,\n];")])
            .unwrap();
        assert_eq!(tree.text(), "const a = [\n  1,\n];\nconst b = 2;\n");
        assert_eq!(tree.syntax_error(), None);
    }

    #[test]
    fn overlapping_edits_are_rejected_without_mutation() {
        let mut tree = parse_ts("const abc = 1;\n");
        let result = tree.apply_edits(vec![
            TextEdit::replace(6..9, "x"),
            TextEdit::replace(8..10, "y"),
        ]);
        assert!(matches!(result, Err(EditError::Overlap(8))));
        assert_eq!(tree.text(), "const abc = 1;\n");
    }

    #[test]
    fn out_of_bounds_edit_is_rejected() {
        let mut tree = parse_ts("let a;\n");
        let result = tree.apply_edits(vec![TextEdit::replace(3..100, "")]);
        assert!(matches!(result, Err(EditError::InvalidRange { .. })));
    }

    #[test]
    fn edit_that_breaks_syntax_is_visible() {
        let mut tree = parse_ts("let a = 1;\n");
        tree.apply_edits(vec![TextEdit::replace(8..9, "")]).unwrap();
        assert!(tree.syntax_error().is_some());
    }

    #[test]
    fn empty_edit_list_is_a_no_op() {
        let mut tree = parse_ts("let a = 1;\n");
        assert_eq!(tree.apply_edits(Vec::new()).unwrap(), 0);
        assert_eq!(tree.text(), "let a = 1;\n");
    }

    #[test]
    fn point_at_counts_rows_and_columns() {
        let text = "ab\ncd\nef";
        assert_eq!(point_at(text, 0), Point { row: 0, column: 0 });
        assert_eq!(point_at(text, 4), Point { row: 1, column: 1 });
        assert_eq!(point_at(text, 8), Point { row: 2, column: 2 });
    }
}
