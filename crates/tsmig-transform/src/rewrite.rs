//! Rule-driven rewriting
//!
//! Planning walks the tree once for module specifiers and import specifiers,
//! then once more for references to renamed bindings. Every planned edit is
//! a byte range of the current text, so all of them are applied in a single
//! [`SourceFile::apply_edits`] call.

use crate::rules::RuleSet;
use crate::transform::{MigrationOptions, Transform, TransformError};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::ops::Range;
use tsmig_artifact::{Node, SourceFile, SourceTree, TextEdit};

impl Transform for RuleSet {
    fn name(&self) -> &str {
        RuleSet::name(self)
    }

    fn transform(
        &self,
        file: &mut SourceFile,
        options: &MigrationOptions,
    ) -> Result<(), TransformError> {
        let edits = plan_edits(self, file.tree(), options);
        if edits.is_empty() {
            tracing::debug!("{}: no rules matched", file.path().display());
            return Ok(());
        }
        let applied = file.apply_edits(edits)?;
        tracing::debug!("{}: applied {applied} edits", file.path().display());
        Ok(())
    }
}

/// Edits that `rules` make to `tree`, in source order
#[must_use]
pub fn plan_edits(rules: &RuleSet, tree: &SourceTree, options: &MigrationOptions) -> Vec<TextEdit> {
    // Keyed by range so that the same edit planned twice is applied once
    let mut edits: BTreeMap<(usize, usize), String> = BTreeMap::new();
    let mut insert = |range: Range<usize>, replacement: String| {
        edits.insert((range.start, range.end), replacement);
    };

    if options.migrate_imports {
        for specifier in tree.module_specifiers() {
            if let Some(value) = rules.rewrite_specifier(&specifier.value) {
                insert(specifier.range, value);
            }
        }
    }

    // Unaliased imports rename the local binding, so every reference follows
    let mut bindings: HashMap<String, String> = HashMap::new();
    let mut renamed_imports: HashSet<usize> = HashSet::new();
    tree.walk(|node| {
        if node.kind() != "import_specifier" {
            return;
        }
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let Some(module) = import_source(tree, node) else {
            return;
        };
        let Some(rule) = rules.rename_for(module, tree.node_text(name)) else {
            return;
        };
        renamed_imports.insert(name.start_byte());
        if node.child_by_field_name("alias").is_some() {
            insert(name.byte_range(), rule.to.clone());
        } else {
            bindings.insert(rule.from.clone(), rule.to.clone());
        }
    });

    if !bindings.is_empty() {
        tree.walk(|node| {
            if let Some((range, replacement)) =
                reference_edit(tree, node, &bindings, &renamed_imports)
            {
                insert(range, replacement);
            }
        });
    }

    edits
        .into_iter()
        .map(|((start, end), replacement)| TextEdit::replace(start..end, replacement))
        .collect()
}

/// Edit for one reference to a renamed binding
fn reference_edit(
    tree: &SourceTree,
    node: Node<'_>,
    bindings: &HashMap<String, String>,
    renamed_imports: &HashSet<usize>,
) -> Option<(Range<usize>, String)> {
    let text = tree.node_text(node);
    let to = bindings.get(text)?;
    let parent = node.parent()?;

    match node.kind() {
        "identifier" | "type_identifier" => match parent.kind() {
            // Imports of the same name from unrelated modules stay
            "import_specifier" => renamed_imports
                .contains(&node.start_byte())
                .then(|| (node.byte_range(), to.clone())),
            "export_specifier" => export_edit(tree, node, parent, to),
            _ => Some((node.byte_range(), to.clone())),
        },
        // `{ fade }` keeps its key and points at the new binding
        "shorthand_property_identifier" => Some((node.byte_range(), format!("{text}: {to}"))),
        _ => None,
    }
}

/// `export { fade }` keeps its exported name; re-exports are left alone
fn export_edit(
    tree: &SourceTree,
    node: Node<'_>,
    specifier: Node<'_>,
    to: &str,
) -> Option<(Range<usize>, String)> {
    let statement = ancestor(specifier, "export_statement")?;
    if statement.child_by_field_name("source").is_some() {
        return None;
    }
    if specifier.child_by_field_name("name")?.id() != node.id() {
        return None;
    }
    if specifier.child_by_field_name("alias").is_some() {
        Some((node.byte_range(), to.to_string()))
    } else {
        let text = tree.node_text(node);
        Some((node.byte_range(), format!("{to} as {text}")))
    }
}

/// Module specifier of the import statement enclosing `node`
fn import_source<'t>(tree: &'t SourceTree, node: Node<'_>) -> Option<&'t str> {
    let statement = ancestor(node, "import_statement")?;
    let source = statement.child_by_field_name("source")?;
    let quoted = tree.node_text(source);
    quoted.get(1..quoted.len().checked_sub(1)?)
}

fn ancestor<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut current = node.parent();
    while let Some(candidate) = current {
        if candidate.kind() == kind {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}
