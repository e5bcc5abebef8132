use oxc_ast::ast::{ImportDeclaration, ImportDeclarationSpecifier, ModuleExportName};
use oxc_span::Span;

use crate::context::{Context, RUNTIME_MODULE};
use crate::editor::EditBuffer;

// ═══════════════════════════════════════════════════════════════════════════════
// IMPORT RECORD
// ═══════════════════════════════════════════════════════════════════════════════

/// A named specifier already imported from the runtime module.
#[derive(Debug, Clone)]
pub struct NamedImport {
    /// The imported (not local) name: `untrack` in `import { untrack as u }`.
    pub imported: String,
    pub span: Span,
}

/// Snapshot of the specifiers the file already imports from the runtime
/// module, taken during traversal. `injected` makes repeated injector calls
/// across multiple effects idempotent without re-reading the edit buffer.
#[derive(Debug, Clone, Default)]
pub struct ImportRecord {
    pub default: Option<Span>,
    pub named: Vec<NamedImport>,
    pub injected: bool,
}

/// Records the specifiers of an import declaration when its source is the
/// runtime module. Declarations for other modules are ignored.
pub fn record_import(decl: &ImportDeclaration<'_>, ctx: &mut Context) {
    if decl.source.value != RUNTIME_MODULE {
        return;
    }

    let Some(specifiers) = &decl.specifiers else {
        return;
    };

    for specifier in specifiers {
        match specifier {
            ImportDeclarationSpecifier::ImportSpecifier(named) => {
                let imported = match &named.imported {
                    ModuleExportName::IdentifierName(id) => id.name.to_string(),
                    ModuleExportName::StringLiteral(s) => s.value.to_string(),
                    _ => continue,
                };
                ctx.imports.named.push(NamedImport {
                    imported,
                    span: named.span,
                });
            }
            ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                ctx.imports.default = Some(default.local.span);
            }
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(_) => {}
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// INJECTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Ensures `helper` is importable from `module`, merging into an existing
/// import statement when one exists and synthesizing a new one otherwise.
///
/// Invoked once per effect that carries untracked references, before its
/// first untracked wrap is scheduled; the record keeps it a no-op from the
/// second invocation on.
pub fn ensure_helper_import(
    record: &mut ImportRecord,
    editor: &mut EditBuffer,
    module: &str,
    helper: &str,
    is_component_file: bool,
) {
    if record.injected {
        return;
    }
    record.injected = true;

    if record.named.iter().any(|named| named.imported == helper) {
        return;
    }

    if let Some(last) = record.named.last() {
        editor.insert_right(last.span.end, format!(", {}", helper));
    } else if let Some(default) = record.default {
        editor.insert_right(default.end, format!(", {{ {} }}", helper));
    } else {
        // Scripts embedded in markup sit one tab deep inside their tag.
        let tab = if is_component_file { "\t" } else { "" };
        editor.insert_left(
            0,
            format!("\r\n{}import {{ {} }} from \"{}\";\r\n", tab, helper, module),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::UNTRACK_HELPER;

    fn named(imported: &str, start: u32, end: u32) -> NamedImport {
        NamedImport {
            imported: imported.to_string(),
            span: Span::new(start, end),
        }
    }

    #[test]
    fn test_merges_after_last_named_specifier() {
        //            0         1         2         3
        //            0123456789012345678901234567890123456
        let source = "import { getContext } from \"svelte\";";
        let mut record = ImportRecord {
            named: vec![named("getContext", 9, 19)],
            ..ImportRecord::default()
        };
        let mut editor = EditBuffer::new();
        ensure_helper_import(&mut record, &mut editor, RUNTIME_MODULE, UNTRACK_HELPER, false);
        let (code, _) = editor.materialize(source);
        assert_eq!(code, "import { getContext, untrack } from \"svelte\";");
    }

    #[test]
    fn test_merges_after_default_specifier() {
        //            0         1         2
        //            01234567890123456789012345
        let source = "import svelte from \"svelte\";";
        let mut record = ImportRecord {
            default: Some(Span::new(7, 13)),
            ..ImportRecord::default()
        };
        let mut editor = EditBuffer::new();
        ensure_helper_import(&mut record, &mut editor, RUNTIME_MODULE, UNTRACK_HELPER, false);
        let (code, _) = editor.materialize(source);
        assert_eq!(code, "import svelte, { untrack } from \"svelte\";");
    }

    #[test]
    fn test_synthesizes_import_with_component_indentation() {
        let source = "let s$x = 1;";
        let mut record = ImportRecord::default();
        let mut editor = EditBuffer::new();
        ensure_helper_import(&mut record, &mut editor, RUNTIME_MODULE, UNTRACK_HELPER, true);
        let (code, _) = editor.materialize(source);
        assert_eq!(
            code,
            "\r\n\timport { untrack } from \"svelte\";\r\nlet s$x = 1;"
        );
    }

    #[test]
    fn test_noop_when_helper_already_imported() {
        let mut record = ImportRecord {
            named: vec![named("untrack", 9, 16)],
            ..ImportRecord::default()
        };
        let mut editor = EditBuffer::new();
        ensure_helper_import(&mut record, &mut editor, RUNTIME_MODULE, UNTRACK_HELPER, false);
        let (code, _) = editor.materialize("import { untrack } from \"svelte\";");
        assert_eq!(code, "import { untrack } from \"svelte\";");
    }

    #[test]
    fn test_second_invocation_is_idempotent() {
        let source = "let s$x = 1;";
        let mut record = ImportRecord::default();
        let mut editor = EditBuffer::new();
        ensure_helper_import(&mut record, &mut editor, RUNTIME_MODULE, UNTRACK_HELPER, false);
        ensure_helper_import(&mut record, &mut editor, RUNTIME_MODULE, UNTRACK_HELPER, false);
        let (code, _) = editor.materialize(source);
        let occurrences = code.matches("import { untrack }").count();
        assert_eq!(occurrences, 1);
    }
}
