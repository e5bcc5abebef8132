use oxc_allocator::Allocator;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::context::{Context, RUNTIME_MODULE, UNTRACK_HELPER};
use crate::editor::{EditBuffer, MapSegment};
use crate::error::{PreprocessError, ERR_UPSTREAM_PARSE};
use crate::imports::ensure_helper_import;
use crate::visitor::ReactivityVisitor;

// ═══════════════════════════════════════════════════════════════════════════════
// TRANSFORM OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of one transform invocation. `map` maps rewritten offsets back to
/// original offsets; text outside the edited spans is byte-identical.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preprocessed {
    pub code: String,
    pub map: Vec<MapSegment>,
    pub filename: Option<String>,
}

/// One script for the batch entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptSource {
    pub content: String,
    #[serde(default)]
    pub filename: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Rewrites one script. The filename is only used to pick the indentation of
/// a synthesized import and to decide whether the script is embedded in a
/// component file; pass `None` for plain modules.
///
/// The pass is synchronous and owns no shared state, so concurrent
/// invocations over different files are safe.
pub fn preprocess_script(
    config: &Config,
    content: &str,
    filename: Option<&str>,
) -> Result<Preprocessed, PreprocessError> {
    config.validate()?;

    let ctx = collect(config, content, filename)?;
    let is_component_file = filename.map(|f| f.ends_with(".svelte")).unwrap_or(false);
    let (code, map) = render(content, ctx, is_component_file);

    Ok(Preprocessed {
        code,
        map,
        filename: filename.map(|f| f.to_string()),
    })
}

/// Runs `preprocess_script` over many sources in parallel. Each file gets its
/// own context; results come back in input order.
pub fn preprocess_batch(
    config: &Config,
    sources: &[ScriptSource],
) -> Vec<Result<Preprocessed, PreprocessError>> {
    use rayon::prelude::*;

    sources
        .par_iter()
        .map(|source| preprocess_script(config, &source.content, source.filename.as_deref()))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRAVERSAL + REWRITE
// ═══════════════════════════════════════════════════════════════════════════════

/// Parses the script and runs the single classification pass, yielding a
/// populated per-file context. Parse diagnostics abort the invocation and
/// are carried through unmodified.
pub(crate) fn collect(
    config: &Config,
    content: &str,
    filename: Option<&str>,
) -> Result<Context, PreprocessError> {
    let allocator = Allocator::default();
    let source_type = SourceType::default().with_module(true).with_typescript(true);
    let ret = Parser::new(&allocator, content, source_type).parse();

    if !ret.errors.is_empty() {
        let details = ret
            .errors
            .iter()
            .map(|error| format!("{:?}", error))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(PreprocessError::new(ERR_UPSTREAM_PARSE, &details, filename));
    }

    let mut ctx = Context::new(config.clone());
    let mut visitor = ReactivityVisitor { ctx: &mut ctx };
    visitor.visit_program(&ret.program);

    Ok(ctx)
}

/// Consumes the context and materializes the rewrite. All edits are computed
/// before any text is emitted, so no partially rewritten output can escape.
fn render(content: &str, ctx: Context, is_component_file: bool) -> (String, Vec<MapSegment>) {
    let Context {
        state_values,
        derived_values,
        effects,
        mut imports,
        ..
    } = ctx;

    let mut editor = EditBuffer::new();

    for value in &state_values {
        editor.wrap_state(value);
    }

    for derived in &derived_values {
        editor.wrap_derived(&derived.value);
    }

    for effect in &effects {
        editor.wrap_effect(effect);

        if !effect.untracked.is_empty() {
            ensure_helper_import(
                &mut imports,
                &mut editor,
                RUNTIME_MODULE,
                UNTRACK_HELPER,
                is_component_file,
            );

            for occurrence in &effect.untracked {
                editor.wrap_untracked(occurrence);
            }
        }
    }

    editor.materialize(content)
}
