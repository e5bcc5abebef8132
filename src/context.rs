use oxc_span::Span;

use crate::config::Config;
use crate::imports::ImportRecord;

// ═══════════════════════════════════════════════════════════════════════════════
// RUNTIME RUNE NAMES
// ═══════════════════════════════════════════════════════════════════════════════

/// Module the untrack helper is imported from.
pub const RUNTIME_MODULE: &str = "svelte";

/// The host runtime's reactivity primitives. The preprocessor only needs
/// their names and call shape, never their implementation.
pub const STATE_RUNE: &str = "$state";
pub const DERIVED_RUNE: &str = "$derived";
pub const EFFECT_RUNE: &str = "$effect";
pub const UNTRACK_HELPER: &str = "untrack";

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFICATION RECORDS
// ═══════════════════════════════════════════════════════════════════════════════

/// One declaration site of a reactive value.
///
/// `span` is the text span to wrap. A zero-width span (declaration without
/// initializer) means the wrap must also supply the `=` token.
#[derive(Debug, Clone)]
pub struct ReactiveValue {
    pub name: String,
    pub span: Span,
}

/// A reactive value computed from an expression.
///
/// `dependencies` lists the prefixed identifiers the initializer reads, in
/// first-occurrence order. The canonical rewrite does not consume it; it
/// exists for inference and host-side documentation.
#[derive(Debug, Clone)]
pub struct DerivedValue {
    pub value: ReactiveValue,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `e$: { ... }`
    Scope,
    /// `e$: () => { ... }`
    Arrow,
}

#[derive(Debug, Clone)]
pub struct EffectBlock {
    pub kind: BlockKind,
    pub span: Span,
}

/// A labeled statement recognized as an effect.
///
/// `untracked` holds one entry per *occurrence* of a reference excluded from
/// dependency tracking, not one per distinct name.
#[derive(Debug, Clone)]
pub struct Effect {
    pub span: Span,
    pub block: EffectBlock,
    pub untracked: Vec<ReactiveValue>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// PER-FILE CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// Per-file aggregate populated during traversal and read once during
/// rewriting. Created fresh per invocation; never shared across files.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub state_values: Vec<ReactiveValue>,
    pub derived_values: Vec<DerivedValue>,
    pub effects: Vec<Effect>,
    pub imports: ImportRecord,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Context {
            config,
            state_values: Vec::new(),
            derived_values: Vec::new(),
            effects: Vec::new(),
            imports: ImportRecord::default(),
        }
    }

    /// Whether `name` has already been registered as a state or derived value.
    pub fn is_known_reactive(&self, name: &str) -> bool {
        self.state_values.iter().any(|v| v.name == name)
            || self.derived_values.iter().any(|d| d.value.name == name)
    }
}
