//! # Sigil Preprocessor
//!
//! Rewrites embedded script code so that reactive state, derived values, and
//! side-effect blocks can be declared through naming conventions instead of
//! explicit rune calls:
//!
//! ```js
//! let s$count = 1;
//! let d$double = s$count * 2;
//!
//! e$: {
//!   console.log(s$count, d$double);
//! }
//! ```
//!
//! becomes
//!
//! ```js
//! let s$count = $state(1);
//! let d$double = $derived(s$count * 2);
//!
//! $effect(() => {
//!   console.log(s$count, d$double);
//! })
//! ```
//!
//! ## Rewrite Invariants
//!
//! 1. **Single pass**: one traversal of the immutable parse tree populates a
//!    per-file context; all edits are computed before any text is emitted.
//! 2. **Non-destructive**: edits are offset-addressed against the original
//!    buffer; formatting outside rewritten spans is byte-identical.
//! 3. **Idempotent**: declarations already initialized with a rune call are
//!    classified as ignored, so re-running the transform is a no-op.
//! 4. **Deterministic ordering**: edits materialize sorted by
//!    `(offset, anchor, insertion-seq)`, so multiple insertions anchored at
//!    one offset compose deterministically.
//! 5. **Fatal errors precede traversal**: the only fatal conditions are
//!    configuration errors (prefix collision, malformed prefix) and upstream
//!    parse failures; both abort before any output exists. Unrecognized
//!    shapes are skipped silently.

mod classify;
mod config;
mod context;
mod editor;
mod effects;
mod error;
mod imports;
mod occurrences;
mod preprocess;
mod visitor;

pub use config::{ClassificationPolicy, Config, Prefixes};
pub use context::{
    BlockKind, Context, DerivedValue, Effect, EffectBlock, ReactiveValue, DERIVED_RUNE,
    EFFECT_RUNE, RUNTIME_MODULE, STATE_RUNE, UNTRACK_HELPER,
};
pub use editor::{EditBuffer, MapSegment};
pub use error::{
    PreprocessError, ERR_PREFIX_COLLISION, ERR_PREFIX_SHAPE, ERR_UPSTREAM_PARSE,
};
pub use imports::{ImportRecord, NamedImport};
pub use preprocess::{preprocess_batch, preprocess_script, Preprocessed, ScriptSource};
