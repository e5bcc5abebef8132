use serde::{Deserialize, Serialize};

use crate::context::{
    BlockKind, Effect, ReactiveValue, DERIVED_RUNE, EFFECT_RUNE, STATE_RUNE, UNTRACK_HELPER,
};

// ═══════════════════════════════════════════════════════════════════════════════
// EDIT RECORDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Anchor order at one offset: left-anchored insertions, then right-anchored
/// insertions, then the (possibly replaced) original content starting there.
/// The total order `(offset, anchor, seq)` makes multiple insertions at the
/// same offset deterministic and composable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Anchor {
    Left,
    Right,
    Content,
}

#[derive(Debug, Clone)]
struct Edit {
    offset: u32,
    anchor: Anchor,
    seq: u32,
    /// End of the replaced span; equals `offset` for pure insertions.
    end: u32,
    text: String,
}

/// One run of original text copied verbatim into the rewritten buffer.
/// Inserted text has no segment; everything outside edits maps one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSegment {
    pub generated: u32,
    pub original: u32,
    pub length: u32,
}

// ═══════════════════════════════════════════════════════════════════════════════
// EDIT BUFFER
// ═══════════════════════════════════════════════════════════════════════════════

/// Accumulates position-indexed edits against the original buffer and
/// materializes them in one linear pass. Offsets always address the original
/// text, never the partially rewritten one.
#[derive(Debug, Default)]
pub struct EditBuffer {
    edits: Vec<Edit>,
}

impl EditBuffer {
    pub fn new() -> Self {
        EditBuffer::default()
    }

    /// Insert `text` at `offset`, anchored to the content ending there.
    pub fn insert_left(&mut self, offset: u32, text: impl Into<String>) {
        self.push(offset, Anchor::Left, offset, text.into());
    }

    /// Insert `text` at `offset`, anchored to the content starting there.
    pub fn insert_right(&mut self, offset: u32, text: impl Into<String>) {
        self.push(offset, Anchor::Right, offset, text.into());
    }

    /// Replace the original span `[start, end)` with `text`.
    pub fn replace(&mut self, start: u32, end: u32, text: impl Into<String>) {
        self.push(start, Anchor::Content, end, text.into());
    }

    fn push(&mut self, offset: u32, anchor: Anchor, end: u32, text: String) {
        let seq = self.edits.len() as u32;
        self.edits.push(Edit {
            offset,
            anchor,
            seq,
            end,
            text,
        });
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Domain wraps
    // ───────────────────────────────────────────────────────────────────────────

    /// `let s$count = 1` → `let s$count = $state(1)`, and for the zero-width
    /// span of `let s$count` the wrap supplies the `=` too: `= $state()`.
    pub fn wrap_state(&mut self, value: &ReactiveValue) {
        let equal = if value.span.start == value.span.end {
            " = "
        } else {
            ""
        };
        self.insert_left(value.span.start, format!("{}{}(", equal, STATE_RUNE));
        self.insert_right(value.span.end, ")");
    }

    /// `let d$double = s$count * 2` → `let d$double = $derived(s$count * 2)`.
    pub fn wrap_derived(&mut self, value: &ReactiveValue) {
        self.insert_left(value.span.start, format!("{}(", DERIVED_RUNE));
        self.insert_right(value.span.end, ")");
    }

    /// Replaces the label prefix (`e$: ` and, for sequences, the untracked
    /// markers) with the effect call. A scope block gains an arrow of its own.
    pub fn wrap_effect(&mut self, effect: &Effect) {
        let opener = match effect.block.kind {
            BlockKind::Arrow => format!("{}(", EFFECT_RUNE),
            BlockKind::Scope => format!("{}(() => ", EFFECT_RUNE),
        };
        self.replace(effect.span.start, effect.block.span.start, opener);
        self.insert_right(effect.block.span.end, ")");
    }

    /// Applied independently to every recorded occurrence, repeats included.
    pub fn wrap_untracked(&mut self, occurrence: &ReactiveValue) {
        self.insert_left(occurrence.span.start, format!("{}(() => ", UNTRACK_HELPER));
        self.insert_right(occurrence.span.end, ")");
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Materialization
    // ───────────────────────────────────────────────────────────────────────────

    /// Emits the rewritten buffer and its position map in one linear pass over
    /// the original text. Declaration spans never overlap and untracked spans
    /// sit strictly inside their effect block, so the ordering rule alone is
    /// enough; there is no conflict resolution.
    pub fn materialize(mut self, source: &str) -> (String, Vec<MapSegment>) {
        self.edits
            .sort_by_key(|edit| (edit.offset, edit.anchor, edit.seq));

        let mut code = String::with_capacity(source.len());
        let mut map = Vec::new();
        let mut cursor: u32 = 0;

        let mut copy = |code: &mut String, map: &mut Vec<MapSegment>, from: u32, to: u32| {
            if to > from {
                map.push(MapSegment {
                    generated: code.len() as u32,
                    original: from,
                    length: to - from,
                });
                code.push_str(&source[from as usize..to as usize]);
            }
        };

        for edit in &self.edits {
            debug_assert!(edit.offset >= cursor, "edits must not overlap");
            copy(&mut code, &mut map, cursor, edit.offset);
            code.push_str(&edit.text);
            cursor = edit.end.max(edit.offset);
        }
        copy(&mut code, &mut map, cursor, source.len() as u32);

        (code, map)
    }
}
