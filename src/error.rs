use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_PREFIX_COLLISION: &str = "SP-ERR-CONFIG-001";
pub const ERR_PREFIX_SHAPE: &str = "SP-ERR-CONFIG-002";
pub const ERR_UPSTREAM_PARSE: &str = "SP-ERR-PARSE-001";

fn get_guarantee(code: &str) -> &'static str {
    match code {
        ERR_PREFIX_COLLISION => {
            "State and derived prefixes select distinct roles and never collide."
        }
        ERR_PREFIX_SHAPE => "Configured prefixes always form valid identifier starts.",
        ERR_UPSTREAM_PARSE => "Only syntactically valid scripts are rewritten.",
        _ => "Unknown guarantee.",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PREPROCESS ERROR
// ═══════════════════════════════════════════════════════════════════════════════

/// Fatal preprocessing failure. Raised before any output is produced; the
/// transform never emits partially rewritten text.
///
/// Non-fatal conditions (unrecognized effect shapes, declarations outside the
/// conventions) are resolved by omission and never surface here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessError {
    pub code: String,
    pub message: String,
    pub guarantee: String,
    pub filename: Option<String>,
}

impl PreprocessError {
    pub fn new(code: &str, message: &str, filename: Option<&str>) -> Self {
        PreprocessError {
            code: code.to_string(),
            message: message.to_string(),
            guarantee: get_guarantee(code).to_string(),
            filename: filename.map(|f| f.to_string()),
        }
    }
}

impl std::fmt::Display for PreprocessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.filename {
            Some(name) => write!(f, "[{}] {}: {}", self.code, name, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

impl std::error::Error for PreprocessError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_filename() {
        let err = PreprocessError::new(ERR_UPSTREAM_PARSE, "unexpected token", Some("App.svelte"));
        let rendered = err.to_string();
        assert!(rendered.contains("SP-ERR-PARSE-001"));
        assert!(rendered.contains("App.svelte"));
        assert!(rendered.contains("unexpected token"));
    }

    #[test]
    fn test_guarantee_attached_by_code() {
        let err = PreprocessError::new(ERR_PREFIX_COLLISION, "s$ vs s$", None);
        assert!(err.guarantee.contains("distinct roles"));
    }
}
