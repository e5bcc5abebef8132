use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PreprocessError, ERR_PREFIX_COLLISION, ERR_PREFIX_SHAPE};

lazy_static! {
    /// A prefix must itself be a valid start of a JS identifier, otherwise
    /// no declaration could ever match it.
    static ref PREFIX_RE: Regex = Regex::new(r"^[a-zA-Z_$][a-zA-Z0-9_$]*$").unwrap();
}

/// Naming conventions recognized by the rewriter.
///
/// `state` and `derived` are identifier prefixes; `effect` is a statement
/// label. Defaults: `s$`, `d$`, `e$`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Prefixes {
    #[serde(default = "default_state_prefix")]
    pub state: String,
    #[serde(default = "default_derived_prefix")]
    pub derived: String,
    #[serde(default = "default_effect_prefix")]
    pub effect: String,
}

fn default_state_prefix() -> String {
    "s$".to_string()
}

fn default_derived_prefix() -> String {
    "d$".to_string()
}

fn default_effect_prefix() -> String {
    "e$".to_string()
}

impl Default for Prefixes {
    fn default() -> Self {
        Prefixes {
            state: default_state_prefix(),
            derived: default_derived_prefix(),
            effect: default_effect_prefix(),
        }
    }
}

/// How a prefixed declaration is assigned its role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ClassificationPolicy {
    /// The prefix selects the role: state prefix marks state, derived prefix
    /// marks derived.
    #[default]
    PrefixRole,
    /// A single prefix (the state prefix) marks reactivity; a declaration is
    /// derived when its initializer reads another prefixed identifier.
    InferredRole,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub prefixes: Prefixes,
    #[serde(default)]
    pub policy: ClassificationPolicy,
}

impl Config {
    /// Parse a host-supplied JSON config. Missing fields fall back to the
    /// defaults, so `{}` yields the default configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Fatal configuration checks, run before any source text is read.
    pub fn validate(&self) -> Result<(), PreprocessError> {
        if self.prefixes.state == self.prefixes.derived {
            return Err(PreprocessError::new(
                ERR_PREFIX_COLLISION,
                &format!(
                    "Can't use the same prefix \"{}\" for both state and derived variables.",
                    self.prefixes.state
                ),
                None,
            ));
        }

        for (role, prefix) in [
            ("state", &self.prefixes.state),
            ("derived", &self.prefixes.derived),
            ("effect", &self.prefixes.effect),
        ] {
            if !PREFIX_RE.is_match(prefix) {
                return Err(PreprocessError::new(
                    ERR_PREFIX_SHAPE,
                    &format!(
                        "The {} prefix \"{}\" is not a valid identifier start.",
                        role, prefix
                    ),
                    None,
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.prefixes.state, "s$");
        assert_eq!(config.prefixes.derived, "d$");
        assert_eq!(config.prefixes.effect, "e$");
        assert_eq!(config.policy, ClassificationPolicy::PrefixRole);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = Config::from_json(r#"{ "prefixes": { "state": "st$" } }"#).unwrap();
        assert_eq!(config.prefixes.state, "st$");
        assert_eq!(config.prefixes.derived, "d$");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_policy() {
        let config = Config::from_json(r#"{ "policy": "inferredRole" }"#).unwrap();
        assert_eq!(config.policy, ClassificationPolicy::InferredRole);
    }

    #[test]
    fn test_colliding_prefixes_rejected() {
        let mut config = Config::default();
        config.prefixes.derived = config.prefixes.state.clone();
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, crate::error::ERR_PREFIX_COLLISION);
    }

    #[test]
    fn test_malformed_prefix_rejected() {
        let mut config = Config::default();
        config.prefixes.state = "1$".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, crate::error::ERR_PREFIX_SHAPE);

        config.prefixes.state = "".to_string();
        assert!(config.validate().is_err());
    }
}
