//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Default nesting limit for token trees and builder recursion.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for a [`Parser`](super::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Deepest nesting accepted, counted in bracket levels for the brace
    /// check and in recursion steps for the builder.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: ParserConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn builder_overrides_depth() {
        let config = ParserConfig::default().with_max_depth(8);
        assert_eq!(config.max_depth, 8);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"max_depth":8}"#);
    }
}
