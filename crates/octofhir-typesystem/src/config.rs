//! Type system configuration.
//!
//! Configuration can be specified in `octofhir.toml` under the `[typesystem]`
//! section.
//!
//! # Example Configuration
//!
//! ```toml
//! [typesystem]
//! introspection = true
//! max_depth = 15
//! max_complexity = 500
//! warn_unreachable = true
//! ```

use serde::{Deserialize, Serialize};

/// Schema build and execution configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Enable introspection queries on the executable schema.
    /// Default: true
    #[serde(default = "default_introspection")]
    pub introspection: bool,

    /// Maximum query depth enforced by the executor.
    /// Default: 15
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum query complexity enforced by the executor.
    /// Default: 500
    #[serde(default = "default_max_complexity")]
    pub max_complexity: usize,

    /// Log interface implementers excluded by reachability at warn level
    /// instead of debug.
    /// Default: false
    #[serde(default)]
    pub warn_unreachable: bool,
}

fn default_introspection() -> bool {
    true
}

fn default_max_depth() -> usize {
    15
}

fn default_max_complexity() -> usize {
    500
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            introspection: default_introspection(),
            max_depth: default_max_depth(),
            max_complexity: default_max_complexity(),
            warn_unreachable: false,
        }
    }
}

impl SchemaConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("typesystem.max_depth must be > 0".into());
        }
        if self.max_complexity == 0 {
            return Err("typesystem.max_complexity must be > 0".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert!(config.introspection);
        assert_eq!(config.max_depth, 15);
        assert_eq!(config.max_complexity, 500);
        assert!(!config.warn_unreachable);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_limits() {
        let mut config = SchemaConfig::default();
        config.max_depth = 0;
        assert!(config.validate().is_err());

        let mut config = SchemaConfig::default();
        config.max_complexity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            max_depth = 8
            warn_unreachable = true
        "#;

        let config: SchemaConfig = toml::from_str(toml).unwrap();
        assert!(config.introspection);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.max_complexity, 500);
        assert!(config.warn_unreachable);
    }
}
