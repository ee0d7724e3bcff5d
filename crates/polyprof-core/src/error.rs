//! Error types for polyprof-core
//!
//! Only configuration problems and merge topology problems are errors.
//! Degenerate statistics and out-of-range bin indices degrade to zero.

use thiserror::Error;

/// Main error type for profile operations
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Invalid domain bounds or grid dimensions
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Profiles to be merged have different bin counts
    #[error("Bin counts of profiles to be merged differ: expected {expected}, found {found}")]
    TopologyMismatch { expected: usize, found: usize },

    /// Merge called without any input profile
    #[error("No profiles to be merged")]
    EmptyMerge,

    /// JSON configuration could not be parsed or written
    #[error("JSON configuration error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration could not be parsed
    #[cfg(feature = "toml-config")]
    #[error("TOML configuration error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML configuration could not be written
    #[cfg(feature = "toml-config")]
    #[error("TOML serialization error: {0}")]
    TomlWrite(#[from] toml::ser::Error),
}

/// Result type alias for profile operations
pub type ProfileResult<T> = Result<T, ProfileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = ProfileError::InvalidConfig("x_min must be below x_max".to_string());
        assert!(err.to_string().contains("x_min must be below x_max"));
    }

    #[test]
    fn test_topology_mismatch_display() {
        let err = ProfileError::TopologyMismatch {
            expected: 3,
            found: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("expected 3"));
        assert!(msg.contains("found 4"));
    }
}
