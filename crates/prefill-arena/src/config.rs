//! Allocator configuration parameters.

use prefill_core::{FrameError, DEFAULT_CATEGORY_CAPACITY};

/// Configuration for the frame allocator.
///
/// Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameConfig {
    /// Number of placeholder categories given to a categorical column that
    /// has no entry in the request's category metadata.
    ///
    /// Default: 65_536 (codes fit in `u16`). Must be at least 1.
    pub default_category_capacity: u32,

    /// Separator between codes in a string type list (`"i4,f8"`).
    ///
    /// Default: `','`. Must not be whitespace or a character that can
    /// appear inside a type code.
    pub type_delimiter: char,
}

impl FrameConfig {
    /// Default placeholder category count.
    pub const DEFAULT_CATEGORY_CAPACITY: u32 = DEFAULT_CATEGORY_CAPACITY;

    /// Default type-list separator.
    pub const DEFAULT_TYPE_DELIMITER: char = ',';

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            default_category_capacity: Self::DEFAULT_CATEGORY_CAPACITY,
            type_delimiter: Self::DEFAULT_TYPE_DELIMITER,
        }
    }

    /// Check the config for values the allocator cannot work with.
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.default_category_capacity == 0 {
            return Err(FrameError::InvalidConfig {
                reason: "default_category_capacity must be at least 1".to_string(),
            });
        }
        let d = self.type_delimiter;
        if d.is_ascii_alphanumeric() || matches!(d, '[' | ']' | '<' | '=' | '|' | '?') {
            return Err(FrameError::InvalidConfig {
                reason: format!("type_delimiter '{d}' can appear inside a type code"),
            });
        }
        if d.is_whitespace() {
            return Err(FrameError::InvalidConfig {
                reason: format!("type_delimiter {d:?} is whitespace"),
            });
        }
        Ok(())
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FrameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_category_capacity, 65_536);
        assert_eq!(config.type_delimiter, ',');
    }

    #[test]
    fn zero_category_capacity_is_rejected() {
        let config = FrameConfig {
            default_category_capacity: 0,
            ..FrameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FrameError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn delimiter_inside_codes_is_rejected() {
        for d in ['i', '4', '[', '|'] {
            let config = FrameConfig {
                type_delimiter: d,
                ..FrameConfig::default()
            };
            assert!(config.validate().is_err(), "delimiter {d:?} accepted");
        }
        let config = FrameConfig {
            type_delimiter: ';',
            ..FrameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn whitespace_delimiter_is_rejected() {
        for d in [' ', '\t', '\n'] {
            let config = FrameConfig {
                type_delimiter: d,
                ..FrameConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(FrameError::InvalidConfig { .. })
            ));
        }
    }
}
