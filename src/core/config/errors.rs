//! Configuration error types and validation traits.

use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// A trait for validating configuration parameters.
///
/// Implementors provide [`validate`](ConfigValidator::validate) and
/// [`get_defaults`](ConfigValidator::get_defaults); the remaining methods are
/// shared field checks.
pub trait ConfigValidator {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ConfigError if validation fails.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the default configuration.
    fn get_defaults() -> Self
    where
        Self: Sized;

    /// Validates that an integer is not negative.
    fn validate_non_negative_i32(&self, value: i32, field_name: &str) -> Result<(), ConfigError> {
        if value < 0 {
            Err(ConfigError::InvalidConfig {
                message: format!("{} must be non-negative, got {}", field_name, value),
            })
        } else {
            Ok(())
        }
    }

    /// Validates that an integer is strictly positive.
    fn validate_positive_i32(&self, value: i32, field_name: &str) -> Result<(), ConfigError> {
        if value <= 0 {
            Err(ConfigError::InvalidConfig {
                message: format!("{} must be greater than 0, got {}", field_name, value),
            })
        } else {
            Ok(())
        }
    }

    /// Validates a float value is finite and within a specified range.
    ///
    /// # Arguments
    ///
    /// * `value` - The value to validate.
    /// * `min` - The minimum allowed value (inclusive).
    /// * `max` - The maximum allowed value (inclusive).
    /// * `field_name` - The name of the field being validated.
    fn validate_f64_range(
        &self,
        value: f64,
        min: f64,
        max: f64,
        field_name: &str,
    ) -> Result<(), ConfigError> {
        if !value.is_finite() || value < min || value > max {
            Err(ConfigError::InvalidConfig {
                message: format!(
                    "{} must be between {} and {}, got {}",
                    field_name, min, max, value
                ),
            })
        } else {
            Ok(())
        }
    }
}

/// Extension trait adding convenience helpers to validators.
pub trait ConfigValidatorExt: ConfigValidator {
    /// Validates configuration and wraps any errors into TableError::ConfigError.
    fn validate_and_wrap_table_error(self) -> Result<Self, super::super::errors::TableError>
    where
        Self: Sized,
    {
        self.validate()
            .map_err(|e| super::super::errors::TableError::config_error(e.to_string()))?;
        Ok(self)
    }
}

impl<T: ConfigValidator> ConfigValidatorExt for T {}
