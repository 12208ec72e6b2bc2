//! Environment variable helpers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    MissingVariable(String),
}

/// Value of `key`, or `default` when it is not set.
pub fn get_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Value of `key`. Callers treat the error as fatal.
pub fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingVariable(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_default() {
        assert_eq!(get_env("MIXER_TEST_UNSET_VARIABLE", "fallback"), "fallback");
    }

    #[test]
    fn test_get_env_set() {
        std::env::set_var("MIXER_TEST_GET_ENV", "value");
        assert_eq!(get_env("MIXER_TEST_GET_ENV", "fallback"), "value");
    }

    #[test]
    fn test_require_env() {
        std::env::set_var("MIXER_TEST_REQUIRE_ENV", "present");
        assert_eq!(require_env("MIXER_TEST_REQUIRE_ENV").unwrap(), "present");

        let err = require_env("MIXER_TEST_REQUIRE_UNSET").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable MIXER_TEST_REQUIRE_UNSET"
        );
    }
}
