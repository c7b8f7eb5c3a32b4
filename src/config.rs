use crate::Error;

/// Saaty's recommended limit for the consistency ratio.
pub const DEFAULT_CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Settings that change how AHP treats inconsistent judgments. The matrix methods have no
/// settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// A consistency ratio at or above this value is reported as inconsistent.
    pub consistency_threshold: f64,
    /// Fail the calculation, instead of warning, when the criteria matrix is inconsistent.
    pub strict_consistency: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            consistency_threshold: DEFAULT_CONSISTENCY_THRESHOLD,
            strict_consistency: false,
        }
    }
}

impl Config {
    /// Load settings from `MCDM_CONSISTENCY_THRESHOLD` and `MCDM_STRICT_CONSISTENCY`, using the
    /// defaults for any that are unset.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        if let Ok(threshold) = std::env::var("MCDM_CONSISTENCY_THRESHOLD") {
            config.consistency_threshold = threshold.trim().parse().map_err(|_| Error::Config {
                message: format!("MCDM_CONSISTENCY_THRESHOLD is not a number: {threshold}"),
            })?;
        }
        if let Ok(strict) = std::env::var("MCDM_STRICT_CONSISTENCY") {
            config.strict_consistency = match strict.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(Error::Config {
                        message: format!("MCDM_STRICT_CONSISTENCY is not a boolean: {strict}"),
                    })
                }
            };
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.consistency_threshold.is_finite() || self.consistency_threshold <= 0.0 {
            return Err(Error::Config {
                message: format!(
                    "consistency threshold must be a positive number, got {}",
                    self.consistency_threshold
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        env::remove_var("MCDM_CONSISTENCY_THRESHOLD");
        env::remove_var("MCDM_STRICT_CONSISTENCY");
    }

    #[test]
    #[serial]
    fn from_env_defaults() {
        clear_env();
        assert_eq!(Config::from_env().unwrap(), Config::default());
    }

    #[test]
    #[serial]
    fn from_env_with_all_vars() {
        clear_env();
        env::set_var("MCDM_CONSISTENCY_THRESHOLD", " 0.2 ");
        let cases = [
            ("1", true),
            ("yes", true),
            ("TRUE", true),
            ("0", false),
            ("no", false),
        ];
        for (value, strict) in cases {
            env::set_var("MCDM_STRICT_CONSISTENCY", value);
            let config = Config::from_env().unwrap();
            assert_eq!(config.consistency_threshold, 0.2);
            assert_eq!(config.strict_consistency, strict, "{value}");
        }
        clear_env();
    }

    #[test]
    #[serial]
    fn from_env_rejects_bad_values() {
        clear_env();
        env::set_var("MCDM_STRICT_CONSISTENCY", "maybe");
        assert!(matches!(Config::from_env(), Err(Error::Config { .. })));
        clear_env();
        env::set_var("MCDM_CONSISTENCY_THRESHOLD", "high");
        assert!(matches!(Config::from_env(), Err(Error::Config { .. })));
        env::set_var("MCDM_CONSISTENCY_THRESHOLD", "-1");
        assert!(matches!(Config::from_env(), Err(Error::Config { .. })));
        clear_env();
    }

    #[test]
    fn default_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn threshold_must_be_positive() {
        for threshold in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = Config {
                consistency_threshold: threshold,
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(Error::Config { .. })));
        }
    }
}
