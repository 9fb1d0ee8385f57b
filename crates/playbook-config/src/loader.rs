//! JSON file loading with required-key checks.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::custody::{CustodyConfig, CUSTODY_REQUIRED_KEYS};
use crate::error::{ConfigError, ConfigResult, Validate};
use crate::sharpe::{SharpeConfig, SHARPE_REQUIRED_KEYS};

/// Reads and parses a JSON file.
///
/// # Errors
///
/// `ConfigError::NotFound` for a missing file, `ConfigError::Io` for other
/// read failures and `ConfigError::Parse` for malformed JSON.
pub fn read_json(path: &Path) -> ConfigResult<Value> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Checks that `value` is an object carrying every key in `required`.
///
/// # Errors
///
/// `ConfigError::MissingKeys` listing all required keys and the absent ones.
pub fn require_keys(value: &Value, required: &[&str]) -> ConfigResult<()> {
    let missing: Vec<String> = match value.as_object() {
        Some(object) => required
            .iter()
            .filter(|key| !object.contains_key(**key))
            .map(|key| (*key).to_string())
            .collect(),
        None => required.iter().map(|key| (*key).to_string()).collect(),
    };

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::MissingKeys {
            required: required.iter().map(|key| (*key).to_string()).collect(),
            missing,
        })
    }
}

/// Loads a JSON object and returns exactly its `required` keys.
///
/// # Errors
///
/// Any error of [`read_json`] or [`require_keys`].
pub fn load_config(path: &Path, required: &[&str]) -> ConfigResult<Map<String, Value>> {
    let value = read_json(path)?;
    require_keys(&value, required)?;

    let Value::Object(mut object) = value else {
        return Err(ConfigError::validation("<root>", "must be a JSON object"));
    };
    object.retain(|key, _| required.contains(&key.as_str()));
    Ok(object)
}

fn load_typed<T>(path: &Path, required: &[&str]) -> ConfigResult<T>
where
    T: DeserializeOwned + Validate,
{
    let object = load_config(path, required)?;
    let config: T = serde_json::from_value(Value::Object(object)).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    config.validate_or_error()?;
    Ok(config)
}

/// Loads and validates a custody configuration.
///
/// # Errors
///
/// Fails on a missing or unreadable file, malformed JSON, a missing required
/// key or any score violation.
pub fn load_custody_config(path: &Path) -> ConfigResult<CustodyConfig> {
    let config: CustodyConfig = load_typed(path, &CUSTODY_REQUIRED_KEYS)?;
    debug!(
        path = %path.display(),
        models = config.custody_models.len(),
        attributes = config.attributes.len(),
        "loaded custody config"
    );
    Ok(config)
}

/// Loads and validates a Sharpe configuration.
///
/// # Errors
///
/// Fails on a missing or unreadable file, malformed JSON, a missing required
/// key, a non-positive volatility or an invalid plot style.
pub fn load_sharpe_config(path: &Path) -> ConfigResult<SharpeConfig> {
    let config: SharpeConfig = load_typed(path, &SHARPE_REQUIRED_KEYS)?;
    debug!(
        path = %path.display(),
        assets = config.asset_classes.len(),
        risk_free_rate = config.risk_free_rate,
        "loaded sharpe config"
    );
    Ok(config)
}

/// Serializes a configuration as pretty-printed JSON.
///
/// # Errors
///
/// `ConfigError::Serialization` if the value cannot be represented as JSON.
pub fn to_json_pretty<T: Serialize>(config: &T) -> ConfigResult<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// The configuration files the CLI understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// Custody comparison heatmap.
    Custody,
    /// Sharpe ratio dashboard.
    Sharpe,
}

impl ConfigKind {
    /// Top-level keys a file of this kind must carry.
    pub fn required_keys(self) -> &'static [&'static str] {
        match self {
            ConfigKind::Custody => &CUSTODY_REQUIRED_KEYS,
            ConfigKind::Sharpe => &SHARPE_REQUIRED_KEYS,
        }
    }

    /// The built-in reference configuration as JSON.
    ///
    /// # Errors
    ///
    /// `ConfigError::Serialization` if serialization fails.
    pub fn example_json(self) -> ConfigResult<String> {
        match self {
            ConfigKind::Custody => to_json_pretty(&CustodyConfig::reference()),
            ConfigKind::Sharpe => to_json_pretty(&SharpeConfig::reference()),
        }
    }

    /// Loads and validates a file of this kind without using the result.
    ///
    /// # Errors
    ///
    /// Any error of the matching loader.
    pub fn check_file(self, path: &Path) -> ConfigResult<()> {
        match self {
            ConfigKind::Custody => load_custody_config(path).map(|_| ()),
            ConfigKind::Sharpe => load_sharpe_config(path).map(|_| ()),
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigKind::Custody => write!(f, "custody"),
            ConfigKind::Sharpe => write!(f, "sharpe"),
        }
    }
}

impl FromStr for ConfigKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "custody" => Ok(ConfigKind::Custody),
            "sharpe" => Ok(ConfigKind::Sharpe),
            other => Err(ConfigError::validation(
                "kind",
                format!("unknown config kind '{other}' (expected custody or sharpe)"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_keys() {
        let value = json!({"custody_models": [], "attributes": []});
        match require_keys(&value, &CUSTODY_REQUIRED_KEYS) {
            Err(ConfigError::MissingKeys { required, missing }) => {
                assert_eq!(required.len(), 3);
                assert_eq!(missing, vec!["scores".to_string()]);
            }
            other => panic!("unexpected: {other:?}"),
        }

        assert!(require_keys(&json!([1, 2]), &SHARPE_REQUIRED_KEYS).is_err());
        assert!(require_keys(&json!({"a": 1}), &["a"]).is_ok());
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in [ConfigKind::Custody, ConfigKind::Sharpe] {
            assert_eq!(kind.to_string().parse::<ConfigKind>().unwrap(), kind);
        }
        assert!("heatmap".parse::<ConfigKind>().is_err());
    }

    #[test]
    fn test_example_json_has_required_keys() {
        for kind in [ConfigKind::Custody, ConfigKind::Sharpe] {
            let value: Value = serde_json::from_str(&kind.example_json().unwrap()).unwrap();
            assert!(require_keys(&value, kind.required_keys()).is_ok());
        }
    }

    #[test]
    fn test_missing_file() {
        let err = read_json(Path::new("/nonexistent/custody_config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }
}
