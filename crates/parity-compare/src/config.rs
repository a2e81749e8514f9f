//! Configuration for comparison runs
//!
//! A policy can be built in code, loaded from a YAML file, or picked up from
//! the environment:
//!
//! ```yaml
//! significant_digits: 2        # null compares numbers exactly
//! use_standard_fields: true    # start from the built-in Korean -> English table
//! fields:
//!   병종: crewType
//! use_rng_exclusions: true     # ignore crew, morale, gold, ...
//! exclude:
//!   - lastTurnAt
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::mapping::{ExclusionSet, FieldMappingTable};
use crate::policy::{ComparePolicy, DEFAULT_SIGNIFICANT_DIGITS};
use indexmap::IndexMap;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a policy file
pub const POLICY_FILE_VAR: &str = "PARITY_POLICY_FILE";

/// Environment variable overriding the numeric tolerance (`exact` disables it)
pub const SIGNIFICANT_DIGITS_VAR: &str = "PARITY_SIGNIFICANT_DIGITS";

/// On-disk form of a [`ComparePolicy`]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyFile {
    pub significant_digits: Option<u32>,
    pub use_standard_fields: bool,
    /// Extra source -> target pairs, applied after the standard table
    pub fields: IndexMap<String, String>,
    pub use_rng_exclusions: bool,
    /// Extra excluded field names, in either vocabulary
    pub exclude: Vec<String>,
}

impl Default for PolicyFile {
    fn default() -> Self {
        Self {
            significant_digits: Some(DEFAULT_SIGNIFICANT_DIGITS),
            use_standard_fields: true,
            fields: IndexMap::new(),
            use_rng_exclusions: false,
            exclude: Vec::new(),
        }
    }
}

impl PolicyFile {
    /// Build the policy this file describes.
    ///
    /// Excluded names are widened through the final field table so they match
    /// in both vocabularies.
    pub fn into_policy(self) -> ComparePolicy {
        let mut fields = if self.use_standard_fields {
            FieldMappingTable::standard()
        } else {
            FieldMappingTable::default()
        };
        fields.extend(self.fields);

        let mut exclusions = if self.use_rng_exclusions {
            ExclusionSet::rng_dependent()
        } else {
            ExclusionSet::new()
        };
        for field in self.exclude {
            exclusions.insert(field);
        }
        let exclusions = exclusions.widen(&fields);

        ComparePolicy {
            fields,
            exclusions,
            significant_digits: self.significant_digits,
        }
    }
}

/// Load a policy from a YAML file
pub fn load_policy(path: impl AsRef<Path>) -> ConfigResult<ComparePolicy> {
    let path = path.as_ref();
    debug!("Loading comparison policy: {:?}", path);

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_policy_str(&content, path)
}

/// Load a policy from YAML text; `source_path` is only used in errors
pub fn load_policy_str(content: &str, source_path: &Path) -> ConfigResult<ComparePolicy> {
    // An empty document means "all defaults"
    if content.trim().is_empty() {
        return Ok(PolicyFile::default().into_policy());
    }

    let file: PolicyFile = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    Ok(file.into_policy())
}

/// Configuration for the comparison environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonConfig {
    /// Policy file to load instead of the standard policy
    pub policy_file: Option<PathBuf>,
    /// Tolerance override; `Some(None)` forces exact comparison
    pub significant_digits: Option<Option<u32>>,
}

impl ComparisonConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let policy_file = lookup(POLICY_FILE_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let significant_digits = match lookup(SIGNIFICANT_DIGITS_VAR) {
            None => None,
            Some(raw) => Some(parse_digits(raw.trim())?),
        };

        Ok(Self {
            policy_file,
            significant_digits,
        })
    }

    /// Resolve the policy: the policy file (or the standard policy), then overrides
    pub fn policy(&self) -> ConfigResult<ComparePolicy> {
        let policy = match &self.policy_file {
            Some(path) => load_policy(path)?,
            None => ComparePolicy::standard(),
        };

        Ok(match self.significant_digits {
            Some(digits) => policy.with_significant_digits(digits),
            None => policy,
        })
    }
}

fn parse_digits(raw: &str) -> ConfigResult<Option<u32>> {
    if raw.eq_ignore_ascii_case("exact") {
        return Ok(None);
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|e| ConfigError::InvalidValue {
            key: SIGNIFICANT_DIGITS_VAR.to_string(),
            reason: format!("expected a digit count or 'exact', got '{}' ({})", raw, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Direction;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_load_policy_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            dir.path(),
            "policy.yaml",
            r#"
significant_digits: 3
fields:
  병종: crewType
use_rng_exclusions: true
exclude:
  - lastTurnAt
  - 통솔
"#,
        );

        let policy = load_policy(&path).unwrap();
        assert_eq!(policy.significant_digits, Some(3));
        assert_eq!(
            policy.fields.translate("병종", Direction::Forward),
            Some("crewType")
        );
        assert_eq!(
            policy.fields.translate("통솔", Direction::Forward),
            Some("leadership")
        );
        assert!(policy.exclusions.contains("crew"));
        assert!(policy.exclusions.contains("lastTurnAt"));
        assert!(policy.exclusions.contains("leadership"));
    }

    #[test]
    fn test_null_digits_means_exact() {
        let policy = load_policy_str("significant_digits: null\n", Path::new("inline")).unwrap();
        assert_eq!(policy.significant_digits, None);
    }

    #[test]
    fn test_empty_document_is_standard() {
        let policy = load_policy_str("", Path::new("inline")).unwrap();
        assert_eq!(policy, ComparePolicy::standard());
    }

    #[test]
    fn test_without_standard_fields() {
        let policy = load_policy_str(
            "use_standard_fields: false\nfields:\n  a: b\n",
            Path::new("inline"),
        )
        .unwrap();
        assert_eq!(policy.fields.len(), 1);
        assert_eq!(policy.fields.translate("통솔", Direction::Forward), None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = load_policy_str("tolerance: 2\n", Path::new("inline.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseYaml { .. }));
        assert!(err.to_string().contains("inline.yaml"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_policy(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_config_from_lookup() {
        let config = ComparisonConfig::from_lookup(lookup(&[(SIGNIFICANT_DIGITS_VAR, "4")]))
            .unwrap();
        assert_eq!(config.policy_file, None);
        assert_eq!(config.significant_digits, Some(Some(4)));
        assert_eq!(config.policy().unwrap().significant_digits, Some(4));

        let config =
            ComparisonConfig::from_lookup(lookup(&[(SIGNIFICANT_DIGITS_VAR, "exact")])).unwrap();
        assert_eq!(config.policy().unwrap().significant_digits, None);
    }

    #[test]
    fn test_config_defaults() {
        let config = ComparisonConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ComparisonConfig::default());
        assert_eq!(config.policy().unwrap(), ComparePolicy::standard());
    }

    #[test]
    fn test_config_invalid_digits() {
        let err = ComparisonConfig::from_lookup(lookup(&[(SIGNIFICANT_DIGITS_VAR, "two")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_config_policy_file_with_override() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "p.yaml", "use_rng_exclusions: true\n");
        let config = ComparisonConfig::from_lookup(lookup(&[
            (POLICY_FILE_VAR, path.to_str().unwrap()),
            (SIGNIFICANT_DIGITS_VAR, "0"),
        ]))
        .unwrap();

        let policy = config.policy().unwrap();
        assert!(policy.exclusions.contains("gold"));
        assert_eq!(policy.significant_digits, Some(0));
    }
}
