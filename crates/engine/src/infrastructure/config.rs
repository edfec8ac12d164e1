//! Engine configuration from the environment.

use std::path::Path;

use grimoire_domain::{CantripTable, DomainError};

pub const DB_PATH_VAR: &str = "GRIMOIRE_DB_PATH";
pub const CANTRIP_TABLE_VAR: &str = "GRIMOIRE_CANTRIP_TABLE";

const DEFAULT_DB_PATH: &str = "grimoire.db";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key}: {source}")]
    Invalid {
        key: &'static str,
        #[source]
        source: DomainError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// SQLite database file, created if missing
    pub db_path: String,
    pub cantrip_table: CantripTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            cantrip_table: CantripTable::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank values take the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let db_path = value(DB_PATH_VAR).unwrap_or_else(|| DEFAULT_DB_PATH.to_string());
        let cantrip_table = match value(CANTRIP_TABLE_VAR) {
            Some(raw) => raw.parse().map_err(|source| ConfigError::Invalid {
                key: CANTRIP_TABLE_VAR,
                source,
            })?,
            None => CantripTable::default(),
        };

        Ok(Self {
            db_path,
            cantrip_table,
        })
    }
}

/// Load `.env.local` then `.env` from the workspace root, if present.
/// Variables already set win over file values.
pub fn load_dotenv_from_repo_root() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.db_path, "grimoire.db");
    }

    #[test]
    fn reads_values() {
        let config = EngineConfig::from_lookup(lookup(&[
            (DB_PATH_VAR, " /tmp/spells.db "),
            (CANTRIP_TABLE_VAR, "1:2,5:3"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, "/tmp/spells.db");
        assert_eq!(config.cantrip_table.limit(6), 3);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            EngineConfig::from_lookup(lookup(&[(DB_PATH_VAR, "  "), (CANTRIP_TABLE_VAR, "")]))
                .unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn bad_cantrip_table_names_the_variable() {
        let err = EngineConfig::from_lookup(lookup(&[(CANTRIP_TABLE_VAR, "one:three")]))
            .unwrap_err();
        assert!(err.to_string().contains(CANTRIP_TABLE_VAR));
    }
}
