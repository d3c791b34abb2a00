//! tripbook configuration.
//!
//! Built once at startup and passed by reference. Each path resolves through a chain:
//!
//! 1. `--log <path>`: explicit per-command override (trip log only)
//! 2. `TRIPBOOK_TRIP_LOG` env var (trip log only)
//! 3. `~/.tripbook/config.toml`
//! 4. defaults under `~/.tripbook/`
//!
//! A missing config file is fine. A config file that fails to parse is an error.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Environment variable overriding the trip log path.
pub const TRIP_LOG_ENV: &str = "TRIPBOOK_TRIP_LOG";

/// Errors that can occur while resolving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHome,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// The JSON trip log reservations are recorded to.
    pub trip_log_path: PathBuf,

    /// Where the travel guide keeps its index.
    pub travel_guide_store_path: PathBuf,

    /// Where the travel guide reads its source documents.
    pub travel_guide_data_path: PathBuf,
}

/// The on-disk config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigFile {
    trip_log_path: Option<PathBuf>,
    travel_guide_store_path: Option<PathBuf>,
    travel_guide_data_path: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration for this process.
    ///
    /// `log_override` is the `--log` flag, when given.
    pub fn load(log_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let root = Self::root().ok_or(ConfigError::NoHome)?;
        let file = ConfigFile::read(&root.join("config.toml"))?;
        let env_log = env::var_os(TRIP_LOG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let mut config = Self::resolve(&root, file);
        if let Some(path) = log_override.or(env_log) {
            config.trip_log_path = path;
        }
        Ok(config)
    }

    /// The config directory: `~/.tripbook/`.
    pub fn root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".tripbook"))
    }

    /// Fill in whatever the config file leaves out with defaults under `root`.
    fn resolve(root: &Path, file: ConfigFile) -> Self {
        Self {
            trip_log_path: file
                .trip_log_path
                .unwrap_or_else(|| root.join("trip_log.json")),
            travel_guide_store_path: file
                .travel_guide_store_path
                .unwrap_or_else(|| root.join("travel_guide").join("store")),
            travel_guide_data_path: file
                .travel_guide_data_path
                .unwrap_or_else(|| root.join("travel_guide").join("data")),
        }
    }
}

impl ConfigFile {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn defaults_live_under_root() {
        let config = Config::resolve(Path::new("/home/ana/.tripbook"), ConfigFile::default());

        assert_eq!(
            config.trip_log_path,
            Path::new("/home/ana/.tripbook/trip_log.json")
        );
        assert_eq!(
            config.travel_guide_store_path,
            Path::new("/home/ana/.tripbook/travel_guide/store")
        );
        assert_eq!(
            config.travel_guide_data_path,
            Path::new("/home/ana/.tripbook/travel_guide/data")
        );
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "trip-log-path = \"/srv/trips/log.json\"\n").unwrap();

        let file = ConfigFile::read(&path).unwrap();
        let config = Config::resolve(dir.path(), file);

        assert_eq!(config.trip_log_path, Path::new("/srv/trips/log.json"));
        assert_eq!(
            config.travel_guide_data_path,
            dir.path().join("travel_guide").join("data")
        );
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile::read(&dir.path().join("config.toml")).unwrap();

        assert!(file.trip_log_path.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "trip-log-path = [").unwrap();

        let err = ConfigFile::read(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "trip-log = \"typo.json\"\n").unwrap();

        assert!(matches!(
            ConfigFile::read(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }
}
