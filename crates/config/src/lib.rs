//! Layered configuration: built-in defaults, then an optional file, then
//! `JOTUNN_`-prefixed environment variables (nested with `__`, for example
//! `JOTUNN_CACHE__EXPIRY_HOURS=6`).

pub mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use jotunn_extract::models::RecordKind;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use crate::error::{ErrorKind, Result};

const ENV_PREFIX: &str = "JOTUNN_";
const DOCS_BASE: &str = "https://valheim-modding.github.io/Jotunn/data";
const FILE_NAMES: [&str; 4] = ["config.toml", "config.yaml", "config.yml", "config.json"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub cache: CacheConfig,
    pub http: HttpConfig,
}

/// Location of each object list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub items: String,
    pub recipes: String,
    pub prefabs: String,
    pub pieces: String,
    pub characters: String,
}
impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            items: format!("{DOCS_BASE}/objects/item-list.html"),
            recipes: format!("{DOCS_BASE}/objects/recipe-list.html"),
            prefabs: format!("{DOCS_BASE}/prefabs/prefab-list.html"),
            pieces: format!("{DOCS_BASE}/pieces/piece-list.html"),
            characters: format!("{DOCS_BASE}/objects/character-list.html"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a snapshot is served before a caller forces a refresh.
    pub expiry_hours: u64,
    /// Cadence of the background refresher.
    pub refresh_interval_minutes: u64,
}
impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            expiry_hours: 24,
            refresh_interval_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: jotunn_fetch::DEFAULT_TIMEOUT.as_secs(),
            user_agent: jotunn_fetch::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Loads and validates the configuration.
    ///
    /// An explicit `path` must exist. Without one, the first
    /// `config.{toml,yaml,yml,json}` found in the platform configuration
    /// directory is used, if any.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::Missing(path.display().to_string())),
            Some(path) => Some(path.to_path_buf()),
            None => default_file(),
        };
        let config: Self = Self::figment(file.as_deref())?.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(file = ?file, "Configuration loaded");
        Ok(config)
    }

    /// The provider stack, without extraction or validation.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = match file.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => figment.merge(Toml::file_exact(file)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(file)),
                Some("json") => figment.merge(Json::file_exact(file)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(file.display().to_string())),
            };
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn validate(&self) -> Result<()> {
        for (kind, url) in self.sources() {
            let field = match kind {
                RecordKind::Item => "sources.items",
                RecordKind::Recipe => "sources.recipes",
                RecordKind::Prefab => "sources.prefabs",
                RecordKind::Piece => "sources.pieces",
                RecordKind::Character => "sources.characters",
            };
            let parsed = Url::parse(url).or_raise(|| ErrorKind::Invalid {
                field,
                reason: format!("{url:?} is not a URL"),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                exn::bail!(ErrorKind::Invalid {
                    field,
                    reason: format!("{url:?} is not an http(s) URL"),
                });
            }
        }
        let durations = [
            ("cache.expiry_hours", self.cache.expiry_hours),
            ("cache.refresh_interval_minutes", self.cache.refresh_interval_minutes),
            ("http.timeout_secs", self.http.timeout_secs),
        ];
        if let Some((field, _)) = durations.into_iter().find(|(_, value)| *value == 0) {
            exn::bail!(ErrorKind::Invalid {
                field,
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.http.user_agent.trim().is_empty() {
            exn::bail!(ErrorKind::Invalid {
                field: "http.user_agent",
                reason: "must not be blank".to_string(),
            });
        }
        Ok(())
    }

    /// Every source URL, in refresh order.
    pub fn sources(&self) -> [(RecordKind, &str); 5] {
        [
            (RecordKind::Item, self.sources.items.as_str()),
            (RecordKind::Recipe, self.sources.recipes.as_str()),
            (RecordKind::Prefab, self.sources.prefabs.as_str()),
            (RecordKind::Piece, self.sources.pieces.as_str()),
            (RecordKind::Character, self.sources.characters.as_str()),
        ]
    }

    pub fn expiry(&self) -> Duration {
        Duration::from_secs(self.cache.expiry_hours.saturating_mul(60 * 60))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.cache.refresh_interval_minutes.saturating_mul(60))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

/// Platform configuration directory, e.g. `~/.config/jotunn` on Linux.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("io.github", "Valheim-Modding", "jotunn").map(|dirs| dirs.config_dir().to_path_buf())
}

fn default_file() -> Option<PathBuf> {
    let dir = config_dir()?;
    FILE_NAMES.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use figment::Jail;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.expiry(), Duration::from_secs(24 * 60 * 60));
        assert_eq!(config.refresh_interval(), Duration::from_secs(30 * 60));
        assert_eq!(config.timeout(), Duration::from_secs(12));
        assert_eq!(
            config.sources()[2],
            (RecordKind::Prefab, "https://valheim-modding.github.io/Jotunn/data/prefabs/prefab-list.html")
        );
    }

    #[test]
    fn test_file_then_environment() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [cache]
                expiry_hours = 6

                [sources]
                items = "http://localhost:8080/items.html"
                "#,
            )?;
            jail.set_env("JOTUNN_CACHE__REFRESH_INTERVAL_MINUTES", "5");
            jail.set_env("JOTUNN_HTTP__USER_AGENT", "tests");
            let config = Config::load(Some(Path::new("config.toml"))).map_err(|err| format!("{err:?}"))?;
            assert_eq!(config.cache.expiry_hours, 6);
            assert_eq!(config.cache.refresh_interval_minutes, 5);
            assert_eq!(config.http.user_agent, "tests");
            assert_eq!(config.sources.items, "http://localhost:8080/items.html");
            assert_eq!(config.sources.recipes, SourcesConfig::default().recipes);
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.json", r#"{ "cache": { "expiry_hours": 6 } }"#)?;
            jail.set_env("JOTUNN_CACHE__EXPIRY_HOURS", "48");
            let config = Config::load(Some(Path::new("config.json"))).map_err(|err| format!("{err:?}"))?;
            assert_eq!(config.expiry(), Duration::from_secs(48 * 60 * 60));
            Ok(())
        });
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "http:\n  timeout_secs: 3").unwrap();
        let config = Config::figment(Some(file.path())).unwrap().extract::<Config>().unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        let err = Config::load(Some(Path::new("/nonexistent/jotunn.toml"))).unwrap_err();
        assert_eq!(*err, ErrorKind::Missing("/nonexistent/jotunn.toml".to_string()));
        let err = Config::figment(Some(Path::new("config.ini"))).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedFormat("config.ini".to_string()));
    }

    #[test]
    fn test_malformed_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[cache]\nexpiry_hours = \"soon\"")?;
            let err = Config::load(Some(Path::new("config.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::Load);
            Ok(())
        });
    }

    #[rstest]
    #[case("sources.items", |c: &mut Config| c.sources.items = "item-list.html".to_string())]
    #[case("sources.pieces", |c: &mut Config| c.sources.pieces = "ftp://example.org/pieces".to_string())]
    #[case("cache.expiry_hours", |c: &mut Config| c.cache.expiry_hours = 0)]
    #[case("cache.refresh_interval_minutes", |c: &mut Config| c.cache.refresh_interval_minutes = 0)]
    #[case("http.timeout_secs", |c: &mut Config| c.http.timeout_secs = 0)]
    #[case("http.user_agent", |c: &mut Config| c.http.user_agent = "  ".to_string())]
    fn test_validate_rejects(#[case] field: &str, #[case] break_it: fn(&mut Config)) {
        let mut config = Config::default();
        break_it(&mut config);
        let err = config.validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::Invalid { field: f, .. } if *f == field), "{err:?}");
    }
}
