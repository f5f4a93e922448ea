use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

static CONFIG: OnceLock<Config> = OnceLock::new();

mod config_dir;
pub use config_dir::{find_config_file, read_config};

mod error;
pub use error::{ConfigError, ConfigResult};

#[derive(Debug)]
pub struct Config {
    app: App,
    rules: Rules,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    catalog: PathBuf,
    data_dir: Option<PathBuf>,
}

/// The configurable scoring profile. The engine has one code path; the
/// stricter and the lenient rendition of the app differ only in these
/// values.
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pass_threshold: f64,
    points_per_correct: u32,
    perfect_bonus: u32,
    challenge_points: u32,
}

// What the `[rules]` table actually looks like on disk: an optional named
// profile plus individual overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RulesSection {
    profile: Option<String>,
    pass_threshold: Option<f64>,
    points_per_correct: Option<u32>,
    perfect_bonus: Option<u32>,
    challenge_points: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    app: App,
    rules: RulesSection,
}

impl Config {
    #[tracing::instrument]
    pub fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG.get_or_init(|| match Self::load(use_local) {
            Ok(config) => config,
            Err(e) => {
                crate::error::log_error(&e);
                tracing::error!("Invalid configuration.");
                std::process::exit(1);
            }
        })
    }

    /// Read and resolve the config file. A missing file is not an error:
    /// first runs work on full defaults.
    pub fn load(use_local: bool) -> ConfigResult<Self> {
        let raw = match read_config(use_local) {
            Ok(bytes) => return Self::parse(&bytes),
            Err(ConfigError::ConfigNotFound) => {
                tracing::debug!("no config file found, using defaults");
                RawConfig::default()
            }
            Err(e) => return Err(e),
        };
        raw.resolve()
    }

    fn parse(bytes: &[u8]) -> ConfigResult<Self> {
        let raw: RawConfig = toml::from_slice(bytes)?;
        raw.resolve()
    }

    #[inline]
    pub fn app(&self) -> &App {
        &self.app
    }

    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }
}

impl RawConfig {
    fn resolve(self) -> ConfigResult<Config> {
        Ok(Config {
            app: self.app,
            rules: self.rules.resolve()?,
        })
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("all-episodes-complete.json"),
            data_dir: None,
        }
    }
}

impl App {
    #[inline]
    pub fn catalog(&self) -> &Path {
        &self.catalog
    }

    /// Store directory: the configured one, else the per-user data
    /// directory, else a directory next to the binary.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }

        #[cfg(unix)]
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join(crate::APPLICATION_NAME);
        }

        #[cfg(windows)]
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata)
                .join(crate::APPLICATION_NAME)
                .join("data");
        }

        PathBuf::from("./alfred-data")
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::strict()
    }
}

impl Rules {
    /// The 90%-to-pass profile.
    pub fn strict() -> Self {
        Self {
            pass_threshold: 90.0,
            points_per_correct: 20,
            perfect_bonus: 25,
            challenge_points: 50,
        }
    }

    /// No pass requirement; every submission scores.
    pub fn lenient() -> Self {
        Self {
            pass_threshold: 0.0,
            ..Self::strict()
        }
    }

    #[inline]
    pub fn pass_threshold(&self) -> f64 {
        self.pass_threshold
    }

    #[inline]
    pub fn points_per_correct(&self) -> u32 {
        self.points_per_correct
    }

    #[inline]
    pub fn perfect_bonus(&self) -> u32 {
        self.perfect_bonus
    }

    #[inline]
    pub fn challenge_points(&self) -> u32 {
        self.challenge_points
    }
}

impl RulesSection {
    fn resolve(self) -> ConfigResult<Rules> {
        let mut rules = match self.profile.as_deref() {
            None | Some("strict") => Rules::strict(),
            Some("lenient") => Rules::lenient(),
            Some(other) => return Err(ConfigError::UnknownProfile(other.to_string())),
        };

        if let Some(v) = self.pass_threshold {
            rules.pass_threshold = v;
        }
        if let Some(v) = self.points_per_correct {
            rules.points_per_correct = v;
        }
        if let Some(v) = self.perfect_bonus {
            rules.perfect_bonus = v;
        }
        if let Some(v) = self.challenge_points {
            rules.challenge_points = v;
        }

        Ok(rules)
    }
}
