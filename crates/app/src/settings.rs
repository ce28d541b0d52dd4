//! Handles settings for the application.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. `config/application.*` (optional);
//! 2. `config/application-<profile>.*` for every active profile, in order;
//! 3. environment variables prefixed with `BUDGET__`, e.g.
//!    `BUDGET__SERVER__PORT=8080`.
//!
//! Paths are resolved against `APP_PATH`, or the working directory when unset.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

const ENV_PREFIX: &str = "BUDGET";
const ENV_SEPARATOR: &str = "__";
const PROFILES_ENV: &str = "SERVICE_ACTIVE_PROFILES";
const APP_PATH_ENV: &str = "APP_PATH";

#[derive(Debug, Parser)]
#[command(name = "budget_manager", version, about = "Expense tracking HTTP service")]
pub struct Args {
    /// Comma separated configuration profiles (e.g. `dev,local`).
    #[arg(long, value_delimiter = ',')]
    pub profiles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Database {
    Memory,
    Sqlite(String),
    /// Any URL sea-orm can connect to (`sqlite:`, `postgres://`).
    Url(String),
}

impl Database {
    pub fn url(&self) -> Option<String> {
        match self {
            Database::Memory => None,
            Database::Sqlite(path) => Some(format!("sqlite:{path}?mode=rwc")),
            Database::Url(url) => Some(url.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            database: Database::Memory,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    /// Load settings for this process from files, profiles and environment.
    pub fn new(args: &Args) -> Result<Self> {
        let base = match std::env::var(APP_PATH_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => std::env::current_dir()?,
        };
        let profiles = active_profiles(&args.profiles, std::env::var(PROFILES_ENV).ok());

        Self::from_sources(&base, &profiles, None)
    }

    /// `env` replaces the process environment when given.
    pub fn from_sources(
        base: &Path,
        profiles: &[String],
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .add_source(File::with_name(&config_file(base, None)).required(false));
        for profile in profiles {
            builder = builder
                .add_source(File::with_name(&config_file(base, Some(profile))).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}

fn config_file(base: &Path, profile: Option<&str>) -> String {
    let name = match profile {
        Some(profile) => format!("application-{profile}"),
        None => "application".to_string(),
    };
    base.join("config").join(name).to_string_lossy().into_owned()
}

/// Profiles from the command line first, then new ones from the environment.
pub fn active_profiles(cli: &[String], env: Option<String>) -> Vec<String> {
    let mut profiles: Vec<String> = Vec::new();
    let from_env = env.unwrap_or_default();
    let candidates = cli
        .iter()
        .map(String::as_str)
        .chain(from_env.split(','))
        .map(str::trim)
        .filter(|p| !p.is_empty());

    for profile in candidates {
        if !profiles.iter().any(|p| p == profile) {
            profiles.push(profile.to_string());
        }
    }
    profiles
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        let config_dir = dir.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(name), contents).unwrap();
    }

    #[test]
    fn defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_sources(dir.path(), &[], Some(HashMap::new())).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.database, Database::Memory);
    }

    #[test]
    fn profile_overrides_base_file() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "application.toml",
            "[app]\nlevel = \"warn\"\n[server]\nport = 8080\n",
        );
        write(
            dir.path(),
            "application-dev.toml",
            "[server]\nport = 9090\n[server.database]\nsqlite = \"dev.db\"\n",
        );

        let settings = Settings::from_sources(
            dir.path(),
            &["dev".to_string()],
            Some(HashMap::new()),
        )
        .unwrap();

        assert_eq!(settings.app.level, "warn");
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.database, Database::Sqlite("dev.db".to_string()));
    }

    #[test]
    fn environment_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "application.toml", "[server]\nport = 8080\n");
        let env = HashMap::from([
            ("BUDGET__SERVER__PORT".to_string(), "7070".to_string()),
            ("BUDGET__APP__LEVEL".to_string(), "debug".to_string()),
        ]);

        let settings = Settings::from_sources(dir.path(), &[], Some(env)).unwrap();

        assert_eq!(settings.server.port, 7070);
        assert_eq!(settings.app.level, "debug");
    }

    #[test]
    fn yaml_profiles_are_read_too() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "application-pg.yaml",
            "server:\n  database:\n    url: postgres://localhost/budget\n",
        );

        let settings =
            Settings::from_sources(dir.path(), &["pg".to_string()], Some(HashMap::new()))
                .unwrap();

        assert_eq!(
            settings.server.database.url().as_deref(),
            Some("postgres://localhost/budget")
        );
    }

    #[test]
    fn profiles_are_merged_without_duplicates() {
        let cli = vec!["dev".to_string(), "local".to_string()];

        assert_eq!(
            active_profiles(&cli, Some("local, test,".to_string())),
            vec!["dev", "local", "test"]
        );
        assert!(active_profiles(&[], None).is_empty());
    }

    #[test]
    fn sqlite_url_creates_missing_files() {
        assert_eq!(
            Database::Sqlite("budget.db".to_string()).url().as_deref(),
            Some("sqlite:budget.db?mode=rwc")
        );
        assert_eq!(Database::Memory.url(), None);
    }
}
