//! Configuration loading
//!
//! Every setting resolves through the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`HUDDLE_*`)
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Contact-number requirement for registration.
///
/// Deployments differ on whether every registrant must supply a mobile
/// number, so this is a toggle rather than a fixed rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactNumberPolicy {
    /// Contact number mandatory, strict format check
    RequiredStrict,
    /// Registrant may declare they have no mobile number
    Optional,
}

impl ContactNumberPolicy {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "required-strict" => Ok(Self::RequiredStrict),
            "optional" => Ok(Self::Optional),
            other => Err(Error::Config(format!(
                "unknown contact number policy '{other}' (expected 'required-strict' or 'optional')"
            ))),
        }
    }
}

/// Resolved service settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// SQLite database file path
    pub database_path: PathBuf,
    /// Bind host for the HTTP listener
    pub bind_host: String,
    /// Bind port for the HTTP listener
    pub port: u16,
    /// Reporting timezone as minutes east of UTC; service dates roll at
    /// local midnight in this offset
    pub utc_offset_minutes: i32,
    /// Registration contact-number rule
    pub contact_number_policy: ContactNumberPolicy,
}

/// Values taken from the command line, each overriding the layers below
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database_path: Option<PathBuf>,
    pub bind_host: Option<String>,
    pub port: Option<u16>,
    pub utc_offset_minutes: Option<i32>,
    pub contact_number_policy: Option<ContactNumberPolicy>,
}

/// On-disk config file shape; every field optional
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    database_path: Option<PathBuf>,
    bind_host: Option<String>,
    port: Option<u16>,
    utc_offset_minutes: Option<i32>,
    contact_number_policy: Option<ContactNumberPolicy>,
}

impl Settings {
    /// Resolve settings from overrides, environment, config file, and
    /// defaults, in that order.
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let file = load_config_file()?;
        Self::resolve_with_file(overrides, file)
    }

    fn resolve_with_file(overrides: &Overrides, file: FileSettings) -> Result<Self> {
        let database_path = overrides
            .database_path
            .clone()
            .or_else(|| std::env::var("HUDDLE_DB").ok().map(PathBuf::from))
            .or(file.database_path)
            .unwrap_or_else(default_database_path);

        let bind_host = overrides
            .bind_host
            .clone()
            .or_else(|| std::env::var("HUDDLE_HOST").ok())
            .or(file.bind_host)
            .unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match overrides.port {
            Some(p) => p,
            None => match std::env::var("HUDDLE_PORT") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| Error::Config(format!("invalid HUDDLE_PORT value '{raw}'")))?,
                Err(_) => file.port.unwrap_or(5870),
            },
        };

        let utc_offset_minutes = match overrides.utc_offset_minutes {
            Some(v) => v,
            None => match std::env::var("HUDDLE_UTC_OFFSET_MINUTES") {
                Ok(raw) => raw.parse().map_err(|_| {
                    Error::Config(format!("invalid HUDDLE_UTC_OFFSET_MINUTES value '{raw}'"))
                })?,
                // Default +480 (UTC+8): the deployment the contact format implies
                Err(_) => file.utc_offset_minutes.unwrap_or(480),
            },
        };

        let contact_number_policy = match overrides.contact_number_policy {
            Some(p) => p,
            None => match std::env::var("HUDDLE_CONTACT_POLICY") {
                Ok(raw) => ContactNumberPolicy::parse(&raw)?,
                Err(_) => file
                    .contact_number_policy
                    .unwrap_or(ContactNumberPolicy::RequiredStrict),
            },
        };

        Ok(Settings {
            database_path,
            bind_host,
            port,
            utc_offset_minutes,
            contact_number_policy,
        })
    }
}

/// Read the platform config file if one exists; an absent file is the
/// normal zero-config case, a malformed one is an error.
fn load_config_file() -> Result<FileSettings> {
    let Some(path) = config_file_path() else {
        return Ok(FileSettings::default());
    };
    if !path.exists() {
        return Ok(FileSettings::default());
    }
    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))
}

fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("huddle").join("config.toml"))
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("huddle").join("huddle.db"))
        .unwrap_or_else(|| PathBuf::from("./huddle_data/huddle.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_set() {
        let settings =
            Settings::resolve_with_file(&Overrides::default(), FileSettings::default()).unwrap();
        assert_eq!(settings.bind_host, "127.0.0.1");
        assert_eq!(settings.port, 5870);
        assert_eq!(settings.utc_offset_minutes, 480);
        assert_eq!(
            settings.contact_number_policy,
            ContactNumberPolicy::RequiredStrict
        );
    }

    #[test]
    fn test_overrides_beat_file_values() {
        let file = FileSettings {
            port: Some(6000),
            utc_offset_minutes: Some(0),
            ..FileSettings::default()
        };
        let overrides = Overrides {
            port: Some(7000),
            ..Overrides::default()
        };
        let settings = Settings::resolve_with_file(&overrides, file).unwrap();
        assert_eq!(settings.port, 7000);
        // Untouched override still falls back to the file
        assert_eq!(settings.utc_offset_minutes, 0);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            ContactNumberPolicy::parse("required-strict").unwrap(),
            ContactNumberPolicy::RequiredStrict
        );
        assert_eq!(
            ContactNumberPolicy::parse("optional").unwrap(),
            ContactNumberPolicy::Optional
        );
        assert!(ContactNumberPolicy::parse("sometimes").is_err());
    }

    #[test]
    fn test_file_settings_toml_shape() {
        let file: FileSettings = toml::from_str(
            r#"
            port = 8080
            contact_number_policy = "optional"
            "#,
        )
        .unwrap();
        assert_eq!(file.port, Some(8080));
        assert_eq!(
            file.contact_number_policy,
            Some(ContactNumberPolicy::Optional)
        );
        assert!(file.database_path.is_none());
    }
}
