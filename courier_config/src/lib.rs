use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use courier_models::email_address::EmailAddress;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable with a colon separated list of config files. Later
/// files override values of earlier ones.
pub const CONFIG_PATHS_ENV: &str = "COURIER_CONFIG";

/// Loads the config files listed in `COURIER_CONFIG`, or the default config
/// if the variable is not set.
pub fn load() -> anyhow::Result<Config> {
    match std::env::var(CONFIG_PATHS_ENV) {
        Ok(paths) => load_paths(&paths.split(':').collect::<Vec<_>>()),
        Err(std::env::VarError::NotPresent) => load_paths(&[DEFAULT_CONFIG_PATH]),
        Err(err) => Err(err).with_context(|| format!("Failed to read {CONFIG_PATHS_ENV}")),
    }
}

pub fn load_dev_config() -> anyhow::Result<Config> {
    load_paths(&[DEFAULT_CONFIG_PATH])
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub email: EmailConfig,
    pub health: HealthConfig,
    pub contact: ContactConfig,
    pub site: SiteConfig,
    pub sentry: Option<SentryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
}

#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    /// Sender of all outgoing mail.
    pub from: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Recipient of contact form submissions. Falls back to
    /// `site.admin_email` if unset or not a valid address.
    pub address: Option<String>,
    pub name: Option<String>,
    /// Name of the decoy form field that must stay empty.
    pub honeypot_field: String,
    /// How long the result of a form post submission is kept for the next
    /// page render.
    pub transient_state_ttl: Duration,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    pub url: Option<String>,
    pub admin_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SentryConfig {
    pub dsn: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid duration: {s:?}")))
    }
}

/// Parses durations like `1d 2h 3m 4s`. A number without unit is in seconds.
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    s.split_whitespace()
        .try_fold(std::time::Duration::default(), |total, part| {
            let unit_start = part
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(part.len());
            let (number, unit) = part.split_at(unit_start);
            let factor = match unit {
                "" | "s" => 1,
                "m" => 60,
                "h" => 60 * 60,
                "d" => 24 * 60 * 60,
                _ => return None,
            };
            let seconds = number.parse::<u64>().ok()?.checked_mul(factor)?;
            total.checked_add(std::time::Duration::from_secs(seconds))
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_dev_config().unwrap();

        assert_eq!(config.contact.honeypot_field, "covfefe");
        assert!(config.sentry.is_none());
    }

    #[test]
    fn later_files_override() {
        let dir = std::env::temp_dir().join(format!("courier-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let override_path = dir.join("override.toml");
        std::fs::write(
            &override_path,
            "[contact]\nhoneypot_field = \"website\"\n\n[site]\nurl = \"https://example.org/\"\n",
        )
        .unwrap();

        let config = load_paths(&[Path::new(DEFAULT_CONFIG_PATH), override_path.as_path()]).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(config.contact.honeypot_field, "website");
        assert_eq!(config.site.url.as_deref(), Some("https://example.org/"));
        assert_eq!(
            config.health.cache_ttl,
            load_dev_config().unwrap().health.cache_ttl
        );
    }

    #[test]
    fn missing_file() {
        let result = load_paths(&["/nonexistent/courier.toml"]);

        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file"));
    }

    #[test]
    fn durations() {
        for (input, expected) in [
            ("13s", Some(13)),
            ("42m", Some(42 * 60)),
            ("7h", Some(7 * 60 * 60)),
            ("20d", Some(20 * 24 * 60 * 60)),
            ("90", Some(90)),
            ("", Some(0)),
            ("1d 2h 3m 4s", Some(((24 + 2) * 60 + 3) * 60 + 4)),
            ("xyz", None),
            ("7dd", None),
            ("m", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input.clone())
                .ok()
                .map(|x| x.0.as_secs());
            assert_eq!(output, expected, "input: {input}");
        }
    }
}
