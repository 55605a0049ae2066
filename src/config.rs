use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Origin allowed to call the validator from a browser.
pub const ALLOWED_ORIGIN: &str = "mxvalidator.tux-sudo.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Upstream nameservers used for MX lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Upstream {
    /// Whatever `/etc/resolv.conf` points at.
    System,
    #[default]
    Google,
    Cloudflare,
    Quad9,
}

impl FromStr for Upstream {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(Upstream::System),
            "google" => Ok(Upstream::Google),
            "cloudflare" => Ok(Upstream::Cloudflare),
            "quad9" => Ok(Upstream::Quad9),
            other => Err(format!(
                "unknown upstream '{other}' (expected system, google, cloudflare or quad9)"
            )),
        }
    }
}

/// # Service Settings
///
/// Loaded from the process environment; a `.env` file in the working
/// directory is honoured when present.
///
/// | Variable                     | Default     |
/// |------------------------------|-------------|
/// | `MXVALIDATOR_HOST`           | `127.0.0.1` |
/// | `PORT`                       | `8080`      |
/// | `MXVALIDATOR_DNS_TIMEOUT_MS` | `2000`      |
/// | `MXVALIDATOR_UPSTREAM`       | `google`    |
/// | `MXVALIDATOR_MAX_IN_FLIGHT`  | unbounded   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub dns_timeout: Duration,
    pub upstream: Upstream,
    /// Cap on concurrent lookups within one batch. `None` spawns every lookup at once.
    pub max_in_flight: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            dns_timeout: Duration::from_secs(2),
            upstream: Upstream::default(),
            max_in_flight: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("MXVALIDATOR_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);
        let dns_timeout = parse_var::<u64, _>(&lookup, "MXVALIDATOR_DNS_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.dns_timeout);
        let upstream = parse_var(&lookup, "MXVALIDATOR_UPSTREAM")?.unwrap_or(defaults.upstream);
        let max_in_flight = match parse_var::<usize, _>(&lookup, "MXVALIDATOR_MAX_IN_FLIGHT")? {
            Some(0) | None => None,
            Some(n) => Some(n),
        };

        if dns_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                var: "MXVALIDATOR_DNS_TIMEOUT_MS",
                value: "0".to_string(),
                reason: "timeout must be positive".to_string(),
            });
        }

        Ok(Self {
            host,
            port,
            dns_timeout,
            upstream,
            max_in_flight,
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            match parsed {
                Ok(parsed) => Ok(Some(parsed)),
                Err(e) => Err(ConfigError::Invalid {
                    var,
                    reason: e.to_string(),
                    value,
                }),
            }
        }
    }
}
