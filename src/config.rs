use std::env::{self, VarError};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{config_error, Error};

pub const DATA_DIR_VAR: &str = "ECOROUTE_DATA_DIR";
pub const ADDR_VAR: &str = "ECOROUTE_ADDR";
pub const SEARCH_DELAY_VAR: &str = "ECOROUTE_SEARCH_DELAY_MS";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Directory holding one JSON file per durable slot.
    pub data_dir: PathBuf,
    pub addr: SocketAddr,
    /// Artificial latency before every search.
    pub search_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".ecoroute"),
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            search_delay: Duration::from_millis(1500),
        }
    }
}

impl Config {
    /// Reads the process environment after loading any `.env` file.
    pub fn from_env() -> Result<Self, Error> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!("loaded environment from {}", path.display());
        }

        Self::from_lookup(|key| env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();

        let data_dir = optional(&lookup, DATA_DIR_VAR)?
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let addr = parsed(&lookup, ADDR_VAR)?.unwrap_or(defaults.addr);
        let search_delay = parsed(&lookup, SEARCH_DELAY_VAR)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.search_delay);

        Ok(Self {
            data_dir,
            addr,
            search_delay,
        })
    }
}

fn optional<F>(lookup: &F, key: &str) -> Result<Option<String>, Error>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn parsed<F, T>(lookup: &F, key: &str) -> Result<Option<T>, Error>
where
    F: Fn(&str) -> Result<String, VarError>,
    T: FromStr,
{
    optional(lookup, key)?
        .map(|value| value.trim().parse().map_err(|_| config_error(key)))
        .transpose()
}

#[cfg(test)]
fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    move |key: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn defaults_when_unset() {
    let config = Config::from_lookup(lookup_from(&[])).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.search_delay, Duration::from_millis(1500));
}

#[test]
fn reads_every_variable() {
    let config = Config::from_lookup(lookup_from(&[
        (DATA_DIR_VAR, "/var/lib/ecoroute"),
        (ADDR_VAR, "0.0.0.0:8080"),
        (SEARCH_DELAY_VAR, "0"),
    ]))
    .unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/var/lib/ecoroute"));
    assert_eq!(config.addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    assert_eq!(config.search_delay, Duration::ZERO);
}

#[test]
fn rejects_bad_values() {
    let err = Config::from_lookup(lookup_from(&[(SEARCH_DELAY_VAR, "soon")])).unwrap_err();
    assert_eq!(err.code, 6);

    let err = Config::from_lookup(lookup_from(&[(ADDR_VAR, "localhost")])).unwrap_err();
    assert_eq!(err.code, 6);
}

#[test]
fn non_unicode_value_is_env_error() {
    let err = Config::from_lookup(|_| Err(VarError::NotUnicode("\u{fffd}".into()))).unwrap_err();

    assert_eq!(err.code, 1);
}
