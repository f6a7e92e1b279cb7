//! JSON configuration for the cipher.
//!
//! Values are applied in three layers, later ones winning:
//! 1. built-in defaults ([`CipherParameters::default`])
//! 2. a JSON file or string ([`SdesConfig::load`], [`SdesConfig::from_json`])
//! 3. `SDES_*` overrides from a lookup function ([`SdesConfig::apply_overrides`])
//!
//! Every field is optional; a missing field keeps the current value.
//! Unknown fields are rejected.
//!
//! ```json
//! {
//!   "rounds": 3,
//!   "p": 683,
//!   "q": 503,
//!   "pad": "x",
//!   "sbox1": "data/sbox1.txt",
//!   "sbox2": "data/sbox2.txt"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::SdesError;
use crate::params::CipherParameters;

/// Override variables understood by [`SdesConfig::apply_overrides`].
pub const OVERRIDE_KEYS: [&str; 4] = ["SDES_ROUNDS", "SDES_P", "SDES_Q", "SDES_PAD"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SdesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pad: Option<char>,
    /// Path to the first substitution table file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sbox1: Option<PathBuf>,
    /// Path to the second substitution table file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sbox2: Option<PathBuf>,
    /// Path to a prime table; the built-in sieve is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primes: Option<PathBuf>,
}

impl SdesConfig {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    /// Returns [`SdesError::Config`] for invalid JSON, wrongly typed values
    /// or unknown parameter names.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdes::config::SdesConfig;
    ///
    /// let config = SdesConfig::from_json(r#"{"rounds": 3, "pad": "x"}"#).unwrap();
    /// assert_eq!(config.rounds, Some(3));
    /// assert!(SdesConfig::from_json(r#"{"key_length": 9}"#).is_err());
    /// ```
    pub fn from_json(text: &str) -> Result<Self, SdesError> {
        serde_json::from_str(text).map_err(|e| SdesError::Config(e.to_string()))
    }

    /// Reads a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`SdesError::Io`] if the file cannot be read, otherwise as
    /// [`from_json`](Self::from_json).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SdesError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SdesError::io(path, e))?;
        let config = Self::from_json(&text)?;
        info!("loaded sdes config from {}", path.display());
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SdesError> {
        serde_json::to_string_pretty(self).map_err(|e| SdesError::Config(e.to_string()))
    }

    /// Copies every field set in `other` over this configuration.
    pub fn merge(&mut self, other: SdesConfig) {
        if other.rounds.is_some() {
            self.rounds = other.rounds;
        }
        if other.block_size.is_some() {
            self.block_size = other.block_size;
        }
        if other.encoding.is_some() {
            self.encoding = other.encoding;
        }
        if other.p.is_some() {
            self.p = other.p;
        }
        if other.q.is_some() {
            self.q = other.q;
        }
        if other.pad.is_some() {
            self.pad = other.pad;
        }
        if other.sbox1.is_some() {
            self.sbox1 = other.sbox1;
        }
        if other.sbox2.is_some() {
            self.sbox2 = other.sbox2;
        }
        if other.primes.is_some() {
            self.primes = other.primes;
        }
    }

    /// Applies `SDES_ROUNDS`, `SDES_P`, `SDES_Q` and `SDES_PAD` from `lookup`.
    ///
    /// Pass `|k| std::env::var(k).ok()` to read the process environment.
    ///
    /// # Errors
    /// Returns [`SdesError::Config`] if a value is present but does not
    /// parse. Fields already applied before the failing one are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdes::config::SdesConfig;
    ///
    /// let mut config = SdesConfig::default();
    /// config
    ///     .apply_overrides(|key| (key == "SDES_ROUNDS").then(|| "5".to_string()))
    ///     .unwrap();
    /// assert_eq!(config.rounds, Some(5));
    /// assert_eq!(config.p, None);
    /// ```
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), SdesError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SDES_ROUNDS") {
            self.rounds = Some(parse_override("SDES_ROUNDS", &value)?);
        }
        if let Some(value) = lookup("SDES_P") {
            self.p = Some(parse_override("SDES_P", &value)?);
        }
        if let Some(value) = lookup("SDES_Q") {
            self.q = Some(parse_override("SDES_Q", &value)?);
        }
        if let Some(value) = lookup("SDES_PAD") {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(pad), None) => self.pad = Some(pad),
                _ => {
                    return Err(SdesError::Config(format!(
                        "SDES_PAD must be a single character, got {:?}",
                        value
                    )))
                }
            }
        }
        debug!("sdes config after overrides: {:?}", self);
        Ok(())
    }
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Result<T, SdesError> {
    value
        .trim()
        .parse()
        .map_err(|_| SdesError::Config(format!("{} has invalid value {:?}", key, value)))
}

impl From<&CipherParameters> for SdesConfig {
    fn from(params: &CipherParameters) -> Self {
        SdesConfig {
            rounds: Some(params.rounds()),
            block_size: Some(params.block_size()),
            encoding: Some(params.encoding().to_string()),
            p: Some(params.p()),
            q: Some(params.q()),
            pad: Some(params.pad()),
            sbox1: None,
            sbox2: None,
            primes: None,
        }
    }
}
