use crate::engine::{Ledger, RandomIds, SequentialIds};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const ID_SCHEME_VAR: &str = "CRAB_BANK_IDS";
pub const SNAPSHOT_VAR: &str = "CRAB_BANK_SNAPSHOT";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown CRAB_BANK_IDS value: {0} (expected random or sequential)")]
    UnknownIdScheme(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdScheme {
    #[default]
    Random,
    Sequential,
}

impl FromStr for IdScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "random" => Ok(IdScheme::Random),
            "sequential" => Ok(IdScheme::Sequential),
            _ => Err(ConfigError::UnknownIdScheme(s.into())),
        }
    }
}

/// Process settings: the optional script path argument, the id scheme and snapshot variables.
/// Log verbosity is read separately by the logger from `RUST_LOG`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Read from stdin when absent
    pub script: Option<PathBuf>,
    pub id_scheme: IdScheme,
    /// Where to export the final account snapshots, if anywhere
    pub snapshot: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_parts(
            env::args_os().nth(1),
            env::var(ID_SCHEME_VAR).ok(),
            env::var_os(SNAPSHOT_VAR),
        )
    }

    pub fn from_parts(
        script: Option<OsString>,
        id_scheme: Option<String>,
        snapshot: Option<OsString>,
    ) -> Result<Self, ConfigError> {
        let id_scheme = match id_scheme {
            Some(value) => value.parse()?,
            None => IdScheme::default(),
        };

        Ok(Config {
            script: script.map(PathBuf::from),
            id_scheme,
            snapshot: snapshot.filter(|path| !path.is_empty()).map(PathBuf::from),
        })
    }

    pub fn ledger(&self) -> Ledger {
        match self.id_scheme {
            IdScheme::Random => Ledger::with_id_generator(RandomIds),
            IdScheme::Sequential => Ledger::with_id_generator(SequentialIds::default()),
        }
    }
}
