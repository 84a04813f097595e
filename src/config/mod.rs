use std::{fmt, fs};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use log::info;
use serde::Deserialize;
use crate::ledger::LedgerEntry;
use crate::reconcile::Reconciler;
use crate::transaction::Transaction;

/// File looked up in the working directory, then in the user config directory
pub(crate) const CONFIG_FILE_NAME: &str = "divvy.toml";

/// Digits 1-9 select a choice; two of them are taken by Split and Skip
pub(crate) const MAX_PEOPLE: usize = 7;

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Everybody transactions can be assigned to. A split is shared by all of them.
    pub(crate) people: Vec<String>,
    pub(crate) check_history: CheckHistoryConfig,
    pub(crate) identity: IdentityConfig,
}

/// How transactions are matched with the history
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub(crate) struct IdentityConfig {
    /// Also match on the account name. Changing this makes existing divvies look orphaned.
    pub(crate) include_account: bool,
}

/// Orphaned divvies that are expected and not worth reporting
#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub(crate) struct CheckHistoryConfig {
    pub(crate) ignore_descriptions: Vec<String>,
    pub(crate) ignore_accounts: Vec<String>,
    pub(crate) ignore_categories: Vec<String>,
}

#[derive(Debug)]
pub(crate) enum ConfigError {
    Unreadable(PathBuf, std::io::Error),
    Invalid(PathBuf, toml::de::Error),
    NoPeople,
    TooManyPeople(usize),
    DuplicatePerson(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Unreadable(path, e) => write!(f, "unable to read config file '{}': {}", path.display(), e),
            ConfigError::Invalid(path, e) => write!(f, "invalid config file '{}': {}", path.display(), e),
            ConfigError::NoPeople => write!(f, "no people configured, add `people = [...]` to {} or pass --person", CONFIG_FILE_NAME),
            ConfigError::TooManyPeople(n) => write!(f, "{} people configured, at most {} are supported", n, MAX_PEOPLE),
            ConfigError::DuplicatePerson(person) => write!(f, "'{}' is configured more than once", person),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub(crate) fn empty() -> Config {
        Config::default()
    }

    pub(crate) fn load_from_file(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable(path.to_path_buf(), e))?;
        let config = toml::from_str::<Config>(&content).map_err(|e| ConfigError::Invalid(path.to_path_buf(), e))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the config from `explicit` if given, else from the first default location that exists.
    /// Without any config file the config is empty.
    pub(crate) fn locate(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            return Config::load_from_file(path);
        }

        let candidates = [
            Some(PathBuf::from(CONFIG_FILE_NAME)),
            dirs::config_dir().map(|dir| dir.join("divvy").join(CONFIG_FILE_NAME)),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                return Config::load_from_file(&path);
            }
        }

        Ok(Config::empty())
    }

    /// The people to divvy between, checked to be usable from the prompt
    pub(crate) fn validated_people(&self) -> Result<&[String], ConfigError> {
        if self.people.is_empty() {
            return Err(ConfigError::NoPeople);
        }
        if self.people.len() > MAX_PEOPLE {
            return Err(ConfigError::TooManyPeople(self.people.len()));
        }
        let mut seen = HashSet::new();
        for person in &self.people {
            if !seen.insert(person.as_str()) {
                return Err(ConfigError::DuplicatePerson(person.clone()));
            }
        }
        Ok(&self.people)
    }
}

impl IdentityConfig {
    pub(crate) fn reconciler(&self) -> Reconciler {
        if self.include_account {
            Reconciler::with_identity(Transaction::id_with_account)
        } else {
            Reconciler::new()
        }
    }
}

impl CheckHistoryConfig {
    /// Whether an orphaned divvy is expected: skipped transactions never counted towards anybody,
    /// and some rows are known to be rewritten by the export.
    pub(crate) fn is_ignored(&self, entry: &LedgerEntry) -> bool {
        let t = &entry.transaction;
        entry.assignment.is_empty()
            || self.ignore_descriptions.contains(&t.description)
            || self.ignore_accounts.contains(&t.account_name)
            || self.ignore_categories.contains(&t.category)
    }
}
