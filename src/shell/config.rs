use crate::modules::tracker::core::import_strategy::{ImportStrategy, UnknownStrategy};
use thiserror::Error;

pub const STRATEGY_VAR: &str = "TRACKER_IMPORT_STRATEGY";
pub const USER_VAR: &str = "TRACKER_IMPORT_USER";

const DEFAULT_USER: &str = "admin";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TRACKER_IMPORT_STRATEGY: {0}")]
    Strategy(#[from] UnknownStrategy),

    #[error("TRACKER_IMPORT_USER must not be blank")]
    BlankUser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub strategy: ImportStrategy,
    pub user: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let strategy = match lookup(STRATEGY_VAR) {
            Some(raw) => raw.parse()?,
            None => ImportStrategy::default(),
        };
        let user = match lookup(USER_VAR) {
            Some(user) if user.trim().is_empty() => return Err(ConfigError::BlankUser),
            Some(user) => user.trim().to_string(),
            None => DEFAULT_USER.to_string(),
        };
        Ok(Self { strategy, user })
    }
}
