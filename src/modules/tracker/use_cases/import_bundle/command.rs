use crate::modules::tracker::core::import_strategy::ImportStrategy;

/// Parameters for one bundle import. `user` is the importing actor recorded on change log entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportParams {
    pub strategy: ImportStrategy,
    pub user: String,
}

impl ImportParams {
    pub fn new(strategy: ImportStrategy, user: impl Into<String>) -> Self {
        Self {
            strategy,
            user: user.into(),
        }
    }
}
