use crate::modules::tracker::core::change_log::ChangeLogType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStrategy {
    Create,
    Update,
    #[default]
    CreateAndUpdate,
    Delete,
}

impl ImportStrategy {
    /// Whether a bundle imported with this strategy may perform `change`.
    ///
    /// Update strategies may blank out a single data value; that removal is recorded as a delete.
    pub fn permits(self, change: ChangeLogType) -> bool {
        use ChangeLogType::*;
        use ImportStrategy as S;
        matches!(
            (self, change),
            (S::Create | S::CreateAndUpdate, Create)
                | (S::Update | S::CreateAndUpdate, Update)
                | (S::Update | S::CreateAndUpdate | S::Delete, Delete)
        )
    }

    /// Every incoming value is a removal under this strategy, blank or not.
    pub fn removes_values(self) -> bool {
        self == ImportStrategy::Delete
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImportStrategy::Create => "CREATE",
            ImportStrategy::Update => "UPDATE",
            ImportStrategy::CreateAndUpdate => "CREATE_AND_UPDATE",
            ImportStrategy::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ImportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown import strategy: {0}")]
pub struct UnknownStrategy(pub String);

impl FromStr for ImportStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATE" => Ok(ImportStrategy::Create),
            "UPDATE" => Ok(ImportStrategy::Update),
            "CREATE_AND_UPDATE" => Ok(ImportStrategy::CreateAndUpdate),
            "DELETE" => Ok(ImportStrategy::Delete),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}
