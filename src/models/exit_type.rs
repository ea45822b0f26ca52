use serde::Serialize;

/// How an attendance record was closed.
/// `Auto` means the dwell-limit sweeper closed it, `Manual` means an
/// explicit checkout call did. Absent while the record is still open.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExitType {
    Manual,
    Auto,
}

impl ExitType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ExitType::Manual => "manual",
            ExitType::Auto => "auto",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(ExitType::Manual),
            "auto" => Some(ExitType::Auto),
            _ => None,
        }
    }
}
