use serde::Serialize;

/// Session state of an attendance record.
/// A member has at most one record with `InGym` at any time; the
/// `in_gym → checked_out` transition happens exactly once per record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InGym,
    CheckedOut,
}

impl SessionStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SessionStatus::InGym => "in_gym",
            SessionStatus::CheckedOut => "checked_out",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "in_gym" => Some(SessionStatus::InGym),
            "checked_out" => Some(SessionStatus::CheckedOut),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, SessionStatus::InGym)
    }
}
