use serde::Serialize;

/// How a check-in was initiated. Checkout never changes this field.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckInSource {
    QrScan,
    ManualEntry,
}

impl CheckInSource {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CheckInSource::QrScan => "qr_scan",
            CheckInSource::ManualEntry => "manual_entry",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "qr_scan" => Some(CheckInSource::QrScan),
            "manual_entry" => Some(CheckInSource::ManualEntry),
            _ => None,
        }
    }
}
