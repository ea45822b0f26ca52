use serde::Serialize;

/// Registry entry used to resolve a scanned code to a gym.
/// The `qr_code` column is UNIQUE: a decoded payload maps to at most one gym.
#[derive(Debug, Clone, Serialize)]
pub struct Gym {
    pub id: i64,
    pub name: String,
    pub qr_code: String,
    pub created_at: String,
}
