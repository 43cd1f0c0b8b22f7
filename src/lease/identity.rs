//! Owner identity tokens.

use uuid::Uuid;

/// Identity of one coordinator, stored in the `owner` column.
///
/// Formatted as `<host>/<uuid>`. The random v4 UUID makes tokens unique
/// across processes; the host part only helps operators reading `status`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    /// Generate a fresh token for this process.
    pub fn generate() -> Self {
        let host = hostname::get()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        OwnerId(format!("{}/{}", host, Uuid::new_v4()))
    }

    /// The token as stored in the lock table.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
