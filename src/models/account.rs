//! Account domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login account. Exactly one optional account per employee; the row may
/// exist unlinked for a moment during employee creation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    /// Stored password record, `base64(salt):base64(digest)`
    pub password_hash: String,
    pub status: String, // active, deactivated
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account status enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Deactivated,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Deactivated => "deactivated",
        }
    }

    /// The admin toggle flips between the two states
    pub fn toggled(&self) -> AccountStatus {
        match self {
            AccountStatus::Active => AccountStatus::Deactivated,
            AccountStatus::Deactivated => AccountStatus::Active,
        }
    }
}

impl From<String> for AccountStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "active" => AccountStatus::Active,
            _ => AccountStatus::Deactivated,
        }
    }
}

impl Account {
    pub fn status(&self) -> AccountStatus {
        AccountStatus::from(self.status.clone())
    }
}

/// Account response (no password material)
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub username: String,
    pub status: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            status: account.status,
        }
    }
}

/// Account list row with the owning employee's name
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct AccountOwnerRow {
    pub id: Uuid,
    pub username: String,
    pub status: String,
    pub full_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_toggle() {
        assert_eq!(AccountStatus::Active.toggled(), AccountStatus::Deactivated);
        assert_eq!(AccountStatus::Deactivated.toggled(), AccountStatus::Active);
    }

    #[test]
    fn test_status_from_string() {
        assert_eq!(
            AccountStatus::from("active".to_string()),
            AccountStatus::Active
        );
        assert_eq!(
            AccountStatus::from("deactivated".to_string()),
            AccountStatus::Deactivated
        );
        // Unknown strings fall to the safe side
        assert_eq!(
            AccountStatus::from("garbage".to_string()),
            AccountStatus::Deactivated
        );
    }
}
