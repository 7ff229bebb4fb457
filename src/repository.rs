//! Read-only account data source.
//!
//! The dataset is loaded once at startup, either from the built-in seed list
//! or from a JSON seed file, and shared by every request without locking.

use std::path::Path;
use std::sync::Arc;

use crate::model::{AccountHealth, AccountRecord, AccountType};

/// Provider of the account collection served by the API.
pub trait AccountRepository: Send + Sync {
    /// All records, in insertion order.
    fn list(&self) -> &[AccountRecord];
}

/// Immutable in-memory account collection.
#[derive(Debug, Clone)]
pub struct StaticAccounts {
    accounts: Arc<[AccountRecord]>,
}

impl StaticAccounts {
    pub fn new(accounts: Vec<AccountRecord>) -> Self {
        Self {
            accounts: accounts.into(),
        }
    }

    /// Collection holding the built-in seed records.
    pub fn seeded() -> Self {
        Self::new(seed_accounts())
    }

    /// Load records from a JSON file containing an array of accounts.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let contents = std::fs::read_to_string(path)?;
        let accounts: Vec<AccountRecord> = serde_json::from_str(&contents)?;
        Ok(Self::new(accounts))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountRepository for StaticAccounts {
    fn list(&self) -> &[AccountRecord] {
        &self.accounts
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

fn account(
    name: &str,
    id: i64,
    account_type: AccountType,
    account_health: AccountHealth,
) -> AccountRecord {
    AccountRecord {
        name: name.to_string(),
        id,
        balance: 10000,
        holdings: 5000,
        account_type,
        account_health,
    }
}

/// The built-in seed list.
pub fn seed_accounts() -> Vec<AccountRecord> {
    use AccountHealth as H;
    use AccountType as T;

    vec![
        account("Prateek", 12323532, T::Savings, H::Ok),
        account("Mandal", 564678345, T::Savings, H::Ok),
        account("Poulami", 14654758353, T::Savings, H::Ok),
        account("Manna", 253454364, T::Savings, H::Ok),
        account("Steve", 234563462, T::GeneralLedger, H::Warning),
        account("Gerard", 68765545, T::GeneralLedger, H::Ok),
        account("Butler", 54675673, T::Current, H::Ok),
        account("Monka", 86786564, T::Overdraft, H::Substandard1),
        account("Monke", 36747353, T::Overdraft, H::Delinquent),
        account("Casandra", 36547325, T::Overdraft, H::OverdueBy30),
        account("Mongo", 35465735, T::Overdraft, H::Warning),
        account("Redis", 246375378, T::Overdraft, H::Substandard3),
    ]
}
