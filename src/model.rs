//! Account records and the integer code tables used by the query API.
//!
//! Query parameters address account types and health states by ordinal code.
//! The tables below fix those codes explicitly so that reordering the enum
//! variants can never change the external contract.

use serde::{Deserialize, Serialize};

/// Product an account is held under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    #[serde(rename = "Savings Account")]
    Savings,
    #[serde(rename = "Current Account")]
    Current,
    #[serde(rename = "GL Account")]
    GeneralLedger,
    #[serde(rename = "Overdraft Account")]
    Overdraft,
}

impl AccountType {
    /// Code table for the `type` query parameter, in code order.
    pub const ALL: [AccountType; 4] = [
        AccountType::Savings,
        AccountType::Current,
        AccountType::GeneralLedger,
        AccountType::Overdraft,
    ];

    /// Look up a variant by its query code. Unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Query code of this variant.
    pub fn code(self) -> i64 {
        match self {
            AccountType::Savings => 0,
            AccountType::Current => 1,
            AccountType::GeneralLedger => 2,
            AccountType::Overdraft => 3,
        }
    }
}

/// Credit health classification of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountHealth {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "Warning")]
    Warning,
    #[serde(rename = "Substandard 1")]
    Substandard1,
    #[serde(rename = "Substandard 2")]
    Substandard2,
    #[serde(rename = "Substandard 3")]
    Substandard3,
    #[serde(rename = "Overdue by 30 days")]
    OverdueBy30,
    #[serde(rename = "Overdue by 90 days")]
    OverdueBy90,
    #[serde(rename = "Delinquent")]
    Delinquent,
}

impl AccountHealth {
    /// Code table for the `health` query parameter, in code order.
    pub const ALL: [AccountHealth; 8] = [
        AccountHealth::Ok,
        AccountHealth::Warning,
        AccountHealth::Substandard1,
        AccountHealth::Substandard2,
        AccountHealth::Substandard3,
        AccountHealth::OverdueBy30,
        AccountHealth::OverdueBy90,
        AccountHealth::Delinquent,
    ];

    /// Look up a variant by its query code. Unknown codes yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    /// Query code of this variant.
    pub fn code(self) -> i64 {
        match self {
            AccountHealth::Ok => 0,
            AccountHealth::Warning => 1,
            AccountHealth::Substandard1 => 2,
            AccountHealth::Substandard2 => 3,
            AccountHealth::Substandard3 => 4,
            AccountHealth::OverdueBy30 => 5,
            AccountHealth::OverdueBy90 => 6,
            AccountHealth::Delinquent => 7,
        }
    }
}

/// A single account as served by the API. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub name: String,
    /// Customer reference number
    pub id: i64,
    /// Balance in currency minor units
    pub balance: i64,
    pub holdings: i64,
    pub account_type: AccountType,
    pub account_health: AccountHealth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes_follow_table_order() {
        for (idx, ty) in AccountType::ALL.iter().enumerate() {
            assert_eq!(ty.code(), idx as i64);
            assert_eq!(AccountType::from_code(idx as i64), Some(*ty));
        }
    }

    #[test]
    fn test_health_codes_follow_table_order() {
        for (idx, health) in AccountHealth::ALL.iter().enumerate() {
            assert_eq!(health.code(), idx as i64);
            assert_eq!(AccountHealth::from_code(idx as i64), Some(*health));
        }
    }

    #[test]
    fn test_unknown_codes_are_rejected() {
        assert_eq!(AccountType::from_code(-1), None);
        assert_eq!(AccountType::from_code(4), None);
        assert_eq!(AccountHealth::from_code(8), None);
        assert_eq!(AccountHealth::from_code(i64::MAX), None);
    }

    #[test]
    fn test_record_serializes_with_wire_names() {
        let record = AccountRecord {
            name: "Steve".to_string(),
            id: 234563462,
            balance: 10000,
            holdings: 5000,
            account_type: AccountType::GeneralLedger,
            account_health: AccountHealth::Warning,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Steve",
                "id": 234563462,
                "balance": 10000,
                "holdings": 5000,
                "accountType": "GL Account",
                "accountHealth": "Warning",
            })
        );
    }

    #[test]
    fn test_health_labels() {
        assert_eq!(
            serde_json::to_string(&AccountHealth::Ok).unwrap(),
            "\"ok\""
        );
        assert_eq!(
            serde_json::to_string(&AccountHealth::OverdueBy90).unwrap(),
            "\"Overdue by 90 days\""
        );
    }
}
