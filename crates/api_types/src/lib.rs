//! Request and response bodies of the HTTP API.
//!
//! Write payloads keep every field optional so the server can answer a
//! missing field with its own message instead of a deserialization error.
//! Fields that a route precondition has already checked (`user_id`, `type`,
//! `reference_id`) are required and accept either a JSON integer or a
//! decimal string.

use serde::{Deserialize, Serialize};

/// `{"message": ...}` returned by successful deletes.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Row ids sent as `5` or `"5"`.
pub mod id {
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Number(id) => Ok(id),
            Raw::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid id: {text}"))),
        }
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HealthStatus {
        pub status: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub database: Option<String>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UserNew {
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub occupation: Option<String>,
        pub phone: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct UserUpdate {
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub occupation: Option<String>,
        pub phone: Option<String>,
        pub password: Option<String>,
    }
}

pub mod income {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeNew {
        #[serde(deserialize_with = "crate::id::deserialize")]
        pub user_id: i32,
        pub category: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeUpdate {
        #[serde(deserialize_with = "crate::id::deserialize")]
        pub user_id: i32,
        pub category: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<f64>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        #[serde(deserialize_with = "crate::id::deserialize")]
        pub user_id: i32,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        #[serde(deserialize_with = "crate::id::deserialize")]
        pub user_id: i32,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<f64>,
        pub category: Option<String>,
    }
}

pub mod financial_profile {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FinancialProfileNew {
        #[serde(deserialize_with = "crate::id::deserialize")]
        pub user_id: i32,
        pub income: Option<f64>,
        pub expenses: Option<f64>,
        /// Defaults to `0`.
        pub savings: Option<f64>,
        pub risk_tolerance: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct FinancialProfileUpdate {
        pub income: Option<f64>,
        pub expenses: Option<f64>,
        pub savings: Option<f64>,
        pub risk_tolerance: Option<String>,
    }
}

pub mod tax_info {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TaxInfoNew {
        #[serde(deserialize_with = "crate::id::deserialize")]
        pub user_id: i32,
        pub gross_income: Option<f64>,
        pub taxable_income: Option<f64>,
        pub tax_paid: Option<f64>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TaxInfoUpdate {
        pub gross_income: Option<f64>,
        pub taxable_income: Option<f64>,
        pub tax_paid: Option<f64>,
    }
}

pub mod transaction {
    use super::*;

    /// Which table `reference_id` points into.
    ///
    /// Mirrors `engine::ReferenceKind` so this crate stays free of the engine
    /// and its database stack; the server maps one onto the other.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(deserialize_with = "crate::id::deserialize")]
        pub user_id: i32,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        #[serde(deserialize_with = "crate::id::deserialize")]
        pub reference_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        #[serde(deserialize_with = "crate::id::deserialize")]
        pub user_id: i32,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        #[serde(deserialize_with = "crate::id::deserialize")]
        pub reference_id: i32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_kind_uses_type_key() {
        let payload: transaction::TransactionNew =
            serde_json::from_str(r#"{"user_id": 1, "type": "expense", "reference_id": 3}"#)
                .unwrap();
        assert_eq!(payload.kind, transaction::TransactionKind::Expense);
        assert_eq!(payload.reference_id, 3);
    }

    #[test]
    fn ids_accept_numbers_and_numeric_strings() {
        let payload: transaction::TransactionNew = serde_json::from_str(
            r#"{"user_id": "4", "type": "income", "reference_id": " 9 "}"#,
        )
        .unwrap();
        assert_eq!(payload.user_id, 4);
        assert_eq!(payload.reference_id, 9);

        let payload: income::IncomeNew =
            serde_json::from_str(r#"{"user_id": 2, "amount": 10.5}"#).unwrap();
        assert_eq!(payload.user_id, 2);

        assert!(serde_json::from_str::<income::IncomeNew>(r#"{"user_id": "two"}"#).is_err());
        assert!(serde_json::from_str::<income::IncomeNew>(r#"{"user_id": 1.5}"#).is_err());
    }

    #[test]
    fn health_omits_database_when_unknown() {
        let body = serde_json::to_string(&health::HealthStatus {
            status: "ok".to_string(),
            database: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"status":"ok"}"#);
    }
}
