//! Command structs for engine write operations.
//!
//! `New*` structs carry every column a create needs. `*Changes` structs carry
//! the columns an update touches; `None` leaves the stored value as it is.

use crate::ReferenceKind;

#[derive(Clone, Debug)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub occupation: Option<String>,
    pub phone: Option<String>,
    pub password: String,
}

#[derive(Clone, Debug, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub occupation: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewIncome {
    pub user_id: i32,
    pub category: String,
    pub kind: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Default)]
pub struct IncomeChanges {
    pub user_id: Option<i32>,
    pub category: Option<String>,
    pub kind: Option<String>,
    pub amount: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct NewExpense {
    pub user_id: i32,
    pub kind: String,
    pub amount: f64,
    pub category: String,
}

#[derive(Clone, Debug, Default)]
pub struct ExpenseChanges {
    pub user_id: Option<i32>,
    pub kind: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewFinancialProfile {
    pub user_id: i32,
    pub income: Option<f64>,
    pub expenses: Option<f64>,
    /// Defaults to `0` when not provided.
    pub savings: Option<f64>,
    pub risk_tolerance: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct FinancialProfileChanges {
    pub income: Option<f64>,
    pub expenses: Option<f64>,
    pub savings: Option<f64>,
    pub risk_tolerance: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewTaxInfo {
    pub user_id: i32,
    pub gross_income: Option<f64>,
    pub taxable_income: Option<f64>,
    pub tax_paid: Option<f64>,
}

#[derive(Clone, Debug, Default)]
pub struct TaxInfoChanges {
    pub gross_income: Option<f64>,
    pub taxable_income: Option<f64>,
    pub tax_paid: Option<f64>,
}

/// A ledger entry pointing at an income or expense row.
///
/// The referenced row is expected to have been checked by the caller; the
/// engine does not re-read it.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub user_id: i32,
    pub kind: ReferenceKind,
    pub reference_id: i32,
}

#[derive(Clone, Debug, Default)]
pub struct TransactionChanges {
    pub user_id: Option<i32>,
    pub kind: Option<ReferenceKind>,
    pub reference_id: Option<i32>,
}
