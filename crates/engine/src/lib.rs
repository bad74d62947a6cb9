//! Bookkeeping engine.
//!
//! Owns the table models, the CRUD operations run by the HTTP handlers and
//! the request preconditions ([`guard`]) that check referenced rows exist
//! before a dependent write is attempted.

pub use commands::{
    ExpenseChanges, FinancialProfileChanges, IncomeChanges, NewExpense, NewFinancialProfile,
    NewIncome, NewTaxInfo, NewTransaction, NewUser, TaxInfoChanges, TransactionChanges,
    UserChanges,
};
pub use error::EngineError;
pub use guard::{Pipeline, RequestView, Source, Stage};
pub use ops::{Engine, EngineBuilder};
pub use references::{Reference, ReferenceKind};

pub type UserAccount = user_account::Model;
pub type Income = income::Model;
pub type Expense = expense::Model;
pub type FinancialProfile = financial_profile::Model;
pub type TaxInfo = tax_info::Model;
pub type Transaction = transaction::Model;

pub mod guard;
pub mod references;

mod commands;
mod error;
mod expense;
mod financial_profile;
mod income;
mod ops;
mod tax_info;
mod transaction;
mod user_account;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
