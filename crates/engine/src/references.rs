//! Existence reads against the allow-listed `(table, column)` pairs.
//!
//! Identifiers that end up interpolated into SQL only ever come from
//! [`Reference`], a closed enum known at compile time. Values are always bound
//! as statement parameters.

use sea_orm::{
    ConnectionTrait, DbBackend, Statement,
    sea_query::{Alias, Expr, Query},
};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// A column that may be probed for existence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reference {
    UserAccount,
    Income,
    Expense,
    FinancialProfile,
    TaxInfo,
    Transaction,
}

impl Reference {
    pub fn table(self) -> &'static str {
        match self {
            Self::UserAccount => "user_account",
            Self::Income => "income",
            Self::Expense => "expense",
            Self::FinancialProfile => "financial_profile",
            Self::TaxInfo => "tax_info",
            Self::Transaction => "transaction",
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::UserAccount => "user_id",
            Self::Income => "income_id",
            Self::Expense => "expense_id",
            Self::FinancialProfile => "profile_id",
            Self::TaxInfo => "tax_info_id",
            Self::Transaction => "transaction_id",
        }
    }
}

/// Discriminant of a transaction's polymorphic `reference_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Income,
    Expense,
}

impl ReferenceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Table and column a `reference_id` of this kind points into.
    pub fn target(self) -> Reference {
        match self {
            Self::Income => Reference::Income,
            Self::Expense => Reference::Expense,
        }
    }
}

impl TryFrom<&str> for ReferenceKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(EngineError::InvalidField(
                "type inválido (income o expense)".to_string(),
            )),
        }
    }
}

/// Returns whether at least one row of `reference.table()` has
/// `reference.column() = id`.
///
/// Issues exactly one read-only statement.
pub async fn exists<C>(db: &C, reference: Reference, id: i64) -> ResultEngine<bool>
where
    C: ConnectionTrait,
{
    let statement = exists_statement(db.get_database_backend(), reference, id);
    Ok(db.query_one(statement).await?.is_some())
}

pub(crate) fn exists_statement(backend: DbBackend, reference: Reference, id: i64) -> Statement {
    let query = Query::select()
        .expr(Expr::cust("1"))
        .from(Alias::new(reference.table()))
        .and_where(Expr::col(Alias::new(reference.column())).eq(id))
        .limit(1)
        .to_owned();
    backend.build(&query)
}

#[cfg(test)]
mod tests {
    use sea_orm::Value;

    use super::*;

    #[test]
    fn kinds_map_to_their_own_table() {
        assert_eq!(ReferenceKind::Income.target(), Reference::Income);
        assert_eq!(ReferenceKind::Expense.target(), Reference::Expense);
        assert_eq!(Reference::Income.column(), "income_id");
        assert_eq!(Reference::Expense.column(), "expense_id");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        for raw in ["transfer", "INCOME", "", "income "] {
            assert_eq!(
                ReferenceKind::try_from(raw),
                Err(EngineError::InvalidField(
                    "type inválido (income o expense)".to_string()
                ))
            );
        }
        assert_eq!(ReferenceKind::try_from("expense"), Ok(ReferenceKind::Expense));
    }

    #[test]
    fn statement_quotes_identifiers_and_binds_the_id() {
        let statement = exists_statement(DbBackend::Postgres, Reference::UserAccount, 7);
        assert!(
            statement
                .sql
                .starts_with(r#"SELECT 1 FROM "user_account" WHERE "user_id" = $1"#),
            "unexpected sql: {}",
            statement.sql
        );
        assert!(statement.sql.contains("LIMIT"));
        let values = statement.values.map(|values| values.0).unwrap_or_default();
        assert_eq!(values.first(), Some(&Value::BigInt(Some(7))));
    }

    #[test]
    fn transaction_table_name_is_quoted() {
        let statement = exists_statement(DbBackend::Sqlite, Reference::Transaction, 1);
        assert!(
            statement
                .sql
                .contains(r#"FROM "transaction" WHERE "transaction_id" = ?"#)
        );
    }
}
