//! Initial schema.
//!
//! - `user_account`: account holders
//! - `income` / `expense`: money in and out, owned by a user
//! - `financial_profile`: per-user financial snapshot
//! - `tax_info`: per-user tax figures
//! - `transaction`: ledger entries; `reference_id` points into `income` or
//!   `expense` depending on `type` and therefore has no foreign key

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum UserAccount {
    Table,
    UserId,
    FirstName,
    LastName,
    Occupation,
    Phone,
    Password,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Income {
    Table,
    IncomeId,
    UserId,
    Category,
    Type,
    Amount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Expense {
    Table,
    ExpenseId,
    UserId,
    Type,
    Amount,
    Category,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum FinancialProfile {
    Table,
    ProfileId,
    UserId,
    Income,
    Expenses,
    Savings,
    RiskTolerance,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TaxInfo {
    Table,
    TaxInfoId,
    UserId,
    GrossIncome,
    TaxableIncome,
    TaxPaid,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
#[iden = "transaction"]
enum Ledger {
    Table,
    TransactionId,
    UserId,
    Type,
    ReferenceId,
    CreatedAt,
}

/// `user_id` column referencing `user_account`, removed with its owner.
fn owner_fk<T>(name: &str, table: T, column: T) -> ForeignKeyCreateStatement
where
    T: Iden + 'static,
{
    ForeignKey::create()
        .name(name)
        .from(table, column)
        .to(UserAccount::Table, UserAccount::UserId)
        .on_delete(ForeignKeyAction::Cascade)
        .on_update(ForeignKeyAction::NoAction)
        .to_owned()
}

fn serial<T: Iden + 'static>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn timestamp<T: Iden + 'static>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAccount::Table)
                    .if_not_exists()
                    .col(&mut serial(UserAccount::UserId))
                    .col(ColumnDef::new(UserAccount::FirstName).string().not_null())
                    .col(ColumnDef::new(UserAccount::LastName).string().not_null())
                    .col(ColumnDef::new(UserAccount::Occupation).string())
                    .col(ColumnDef::new(UserAccount::Phone).string())
                    .col(ColumnDef::new(UserAccount::Password).string().not_null())
                    .col(&mut timestamp(UserAccount::CreatedAt))
                    .col(&mut timestamp(UserAccount::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Income::Table)
                    .if_not_exists()
                    .col(&mut serial(Income::IncomeId))
                    .col(ColumnDef::new(Income::UserId).integer().not_null())
                    .col(ColumnDef::new(Income::Category).string().not_null())
                    .col(ColumnDef::new(Income::Type).string().not_null())
                    .col(ColumnDef::new(Income::Amount).double().not_null())
                    .col(&mut timestamp(Income::CreatedAt))
                    .col(&mut timestamp(Income::UpdatedAt))
                    .foreign_key(&mut owner_fk(
                        "fk-income-user_id",
                        Income::Table,
                        Income::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expense::Table)
                    .if_not_exists()
                    .col(&mut serial(Expense::ExpenseId))
                    .col(ColumnDef::new(Expense::UserId).integer().not_null())
                    .col(ColumnDef::new(Expense::Type).string().not_null())
                    .col(ColumnDef::new(Expense::Amount).double().not_null())
                    .col(ColumnDef::new(Expense::Category).string().not_null())
                    .col(&mut timestamp(Expense::CreatedAt))
                    .col(&mut timestamp(Expense::UpdatedAt))
                    .foreign_key(&mut owner_fk(
                        "fk-expense-user_id",
                        Expense::Table,
                        Expense::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FinancialProfile::Table)
                    .if_not_exists()
                    .col(&mut serial(FinancialProfile::ProfileId))
                    .col(ColumnDef::new(FinancialProfile::UserId).integer().not_null())
                    .col(ColumnDef::new(FinancialProfile::Income).double())
                    .col(ColumnDef::new(FinancialProfile::Expenses).double())
                    .col(
                        ColumnDef::new(FinancialProfile::Savings)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(FinancialProfile::RiskTolerance).string())
                    .col(&mut timestamp(FinancialProfile::CreatedAt))
                    .col(&mut timestamp(FinancialProfile::UpdatedAt))
                    .foreign_key(&mut owner_fk(
                        "fk-financial_profile-user_id",
                        FinancialProfile::Table,
                        FinancialProfile::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TaxInfo::Table)
                    .if_not_exists()
                    .col(&mut serial(TaxInfo::TaxInfoId))
                    .col(ColumnDef::new(TaxInfo::UserId).integer().not_null())
                    .col(ColumnDef::new(TaxInfo::GrossIncome).double())
                    .col(ColumnDef::new(TaxInfo::TaxableIncome).double())
                    .col(ColumnDef::new(TaxInfo::TaxPaid).double())
                    .col(&mut timestamp(TaxInfo::CreatedAt))
                    .col(&mut timestamp(TaxInfo::UpdatedAt))
                    .foreign_key(&mut owner_fk(
                        "fk-tax_info-user_id",
                        TaxInfo::Table,
                        TaxInfo::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ledger::Table)
                    .if_not_exists()
                    .col(&mut serial(Ledger::TransactionId))
                    .col(ColumnDef::new(Ledger::UserId).integer().not_null())
                    .col(ColumnDef::new(Ledger::Type).string().not_null())
                    .col(ColumnDef::new(Ledger::ReferenceId).integer().not_null())
                    .col(&mut timestamp(Ledger::CreatedAt))
                    .foreign_key(&mut owner_fk(
                        "fk-transaction-user_id",
                        Ledger::Table,
                        Ledger::UserId,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transaction-type-reference_id")
                    .table(Ledger::Table)
                    .col(Ledger::Type)
                    .col(Ledger::ReferenceId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dependents first.
        manager
            .drop_table(Table::drop().table(Ledger::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TaxInfo::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FinancialProfile::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expense::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Income::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserAccount::Table).to_owned())
            .await?;
        Ok(())
    }
}
