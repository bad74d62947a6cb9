//! Account holders. Every other table references `user_account.user_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub occupation: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::income::Entity")]
    Income,
    #[sea_orm(has_many = "super::expense::Entity")]
    Expense,
    #[sea_orm(has_many = "super::financial_profile::Entity")]
    FinancialProfile,
    #[sea_orm(has_many = "super::tax_info::Entity")]
    TaxInfo,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
}

impl Related<super::income::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Income.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expense.def()
    }
}

impl Related<super::financial_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialProfile.def()
    }
}

impl Related<super::tax_info::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TaxInfo.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
