//! Ledger entries.
//!
//! Writes trust that `(kind, reference_id)` was resolved beforehand by a
//! [`Stage::Reference`](crate::guard::Stage::Reference) check; between that
//! check and the write the referenced row may still disappear.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, NewTransaction, ResultEngine, Transaction, TransactionChanges, transaction,
    util::set_if_some,
};

use super::Engine;

const NOT_FOUND: &str = "Transacción no encontrada";

impl Engine {
    /// All transactions, most recent id first.
    pub async fn transactions(&self) -> ResultEngine<Vec<Transaction>> {
        Ok(transaction::Entity::find()
            .order_by_desc(transaction::Column::TransactionId)
            .all(&self.database)
            .await?)
    }

    /// Transactions of one user, newest first.
    pub async fn transactions_for_user(&self, user_id: i32) -> ResultEngine<Vec<Transaction>> {
        Ok(transaction::Entity::find()
            .filter(transaction::Column::UserId.eq(user_id))
            .order_by_desc(transaction::Column::CreatedAt)
            .all(&self.database)
            .await?)
    }

    pub async fn create_transaction(&self, cmd: NewTransaction) -> ResultEngine<Transaction> {
        let active = transaction::ActiveModel {
            user_id: ActiveValue::Set(cmd.user_id),
            kind: ActiveValue::Set(cmd.kind.as_str().to_string()),
            reference_id: ActiveValue::Set(cmd.reference_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        Ok(active.insert(&self.database).await?)
    }

    pub async fn update_transaction(
        &self,
        transaction_id: i32,
        changes: TransactionChanges,
    ) -> ResultEngine<Transaction> {
        let model = transaction::Entity::find_by_id(transaction_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(NOT_FOUND.to_string()))?;

        let mut active: transaction::ActiveModel = model.into();
        set_if_some(&mut active.user_id, changes.user_id);
        set_if_some(
            &mut active.kind,
            changes.kind.map(|kind| kind.as_str().to_string()),
        );
        set_if_some(&mut active.reference_id, changes.reference_id);
        Ok(active.update(&self.database).await?)
    }

    pub async fn delete_transaction(&self, transaction_id: i32) -> ResultEngine<()> {
        self.delete_row::<transaction::Entity>(transaction_id, NOT_FOUND)
            .await
    }
}
