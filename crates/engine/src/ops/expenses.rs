use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, Expense, ExpenseChanges, NewExpense, ResultEngine, expense, util::set_if_some,
};

use super::Engine;

const NOT_FOUND: &str = "Gasto no encontrado";

impl Engine {
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        Ok(expense::Entity::find()
            .order_by_asc(expense::Column::ExpenseId)
            .all(&self.database)
            .await?)
    }

    pub async fn expenses_for_user(&self, user_id: i32) -> ResultEngine<Vec<Expense>> {
        Ok(expense::Entity::find()
            .filter(expense::Column::UserId.eq(user_id))
            .order_by_desc(expense::Column::CreatedAt)
            .all(&self.database)
            .await?)
    }

    pub async fn create_expense(&self, cmd: NewExpense) -> ResultEngine<Expense> {
        let now = Utc::now();
        let active = expense::ActiveModel {
            user_id: ActiveValue::Set(cmd.user_id),
            category: ActiveValue::Set(cmd.category),
            kind: ActiveValue::Set(cmd.kind),
            amount: ActiveValue::Set(cmd.amount),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        Ok(active.insert(&self.database).await?)
    }

    pub async fn update_expense(&self, expense_id: i32, changes: ExpenseChanges) -> ResultEngine<Expense> {
        let model = expense::Entity::find_by_id(expense_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(NOT_FOUND.to_string()))?;

        let mut active: expense::ActiveModel = model.into();
        set_if_some(&mut active.user_id, changes.user_id);
        set_if_some(&mut active.category, changes.category);
        set_if_some(&mut active.kind, changes.kind);
        set_if_some(&mut active.amount, changes.amount);
        active.updated_at = ActiveValue::Set(Utc::now());
        Ok(active.update(&self.database).await?)
    }

    pub async fn delete_expense(&self, expense_id: i32) -> ResultEngine<()> {
        self.delete_row::<expense::Entity>(expense_id, NOT_FOUND)
            .await
    }
}
