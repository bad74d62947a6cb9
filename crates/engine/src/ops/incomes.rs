use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, Income, IncomeChanges, NewIncome, ResultEngine, income, util::set_if_some,
};

use super::Engine;

const NOT_FOUND: &str = "Ingreso no encontrado";

impl Engine {
    /// All income rows ordered by id.
    pub async fn incomes(&self) -> ResultEngine<Vec<Income>> {
        Ok(income::Entity::find()
            .order_by_asc(income::Column::IncomeId)
            .all(&self.database)
            .await?)
    }

    /// Income of one user, newest first.
    pub async fn incomes_for_user(&self, user_id: i32) -> ResultEngine<Vec<Income>> {
        Ok(income::Entity::find()
            .filter(income::Column::UserId.eq(user_id))
            .order_by_desc(income::Column::CreatedAt)
            .all(&self.database)
            .await?)
    }

    pub async fn create_income(&self, cmd: NewIncome) -> ResultEngine<Income> {
        let now = Utc::now();
        let active = income::ActiveModel {
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

    pub async fn update_income(&self, income_id: i32, changes: IncomeChanges) -> ResultEngine<Income> {
        let model = income::Entity::find_by_id(income_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(NOT_FOUND.to_string()))?;

        let mut active: income::ActiveModel = model.into();
        set_if_some(&mut active.user_id, changes.user_id);
        set_if_some(&mut active.category, changes.category);
        set_if_some(&mut active.kind, changes.kind);
        set_if_some(&mut active.amount, changes.amount);
        active.updated_at = ActiveValue::Set(Utc::now());
        Ok(active.update(&self.database).await?)
    }

    pub async fn delete_income(&self, income_id: i32) -> ResultEngine<()> {
        self.delete_row::<income::Entity>(income_id, NOT_FOUND)
            .await
    }
}
