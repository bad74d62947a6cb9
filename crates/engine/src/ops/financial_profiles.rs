use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, FinancialProfile, FinancialProfileChanges, NewFinancialProfile, ResultEngine,
    financial_profile,
    util::{set_if_some, set_nullable_if_some},
};

use super::Engine;

const NOT_FOUND: &str = "Perfil financiero no encontrado";

impl Engine {
    /// All profiles, most recent id first.
    pub async fn financial_profiles(&self) -> ResultEngine<Vec<FinancialProfile>> {
        Ok(financial_profile::Entity::find()
            .order_by_desc(financial_profile::Column::ProfileId)
            .all(&self.database)
            .await?)
    }

    /// The profile of a user.
    ///
    /// The store does not enforce one profile per user; when several exist the
    /// one with the lowest id is returned.
    pub async fn financial_profile_for_user(&self, user_id: i32) -> ResultEngine<FinancialProfile> {
        financial_profile::Entity::find()
            .filter(financial_profile::Column::UserId.eq(user_id))
            .order_by_asc(financial_profile::Column::ProfileId)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn create_financial_profile(
        &self,
        cmd: NewFinancialProfile,
    ) -> ResultEngine<FinancialProfile> {
        let now = Utc::now();
        let active = financial_profile::ActiveModel {
            user_id: ActiveValue::Set(cmd.user_id),
            income: ActiveValue::Set(cmd.income),
            expenses: ActiveValue::Set(cmd.expenses),
            savings: ActiveValue::Set(cmd.savings.unwrap_or(0.0)),
            risk_tolerance: ActiveValue::Set(cmd.risk_tolerance),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        Ok(active.insert(&self.database).await?)
    }

    pub async fn update_financial_profile(
        &self,
        profile_id: i32,
        changes: FinancialProfileChanges,
    ) -> ResultEngine<FinancialProfile> {
        let model = financial_profile::Entity::find_by_id(profile_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(NOT_FOUND.to_string()))?;

        let mut active: financial_profile::ActiveModel = model.into();
        set_nullable_if_some(&mut active.income, changes.income);
        set_nullable_if_some(&mut active.expenses, changes.expenses);
        set_if_some(&mut active.savings, changes.savings);
        set_nullable_if_some(&mut active.risk_tolerance, changes.risk_tolerance);
        active.updated_at = ActiveValue::Set(Utc::now());
        Ok(active.update(&self.database).await?)
    }

    pub async fn delete_financial_profile(&self, profile_id: i32) -> ResultEngine<()> {
        self.delete_row::<financial_profile::Entity>(profile_id, NOT_FOUND)
            .await
    }
}
