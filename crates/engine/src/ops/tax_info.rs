use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, NewTaxInfo, ResultEngine, TaxInfo, TaxInfoChanges, tax_info,
    util::set_nullable_if_some,
};

use super::Engine;

const NOT_FOUND: &str = "Registro de impuestos no encontrado";

impl Engine {
    pub async fn tax_infos(&self) -> ResultEngine<Vec<TaxInfo>> {
        Ok(tax_info::Entity::find()
            .order_by_desc(tax_info::Column::TaxInfoId)
            .all(&self.database)
            .await?)
    }

    pub async fn tax_info_for_user(&self, user_id: i32) -> ResultEngine<TaxInfo> {
        tax_info::Entity::find()
            .filter(tax_info::Column::UserId.eq(user_id))
            .order_by_asc(tax_info::Column::TaxInfoId)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn create_tax_info(&self, cmd: NewTaxInfo) -> ResultEngine<TaxInfo> {
        let now = Utc::now();
        let active = tax_info::ActiveModel {
            user_id: ActiveValue::Set(cmd.user_id),
            gross_income: ActiveValue::Set(cmd.gross_income),
            taxable_income: ActiveValue::Set(cmd.taxable_income),
            tax_paid: ActiveValue::Set(cmd.tax_paid),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        Ok(active.insert(&self.database).await?)
    }

    pub async fn update_tax_info(
        &self,
        tax_info_id: i32,
        changes: TaxInfoChanges,
    ) -> ResultEngine<TaxInfo> {
        let model = tax_info::Entity::find_by_id(tax_info_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(NOT_FOUND.to_string()))?;

        let mut active: tax_info::ActiveModel = model.into();
        set_nullable_if_some(&mut active.gross_income, changes.gross_income);
        set_nullable_if_some(&mut active.taxable_income, changes.taxable_income);
        set_nullable_if_some(&mut active.tax_paid, changes.tax_paid);
        active.updated_at = ActiveValue::Set(Utc::now());
        Ok(active.update(&self.database).await?)
    }

    pub async fn delete_tax_info(&self, tax_info_id: i32) -> ResultEngine<()> {
        self.delete_row::<tax_info::Entity>(tax_info_id, NOT_FOUND)
            .await
    }
}
