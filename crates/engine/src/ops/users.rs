use chrono::Utc;
use sea_orm::{ActiveValue, QueryOrder, prelude::*};

use crate::{
    EngineError, NewUser, ResultEngine, UserAccount, UserChanges, user_account,
    util::{set_if_some, set_nullable_if_some},
};

use super::Engine;

const NOT_FOUND: &str = "Usuario no encontrado";

impl Engine {
    /// All users ordered by id.
    pub async fn users(&self) -> ResultEngine<Vec<UserAccount>> {
        Ok(user_account::Entity::find()
            .order_by_asc(user_account::Column::UserId)
            .all(&self.database)
            .await?)
    }

    pub async fn user(&self, user_id: i32) -> ResultEngine<UserAccount> {
        user_account::Entity::find_by_id(user_id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound(NOT_FOUND.to_string()))
    }

    pub async fn create_user(&self, cmd: NewUser) -> ResultEngine<UserAccount> {
        let now = Utc::now();
        let active = user_account::ActiveModel {
            first_name: ActiveValue::Set(cmd.first_name),
            last_name: ActiveValue::Set(cmd.last_name),
            occupation: ActiveValue::Set(cmd.occupation),
            phone: ActiveValue::Set(cmd.phone),
            password: ActiveValue::Set(cmd.password),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        Ok(active.insert(&self.database).await?)
    }

    pub async fn update_user(&self, user_id: i32, changes: UserChanges) -> ResultEngine<UserAccount> {
        let mut active: user_account::ActiveModel = self.user(user_id).await?.into();
        set_if_some(&mut active.first_name, changes.first_name);
        set_if_some(&mut active.last_name, changes.last_name);
        set_nullable_if_some(&mut active.occupation, changes.occupation);
        set_nullable_if_some(&mut active.phone, changes.phone);
        set_if_some(&mut active.password, changes.password);
        active.updated_at = ActiveValue::Set(Utc::now());
        Ok(active.update(&self.database).await?)
    }

    /// Remove a user. Rows owned by the user go with it (`ON DELETE CASCADE`).
    pub async fn delete_user(&self, user_id: i32) -> ResultEngine<()> {
        self.delete_row::<user_account::Entity>(user_id, NOT_FOUND)
            .await
    }
}
