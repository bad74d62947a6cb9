use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, PrimaryKeyTrait, Statement,
};

use crate::{EngineError, ResultEngine};

mod expenses;
mod financial_profiles;
mod incomes;
mod tax_info;
mod transactions;
mod users;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The connection pool the engine runs its statements on.
    pub fn database(&self) -> &DatabaseConnection {
        &self.database
    }

    /// Run a trivial read to prove the store is reachable.
    pub async fn ping(&self) -> ResultEngine<()> {
        let backend = self.database.get_database_backend();
        self.database
            .query_one(Statement::from_string(backend, "SELECT 1"))
            .await?;
        Ok(())
    }

    /// Delete one row by primary key, reporting `missing` when nothing was
    /// removed.
    async fn delete_row<E>(&self, id: i32, missing: &str) -> ResultEngine<()>
    where
        E: EntityTrait,
        i32: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        let result = E::delete_by_id(id).exec(&self.database).await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound(missing.to_string()));
        }
        Ok(())
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
