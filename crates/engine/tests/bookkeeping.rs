use std::collections::HashMap;

use sea_orm::{Database, DatabaseConnection};
use serde_json::json;

use engine::{
    Engine, EngineError, ExpenseChanges, FinancialProfileChanges, IncomeChanges, NewExpense,
    NewFinancialProfile, NewIncome, NewTaxInfo, NewTransaction, NewUser, Pipeline, Reference,
    ReferenceKind, RequestView, Source, TaxInfoChanges, TransactionChanges, UserChanges,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn alice(engine: &Engine) -> i32 {
    engine
        .create_user(NewUser {
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            occupation: None,
            phone: None,
            password: "password".to_string(),
        })
        .await
        .unwrap()
        .user_id
}

fn salary(user_id: i32) -> NewIncome {
    NewIncome {
        user_id,
        category: "salary".to_string(),
        kind: "monthly".to_string(),
        amount: 1200.0,
    }
}

fn rent(user_id: i32) -> NewExpense {
    NewExpense {
        user_id,
        kind: "fixed".to_string(),
        amount: 600.0,
        category: "housing".to_string(),
    }
}

fn body(value: serde_json::Value) -> RequestView {
    RequestView {
        body: value,
        ..Default::default()
    }
}

#[tokio::test]
async fn user_crud() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    let updated = engine
        .update_user(
            user_id,
            UserChanges {
                occupation: Some("writer".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.occupation.as_deref(), Some("writer"));
    assert_eq!(updated.first_name, "Alice");
    assert!(updated.updated_at >= updated.created_at);

    assert_eq!(engine.users().await.unwrap().len(), 1);
    engine.delete_user(user_id).await.unwrap();
    assert_eq!(
        engine.user(user_id).await.unwrap_err(),
        EngineError::NotFound("Usuario no encontrado".to_string())
    );
}

#[tokio::test]
async fn income_and_expense_crud() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    let income = engine.create_income(salary(user_id)).await.unwrap();
    let expense = engine.create_expense(rent(user_id)).await.unwrap();

    let income = engine
        .update_income(
            income.income_id,
            IncomeChanges {
                amount: Some(1300.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(income.amount, 1300.0);
    assert_eq!(income.category, "salary");

    let expense = engine
        .update_expense(
            expense.expense_id,
            ExpenseChanges {
                category: Some("rent".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(expense.category, "rent");

    assert_eq!(engine.incomes_for_user(user_id).await.unwrap().len(), 1);
    assert_eq!(engine.expenses_for_user(user_id).await.unwrap().len(), 1);

    engine.delete_expense(expense.expense_id).await.unwrap();
    assert_eq!(
        engine.delete_expense(expense.expense_id).await.unwrap_err(),
        EngineError::NotFound("Gasto no encontrado".to_string())
    );
    assert_eq!(
        engine
            .update_income(99, IncomeChanges::default())
            .await
            .unwrap_err(),
        EngineError::NotFound("Ingreso no encontrado".to_string())
    );
}

#[tokio::test]
async fn financial_profile_and_tax_info_per_user() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;

    let profile = engine
        .create_financial_profile(NewFinancialProfile {
            user_id,
            income: Some(1200.0),
            expenses: None,
            savings: None,
            risk_tolerance: None,
        })
        .await
        .unwrap();
    assert_eq!(profile.savings, 0.0);

    let profile = engine
        .update_financial_profile(
            profile.profile_id,
            FinancialProfileChanges {
                risk_tolerance: Some("medium".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(profile.income, Some(1200.0));
    assert_eq!(
        engine
            .financial_profile_for_user(user_id)
            .await
            .unwrap()
            .risk_tolerance
            .as_deref(),
        Some("medium")
    );

    assert_eq!(
        engine.tax_info_for_user(user_id).await.unwrap_err(),
        EngineError::NotFound("Registro de impuestos no encontrado".to_string())
    );
    let record = engine
        .create_tax_info(NewTaxInfo {
            user_id,
            gross_income: Some(20000.0),
            taxable_income: None,
            tax_paid: None,
        })
        .await
        .unwrap();
    let record = engine
        .update_tax_info(
            record.tax_info_id,
            TaxInfoChanges {
                tax_paid: Some(3100.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(record.gross_income, Some(20000.0));
    assert_eq!(record.tax_paid, Some(3100.0));

    engine.delete_tax_info(record.tax_info_id).await.unwrap();
    assert!(engine.tax_infos().await.unwrap().is_empty());
}

#[tokio::test]
async fn transaction_kind_is_stored_as_text() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;
    let income = engine.create_income(salary(user_id)).await.unwrap();
    let expense = engine.create_expense(rent(user_id)).await.unwrap();

    let tx = engine
        .create_transaction(NewTransaction {
            user_id,
            kind: ReferenceKind::Income,
            reference_id: income.income_id,
        })
        .await
        .unwrap();
    assert_eq!(tx.kind, "income");

    let tx = engine
        .update_transaction(
            tx.transaction_id,
            TransactionChanges {
                kind: Some(ReferenceKind::Expense),
                reference_id: Some(expense.expense_id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(tx.kind, "expense");
    assert_eq!(tx.reference_id, expense.expense_id);

    assert_eq!(engine.transactions_for_user(user_id).await.unwrap().len(), 1);
    engine.delete_transaction(tx.transaction_id).await.unwrap();
    assert_eq!(
        engine.delete_transaction(tx.transaction_id).await.unwrap_err(),
        EngineError::NotFound("Transacción no encontrada".to_string())
    );
}

#[tokio::test]
async fn deleting_user_cascades() {
    let (engine, _db) = engine_with_db().await;
    let user_id = alice(&engine).await;
    engine.create_income(salary(user_id)).await.unwrap();
    engine.create_expense(rent(user_id)).await.unwrap();

    engine.delete_user(user_id).await.unwrap();

    assert!(engine.incomes().await.unwrap().is_empty());
    assert!(engine.expenses().await.unwrap().is_empty());
}

#[tokio::test]
async fn ping_reaches_the_store() {
    let (engine, _db) = engine_with_db().await;
    engine.ping().await.unwrap();
}

#[tokio::test]
async fn pipeline_against_sqlite() {
    let (engine, db) = engine_with_db().await;
    let user_id = alice(&engine).await;
    let income = engine.create_income(salary(user_id)).await.unwrap();

    let pipeline = Pipeline::new()
        .exists(Reference::UserAccount, Source::Body, "user_id")
        .reference();

    let ok = body(json!({"user_id": user_id, "type": "income", "reference_id": income.income_id}));
    pipeline.run(&db, &ok).await.unwrap();
    pipeline.run(&db, &ok).await.unwrap();

    let wrong_table =
        body(json!({"user_id": user_id, "type": "expense", "reference_id": income.income_id}));
    assert_eq!(
        pipeline.run(&db, &wrong_table).await.unwrap_err(),
        EngineError::NotFound("reference_id no encontrado en expense".to_string())
    );

    let unknown_user = body(json!({"user_id": 404, "type": "income", "reference_id": 1}));
    assert_eq!(
        pipeline.run(&db, &unknown_user).await.unwrap_err(),
        EngineError::NotFound("user_account no encontrado".to_string())
    );
}

#[tokio::test]
async fn path_parameters_are_checked() {
    let (engine, db) = engine_with_db().await;
    let user_id = alice(&engine).await;
    let pipeline = Pipeline::new().exists(Reference::UserAccount, Source::Params, "userId");

    let view = RequestView {
        params: HashMap::from([("userId".to_string(), user_id.to_string())]),
        ..Default::default()
    };
    pipeline.run(&db, &view).await.unwrap();

    let view = RequestView {
        params: HashMap::from([("userId".to_string(), "12x".to_string())]),
        ..Default::default()
    };
    assert_eq!(
        pipeline.run(&db, &view).await.unwrap_err(),
        EngineError::InvalidField("userId inválido".to_string())
    );
}
