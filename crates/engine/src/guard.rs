//! Request preconditions.
//!
//! A [`Pipeline`] is an ordered list of [`Stage`]s evaluated against a
//! [`RequestView`] before a terminal operation runs. Stages run one after the
//! other and the first failing stage ends the evaluation.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde_json::Value;

use crate::{
    EngineError, ResultEngine,
    references::{self, Reference, ReferenceKind},
};

/// Part of the inbound request a field is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Body,
    Params,
    Query,
}

/// The parts of an inbound request the stages can look at.
#[derive(Clone, Debug, Default)]
pub struct RequestView {
    pub body: Value,
    pub params: HashMap<String, String>,
    pub query: HashMap<String, String>,
}

impl RequestView {
    pub fn field(&self, source: Source, name: &str) -> Option<Field<'_>> {
        match source {
            Source::Body => self.body.get(name).map(Field::Json),
            Source::Params => self.params.get(name).map(|v| Field::Text(v)),
            Source::Query => self.query.get(name).map(|v| Field::Text(v)),
        }
    }
}

/// A raw field value: JSON from the body, text from the path or query string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Field<'a> {
    Json(&'a Value),
    Text(&'a str),
}

impl Field<'_> {
    /// `null`, `false`, `0` and the empty string count as not provided.
    pub fn is_blank(&self) -> bool {
        match *self {
            Field::Json(Value::Null | Value::Bool(false)) => true,
            Field::Json(Value::Number(n)) => n.as_f64().is_some_and(|n| n == 0.0),
            Field::Json(Value::String(s)) => s.is_empty(),
            Field::Json(_) => false,
            Field::Text(s) => s.is_empty(),
        }
    }

    /// Interprets the value as a row id: a JSON integer, or a decimal string
    /// from any source.
    pub fn as_id(&self) -> Option<i64> {
        match *self {
            Field::Json(Value::Number(n)) => n.as_i64(),
            Field::Json(Value::String(s)) => s.trim().parse().ok(),
            Field::Json(_) => None,
            Field::Text(s) => s.trim().parse().ok(),
        }
    }

    fn as_str(&self) -> Option<&str> {
        match *self {
            Field::Json(Value::String(s)) => Some(s),
            Field::Json(_) => None,
            Field::Text(s) => Some(s),
        }
    }
}

fn present<'a>(request: &'a RequestView, source: Source, name: &str) -> Option<Field<'a>> {
    request.field(source, name).filter(|field| !field.is_blank())
}

/// One precondition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// `request[source][field]` must name an existing row of `reference`.
    Exists {
        reference: Reference,
        source: Source,
        field: &'static str,
    },
    /// Body `type` / `reference_id` must name an existing income or expense.
    Reference,
}

impl Stage {
    pub async fn check<C>(&self, db: &C, request: &RequestView) -> ResultEngine<()>
    where
        C: ConnectionTrait,
    {
        match *self {
            Stage::Exists {
                reference,
                source,
                field,
            } => check_exists(db, request, reference, source, field).await,
            Stage::Reference => check_reference(db, request).await,
        }
    }
}

/// Ordered preconditions of a route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an existence check on `request[source][field]`.
    pub fn exists(mut self, reference: Reference, source: Source, field: &'static str) -> Self {
        self.stages.push(Stage::Exists {
            reference,
            source,
            field,
        });
        self
    }

    /// Append the polymorphic `type` / `reference_id` check.
    pub fn reference(mut self) -> Self {
        self.stages.push(Stage::Reference);
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order, stopping at the first failure.
    pub async fn run<C>(&self, db: &C, request: &RequestView) -> ResultEngine<()>
    where
        C: ConnectionTrait,
    {
        for stage in &self.stages {
            if let Err(err) = stage.check(db, request).await {
                tracing::debug!(?stage, "precondition failed: {err}");
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Fails unless `request[source][field]` is an id present in `reference`.
pub async fn check_exists<C>(
    db: &C,
    request: &RequestView,
    reference: Reference,
    source: Source,
    field: &str,
) -> ResultEngine<()>
where
    C: ConnectionTrait,
{
    let value = present(request, source, field).ok_or_else(|| EngineError::required(field))?;
    let id = value.as_id().ok_or_else(|| EngineError::invalid(field))?;

    if !references::exists(db, reference, id).await? {
        return Err(EngineError::NotFound(format!(
            "{} no encontrado",
            reference.table()
        )));
    }
    Ok(())
}

/// Fails unless body `reference_id` names a live row in the table selected by
/// body `type`.
pub async fn check_reference<C>(db: &C, request: &RequestView) -> ResultEngine<()>
where
    C: ConnectionTrait,
{
    let (Some(kind), Some(reference_id)) = (
        present(request, Source::Body, "type"),
        present(request, Source::Body, "reference_id"),
    ) else {
        return Err(EngineError::MissingField(
            "type y reference_id son obligatorios".to_string(),
        ));
    };

    let kind = kind
        .as_str()
        .ok_or_else(|| EngineError::InvalidField("type inválido (income o expense)".to_string()))
        .and_then(ReferenceKind::try_from)?;
    let id = reference_id
        .as_id()
        .ok_or_else(|| EngineError::invalid("reference_id"))?;

    let target = kind.target();
    if !references::exists(db, target, id).await? {
        return Err(EngineError::NotFound(format!(
            "reference_id no encontrado en {}",
            target.table()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Transaction, Value as DbValue};
    use serde_json::json;

    use super::*;
    use crate::references::exists_statement;

    fn row() -> BTreeMap<&'static str, DbValue> {
        BTreeMap::from([("1", DbValue::Int(Some(1)))])
    }

    fn no_rows() -> Vec<BTreeMap<&'static str, DbValue>> {
        Vec::new()
    }

    fn body(value: Value) -> RequestView {
        RequestView {
            body: value,
            ..Default::default()
        }
    }

    #[test]
    fn blank_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(Field::Json(&value).is_blank(), "{value} should be blank");
        }
        for value in [json!(1), json!("0"), json!(true), json!([]), json!({})] {
            assert!(!Field::Json(&value).is_blank(), "{value} should be present");
        }
        assert!(Field::Text("").is_blank());
        assert!(!Field::Text("0").is_blank());
    }

    #[test]
    fn ids_from_numbers_and_strings() {
        assert_eq!(Field::Json(&json!(5)).as_id(), Some(5));
        assert_eq!(Field::Json(&json!("12")).as_id(), Some(12));
        assert_eq!(Field::Json(&json!(" 7 ")).as_id(), Some(7));
        assert_eq!(Field::Json(&json!("12a")).as_id(), None);
        assert_eq!(Field::Text("42").as_id(), Some(42));
        assert_eq!(Field::Json(&json!(1.5)).as_id(), None);
        assert_eq!(Field::Json(&json!(true)).as_id(), None);
        assert_eq!(Field::Text("abc").as_id(), None);
    }

    #[tokio::test]
    async fn missing_field_fails_before_querying() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let request = body(json!({ "amount": 10 }));

        let err = check_exists(&db, &request, Reference::UserAccount, Source::Body, "user_id")
            .await
            .unwrap_err();

        assert_eq!(err, EngineError::MissingField("user_id es obligatorio".to_string()));
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn non_numeric_id_fails_before_querying() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let request = RequestView {
            params: HashMap::from([("id".to_string(), "abc".to_string())]),
            ..Default::default()
        };

        let err = check_exists(&db, &request, Reference::TaxInfo, Source::Params, "id")
            .await
            .unwrap_err();

        assert_eq!(err, EngineError::InvalidField("id inválido".to_string()));
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn existing_row_passes_with_one_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row()]])
            .into_connection();
        let request = body(json!({ "user_id": 1 }));

        check_exists(&db, &request, Reference::UserAccount, Source::Body, "user_id")
            .await
            .unwrap();

        assert_eq!(
            db.into_transaction_log(),
            vec![Transaction::one(exists_statement(
                DatabaseBackend::Postgres,
                Reference::UserAccount,
                1
            ))]
        );
    }

    #[tokio::test]
    async fn numeric_string_in_body_binds_as_integer() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row()]])
            .into_connection();
        let request = body(json!({ "user_id": "5" }));

        check_exists(&db, &request, Reference::UserAccount, Source::Body, "user_id")
            .await
            .unwrap();

        assert_eq!(
            db.into_transaction_log(),
            vec![Transaction::one(exists_statement(
                DatabaseBackend::Postgres,
                Reference::UserAccount,
                5
            ))]
        );
    }

    #[tokio::test]
    async fn missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([no_rows()])
            .into_connection();
        let request = RequestView {
            params: HashMap::from([("userId".to_string(), "9".to_string())]),
            ..Default::default()
        };

        let err = check_exists(&db, &request, Reference::UserAccount, Source::Params, "userId")
            .await
            .unwrap_err();

        assert_eq!(err, EngineError::NotFound("user_account no encontrado".to_string()));
    }

    #[tokio::test]
    async fn query_source_is_supported() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row()]])
            .into_connection();
        let request = RequestView {
            query: HashMap::from([("profile".to_string(), "3".to_string())]),
            ..Default::default()
        };

        check_exists(&db, &request, Reference::FinancialProfile, Source::Query, "profile")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn store_failure_surfaces_raw_message() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();
        let request = body(json!({ "user_id": 1 }));

        let err = check_exists(&db, &request, Reference::UserAccount, Source::Body, "user_id")
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::Database(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn verdict_is_stable_against_unchanged_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([no_rows(), no_rows()])
            .into_connection();
        let request = body(json!({ "user_id": 3 }));

        let first = check_exists(&db, &request, Reference::UserAccount, Source::Body, "user_id").await;
        let second = check_exists(&db, &request, Reference::UserAccount, Source::Body, "user_id").await;

        assert_eq!(first, second);
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn income_reference_queries_income_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row()]])
            .into_connection();
        let request = body(json!({ "type": "income", "reference_id": 5 }));

        check_reference(&db, &request).await.unwrap();

        assert_eq!(
            db.into_transaction_log(),
            vec![Transaction::one(exists_statement(
                DatabaseBackend::Postgres,
                Reference::Income,
                5
            ))]
        );
    }

    #[tokio::test]
    async fn expense_reference_queries_expense_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([no_rows()])
            .into_connection();
        let request = body(json!({ "type": "expense", "reference_id": 8 }));

        let err = check_reference(&db, &request).await.unwrap_err();

        assert_eq!(
            err,
            EngineError::NotFound("reference_id no encontrado en expense".to_string())
        );
        assert_eq!(
            db.into_transaction_log(),
            vec![Transaction::one(exists_statement(
                DatabaseBackend::Postgres,
                Reference::Expense,
                8
            ))]
        );
    }

    #[tokio::test]
    async fn unknown_type_is_rejected_without_query() {
        for kind in [json!("transfer"), json!(1), json!(["income"])] {
            let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
            let request = body(json!({ "type": kind, "reference_id": 5 }));

            let err = check_reference(&db, &request).await.unwrap_err();

            assert_eq!(
                err,
                EngineError::InvalidField("type inválido (income o expense)".to_string())
            );
            assert!(db.into_transaction_log().is_empty());
        }
    }

    #[tokio::test]
    async fn reference_requires_both_fields() {
        for payload in [
            json!({ "type": "income" }),
            json!({ "reference_id": 5 }),
            json!({ "type": "", "reference_id": 5 }),
            json!({ "type": "income", "reference_id": 0 }),
        ] {
            let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

            let err = check_reference(&db, &body(payload)).await.unwrap_err();

            assert_eq!(
                err,
                EngineError::MissingField("type y reference_id son obligatorios".to_string())
            );
            assert!(db.into_transaction_log().is_empty());
        }
    }

    #[tokio::test]
    async fn pipeline_stops_at_first_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([no_rows()])
            .into_connection();
        let pipeline = Pipeline::new()
            .exists(Reference::UserAccount, Source::Body, "user_id")
            .reference();
        let request = body(json!({ "user_id": 2, "type": "income", "reference_id": 5 }));

        let err = pipeline.run(&db, &request).await.unwrap_err();

        assert_eq!(err, EngineError::NotFound("user_account no encontrado".to_string()));
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn pipeline_runs_every_stage_in_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row()], vec![row()]])
            .into_connection();
        let pipeline = Pipeline::new()
            .exists(Reference::UserAccount, Source::Body, "user_id")
            .reference();
        let request = body(json!({ "user_id": 1, "type": "expense", "reference_id": 4 }));

        pipeline.run(&db, &request).await.unwrap();

        assert_eq!(
            db.into_transaction_log(),
            vec![
                Transaction::one(exists_statement(
                    DatabaseBackend::Postgres,
                    Reference::UserAccount,
                    1
                )),
                Transaction::one(exists_statement(
                    DatabaseBackend::Postgres,
                    Reference::Expense,
                    4
                )),
            ]
        );
    }

    #[tokio::test]
    async fn empty_pipeline_never_queries() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        Pipeline::new().run(&db, &RequestView::default()).await.unwrap();

        assert!(db.into_transaction_log().is_empty());
    }
}
