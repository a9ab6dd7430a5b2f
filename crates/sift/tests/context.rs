mod common;

use common::*;
use rust_decimal::Decimal;
use sift::{
    core::{
        error::QueryError,
        expr::{Comparison, Expr},
    },
    error::{ErrorKind, ErrorOrigin, QueryErrorKind},
    prelude::*,
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

fn compile_error<In, Out>(sift: &Sift<In, Out>, text: &str) -> Error {
    sift.compile_json(text)
        .err()
        .expect("query should be rejected")
}

#[test]
fn keys_follow_declaration_order() {
    let sift = product_sift();
    let keys: Vec<_> = sift.keys().collect();

    assert_eq!(
        keys,
        vec!["id", "name", "price", "listed", "discontinued", "tags", "ratings"]
    );
}

#[test]
fn malformed_documents_are_decode_errors() {
    let sift = item_sift();

    for text in [
        "{",
        r#"{"filter": {}}"#,
        r#"{"filter": {"where": {"key": "bar", "operator": "BETWEEN", "value": 1}}}"#,
        r#"{"filter": {"and": [], "or": []}}"#,
        r#"{"page": {"num": 0, "size": 5}}"#,
    ] {
        let err = compile_error(&sift, text);

        assert_eq!(err.kind, ErrorKind::Decode, "document {text}");
        assert_eq!(err.origin, ErrorOrigin::Wire);
    }
}

#[test]
fn compile_failures_keep_their_kind() {
    let sift = item_sift();

    let unknown = compile_error(
        &sift,
        r#"{"filter": {"where": {"key": "missing", "operator": "EQ", "value": 1}}}"#,
    );
    assert_eq!(unknown.kind, ErrorKind::Query(QueryErrorKind::UnknownKey));
    assert!(unknown.message.contains("missing"));

    let unordered = compile_error(&sift, r#"{"order": {"by": "nope"}}"#);
    assert_eq!(unordered.kind, ErrorKind::Query(QueryErrorKind::UnknownKey));

    let no_handler = compile_error(
        &sift,
        r#"{"filter": {"where": {"key": "id", "operator": "LI", "value": 4}}}"#,
    );
    assert_eq!(no_handler.kind, ErrorKind::Query(QueryErrorKind::NoHandler));
    assert_eq!(no_handler.origin, ErrorOrigin::Compile);

    let empty = compile_error(&sift, r#"{"filter": {"or": []}}"#);
    assert_eq!(empty.kind, ErrorKind::Query(QueryErrorKind::Invalid));
}

#[test]
fn errors_serialize_with_kind_and_origin() {
    let sift = item_sift();
    let err = compile_error(
        &sift,
        r#"{"filter": {"where": {"key": "missing", "operator": "EQ", "value": 1}}}"#,
    );

    let json = serde_json::to_value(&err).expect("error should serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "kind": {"Query": "UnknownKey"},
            "origin": "Compile",
            "message": "unknown key 'missing'"
        })
    );

    let decoded: Error = serde_json::from_value(json).expect("error should deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn iso_looking_literals_do_not_match_text_fields() {
    let sift = item_sift();

    for operator in ["EQ", "LI"] {
        let err = compile_error(
            &sift,
            &format!(
                r#"{{"filter": {{"where": {{"key": "bar", "operator": "{operator}", "value": "2024-03-01"}}}}}}"#
            ),
        );
        assert_eq!(
            err.kind,
            ErrorKind::Query(QueryErrorKind::NoHandler),
            "operator {operator}"
        );
    }

    sift.compile_json(
        r#"{"filter": {"where": {"key": "bar", "operator": "LI", "value": "2024-03-%"}}}"#,
    )
    .expect("non-instant pattern should compile");
}

#[test]
fn quantifier_on_scalar_field_has_no_handler() {
    let sift = item_sift();
    let err = compile_error(
        &sift,
        r#"{"filter": {"where": {"key": "id", "operator": "All",
            "value": {"where": {"key": "value", "operator": "GT", "value": 1}}}}}"#,
    );

    assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::NoHandler));
}

#[test]
fn quantifier_body_cannot_see_outer_members() {
    let sift = parent_sift();
    let err = compile_error(
        &sift,
        r#"{"filter": {"where": {"key": "child_ids", "operator": "Any",
            "value": {"where": {"key": "id", "operator": "GT", "value": 1}}}}}"#,
    );

    assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::UnknownKey));
}

#[test]
fn colliding_names_under_case_folding_are_unsupported() {
    struct Pair {
        id: i64,
    }

    #[allow(dead_code, non_snake_case)]
    struct PairDto {
        id: i64,
        ID: i64,
    }

    let projection = projection!(Pair => PairDto {
        id: i64 = |pair| pair.id,
        ID: i64 = |pair| pair.id,
    })
    .expect("distinct names should build");

    let err = Sift::new(projection.clone())
        .err()
        .expect("folded names should collide");
    assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::Unsupported));
    assert_eq!(err.origin, ErrorOrigin::Projection);

    let config = QueryConfig::default().with_key_comparer(KeyComparer::Ordinal);
    let sift = Sift::with_config(projection, config).expect("ordinal keys should not collide");
    assert_eq!(sift.keys().count(), 2);
}

#[tokio::test]
async fn ordinal_comparer_rejects_other_casing() {
    let config = QueryConfig::from_toml_str(
        r#"
        key_comparer = "ordinal"
        default_page_size = 4
        "#,
    )
    .expect("config should parse");
    let projection = product_projection().expect("product projection should build");
    let sift = Sift::with_config(projection, config).expect("context should build");

    let err = compile_error(&sift, r#"{"order": {"by": "Name"}}"#);
    assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::UnknownKey));

    let compiled = sift
        .compile_json(r#"{"order": {"by": "name"}, "page": {"num": 1}}"#)
        .expect("exact casing should compile");
    let envelope = compiled
        .search(&MemorySource::new(products()))
        .await
        .expect("search should succeed");

    assert_eq!(ids(&envelope, |dto| dto.id), vec![1, 2, 3, 4]);
    assert_eq!((envelope.from, envelope.to, envelope.total), (1, 4, 6));
}

#[test]
fn invalid_config_is_a_config_error() {
    let err: Error = QueryConfig::from_toml_str("default_page_size = 0")
        .map_err(Error::from)
        .expect_err("zero page size should be rejected");
    assert_eq!(err.kind, ErrorKind::Config);

    let err: Error = QueryConfig::from_toml_str("page_size = 5")
        .map_err(Error::from)
        .expect_err("unknown settings should be rejected");
    assert_eq!(err.origin, ErrorOrigin::Config);
}

#[test]
fn provider_is_consulted_per_context() {
    let calls = AtomicUsize::new(0);
    let provider = || {
        calls.fetch_add(1, Ordering::SeqCst);
        product_projection()
    };

    let first = Sift::from_provider(&provider, QueryConfig::default())
        .expect("first context should build");
    let second = Sift::from_provider(&provider, QueryConfig::default())
        .expect("second context should build");

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(first.keys().count(), second.keys().count());
}

///
/// ListEquals
///
/// Lets `EQ` on a sequence field mean "some element equals".
///

#[derive(Debug)]
struct ListEquals;

impl OperatorHandler for ListEquals {
    fn name(&self) -> &'static str {
        "list_equals"
    }

    fn try_handle(
        &self,
        _cx: &HandlerContext<'_>,
        operator: Operator,
        field: &Expr,
        value: &Value,
    ) -> Result<Option<Comparison>, QueryError> {
        if operator != Operator::Eq || field.element_type().is_none() {
            return Ok(None);
        }

        let needle = value.clone();

        Ok(Some(Comparison::Custom {
            label: "list_equals".into(),
            field: field.clone(),
            test: Arc::new(move |read: &Value| match read {
                Value::List(items) => items.contains(&needle),
                _ => false,
            }),
        }))
    }
}

///
/// PriceCeiling
///
/// Claims every `LT` on a decimal field and ignores the operand.
///

#[derive(Debug)]
struct PriceCeiling;

impl OperatorHandler for PriceCeiling {
    fn try_handle(
        &self,
        _cx: &HandlerContext<'_>,
        operator: Operator,
        field: &Expr,
        _value: &Value,
    ) -> Result<Option<Comparison>, QueryError> {
        if operator != Operator::Lt || *field.ty() != FieldType::Decimal {
            return Ok(None);
        }

        Ok(Some(Comparison::Custom {
            label: "under_two".into(),
            field: field.clone(),
            test: Arc::new(|read: &Value| {
                matches!(read, Value::Decimal(price) if *price < Decimal::new(2, 0))
            }),
        }))
    }
}

#[tokio::test]
async fn back_handler_fills_gaps_in_the_pipeline() {
    let plain = product_sift();
    let text = r#"{"filter": {"where": {"key": "tags", "operator": "EQ", "value": "metal"}}}"#;

    let err = compile_error(&plain, text);
    assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::NoHandler));

    let extended = product_sift().with_handler_back(ListEquals);
    let envelope = extended
        .compile_json(text)
        .expect("back handler should claim EQ on lists")
        .search(&MemorySource::new(products()))
        .await
        .expect("search should succeed");

    assert_eq!(ids(&envelope, |dto| dto.id), vec![1, 2]);
}

#[tokio::test]
async fn front_handler_overrides_builtins() {
    let sift = product_sift().with_handler_front(PriceCeiling);
    let source = MemorySource::new(products());
    let names: Vec<_> = sift
        .pipeline()
        .handlers()
        .iter()
        .map(|handler| handler.name())
        .collect();

    assert_eq!(names.len(), 4);
    assert_eq!(&names[1..], ["list", "string", "default"]);

    let compiled = sift
        .compile_json(r#"{"filter": {"where": {"key": "price", "operator": "LT", "value": 1000}}}"#)
        .expect("front handler should claim LT on price");
    let explained = compiled.explain();
    assert!(explained.contains("under_two"), "{explained}");

    let envelope = compiled.search(&source).await.expect("search should succeed");
    assert_eq!(ids(&envelope, |dto| dto.id), vec![3, 6]);
}

///
/// Series
///

struct Series {
    id: i64,
    values: Vec<i64>,
}

struct SeriesDto {
    id: i64,
}

#[tokio::test]
async fn any_over_lazy_sequence_stops_at_first_match() {
    let pulled = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pulled);

    let projection = Projection::builder(|row: &Series| SeriesDto { id: row.id })
        .field::<i64, _>("id", |row: &Series| row.id)
        .sequence::<i64, _>("values", move |row: &Series| {
            let counter = Arc::clone(&counter);
            Box::new(row.values.iter().copied().inspect(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
        })
        .build()
        .expect("series projection should build");
    let sift = Sift::new(projection).expect("series context should build");
    let source = MemorySource::new(vec![Series {
        id: 1,
        values: (1..=10).collect(),
    }]);

    let compiled = sift
        .compile(SearchQuery::new().with_filter(FilterNode::any(
            "values",
            FilterNode::compare("value", Operator::Gt, 2_i64),
        )))
        .expect("quantifier should compile");
    let envelope = compiled.search(&source).await.expect("search should succeed");

    assert_eq!(envelope.items.len(), 1);
    assert_eq!(envelope.items[0].id, 1);
    assert_eq!(pulled.load(Ordering::SeqCst), 3);
}
