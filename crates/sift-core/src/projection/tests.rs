use super::*;
use crate::{
    expr::FieldReader,
    test_fixtures::{Record, RecordView, record_projection, records},
    value::{FieldType, Value},
};

#[test]
fn macro_projection_declares_fields_in_order() {
    let projection = record_projection();

    let names: Vec<_> = projection.field_names().collect();
    assert_eq!(names, vec!["id", "bar", "score", "tags"]);

    let types: Vec<_> = projection.fields().iter().map(|f| f.expr.ty().clone()).collect();
    assert_eq!(
        types,
        vec![
            FieldType::Int,
            FieldType::Text,
            FieldType::Int,
            FieldType::list_of(FieldType::Text),
        ]
    );
    assert_eq!(projection.bindings().len(), 4);
}

#[test]
fn macro_constructor_matches_the_bindings() {
    let projection = record_projection();
    let record = records().remove(5);

    let view = projection.construct(&record);
    assert_eq!(
        view,
        RecordView {
            id: 5,
            bar: "5".into(),
            score: None,
            tags: vec!["t0".into(), "t1".into()],
        }
    );

    let reader = projection.bindings().reader(&record);
    assert_eq!(reader.scalar(0), Value::Int(5));
    assert_eq!(reader.scalar(1), Value::Text("5".into()));
    assert_eq!(reader.scalar(2), Value::Null);
    assert_eq!(reader.sequence(3).count(), 2);
    assert_eq!(
        reader.scalar(3),
        Value::List(vec![Value::Text("t0".into()), Value::Text("t1".into())])
    );
    assert_eq!(reader.scalar(99), Value::Null);
}

#[test]
fn list_fields_are_materialized_sequences() {
    let projection = record_projection();
    let tags = &projection.fields()[3];

    assert!(matches!(
        tags.expr,
        Expr::Materialize {
            kind: MaterializeKind::List,
            ..
        }
    ));
    assert!(matches!(tags.expr.dehydrate(), Expr::Sequence { slot: 3, .. }));
}

#[test]
fn builder_supports_lazy_and_array_sequences() {
    let projection = Projection::<Record, i64>::builder(|record: &Record| record.id)
        .sequence::<String, _>("lazy", |record| Box::new(record.tags.iter().cloned()))
        .array::<String, _>("snapshot", |record| Box::new(record.tags.iter().cloned()))
        .build()
        .expect("sequence projection should build");

    assert!(matches!(projection.fields()[0].expr, Expr::Sequence { .. }));
    assert!(matches!(
        projection.fields()[1].expr,
        Expr::Materialize {
            kind: MaterializeKind::Array,
            ..
        }
    ));
}

#[test]
fn empty_projection_is_unsupported() {
    let err = Projection::<Record, i64>::builder(|record: &Record| record.id)
        .build()
        .expect_err("empty projection should fail");

    assert!(matches!(err, QueryError::UnsupportedShape { .. }));
}

#[test]
fn computed_member_names_are_unsupported() {
    let err = Projection::<Record, i64>::builder(|record: &Record| record.id)
        .field("id + 1", |record: &Record| record.id + 1)
        .build()
        .expect_err("computed name should fail");

    assert!(matches!(err, QueryError::UnsupportedShape { .. }));
    assert!(err.to_string().contains("id + 1"), "message: {err}");
}

#[test]
fn duplicate_member_names_are_unsupported() {
    let err = Projection::<Record, i64>::builder(|record: &Record| record.id)
        .field("id", |record: &Record| record.id)
        .field("id", |record: &Record| record.id)
        .build()
        .expect_err("duplicate name should fail");

    assert!(matches!(err, QueryError::UnsupportedShape { .. }));
}

#[test]
fn closures_act_as_mapping_providers() {
    let provider = || -> Result<Projection<Record, RecordView>, QueryError> {
        Ok(record_projection())
    };
    let projection = MappingProvider::<Record, RecordView>::projection(&provider)
        .expect("provider should supply a projection");

    assert_eq!(projection.fields().len(), 4);
}
