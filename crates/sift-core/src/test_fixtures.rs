use crate::{
    compiled::CompiledQuery,
    error::QueryError,
    handler::HandlerPipeline,
    member::{KeyComparer, MemberTable},
    projection::Projection,
    query::SearchQuery,
};
use std::sync::Arc;

///
/// Record
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Record {
    pub id: i64,
    pub bar: String,
    pub score: Option<i64>,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RecordView {
    pub id: i64,
    pub bar: String,
    pub score: Option<i64>,
    pub tags: Vec<String>,
}

/// Nine records with `bar` = "0".."8"; odd ids have no score.
pub(crate) fn records() -> Vec<Record> {
    (0..9)
        .map(|id| Record {
            id,
            bar: id.to_string(),
            score: (id % 2 == 0).then_some(id * 10),
            tags: (0..id % 3).map(|tag| format!("t{tag}")).collect(),
        })
        .collect()
}

pub(crate) fn record_projection() -> Projection<Record, RecordView> {
    crate::projection!(Record => RecordView {
        id: i64 = |r| r.id,
        bar: String = |r| r.bar.clone(),
        score: Option<i64> = |r| r.score,
        tags: list String = |r| Box::new(r.tags.iter().cloned()),
    })
    .expect("record projection should build")
}

///
/// Parent
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Parent {
    pub id: i64,
    pub children: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ParentView {
    pub id: i64,
    pub child_ids: Vec<i64>,
}

/// Ten parents; parent `i` owns `[10 + i, 20 + i]` below five and
/// `[30 + i, 40 + i]` from five on.
pub(crate) fn parents() -> Vec<Parent> {
    (0..10)
        .map(|id| Parent {
            id,
            children: if id < 5 {
                vec![10 + id, 20 + id]
            } else {
                vec![30 + id, 40 + id]
            },
        })
        .collect()
}

pub(crate) fn parent_projection() -> Projection<Parent, ParentView> {
    crate::projection!(Parent => ParentView {
        id: i64 = |p| p.id,
        child_ids: list i64 = |p| Box::new(p.children.iter().copied()),
    })
    .expect("parent projection should build")
}

pub(crate) fn table<In, Out>(projection: &Projection<In, Out>) -> MemberTable {
    MemberTable::from_projection(projection, KeyComparer::IgnoreCase)
        .expect("member table should build")
}

pub(crate) fn compile<In, Out>(
    projection: &Projection<In, Out>,
    query: SearchQuery,
) -> Result<CompiledQuery<In, Out>, QueryError> {
    CompiledQuery::compile(
        Arc::new(projection.clone()),
        Arc::new(table(projection)),
        HandlerPipeline::default(),
        query,
    )
}
