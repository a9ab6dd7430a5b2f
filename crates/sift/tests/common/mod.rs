#![allow(dead_code)]

use rust_decimal::Decimal;
use sift::prelude::*;
use std::sync::Once;
use time::{Date, Month, OffsetDateTime, Time};

static TRACING: Once = Once::new();

/// Install a test subscriber once; `RUST_LOG=sift=trace` shows handler decisions.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

///
/// Item
///

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: i64,
    pub bar: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemDto {
    pub id: i64,
    pub bar: String,
}

/// Nine items with `bar` = "0".."8".
pub fn items() -> Vec<Item> {
    (0..9)
        .map(|id| Item {
            id,
            bar: id.to_string(),
        })
        .collect()
}

pub fn item_sift() -> Sift<Item, ItemDto> {
    let projection = projection!(Item => ItemDto {
        id: i64 = |item| item.id,
        bar: String = |item| item.bar.clone(),
    })
    .expect("item projection should build");

    Sift::new(projection).expect("item context should build")
}

///
/// Parent
///

#[derive(Clone, Debug, PartialEq)]
pub struct Child {
    pub id: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parent {
    pub id: i64,
    pub children: Vec<Child>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParentDto {
    pub id: i64,
    pub child_ids: Vec<i64>,
}

/// Ten parents with two children each: `[10 + i, 20 + i]` below five,
/// `[30 + i, 40 + i]` from five on.
pub fn parents() -> Vec<Parent> {
    (0..10)
        .map(|id| {
            let (first, second) = if id < 5 { (10, 20) } else { (30, 40) };

            Parent {
                id,
                children: vec![Child { id: first + id }, Child { id: second + id }],
            }
        })
        .collect()
}

pub fn parent_sift() -> Sift<Parent, ParentDto> {
    let projection = projection!(Parent => ParentDto {
        id: i64 = |parent| parent.id,
        child_ids: list i64 = |parent| Box::new(parent.children.iter().map(|child| child.id)),
    })
    .expect("parent projection should build");

    Sift::new(projection).expect("parent context should build")
}

///
/// Product
///

#[derive(Clone, Debug, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub listed: OffsetDateTime,
    pub discontinued: bool,
    pub tags: Vec<String>,
    pub ratings: Vec<i64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub listed: OffsetDateTime,
    pub discontinued: bool,
    pub tags: Vec<String>,
    pub ratings: Vec<i64>,
}

fn listed_on(day: u8) -> OffsetDateTime {
    Date::from_calendar_date(2024, Month::March, day)
        .expect("fixture date should be valid")
        .with_time(Time::MIDNIGHT)
        .assume_utc()
}

pub fn products() -> Vec<Product> {
    let product = |id: i64, name: &str, cents: i64, day: u8, tags: &[&str], ratings: &[i64]| Product {
        id,
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        listed: listed_on(day),
        discontinued: id % 4 == 0,
        tags: tags.iter().map(ToString::to_string).collect(),
        ratings: ratings.to_vec(),
    };

    vec![
        product(1, "Anvil", 4999, 1, &["metal", "heavy"], &[5, 4]),
        product(2, "Bucket", 350, 2, &["metal"], &[3]),
        product(3, "Candle", 125, 3, &["wax"], &[]),
        product(4, "Drill", 8900, 4, &["tool", "power"], &[5, 5, 4]),
        product(5, "Easel", 2500, 5, &[], &[2, 1]),
        product(6, "Funnel", 199, 6, &["kitchen"], &[4]),
    ]
}

pub fn product_projection() -> Result<Projection<Product, ProductDto>, sift::core::error::QueryError> {
    projection!(Product => ProductDto {
        id: i64 = |p| p.id,
        name: String = |p| p.name.clone(),
        price: Decimal = |p| p.price,
        listed: OffsetDateTime = |p| p.listed,
        discontinued: bool = |p| p.discontinued,
        tags: list String = |p| Box::new(p.tags.iter().cloned()),
        ratings: seq i64 = |p| Box::new(p.ratings.iter().copied()),
    })
}

pub fn product_sift() -> Sift<Product, ProductDto> {
    let projection = product_projection().expect("product projection should build");

    Sift::new(projection).expect("product context should build")
}

pub fn ids<T>(envelope: &ResultEnvelope<T>, id: impl Fn(&T) -> i64) -> Vec<i64> {
    envelope.items.iter().map(id).collect()
}
