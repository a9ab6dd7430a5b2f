//! Module: query
//! Responsibility: wire-level query description (filter, order, page) and its decoding.
//! Does not own: member resolution, handler dispatch, or execution.
//! Boundary: everything here is plain data; compilation happens in `compile`.

mod filter;
mod operator;
mod order;
mod page;


use crate::{DEFAULT_PAGE_SIZE, error::DecodeError};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub use filter::{FilterNode, Operation};
pub use operator::Operator;
pub use order::{Direction, OrderSpec};
pub use page::PageSpec;

///
/// SearchQuery
///
/// `{ "filter": <Filter|null>, "order": <Order|null>, "page": <Page|null> }`
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<OrderSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageSpec>,
}

impl SearchQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FilterNode) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: OrderSpec) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub const fn with_page(mut self, page: PageSpec) -> Self {
        self.page = Some(page);
        self
    }

    /// Decode from JSON text with the default page size.
    pub fn from_json_str(text: &str) -> Result<Self, DecodeError> {
        Self::from_json_str_with(text, DEFAULT_PAGE_SIZE)
    }

    /// Decode from JSON text; a page without `size` uses `default_page_size`.
    pub fn from_json_str_with(text: &str, default_page_size: u32) -> Result<Self, DecodeError> {
        let document: JsonValue = serde_json::from_str(text)?;

        Self::from_json_value(document, default_page_size)
    }

    pub fn from_json_value(
        mut document: JsonValue,
        default_page_size: u32,
    ) -> Result<Self, DecodeError> {
        if let Some(JsonValue::Object(page)) = document.get_mut("page") {
            page.entry("size")
                .or_insert_with(|| JsonValue::from(default_page_size));
        }

        Ok(serde_json::from_value(document)?)
    }
}
