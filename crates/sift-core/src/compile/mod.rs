//! Module: compile
//! Responsibility: recursive-descent compilation of filter trees and order chains against a
//! member table.
//! Does not own: operator interpretation (handlers) or execution (sources).
//! Boundary: pure and synchronous; never touches a data source.

mod filter;
mod order;


pub use filter::compile_filter;
pub use order::{OrderKey, OrderPlan, compile_order};
