//! Business logic over the in-memory plan store.
//!
//! Everything here is a pure, synchronous function of its inputs: the
//! reference date is always passed in explicitly so scoring and
//! categorization stay deterministic and testable without wall-clock mocking.

pub mod allocator;
pub mod error;
pub mod kpi;
pub mod ledger;
pub mod period;

pub use error::{PlanError, Result};
