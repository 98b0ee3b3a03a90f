//! Domain entities and the in-memory plan store.
//!
//! All state lives in one [`store::PlanData`] value owned by the process and is
//! only reached through the ledger, allocator and aggregator interfaces; there
//! is no persistence beyond the JSON backup contract.

pub mod entities;
pub mod seed;
pub mod store;
