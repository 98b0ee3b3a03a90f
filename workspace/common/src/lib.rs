//! Transport-layer types and formatting helpers shared between the domain
//! crates and the API backend. These structs mirror the shapes the handlers
//! serialize so that compute code never depends on the web stack.

mod currency;
mod kpi;
mod month;

pub use currency::format_fcfa;
pub use kpi::{KpiSummary, Phase};
pub use month::{is_month_key, month_key};
