use common::format_fcfa;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error types for plan operations.
///
/// Business-rule violations are reported through these values and leave prior
/// state unmodified; nothing in this crate panics on bad input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// A project id did not resolve.
    #[error("Project {0} not found")]
    ProjectNotFound(i32),

    /// An income id did not resolve.
    #[error("Income {0} not found")]
    IncomeNotFound(i32),

    /// An allocation split exceeds the income's monthly amount.
    #[error(
        "Allocated total ({}) exceeds the available income ({})",
        format_fcfa(.requested),
        format_fcfa(.available)
    )]
    OverAllocation {
        requested: Decimal,
        available: Decimal,
    },

    /// A tagged string is not part of the configured allowed-value list.
    #[error("Unknown {list} value: {value}")]
    UnknownListValue { list: &'static str, value: String },

    /// A month key is not of the `YYYY-MM` shape.
    #[error("Invalid month key: {0}")]
    InvalidMonthKey(String),
}

/// Type alias for Result with PlanError.
pub type Result<T> = std::result::Result<T, PlanError>;
