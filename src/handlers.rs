pub mod advice;
pub mod allocations;
pub mod backup;
pub mod export;
pub mod health;
pub mod incomes;
pub mod kpis;
pub mod projects;
pub mod settings;
pub mod tracking;
