pub mod config;
pub mod income;
pub mod project;
