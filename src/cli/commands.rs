pub mod backup;
pub mod serve;

pub use backup::{export_plan, import_plan};
pub use serve::serve;
