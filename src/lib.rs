pub mod error;
pub mod parse;
pub mod plan;
pub mod validate;
pub mod wasm;

pub use plan::{DryRunReport, dry_run, dry_run_with};
