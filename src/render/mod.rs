//! Human-readable output

pub mod summary;

pub use summary::{print_summary, render_summary, write_summary};
