//! Rendering of extraction results and analysis diagnostics.

mod json;
mod report;

pub use json::{to_json, JsonFormat};
pub use report::profile_report;
