//! Report data structures for the export.
//!
//! Operations build reports, then render them to an [`Output`] target.

mod export;
mod output;

pub use export::{ExportReport, LinkedFields, OutputKind};
pub use output::{JsonOutput, Output, QuietOutput, Report};
