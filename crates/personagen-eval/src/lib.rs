//! Batch evaluation: invariant checks and statistical summaries over a
//! generated batch, loadable from JSON or NDJSON exports.

pub mod errors;
pub mod evaluate;
pub mod report;

pub use errors::{EvalError, Result};
pub use evaluate::{evaluate_batch, load_people};
pub use report::{
    BatchReport, GenderBreakdown, InvariantCounts, NumericSummary, REPORT_VERSION,
};
