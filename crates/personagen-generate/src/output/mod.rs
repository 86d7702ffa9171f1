//! File export: a flat CSV projection and full-fidelity JSON/NDJSON.

mod csv;
mod json;

pub use csv::write_csv;
pub use json::{write_json, write_ndjson};
