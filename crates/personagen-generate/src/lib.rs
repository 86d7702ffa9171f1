//! Person generation: the variability engine, the domain generators, the
//! composition engine, batch driving and file export.

pub mod batch;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod output;
pub mod variability;

pub use batch::{generate_batch, Batch, GenerationReport, PartitionReport};
pub use engine::{PersonEngine, RelationshipKind};
pub use errors::GenerateError;
pub use variability::{ValueKind, Variability};
