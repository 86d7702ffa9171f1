//! Batch driver: range-partitions the record count across logical workers,
//! runs one engine per partition with a derived seed, and concatenates the
//! results in partition order.

use std::time::Instant;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use personagen_config::GenerationConfig;
use personagen_core::Person;

use crate::engine::PersonEngine;
use crate::errors::GenerateError;

/// Per-partition accounting.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionReport {
    pub worker_index: u32,
    pub seed: u64,
    pub records: u64,
    pub elapsed_ms: u64,
}

/// Summary of one batch run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub record_count: u64,
    pub base_seed: u64,
    pub partitions: Vec<PartitionReport>,
    pub elapsed_ms: u64,
    /// Hex SHA-256 over the newline-delimited JSON of every person, in
    /// output order. Two runs with the same config must agree.
    pub content_digest: String,
}

/// A generated batch plus its report.
#[derive(Debug, Clone)]
pub struct Batch {
    pub people: Vec<Person>,
    pub report: GenerationReport,
}

/// Splits `record_count` into `workers` contiguous partitions, remainder
/// spread over the first partitions.
fn partition_counts(record_count: u64, workers: u32) -> Vec<u64> {
    let workers = u64::from(workers.max(1));
    let base = record_count / workers;
    let remainder = record_count % workers;
    (0..workers)
        .map(|index| base + u64::from(index < remainder))
        .collect()
}

/// Generates the full batch described by `config`.
///
/// Partition `i` runs its own engine seeded with `seed + i`, so a
/// multi-process deployment that assigns one partition per process
/// produces the same records as this sequential loop.
pub fn generate_batch(config: &GenerationConfig) -> Result<Batch, GenerateError> {
    let started = Instant::now();
    info!(
        record_count = config.record_count,
        workers = config.workers,
        seed = config.seed,
        "batch generation started"
    );

    let counts = partition_counts(config.record_count, config.workers);
    let mut people = Vec::with_capacity(config.record_count as usize);
    let mut partitions = Vec::with_capacity(counts.len());

    for (index, count) in counts.iter().enumerate() {
        let worker_index = index as u32;
        let seed = config.seed + u64::from(worker_index);
        let partition_started = Instant::now();
        let mut engine = PersonEngine::with_seed(config.clone(), seed);
        for _ in 0..*count {
            people.push(engine.generate_person());
        }
        let elapsed_ms = partition_started.elapsed().as_millis() as u64;
        info!(
            worker_index,
            seed,
            records = count,
            elapsed_ms,
            "partition complete"
        );
        partitions.push(PartitionReport {
            worker_index,
            seed,
            records: *count,
            elapsed_ms,
        });
    }

    let mut hasher = Sha256::new();
    for person in &people {
        hasher.update(serde_json::to_vec(person)?);
        hasher.update(b"\n");
    }
    let content_digest = hex::encode(hasher.finalize());

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(
        records = people.len(),
        elapsed_ms,
        digest = %content_digest,
        "batch generation finished"
    );

    Ok(Batch {
        people,
        report: GenerationReport {
            record_count: config.record_count,
            base_seed: config.seed,
            partitions,
            elapsed_ms,
            content_digest,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use personagen_config::DataQualityProfile;

    fn small_config(record_count: u64, workers: u32, seed: u64) -> GenerationConfig {
        GenerationConfig {
            record_count,
            workers,
            seed,
            data_quality: DataQualityProfile::clean(),
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn partition_counts_spread_remainder() {
        assert_eq!(partition_counts(10, 3), vec![4, 3, 3]);
        assert_eq!(partition_counts(9, 3), vec![3, 3, 3]);
        assert_eq!(partition_counts(2, 4), vec![1, 1, 0, 0]);
        assert_eq!(partition_counts(5, 0), vec![5]);
    }

    #[test]
    fn batch_produces_requested_count() {
        let batch = generate_batch(&small_config(17, 4, 3)).unwrap();
        assert_eq!(batch.people.len(), 17);
        assert_eq!(batch.report.partitions.len(), 4);
        let total: u64 = batch.report.partitions.iter().map(|p| p.records).sum();
        assert_eq!(total, 17);
    }

    #[test]
    fn same_config_same_digest() {
        let first = generate_batch(&small_config(8, 2, 99)).unwrap();
        let second = generate_batch(&small_config(8, 2, 99)).unwrap();
        assert_eq!(first.report.content_digest, second.report.content_digest);
        assert_eq!(first.people, second.people);
    }

    #[test]
    fn worker_count_does_not_change_partition_prefix() {
        // Partition 0 of a two-worker run matches a one-worker run of the
        // same length, because both use the base seed.
        let solo = generate_batch(&small_config(4, 1, 7)).unwrap();
        let split = generate_batch(&small_config(8, 2, 7)).unwrap();
        assert_eq!(solo.people[..4], split.people[..4]);
    }

    #[test]
    fn seeds_are_base_plus_index() {
        let batch = generate_batch(&small_config(6, 3, 100)).unwrap();
        let seeds: Vec<u64> = batch.report.partitions.iter().map(|p| p.seed).collect();
        assert_eq!(seeds, vec![100, 101, 102]);
    }
}
