use personagen_config::{DataQualityProfile, GenerationConfig};
use personagen_generate::{generate_batch, PersonEngine};

fn config(seed: u64) -> GenerationConfig {
    GenerationConfig {
        seed,
        record_count: 20,
        workers: 2,
        ..GenerationConfig::default()
    }
}

#[test]
fn same_seed_reproduces_the_batch() {
    let first = generate_batch(&config(1234)).expect("batch");
    let second = generate_batch(&config(1234)).expect("batch");
    assert_eq!(first.people, second.people);
    assert_eq!(first.report.content_digest, second.report.content_digest);
}

#[test]
fn different_seeds_diverge() {
    let first = generate_batch(&config(1)).expect("batch");
    let second = generate_batch(&config(2)).expect("batch");
    assert_ne!(first.people, second.people);
    assert_ne!(first.report.content_digest, second.report.content_digest);
}

#[test]
fn dirty_profile_is_still_deterministic() {
    // Variability draws come from the same injected stream, so typos and
    // dropped fields repeat exactly.
    let dirty = GenerationConfig {
        seed: 77,
        record_count: 30,
        ..GenerationConfig::default()
    };
    assert_ne!(dirty.data_quality, DataQualityProfile::clean());
    let first = generate_batch(&dirty).expect("batch");
    let second = generate_batch(&dirty).expect("batch");
    assert_eq!(first.people, second.people);
}

#[test]
fn family_clusters_reproduce_with_the_seed() {
    let mut first = PersonEngine::new(config(42));
    let mut second = PersonEngine::new(config(42));
    assert_eq!(
        first.create_family_clusters(5),
        second.create_family_clusters(5)
    );
}
