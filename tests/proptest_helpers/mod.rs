#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(32);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_category_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["cat", "dog", "person", "car", "bird"]).prop_map(String::from)
}

/// A `<bndbox>` with min <= max on both axes.
pub fn arb_ordered_box() -> impl Strategy<Value = [i64; 4]> {
    (0i64..1000, 0i64..1000, 0i64..500, 0i64..500)
        .prop_map(|(x, y, w, h)| [x, y, x + w, y + h])
}

pub fn arb_objects(max_objects: usize) -> impl Strategy<Value = Vec<(String, [i64; 4])>> {
    prop::collection::vec((arb_category_name(), arb_ordered_box()), 1..=max_objects)
}

/// Objects for several annotation files.
pub fn arb_files(
    max_files: usize,
    max_objects: usize,
) -> impl Strategy<Value = Vec<Vec<(String, [i64; 4])>>> {
    prop::collection::vec(arb_objects(max_objects), 1..=max_files)
}
