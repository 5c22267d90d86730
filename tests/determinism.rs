use std::collections::HashSet;

use blake3::Hasher;
use seqops::prelude::*;

fn fingerprint<I, T>(outputs: I) -> blake3::Hash
where
    I: IntoIterator<Item = T>,
    T: std::fmt::Debug,
{
    let mut hasher = Hasher::new();
    for output in outputs {
        hasher.update(format!("{output:?}\n").as_bytes());
    }
    hasher.finalize()
}

fn corpus() -> Vec<u32> {
    (0..512u32).map(|i| i.wrapping_mul(2_654_435_761) % 17).collect()
}

#[test]
fn deferred_sequences_repeat_exactly() {
    let source = corpus();
    let found = source.clone().indices_of(3u32);
    let chunks = source.clone().split_when(|x| *x == 0);
    let groups = source.clone().group_by(|x| x % 5);
    let spliced = source.insert_range(100, vec![99, 98, 97]);

    let mut fingerprints = HashSet::new();
    for _ in 0..5 {
        let mut hasher = Hasher::new();
        hasher.update(fingerprint(&found).as_bytes());
        hasher.update(fingerprint(&chunks).as_bytes());
        hasher.update(fingerprint(&groups).as_bytes());
        hasher.update(fingerprint(&spliced).as_bytes());
        fingerprints.insert(hasher.finalize());
    }

    assert_eq!(fingerprints.len(), 1, "outputs diverged across traversals");
}

#[test]
fn deferred_and_immediate_agree() {
    use seqops::immediate::ImmediateExt;

    let source = corpus();
    let eager = ImmediateExt::split_into(source.clone(), 7).unwrap();
    let lazy: Vec<Vec<u32>> = DeferredExt::split_into(source, 7).unwrap().into_iter().collect();
    assert_eq!(fingerprint(&eager), fingerprint(&lazy));
    assert_eq!(eager.len(), 7);
}
