//! Tour of the deferred operators, the eager companions and the async stream.

use futures::executor::block_on;
use futures::stream::{self, StreamExt};
use seqops::ops::{Equals, IndexFinder};
use seqops::prelude::*;

fn main() -> anyhow::Result<()> {
    // Log lines with a blank line between records.
    let lines = ["GET /", "200", "", "GET /admin", "403", "", "GET /health", "200"];

    let records: Vec<Vec<&str>> = lines.split_by("").into_iter().collect();
    for (idx, record) in records.iter().enumerate() {
        println!("record {idx}: {}", record.join(" -> "));
    }

    // Same sequence, queried twice; each traversal starts from scratch.
    let ok = lines.indices_of("200");
    println!("200 at {:?} ({} hits)", ok.iter().collect::<Vec<_>>(), ok.iter().count());

    let last_get = lines.last_n_indices_where(|l| l.starts_with("GET"), 1)?;
    println!("last request at {:?}", last_get.into_iter().collect::<Vec<_>>());

    let config = PartitionConfig::default().with_partitions(3)?;
    for (worker, batch) in (1..=10).split_per_worker(&config).into_iter().enumerate() {
        println!("worker {worker}: {batch:?}");
    }

    let greeting: Vec<char> = "hello world".chars().collect();
    let trimmed: Vec<char> = greeting.remove_range(5, 6)?.into_iter().collect();
    let patched: String = trimmed.append_range("!".chars()).into_iter().collect();
    println!("{patched}");

    for group in "mississippi".char_groups().iter() {
        println!("{} x{}", group.key(), group.len());
    }

    let found: Vec<usize> = block_on(
        stream::iter(lines)
            .apply_op(IndexFinder::new(Equals("GET /admin")))?
            .collect(),
    );
    println!("streamed match at {found:?}");

    Ok(())
}
