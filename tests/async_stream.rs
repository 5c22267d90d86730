use std::task::Poll;

use futures::executor::block_on;
use futures::stream::{self, StreamExt};
use seqops::ops::{Chunker, Equals, Grouper, IndexFinder, Inserter, Splitter};
use seqops::prelude::*;
use seqops::OperatorStream;

#[test]
fn stream_matches_the_sync_cursor() {
    let values = vec![5, 3, 8, 3, 1, 3];
    let sync: Vec<usize> = values.clone().indices_of(3).into_iter().collect();
    let stream = stream::iter(values).apply_op(IndexFinder::new(Equals(3))).unwrap();
    let streamed: Vec<usize> = block_on(stream.collect());
    assert_eq!(streamed, sync);
    assert_eq!(streamed, vec![1, 3, 5]);
}

#[test]
fn pending_source_keeps_operator_state() {
    let mut letters = "ab,cd,e".chars();
    let mut ready = false;
    let source = stream::poll_fn(move |cx| {
        ready = !ready;
        if ready {
            Poll::Ready(letters.next())
        } else {
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    });
    let chunks: Vec<String> = block_on(
        OperatorStream::new(source, Splitter::new(Equals(',')))
            .unwrap()
            .map(|chunk| chunk.into_iter().collect())
            .collect(),
    );
    assert_eq!(chunks, vec!["ab", "cd", "e"]);
}

#[test]
fn buffered_operators_drain_after_the_stream_ends() {
    let stream = stream::iter("abcab".chars()).apply_op(Grouper::new(|c: &char| *c)).unwrap();
    let groups: Vec<(char, usize)> =
        block_on(stream.map(|g| (*g.key(), g.len())).collect());
    assert_eq!(groups, vec![('a', 2), ('b', 2), ('c', 1)]);

    let stream = stream::iter(1..=3).apply_op(Inserter::new(10, vec![4, 5])).unwrap();
    assert_eq!(block_on(stream.collect::<Vec<_>>()), vec![1, 2, 3, 4, 5]);
}

#[test]
fn length_dependent_operators_are_rejected() {
    let err = stream::iter(0..10)
        .apply_op(Chunker::parts(3).unwrap())
        .unwrap_err();
    assert!(matches!(err, SeqError::InvalidArgument { name: "op", .. }));
    assert!(stream::iter(0..10).apply_op(Chunker::items(3).unwrap()).is_ok());
}

#[test]
fn dispose_terminates_the_stream() {
    let mut stream = stream::iter(0..10)
        .apply_op(Chunker::items(2).unwrap())
        .unwrap();
    assert_eq!(block_on(stream.next()), Some(vec![0, 1]));
    assert_eq!(stream.phase(), Phase::Scanning);
    stream.dispose();
    assert_eq!(stream.phase(), Phase::Exhausted);
    assert_eq!(block_on(stream.next()), None);
    assert_eq!(stream.reset(), Err(SeqError::Unsupported { operation: "reset" }));
}
