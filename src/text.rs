//! Character-level operations on string slices.
//!
//! Positions are character positions (as counted by [`str::chars`]), not byte
//! offsets.

use std::str::Chars;

use crate::deferred::Deferred;
use crate::ops::{Equals, Grouper, IndexFinder, Splitter};

/// Key selector grouping identical characters.
pub type CharKey = fn(&char) -> char;

fn same_char(c: &char) -> char {
    *c
}

/// Deferred character operations on `str`.
pub trait TextExt {
    /// Character positions of `target`.
    fn char_indices_of(&self, target: char) -> Deferred<Chars<'_>, IndexFinder<char, Equals<char>>>;

    /// Identical characters grouped together, in order of first occurrence.
    fn char_groups(&self) -> Deferred<Chars<'_>, Grouper<char, CharKey>>;

    /// Character chunks between occurrences of `separator`.
    fn split_chars_by(&self, separator: char) -> Deferred<Chars<'_>, Splitter<char, Equals<char>>>;
}

impl TextExt for str {
    fn char_indices_of(&self, target: char) -> Deferred<Chars<'_>, IndexFinder<char, Equals<char>>> {
        Deferred::new(self.chars(), IndexFinder::new(Equals(target)))
    }

    fn char_groups(&self) -> Deferred<Chars<'_>, Grouper<char, CharKey>> {
        Deferred::new(self.chars(), Grouper::new(same_char as CharKey))
    }

    fn split_chars_by(&self, separator: char) -> Deferred<Chars<'_>, Splitter<char, Equals<char>>> {
        Deferred::new(self.chars(), Splitter::new(Equals(separator)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_count_characters() {
        let found: Vec<usize> = "héllo wörld".char_indices_of('l').into_iter().collect();
        assert_eq!(found, vec![2, 3, 9]);
    }

    #[test]
    fn groups_by_character() {
        let groups: Vec<(char, String)> = "aabbaa"
            .char_groups()
            .into_iter()
            .map(|g| {
                let (key, items) = g.into_parts();
                (key, items.into_iter().collect())
            })
            .collect();
        assert_eq!(groups, vec![('a', "aaaa".into()), ('b', "bb".into())]);
    }

    #[test]
    fn split_on_character() {
        let parts: Vec<String> = "a,b,,c"
            .split_chars_by(',')
            .into_iter()
            .map(|chunk| chunk.into_iter().collect())
            .collect();
        assert_eq!(parts, vec!["a", "b", "", "c"]);
    }
}
