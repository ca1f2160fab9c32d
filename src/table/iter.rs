//! Table iterators
//!
//! Borrowing iterators over occupied slots. Each call to `Table::list` or
//! `Table::find` starts a fresh pass.

use std::slice;

use crate::record::Record;

/// Iterator over occupied slots in ascending id order
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    slots: slice::Iter<'a, Record>,
}

impl<'a> Iter<'a> {
    pub(super) fn new(slots: &'a [Record]) -> Self {
        Self {
            slots: slots.iter(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find(|record| record.present)
    }
}

/// Iterator over occupied slots matching a search prefix
#[derive(Debug, Clone)]
pub struct Find<'a> {
    inner: Iter<'a>,
    /// At most `match_chars` leading characters of the term
    prefix: String,
}

impl<'a> Find<'a> {
    pub(super) fn new(inner: Iter<'a>, term: &str, match_chars: usize) -> Self {
        Self {
            inner,
            prefix: term.chars().take(match_chars).collect(),
        }
    }
}

impl<'a> Iterator for Find<'a> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let prefix = self.prefix.as_str();
        self.inner
            .by_ref()
            .find(|record| record.name.starts_with(prefix) || record.email.starts_with(prefix))
    }
}
