//! Cursor-driven iteration over paged listings.
//!
//! The platform serves message history and audit logs in pages of up to 100
//! items; every further page must be requested relative to the id of the last
//! item already seen. [`Paginator`] hides the cursor bookkeeping behind a
//! plain [`Iterator`], fetching pages on demand from a [`PageSource`].

#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

use accord_models::{audit_log::AuditLogEntry, message::Message};
use std::{
    collections::VecDeque,
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

pub const DEFAULT_CHUNK_SIZE: u64 = 100;

/// Which way the paginator walks through history.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// From the starting point toward older items, driven by a `before`
    /// cursor. Without a starting cursor this begins at the newest item.
    Up,
    /// From the starting point toward newer items, driven by an `after`
    /// cursor. Requires an explicit starting point.
    Down,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PaginationError {
    /// Downward iteration was requested with neither a `before` nor an
    /// `after` cursor.
    MissingCursor,
}

impl Display for PaginationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PaginationError::MissingCursor => {
                f.write_str("downward pagination requires a before or after cursor")
            }
        }
    }
}

impl StdError for PaginationError {}

/// An item that can act as a pagination cursor.
pub trait PageItem {
    fn cursor(&self) -> u64;
}

impl PageItem for Message {
    fn cursor(&self) -> u64 {
        self.id.get()
    }
}

impl PageItem for AuditLogEntry {
    fn cursor(&self) -> u64 {
        self.id.get()
    }
}

/// The collaborator that actually fetches a page, typically backed by a REST
/// call. Items are expected in the service's native newest-first order.
pub trait PageSource {
    type Item: PageItem;
    type Error;

    fn fetch(
        &mut self,
        before: Option<u64>,
        after: Option<u64>,
        limit: u64,
    ) -> Result<Vec<Self::Item>, Self::Error>;
}

impl<T, E, F> PageSource for F
where
    T: PageItem,
    F: FnMut(Option<u64>, Option<u64>, u64) -> Result<Vec<T>, E>,
{
    type Item = T;
    type Error = E;

    fn fetch(
        &mut self,
        before: Option<u64>,
        after: Option<u64>,
        limit: u64,
    ) -> Result<Vec<T>, E> {
        self(before, after, limit)
    }
}

/// A lazy, forward-only walk over a paged listing.
///
/// Items are buffered one page at a time; a new page is only requested once
/// the buffer runs dry. A fetch that returns no items ends the walk for good.
/// Fetch failures are handed to the caller unmodified and are never retried
/// here.
pub struct Paginator<S: PageSource> {
    source: S,
    direction: Direction,
    before: Option<u64>,
    after: Option<u64>,
    chunk_size: u64,
    buffer: VecDeque<S::Item>,
    exhausted: bool,
}

impl<S: PageSource> Paginator<S> {
    pub fn new(
        source: S,
        direction: Direction,
        before: Option<u64>,
        after: Option<u64>,
    ) -> Result<Self, PaginationError> {
        Self::with_chunk_size(source, direction, before, after, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(
        source: S,
        direction: Direction,
        before: Option<u64>,
        after: Option<u64>,
        chunk_size: u64,
    ) -> Result<Self, PaginationError> {
        if direction == Direction::Down && before.is_none() && after.is_none() {
            return Err(PaginationError::MissingCursor);
        }

        Ok(Self {
            source,
            direction,
            before,
            after,
            chunk_size,
            buffer: VecDeque::new(),
            exhausted: false,
        })
    }

    /// Fetch the next page into the buffer. Returns whether anything arrived.
    fn fill(&mut self) -> Result<bool, S::Error> {
        if self.exhausted {
            return Ok(false);
        }

        let mut page = self
            .source
            .fetch(self.before, self.after, self.chunk_size)?;
        if page.is_empty() {
            self.exhausted = true;
            return Ok(false);
        }

        self.before = None;
        self.after = None;
        match self.direction {
            Direction::Up => {
                self.before = page.last().map(PageItem::cursor);
            }
            Direction::Down => {
                page.reverse();
                self.after = page.last().map(PageItem::cursor);
            }
        }

        self.buffer = page.into_iter().collect();
        Ok(true)
    }

    /// Drain the current page as one batch, fetching if the buffer is empty.
    ///
    /// Returns `None` once the listing is exhausted.
    pub fn next_page(&mut self) -> Option<Result<Vec<S::Item>, S::Error>> {
        if self.buffer.is_empty() {
            match self.fill() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(err) => return Some(Err(err)),
            }
        }

        Some(Ok(self.buffer.drain(..).collect()))
    }
}

impl<S: PageSource> Iterator for Paginator<S> {
    type Item = Result<S::Item, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() {
            match self.fill() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(err) => return Some(Err(err)),
            }
        }

        self.buffer.pop_front().map(Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, PageItem, PaginationError, Paginator};

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    struct Item(u64);

    impl PageItem for Item {
        fn cursor(&self) -> u64 {
            self.0
        }
    }

    /// A history of `count` items with ids 1..=count, served newest-first the
    /// way the platform does. A `before` query selects the newest items below
    /// the cursor, an `after` query the oldest items above it.
    fn history(
        count: u64,
        calls: &mut u64,
    ) -> impl FnMut(Option<u64>, Option<u64>, u64) -> Result<Vec<Item>, &'static str> + '_ {
        move |before, after, limit| {
            *calls += 1;
            let matching: Vec<u64> = (1..=count)
                .filter(|id| before.is_none_or(|b| *id < b))
                .filter(|id| after.is_none_or(|a| *id > a))
                .collect();
            let limit = usize::try_from(limit).unwrap();
            let window: Vec<u64> = if after.is_some() {
                matching.into_iter().take(limit).collect()
            } else {
                let skip = matching.len().saturating_sub(limit);
                matching.into_iter().skip(skip).collect()
            };
            Ok(window.into_iter().rev().map(Item).collect())
        }
    }

    #[test]
    fn upward_iteration_visits_everything_in_order() {
        let mut calls = 0;
        {
            let paginator =
                Paginator::new(history(250, &mut calls), Direction::Up, None, None).unwrap();
            let items: Vec<Item> = paginator.map(Result::unwrap).collect();
            assert_eq!(items.len(), 250);
            assert_eq!(items.first(), Some(&Item(250)));
            assert_eq!(items.last(), Some(&Item(1)));
            assert!(items.windows(2).all(|pair| pair[0].0 > pair[1].0));
        }
        // Three pages plus the empty fetch that signals exhaustion.
        assert_eq!(calls, 4);
    }

    #[test]
    fn bulk_mode_yields_page_sized_batches() {
        let mut calls = 0;
        let mut paginator =
            Paginator::new(history(250, &mut calls), Direction::Up, None, None).unwrap();
        let mut sizes = Vec::new();
        while let Some(page) = paginator.next_page() {
            sizes.push(page.unwrap().len());
        }
        assert_eq!(sizes, [100, 100, 50]);
    }

    #[test]
    fn exhaustion_is_terminal() {
        let mut calls = 0;
        {
            let mut paginator =
                Paginator::new(history(5, &mut calls), Direction::Up, None, None).unwrap();
            assert_eq!(paginator.by_ref().filter_map(Result::ok).count(), 5);
            assert!(paginator.next().is_none());
            assert!(paginator.next().is_none());
        }
        // The terminal state never goes back to the source.
        assert_eq!(calls, 2);
    }

    #[test]
    fn downward_iteration_requires_a_cursor() {
        let mut calls = 0;
        let err = Paginator::new(history(10, &mut calls), Direction::Down, None, None)
            .map(|_| ())
            .unwrap_err();
        assert_eq!(err, PaginationError::MissingCursor);
    }

    #[test]
    fn downward_iteration_moves_toward_newer_items() {
        let mut calls = 0;
        let paginator = Paginator::with_chunk_size(
            history(250, &mut calls),
            Direction::Down,
            None,
            Some(0),
            100,
        )
        .unwrap();
        let items: Vec<Item> = paginator.map(Result::unwrap).collect();
        assert_eq!(items.len(), 250);
        assert_eq!(items.first(), Some(&Item(1)));
        assert_eq!(items.last(), Some(&Item(250)));
        assert!(items.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn fetch_errors_propagate_unmodified() {
        let mut paginator = Paginator::new(
            |_, _, _| Err::<Vec<Item>, _>("boom"),
            Direction::Up,
            None,
            None,
        )
        .unwrap();
        assert_eq!(paginator.next(), Some(Err("boom")));
        // A failed fetch does not end the walk; the next read tries again.
        assert_eq!(paginator.next(), Some(Err("boom")));
    }
}
