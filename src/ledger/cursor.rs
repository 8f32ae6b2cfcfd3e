//! Host cursor over a snapshot of query results.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::Result;

/// Iterator over a query snapshot that is counted as open until dropped
pub(crate) struct Cursor<T> {
    items: std::vec::IntoIter<T>,
    open: Arc<AtomicUsize>,
}

impl<T> Cursor<T> {
    pub(crate) fn new(items: Vec<T>, open: &Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self {
            items: items.into_iter(),
            open: Arc::clone(open),
        }
    }
}

impl<T> Iterator for Cursor<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(Ok)
    }
}

impl<T> Drop for Cursor<T> {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}
