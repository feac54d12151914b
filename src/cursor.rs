//! Cursor: bucket-ordered traversal that does not borrow the map.
//!
//! A `Cursor` remembers a bucket index and a node id. It can be held across
//! map mutations, but then the walk may skip or revisit keys: it never
//! observes freed memory, because a removed node's generational id simply
//! stops resolving and the walk moves on to the next bucket.

use crate::bucket_table::BucketTable;
use crate::node::NodeId;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    // `None` means "before the first bucket".
    bucket: Option<usize>,
    node: Option<NodeId>,
}

impl Cursor {
    /// A cursor positioned before the first bucket.
    pub const fn new() -> Self {
        Cursor {
            bucket: None,
            node: None,
        }
    }

    /// Step to the next node: along the current chain, else to the head of
    /// the next non-empty bucket. Returns `None` once every bucket is done.
    pub(crate) fn advance<V>(&mut self, table: &BucketTable<V>) -> Option<NodeId> {
        if let Some(id) = self.node {
            if let Some(next) = table.node(id).and_then(|n| n.next) {
                self.node = Some(next);
                return Some(next);
            }
        }
        loop {
            let b = self.bucket.map_or(0, |b| b + 1);
            if b >= table.capacity() {
                self.bucket = Some(table.capacity());
                self.node = None;
                return None;
            }
            self.bucket = Some(b);
            if let Some(head) = table.head(b) {
                self.node = Some(head);
                return Some(head);
            }
        }
    }
}

/// Iterator over `(key, value)` pairs in bucket order.
pub struct Iter<'a, V> {
    table: Option<&'a BucketTable<V>>,
    cursor: Cursor,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(table: Option<&'a BucketTable<V>>) -> Self {
        Iter {
            remaining: table.map_or(0, |t| t.len()),
            table,
            cursor: Cursor::new(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a [u8], &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let table = self.table?;
        let id = self.cursor.advance(table)?;
        let node = table.node(id)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.key(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Iterator over keys in bucket order.
pub struct Keys<'a, V> {
    pub(crate) inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
