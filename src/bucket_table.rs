//! BucketTable: power-of-two array of chain heads over a node arena.
//!
//! Nodes live in a `SlotMap`; each bucket holds the id of its chain's first
//! node and each node holds the id of its successor. Every node sits in the
//! bucket `hash & (capacity - 1)`; `resize` re-establishes that for the new
//! capacity.

use crate::digest::KeyFlavor;
use crate::node::{Node, NodeId};
use slotmap::SlotMap;
use std::collections::TryReserveError;

/// The link that points at a node: a bucket head or a predecessor's `next`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Link {
    Head(usize),
    After(NodeId),
}

/// A node located by `find`, together with the link that points at it.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Found {
    pub id: NodeId,
    pub prev: Link,
}

#[derive(Debug)]
pub(crate) struct BucketTable<V> {
    buckets: Vec<Option<NodeId>>,
    nodes: SlotMap<NodeId, Node<V>>,
}

impl<V> BucketTable<V> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
            nodes: SlotMap::with_key(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn bucket_index(&self, hash: u32) -> usize {
        debug_assert!(self.buckets.len().is_power_of_two());
        // Bitmask in place of modulo; only valid for power-of-two capacities.
        (hash as usize) & (self.buckets.len() - 1)
    }

    /// Rebuild the bucket array with `new_capacity` heads and re-link every node.
    ///
    /// All allocation happens up front, so on error the table is untouched.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), TryReserveError> {
        debug_assert!(new_capacity.is_power_of_two());

        let mut detached: Vec<NodeId> = Vec::new();
        detached.try_reserve_exact(self.nodes.len())?;
        let mut buckets: Vec<Option<NodeId>> = Vec::new();
        buckets.try_reserve_exact(new_capacity)?;
        buckets.resize(new_capacity, None);

        // Detach: last bucket first, each chain head to tail.
        for head in self.buckets.iter().rev() {
            let mut cur = *head;
            while let Some(id) = cur {
                detached.push(id);
                cur = self.nodes[id].next;
            }
        }

        self.buckets = buckets;
        for &id in detached.iter().rev() {
            self.link(id);
        }
        Ok(())
    }

    /// Push an arena node at the head of its chain.
    fn link(&mut self, id: NodeId) {
        let idx = self.bucket_index(self.nodes[id].hash);
        self.nodes[id].next = self.buckets[idx];
        self.buckets[idx] = Some(id);
    }

    /// Make room in the arena for one more node, so the next `insert` does
    /// not allocate.
    pub fn try_reserve_node(&mut self) -> Result<(), TryReserveError> {
        self.nodes.try_reserve(1)
    }

    /// Move `node` into the arena and link it. The caller must have ensured
    /// `capacity() > 0`, that no node with the same key is present, and
    /// (for an infallible insert) called `try_reserve_node`.
    pub fn insert(&mut self, node: Node<V>) -> NodeId {
        let id = self.nodes.insert(node);
        self.link(id);
        id
    }

    /// Scan the target chain for `key`: digest first, then exact bytes.
    pub fn find(&self, flavor: KeyFlavor, raw_key: &[u8]) -> Option<Found> {
        if self.buckets.is_empty() {
            return None;
        }
        let hash = flavor.digest(raw_key);
        let key = flavor.key_bytes(raw_key);
        let idx = self.bucket_index(hash);
        let mut prev = Link::Head(idx);
        let mut cur = self.buckets[idx];
        while let Some(id) = cur {
            let node = &self.nodes[id];
            if node.matches(hash, key) {
                return Some(Found { id, prev });
            }
            prev = Link::After(id);
            cur = node.next;
        }
        None
    }

    /// Splice a found node out of its chain and take it out of the arena.
    pub fn unlink(&mut self, found: Found) -> Option<Node<V>> {
        let node = self.nodes.remove(found.id)?;
        match found.prev {
            Link::Head(idx) => self.buckets[idx] = node.next,
            Link::After(prev) => self.nodes[prev].next = node.next,
        }
        Some(node)
    }

    /// Drop every node, keep the bucket array.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.iter_mut().for_each(|b| *b = None);
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node<V>> {
        self.nodes.get(id)
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<V>> {
        self.nodes.get_mut(id)
    }

    #[inline]
    pub fn head(&self, bucket: usize) -> Option<NodeId> {
        self.buckets.get(bucket).copied().flatten()
    }

    /// Check that every node is reachable from exactly the bucket its hash selects.
    #[cfg(test)]
    pub fn assert_consistent(&self) {
        let mut seen = 0;
        for (idx, head) in self.buckets.iter().enumerate() {
            let mut cur = *head;
            while let Some(id) = cur {
                let node = &self.nodes[id];
                assert_eq!(self.bucket_index(node.hash), idx, "node in wrong bucket");
                seen += 1;
                cur = node.next;
            }
        }
        assert_eq!(seen, self.nodes.len(), "chains and arena disagree");
    }
}
