//! Node: one owned key/value pair plus its chain link.

use crate::digest::KeyFlavor;
use std::collections::TryReserveError;

slotmap::new_key_type! {
    /// Generational index of a node in the bucket table's arena.
    pub struct NodeId;
}

#[derive(Debug)]
pub struct Node<V> {
    pub(crate) hash: u32,
    key: Box<[u8]>,
    pub(crate) value: V,
    pub(crate) next: Option<NodeId>,
}

impl<V> Node<V> {
    /// Copy the key as addressed by `flavor`, take the value, cache the digest.
    ///
    /// Fails only if the key buffer cannot be allocated; the value is dropped
    /// in that case.
    pub fn create(flavor: KeyFlavor, raw_key: &[u8], value: V) -> Result<Self, TryReserveError> {
        let key = flavor.key_bytes(raw_key);
        let mut buf = Vec::new();
        buf.try_reserve_exact(key.len())?;
        buf.extend_from_slice(key);
        Ok(Node {
            hash: flavor.digest(raw_key),
            key: buf.into_boxed_slice(),
            value,
            next: None,
        })
    }

    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    #[inline]
    pub fn matches(&self, hash: u32, key: &[u8]) -> bool {
        self.hash == hash && *self.key == *key
    }

    pub fn into_value(self) -> V {
        self.value
    }
}
