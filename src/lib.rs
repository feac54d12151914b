//! chain-map: a single-threaded, separately chained hash map from byte
//! keys to values of a caller-chosen type.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small chained map whose hashing, bucketing and growth are fully
//!   deterministic, so iteration order and collision behaviour are reproducible
//!   for a given sequence of operations.
//! - Layers:
//!   - `digest`: djb2-XOR digests for the two key flavors.
//!   - `node::Node<V>`: one owned key buffer, one value, the cached digest
//!     and the id of the next node in its chain.
//!   - `bucket_table::BucketTable<V>`: power-of-two array of chain heads
//!     over a `SlotMap` arena of nodes; owns resize, find, link, unlink.
//!   - `ChainMap<V>`: public API in two key flavors plus `Cursor`
//!     traversal.
//!
//! Key flavors
//! - String keys (`get`, `set`, `remove`): any `AsRef<[u8]>`; the key ends
//!   at the first zero byte, like a C string.
//! - Sized keys (`get_sized`, `set_sized`, `remove_sized`): every byte of
//!   the slice, zeros included. The sized digest mixes in the byte position
//!   for zero bytes.
//! - Both flavors address the same table. A string key and a sized key with
//!   the same bytes and no zeros are the same entry.
//!
//! Constraints
//! - Single-threaded; no interior mutability, no atomics. Share across
//!   threads only behind external synchronisation.
//! - Capacity is zero or a power of two; bucket index is
//!   `digest & (capacity - 1)`.
//! - Before inserting a new key, if `len >= capacity` the capacity doubles
//!   (from 1). Removal never shrinks.
//! - Each node caches its digest; resize never rehashes key bytes.
//!
//! Failure model
//! - Missing keys are `None`, never errors.
//! - `set` fails with `MapError` on an uninitialised map or when the bucket
//!   array or key buffer cannot be allocated. A failed `set` leaves every
//!   entry and the capacity as they were.
//! - Operations on an uninitialised map (`ChainMap::uninit`, or after
//!   `deinit`) are silent no-ops.
//!
//! Iteration
//! - Bucket-ascending, then chain order. New nodes are linked at the head
//!   of their chain, so within one bucket the newest key comes first.
//! - `Cursor` does not borrow the map. Mutating between `next_key` calls
//!   may skip or repeat keys; stale node ids are detected through the
//!   arena's generational keys, so this is never memory-unsafe.
//!
//! Notes and non-goals
//! - No persistence, no shrinking, no cryptographic hashing.
//! - Values are owned by the map; overwriting or removing drops or returns
//!   the old value.

mod bucket_table;
mod chain_map;
mod chain_map_proptest;
mod cursor;
mod digest;
mod error;
mod node;

// Public surface
pub use chain_map::ChainMap;
pub use cursor::{Cursor, Iter, Keys};
pub use digest::{sized_digest, str_digest};
pub use error::MapError;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
