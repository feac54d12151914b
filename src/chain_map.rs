//! ChainMap: the public map, addressed by string keys or sized keys.

use crate::bucket_table::BucketTable;
use crate::cursor::{Cursor, Iter, Keys};
use crate::digest::KeyFlavor;
use crate::error::MapError;
use crate::node::Node;

/// Separately chained hash map from byte keys to values of type `V`.
///
/// String-key methods (`get`, `set`, `remove`, ...) treat the key as ending
/// at its first zero byte. Sized-key methods (`get_sized`, `set_sized`, ...)
/// use every byte of the slice. Both families share the same table.
///
/// A map is either initialised or not. Operations on an uninitialised map do
/// nothing: lookups return `None` and `set` returns
/// `Err(MapError::Uninitialized)`.
pub struct ChainMap<V> {
    table: Option<BucketTable<V>>,
}

impl<V> ChainMap<V> {
    /// An initialised, empty map with no buckets; the first insert allocates.
    pub fn new() -> Self {
        ChainMap {
            table: Some(BucketTable::new()),
        }
    }

    /// An initialised map pre-sized to `hint` buckets when `hint` is a
    /// non-zero power of two; any other hint starts with no buckets.
    pub fn with_buckets(hint: usize) -> Result<Self, MapError> {
        let mut m = Self::uninit();
        m.init(hint)?;
        Ok(m)
    }

    /// A map in the uninitialised state. Call `init` before use.
    pub const fn uninit() -> Self {
        ChainMap { table: None }
    }

    /// (Re)initialise the map, releasing any previous contents.
    ///
    /// If eager sizing fails the map is still initialised, with no buckets.
    pub fn init(&mut self, hint: usize) -> Result<(), MapError> {
        self.table = None;
        let table = self.table.insert(BucketTable::new());
        if hint > 0 && hint.is_power_of_two() {
            table.resize(hint)?;
        }
        Ok(())
    }

    /// Release every entry and the bucket array; the map becomes uninitialised.
    pub fn deinit(&mut self) {
        self.table = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.table.is_some()
    }

    pub fn len(&self) -> usize {
        self.table.as_ref().map_or(0, |t| t.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of buckets; always zero or a power of two.
    pub fn capacity(&self) -> usize {
        self.table.as_ref().map_or(0, |t| t.capacity())
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.lookup(KeyFlavor::Str, key.as_ref())
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.lookup_mut(KeyFlavor::Str, key.as_ref())
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Insert or overwrite the entry for a string key.
    pub fn set<Q>(&mut self, key: &Q, value: V) -> Result<(), MapError>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.store(KeyFlavor::Str, key.as_ref(), value)
    }

    /// Remove a string key, handing back its value. Absent keys are a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.take(KeyFlavor::Str, key.as_ref())
    }

    pub fn get_sized(&self, key: &[u8]) -> Option<&V> {
        self.lookup(KeyFlavor::Sized, key)
    }

    pub fn get_sized_mut(&mut self, key: &[u8]) -> Option<&mut V> {
        self.lookup_mut(KeyFlavor::Sized, key)
    }

    pub fn contains_sized_key(&self, key: &[u8]) -> bool {
        self.get_sized(key).is_some()
    }

    /// Insert or overwrite the entry for a sized key.
    pub fn set_sized(&mut self, key: &[u8], value: V) -> Result<(), MapError> {
        self.store(KeyFlavor::Sized, key, value)
    }

    /// Remove a sized key, handing back its value. Absent keys are a no-op.
    pub fn remove_sized(&mut self, key: &[u8]) -> Option<V> {
        self.take(KeyFlavor::Sized, key)
    }

    /// Grow to at least `buckets` buckets (rounded up to a power of two).
    /// Never shrinks.
    pub fn reserve_buckets(&mut self, buckets: usize) -> Result<(), MapError> {
        let table = self.table.as_mut().ok_or(MapError::Uninitialized)?;
        if buckets <= table.capacity() {
            return Ok(());
        }
        let target = buckets
            .checked_next_power_of_two()
            .ok_or(MapError::CapacityOverflow)?;
        table.resize(target)?;
        Ok(())
    }

    /// Drop every entry but keep the buckets.
    pub fn clear(&mut self) {
        if let Some(t) = self.table.as_mut() {
            t.clear();
        }
    }

    /// Advance `cursor` and return the key it lands on, or `None` when every
    /// bucket has been visited. Mutating the map between calls may make the
    /// walk skip or repeat keys.
    pub fn next_key(&self, cursor: &mut Cursor) -> Option<&[u8]> {
        let table = self.table.as_ref()?;
        let id = cursor.advance(table)?;
        table.node(id).map(|n| n.key())
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.table.as_ref())
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    fn lookup(&self, flavor: KeyFlavor, key: &[u8]) -> Option<&V> {
        let table = self.table.as_ref()?;
        let found = table.find(flavor, key)?;
        table.node(found.id).map(|n| &n.value)
    }

    fn lookup_mut(&mut self, flavor: KeyFlavor, key: &[u8]) -> Option<&mut V> {
        let table = self.table.as_mut()?;
        let found = table.find(flavor, key)?;
        table.node_mut(found.id).map(|n| &mut n.value)
    }

    fn store(&mut self, flavor: KeyFlavor, key: &[u8], value: V) -> Result<(), MapError> {
        let table = self.table.as_mut().ok_or(MapError::Uninitialized)?;
        if let Some(found) = table.find(flavor, key) {
            if let Some(node) = table.node_mut(found.id) {
                node.value = value;
            }
            return Ok(());
        }

        // Every allocation happens before the table is touched: key buffer,
        // arena slot, then the grown bucket array. A failure at any step
        // leaves the table as it was.
        let node = Node::create(flavor, key, value)?;
        table.try_reserve_node()?;
        if table.len() >= table.capacity() {
            let grown = match table.capacity() {
                0 => 1,
                n => n.checked_mul(2).ok_or(MapError::CapacityOverflow)?,
            };
            table.resize(grown)?;
        }
        table.insert(node);
        Ok(())
    }

    fn take(&mut self, flavor: KeyFlavor, key: &[u8]) -> Option<V> {
        let table = self.table.as_mut()?;
        let found = table.find(flavor, key)?;
        table.unlink(found).map(Node::into_value)
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        if let Some(t) = self.table.as_ref() {
            t.assert_consistent();
            assert!(t.capacity() == 0 || t.capacity().is_power_of_two());
            assert!(t.len() <= t.capacity());
        }
    }
}

impl<V> Default for ChainMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V> IntoIterator for &'a ChainMap<V> {
    type Item = (&'a [u8], &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
