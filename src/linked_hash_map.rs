//! LinkedHashMap: chained hash table fused with an insertion-order list.
//!
//! Lookups touch only the bucket table. `insert` and `erase` touch both the
//! bucket table and the order list. Re-inserting a key that is already
//! present is a no-op: its value and its position are left alone.

use crate::bucket_table::BucketTable;
use crate::cursor::{Cursor, MapId};
use crate::error::{Error, Result};
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use crate::node::{Entry, Node, NodeKey, Nodes};
use crate::order_list::OrderList;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use hashbrown::hash_map::DefaultHashBuilder;
use slotmap::SlotMap;

/// Hash map iterating in first-insertion order. See the crate docs.
pub struct LinkedHashMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    nodes: Nodes<K, V>, // entries plus the two sentinels
    table: BucketTable,
    order: OrderList,
    id: MapId,
}

impl<K, V> LinkedHashMap<K, V> {
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Pre-size the bucket table so that `capacity` inserts never grow it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, Default::default())
    }
}

impl<K, V, S: Default> Default for LinkedHashMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> LinkedHashMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_parts(hasher, BucketTable::new(), 0)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::from_parts(hasher, BucketTable::for_entries(capacity), capacity)
    }

    fn from_parts(hasher: S, table: BucketTable, capacity: usize) -> Self {
        let mut nodes = SlotMap::with_capacity_and_key(capacity.saturating_add(2));
        let order = OrderList::new(&mut nodes);
        Self {
            hasher,
            nodes,
            table,
            order,
            id: MapId::fresh(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current number of buckets. Always a power of two, never below 16.
    pub fn bucket_count(&self) -> usize {
        self.table.capacity()
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Cursor at the first entry in insertion order, or `end()` when empty.
    pub fn begin(&self) -> Cursor {
        self.cursor(self.order.first(&self.nodes))
    }

    /// Past-the-end cursor. It can be retreated but never dereferenced.
    pub fn end(&self) -> Cursor {
        self.cursor(self.order.tail())
    }

    pub fn front(&self) -> Option<(&K, &V)> {
        self.entry(self.order.first(&self.nodes))
            .map(|e| (&e.key, &e.value))
    }

    pub fn back(&self) -> Option<(&K, &V)> {
        self.entry(self.order.last(&self.nodes))
            .map(|e| (&e.key, &e.value))
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, &self.order, self.len())
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.nodes, &self.order)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Drop every entry. The bucket table keeps its capacity and every
    /// outstanding cursor except `end()` becomes invalid.
    pub fn clear(&mut self) {
        let (head, tail) = (self.order.head(), self.order.tail());
        let dropped = self.len();
        self.nodes.retain(|k, _| k == head || k == tail);
        self.order.reset(&mut self.nodes);
        self.table.clear();
        log::trace!(
            "cleared {} entries, keeping {} buckets",
            dropped,
            self.table.capacity()
        );
    }

    /// Remove the entry `cursor` names and return it.
    ///
    /// Fails with [`Error::InvalidIterator`] when the cursor is `end()`,
    /// belongs to another map, or names an entry that is already gone.
    pub fn erase(&mut self, cursor: Cursor) -> Result<(K, V)> {
        let node = self.live_node(cursor)?;
        self.unlink_node(node).ok_or(Error::InvalidIterator)
    }

    pub(crate) fn cursor(&self, node: NodeKey) -> Cursor {
        Cursor::new(self.id, node)
    }

    fn entry(&self, node: NodeKey) -> Option<&Entry<K, V>> {
        self.nodes.get(node).and_then(|n| n.entry.as_ref())
    }

    /// Resolve a cursor to a node of this map that is not the head
    /// sentinel. `end()` resolves.
    fn position(&self, cursor: Cursor) -> Result<NodeKey> {
        let node = cursor.node();
        if cursor.map_id() != self.id
            || node == self.order.head()
            || !self.nodes.contains_key(node)
        {
            return Err(Error::InvalidIterator);
        }
        Ok(node)
    }

    /// Resolve a cursor to a live, dereferenceable entry.
    fn live_node(&self, cursor: Cursor) -> Result<NodeKey> {
        let node = self.position(cursor)?;
        if self.nodes[node].is_sentinel() {
            return Err(Error::InvalidIterator);
        }
        Ok(node)
    }

    pub(crate) fn cursor_entry(&self, cursor: Cursor) -> Result<(&K, &V)> {
        let node = self.live_node(cursor)?;
        self.entry(node)
            .map(|e| (&e.key, &e.value))
            .ok_or(Error::InvalidIterator)
    }

    pub(crate) fn cursor_value_mut(&mut self, cursor: Cursor) -> Result<&mut V> {
        let node = self.live_node(cursor)?;
        self.nodes[node]
            .entry
            .as_mut()
            .map(|e| &mut e.value)
            .ok_or(Error::InvalidIterator)
    }

    pub(crate) fn cursor_next(&self, cursor: Cursor) -> Result<Cursor> {
        let node = self.position(cursor)?;
        if node == self.order.tail() {
            return Err(Error::InvalidIterator);
        }
        let next = self.nodes[node].links.next.ok_or(Error::InvalidIterator)?;
        Ok(self.cursor(next))
    }

    pub(crate) fn cursor_prev(&self, cursor: Cursor) -> Result<Cursor> {
        let node = self.position(cursor)?;
        if node == self.order.first(&self.nodes) {
            return Err(Error::InvalidIterator);
        }
        let prev = self.nodes[node].links.prev.ok_or(Error::InvalidIterator)?;
        Ok(self.cursor(prev))
    }

    pub(crate) fn is_end(&self, cursor: Cursor) -> bool {
        cursor.map_id() == self.id && cursor.node() == self.order.tail()
    }

    /// Append a key known to be absent. Grows the table first if the new
    /// entry would break the load factor.
    fn push_new(&mut self, key: K, value: V, hash: u64) -> NodeKey {
        if self.table.needs_grow(self.len() + 1) {
            self.table.grow(&mut self.nodes);
        }
        let node = self.nodes.insert(Node::live(key, value, hash));
        self.table.link(&mut self.nodes, node);
        self.order.push_back(&mut self.nodes, node);
        node
    }

    fn unlink_node(&mut self, node: NodeKey) -> Option<(K, V)> {
        if !self.table.unlink(&mut self.nodes, node) {
            return None;
        }
        self.order.unlink(&mut self.nodes, node);
        let entry = self.nodes.remove(node)?.entry?;
        Some((entry.key, entry.value))
    }

    pub(crate) fn into_parts(self) -> (Nodes<K, V>, OrderList) {
        (self.nodes, self.order)
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn find_node<Q>(&self, q: &Q) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.table.find(&self.nodes, hash, |k| k.borrow() == q)
    }

    /// Insert `key -> value` at the back of the order list.
    ///
    /// When the key is already present nothing changes: the stored value and
    /// position are kept, `value` is dropped, and the returned flag is
    /// `false`. The cursor names the entry for `key` in both cases.
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        let hash = self.make_hash(&key);
        if let Some(node) = self.table.find(&self.nodes, hash, |k| *k == key) {
            return (self.cursor(node), false);
        }
        let node = self.push_new(key, value, hash);
        (self.cursor(node), true)
    }

    pub fn find<Q>(&self, q: &Q) -> Option<Cursor>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_node(q).map(|node| self.cursor(node))
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.find_node(q)?;
        self.entry(node).map(|e| &e.value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.find_node(q)?;
        self.nodes[node].entry.as_mut().map(|e| &mut e.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find_node(q).is_some()
    }

    /// Number of entries for `q`: 0 or 1.
    pub fn count<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        usize::from(self.contains_key(q))
    }

    /// Checked lookup. Fails with [`Error::IndexOutOfBound`] when absent.
    pub fn at<Q>(&self, q: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).ok_or(Error::IndexOutOfBound)
    }

    pub fn at_mut<Q>(&mut self, q: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(q).ok_or(Error::IndexOutOfBound)
    }

    /// Value for `key`, inserting `default()` at the back first if absent.
    /// `default` only runs when an insert happens.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let hash = self.make_hash(&key);
        let node = match self.table.find(&self.nodes, hash, |k| *k == key) {
            Some(node) => node,
            None => self.push_new(key, default(), hash),
        };
        &mut self.nodes[node]
            .entry
            .as_mut()
            .expect("node found or linked above is live")
            .value
    }

    /// Mutable indexed access: looks `key` up, default-inserting it first.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.find_node(q)?;
        self.unlink_node(node)
    }
}

impl<K, V, S> Clone for LinkedHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    /// Deep copy into fresh storage, re-appending entries in source order.
    /// The copy is a different map: cursors from one never work on the other.
    fn clone(&self) -> Self {
        let mut out = Self::from_parts(
            self.hasher.clone(),
            BucketTable::with_buckets(self.table.capacity()),
            self.len(),
        );
        for node in self.order.keys(&self.nodes) {
            if let Some(e) = self.nodes[node].entry.as_ref() {
                out.push_new(e.key.clone(), e.value.clone(), e.hash);
            }
        }
        out
    }
}

impl<K, V, S> fmt::Debug for LinkedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal when they hold equal entries in the same order.
impl<K, V, S> PartialEq for LinkedHashMap<K, V, S>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, S> Eq for LinkedHashMap<K, V, S> {}

impl<K, Q, V, S> Index<&Q> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Eq + Hash,
    S: BuildHasher,
{
    type Output = V;

    /// Panics with [`Error::IndexOutOfBound`] when the key is absent.
    fn index(&self, key: &Q) -> &V {
        match self.at(key) {
            Ok(v) => v,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Keys already present keep their value and position.
impl<K, V, S> Extend<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity_and_hasher(iter.size_hint().0, S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, S> IntoIterator for LinkedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        let len = self.len();
        let (nodes, order) = self.into_parts();
        IntoIter::new(nodes, &order, len)
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
