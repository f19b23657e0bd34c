//! Cursor: checked bidirectional position in a map's order list.
//!
//! A cursor is a small `Copy` token (map identity plus a generational node
//! key). It does not borrow the map; every operation takes the map it is
//! used with and validates the token against it. That covers the three
//! invalid states: a cursor from another map, a cursor whose entry was
//! erased (the slot generation no longer matches), and a cursor at a
//! sentinel. Reads go through `&map`, writes through `&mut map`, so one
//! type serves both the mutable and the read-only traversal.

use crate::error::Result;
use crate::linked_hash_map::LinkedHashMap;
use crate::node::NodeKey;
use core::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of one map instance. Clones get a fresh id.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct MapId(u64);

impl MapId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        MapId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Position in a [`LinkedHashMap`]: either a live entry or `end()`.
///
/// Two cursors are equal iff they name the same node of the same map.
///
/// ```
/// use linked_hashmap::{Error, LinkedHashMap};
///
/// let mut map = LinkedHashMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
///
/// let mut cur = map.begin();
/// assert_eq!(cur.get(&map), Ok((&"a", &1)));
/// cur.advance(&map).unwrap();
/// *cur.value_mut(&mut map).unwrap() += 10;
/// cur.advance(&map).unwrap();
/// assert_eq!(cur, map.end());
/// assert_eq!(cur.get(&map), Err(Error::InvalidIterator));
/// assert_eq!(cur.advance(&map), Err(Error::InvalidIterator));
/// assert_eq!(map["b"], 12);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cursor {
    map: MapId,
    node: NodeKey,
}

impl Cursor {
    pub(crate) fn new(map: MapId, node: NodeKey) -> Self {
        Self { map, node }
    }

    pub(crate) fn map_id(&self) -> MapId {
        self.map
    }

    pub(crate) fn node(&self) -> NodeKey {
        self.node
    }

    /// True when this is the past-the-end cursor of `map`.
    pub fn is_end<K, V, S>(&self, map: &LinkedHashMap<K, V, S>) -> bool {
        map.is_end(*self)
    }

    /// Step forward. Stepping from the last entry lands on `end()`;
    /// stepping from `end()` fails.
    pub fn advance<K, V, S>(&mut self, map: &LinkedHashMap<K, V, S>) -> Result<()> {
        *self = map.cursor_next(*self)?;
        Ok(())
    }

    /// Step backward. Stepping from `end()` lands on the last entry;
    /// stepping from `begin()` fails.
    pub fn retreat<K, V, S>(&mut self, map: &LinkedHashMap<K, V, S>) -> Result<()> {
        *self = map.cursor_prev(*self)?;
        Ok(())
    }

    /// The cursor one step forward, leaving `self` untouched.
    pub fn next<K, V, S>(self, map: &LinkedHashMap<K, V, S>) -> Result<Cursor> {
        map.cursor_next(self)
    }

    /// The cursor one step backward, leaving `self` untouched.
    pub fn prev<K, V, S>(self, map: &LinkedHashMap<K, V, S>) -> Result<Cursor> {
        map.cursor_prev(self)
    }

    pub fn get<'a, K, V, S>(&self, map: &'a LinkedHashMap<K, V, S>) -> Result<(&'a K, &'a V)> {
        map.cursor_entry(*self)
    }

    pub fn key<'a, K, V, S>(&self, map: &'a LinkedHashMap<K, V, S>) -> Result<&'a K> {
        self.get(map).map(|(k, _)| k)
    }

    pub fn value<'a, K, V, S>(&self, map: &'a LinkedHashMap<K, V, S>) -> Result<&'a V> {
        self.get(map).map(|(_, v)| v)
    }

    /// Keys are immutable once inserted; only the value can be changed.
    pub fn value_mut<'a, K, V, S>(&self, map: &'a mut LinkedHashMap<K, V, S>) -> Result<&'a mut V> {
        map.cursor_value_mut(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn abc() -> LinkedHashMap<char, u32> {
        [('a', 1), ('b', 2), ('c', 3)].into_iter().collect()
    }

    /// Invariant: forward walk from begin reaches end in insertion order and
    /// the backward walk from end reproduces it reversed.
    #[test]
    fn forward_then_backward() {
        let m = abc();
        let mut cur = m.begin();
        let mut fwd = Vec::new();
        while !cur.is_end(&m) {
            fwd.push(*cur.key(&m).unwrap());
            cur.advance(&m).unwrap();
        }
        assert_eq!(fwd, vec!['a', 'b', 'c']);

        let mut back = Vec::new();
        while cur != m.begin() {
            cur.retreat(&m).unwrap();
            back.push(*cur.key(&m).unwrap());
        }
        assert_eq!(back, vec!['c', 'b', 'a']);
    }

    /// Invariant: end is not dereferenceable and cannot advance; begin cannot
    /// retreat. Failed moves leave the cursor where it was.
    #[test]
    fn boundaries_are_checked() {
        let m = abc();
        let mut end = m.end();
        assert_eq!(end.get(&m), Err(Error::InvalidIterator));
        assert_eq!(end.advance(&m), Err(Error::InvalidIterator));
        assert_eq!(end, m.end());

        let mut begin = m.begin();
        assert_eq!(begin.retreat(&m), Err(Error::InvalidIterator));
        assert_eq!(begin.value(&m), Ok(&1));
    }

    /// Invariant: on an empty map begin == end and neither direction moves.
    #[test]
    fn empty_map_cursor() {
        let m: LinkedHashMap<u8, u8> = LinkedHashMap::new();
        let mut cur = m.begin();
        assert_eq!(cur, m.end());
        assert!(cur.is_end(&m));
        assert_eq!(cur.retreat(&m), Err(Error::InvalidIterator));
        assert_eq!(cur.advance(&m), Err(Error::InvalidIterator));
    }

    /// Invariant: cursors from different maps never compare equal and are
    /// rejected by the other map, even for structurally identical maps.
    #[test]
    fn foreign_cursor_rejected() {
        let m1 = abc();
        let m2 = abc();
        assert_ne!(m1.begin(), m2.begin());
        assert_ne!(m1.end(), m2.end());
        let c = m1.begin();
        assert_eq!(c.get(&m2), Err(Error::InvalidIterator));
        assert_eq!(c.next(&m2), Err(Error::InvalidIterator));
        assert!(!m1.end().is_end(&m2));
    }

    /// Invariant: a cursor to an erased entry stays invalid, also after its
    /// slot is reused by a new entry.
    #[test]
    fn erased_cursor_is_stale() {
        let mut m = abc();
        let b = m.find(&'b').unwrap();
        m.erase(b).unwrap();
        assert_eq!(b.get(&m), Err(Error::InvalidIterator));
        assert_eq!(b.next(&m), Err(Error::InvalidIterator));
        assert_eq!(m.erase(b), Err(Error::InvalidIterator));

        let (d, _) = m.insert('d', 4);
        assert_ne!(b, d);
        assert_eq!(b.get(&m), Err(Error::InvalidIterator));
        assert_eq!(d.get(&m), Ok((&'d', &4)));
    }

    /// Invariant: erasing through end() fails and leaves the map intact.
    #[test]
    fn erase_end_fails() {
        let mut m = abc();
        let end = m.end();
        assert_eq!(m.erase(end), Err(Error::InvalidIterator));
        assert_eq!(m.len(), 3);
    }

    /// Invariant: retreating from end lands on the last entry; next/prev do
    /// not move the receiver.
    #[test]
    fn end_retreats_to_last() {
        let m = abc();
        let end = m.end();
        let last = end.prev(&m).unwrap();
        assert_eq!(last.get(&m), Ok((&'c', &3)));
        assert!(end.is_end(&m));
        assert_eq!(last.next(&m), Ok(end));
    }

    /// Invariant: writes through a cursor are visible to key lookups.
    #[test]
    fn value_mut_through_cursor() {
        let mut m = abc();
        let c = m.find(&'c').unwrap();
        *c.value_mut(&mut m).unwrap() = 30;
        assert_eq!(m.at(&'c'), Ok(&30));
        assert_eq!(m.end().value_mut(&mut m), Err(Error::InvalidIterator));
    }
}
