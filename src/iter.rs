//! Iterators over a `LinkedHashMap` in insertion order.

use crate::node::{Entry, NodeKey, Nodes};
use crate::order_list::OrderList;
use core::iter::FusedIterator;
use slotmap::SecondaryMap;

/// Iterator over shared entries, walking the order list from both ends.
pub struct Iter<'a, K, V> {
    nodes: &'a Nodes<K, V>,
    front: NodeKey,
    back: NodeKey,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(nodes: &'a Nodes<K, V>, order: &OrderList, len: usize) -> Self {
        Self {
            nodes,
            front: order.first(nodes),
            back: order.last(nodes),
            remaining: len,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.front)?;
        self.front = node.links.next.unwrap_or(self.front);
        self.remaining -= 1;
        node.entry.as_ref().map(|e| (&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.get(self.back)?;
        self.back = node.links.prev.unwrap_or(self.back);
        self.remaining -= 1;
        node.entry.as_ref().map(|e| (&e.key, &e.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over entries with mutable values.
///
/// Handing out many `&mut V` from one slot map cannot be done by chasing
/// links lazily, so construction resolves the order up front: one pass over
/// the order list for keys, one pass over the slots for the references.
pub struct IterMut<'a, K, V> {
    inner: std::vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(nodes: &'a mut Nodes<K, V>, order: &OrderList) -> Self {
        let ordered: Vec<NodeKey> = order.keys(nodes).collect();
        let mut refs = SecondaryMap::with_capacity(nodes.len());
        for (slot, node) in nodes.iter_mut() {
            if let Some(Entry { key, value, .. }) = node.entry.as_mut() {
                refs.insert(slot, (&*key, value));
            }
        }
        let inner: Vec<(&'a K, &'a mut V)> =
            ordered.into_iter().filter_map(|k| refs.remove(k)).collect();
        Self {
            inner: inner.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator. Entries not yet yielded are dropped with it.
pub struct IntoIter<K, V> {
    nodes: Nodes<K, V>,
    front: NodeKey,
    back: NodeKey,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(nodes: Nodes<K, V>, order: &OrderList, len: usize) -> Self {
        let front = order.first(&nodes);
        let back = order.last(&nodes);
        Self {
            nodes,
            front,
            back,
            remaining: len,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.remove(self.front)?;
        self.front = node.links.next.unwrap_or(self.front);
        self.remaining -= 1;
        node.entry.map(|e| (e.key, e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.nodes.remove(self.back)?;
        self.back = node.links.prev.unwrap_or(self.back);
        self.remaining -= 1;
        node.entry.map(|e| (e.key, e.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

#[cfg(test)]
mod tests {
    use crate::LinkedHashMap;

    fn sample() -> LinkedHashMap<&'static str, i32> {
        [("x", 1), ("y", 2), ("z", 3)].into_iter().collect()
    }

    /// Invariant: mixed front/back consumption never yields an entry twice.
    #[test]
    fn iter_meets_in_the_middle() {
        let m = sample();
        let mut it = m.iter();
        assert_eq!(it.len(), 3);
        assert_eq!(it.next(), Some((&"x", &1)));
        assert_eq!(it.next_back(), Some((&"z", &3)));
        assert_eq!(it.len(), 1);
        assert_eq!(it.next_back(), Some((&"y", &2)));
        assert_eq!(it.next(), None);
    }

    /// Invariant: iter_mut visits in order and writes stick.
    #[test]
    fn iter_mut_in_order() {
        let mut m = sample();
        let mut seen = Vec::new();
        for (k, v) in m.iter_mut() {
            seen.push(*k);
            *v *= 10;
        }
        assert_eq!(seen, vec!["x", "y", "z"]);
        for v in m.values_mut().rev() {
            *v += 1;
        }
        assert_eq!(m.values().copied().collect::<Vec<_>>(), vec![11, 21, 31]);
    }

    /// Invariant: order survives erasures in the middle.
    #[test]
    fn iterators_skip_erased() {
        let mut m = sample();
        m.remove("y");
        assert_eq!(m.keys().rev().copied().collect::<Vec<_>>(), vec!["z", "x"]);
        let mut n = 0;
        for (_, v) in &mut m {
            *v = -*v;
            n += 1;
        }
        assert_eq!(n, 2);
        assert_eq!(
            (&m).into_iter().collect::<Vec<_>>(),
            vec![(&"x", &-1), (&"z", &-3)]
        );
    }

    /// Invariant: dropping a partly consumed owning iterator drops the rest.
    #[test]
    fn into_iter_partial_drop() {
        use std::rc::Rc;
        let tracker = Rc::new(());
        let mut m = LinkedHashMap::new();
        for i in 0..4 {
            m.insert(i, Rc::clone(&tracker));
        }
        assert_eq!(Rc::strong_count(&tracker), 5);
        let mut it = m.into_iter();
        let _ = it.next();
        drop(it);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }
}
