//! OrderList: sentinel-bounded doubly linked list threaded through the arena.
//!
//! The list is the only authority for iteration order. New entries are
//! appended before `tail`; erased entries are unlinked in place. Rehashing
//! never touches these links.

use crate::node::{Node, NodeKey, Nodes};

#[derive(Copy, Clone, Debug)]
pub(crate) struct OrderList {
    head: NodeKey,
    tail: NodeKey,
}

impl OrderList {
    /// Allocate both sentinels in `nodes` and link them to each other.
    pub(crate) fn new<K, V>(nodes: &mut Nodes<K, V>) -> Self {
        let head = nodes.insert(Node::sentinel());
        let tail = nodes.insert(Node::sentinel());
        let list = OrderList { head, tail };
        list.reset(nodes);
        list
    }

    pub(crate) fn head(&self) -> NodeKey {
        self.head
    }

    pub(crate) fn tail(&self) -> NodeKey {
        self.tail
    }

    pub(crate) fn is_sentinel(&self, key: NodeKey) -> bool {
        key == self.head || key == self.tail
    }

    /// First live entry, or `tail` when the list is empty.
    pub(crate) fn first<K, V>(&self, nodes: &Nodes<K, V>) -> NodeKey {
        nodes[self.head].links.next.unwrap_or(self.tail)
    }

    /// Last live entry, or `head` when the list is empty.
    pub(crate) fn last<K, V>(&self, nodes: &Nodes<K, V>) -> NodeKey {
        nodes[self.tail].links.prev.unwrap_or(self.head)
    }

    /// Link `key` between the current last entry and `tail`.
    pub(crate) fn push_back<K, V>(&self, nodes: &mut Nodes<K, V>, key: NodeKey) {
        let last = self.last(nodes);
        nodes[key].links.prev = Some(last);
        nodes[key].links.next = Some(self.tail);
        nodes[last].links.next = Some(key);
        nodes[self.tail].links.prev = Some(key);
    }

    /// Splice `key` out of the list. Its neighbours are joined and its own
    /// links are cleared.
    pub(crate) fn unlink<K, V>(&self, nodes: &mut Nodes<K, V>, key: NodeKey) {
        debug_assert!(!self.is_sentinel(key), "sentinels are never unlinked");
        let links = core::mem::take(&mut nodes[key].links);
        if let (Some(prev), Some(next)) = (links.prev, links.next) {
            nodes[prev].links.next = Some(next);
            nodes[next].links.prev = Some(prev);
        }
    }

    /// Back to the empty `head <-> tail` state. Does not free entries.
    pub(crate) fn reset<K, V>(&self, nodes: &mut Nodes<K, V>) {
        nodes[self.head].links.prev = None;
        nodes[self.head].links.next = Some(self.tail);
        nodes[self.tail].links.prev = Some(self.head);
        nodes[self.tail].links.next = None;
    }

    /// Walk the live entries from first to last.
    pub(crate) fn keys<'a, K, V>(
        &self,
        nodes: &'a Nodes<K, V>,
    ) -> impl Iterator<Item = NodeKey> + 'a {
        let tail = self.tail;
        let mut cur = self.first(nodes);
        core::iter::from_fn(move || {
            if cur == tail {
                return None;
            }
            let here = cur;
            cur = nodes[here].links.next.unwrap_or(tail);
            Some(here)
        })
    }
}
