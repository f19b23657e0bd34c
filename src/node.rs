//! Arena records shared by the bucket table and the order list.
//!
//! Every node lives in one `SlotMap<NodeKey, Node<K, V>>`. A node is either
//! one of the two order-list sentinels (`entry == None`) or a live entry.
//! Live entries are threaded through two structures at once: a singly
//! linked bucket chain (`Entry::chain_next`) and the doubly linked order
//! list (`Links`). Neither relation owns anything; the slot map does.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Generational slot key addressing a node in the arena.
    pub struct NodeKey;
}

pub(crate) type Nodes<K, V> = SlotMap<NodeKey, Node<K, V>>;

/// Order-list neighbours. `prev` is `None` only on the head sentinel and
/// `next` is `None` only on the tail sentinel.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Links {
    pub(crate) prev: Option<NodeKey>,
    pub(crate) next: Option<NodeKey>,
}

#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
    pub(crate) chain_next: Option<NodeKey>,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) links: Links,
    pub(crate) entry: Option<Entry<K, V>>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn sentinel() -> Self {
        Node {
            links: Links::default(),
            entry: None,
        }
    }

    pub(crate) fn live(key: K, value: V, hash: u64) -> Self {
        Node {
            links: Links::default(),
            entry: Some(Entry {
                key,
                value,
                hash,
                chain_next: None,
            }),
        }
    }

    pub(crate) fn is_sentinel(&self) -> bool {
        self.entry.is_none()
    }
}
