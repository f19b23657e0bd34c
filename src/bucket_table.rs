//! BucketTable: chained hash index over the arena.
//!
//! `heads[i]` is the first node of chain `i`; the chain continues through
//! `Entry::chain_next`. Capacity is a power of two, starts at
//! `INITIAL_BUCKETS` and doubles whenever an insert would push the entry
//! count past `capacity * 3 / 4`. The table never shrinks.
//!
//! Chain order is unspecified. Growth relinks every live entry into the new
//! heads using the hash stored in the entry, so `K: Hash` is never invoked
//! here and order-list links are left alone.

use crate::node::{NodeKey, Nodes};

pub(crate) const INITIAL_BUCKETS: usize = 16;

// Load factor 0.75 kept as an exact ratio.
const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;

#[derive(Clone, Debug)]
pub(crate) struct BucketTable {
    heads: Vec<Option<NodeKey>>,
}

impl BucketTable {
    pub(crate) fn new() -> Self {
        Self::with_buckets(INITIAL_BUCKETS)
    }

    pub(crate) fn with_buckets(buckets: usize) -> Self {
        debug_assert!(buckets.is_power_of_two() && buckets >= INITIAL_BUCKETS);
        Self {
            heads: vec![None; buckets],
        }
    }

    /// Smallest table that holds `entries` without growing.
    pub(crate) fn for_entries(entries: usize) -> Self {
        let mut buckets = INITIAL_BUCKETS;
        while !fits(entries, buckets) {
            buckets *= 2;
        }
        Self::with_buckets(buckets)
    }

    pub(crate) fn capacity(&self) -> usize {
        self.heads.len()
    }

    pub(crate) fn index(&self, hash: u64) -> usize {
        (hash % self.heads.len() as u64) as usize
    }

    /// True when holding `count` entries would break the load factor.
    pub(crate) fn needs_grow(&self, count: usize) -> bool {
        !fits(count, self.capacity())
    }

    /// Scan the chain for `hash` and return the first entry accepted by `eq`.
    pub(crate) fn find<K, V, F>(&self, nodes: &Nodes<K, V>, hash: u64, mut eq: F) -> Option<NodeKey>
    where
        F: FnMut(&K) -> bool,
    {
        let mut cur = self.heads[self.index(hash)];
        while let Some(key) = cur {
            let entry = nodes[key].entry.as_ref()?;
            if entry.hash == hash && eq(&entry.key) {
                return Some(key);
            }
            cur = entry.chain_next;
        }
        None
    }

    /// Prepend `key` to the head of its chain.
    pub(crate) fn link<K, V>(&mut self, nodes: &mut Nodes<K, V>, key: NodeKey) {
        if let Some(entry) = nodes[key].entry.as_mut() {
            let idx = (entry.hash % self.heads.len() as u64) as usize;
            entry.chain_next = self.heads[idx];
            self.heads[idx] = Some(key);
        }
    }

    /// Remove `key` from its chain by linear scan. Returns false when the
    /// entry is not on the chain its hash selects, which means the caller
    /// handed in a node from somewhere else.
    pub(crate) fn unlink<K, V>(&mut self, nodes: &mut Nodes<K, V>, key: NodeKey) -> bool {
        let Some(target) = nodes.get(key).and_then(|n| n.entry.as_ref()) else {
            return false;
        };
        let after = target.chain_next;
        let idx = self.index(target.hash);

        let found = if self.heads[idx] == Some(key) {
            self.heads[idx] = after;
            true
        } else {
            let mut cur = self.heads[idx];
            let mut found = false;
            while let Some(k) = cur {
                let Some(entry) = nodes[k].entry.as_mut() else {
                    break;
                };
                if entry.chain_next == Some(key) {
                    entry.chain_next = after;
                    found = true;
                    break;
                }
                cur = entry.chain_next;
            }
            found
        };

        if found {
            if let Some(entry) = nodes[key].entry.as_mut() {
                entry.chain_next = None;
            }
        }
        found
    }

    /// Double the capacity and relink every live entry.
    pub(crate) fn grow<K, V>(&mut self, nodes: &mut Nodes<K, V>) {
        let old = self.heads.len();
        let new = old * 2;
        let mut heads = vec![None; new];
        for (key, node) in nodes.iter_mut() {
            if let Some(entry) = node.entry.as_mut() {
                let idx = (entry.hash % new as u64) as usize;
                entry.chain_next = heads[idx];
                heads[idx] = Some(key);
            }
        }
        self.heads = heads;
        log::trace!("bucket table grew from {} to {} buckets", old, new);
    }

    /// Empty every chain head; capacity is kept.
    pub(crate) fn clear(&mut self) {
        self.heads.iter_mut().for_each(|h| *h = None);
    }

    #[cfg(test)]
    pub(crate) fn chain_len<K, V>(&self, nodes: &Nodes<K, V>, idx: usize) -> usize {
        let mut n = 0;
        let mut cur = self.heads[idx];
        while let Some(key) = cur {
            n += 1;
            cur = nodes[key].entry.as_ref().and_then(|e| e.chain_next);
        }
        n
    }
}

fn fits(count: usize, buckets: usize) -> bool {
    count.saturating_mul(LOAD_DEN) <= buckets.saturating_mul(LOAD_NUM)
}
