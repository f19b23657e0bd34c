//! linked-hashmap: a chained hash map that iterates in first-insertion
//! order, with checked bidirectional cursors.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: hash-table lookups plus a stable iteration order defined by the
//!   first insertion of each key. Re-inserting a present key is a no-op and
//!   never moves it.
//! - Layers:
//!   - `node`: one slot-map arena holding every entry and the two
//!     order-list sentinels. Links between nodes are generational keys.
//!   - `bucket_table`: power-of-two array of chain heads (16 to start,
//!     doubling past a 0.75 load factor, never shrinking). Chains are
//!     singly linked through the entries.
//!   - `order_list`: doubly linked list from the head sentinel to the tail
//!     sentinel; the sole authority for iteration order.
//!   - `LinkedHashMap<K, V, S>`: public surface fusing the three.
//!   - `Cursor`: `Copy` position token checked against the map on use.
//!
//! Constraints
//! - Single-threaded; no interior mutability.
//! - No unsafe code. The arena owns every node; the chain and order links
//!   are plain keys that own nothing.
//! - Each entry stores its hash. Growth and erase never call `K: Hash`.
//! - Erase finds the predecessor in the chain by linear scan; entries carry
//!   no back-pointer into their chain.
//!
//! Cursor validity
//! - A cursor carries the identity of the map that minted it and a
//!   generational node key. Using it with another map, after its entry was
//!   erased or cleared, at `end()` for a dereference, or to step outside
//!   `begin()..=end()` returns [`Error::InvalidIterator`]. Stale cursors
//!   never alias entries inserted later, even when a slot is reused.
//!
//! Notes and non-goals
//! - No shrinking, no ordering by key or value, no re-linking on access.
//! - Clones are deep copies with a new identity; cursors do not transfer.

mod bucket_table;
pub mod cursor;
pub mod error;
pub mod iter;
pub mod linked_hash_map;
mod linked_hash_map_proptest;
mod node;
mod order_list;
#[cfg(feature = "serde")]
mod ser;

// Public surface
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use linked_hash_map::LinkedHashMap;
