use thiserror::Error;

/// Contract violations reported by checked map and cursor operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum Error {
    /// A cursor was dereferenced, moved or erased while not naming a live
    /// entry of the map it was used with: it sits at `end()`, would move
    /// before `begin()`, names an erased entry, or came from another map.
    #[error("invalid iterator")]
    InvalidIterator,
    /// A checked lookup found no entry for the key.
    #[error("index out of bound: key not present")]
    IndexOutOfBound,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
