//! Sealed trait marker for `Transport` implementations.

pub(crate) mod private {
    /// Sealed trait marker.
    ///
    /// Cannot be implemented outside this crate, so every transport goes
    /// through the header checks in this module tree.
    pub trait Sealed {}
}
