//! Container types.
//!
//! [`Vec`] is a growable array that obtains its memory from an
//! [`Allocator`](crate::Allocator); [`FixedArray`] is a checked wrapper
//! around a plain array and never allocates.

pub mod array;
pub mod vec;

pub use array::FixedArray;
pub use vec::{erase_if, erase_value, Vec};
