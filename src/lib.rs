#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/keel/0.1.0")]

//! Allocator-aware containers with rollback-safe growth.
//!
//! The centerpiece is [`Vec`], a growable array that obtains its memory from
//! a pluggable [`Allocator`] and routes every element construction and
//! destruction through it. Operations that run user code keep the vector
//! unchanged if that code panics, and allocation failures are reported as
//! [`AllocError`] values by the `try_*` methods.
//!
//! Around it sit a few smaller building blocks:
//!
//! * [`FixedArray`], a checked wrapper around `[T; N]`,
//! * [`UniquePtr`], a nullable owning pointer with a custom [`Deleter`](unique::Deleter),
//! * [`Mutex`], a thin wrapper over the native pthread mutex (unix only).
//!
//! The crate is `no_std` but requires `alloc`. The `std` feature adds
//! conversions into `std` types.

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod allocator;
pub mod collections;
pub mod error;
pub mod unique;

#[cfg(unix)]
#[cfg_attr(docs_rs, doc(cfg(unix)))]
pub mod sync;

mod guard;
mod uninit;

#[cfg(test)]
mod test_utils;

pub use crate::allocator::{Allocator, Global};
pub use crate::collections::{FixedArray, Vec};
pub use crate::error::{AllocError, SysError};
pub use crate::unique::UniquePtr;

#[cfg(unix)]
#[cfg_attr(docs_rs, doc(cfg(unix)))]
pub use crate::sync::{Mutex, MutexGuard};
