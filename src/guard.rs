//! Scoped rollback guards.
//!
//! Both guards undo partial work when they are dropped while still armed,
//! which happens when an element constructor panics halfway through an
//! operation. Each operation disarms its guards with `release` once nothing
//! after that point can fail.

use core::ptr::NonNull;

use crate::allocator::{allocate_array, deallocate_array, Allocator};
use crate::error::Result;

/// Tracks elements constructed into consecutive uninitialized slots.
///
/// Unless released, dropping the guard destroys every element between the
/// start slot and the current cursor.
pub(crate) struct ConstructionGuard<'a, T, A: Allocator> {
    alloc: &'a A,
    start: *mut T,
    count: usize,
    armed: bool,
}

impl<'a, T, A: Allocator> ConstructionGuard<'a, T, A> {
    #[inline]
    pub(crate) fn new(alloc: &'a A, start: *mut T) -> Self {
        ConstructionGuard {
            alloc,
            start,
            count: 0,
            armed: true,
        }
    }

    /// Constructs `value` in the slot at the cursor and advances it.
    ///
    /// # Safety
    /// The slot at the cursor must be valid for writes and uninitialized.
    #[inline]
    pub(crate) unsafe fn construct(&mut self, value: T) {
        self.alloc.construct(self.start.add(self.count), value);
        self.count += 1;
    }

    /// Returns the number of elements constructed so far.
    #[inline]
    pub(crate) fn count(&self) -> usize {
        self.count
    }

    /// Disarms the guard, keeping all constructed elements alive.
    #[inline]
    pub(crate) fn release(mut self) -> usize {
        self.armed = false;
        self.count
    }
}

impl<T, A: Allocator> Drop for ConstructionGuard<'_, T, A> {
    fn drop(&mut self) {
        if self.armed {
            log::trace!("rolling back {} constructed elements", self.count);
            for i in 0..self.count {
                unsafe { self.alloc.destroy(self.start.add(i)) };
            }
        }
    }
}

/// Owns a freshly allocated block that holds no live elements.
///
/// Unless released, dropping the guard returns the block to the allocator.
pub(crate) struct RawMemory<'a, T, A: Allocator> {
    alloc: &'a A,
    ptr: NonNull<T>,
    cap: usize,
    armed: bool,
}

impl<'a, T, A: Allocator> RawMemory<'a, T, A> {
    /// Allocates room for `cap` values of type `T`.
    #[inline]
    pub(crate) fn allocate(alloc: &'a A, cap: usize) -> Result<Self> {
        let ptr = allocate_array::<T, A>(alloc, cap)?;
        Ok(RawMemory {
            alloc,
            ptr,
            cap,
            armed: true,
        })
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Disarms the guard, handing ownership of the block to the caller.
    #[inline]
    pub(crate) fn release(mut self) -> NonNull<T> {
        self.armed = false;
        self.ptr
    }
}

impl<T, A: Allocator> Drop for RawMemory<'_, T, A> {
    fn drop(&mut self) {
        if self.armed {
            log::trace!("releasing abandoned block of {} slots", self.cap);
            unsafe { deallocate_array(self.alloc, self.ptr, self.cap) };
        }
    }
}
