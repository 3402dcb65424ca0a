//! Element-wise construction and destruction over uninitialized ranges.
//!
//! Every constructing helper either fills its whole destination range or,
//! if producing an element panics, destroys the elements it already built
//! before the panic propagates.

use core::ptr;

use crate::allocator::Allocator;
use crate::guard::ConstructionGuard;

/// Clones every element of `src` into the slots starting at `dst`.
///
/// # Safety
/// `dst` must be valid for writes of `src.len()` values and must not overlap
/// `src`.
pub(crate) unsafe fn copy_construct<T: Clone, A: Allocator>(alloc: &A, src: &[T], dst: *mut T) {
    let mut guard = ConstructionGuard::new(alloc, dst);
    for item in src {
        guard.construct(item.clone());
    }
    guard.release();
}

/// Constructs `n` clones of `value` into the slots starting at `dst`.
///
/// # Safety
/// `dst` must be valid for writes of `n` values.
pub(crate) unsafe fn fill_construct<T: Clone, A: Allocator>(
    alloc: &A,
    dst: *mut T,
    n: usize,
    value: &T,
) {
    let mut guard = ConstructionGuard::new(alloc, dst);
    for _ in 0..n {
        guard.construct(value.clone());
    }
    guard.release();
}

/// Constructs `n` values produced by `f` into the slots starting at `dst`.
///
/// # Safety
/// `dst` must be valid for writes of `n` values.
pub(crate) unsafe fn construct_with<T, A: Allocator, F: FnMut() -> T>(
    alloc: &A,
    dst: *mut T,
    n: usize,
    mut f: F,
) {
    let mut guard = ConstructionGuard::new(alloc, dst);
    for _ in 0..n {
        guard.construct(f());
    }
    guard.release();
}

/// Constructs exactly `n` values taken from `iter` into the slots starting
/// at `dst`.
///
/// # Panics
/// Panics if `iter` runs out of elements early; the elements taken so far
/// are destroyed before unwinding continues.
///
/// # Safety
/// `dst` must be valid for writes of `n` values.
pub(crate) unsafe fn extend_construct<T, A: Allocator, I: Iterator<Item = T>>(
    alloc: &A,
    dst: *mut T,
    n: usize,
    iter: &mut I,
) {
    #[cold]
    #[inline(never)]
    #[track_caller]
    fn assert_failed(expected: usize, got: usize) -> ! {
        panic!(
            "iterator yielded {} elements, but reported an exact length of {}",
            got, expected
        );
    }

    let mut guard = ConstructionGuard::new(alloc, dst);
    while guard.count() < n {
        match iter.next() {
            Some(value) => guard.construct(value),
            None => assert_failed(n, guard.count()),
        }
    }
    guard.release();
}

/// Moves `n` values from `src` to `dst`, leaving `src` logically
/// uninitialized.
///
/// Moves cannot fail, so unlike construction this needs no rollback.
///
/// # Safety
/// `src` must hold `n` live values, `dst` must be valid for `n` writes, and
/// the two ranges must not overlap.
#[inline]
pub(crate) unsafe fn relocate<T>(src: *const T, dst: *mut T, n: usize) {
    ptr::copy_nonoverlapping(src, dst, n);
}

/// Destroys the `n` live values starting at `start`.
///
/// # Safety
/// All `n` slots must hold live values, which must not be used afterwards.
pub(crate) unsafe fn destroy_range<T, A: Allocator>(alloc: &A, start: *mut T, n: usize) {
    for i in 0..n {
        alloc.destroy(start.add(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::Global;

    use core::mem::MaybeUninit;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn slots<T, const N: usize>() -> [MaybeUninit<T>; N] {
        core::array::from_fn(|_| MaybeUninit::uninit())
    }

    #[test]
    fn copy_construct_unwinds_partial_copies() {
        let tracker = LiveTracker::new();
        let src = [tracker.fragile(1), tracker.fragile(2), tracker.fragile(3)];
        let mut dst = slots::<Fragile, 3>();

        tracker.allow_clones(2);
        let result = catch_unwind(AssertUnwindSafe(|| unsafe {
            copy_construct(&Global, &src, dst.as_mut_ptr().cast());
        }));

        assert!(result.is_err());
        assert_eq!(tracker.live(), 3);
    }

    #[test]
    fn fill_construct_writes_every_slot() {
        let mut dst = slots::<u32, 4>();
        unsafe {
            fill_construct(&Global, dst.as_mut_ptr().cast::<u32>(), 4, &7u32);
            let filled = core::slice::from_raw_parts(dst.as_ptr().cast::<u32>(), 4);
            assert_eq!(filled, &[7, 7, 7, 7]);
        }
    }

    #[test]
    fn construct_with_unwinds_on_panicking_generator() {
        let drop_count = DropCounter::new();
        let mut dst = slots::<Droppable<u32>, 5>();
        let mut next = 0u32;

        let result = catch_unwind(AssertUnwindSafe(|| unsafe {
            construct_with(&Global, dst.as_mut_ptr().cast::<Droppable<u32>>(), 5, || {
                next += 1;
                if next == 4 {
                    panic!("generator failed");
                }
                drop_count.new_droppable(next)
            });
        }));

        assert!(result.is_err());
        assert_eq!(drop_count.dropped(), 3);
    }

    #[test]
    #[should_panic(expected = "reported an exact length of 3")]
    fn extend_construct_rejects_short_iterators() {
        let mut dst = slots::<u8, 3>();
        let mut iter = [1u8, 2].into_iter();
        unsafe { extend_construct(&Global, dst.as_mut_ptr().cast::<u8>(), 3, &mut iter) };
    }

    #[test]
    fn relocate_and_destroy_preserve_drop_counts() {
        let drop_count = DropCounter::new();
        let mut src = slots::<Droppable<u32>, 3>();
        let mut dst = slots::<Droppable<u32>, 3>();
        unsafe {
            construct_with(&Global, src.as_mut_ptr().cast::<Droppable<u32>>(), 3, || {
                drop_count.new_droppable(9u32)
            });
            relocate(
                src.as_ptr().cast::<Droppable<u32>>(),
                dst.as_mut_ptr().cast::<Droppable<u32>>(),
                3,
            );
            assert_eq!(drop_count.dropped(), 0);

            destroy_range(&Global, dst.as_mut_ptr().cast::<Droppable<u32>>(), 3);
        }
        assert_eq!(drop_count.dropped(), 3);
    }
}
