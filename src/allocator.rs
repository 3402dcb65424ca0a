//! The allocator abstraction used by the containers in this crate.
//!
//! An [`Allocator`] hands out untyped blocks of memory and controls the
//! lifetime of the objects placed into them: containers never write into a
//! slot or drop an element except through [`Allocator::construct`] and
//! [`Allocator::destroy`]. Relocating an element from one block to another
//! is a plain bitwise move and does not involve the allocator.
//!
//! Besides the memory interface, an allocator carries a set of flags that
//! decide whether the allocator value itself travels along when the owning
//! container is copy-assigned, move-assigned or swapped.

use core::alloc::Layout;
use core::mem::size_of;
use core::ptr::{self, NonNull};

use crate::error::{AllocError, Result};

/// An interface for raw memory allocation and object lifetime management.
///
/// # Safety
/// Implementors must ensure that a block returned by [`allocate`] is valid
/// for reads and writes of `layout.size()` bytes, is aligned to
/// `layout.align()`, and stays valid until it is passed to [`deallocate`]
/// with the same layout. Blocks returned by distinct calls must not overlap.
///
/// Containers never request zero-sized blocks.
///
/// [`allocate`]: Allocator::allocate
/// [`deallocate`]: Allocator::deallocate
pub unsafe trait Allocator {
    /// Whether [`Clone::clone_from`] on a container replaces the target's
    /// allocator with a clone of the source's allocator.
    const PROPAGATE_ON_COPY_ASSIGNMENT: bool = false;

    /// Whether move-assigning a container transfers the source's allocator
    /// along with its memory block.
    ///
    /// If this is `false`, the target keeps its own allocator, and the
    /// elements are moved one by one into memory obtained from it.
    const PROPAGATE_ON_MOVE_ASSIGNMENT: bool = true;

    /// Whether swapping two containers also swaps their allocators.
    const PROPAGATE_ON_SWAP: bool = false;

    /// Attempts to allocate a block of memory described by `layout`.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>>;

    /// Releases the block of memory referenced by `ptr`.
    ///
    /// # Safety
    /// `ptr` must denote a block currently allocated by this allocator (or
    /// one for which [`is_equal`](Allocator::is_equal) returns `true`), and `layout` must be the layout that
    /// block was allocated with.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Places `value` into the uninitialized slot at `slot`.
    ///
    /// # Safety
    /// `slot` must be valid for writes and properly aligned. Any value
    /// previously stored there is overwritten without being dropped.
    #[inline]
    unsafe fn construct<T>(&self, slot: *mut T, value: T) {
        slot.write(value);
    }

    /// Ends the lifetime of the object stored at `slot`, running its
    /// destructor.
    ///
    /// # Safety
    /// `slot` must point to a live, properly aligned value of type `T`,
    /// which must not be used again afterwards.
    #[inline]
    unsafe fn destroy<T>(&self, slot: *mut T) {
        ptr::drop_in_place(slot);
    }

    /// Returns `true` if memory allocated by either allocator can be
    /// deallocated by the other.
    ///
    /// Containers only exchange blocks between allocators that are equal in
    /// this sense. The default implementation returns `false`.
    #[inline]
    fn is_equal(&self, other: &Self) -> bool {
        let _ = other;
        false
    }

    /// Returns the allocator a copy of a container should use.
    ///
    /// The default implementation clones `self`.
    #[inline]
    fn select_on_container_copy_construction(&self) -> Self
    where
        Self: Clone,
    {
        self.clone()
    }
}

unsafe impl<A: Allocator> Allocator for &A {
    const PROPAGATE_ON_COPY_ASSIGNMENT: bool = A::PROPAGATE_ON_COPY_ASSIGNMENT;
    const PROPAGATE_ON_MOVE_ASSIGNMENT: bool = A::PROPAGATE_ON_MOVE_ASSIGNMENT;
    const PROPAGATE_ON_SWAP: bool = A::PROPAGATE_ON_SWAP;

    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).deallocate(ptr, layout)
    }

    #[inline]
    unsafe fn construct<T>(&self, slot: *mut T, value: T) {
        (**self).construct(slot, value)
    }

    #[inline]
    unsafe fn destroy<T>(&self, slot: *mut T) {
        (**self).destroy(slot)
    }

    #[inline]
    fn is_equal(&self, other: &Self) -> bool {
        (**self).is_equal(*other)
    }
}

/// The global memory allocator.
///
/// This forwards to whatever allocator is registered with
/// `#[global_allocator]`, the system allocator by default. It is zero-sized,
/// so containers using it carry no overhead for it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Global;

unsafe impl Allocator for Global {
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>> {
        debug_assert!(layout.size() != 0);
        let ptr = unsafe { alloc::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or_else(|| AllocError::failed(layout))
    }

    #[inline]
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        alloc::alloc::dealloc(ptr.as_ptr(), layout)
    }

    #[inline]
    fn is_equal(&self, _: &Self) -> bool {
        true
    }
}

/// Returns `true` if values of type `T` occupy no memory.
#[inline(always)]
pub(crate) const fn is_zst<T>() -> bool {
    size_of::<T>() == 0
}

/// Computes the layout of an array of `n` values of type `T`.
#[inline]
pub(crate) fn array_layout<T>(n: usize) -> Result<Layout> {
    Layout::array::<T>(n).map_err(|_| AllocError::CapacityOverflow)
}

/// Allocates uninitialized storage for `n` values of type `T`.
///
/// No memory is requested for empty arrays or zero-sized types; a dangling
/// pointer is returned instead.
pub(crate) fn allocate_array<T, A: Allocator>(alloc: &A, n: usize) -> Result<NonNull<T>> {
    if n == 0 || is_zst::<T>() {
        return Ok(NonNull::dangling());
    }

    let layout = array_layout::<T>(n)?;
    match alloc.allocate(layout) {
        Ok(ptr) => Ok(ptr.cast()),
        Err(err) => {
            log::debug!(
                "allocation of {} slots ({} bytes) failed: {}",
                n,
                layout.size(),
                err
            );
            Err(err)
        }
    }
}

/// Releases storage obtained from [`allocate_array`].
///
/// # Safety
/// `ptr` and `n` must be exactly the pointer and count of a previous call to
/// `allocate_array` on `alloc`, and no live values may remain in the block.
pub(crate) unsafe fn deallocate_array<T, A: Allocator>(alloc: &A, ptr: NonNull<T>, n: usize) {
    if n == 0 || is_zst::<T>() {
        return;
    }

    // the layout was valid when the block was allocated
    let layout = Layout::from_size_align_unchecked(size_of::<T>() * n, core::mem::align_of::<T>());
    alloc.deallocate(ptr.cast(), layout);
}

/// Reports an allocation failure from a method that cannot return it.
///
/// Capacity overflows panic; failures of the allocator itself are routed to
/// [`alloc::alloc::handle_alloc_error`], which aborts by default.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn handle_alloc_error(err: AllocError) -> ! {
    match err {
        AllocError::CapacityOverflow => panic!("capacity overflow"),
        AllocError::AllocFailed { size, align } => match Layout::from_size_align(size, align) {
            Ok(layout) => alloc::alloc::handle_alloc_error(layout),
            Err(_) => panic!("{}", err),
        },
    }
}
