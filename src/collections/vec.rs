//! A contiguous growable array type with pluggable allocators.
//!
//! [`Vec`] owns a single block of memory obtained from its [`Allocator`].
//! The first [`len`](Vec::len) slots of that block hold live elements, the
//! remaining slots up to [`capacity`](Vec::capacity) are uninitialized.
//! When an append or insertion needs more room, the vector grows the block
//! by a factor of 1.5, starting from a minimum of eight slots.
//!
//! # Failure safety
//!
//! Every operation that may run user code (`Clone` implementations,
//! generator closures, iterators) provides the strong guarantee: if that
//! code panics, the vector is left exactly as it was before the call, and
//! no memory or elements are leaked. New elements are always built in
//! uninitialized memory before any existing element is touched; only then is
//! the old block retired. Allocation failures are reported by the `try_*`
//! methods as an [`AllocError`] with the same guarantee.
//!
//! # Contract violations
//!
//! Out-of-bounds indices, popping or accessing the ends of an empty vector,
//! and out-of-range insertion or erasure positions are programming errors;
//! they panic rather than return an error.
//!
//! ---
//!
//! Parts of the implementation and documentation of this module were adapted
//! from the Rust standard library Vec.

use crate::allocator::{handle_alloc_error, is_zst, Allocator, Global};
use crate::error::{AllocError, Result};
use crate::guard::RawMemory;
use crate::uninit;

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::{FromIterator, FusedIterator};
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop};
use core::ops::{Bound, Deref, DerefMut, Index, IndexMut, Range, RangeBounds};
use core::ptr::{self, NonNull};
use core::slice;

/// Creates a [`Vec`] containing the arguments.
///
/// Like `vec!`, this comes in two forms: a list of elements, or a single
/// element and a length, which clones the element.
///
/// # Examples
/// ```
/// let v = keel::keel_vec![1, 2, 3];
/// assert_eq!(v, [1, 2, 3]);
///
/// let w = keel::keel_vec![0u8; 4];
/// assert_eq!(w, [0, 0, 0, 0]);
///
/// let e: keel::Vec<u8> = keel::keel_vec![];
/// assert!(e.is_empty());
/// ```
#[macro_export]
macro_rules! keel_vec {
    () => {
        $crate::Vec::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::Vec::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::Vec::from([$($x),+])
    };
}

/// The capacity of the first block allocated by the growth policy.
pub const MIN_NON_ZERO_CAP: usize = 8;

/// A contiguous growable array type, generic over its allocator.
///
/// See the [module-level documentation](crate::collections::vec) for more.
pub struct Vec<T, A: Allocator = Global> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    alloc: A,
    elem: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator + Send> Send for Vec<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for Vec<T, A> {}

#[cold]
#[inline(never)]
#[track_caller]
fn index_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("index out of bounds: the len is {} but the index is {}", len, index)
}

#[cold]
#[inline(never)]
#[track_caller]
fn empty_vector(op: &str) -> ! {
    panic!("called `{}` on an empty vector", op)
}

#[cold]
#[inline(never)]
#[track_caller]
fn insertion_index_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("insertion index (is {}) should be <= len (is {})", index, len)
}

#[inline]
#[track_caller]
fn normalize_range<R: RangeBounds<usize>>(range: R, len: usize) -> Range<usize> {
    #[cold]
    #[inline(never)]
    #[track_caller]
    fn assert_failed(start: usize, end: usize, len: usize) -> ! {
        panic!(
            "range {}..{} is out of bounds for a vector of length {}",
            start, end, len
        )
    }

    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.checked_add(1).unwrap_or_else(|| assert_failed(s, s, len)),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.checked_add(1).unwrap_or_else(|| assert_failed(start, e, len)),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    };

    if start > end || end > len {
        assert_failed(start, end, len);
    }

    start..end
}

impl<T> Vec<T> {
    /// Constructs a new, empty `Vec<T>` without allocating.
    ///
    /// # Examples
    /// ```
    /// let vec = keel::Vec::<u32>::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Vec::new_in(Global)
    }

    /// Constructs a new, empty `Vec<T>` with room for exactly `capacity`
    /// elements.
    ///
    /// # Examples
    /// ```
    /// let vec = keel::Vec::<u32>::with_capacity(10);
    /// assert_eq!(vec.capacity(), 10);
    /// assert!(vec.is_empty());
    /// ```
    #[inline]
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity_in(capacity, Global)
    }

    /// Constructs a vector holding `n` clones of `elem`.
    ///
    /// # Examples
    /// ```
    /// let vec = keel::Vec::from_elem(7, 5);
    /// assert_eq!(vec, [7, 7, 7, 7, 7]);
    /// ```
    #[inline]
    #[track_caller]
    pub fn from_elem(elem: T, n: usize) -> Self
    where
        T: Clone,
    {
        Vec::from_elem_in(elem, n, Global)
    }
}

impl<T, A: Allocator> Vec<T, A> {
    /// Constructs a new, empty `Vec<T, A>` using `alloc`, without allocating.
    #[inline]
    pub const fn new_in(alloc: A) -> Self {
        Vec {
            ptr: NonNull::dangling(),
            len: 0,
            cap: 0,
            alloc,
            elem: PhantomData,
        }
    }

    /// Constructs a new, empty `Vec<T, A>` with room for exactly `capacity`
    /// elements, returning an error if the allocation fails.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self> {
        let mut vec = Vec::new_in(alloc);
        vec.try_reserve_exact(capacity)?;
        Ok(vec)
    }

    /// Constructs a new, empty `Vec<T, A>` with room for exactly `capacity`
    /// elements.
    #[inline]
    #[track_caller]
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Vec::try_with_capacity_in(capacity, alloc).unwrap_or_else(|err| handle_alloc_error(err))
    }

    /// Constructs a vector holding `n` clones of `elem`, using `alloc`.
    #[track_caller]
    pub fn from_elem_in(elem: T, n: usize, alloc: A) -> Self
    where
        T: Clone,
    {
        let mut vec = Vec::with_capacity_in(n, alloc);
        unsafe {
            uninit::fill_construct(&vec.alloc, vec.ptr.as_ptr(), n, &elem);
        }
        vec.len = n;
        vec
    }

    /// Decomposes a `Vec<T, A>` into its raw parts.
    ///
    /// Returns the pointer to the underlying block, the length, the capacity
    /// and the allocator. These are the same arguments in the same order as
    /// the arguments to [`from_raw_parts_in`](Vec::from_raw_parts_in).
    pub fn into_raw_parts_with_alloc(self) -> (NonNull<T>, usize, usize, A) {
        let me = ManuallyDrop::new(self);
        let alloc = unsafe { ptr::read(&me.alloc) };
        (me.ptr, me.len, me.cap, alloc)
    }

    /// Creates a `Vec<T, A>` directly from its raw parts.
    ///
    /// # Safety
    /// `ptr` must have been allocated by `alloc` for exactly `capacity`
    /// values of type `T` (or be dangling if `capacity` is zero), and the
    /// first `length` values must be initialized.
    pub unsafe fn from_raw_parts_in(ptr: NonNull<T>, length: usize, capacity: usize, alloc: A) -> Self {
        debug_assert!(length <= capacity || is_zst::<T>());
        Vec {
            ptr,
            len: length,
            cap: capacity,
            alloc,
            elem: PhantomData,
        }
    }

    /// Returns the number of elements the vector can hold without
    /// reallocating.
    ///
    /// For zero-sized element types this is `usize::MAX`.
    #[inline]
    pub fn capacity(&self) -> usize {
        if is_zst::<T>() {
            usize::MAX
        } else {
            self.cap
        }
    }

    /// Returns the number of elements in the vector, also referred to as its *length*.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the largest number of elements a vector of this type could
    /// theoretically hold.
    #[inline]
    pub fn max_size(&self) -> usize {
        if is_zst::<T>() {
            usize::MAX
        } else {
            isize::MAX as usize / mem::size_of::<T>()
        }
    }

    /// Returns a reference to the underlying allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns a raw pointer to the vector's buffer.
    ///
    /// The pointer is dangling if the vector has not allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns an unsafe mutable pointer to the vector's buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Extracts a slice containing the entire vector.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice of the entire vector.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Forces the length of the vector to `new_len`.
    ///
    /// # Safety
    /// * `new_len` must be less than or equal to `capacity()`.
    /// * All elements at `old_len..new_len` must be fully initialized.
    #[inline]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// Computes the capacity of the block that replaces the current one
    /// when at least `required` slots are needed.
    fn next_capacity(&self, required: usize) -> Result<usize> {
        let mut cap = usize::max(self.cap, MIN_NON_ZERO_CAP);
        while cap < required {
            cap = cap.checked_add(cap / 2).ok_or(AllocError::CapacityOverflow)?;
        }
        Ok(cap)
    }

    /// Retires the current block, whose elements must have been moved out,
    /// and takes ownership of `new_ptr`.
    ///
    /// # Safety
    /// `new_ptr` must have been allocated by `self.alloc` for `new_cap`
    /// slots and already hold the vector's `len` elements.
    unsafe fn adopt(&mut self, new_ptr: NonNull<T>, new_cap: usize) {
        log::trace!(
            "vec: moved {} elements of {} bytes from {} to {} slots",
            self.len,
            mem::size_of::<T>(),
            self.cap,
            new_cap
        );
        crate::allocator::deallocate_array(&self.alloc, self.ptr, self.cap);
        self.ptr = new_ptr;
        self.cap = new_cap;
    }

    /// Moves all elements into a new block of exactly `new_cap` slots.
    fn reallocate(&mut self, new_cap: usize) -> Result<()> {
        debug_assert!(new_cap >= self.len);
        let raw = RawMemory::<T, A>::allocate(&self.alloc, new_cap)?;
        unsafe { uninit::relocate(self.ptr.as_ptr(), raw.as_ptr(), self.len) };
        let new_ptr = raw.release();
        unsafe { self.adopt(new_ptr, new_cap) };
        Ok(())
    }

    /// Ensures the vector can hold at least `new_cap` elements in total,
    /// growing the block according to the growth policy if it can't.
    ///
    /// If the allocation fails, the vector is left unchanged.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::<u32>::new();
    /// vec.try_reserve(10).unwrap();
    /// assert_eq!(vec.capacity(), 12);
    /// ```
    pub fn try_reserve(&mut self, new_cap: usize) -> Result<()> {
        if new_cap <= self.capacity() {
            return Ok(());
        }

        let cap = self.next_capacity(new_cap)?;
        self.reallocate(cap)
    }

    /// Ensures the vector can hold at least `new_cap` elements in total.
    ///
    /// Does nothing if the capacity is already sufficient; capacity never
    /// decreases.
    ///
    /// # Panics
    /// Panics on capacity overflow; allocation failures are reported through
    /// [`handle_alloc_error`](alloc::alloc::handle_alloc_error).
    #[track_caller]
    pub fn reserve(&mut self, new_cap: usize) {
        if let Err(err) = self.try_reserve(new_cap) {
            handle_alloc_error(err);
        }
    }

    /// Ensures the vector can hold at least `new_cap` elements in total,
    /// allocating exactly `new_cap` slots if it can't.
    pub fn try_reserve_exact(&mut self, new_cap: usize) -> Result<()> {
        if new_cap <= self.capacity() {
            return Ok(());
        }

        self.reallocate(new_cap)
    }

    /// Ensures the vector can hold at least `new_cap` elements in total,
    /// allocating exactly `new_cap` slots if it can't.
    #[track_caller]
    pub fn reserve_exact(&mut self, new_cap: usize) {
        if let Err(err) = self.try_reserve_exact(new_cap) {
            handle_alloc_error(err);
        }
    }

    /// Shrinks the capacity of the vector to its length, releasing the block
    /// entirely if the vector is empty.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::<u32>::with_capacity(10);
    /// vec.push(1);
    /// vec.shrink_to_fit();
    /// assert_eq!(vec.capacity(), 1);
    ///
    /// vec.clear();
    /// vec.shrink_to_fit();
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    pub fn try_shrink_to_fit(&mut self) -> Result<()> {
        if is_zst::<T>() || self.len == self.cap {
            return Ok(());
        }

        if self.len == 0 {
            let old = mem::replace(&mut self.ptr, NonNull::dangling());
            let old_cap = mem::replace(&mut self.cap, 0);
            log::trace!("vec: released block of {} slots", old_cap);
            unsafe { crate::allocator::deallocate_array(&self.alloc, old, old_cap) };
            return Ok(());
        }

        self.reallocate(self.len)
    }

    /// Shrinks the capacity of the vector to its length.
    ///
    /// See [`try_shrink_to_fit`](Vec::try_shrink_to_fit).
    #[track_caller]
    pub fn shrink_to_fit(&mut self) {
        if let Err(err) = self.try_shrink_to_fit() {
            handle_alloc_error(err);
        }
    }

    /// Appends the element returned by `f`, constructing it directly in its
    /// final slot, and returns a reference to it.
    ///
    /// If the vector is full, `f` runs after the grown block was allocated
    /// but before any element was moved into it; if `f` panics, the vector is
    /// unchanged.
    pub fn try_emplace_back_with<F: FnOnce() -> T>(&mut self, f: F) -> Result<&mut T> {
        let len = self.len;
        if len == self.capacity() {
            let required = len.checked_add(1).ok_or(AllocError::CapacityOverflow)?;
            let new_cap = self.next_capacity(required)?;
            let raw = RawMemory::<T, A>::allocate(&self.alloc, new_cap)?;
            unsafe {
                self.alloc.construct(raw.as_ptr().add(len), f());
                uninit::relocate(self.ptr.as_ptr(), raw.as_ptr(), len);
            }
            let new_ptr = raw.release();
            unsafe { self.adopt(new_ptr, new_cap) };
        } else {
            unsafe { self.alloc.construct(self.ptr.as_ptr().add(len), f()) };
        }

        self.len = len + 1;
        Ok(unsafe { &mut *self.ptr.as_ptr().add(len) })
    }

    /// Appends the element returned by `f` and returns a reference to it.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::new();
    /// let last = vec.emplace_back_with(|| (1, 'a'));
    /// last.0 += 1;
    /// assert_eq!(vec, [(2, 'a')]);
    /// ```
    #[track_caller]
    pub fn emplace_back_with<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        match self.try_emplace_back_with(f) {
            Ok(slot) => slot,
            Err(err) => handle_alloc_error(err),
        }
    }

    /// Appends an element to the back of the vector, returning an error if
    /// more memory was needed but could not be allocated.
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<&mut T> {
        self.try_emplace_back_with(move || value)
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::new();
    /// vec.push(1);
    /// vec.push(2);
    /// vec.push(3);
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    #[inline]
    #[track_caller]
    pub fn push(&mut self, value: T) {
        self.emplace_back_with(move || value);
    }

    /// Destroys the last element of the vector.
    ///
    /// # Panics
    /// Panics if the vector is empty.
    #[track_caller]
    pub fn pop_back(&mut self) {
        if self.is_empty() {
            empty_vector("pop_back");
        }

        self.len -= 1;
        unsafe { self.alloc.destroy(self.ptr.as_ptr().add(self.len)) };
    }

    /// Removes the last element from the vector and returns it, or [`None`]
    /// if it is empty.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 2, 3]);
    /// assert_eq!(vec.pop(), Some(3));
    /// assert_eq!(vec, [1, 2]);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.len -= 1;
        unsafe { Some(ptr::read(self.ptr.as_ptr().add(self.len))) }
    }

    /// Opens a gap of `count` slots at `index`, lets `fill` construct the new
    /// elements into it, and adjusts the length.
    ///
    /// `fill` receives the allocator and the first slot of the gap; it must
    /// construct exactly `count` elements or unwind after destroying the
    /// ones it built. Nothing about the vector changes until `fill` returns.
    ///
    /// # Safety
    /// `fill` must uphold the contract described above.
    #[track_caller]
    unsafe fn try_insert_with<F>(&mut self, index: usize, count: usize, fill: F) -> Result<usize>
    where
        F: FnOnce(&A, *mut T),
    {
        let len = self.len;
        if index > len {
            insertion_index_out_of_bounds(index, len);
        }

        let required = len.checked_add(count).ok_or(AllocError::CapacityOverflow)?;
        if required > self.capacity() {
            let new_cap = self.next_capacity(required)?;
            let raw = RawMemory::<T, A>::allocate(&self.alloc, new_cap)?;
            let src = self.ptr.as_ptr();
            let dst = raw.as_ptr();

            // build the new elements first, so a panic leaves `self` untouched
            fill(&self.alloc, dst.add(index));
            uninit::relocate(src, dst, index);
            uninit::relocate(src.add(index), dst.add(index + count), len - index);

            let new_ptr = raw.release();
            self.adopt(new_ptr, new_cap);
        } else if count > 0 {
            let base = self.ptr.as_ptr();
            fill(&self.alloc, base.add(len));
            slice::from_raw_parts_mut(base.add(index), len - index + count).rotate_right(count);
        }

        self.len = required;
        Ok(index)
    }

    /// Constructs the element returned by `f` at position `index`, shifting
    /// all elements after it to the right, and returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[track_caller]
    pub fn try_emplace_with<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> Result<usize> {
        unsafe {
            self.try_insert_with(index, 1, move |alloc, slot| {
                alloc.construct(slot, f());
            })
        }
    }

    /// Constructs the element returned by `f` at position `index`, shifting
    /// all elements after it to the right, and returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[track_caller]
    pub fn emplace_with<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> usize {
        self.try_emplace_with(index, f)
            .unwrap_or_else(|err| handle_alloc_error(err))
    }

    /// Inserts an element at position `index`, shifting all elements after
    /// it to the right, and returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[inline]
    #[track_caller]
    pub fn try_insert(&mut self, index: usize, element: T) -> Result<usize> {
        self.try_emplace_with(index, move || element)
    }

    /// Inserts an element at position `index`, shifting all elements after
    /// it to the right, and returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 2, 3]);
    /// vec.insert(1, 99);
    /// assert_eq!(vec, [1, 99, 2, 3]);
    /// ```
    #[inline]
    #[track_caller]
    pub fn insert(&mut self, index: usize, element: T) -> usize {
        self.emplace_with(index, move || element)
    }

    /// Inserts `count` clones of `value` at position `index`, and returns
    /// `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[track_caller]
    pub fn try_insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<usize>
    where
        T: Clone,
    {
        unsafe {
            self.try_insert_with(index, count, |alloc, slot| {
                uninit::fill_construct(alloc, slot, count, value);
            })
        }
    }

    /// Inserts `count` clones of `value` at position `index`, and returns
    /// `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 2]);
    /// vec.insert_n(1, 3, &0);
    /// assert_eq!(vec, [1, 0, 0, 0, 2]);
    /// ```
    #[track_caller]
    pub fn insert_n(&mut self, index: usize, count: usize, value: &T) -> usize
    where
        T: Clone,
    {
        self.try_insert_n(index, count, value)
            .unwrap_or_else(|err| handle_alloc_error(err))
    }

    /// Inserts clones of all elements of `src` at position `index`, and
    /// returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    #[track_caller]
    pub fn try_insert_slice(&mut self, index: usize, src: &[T]) -> Result<usize>
    where
        T: Clone,
    {
        unsafe {
            self.try_insert_with(index, src.len(), |alloc, slot| {
                uninit::copy_construct(alloc, src, slot);
            })
        }
    }

    /// Inserts clones of all elements of `src` at position `index`, and
    /// returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 2, 5, 6]);
    /// vec.insert_slice(2, &[3, 4]);
    /// assert_eq!(vec, [1, 2, 3, 4, 5, 6]);
    /// ```
    #[track_caller]
    pub fn insert_slice(&mut self, index: usize, src: &[T]) -> usize
    where
        T: Clone,
    {
        self.try_insert_slice(index, src)
            .unwrap_or_else(|err| handle_alloc_error(err))
    }

    /// Inserts all elements yielded by `iter` at position `index`, and
    /// returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`, or if the iterator yields fewer elements
    /// than its reported length.
    #[track_caller]
    pub fn try_insert_iter<I>(&mut self, index: usize, iter: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let mut iter = iter.into_iter();
        let count = iter.len();
        unsafe {
            self.try_insert_with(index, count, |alloc, slot| {
                uninit::extend_construct(alloc, slot, count, &mut iter);
            })
        }
    }

    /// Inserts all elements yielded by `iter` at position `index`, and
    /// returns `index`.
    ///
    /// # Panics
    /// Panics if `index > len`, or if the iterator yields fewer elements
    /// than its reported length.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 5]);
    /// vec.insert_iter(1, 2..5);
    /// assert_eq!(vec, [1, 2, 3, 4, 5]);
    /// ```
    #[track_caller]
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> usize
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.try_insert_iter(index, iter)
            .unwrap_or_else(|err| handle_alloc_error(err))
    }

    /// Destroys the elements in `range`, shifting all elements after it to
    /// the left, and returns the index of the first element that followed
    /// the range.
    ///
    /// The capacity is unchanged.
    ///
    /// # Panics
    /// Panics if the starting point is greater than the end point or if the
    /// end point is greater than the length of the vector.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 2, 3, 4, 5]);
    /// assert_eq!(vec.erase_range(1..3), 1);
    /// assert_eq!(vec, [1, 4, 5]);
    /// ```
    #[track_caller]
    pub fn erase_range<R: RangeBounds<usize>>(&mut self, range: R) -> usize {
        let len = self.len;
        let Range { start, end } = normalize_range(range, len);
        let count = end - start;
        if count == 0 {
            return start;
        }

        unsafe {
            let base = self.ptr.as_ptr();
            // shift the survivors over the erased elements, which end up in
            // the tail and are destroyed from there
            slice::from_raw_parts_mut(base.add(start), len - start).rotate_left(count);
            self.len = len - count;
            uninit::destroy_range(&self.alloc, base.add(len - count), count);
        }

        start
    }

    /// Destroys the element at position `index`, shifting all elements after
    /// it to the left, and returns `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[track_caller]
    pub fn erase(&mut self, index: usize) -> usize {
        if index >= self.len {
            index_out_of_bounds(index, self.len);
        }

        self.erase_range(index..index + 1)
    }

    /// Removes and returns the element at position `index`, shifting all
    /// elements after it to the left.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from(['a', 'b', 'c']);
    /// assert_eq!(vec.remove(0), 'a');
    /// assert_eq!(vec, ['b', 'c']);
    /// ```
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            index_out_of_bounds(index, len);
        }

        unsafe {
            let p = self.ptr.as_ptr().add(index);
            let ret = ptr::read(p);
            ptr::copy(p.add(1), p, len - index - 1);
            self.len = len - 1;
            ret
        }
    }

    /// Retains only the elements specified by the predicate, preserving the
    /// order of the retained elements.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 2, 3, 4]);
    /// vec.retain(|&x| x % 2 == 0);
    /// assert_eq!(vec, [2, 4]);
    /// ```
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        erase_if(self, |item| !f(item));
    }

    /// Shortens the vector, keeping the first `len` elements and destroying
    /// the rest.
    ///
    /// If `len` is greater than the vector's current length, this has no effect.
    pub fn truncate(&mut self, len: usize) {
        let old_len = self.len;
        if len >= old_len {
            return;
        }

        self.len = len;
        unsafe { uninit::destroy_range(&self.alloc, self.ptr.as_ptr().add(len), old_len - len) };
    }

    /// Destroys all elements; the capacity is unchanged.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes the vector to `new_len`, filling new slots with values
    /// returned by `f`.
    pub fn try_resize_with<F: FnMut() -> T>(&mut self, new_len: usize, f: F) -> Result<()> {
        let len = self.len;
        if new_len <= len {
            self.truncate(new_len);
            return Ok(());
        }

        self.try_reserve(new_len)?;
        unsafe { uninit::construct_with(&self.alloc, self.ptr.as_ptr().add(len), new_len - len, f) };
        self.len = new_len;
        Ok(())
    }

    /// Resizes the vector to `new_len`, filling new slots with values
    /// returned by `f`.
    #[track_caller]
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, f: F) {
        if let Err(err) = self.try_resize_with(new_len, f) {
            handle_alloc_error(err);
        }
    }

    /// Resizes the vector to `new_len`, filling new slots with `T::default()`.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 2]);
    /// vec.resize(4);
    /// assert_eq!(vec, [1, 2, 0, 0]);
    /// vec.resize(1);
    /// assert_eq!(vec, [1]);
    /// ```
    #[track_caller]
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Resizes the vector to `new_len`, filling new slots with clones of
    /// `value`.
    pub fn try_resize_with_value(&mut self, new_len: usize, value: &T) -> Result<()>
    where
        T: Clone,
    {
        let len = self.len;
        if new_len <= len {
            self.truncate(new_len);
            return Ok(());
        }

        self.try_reserve(new_len)?;
        unsafe { uninit::fill_construct(&self.alloc, self.ptr.as_ptr().add(len), new_len - len, value) };
        self.len = new_len;
        Ok(())
    }

    /// Resizes the vector to `new_len`, filling new slots with clones of
    /// `value`.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from_elem(7, 5);
    /// vec.resize_with_value(2, &0);
    /// assert_eq!(vec, [7, 7]);
    /// vec.resize_with_value(4, &9);
    /// assert_eq!(vec, [7, 7, 9, 9]);
    /// ```
    #[track_caller]
    pub fn resize_with_value(&mut self, new_len: usize, value: &T)
    where
        T: Clone,
    {
        if let Err(err) = self.try_resize_with_value(new_len, value) {
            handle_alloc_error(err);
        }
    }

    /// Replaces the contents of the vector with `count` clones of `value`.
    ///
    /// Existing elements are overwritten with [`Clone::clone_from`] where
    /// possible. If a clone panics, the vector keeps a valid prefix of the
    /// new contents, but may have lost some of its old elements.
    pub fn try_assign_n(&mut self, count: usize, value: &T) -> Result<()>
    where
        T: Clone,
    {
        self.try_reserve(count)?;

        let len = self.len;
        for slot in &mut self.as_mut_slice()[..usize::min(count, len)] {
            slot.clone_from(value);
        }

        if count < len {
            self.truncate(count);
        } else {
            unsafe { uninit::fill_construct(&self.alloc, self.ptr.as_ptr().add(len), count - len, value) };
            self.len = count;
        }
        Ok(())
    }

    /// Replaces the contents of the vector with `count` clones of `value`.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 2, 3]);
    /// vec.assign_n(2, &5);
    /// assert_eq!(vec, [5, 5]);
    /// ```
    #[track_caller]
    pub fn assign_n(&mut self, count: usize, value: &T)
    where
        T: Clone,
    {
        if let Err(err) = self.try_assign_n(count, value) {
            handle_alloc_error(err);
        }
    }

    /// Replaces the contents of the vector with clones of the elements of
    /// `src`.
    ///
    /// See [`try_assign_n`](Vec::try_assign_n) for the behavior on panics.
    pub fn try_assign_slice(&mut self, src: &[T]) -> Result<()>
    where
        T: Clone,
    {
        let count = src.len();
        self.try_reserve(count)?;

        let len = self.len;
        let overlap = usize::min(count, len);
        for (slot, item) in self.as_mut_slice()[..overlap].iter_mut().zip(src) {
            slot.clone_from(item);
        }

        if count < len {
            self.truncate(count);
        } else {
            unsafe { uninit::copy_construct(&self.alloc, &src[len..], self.ptr.as_ptr().add(len)) };
            self.len = count;
        }
        Ok(())
    }

    /// Replaces the contents of the vector with clones of the elements of
    /// `src`.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 2]);
    /// vec.assign_slice(&[3, 4, 5]);
    /// assert_eq!(vec, [3, 4, 5]);
    /// ```
    #[track_caller]
    pub fn assign_slice(&mut self, src: &[T])
    where
        T: Clone,
    {
        if let Err(err) = self.try_assign_slice(src) {
            handle_alloc_error(err);
        }
    }

    /// Replaces the contents of the vector with the elements yielded by
    /// `iter`.
    ///
    /// Existing elements are overwritten by assignment where possible.
    pub fn try_assign_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<()> {
        let mut iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.try_reserve(lower)?;

        let mut assigned = 0;
        while assigned < self.len {
            match iter.next() {
                Some(value) => {
                    self.as_mut_slice()[assigned] = value;
                    assigned += 1;
                }
                None => break,
            }
        }

        if assigned < self.len {
            self.truncate(assigned);
        } else {
            for value in iter {
                self.try_push(value)?;
            }
        }
        Ok(())
    }

    /// Replaces the contents of the vector with the elements yielded by
    /// `iter`.
    #[track_caller]
    pub fn assign_iter<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if let Err(err) = self.try_assign_iter(iter) {
            handle_alloc_error(err);
        }
    }

    /// Takes the block out of `self`, leaving it empty and without an
    /// allocation, and returns it as a new vector.
    ///
    /// # Examples
    /// ```
    /// let mut a = keel::Vec::from([1, 2, 3]);
    /// let b = a.take();
    /// assert_eq!(b, [1, 2, 3]);
    /// assert_eq!((a.len(), a.capacity()), (0, 0));
    /// ```
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        Vec {
            ptr: mem::replace(&mut self.ptr, NonNull::dangling()),
            len: mem::replace(&mut self.len, 0),
            cap: mem::replace(&mut self.cap, 0),
            alloc: self.alloc.clone(),
            elem: PhantomData,
        }
    }

    /// Replaces the contents of `self` with the elements of `other`,
    /// leaving `other` empty.
    ///
    /// If `A::PROPAGATE_ON_MOVE_ASSIGNMENT` holds, `self` adopts `other`'s
    /// block and allocator, and `other` is left without an allocation. If
    /// not, but the two allocators are [equal](Allocator::is_equal), `self`
    /// adopts the block and keeps its own allocator. Otherwise the elements
    /// are moved over one by one into memory owned by `self`'s allocator;
    /// `other` keeps its (now empty) block.
    pub fn try_move_assign_from(&mut self, other: &mut Self) -> Result<()>
    where
        A: Clone,
    {
        if A::PROPAGATE_ON_MOVE_ASSIGNMENT {
            let taken = other.take();
            *self = taken;
            return Ok(());
        }

        if self.alloc.is_equal(&other.alloc) {
            self.release_all();
            self.ptr = mem::replace(&mut other.ptr, NonNull::dangling());
            self.len = mem::replace(&mut other.len, 0);
            self.cap = mem::replace(&mut other.cap, 0);
            return Ok(());
        }

        self.try_assign_iter(other.drain(..))
    }

    /// Replaces the contents of `self` with the elements of `other`,
    /// leaving `other` empty.
    ///
    /// See [`try_move_assign_from`](Vec::try_move_assign_from).
    #[track_caller]
    pub fn move_assign_from(&mut self, other: &mut Self)
    where
        A: Clone,
    {
        if let Err(err) = self.try_move_assign_from(other) {
            handle_alloc_error(err);
        }
    }

    /// Swaps the contents of two vectors.
    ///
    /// If `A::PROPAGATE_ON_SWAP` holds, the blocks and the allocators are
    /// exchanged. Otherwise each vector keeps its allocator: the blocks are
    /// exchanged only if the allocators are [equal](Allocator::is_equal),
    /// and if they are not, the elements are moved across instead, growing
    /// either block as needed.
    ///
    /// If growing a block fails, both vectors keep their elements.
    pub fn try_swap_with(&mut self, other: &mut Self) -> Result<()> {
        if A::PROPAGATE_ON_SWAP || self.alloc.is_equal(&other.alloc) {
            mem::swap(&mut self.ptr, &mut other.ptr);
            mem::swap(&mut self.len, &mut other.len);
            mem::swap(&mut self.cap, &mut other.cap);
            if A::PROPAGATE_ON_SWAP {
                mem::swap(&mut self.alloc, &mut other.alloc);
            }
            return Ok(());
        }

        let (self_len, other_len) = (self.len, other.len);
        self.try_reserve_exact(other_len)?;
        other.try_reserve_exact(self_len)?;

        let common = usize::min(self_len, other_len);
        unsafe {
            let mine = self.ptr.as_ptr();
            let theirs = other.ptr.as_ptr();
            ptr::swap_nonoverlapping(mine, theirs, common);
            if self_len > common {
                uninit::relocate(mine.add(common), theirs.add(common), self_len - common);
            } else {
                uninit::relocate(theirs.add(common), mine.add(common), other_len - common);
            }
        }
        self.len = other_len;
        other.len = self_len;
        Ok(())
    }

    /// Swaps the contents of two vectors.
    ///
    /// See [`try_swap_with`](Vec::try_swap_with).
    ///
    /// # Examples
    /// ```
    /// let mut a = keel::Vec::from([1, 2, 3]);
    /// let mut b = keel::Vec::from([4]);
    /// a.swap_with(&mut b);
    /// assert_eq!(a, [4]);
    /// assert_eq!(b, [1, 2, 3]);
    ///
    /// // element swaps still come from the slice
    /// b.swap(0, 2);
    /// assert_eq!(b, [3, 2, 1]);
    /// ```
    #[track_caller]
    pub fn swap_with(&mut self, other: &mut Self) {
        if let Err(err) = self.try_swap_with(other) {
            handle_alloc_error(err);
        }
    }

    /// Destroys all elements and releases the block.
    fn release_all(&mut self) {
        self.clear();
        let old = mem::replace(&mut self.ptr, NonNull::dangling());
        let old_cap = mem::replace(&mut self.cap, 0);
        unsafe { crate::allocator::deallocate_array(&self.alloc, old, old_cap) };
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        if index >= self.len {
            index_out_of_bounds(index, self.len);
        }
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        if index >= self.len {
            index_out_of_bounds(index, self.len);
        }
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn index_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        &*self.ptr.as_ptr().add(index)
    }

    /// Returns a mutable reference to the element at `index` without bounds
    /// checking.
    ///
    /// # Safety
    /// `index` must be less than `len()`.
    #[inline]
    pub unsafe fn index_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        &mut *self.ptr.as_ptr().add(index)
    }

    /// Returns a reference to the first element.
    ///
    /// # Panics
    /// Panics if the vector is empty.
    #[inline]
    #[track_caller]
    pub fn front(&self) -> &T {
        if self.is_empty() {
            empty_vector("front");
        }
        unsafe { self.front_unchecked() }
    }

    /// Returns a reference to the first element without checking for
    /// emptiness.
    ///
    /// # Safety
    /// The vector must not be empty.
    #[inline]
    pub unsafe fn front_unchecked(&self) -> &T {
        self.index_unchecked(0)
    }

    /// Returns a reference to the last element.
    ///
    /// # Panics
    /// Panics if the vector is empty.
    #[inline]
    #[track_caller]
    pub fn back(&self) -> &T {
        if self.is_empty() {
            empty_vector("back");
        }
        unsafe { self.back_unchecked() }
    }

    /// Returns a reference to the last element without checking for
    /// emptiness.
    ///
    /// # Safety
    /// The vector must not be empty.
    #[inline]
    pub unsafe fn back_unchecked(&self) -> &T {
        self.index_unchecked(self.len - 1)
    }

    /// Creates a draining iterator that removes the specified range in the
    /// vector and yields the removed items.
    ///
    /// When the iterator **is** dropped, all elements in the range are removed
    /// from the vector, even if the iterator was not fully consumed. If the
    /// iterator **is not** dropped (with [`core::mem::forget`] for example),
    /// the elements after the range are leaked, but no element is dropped
    /// twice.
    ///
    /// # Panics
    /// Panics if the starting point is greater than the end point or if the
    /// end point is greater than the length of the vector.
    ///
    /// # Examples
    /// ```
    /// let mut vec = keel::Vec::from([1, 2, 3, 4, 5]);
    /// let drained: std::vec::Vec<_> = vec.drain(1..3).collect();
    /// assert_eq!(drained, [2, 3]);
    /// assert_eq!(vec, [1, 4, 5]);
    /// ```
    #[track_caller]
    pub fn drain<R: RangeBounds<usize>>(&mut self, range: R) -> Drain<'_, T, A> {
        let Range { start, end } = normalize_range(range, self.len);

        // prevent leaking a Drain iterator from leaving the vector
        // in an invalid state potentially causing undefined behaviour
        let original_len = self.len;
        self.len = start;

        Drain {
            parent: self,
            original_len,
            target_start: start,
            front_index: start,
            back_index: end,
            target_end: end,
        }
    }
}

/// Removes every element equal to `value`, preserving the order of the
/// others, and returns the number of removed elements.
///
/// # Examples
/// ```
/// let mut vec = keel::Vec::from([1, 2, 1, 3, 1]);
/// assert_eq!(keel::collections::vec::erase_value(&mut vec, &1), 3);
/// assert_eq!(vec, [2, 3]);
/// ```
pub fn erase_value<T, U, A>(vec: &mut Vec<T, A>, value: &U) -> usize
where
    T: PartialEq<U>,
    A: Allocator,
{
    erase_if(vec, |item| item == value)
}

/// Removes every element matching `pred`, preserving the order of the
/// others, and returns the number of removed elements.
///
/// # Examples
/// ```
/// let mut vec = keel::Vec::from([1, 2, 3, 4, 5, 6]);
/// assert_eq!(keel::collections::vec::erase_if(&mut vec, |x| x % 3 == 0), 2);
/// assert_eq!(vec, [1, 2, 4, 5]);
/// ```
pub fn erase_if<T, A, F>(vec: &mut Vec<T, A>, mut pred: F) -> usize
where
    A: Allocator,
    F: FnMut(&T) -> bool,
{
    let old_len = vec.len();
    let items = vec.as_mut_slice();

    let mut kept = 0;
    for i in 0..old_len {
        if !pred(&items[i]) {
            items.swap(kept, i);
            kept += 1;
        }
    }

    vec.erase_range(kept..);
    old_len - vec.len()
}

impl<T, A: Allocator + Default> Default for Vec<T, A> {
    #[inline]
    fn default() -> Self {
        Vec::new_in(A::default())
    }
}

impl<T, A: Allocator> Drop for Vec<T, A> {
    fn drop(&mut self) {
        unsafe {
            uninit::destroy_range(&self.alloc, self.ptr.as_ptr(), self.len);
            crate::allocator::deallocate_array(&self.alloc, self.ptr, self.cap);
        }
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for Vec<T, A> {
    fn clone(&self) -> Self {
        let alloc = self.alloc.select_on_container_copy_construction();
        let mut ret = Vec::with_capacity_in(self.len, alloc);
        unsafe {
            uninit::copy_construct(&ret.alloc, self.as_slice(), ret.ptr.as_ptr());
        }
        ret.len = self.len;
        ret
    }

    fn clone_from(&mut self, source: &Self) {
        if A::PROPAGATE_ON_COPY_ASSIGNMENT {
            self.release_all();
            self.alloc = source.alloc.clone();
        }
        self.assign_slice(source.as_slice());
    }
}

impl<T, A: Allocator> Deref for Vec<T, A> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for Vec<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> Index<usize> for Vec<T, A> {
    type Output = T;
    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T, A: Allocator> IndexMut<usize> for Vec<T, A> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index)
    }
}

impl<T, A: Allocator> AsRef<[T]> for Vec<T, A> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for Vec<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for Vec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Hash, A: Allocator> Hash for Vec<T, A> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state);
    }
}

impl<T, U, A1, A2> PartialEq<Vec<U, A2>> for Vec<T, A1>
where
    T: PartialEq<U>,
    A1: Allocator,
    A2: Allocator,
{
    fn eq(&self, other: &Vec<U, A2>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, A: Allocator> Eq for Vec<T, A> {}

impl<T, U, A: Allocator, const N: usize> PartialEq<[U; N]> for Vec<T, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<T, U, A: Allocator> PartialEq<&[U]> for Vec<T, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, A: Allocator> PartialEq<[U]> for Vec<T, A>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialOrd, A: Allocator> PartialOrd for Vec<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        for (a, b) in self.iter().zip(other.iter()) {
            match a.partial_cmp(b)? {
                Ordering::Equal => {}
                unequal => return Some(unequal),
            }
        }
        self.len().partial_cmp(&other.len())
    }
}

impl<T: Ord, A: Allocator> Ord for Vec<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.iter().zip(other.iter()) {
            match a.cmp(b) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        self.len().cmp(&other.len())
    }
}

impl<T, A: Allocator> Extend<T> for Vec<T, A> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(self.len.saturating_add(lower));
        for element in iter {
            self.push(element);
        }
    }
}

impl<'a, T: 'a + Clone, A: Allocator> Extend<&'a T> for Vec<T, A> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned())
    }
}

impl<T> FromIterator<T> for Vec<T> {
    #[track_caller]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ret = Vec::new();
        ret.extend(iter);
        ret
    }
}

impl<T: Clone> From<&[T]> for Vec<T> {
    #[track_caller]
    fn from(source: &[T]) -> Self {
        let mut ret = Vec::with_capacity(source.len());
        unsafe { uninit::copy_construct(&ret.alloc, source, ret.ptr.as_ptr()) };
        ret.len = source.len();
        ret
    }
}

impl<T, const N: usize> From<[T; N]> for Vec<T> {
    #[track_caller]
    fn from(source: [T; N]) -> Self {
        let mut ret = Vec::with_capacity(N);
        let source = ManuallyDrop::new(source);
        unsafe { uninit::relocate(source.as_ptr(), ret.ptr.as_ptr(), N) };
        ret.len = N;
        ret
    }
}

/// An iterator that moves out of a vector.
///
/// This `struct` is created by the `into_iter` method on [`Vec`] (provided by
/// the [`IntoIterator`] trait).
pub struct IntoIter<T, A: Allocator = Global> {
    buf: NonNull<T>,
    cap: usize,
    start: usize,
    end: usize,
    alloc: A,
    elems: PhantomData<T>,
}

impl<T, A: Allocator> IntoIter<T, A> {
    /// Returns the remaining items of this iterator as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.end - self.start;
        (size, Some(size))
    }

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        let ret = unsafe { self.buf.as_ptr().add(self.start).read() };
        self.start += 1;
        Some(ret)
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        self.end -= 1;
        Some(unsafe { self.buf.as_ptr().add(self.end).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}
impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        unsafe {
            let remaining = self.end - self.start;
            uninit::destroy_range(&self.alloc, self.buf.as_ptr().add(self.start), remaining);
            crate::allocator::deallocate_array(&self.alloc, self.buf, self.cap);
        }
    }
}

impl<T, A: Allocator> IntoIterator for Vec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> Self::IntoIter {
        let (buf, len, cap, alloc) = self.into_raw_parts_with_alloc();
        IntoIter {
            buf,
            cap,
            start: 0,
            end: len,
            alloc,
            elems: PhantomData,
        }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a Vec<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut Vec<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

/// A draining iterator for `Vec<T, A>`.
///
/// This `struct` is created by [`Vec::drain`]. See its documentation for more.
pub struct Drain<'p, T, A: Allocator> {
    parent: &'p mut Vec<T, A>,
    original_len: usize,
    target_start: usize,
    front_index: usize,
    back_index: usize,
    target_end: usize,
}

impl<T, A: Allocator> Iterator for Drain<'_, T, A> {
    type Item = T;

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.back_index - self.front_index;
        (size, Some(size))
    }

    fn next(&mut self) -> Option<Self::Item> {
        if self.front_index == self.back_index {
            return None;
        }

        let out = unsafe { self.parent.ptr.as_ptr().add(self.front_index).read() };
        self.front_index += 1;
        Some(out)
    }
}

impl<T, A: Allocator> DoubleEndedIterator for Drain<'_, T, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front_index == self.back_index {
            return None;
        }

        self.back_index -= 1;
        unsafe { Some(self.parent.ptr.as_ptr().add(self.back_index).read()) }
    }
}

impl<T, A: Allocator> ExactSizeIterator for Drain<'_, T, A> {}
impl<T, A: Allocator> FusedIterator for Drain<'_, T, A> {}

impl<T, A: Allocator> Drop for Drain<'_, T, A> {
    fn drop(&mut self) {
        unsafe {
            let base = self.parent.ptr.as_ptr();
            uninit::destroy_range(
                &self.parent.alloc,
                base.add(self.front_index),
                self.back_index - self.front_index,
            );

            let count = self.original_len - self.target_end;
            ptr::copy(base.add(self.target_end), base.add(self.target_start), count);
        }

        let removed = self.target_end - self.target_start;
        self.parent.len = self.original_len - removed;
    }
}
