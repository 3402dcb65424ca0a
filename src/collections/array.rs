//! A fixed-size array with checked element access.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ops::{Deref, DerefMut, Index, IndexMut};
use core::slice;

/// A wrapper around `[T; N]` whose checked accessors treat out-of-range
/// positions as contract violations.
///
/// Unlike a plain array, indexing a `FixedArray` panics with a message
/// naming both the index and the length, and [`front`](FixedArray::front)
/// and [`back`](FixedArray::back) are available on any `N`, panicking when
/// `N == 0`.
///
/// # Examples
/// ```
/// let mut arr = keel::FixedArray::new([3, 1, 2]);
/// arr.swap(0, 2);
/// assert_eq!(arr, [2, 1, 3]);
/// assert_eq!(*arr.back(), 3);
/// assert_eq!(keel::FixedArray::<u8, 3>::LEN, 3);
/// ```
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct FixedArray<T, const N: usize> {
    elems: [T; N],
}

#[cold]
#[inline(never)]
#[track_caller]
fn index_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("index out of bounds: the len is {} but the index is {}", len, index)
}

impl<T, const N: usize> FixedArray<T, N> {
    /// The number of elements, available without an instance.
    pub const LEN: usize = N;

    /// Wraps an existing array.
    #[inline]
    pub const fn new(elems: [T; N]) -> Self {
        FixedArray { elems }
    }

    /// Creates an array whose element at each index is `f(index)`.
    ///
    /// # Examples
    /// ```
    /// let squares = keel::FixedArray::<usize, 4>::from_fn(|i| i * i);
    /// assert_eq!(squares, [0, 1, 4, 9]);
    /// ```
    #[inline]
    pub fn from_fn<F: FnMut(usize) -> T>(f: F) -> Self {
        FixedArray {
            elems: core::array::from_fn(f),
        }
    }

    /// Returns the number of elements, `N`.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns `true` if `N == 0`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    #[inline]
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        if index >= N {
            index_out_of_bounds(index, N);
        }
        unsafe { self.elems.get_unchecked(index) }
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if `index >= N`.
    #[inline]
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        if index >= N {
            index_out_of_bounds(index, N);
        }
        unsafe { self.elems.get_unchecked_mut(index) }
    }

    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    /// `index` must be less than `N`.
    #[inline]
    pub unsafe fn at_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < N);
        self.elems.get_unchecked(index)
    }

    /// Returns a reference to the first element.
    ///
    /// # Panics
    /// Panics if `N == 0`.
    #[inline]
    #[track_caller]
    pub fn front(&self) -> &T {
        self.at(0)
    }

    /// Returns a reference to the last element.
    ///
    /// # Panics
    /// Panics if `N == 0`.
    #[inline]
    #[track_caller]
    pub fn back(&self) -> &T {
        self.at(N.wrapping_sub(1))
    }

    /// Replaces every element with a clone of `value`.
    pub fn fill(&mut self, value: &T)
    where
        T: Clone,
    {
        self.elems.fill(value.clone());
    }

    /// Exchanges the contents of `self` and `other` element by element.
    #[inline]
    pub fn swap_with(&mut self, other: &mut Self) {
        self.elems.swap_with_slice(&mut other.elems);
    }

    /// Extracts a slice containing the entire array.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elems
    }

    /// Extracts a mutable slice containing the entire array.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elems
    }

    /// Unwraps the underlying array.
    #[inline]
    pub fn into_inner(self) -> [T; N] {
        self.elems
    }
}

impl<T: Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        FixedArray::from_fn(|_| T::default())
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray<T, N> {
    #[inline]
    fn from(elems: [T; N]) -> Self {
        FixedArray { elems }
    }
}

impl<T, const N: usize> Deref for FixedArray<T, N> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        &self.elems
    }
}

impl<T, const N: usize> DerefMut for FixedArray<T, N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.elems
    }
}

impl<T, const N: usize> Index<usize> for FixedArray<T, N> {
    type Output = T;
    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &T {
        self.at(index)
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedArray<T, N> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.at_mut(index)
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for FixedArray<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.elems, f)
    }
}

impl<T: Hash, const N: usize> Hash for FixedArray<T, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(&self.elems[..], state)
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<FixedArray<U, N>> for FixedArray<T, N> {
    #[inline]
    fn eq(&self, other: &FixedArray<U, N>) -> bool {
        self.elems[..] == other.elems[..]
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for FixedArray<T, N> {
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.elems[..] == other[..]
    }
}

impl<T: Eq, const N: usize> Eq for FixedArray<T, N> {}

impl<T: PartialOrd, const N: usize> PartialOrd for FixedArray<T, N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.elems[..].partial_cmp(&other.elems[..])
    }
}

impl<T: Ord, const N: usize> Ord for FixedArray<T, N> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.elems[..].cmp(&other.elems[..])
    }
}

impl<T, const N: usize> IntoIterator for FixedArray<T, N> {
    type Item = T;
    type IntoIter = core::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.into_iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedArray<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut FixedArray<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elems.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let mut arr = FixedArray::new([10, 20, 30]);
        assert_eq!(arr.len(), 3);
        assert_eq!(*arr.front(), 10);
        assert_eq!(*arr.back(), 30);
        assert_eq!(arr.get(3), None);
        arr[1] += 1;
        *arr.at_mut(2) = 0;
        assert_eq!(arr, [10, 21, 0]);
        assert_eq!(unsafe { *arr.at_unchecked(1) }, 21);
        assert!(arr.iter().rev().copied().eq([0, 21, 10]));
    }

    #[test]
    fn fill_swap_and_compare() {
        let mut a = FixedArray::<u8, 4>::default();
        let mut b = FixedArray::new([1, 2, 3, 4]);
        a.fill(&9);
        assert_eq!(a, [9, 9, 9, 9]);
        assert!(b < a);

        a.swap_with(&mut b);
        assert_eq!(a, [1, 2, 3, 4]);
        assert_eq!(b, [9, 9, 9, 9]);
        assert_eq!(a.into_inner(), [1, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "the len is 3 but the index is 3")]
    fn index_past_the_end_is_fatal() {
        let arr = FixedArray::new([1, 2, 3]);
        let _ = arr[3];
    }

    #[test]
    #[should_panic(expected = "the len is 0")]
    fn front_of_empty_array_is_fatal() {
        let arr = FixedArray::<u32, 0>::default();
        assert!(arr.is_empty());
        let _ = arr.front();
    }

    #[test]
    #[should_panic(expected = "the len is 0")]
    fn back_of_empty_array_is_fatal() {
        let arr = FixedArray::<u32, 0>::new([]);
        let _ = arr.back();
    }
}
