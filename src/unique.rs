//! A unique-ownership pointer with a pluggable deletion policy.
//!
//! [`UniquePtr`] is similar to [`Box`], with two differences: it may be
//! null, and the way the owned object is destroyed is decided by a
//! [`Deleter`] stored next to the pointer. The default deleter,
//! [`DefaultDelete`], releases objects created through `Box`; any
//! `FnMut(NonNull<T>)` closure can be used to release objects that came
//! from somewhere else.
//!
//! Comparisons and hashing look at the owned *address*, not the pointee.
//! A null pointer compares less than any non-null pointer.

use alloc::boxed::Box;

use core::cmp::Ordering;
use core::fmt::{self, Debug, Formatter, Pointer};
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem;
use core::ops::{Deref, DerefMut};
use core::ptr::NonNull;

/// Destroys objects owned by a [`UniquePtr`].
pub trait Deleter<T: ?Sized> {
    /// Destroys the object at `ptr` and releases its memory.
    ///
    /// # Safety
    /// `ptr` must point to a live object that this deleter is able to
    /// release, and that nothing else will access afterwards.
    unsafe fn delete(&mut self, ptr: NonNull<T>);
}

/// The deleter for objects allocated through [`Box`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultDelete;

impl<T: ?Sized> Deleter<T> for DefaultDelete {
    #[inline]
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        drop(Box::from_raw(ptr.as_ptr()));
    }
}

impl<T: ?Sized, F: FnMut(NonNull<T>)> Deleter<T> for F {
    #[inline]
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        self(ptr)
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn null_dereference() -> ! {
    panic!("dereferenced a null UniquePtr")
}

/// A pointer that solely owns the object it points to, if any.
///
/// See the [module-level documentation](crate::unique) for more.
///
/// # Examples
/// ```
/// use keel::UniquePtr;
///
/// let mut p = UniquePtr::new(41);
/// *p += 1;
/// assert_eq!(*p, 42);
///
/// let raw = p.release().unwrap();
/// assert!(p.is_null());
/// let q = unsafe { UniquePtr::from_raw(raw, keel::unique::DefaultDelete) };
/// assert_eq!(q.get(), Some(&42));
/// ```
pub struct UniquePtr<T: ?Sized, D: Deleter<T> = DefaultDelete> {
    ptr: Option<NonNull<T>>,
    deleter: D,
    owns: PhantomData<T>,
}

unsafe impl<T: ?Sized + Send, D: Deleter<T> + Send> Send for UniquePtr<T, D> {}
unsafe impl<T: ?Sized + Sync, D: Deleter<T> + Sync> Sync for UniquePtr<T, D> {}

impl<T> UniquePtr<T> {
    /// Moves `value` to the heap and takes ownership of it.
    #[inline]
    pub fn new(value: T) -> Self {
        UniquePtr::from_box(Box::new(value))
    }
}

impl<T: Default> UniquePtr<[T]> {
    /// Allocates a slice of `len` default-initialized elements.
    ///
    /// # Examples
    /// ```
    /// let mut p = keel::UniquePtr::<[u32]>::make_unique_slice(3);
    /// p[1] = 7;
    /// assert_eq!(&*p, &[0, 7, 0]);
    /// ```
    pub fn make_unique_slice(len: usize) -> Self {
        UniquePtr::from_box((0..len).map(|_| T::default()).collect())
    }
}

impl<T: ?Sized> UniquePtr<T> {
    /// Takes ownership of the contents of `b`.
    #[inline]
    pub fn from_box(b: Box<T>) -> Self {
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(b)) };
        UniquePtr {
            ptr: Some(ptr),
            deleter: DefaultDelete,
            owns: PhantomData,
        }
    }

    /// Relinquishes ownership as a `Box`, or returns `None` if null.
    #[inline]
    pub fn into_box(mut self) -> Option<Box<T>> {
        self.release().map(|ptr| unsafe { Box::from_raw(ptr.as_ptr()) })
    }

    /// Deletes the current object, if any, and takes ownership of `b`.
    pub fn reset_box(&mut self, b: Box<T>) {
        let ptr = unsafe { NonNull::new_unchecked(Box::into_raw(b)) };
        unsafe { self.reset_to(ptr) };
    }
}

impl<T: ?Sized, D: Deleter<T>> UniquePtr<T, D> {
    /// Creates a null pointer that will use `deleter` once it owns something.
    #[inline]
    pub const fn null_with(deleter: D) -> Self {
        UniquePtr {
            ptr: None,
            deleter,
            owns: PhantomData,
        }
    }

    /// Takes ownership of the object at `ptr`, to be destroyed by `deleter`.
    ///
    /// # Safety
    /// `ptr` must point to a live object that `deleter` can release, and
    /// that nothing else owns.
    #[inline]
    pub unsafe fn from_raw(ptr: NonNull<T>, deleter: D) -> Self {
        UniquePtr {
            ptr: Some(ptr),
            deleter,
            owns: PhantomData,
        }
    }

    /// Returns `true` if the pointer owns nothing.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Returns the owned pointer without giving up ownership.
    #[inline]
    pub fn as_ptr(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// Returns a reference to the owned object, or `None` if null.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.ptr.map(|p| unsafe { &*p.as_ptr() })
    }

    /// Returns a mutable reference to the owned object, or `None` if null.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.ptr.map(|p| unsafe { &mut *p.as_ptr() })
    }

    /// Returns a reference to the deleter.
    #[inline]
    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// Returns a mutable reference to the deleter.
    #[inline]
    pub fn deleter_mut(&mut self) -> &mut D {
        &mut self.deleter
    }

    /// Gives up ownership without destroying the object, leaving `self`
    /// null.
    #[inline]
    pub fn release(&mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }

    /// Deletes the current object, if any, leaving `self` null.
    pub fn reset(&mut self) {
        if let Some(old) = self.ptr.take() {
            unsafe { self.deleter.delete(old) };
        }
    }

    /// Takes ownership of `ptr`, then deletes the previously owned object.
    ///
    /// # Safety
    /// Same as [`from_raw`](UniquePtr::from_raw), with respect to this
    /// pointer's deleter.
    pub unsafe fn reset_to(&mut self, ptr: NonNull<T>) {
        if let Some(old) = self.ptr.replace(ptr) {
            self.deleter.delete(old);
        }
    }

    /// Exchanges the owned objects and deleters of `self` and `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.deleter, &mut other.deleter);
    }

    #[inline]
    fn addr(&self) -> Option<usize> {
        self.ptr.map(|p| p.as_ptr().cast::<()>() as usize)
    }
}

impl<T: ?Sized, D: Deleter<T>> Drop for UniquePtr<T, D> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> Default for UniquePtr<T, D> {
    #[inline]
    fn default() -> Self {
        UniquePtr::null_with(D::default())
    }
}

impl<T: ?Sized> From<Box<T>> for UniquePtr<T> {
    #[inline]
    fn from(b: Box<T>) -> Self {
        UniquePtr::from_box(b)
    }
}

impl<T: ?Sized, D: Deleter<T>> Deref for UniquePtr<T, D> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        match self.ptr {
            Some(p) => unsafe { &*p.as_ptr() },
            None => null_dereference(),
        }
    }
}

impl<T: ?Sized, D: Deleter<T>> DerefMut for UniquePtr<T, D> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.ptr {
            Some(p) => unsafe { &mut *p.as_ptr() },
            None => null_dereference(),
        }
    }
}

impl<T: ?Sized + Debug, D: Deleter<T>> Debug for UniquePtr<T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("UniquePtr").field(&value).finish(),
            None => f.write_str("UniquePtr(null)"),
        }
    }
}

impl<T: ?Sized, D: Deleter<T>> Pointer for UniquePtr<T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let raw = self.ptr.map_or(core::ptr::null(), |p| p.as_ptr().cast::<()>() as *const ());
        Pointer::fmt(&raw, f)
    }
}

impl<T: ?Sized, D: Deleter<T>> PartialEq for UniquePtr<T, D> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl<T: ?Sized, D: Deleter<T>> Eq for UniquePtr<T, D> {}

impl<T: ?Sized, D: Deleter<T>> PartialOrd for UniquePtr<T, D> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized, D: Deleter<T>> Ord for UniquePtr<T, D> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.addr().cmp(&other.addr())
    }
}

impl<T: ?Sized, D: Deleter<T>> Hash for UniquePtr<T, D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    use core::cell::Cell;

    #[test]
    fn owned_value_is_dropped_once() {
        let drop_count = DropCounter::new();
        let p = UniquePtr::new(drop_count.new_droppable(5));
        assert_eq!(p.value, 5);
        drop(p);
        assert_eq!(drop_count.dropped(), 1);
    }

    #[test]
    fn release_relinquishes_without_destroying() {
        let drop_count = DropCounter::new();
        let mut p = UniquePtr::new(drop_count.new_droppable(()));
        let raw = p.release().unwrap();
        assert!(p.is_null());
        assert_eq!(p.get(), None);
        drop(p);
        assert_eq!(drop_count.dropped(), 0);

        drop(unsafe { Box::from_raw(raw.as_ptr()) });
        assert_eq!(drop_count.dropped(), 1);
    }

    #[test]
    fn reset_deletes_the_previous_object() {
        let drop_count = DropCounter::new();
        let mut p = UniquePtr::new(drop_count.new_droppable(1));
        p.reset_box(Box::new(drop_count.new_droppable(2)));
        assert_eq!(drop_count.dropped(), 1);
        assert_eq!(p.value, 2);

        p.reset();
        assert!(p.is_null());
        assert_eq!(drop_count.dropped(), 2);
        p.reset();
        assert_eq!(drop_count.dropped(), 2);
    }

    #[test]
    fn closures_act_as_deleters() {
        let deleted = Cell::new(0);
        let raw = NonNull::from(Box::leak(Box::new(17u64)));
        let deleter = |p: NonNull<u64>| {
            deleted.set(unsafe { *p.as_ptr() });
            drop(unsafe { Box::from_raw(p.as_ptr()) });
        };

        let p = unsafe { UniquePtr::from_raw(raw, deleter) };
        assert_eq!(*p, 17);
        drop(p);
        assert_eq!(deleted.get(), 17);
    }

    #[test]
    fn swap_exchanges_ownership() {
        let mut a = UniquePtr::new(1);
        let mut b = UniquePtr::new(2);
        let (pa, pb) = (a.as_ptr(), b.as_ptr());
        a.swap(&mut b);
        assert_eq!((*a, *b), (2, 1));
        assert_eq!((a.as_ptr(), b.as_ptr()), (pb, pa));
    }

    #[test]
    fn comparisons_use_addresses() {
        let a = UniquePtr::new(0u32);
        let b = UniquePtr::new(0u32);
        let null = UniquePtr::<u32>::default();
        assert_ne!(a, b);
        assert_eq!(a, a);
        assert!(null < a && null < b);
        assert_eq!(null, UniquePtr::default());
        assert_eq!(a.cmp(&b), a.as_ptr().map(NonNull::as_ptr).cmp(&b.as_ptr().map(NonNull::as_ptr)));
    }

    #[test]
    fn slices_are_indexable() {
        let mut p = UniquePtr::<[i32]>::make_unique_slice(4);
        assert_eq!(p.len(), 4);
        p[3] = 9;
        assert_eq!(&*p, &[0, 0, 0, 9]);
        let b = p.into_box().unwrap();
        assert_eq!(b.len(), 4);
    }

    #[test]
    #[should_panic(expected = "dereferenced a null UniquePtr")]
    fn dereferencing_null_is_fatal() {
        let p = UniquePtr::<u8>::default();
        let _ = *p;
    }
}
