//! A thin wrapper over the platform's native mutex.
//!
//! [`Mutex`] guards no data of its own; it is the bare lock primitive, for
//! callers that want to serialize access to something else (such as a
//! [`Vec`](crate::Vec), which has no internal synchronization).

use alloc::boxed::Box;

use core::cell::UnsafeCell;
use core::fmt;
use core::ptr;

use crate::error::SysError;

/// A non-recursive mutual exclusion lock backed by `pthread_mutex_t`.
///
/// The native object lives on the heap, so moving a `Mutex` never moves the
/// primitive itself. Moving it while locked is still a logic error.
///
/// # Examples
/// ```
/// let mutex = keel::Mutex::new()?;
/// {
///     let _held = mutex.lock_guard()?;
///     assert!(!mutex.try_lock()?);
/// }
/// assert!(mutex.try_lock()?);
/// unsafe { mutex.unlock()? };
/// # Ok::<(), keel::SysError>(())
/// ```
pub struct Mutex {
    raw: Box<UnsafeCell<libc::pthread_mutex_t>>,
}

unsafe impl Send for Mutex {}
unsafe impl Sync for Mutex {}

#[inline]
fn check(op: &'static str, code: libc::c_int) -> Result<(), SysError> {
    if code == 0 {
        Ok(())
    } else {
        log::error!("{} failed with code {}", op, code);
        Err(SysError::new(op, code))
    }
}

impl Mutex {
    /// Creates and initializes an unlocked mutex.
    pub fn new() -> Result<Self, SysError> {
        let raw = Box::new(UnsafeCell::new(libc::PTHREAD_MUTEX_INITIALIZER));
        check("pthread_mutex_init", unsafe {
            libc::pthread_mutex_init(raw.get(), ptr::null())
        })?;
        Ok(Mutex { raw })
    }

    /// Blocks the current thread until the lock is acquired.
    ///
    /// Locking a mutex the current thread already holds deadlocks or fails,
    /// depending on the platform.
    #[inline]
    pub fn lock(&self) -> Result<(), SysError> {
        check("pthread_mutex_lock", unsafe { libc::pthread_mutex_lock(self.raw.get()) })
    }

    /// Attempts to acquire the lock without blocking.
    ///
    /// Returns `Ok(false)` if the mutex is held by someone else.
    pub fn try_lock(&self) -> Result<bool, SysError> {
        match unsafe { libc::pthread_mutex_trylock(self.raw.get()) } {
            0 => Ok(true),
            libc::EBUSY => Ok(false),
            code => check("pthread_mutex_trylock", code).map(|()| false),
        }
    }

    /// Releases the lock.
    ///
    /// # Safety
    /// The current thread must hold the lock, acquired through
    /// [`lock`](Mutex::lock) or a successful [`try_lock`](Mutex::try_lock).
    #[inline]
    pub unsafe fn unlock(&self) -> Result<(), SysError> {
        check("pthread_mutex_unlock", libc::pthread_mutex_unlock(self.raw.get()))
    }

    /// Acquires the lock and returns a guard that releases it when dropped.
    pub fn lock_guard(&self) -> Result<MutexGuard<'_>, SysError> {
        self.lock()?;
        Ok(MutexGuard { mutex: self })
    }

    /// Returns a pointer to the underlying native object.
    ///
    /// The pointer stays valid for as long as `self` lives, even if `self`
    /// is moved.
    #[inline]
    pub fn native_handle(&self) -> *mut libc::pthread_mutex_t {
        self.raw.get()
    }
}

impl Drop for Mutex {
    fn drop(&mut self) {
        // errors are logged by `check`; there is nobody to report them to
        let _ = check("pthread_mutex_destroy", unsafe {
            libc::pthread_mutex_destroy(self.raw.get())
        });
    }
}

impl fmt::Debug for Mutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutex").field("native", &self.native_handle()).finish()
    }
}

/// Holds a [`Mutex`] locked for as long as it lives.
///
/// Created by [`Mutex::lock_guard`].
#[must_use = "if unused the Mutex will immediately unlock"]
pub struct MutexGuard<'a> {
    mutex: &'a Mutex,
}

impl MutexGuard<'_> {
    /// Returns the mutex this guard holds.
    #[inline]
    pub fn mutex(&self) -> &Mutex {
        self.mutex
    }
}

impl Drop for MutexGuard<'_> {
    fn drop(&mut self) {
        let _ = unsafe { self.mutex.unlock() };
    }
}

impl fmt::Debug for MutexGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutexGuard").field("mutex", self.mutex).finish()
    }
}
