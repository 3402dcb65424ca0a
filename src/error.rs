//! Error types for resource failures.
//!
//! Contract violations (out-of-bounds indices, popping an empty vector, ...)
//! are not represented here; they panic at the call site instead.

use core::alloc::Layout;

use thiserror::Error;

/// The error type for fallible allocations.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AllocError {
    /// The requested capacity exceeds `isize::MAX` bytes, or computing it
    /// overflowed `usize`.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The allocator reported a failure for the given request.
    #[error("memory allocation of {size} bytes (align {align}) failed")]
    AllocFailed {
        /// Size of the failed request in bytes.
        size: usize,
        /// Alignment of the failed request in bytes.
        align: usize,
    },
}

impl AllocError {
    /// Creates an [`AllocError::AllocFailed`] describing `layout`.
    #[inline]
    pub fn failed(layout: Layout) -> Self {
        AllocError::AllocFailed {
            size: layout.size(),
            align: layout.align(),
        }
    }

    /// Returns `true` if this error stems from a capacity computation
    /// rather than from the allocator itself.
    #[inline]
    pub fn is_capacity_overflow(&self) -> bool {
        matches!(self, AllocError::CapacityOverflow)
    }
}

/// The error type for failed calls into the platform's synchronization
/// primitives.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("{op} failed: os error {code}")]
pub struct SysError {
    /// Name of the failed native call, e.g. `"pthread_mutex_lock"`.
    pub op: &'static str,
    /// The raw error code returned by the call.
    pub code: i32,
}

impl SysError {
    #[inline]
    pub(crate) fn new(op: &'static str, code: i32) -> Self {
        SysError { op, code }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
impl From<SysError> for std::io::Error {
    fn from(err: SysError) -> Self {
        std::io::Error::from_raw_os_error(err.code)
    }
}

/// Shorthand for results of fallible allocations.
pub type Result<T> = core::result::Result<T, AllocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failed_request() {
        use std::string::ToString;

        let layout = Layout::from_size_align(64, 8).unwrap();
        assert_eq!(
            AllocError::failed(layout).to_string(),
            "memory allocation of 64 bytes (align 8) failed"
        );
        assert_eq!(AllocError::CapacityOverflow.to_string(), "capacity overflow");
        assert_eq!(
            SysError::new("pthread_mutex_lock", 22).to_string(),
            "pthread_mutex_lock failed: os error 22"
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn sys_error_converts_to_io_error() {
        let err: std::io::Error = SysError::new("pthread_mutex_init", 22).into();
        assert_eq!(err.raw_os_error(), Some(22));
    }
}
