//! Type aliases for state shared between a tessellation worker and the
//! render loop.
//!
//! Tessellation output is immutable once built and travels as `Arc<T>`.
//! The only mutable render state, the progress color buffer, has a single
//! writer; when it must cross threads it lives behind this lock.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cncview_core::types::*;
//!
//! // Instead of: Arc<RwLock<ToolpathCache>>
//! let cache: ThreadSafeRw<ToolpathCache> = thread_safe_rw(ToolpathCache::new());
//! ```

use parking_lot::RwLock;
use std::sync::Arc;

/// A thread-safe reader-writer lock wrapper for read-heavy workloads.
///
/// Many readers may take snapshots concurrently; publishing a new value
/// requires exclusive access.
pub type ThreadSafeRw<T> = Arc<RwLock<T>>;

/// Create a new `ThreadSafeRw<T>` from a value.
#[inline]
pub fn thread_safe_rw<T>(value: T) -> ThreadSafeRw<T> {
    Arc::new(RwLock::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_safe_rw() {
        let value: ThreadSafeRw<Vec<u8>> = thread_safe_rw(vec![1, 2]);

        assert_eq!(value.read().len(), 2);
        assert_eq!(value.read()[0], 1);

        value.write().push(3);
        assert_eq!(*value.read(), vec![1, 2, 3]);
    }

    #[test]
    fn test_cross_thread_writer() {
        let value = thread_safe_rw(0usize);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let value = Arc::clone(&value);
                std::thread::spawn(move || *value.write() += 1)
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(*value.read(), 4);
    }
}
