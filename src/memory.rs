//! Memory Probes
//!
//! The event loop samples a [`MemoryProbe`] to decide whether a parse has
//! grown past its ceiling. The default probe reads the counters kept by the
//! crate's tracking allocator.

/// Source of current memory usage in bytes
pub trait MemoryProbe: Send + Sync {
    fn current_usage(&self) -> usize;
}

impl<F> MemoryProbe for F
where
    F: Fn() -> usize + Send + Sync,
{
    fn current_usage(&self) -> usize {
        self()
    }
}

/// Reads the global tracking allocator.
///
/// Reports 0 when the `memory_tracking` feature is off, which leaves the
/// memory guard inert.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocatorProbe;

impl MemoryProbe for AllocatorProbe {
    fn current_usage(&self) -> usize {
        memory_stats().0
    }
}

/// Current and peak bytes held through the tracking allocator
#[cfg(feature = "memory_tracking")]
pub fn memory_stats() -> (usize, usize) {
    use std::sync::atomic::Ordering;
    (
        crate::tracking::ALLOCATED.load(Ordering::SeqCst),
        crate::tracking::PEAK_ALLOCATED.load(Ordering::SeqCst),
    )
}

#[cfg(not(feature = "memory_tracking"))]
pub fn memory_stats() -> (usize, usize) {
    (0, 0)
}

/// Reset the peak counter to the current value, returning the old pair
#[cfg(feature = "memory_tracking")]
pub fn reset_memory_stats() -> (usize, usize) {
    use std::sync::atomic::Ordering;
    let current = crate::tracking::ALLOCATED.load(Ordering::SeqCst);
    let peak = crate::tracking::PEAK_ALLOCATED.swap(current, Ordering::SeqCst);
    (current, peak)
}

#[cfg(not(feature = "memory_tracking"))]
pub fn reset_memory_stats() -> (usize, usize) {
    (0, 0)
}
